//! League Rosters
//!
//! Fixed team lists that fixtures are drawn from.

use super::types::League;

const LA_LIGA: &[&str] = &[
    "Barcelona",
    "Real Madrid",
    "Atletico Madrid",
    "Sevilla",
    "Real Sociedad",
    "Villarreal",
    "Real Betis",
    "Athletic Bilbao",
    "Valencia",
    "Girona",
];

const PREMIER_LEAGUE: &[&str] = &[
    "Manchester City",
    "Liverpool",
    "Arsenal",
    "Chelsea",
    "Manchester United",
    "Tottenham",
    "Newcastle",
    "Aston Villa",
    "Brighton",
    "West Ham",
];

const SERIE_A: &[&str] = &[
    "Juventus",
    "AC Milan",
    "Inter Milan",
    "Napoli",
    "Roma",
    "Lazio",
    "Atalanta",
    "Fiorentina",
    "Bologna",
    "Torino",
];

/// Full roster for a league.
pub fn teams(league: League) -> &'static [&'static str] {
    match league {
        League::LaLiga => LA_LIGA,
        League::PremierLeague => PREMIER_LEAGUE,
        League::SerieA => SERIE_A,
    }
}

/// Team at `index` in a league roster.
pub fn team(league: League, index: usize) -> Option<&'static str> {
    teams(league).get(index).copied()
}
