//! Shared fixtures for ledger tests.

use crate::core::amount::{Amount, UNIT};
use crate::core::identity::Identity;
use super::config::{LedgerConfig, DEFAULT_COOLDOWN_SECS};
use super::context::{BlockInfo, CallContext};
use super::simulator::SeededEntropy;
use super::state::Ledger;
use super::treasury::AccountBook;
use super::types::{MatchId, Outcome};

pub(crate) const GENESIS: BlockInfo = BlockInfo::new(1, 1_700_000_000);

pub(crate) fn owner() -> Identity {
    Identity::from_label("owner")
}

pub(crate) fn alice() -> Identity {
    Identity::from_label("alice")
}

pub(crate) fn bob() -> Identity {
    Identity::from_label("bob")
}

/// Anyone may generate and resolve; tests use a separate caller for it.
pub(crate) fn keeper() -> Identity {
    Identity::from_label("keeper")
}

pub(crate) fn call(caller: Identity, block: BlockInfo) -> CallContext {
    CallContext::new(caller, block)
}

pub(crate) fn deploy() -> (Ledger<SeededEntropy>, BlockInfo) {
    let ledger = Ledger::new(owner(), LedgerConfig::default(), SeededEntropy::new(7), GENESIS);
    (ledger, GENESIS)
}

/// Deployed, cooldown elapsed, one batch generated.
pub(crate) fn generated() -> (Ledger<SeededEntropy>, BlockInfo, Vec<MatchId>) {
    let (mut ledger, block) = deploy();
    let block = block.advance(DEFAULT_COOLDOWN_SECS);
    let ids = ledger
        .generate_fixtures(&call(keeper(), block))
        .expect("generation after cooldown");
    (ledger, block, ids)
}

/// Generated and every fixture resolved.
pub(crate) fn resolved() -> (Ledger<SeededEntropy>, BlockInfo, Vec<MatchId>) {
    let (mut ledger, block, ids) = generated();
    let block = block.advance(12);
    ledger
        .resolve_fixtures(&call(keeper(), block), &ids)
        .expect("resolution of fresh fixtures");
    (ledger, block, ids)
}

/// Authority seeds the pool with `amount`.
pub(crate) fn fund(ledger: &mut Ledger<SeededEntropy>, block: BlockInfo, amount: Amount) {
    ledger
        .fund(&call(owner(), block).with_value(amount))
        .expect("funding");
}

pub(crate) fn results(ledger: &Ledger<SeededEntropy>, ids: &[MatchId]) -> Vec<Outcome> {
    ids.iter()
        .map(|id| ledger.get_match(*id).expect("known match").result)
        .collect()
}

/// Some set outcome different from `actual`.
pub(crate) fn wrong(actual: Outcome) -> Outcome {
    if actual == Outcome::HomeWin {
        Outcome::AwayWin
    } else {
        Outcome::HomeWin
    }
}

pub(crate) fn stake() -> Amount {
    UNIT
}

pub(crate) fn book() -> AccountBook {
    AccountBook::new()
}
