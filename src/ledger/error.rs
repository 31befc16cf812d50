//! Ledger Errors
//!
//! Every rejected operation returns one of these and leaves the ledger
//! exactly as it was.

use crate::core::amount::Amount;
use super::types::{BetId, League, MatchId};

/// Error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fixture generation attempted inside the cooldown window.
    TimingGate,
    /// Caller lacks the identity the operation requires.
    AccessControl,
    /// Malformed input.
    Validation,
    /// Operation not allowed in the record's current state.
    State,
    /// Not enough value in the shared pool.
    ResourceExhaustion,
    /// The value transfer primitive refused the payment.
    Transfer,
}

/// Failure of the external value transfer primitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transfer rejected: {0}")]
pub struct TransferError(pub String);

/// Ledger operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Generation attempted before the cooldown elapsed.
    #[error("cooldown active: {remaining_secs}s remaining")]
    CooldownActive {
        /// Seconds until generation opens.
        remaining_secs: u64,
    },

    /// Privileged operation called by someone other than the authority.
    #[error("only the authority may call this")]
    NotAuthority,

    /// Claim attempted by someone other than the bettor.
    #[error("bet {0} belongs to another account")]
    NotBettor(BetId),

    /// Bet with no legs.
    #[error("bet has no legs")]
    EmptyLegs,

    /// Match id and prediction lists differ in length.
    #[error("{matches} match ids but {predictions} predictions")]
    LegCountMismatch {
        /// Number of match ids.
        matches: usize,
        /// Number of predictions.
        predictions: usize,
    },

    /// Too many legs in one bet.
    #[error("{count} legs exceeds the limit of {max}")]
    TooManyLegs {
        /// Submitted leg count.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Same fixture twice in one bet.
    #[error("match {0} appears in more than one leg")]
    DuplicateLeg(MatchId),

    /// `Unset` used as a prediction.
    #[error("prediction for match {0} is unset")]
    UnsetPrediction(MatchId),

    /// Bet with no value attached.
    #[error("stake must be greater than zero")]
    ZeroStake,

    /// Funding call with no value attached.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// Value attached to a call that does not accept any.
    #[error("operation does not accept value (got {0})")]
    UnexpectedValue(Amount),

    /// Too many fixture ids in one resolution call.
    #[error("batch of {count} exceeds the limit of {max}")]
    BatchTooLarge {
        /// Submitted id count.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Same fixture twice in one resolution call.
    #[error("match {0} listed more than once")]
    DuplicateMatchId(MatchId),

    /// Unknown fixture id.
    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    /// Fixture already resolved.
    #[error("match {0} already played")]
    MatchAlreadyPlayed(MatchId),

    /// Unknown bet id.
    #[error("bet {0} not found")]
    BetNotFound(BetId),

    /// League roster cannot supply two distinct teams.
    #[error("roster for {0:?} has fewer than two teams")]
    RosterTooSmall(League),

    /// Bet already settled.
    #[error("bet {0} already claimed")]
    AlreadyClaimed(BetId),

    /// A leg still references an unresolved fixture.
    #[error("match {0} not yet resolved")]
    NotYetResolved(MatchId),

    /// Shared balance cannot cover the payment.
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds {
        /// Amount requested.
        needed: Amount,
        /// Current shared balance.
        available: Amount,
    },

    /// Arithmetic overflow in value accounting.
    #[error("amount overflow")]
    Overflow,

    /// Transfer primitive failed; effects were rolled back.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl LedgerError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::CooldownActive { .. } => ErrorKind::TimingGate,
            LedgerError::NotAuthority | LedgerError::NotBettor(_) => ErrorKind::AccessControl,
            LedgerError::EmptyLegs
            | LedgerError::LegCountMismatch { .. }
            | LedgerError::TooManyLegs { .. }
            | LedgerError::DuplicateLeg(_)
            | LedgerError::UnsetPrediction(_)
            | LedgerError::ZeroStake
            | LedgerError::ZeroAmount
            | LedgerError::UnexpectedValue(_)
            | LedgerError::BatchTooLarge { .. }
            | LedgerError::DuplicateMatchId(_)
            | LedgerError::MatchNotFound(_)
            | LedgerError::BetNotFound(_) => ErrorKind::Validation,
            LedgerError::MatchAlreadyPlayed(_)
            | LedgerError::AlreadyClaimed(_)
            | LedgerError::NotYetResolved(_)
            | LedgerError::RosterTooSmall(_) => ErrorKind::State,
            LedgerError::InsufficientFunds { .. } | LedgerError::Overflow => {
                ErrorKind::ResourceExhaustion
            }
            LedgerError::Transfer(_) => ErrorKind::Transfer,
        }
    }

    /// Whether the same call may succeed later without changing inputs.
    ///
    /// The ledger never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LedgerError::CooldownActive { .. }
                | LedgerError::NotYetResolved(_)
                | LedgerError::InsufficientFunds { .. }
                | LedgerError::Transfer(_)
        )
    }
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
