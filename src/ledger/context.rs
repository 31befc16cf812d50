//! Call Context
//!
//! Who is calling, what value they attached, and the block executing the
//! call. Every state-changing operation takes one.

use serde::{Serialize, Deserialize};

use crate::core::amount::Amount;
use crate::core::identity::Identity;
use super::error::{LedgerError, LedgerResult};

/// Block executing a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block height
    pub height: u64,
    /// Block timestamp (Unix seconds)
    pub timestamp: u64,
}

impl BlockInfo {
    /// Create block info.
    pub const fn new(height: u64, timestamp: u64) -> Self {
        Self { height, timestamp }
    }

    /// Block at `height` stamped with the current wall clock.
    pub fn now(height: u64) -> Self {
        let timestamp = chrono::Utc::now().timestamp().max(0) as u64;
        Self { height, timestamp }
    }

    /// Next block, `secs` later.
    pub fn advance(self, secs: u64) -> Self {
        Self {
            height: self.height + 1,
            timestamp: self.timestamp.saturating_add(secs),
        }
    }
}

/// Caller, attached value and block for one operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Calling account
    pub caller: Identity,
    /// Value sent with the call
    pub value: Amount,
    /// Executing block
    pub block: BlockInfo,
}

impl CallContext {
    /// Call without attached value.
    pub const fn new(caller: Identity, block: BlockInfo) -> Self {
        Self { caller, value: 0, block }
    }

    /// Same call with `value` attached.
    pub fn with_value(self, value: Amount) -> Self {
        Self { value, ..self }
    }

    /// Block timestamp.
    #[inline]
    pub fn now(&self) -> u64 {
        self.block.timestamp
    }

    /// Fail if value was attached to a call that does not take any.
    pub(crate) fn reject_value(&self) -> LedgerResult<()> {
        if self.value > 0 {
            return Err(LedgerError::UnexpectedValue(self.value));
        }
        Ok(())
    }
}
