//! Value Amounts
//!
//! All value moving through the ledger is an integer count of base units.
//! One whole unit is 10^18 base units, so a stake of `1.0` is `UNIT`.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Amount = u128 base units                    │
//! │  UNIT   = 1_000_000_000_000_000_000 (1.0)    │
//! │  No floats anywhere in settlement.           │
//! └──────────────────────────────────────────────┘
//! ```

/// Value in base units.
pub type Amount = u128;

/// Number of decimal places in one whole unit.
pub const DECIMALS: u32 = 18;

/// 1.0 in base units.
pub const UNIT: Amount = 1_000_000_000_000_000_000;

/// Build an amount from whole units plus a fraction in thousandths.
///
/// `units(1, 500)` is `1.5`. Returns `None` on overflow.
pub fn units(whole: u64, thousandths: u16) -> Option<Amount> {
    let whole = (whole as Amount).checked_mul(UNIT)?;
    let frac = (thousandths as Amount).checked_mul(UNIT / 1000)?;
    whole.checked_add(frac)
}

/// Multiply a stake by an integer multiplier, `None` on overflow.
#[inline]
pub fn scale(amount: Amount, multiplier: u32) -> Option<Amount> {
    amount.checked_mul(multiplier as Amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units() {
        assert_eq!(units(1, 0), Some(UNIT));
        assert_eq!(units(2, 0), Some(2 * UNIT));
        assert_eq!(units(0, 500), Some(UNIT / 2));
        assert_eq!(units(1, 250), Some(UNIT + UNIT / 4));
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(UNIT, 2), Some(2 * UNIT));
        assert_eq!(scale(0, 2), Some(0));
        assert_eq!(scale(Amount::MAX, 2), None);
    }
}
