use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Integer on-chain quantity: a token amount scaled by the asset's decimals
///
/// Always non-negative. Displays as a base-10 integer string with no
/// fractional part, which is the form contract calls expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BaseUnits(u128);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    #[error("Amount must not be negative: {0}")]
    Negative(Decimal),

    #[error("Amount {amount} overflows when scaled by 10^{decimals}")]
    Overflow { amount: Decimal, decimals: u32 },
}

impl BaseUnits {
    pub const ZERO: BaseUnits = BaseUnits(0);

    pub fn new(value: u128) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    /// Narrow to u64, the width of on-chain amounts
    pub fn to_u64(&self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for BaseUnits {
    fn from(value: u64) -> Self {
        Self(value as u128)
    }
}

impl fmt::Display for BaseUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for BaseUnits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Scale a human-readable amount into base units
///
/// Computes `amount * 10^decimals` and truncates toward zero. Works on the
/// decimal's mantissa and scale directly so no precision is lost before
/// truncation.
pub fn to_base_units(amount: Decimal, decimals: u32) -> Result<BaseUnits, ScaleError> {
    let mantissa = amount.mantissa();
    if mantissa < 0 {
        return Err(ScaleError::Negative(amount));
    }
    let mantissa = mantissa as u128;
    let scale = amount.scale();
    let overflow = || ScaleError::Overflow { amount, decimals };

    let value = if decimals >= scale {
        let factor = 10u128.checked_pow(decimals - scale).ok_or_else(overflow)?;
        mantissa.checked_mul(factor).ok_or_else(overflow)?
    } else {
        // scale is at most 28, so the divisor always fits
        mantissa / 10u128.pow(scale - decimals)
    };

    Ok(BaseUnits(value))
}
