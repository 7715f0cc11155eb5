///! Decimal scaling of raw token amounts
///
use rust_decimal::Decimal;

use crate::error::{ErrorCode, Result};
use crate::PositionSnapshot;

/// Divides a raw token amount by `10^decimals` without losing precision
///
/// # Arguments
///
/// * `raw` - An amount in the token's smallest unit
/// * `decimals` - The mint's decimals, at most 28
///
pub fn scale_amount(raw: u128, decimals: u8) -> Result<Decimal> {
    let mantissa = i128::try_from(raw).map_err(|_| ErrorCode::MathOverflow)?;
    Decimal::try_from_i128_with_scale(mantissa, u32::from(decimals))
        .map_err(|_| ErrorCode::MathOverflow)
}

/// Fees and holdings of a position in whole tokens
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionValuation {
    pub fees_a: Decimal,
    pub fees_b: Decimal,
    pub amount_a: Decimal,
    pub amount_b: Decimal,
}

impl PositionValuation {
    pub fn from_snapshot(
        snapshot: &PositionSnapshot,
        decimals_a: u8,
        decimals_b: u8,
    ) -> Result<PositionValuation> {
        Ok(PositionValuation {
            fees_a: scale_amount(snapshot.fees.uncollected_a, decimals_a)?,
            fees_b: scale_amount(snapshot.fees.uncollected_b, decimals_b)?,
            amount_a: scale_amount(snapshot.amounts.amount_a, decimals_a)?,
            amount_b: scale_amount(snapshot.amounts.amount_b, decimals_b)?,
        })
    }

    /// Uncollected fees plus holdings, per token
    pub fn total_a(&self) -> Result<Decimal> {
        self.fees_a
            .checked_add(self.amount_a)
            .ok_or(ErrorCode::MathOverflow)
    }

    pub fn total_b(&self) -> Result<Decimal> {
        self.fees_b
            .checked_add(self.amount_b)
            .ok_or(ErrorCode::MathOverflow)
    }
}
