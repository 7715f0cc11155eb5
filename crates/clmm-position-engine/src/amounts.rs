///! Token amounts held by a position at the pool's current price
///
use log::debug;

use crate::error::{ErrorCode, Result};
use crate::libraries::liquidity_amounts::{self, AmountResult};
use crate::libraries::tick_math;
use crate::states::layout::ProtocolVariant;
use crate::states::pool::Pool;
use crate::states::position::Position;

/// Where the pool price sits relative to a position's range
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionStatus {
    /// Only token_a is held
    PriceBelowRange,
    /// Both tokens are held and the position earns fees
    PriceInRange,
    /// Only token_b is held
    PriceAboveRange,
}

/// Sqrt prices of both range boundaries as Q64.64, rounded the way `variant` does
fn range_sqrt_prices(variant: ProtocolVariant, position: &Position) -> Result<(u128, u128)> {
    if position.tick_lower_index >= position.tick_upper_index {
        return Err(ErrorCode::InvalidRange {
            lower: position.tick_lower_index,
            upper: position.tick_upper_index,
        });
    }
    Ok((
        tick_math::get_sqrt_price_at_tick(variant, position.tick_lower_index)?,
        tick_math::get_sqrt_price_at_tick(variant, position.tick_upper_index)?,
    ))
}

/// Computes the token_a and token_b amounts represented by a position's liquidity
///
/// # Arguments
///
/// * `pool` - The pool the position belongs to, provides the current sqrt price
/// * `position` - The position being valued
///
pub fn position_amounts(pool: &Pool, position: &Position) -> Result<AmountResult> {
    if position.pool != pool.address {
        return Err(ErrorCode::PoolMismatch {
            expected: pool.address,
            found: position.pool,
        });
    }
    let (sqrt_price_lower, sqrt_price_upper) = range_sqrt_prices(pool.variant, position)?;
    let amounts = liquidity_amounts::liquidity_to_amounts(
        position.liquidity,
        sqrt_price_lower,
        sqrt_price_upper,
        pool.sqrt_price,
    )?;

    debug!(
        "position {}: liquidity {} holds ({}, {})",
        position.address, position.liquidity, amounts.amount_a, amounts.amount_b
    );

    Ok(amounts)
}

/// Classifies the pool price against a position's range, using the same boundary
/// comparisons as `liquidity_to_amounts`
pub fn position_status(pool: &Pool, position: &Position) -> Result<PositionStatus> {
    let (sqrt_price_lower, sqrt_price_upper) = range_sqrt_prices(pool.variant, position)?;
    Ok(if pool.sqrt_price <= sqrt_price_lower {
        PositionStatus::PriceBelowRange
    } else if pool.sqrt_price < sqrt_price_upper {
        PositionStatus::PriceInRange
    } else {
        PositionStatus::PriceAboveRange
    })
}
