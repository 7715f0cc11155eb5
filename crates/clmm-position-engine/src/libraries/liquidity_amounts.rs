///! Liquidity amount functions
///! Provides functions for computing token amounts from liquidity and prices
///! Implements formula 6.29 and 6.30
///
use log::trace;

use super::full_math;
use crate::error::{ErrorCode, Result};

/// The raw token_a and token_b amounts represented by a quantity of liquidity
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmountResult {
    pub amount_a: u128,
    pub amount_b: u128,
}

/// Computes the amount of token_a for a given amount of liquidity and a price range
/// Calculates Δx = ΔL (√P_upper - √P_lower) / (√P_upper x √P_lower)
///     = ΔL (1 / √P_lower -1 / √P_upper)
///
/// Both square roots are Q64.64, so the quotient is scaled back up by 2^64.
///
/// # Arguments
///
/// * `sqrt_price_lower_x64` - A sqrt price representing the first tick boundary, non zero
/// * `sqrt_price_upper_x64` - A sqrt price representing the second tick boundary
/// * `liquidity` - The liquidity being valued
///
pub fn get_amount_a_for_liquidity(
    sqrt_price_lower_x64: u128,
    sqrt_price_upper_x64: u128,
    liquidity: u128,
) -> Result<u128> {
    full_math::mul_shl_64_div_floor(
        liquidity,
        sqrt_price_upper_x64 - sqrt_price_lower_x64,
        sqrt_price_upper_x64,
        sqrt_price_lower_x64,
    )
}

/// Computes the amount of token_b for a given amount of liquidity and a price range
/// Calculates Δy = ΔL * (√P_upper - √P_lower)
///
/// # Arguments
///
/// * `sqrt_price_lower_x64` - A sqrt price representing the first tick boundary
/// * `sqrt_price_upper_x64` - A sqrt price representing the second tick boundary
/// * `liquidity` - The liquidity being valued
///
pub fn get_amount_b_for_liquidity(
    sqrt_price_lower_x64: u128,
    sqrt_price_upper_x64: u128,
    liquidity: u128,
) -> Result<u128> {
    full_math::mul_shr_64(liquidity, sqrt_price_upper_x64 - sqrt_price_lower_x64)
}

/// Computes the token_a and token_b value for a given amount of liquidity, the current
/// pool price and the prices at the tick boundaries
///
/// Amounts are rounded down, so a position is never valued above what it could withdraw.
///
/// # Arguments
///
/// * `liquidity` - The liquidity being valued
/// * `sqrt_price_lower_x64` - A sqrt price representing the lower tick boundary
/// * `sqrt_price_upper_x64` - A sqrt price representing the upper tick boundary
/// * `sqrt_price_current_x64` - A sqrt price representing the current pool price
///
pub fn liquidity_to_amounts(
    liquidity: u128,
    sqrt_price_lower_x64: u128,
    sqrt_price_upper_x64: u128,
    sqrt_price_current_x64: u128,
) -> Result<AmountResult> {
    if sqrt_price_lower_x64 >= sqrt_price_upper_x64 {
        return Err(ErrorCode::InvalidPriceRange {
            lower: sqrt_price_lower_x64,
            upper: sqrt_price_upper_x64,
        });
    }
    if sqrt_price_lower_x64 == 0 {
        return Err(ErrorCode::InvalidPriceRange {
            lower: sqrt_price_lower_x64,
            upper: sqrt_price_upper_x64,
        });
    }

    let amounts = if sqrt_price_current_x64 <= sqrt_price_lower_x64 {
        // If P ≤ P_lower, active liquidity is entirely in token_a
        AmountResult {
            amount_a: get_amount_a_for_liquidity(
                sqrt_price_lower_x64,
                sqrt_price_upper_x64,
                liquidity,
            )?,
            amount_b: 0,
        }
    } else if sqrt_price_current_x64 < sqrt_price_upper_x64 {
        // If P_lower < P < P_upper, active liquidity is in token_a and token_b
        AmountResult {
            amount_a: get_amount_a_for_liquidity(
                sqrt_price_current_x64,
                sqrt_price_upper_x64,
                liquidity,
            )?,
            amount_b: get_amount_b_for_liquidity(
                sqrt_price_lower_x64,
                sqrt_price_current_x64,
                liquidity,
            )?,
        }
    } else {
        // If P ≥ P_upper, active liquidity is entirely in token_b
        AmountResult {
            amount_a: 0,
            amount_b: get_amount_b_for_liquidity(
                sqrt_price_lower_x64,
                sqrt_price_upper_x64,
                liquidity,
            )?,
        }
    };

    trace!(
        "liquidity {} in [{}, {}] at {} -> a={} b={}",
        liquidity,
        sqrt_price_lower_x64,
        sqrt_price_upper_x64,
        sqrt_price_current_x64,
        amounts.amount_a,
        amounts.amount_b
    );

    Ok(amounts)
}
