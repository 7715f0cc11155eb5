///! Uncollected fees of a position
///!
///! Replays the on-chain fee accounting: fee growth inside the position's range, minus
///! the position's checkpoint, times its liquidity, plus what is already owed.
///
use log::debug;

use crate::error::{ErrorCode, Result};
use crate::states::pool::Pool;
use crate::states::position::Position;
use crate::states::tick::Tick;
use crate::states::tick_array::TickArray;

/// Fees a position could collect right now, in raw token units
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeResult {
    pub uncollected_a: u128,
    pub uncollected_b: u128,
}

/// Computes the fees owed to a position, including those not yet credited on-chain
///
/// # Arguments
///
/// * `pool` - The pool the position belongs to
/// * `position` - The position being valued
/// * `tick_lower` - The tick at `position.tick_lower_index`
/// * `tick_upper` - The tick at `position.tick_upper_index`
///
pub fn compute_uncollected_fees(
    pool: &Pool,
    position: &Position,
    tick_lower: &Tick,
    tick_upper: &Tick,
) -> Result<FeeResult> {
    if position.pool != pool.address {
        return Err(ErrorCode::PoolMismatch {
            expected: pool.address,
            found: position.pool,
        });
    }
    if tick_lower.tick_index != position.tick_lower_index {
        return Err(ErrorCode::TickMismatch {
            expected: position.tick_lower_index,
            found: tick_lower.tick_index,
        });
    }
    if tick_upper.tick_index != position.tick_upper_index {
        return Err(ErrorCode::TickMismatch {
            expected: position.tick_upper_index,
            found: tick_upper.tick_index,
        });
    }

    let (fee_growth_inside_a, fee_growth_inside_b) = Tick::get_fee_growth_inside(
        tick_lower,
        tick_upper,
        pool.tick_current_index,
        pool.fee_growth_global_a,
        pool.fee_growth_global_b,
    );
    let (accrued_a, accrued_b) = position.fees_accrued(fee_growth_inside_a, fee_growth_inside_b)?;

    let fees = FeeResult {
        uncollected_a: (position.fee_owed_a as u128)
            .checked_add(accrued_a)
            .ok_or(ErrorCode::MathOverflow)?,
        uncollected_b: (position.fee_owed_b as u128)
            .checked_add(accrued_b)
            .ok_or(ErrorCode::MathOverflow)?,
    };

    debug!(
        "position {}: fee growth inside ({}, {}), accrued ({}, {}), uncollected ({}, {})",
        position.address,
        fee_growth_inside_a,
        fee_growth_inside_b,
        accrued_a,
        accrued_b,
        fees.uncollected_a,
        fees.uncollected_b
    );

    Ok(fees)
}

/// Looks up both boundary ticks in their tick arrays, then computes uncollected fees
///
/// The same array may be passed twice when both ticks live in one segment.
///
/// # Arguments
///
/// * `pool` - The pool the position belongs to
/// * `position` - The position being valued
/// * `lower_array` - The tick array holding `position.tick_lower_index`
/// * `upper_array` - The tick array holding `position.tick_upper_index`
///
pub fn compute_uncollected_fees_from_arrays(
    pool: &Pool,
    position: &Position,
    lower_array: &TickArray,
    upper_array: &TickArray,
) -> Result<FeeResult> {
    for array in [lower_array, upper_array] {
        if array.pool != pool.address {
            return Err(ErrorCode::PoolMismatch {
                expected: pool.address,
                found: array.pool,
            });
        }
    }

    let tick_lower = lower_array.get_tick(position.tick_lower_index, pool.tick_spacing)?;
    let tick_upper = upper_array.get_tick(position.tick_upper_index, pool.tick_spacing)?;

    compute_uncollected_fees(pool, position, &tick_lower, &tick_upper)
}
