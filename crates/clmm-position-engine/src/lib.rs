pub mod amounts;
pub mod error;
pub mod fees;
pub mod libraries;
pub mod states;
pub mod valuation;

use anchor_lang::prelude::Pubkey;
use log::debug;

pub use amounts::{position_amounts, position_status, PositionStatus};
pub use error::{ErrorCode, Result};
pub use fees::{compute_uncollected_fees, compute_uncollected_fees_from_arrays, FeeResult};
pub use libraries::liquidity_amounts::{liquidity_to_amounts, AmountResult};
pub use libraries::tick_math::get_sqrt_price_at_tick;
pub use states::layout::ProtocolVariant;
pub use states::mint::decode_mint_decimals;
pub use states::pool::Pool;
pub use states::position::Position;
pub use states::tick::Tick;
pub use states::tick_array::{get_array_start_index, TickArray};
pub use valuation::{scale_amount, PositionValuation};

/// Decoded accounts of a position together with its fees and holdings
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub pool: Pool,
    pub position: Position,
    pub fees: FeeResult,
    pub amounts: AmountResult,
}

/// Decodes a pool, one of its positions and the tick arrays holding the position's
/// boundaries, then computes uncollected fees and token amounts
///
/// # Arguments
///
/// * `variant` - The program that owns every account
/// * `pool_address`, `pool_data` - The pool account
/// * `position_address`, `position_data` - The position account
/// * `lower_array_address`, `lower_array_data` - The tick array holding the lower tick
/// * `upper_array` - The tick array holding the upper tick, `None` when it is the
/// lower array
///
#[allow(clippy::too_many_arguments)]
pub fn evaluate_position(
    variant: ProtocolVariant,
    pool_address: Pubkey,
    pool_data: &[u8],
    position_address: Pubkey,
    position_data: &[u8],
    lower_array_address: Pubkey,
    lower_array_data: &[u8],
    upper_array: Option<(Pubkey, &[u8])>,
) -> Result<PositionSnapshot> {
    let pool = Pool::decode(variant, pool_address, pool_data)?;
    let position = Position::decode(variant, position_address, position_data)?;
    if position.pool != pool.address {
        return Err(ErrorCode::PoolMismatch {
            expected: pool.address,
            found: position.pool,
        });
    }

    let lower_array = TickArray::decode(variant, lower_array_address, lower_array_data)?;
    let upper_array = match upper_array {
        Some((address, data)) => Some(TickArray::decode(variant, address, data)?),
        None => None,
    };

    let fees = compute_uncollected_fees_from_arrays(
        &pool,
        &position,
        &lower_array,
        upper_array.as_ref().unwrap_or(&lower_array),
    )?;
    let amounts = position_amounts(&pool, &position)?;

    debug!(
        "evaluated {:?} position {} in pool {}",
        variant, position.address, pool.address
    );

    Ok(PositionSnapshot {
        pool,
        position,
        fees,
        amounts,
    })
}
