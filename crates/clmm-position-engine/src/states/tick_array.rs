///! Tick array segments
///!
///! Ticks are stored in fixed size arrays of consecutive, `tick_spacing` apart slots.
///! An array is keyed by the index of its first slot, `start_tick_index`, which is
///! always a multiple of `tick_spacing * tick_count`.
///
use anchor_lang::prelude::Pubkey;
use log::debug;

use super::account_data::AccountData;
use super::layout::{
    AccountKind, ProtocolVariant, StartIndexSeed, TickInitialized, TICK_ARRAY_SEED,
};
use super::tick::Tick;
use crate::error::{ErrorCode, Result};

/// One decoded slot. The tick index is only known once the pool's tick spacing is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct TickSlot {
    stored_tick_index: Option<i32>,
    initialized: bool,
    liquidity_net: i128,
    liquidity_gross: u128,
    fee_growth_outside_a: u128,
    fee_growth_outside_b: u128,
}

/// A decoded tick array account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickArray {
    pub variant: ProtocolVariant,
    pub address: Pubkey,
    pub pool: Pubkey,
    pub start_tick_index: i32,
    slots: Vec<TickSlot>,
}

impl TickArray {
    /// Decodes a tick array account, including every tick slot
    ///
    /// # Arguments
    ///
    /// * `variant` - The program that produced `data`
    /// * `address` - Address of the tick array account
    /// * `data` - The raw account bytes, discriminator included
    ///
    pub fn decode(variant: ProtocolVariant, address: Pubkey, data: &[u8]) -> Result<TickArray> {
        let layout = &variant.layout().tick_array;
        let account =
            AccountData::new(AccountKind::TickArray, data, layout.account_name, layout.len)?;

        let pool = account.read_pubkey(layout.pool)?;
        let start_tick_index = account.read_i32(layout.start_tick_index)?;

        let mut slots = Vec::with_capacity(layout.tick_count);
        for slot in 0..layout.tick_count {
            let base = layout.tick_offset(slot);
            let tick = &layout.tick;

            let liquidity_gross = account.read_u128(base + tick.liquidity_gross)?;
            let initialized = match tick.initialized {
                TickInitialized::Flag(offset) => account.read_bool(base + offset)?,
                TickInitialized::NonZeroLiquidityGross => liquidity_gross != 0,
            };
            let stored_tick_index = match tick.tick_index {
                Some(offset) => Some(account.read_i32(base + offset)?),
                None => None,
            };

            slots.push(TickSlot {
                stored_tick_index,
                initialized,
                liquidity_net: account.read_i128(base + tick.liquidity_net)?,
                liquidity_gross,
                fee_growth_outside_a: account.read_u128(base + tick.fee_growth_outside_a)?,
                fee_growth_outside_b: account.read_u128(base + tick.fee_growth_outside_b)?,
            });
        }

        Ok(TickArray {
            variant,
            address,
            pool,
            start_tick_index,
            slots,
        })
    }

    /// Number of tick slots in the array
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the tick at `tick_index`
    ///
    /// A slot that is not initialized yields `Tick::uninitialized`, whose outside fee
    /// growth is zero. Fails if the tick is not aligned to `tick_spacing` or lies
    /// outside this array.
    ///
    /// # Arguments
    ///
    /// * `tick_index` - The tick to look up
    /// * `tick_spacing` - The tick spacing of the pool owning the array
    ///
    pub fn get_tick(&self, tick_index: i32, tick_spacing: u16) -> Result<Tick> {
        let slot = self.slot_of(tick_index, tick_spacing)?;
        let tick = self.slots[slot];

        if !tick.initialized {
            debug!(
                "tick {} in array {} is not initialized, using zero outside fee growth",
                tick_index, self.address
            );
            return Ok(Tick::uninitialized(tick_index));
        }

        if let Some(stored_tick_index) = tick.stored_tick_index {
            if stored_tick_index != tick_index {
                return Err(ErrorCode::malformed(
                    AccountKind::TickArray,
                    "stored tick index does not match its slot",
                ));
            }
        }

        Ok(Tick {
            tick_index,
            initialized: true,
            liquidity_net: tick.liquidity_net,
            liquidity_gross: tick.liquidity_gross,
            fee_growth_outside_a: tick.fee_growth_outside_a,
            fee_growth_outside_b: tick.fee_growth_outside_b,
        })
    }

    fn slot_of(&self, tick_index: i32, tick_spacing: u16) -> Result<usize> {
        let mismatch = ErrorCode::TickArrayMismatch {
            tick_index,
            start_tick_index: self.start_tick_index,
        };
        if tick_spacing == 0 {
            return Err(mismatch);
        }
        let offset = tick_index as i64 - self.start_tick_index as i64;
        let spacing = tick_spacing as i64;
        if offset < 0 || offset % spacing != 0 {
            return Err(mismatch);
        }
        let slot = (offset / spacing) as usize;
        if slot >= self.slots.len() {
            return Err(mismatch);
        }
        Ok(slot)
    }

    /// Derives the address of the tick array starting at `start_tick_index`
    ///
    /// # Arguments
    ///
    /// * `variant` - The program owning the pool
    /// * `pool` - The pool the array belongs to
    /// * `start_tick_index` - Index of the first tick in the array
    ///
    pub fn derive_address(variant: ProtocolVariant, pool: &Pubkey, start_tick_index: i32) -> Pubkey {
        let start_seed = match variant.layout().tick_array.start_index_seed {
            StartIndexSeed::DecimalString => start_tick_index.to_string().into_bytes(),
            StartIndexSeed::BigEndian => start_tick_index.to_be_bytes().to_vec(),
        };
        let (address, _bump) = Pubkey::find_program_address(
            &[TICK_ARRAY_SEED.as_bytes(), pool.as_ref(), &start_seed],
            &variant.program_id(),
        );
        address
    }
}

/// Returns the start index of the tick array holding `tick_index`
///
/// Rounds towards negative infinity, so negative ticks land in the array below zero.
///
/// # Arguments
///
/// * `variant` - The program owning the pool, selects the number of ticks per array
/// * `tick_index` - Any tick, not necessarily a multiple of `tick_spacing`
/// * `tick_spacing` - The tick spacing of the pool, a zero spacing fails with `MathOverflow`
///
pub fn get_array_start_index(
    variant: ProtocolVariant,
    tick_index: i32,
    tick_spacing: u16,
) -> Result<i32> {
    let ticks_in_array = variant.layout().tick_array.tick_count as i32 * tick_spacing as i32;
    tick_index
        .checked_div_euclid(ticks_in_array)
        .and_then(|array_index| array_index.checked_mul(ticks_in_array))
        .ok_or(ErrorCode::MathOverflow)
}
