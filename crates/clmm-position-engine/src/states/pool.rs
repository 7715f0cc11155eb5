use anchor_lang::prelude::Pubkey;
use log::trace;

use super::account_data::AccountData;
use super::layout::{AccountKind, ProtocolVariant};
use crate::error::{ErrorCode, Result};

/// The pool state
///
/// Holds the subset of a pool account needed to value its positions.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pool {
    /// The program that owns the pool account
    pub variant: ProtocolVariant,

    /// Address of the pool account
    pub address: Pubkey,

    /// Token pair of the pool, where token_mint_a address < token_mint_b address
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,

    /// Decimals of each mint, when the program stores them in the pool.
    /// Otherwise supplied by the caller from the mint accounts.
    pub mint_decimals_a: Option<u8>,
    pub mint_decimals_b: Option<u8>,

    /// The minimum number of ticks between initialized ticks
    pub tick_spacing: u16,

    /// The currently in range liquidity available to the pool.
    /// This value has no relationship to the total liquidity across all ticks.
    pub liquidity: u128,

    /// The current price of the pool as a sqrt(token_b/token_a) Q64.64 value
    pub sqrt_price: u128,

    /// The current tick of the pool, i.e. according to the last tick transition that was run.
    /// Not necessarily a multiple of tick_spacing.
    pub tick_current_index: i32,

    /// The fee growth as a Q64.64 number, i.e. fees of token_a and token_b collected per
    /// unit of liquidity for the entire life of the pool.
    /// These values can overflow u128 and wrap around
    pub fee_growth_global_a: u128,
    pub fee_growth_global_b: u128,
}

impl Pool {
    /// Decodes a pool account
    ///
    /// # Arguments
    ///
    /// * `variant` - The program that produced `data`
    /// * `address` - Address of the pool account
    /// * `data` - The raw account bytes, discriminator included
    ///
    pub fn decode(variant: ProtocolVariant, address: Pubkey, data: &[u8]) -> Result<Pool> {
        let layout = &variant.layout().pool;
        let account = AccountData::new(AccountKind::Pool, data, layout.account_name, layout.len)?;

        let (mint_decimals_a, mint_decimals_b) = match layout.mint_decimals {
            Some((offset_a, offset_b)) => (
                Some(account.read_u8(offset_a)?),
                Some(account.read_u8(offset_b)?),
            ),
            None => (None, None),
        };

        let pool = Pool {
            variant,
            address,
            token_mint_a: account.read_pubkey(layout.token_mint_a)?,
            token_mint_b: account.read_pubkey(layout.token_mint_b)?,
            mint_decimals_a,
            mint_decimals_b,
            tick_spacing: account.read_u16(layout.tick_spacing)?,
            liquidity: account.read_u128(layout.liquidity)?,
            sqrt_price: account.read_u128(layout.sqrt_price)?,
            tick_current_index: account.read_i32(layout.tick_current_index)?,
            fee_growth_global_a: account.read_u128(layout.fee_growth_global_a)?,
            fee_growth_global_b: account.read_u128(layout.fee_growth_global_b)?,
        };

        if pool.tick_spacing == 0 {
            return Err(ErrorCode::malformed(AccountKind::Pool, "tick spacing is zero"));
        }
        if pool.sqrt_price == 0 {
            return Err(ErrorCode::malformed(AccountKind::Pool, "sqrt price is zero"));
        }

        trace!(
            "decoded {:?} pool {}: tick {} sqrt_price {} fee_growth_global ({}, {})",
            variant,
            address,
            pool.tick_current_index,
            pool.sqrt_price,
            pool.fee_growth_global_a,
            pool.fee_growth_global_b
        );

        Ok(pool)
    }
}
