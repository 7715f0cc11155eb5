///! Byte layouts of the supported concentrated liquidity programs
///!
///! Every decoder reads its fields through one of these tables, so the fee and amount
///! math is shared between protocols and only the offsets differ.
///!
///! All offsets are absolute, i.e. they include the 8 byte Anchor discriminator.
///
use std::fmt;

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::{hash::hash, pubkey};

/// Seed to derive tick array addresses
pub const TICK_ARRAY_SEED: &str = "tick_array";

/// Seed to derive position addresses from the position NFT mint
pub const POSITION_SEED: &str = "position";

/// Length of an Anchor account discriminator
pub const DISCRIMINATOR_LEN: usize = 8;

pub const WHIRLPOOL_PROGRAM_ID: Pubkey = pubkey!("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");
pub const RAYDIUM_CLMM_PROGRAM_ID: Pubkey = pubkey!("CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK");

/// The kind of record a byte buffer is expected to hold
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Pool,
    Position,
    TickArray,
    Mint,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountKind::Pool => "pool",
            AccountKind::Position => "position",
            AccountKind::TickArray => "tick array",
            AccountKind::Mint => "mint",
        };
        f.write_str(name)
    }
}

/// The concentrated liquidity program that produced a set of account bytes
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProtocolVariant {
    /// Orca Whirlpools
    OrcaWhirlpool,
    /// Raydium concentrated liquidity (a fork of Cykura)
    RaydiumClmm,
}

impl ProtocolVariant {
    pub fn program_id(self) -> Pubkey {
        match self {
            ProtocolVariant::OrcaWhirlpool => WHIRLPOOL_PROGRAM_ID,
            ProtocolVariant::RaydiumClmm => RAYDIUM_CLMM_PROGRAM_ID,
        }
    }

    pub fn layout(self) -> &'static AccountLayout {
        match self {
            ProtocolVariant::OrcaWhirlpool => &WHIRLPOOL_LAYOUT,
            ProtocolVariant::RaydiumClmm => &RAYDIUM_CLMM_LAYOUT,
        }
    }

    /// Returns the variant owning `program_id`, if any
    pub fn from_program_id(program_id: &Pubkey) -> Option<Self> {
        [ProtocolVariant::OrcaWhirlpool, ProtocolVariant::RaydiumClmm]
            .into_iter()
            .find(|variant| variant.program_id() == *program_id)
    }
}

/// Anchor account discriminator, `sha256("account:<name>")[..8]`
pub fn account_discriminator(account_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let preimage = format!("account:{}", account_name);
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..DISCRIMINATOR_LEN]);
    discriminator
}

/// Field offsets of a pool account
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PoolLayout {
    pub account_name: &'static str,
    pub len: usize,
    pub tick_spacing: usize,
    pub liquidity: usize,
    pub sqrt_price: usize,
    pub tick_current_index: usize,
    pub token_mint_a: usize,
    pub token_mint_b: usize,
    pub fee_growth_global_a: usize,
    pub fee_growth_global_b: usize,
    /// Offsets of the mint decimals, for programs that store them in the pool
    pub mint_decimals: Option<(usize, usize)>,
}

/// Field offsets of a position account
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PositionLayout {
    pub account_name: &'static str,
    pub len: usize,
    pub pool: usize,
    pub position_mint: usize,
    pub liquidity: usize,
    pub tick_lower_index: usize,
    pub tick_upper_index: usize,
    pub fee_growth_checkpoint_a: usize,
    pub fee_owed_a: usize,
    pub fee_growth_checkpoint_b: usize,
    pub fee_owed_b: usize,
}

/// How a program marks a tick as initialized
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickInitialized {
    /// A boolean byte at the given offset within the tick record
    Flag(usize),
    /// The tick is initialized whenever its gross liquidity is non zero
    NonZeroLiquidityGross,
}

/// Field offsets of a single tick, relative to the start of the tick record
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickLayout {
    pub initialized: TickInitialized,
    /// Offset of the stored tick index, for programs that store it
    pub tick_index: Option<usize>,
    pub liquidity_net: usize,
    pub liquidity_gross: usize,
    pub fee_growth_outside_a: usize,
    pub fee_growth_outside_b: usize,
}

/// How the start tick index is encoded in a tick array address seed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartIndexSeed {
    /// Decimal string, e.g. `b"-5632"`
    DecimalString,
    /// Big endian i32 bytes
    BigEndian,
}

/// Field offsets of a tick array account
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickArrayLayout {
    pub account_name: &'static str,
    pub len: usize,
    pub pool: usize,
    pub start_tick_index: usize,
    pub ticks: usize,
    pub tick_stride: usize,
    pub tick_count: usize,
    pub tick: TickLayout,
    pub start_index_seed: StartIndexSeed,
}

impl TickArrayLayout {
    /// Absolute offset of the tick record in `slot`
    pub fn tick_offset(&self, slot: usize) -> usize {
        self.ticks + slot * self.tick_stride
    }
}

/// The offset tables for one protocol variant
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AccountLayout {
    pub pool: PoolLayout,
    pub position: PositionLayout,
    pub tick_array: TickArrayLayout,
}

pub const WHIRLPOOL_LAYOUT: AccountLayout = AccountLayout {
    pool: PoolLayout {
        account_name: "Whirlpool",
        len: 653,
        tick_spacing: 41,
        liquidity: 49,
        sqrt_price: 65,
        tick_current_index: 81,
        token_mint_a: 101,
        fee_growth_global_a: 165,
        token_mint_b: 181,
        fee_growth_global_b: 245,
        mint_decimals: None,
    },
    position: PositionLayout {
        account_name: "Position",
        len: 216,
        pool: 8,
        position_mint: 40,
        liquidity: 72,
        tick_lower_index: 88,
        tick_upper_index: 92,
        fee_growth_checkpoint_a: 96,
        fee_owed_a: 112,
        fee_growth_checkpoint_b: 120,
        fee_owed_b: 136,
    },
    tick_array: TickArrayLayout {
        account_name: "TickArray",
        len: 9988,
        start_tick_index: 8,
        ticks: 12,
        tick_stride: 113,
        tick_count: 88,
        pool: 9956,
        tick: TickLayout {
            initialized: TickInitialized::Flag(0),
            tick_index: None,
            liquidity_net: 1,
            liquidity_gross: 17,
            fee_growth_outside_a: 33,
            fee_growth_outside_b: 49,
        },
        start_index_seed: StartIndexSeed::DecimalString,
    },
};

pub const RAYDIUM_CLMM_LAYOUT: AccountLayout = AccountLayout {
    pool: PoolLayout {
        account_name: "PoolState",
        len: 1544,
        token_mint_a: 73,
        token_mint_b: 105,
        mint_decimals: Some((233, 234)),
        tick_spacing: 235,
        liquidity: 237,
        sqrt_price: 253,
        tick_current_index: 269,
        fee_growth_global_a: 277,
        fee_growth_global_b: 293,
    },
    position: PositionLayout {
        account_name: "PersonalPositionState",
        len: 281,
        position_mint: 9,
        pool: 41,
        tick_lower_index: 73,
        tick_upper_index: 77,
        liquidity: 81,
        fee_growth_checkpoint_a: 97,
        fee_growth_checkpoint_b: 113,
        fee_owed_a: 129,
        fee_owed_b: 137,
    },
    tick_array: TickArrayLayout {
        account_name: "TickArrayState",
        len: 10240,
        pool: 8,
        start_tick_index: 40,
        ticks: 44,
        tick_stride: 168,
        tick_count: 60,
        tick: TickLayout {
            initialized: TickInitialized::NonZeroLiquidityGross,
            tick_index: Some(0),
            liquidity_net: 4,
            liquidity_gross: 20,
            fee_growth_outside_a: 36,
            fee_growth_outside_b: 52,
        },
        start_index_seed: StartIndexSeed::BigEndian,
    },
};
