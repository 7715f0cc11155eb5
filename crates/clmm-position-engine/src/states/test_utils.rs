///! Builders for raw account buffers, written through the same layout tables the
///! decoders read from
///

use anchor_lang::prelude::Pubkey;

use super::layout::{account_discriminator, ProtocolVariant, TickInitialized};

fn put(data: &mut [u8], offset: usize, bytes: &[u8]) {
    data[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn account(name: &str, len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    put(&mut data, 0, &account_discriminator(name));
    data
}

#[derive(Copy, Clone, Debug)]
pub struct PoolFixture {
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub mint_decimals_a: u8,
    pub mint_decimals_b: u8,
    pub tick_spacing: u16,
    pub liquidity: u128,
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub fee_growth_global_a: u128,
    pub fee_growth_global_b: u128,
}

impl PoolFixture {
    pub fn sample() -> Self {
        PoolFixture {
            token_mint_a: Pubkey::new_unique(),
            token_mint_b: Pubkey::new_unique(),
            mint_decimals_a: 9,
            mint_decimals_b: 6,
            tick_spacing: 64,
            liquidity: 0x0123_4567_89ab_cdef_0011_2233_4455_6677,
            sqrt_price: 7_000_000_000_000_000_000_000,
            tick_current_index: -28_161,
            fee_growth_global_a: u128::MAX - 0xdead_beef,
            fee_growth_global_b: 0x8000_0000_0000_0000_0000_0000_0000_0001,
        }
    }
}

pub fn pool_bytes(variant: ProtocolVariant, fixture: &PoolFixture) -> Vec<u8> {
    let layout = &variant.layout().pool;
    let mut data = account(layout.account_name, layout.len);
    put(&mut data, layout.token_mint_a, fixture.token_mint_a.as_ref());
    put(&mut data, layout.token_mint_b, fixture.token_mint_b.as_ref());
    if let Some((offset_a, offset_b)) = layout.mint_decimals {
        data[offset_a] = fixture.mint_decimals_a;
        data[offset_b] = fixture.mint_decimals_b;
    }
    put(&mut data, layout.tick_spacing, &fixture.tick_spacing.to_le_bytes());
    put(&mut data, layout.liquidity, &fixture.liquidity.to_le_bytes());
    put(&mut data, layout.sqrt_price, &fixture.sqrt_price.to_le_bytes());
    put(&mut data, layout.tick_current_index, &fixture.tick_current_index.to_le_bytes());
    put(&mut data, layout.fee_growth_global_a, &fixture.fee_growth_global_a.to_le_bytes());
    put(&mut data, layout.fee_growth_global_b, &fixture.fee_growth_global_b.to_le_bytes());
    data
}

#[derive(Copy, Clone, Debug)]
pub struct PositionFixture {
    pub pool: Pubkey,
    pub position_mint: Pubkey,
    pub liquidity: u128,
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
    pub fee_growth_checkpoint_a: u128,
    pub fee_owed_a: u64,
    pub fee_growth_checkpoint_b: u128,
    pub fee_owed_b: u64,
}

impl PositionFixture {
    pub fn sample(pool: Pubkey) -> Self {
        PositionFixture {
            pool,
            position_mint: Pubkey::new_unique(),
            liquidity: 1_234_567_890_123,
            tick_lower_index: -29_440,
            tick_upper_index: -26_880,
            fee_growth_checkpoint_a: 0xffff_0000_ffff_0000_ffff_0000_ffff_0000,
            fee_owed_a: 17,
            fee_growth_checkpoint_b: 0x0000_1111_2222_3333_4444_5555_6666_7777,
            fee_owed_b: u64::MAX - 3,
        }
    }
}

pub fn position_bytes(variant: ProtocolVariant, fixture: &PositionFixture) -> Vec<u8> {
    let layout = &variant.layout().position;
    let mut data = account(layout.account_name, layout.len);
    put(&mut data, layout.pool, fixture.pool.as_ref());
    put(&mut data, layout.position_mint, fixture.position_mint.as_ref());
    put(&mut data, layout.liquidity, &fixture.liquidity.to_le_bytes());
    put(&mut data, layout.tick_lower_index, &fixture.tick_lower_index.to_le_bytes());
    put(&mut data, layout.tick_upper_index, &fixture.tick_upper_index.to_le_bytes());
    put(&mut data, layout.fee_growth_checkpoint_a, &fixture.fee_growth_checkpoint_a.to_le_bytes());
    put(&mut data, layout.fee_owed_a, &fixture.fee_owed_a.to_le_bytes());
    put(&mut data, layout.fee_growth_checkpoint_b, &fixture.fee_growth_checkpoint_b.to_le_bytes());
    put(&mut data, layout.fee_owed_b, &fixture.fee_owed_b.to_le_bytes());
    data
}

/// One initialized tick to be written into a tick array
#[derive(Copy, Clone, Debug)]
pub struct TickFixture {
    pub tick_index: i32,
    pub liquidity_net: i128,
    pub liquidity_gross: u128,
    pub fee_growth_outside_a: u128,
    pub fee_growth_outside_b: u128,
}

pub fn tick_array_bytes(
    variant: ProtocolVariant,
    pool: Pubkey,
    start_tick_index: i32,
    tick_spacing: u16,
    ticks: &[TickFixture],
) -> Vec<u8> {
    let layout = &variant.layout().tick_array;
    let mut data = account(layout.account_name, layout.len);
    put(&mut data, layout.pool, pool.as_ref());
    put(&mut data, layout.start_tick_index, &start_tick_index.to_le_bytes());

    for tick in ticks {
        let slot = ((tick.tick_index - start_tick_index) / tick_spacing as i32) as usize;
        let base = layout.tick_offset(slot);
        if let TickInitialized::Flag(offset) = layout.tick.initialized {
            data[base + offset] = 1;
        }
        if let Some(offset) = layout.tick.tick_index {
            put(&mut data, base + offset, &tick.tick_index.to_le_bytes());
        }
        put(&mut data, base + layout.tick.liquidity_net, &tick.liquidity_net.to_le_bytes());
        put(&mut data, base + layout.tick.liquidity_gross, &tick.liquidity_gross.to_le_bytes());
        put(
            &mut data,
            base + layout.tick.fee_growth_outside_a,
            &tick.fee_growth_outside_a.to_le_bytes(),
        );
        put(
            &mut data,
            base + layout.tick.fee_growth_outside_b,
            &tick.fee_growth_outside_b.to_le_bytes(),
        );
    }
    data
}
