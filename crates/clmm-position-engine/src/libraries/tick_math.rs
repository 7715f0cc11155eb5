///! Helper functions to calculate √P from a tick
///!
///! Each program rounds its own ratio table, and on-chain amounts are derived from
///! those exact values, so the table is selected by protocol variant.
///!
///! # Resources
///!
///! * https://medium.com/coinmonks/math-in-solidity-part-5-exponent-and-logarithm-9aef8515136e
///!
use super::big_num::U256;
use super::full_math;
use crate::error::{ErrorCode, Result};
use crate::states::layout::ProtocolVariant;

pub const MIN_TICK: i32 = -443636;
pub const MAX_TICK: i32 = -MIN_TICK;

/// The sqrt price at MIN_TICK as Q64.64, identical for both programs
pub const MIN_SQRT_PRICE_X64: u128 = 4295048016;
/// The sqrt price at MAX_TICK as Q64.64
pub const RAYDIUM_MAX_SQRT_PRICE_X64: u128 = 79226673521066979257578248091;
pub const WHIRLPOOL_MAX_SQRT_PRICE_X64: u128 = 79226673515401279992447579055;

/// Calculates 1.0001^(tick/2) as a Q64.64 number representing
/// the square root of the ratio of the two assets (token_b/token_a)
///
/// Throws if |tick| > MAX_TICK
///
/// # Arguments
/// * `variant` - The program whose rounding is reproduced
/// * `tick` - Price tick
///
pub fn get_sqrt_price_at_tick(variant: ProtocolVariant, tick: i32) -> Result<u128> {
    if tick.unsigned_abs() > MAX_TICK as u32 {
        return Err(ErrorCode::TickOutOfBounds(tick));
    }
    match variant {
        ProtocolVariant::RaydiumClmm => Ok(raydium_sqrt_price(tick)),
        ProtocolVariant::OrcaWhirlpool => whirlpool_sqrt_price(tick),
    }
}

/// Each magic factor is `2^64 / (1.0001^(2^(i - 1)))` for i in `[0, 19)`.
/// Negative ticks are accumulated directly; positive ticks are inverted at the end.
fn raydium_sqrt_price(tick: i32) -> u128 {
    let abs_tick = tick.unsigned_abs();

    // i = 0
    let mut ratio: u128 = if abs_tick & 0x1 != 0 {
        0xfffcb933bd6fb800
    } else {
        // 2^64
        0x10000000000000000
    };
    // i = 1
    if abs_tick & 0x2 != 0 { ratio = (ratio * 0xfff97272373d4000) >> 64 };
    // i = 2
    if abs_tick & 0x4 != 0 { ratio = (ratio * 0xfff2e50f5f657000) >> 64 };
    // i = 3
    if abs_tick & 0x8 != 0 { ratio = (ratio * 0xffe5caca7e10f000) >> 64 };
    // i = 4
    if abs_tick & 0x10 != 0 { ratio = (ratio * 0xffcb9843d60f7000) >> 64 };
    // i = 5
    if abs_tick & 0x20 != 0 { ratio = (ratio * 0xff973b41fa98e800) >> 64 };
    // i = 6
    if abs_tick & 0x40 != 0 { ratio = (ratio * 0xff2ea16466c9b000) >> 64 };
    // i = 7
    if abs_tick & 0x80 != 0 { ratio = (ratio * 0xfe5dee046a9a3800) >> 64 };
    // i = 8
    if abs_tick & 0x100 != 0 { ratio = (ratio * 0xfcbe86c7900bb000) >> 64 };
    // i = 9
    if abs_tick & 0x200 != 0 { ratio = (ratio * 0xf987a7253ac65800) >> 64 };
    // i = 10
    if abs_tick & 0x400 != 0 { ratio = (ratio * 0xf3392b0822bb6000) >> 64 };
    // i = 11
    if abs_tick & 0x800 != 0 { ratio = (ratio * 0xe7159475a2caf000) >> 64 };
    // i = 12
    if abs_tick & 0x1000 != 0 { ratio = (ratio * 0xd097f3bdfd2f2000) >> 64 };
    // i = 13
    if abs_tick & 0x2000 != 0 { ratio = (ratio * 0xa9f746462d9f8000) >> 64 };
    // i = 14
    if abs_tick & 0x4000 != 0 { ratio = (ratio * 0x70d869a156f31c00) >> 64 };
    // i = 15
    if abs_tick & 0x8000 != 0 { ratio = (ratio * 0x31be135f97ed3200) >> 64 };
    // i = 16
    if abs_tick & 0x10000 != 0 { ratio = (ratio * 0x9aa508b5b85a500) >> 64 };
    // i = 17
    if abs_tick & 0x20000 != 0 { ratio = (ratio * 0x5d6af8dedc582c) >> 64 };
    // i = 18
    if abs_tick & 0x40000 != 0 { ratio = (ratio * 0x2216e584f5fa) >> 64 };

    // Divide to obtain 1.0001^(2^(i - 1)) * 2^64 in numerator
    if tick > 0 {
        ratio = u128::MAX / ratio;
    }

    ratio
}

fn mul_shift_96(a: u128, b: u128) -> Result<u128> {
    full_math::u256_to_u128((U256::from(a) * U256::from(b)) >> 96u8)
}

/// Whirlpool multiplies up from 1.0 for positive ticks in Q96.96, then drops
/// 32 bits. Negative ticks use `2^64 / 1.0001^(2^(i - 1))` factors in Q64.64.
fn whirlpool_sqrt_price(tick: i32) -> Result<u128> {
    if tick >= 0 {
        let mut ratio: u128 = if tick & 1 != 0 {
            79232123823359799118286999567
        } else {
            // 2^96
            79228162514264337593543950336
        };
        if tick & 2 != 0 { ratio = mul_shift_96(ratio, 79236085330515764027303304731)? }
        if tick & 4 != 0 { ratio = mul_shift_96(ratio, 79244008939048815603706035061)? }
        if tick & 8 != 0 { ratio = mul_shift_96(ratio, 79259858533276714757314932305)? }
        if tick & 16 != 0 { ratio = mul_shift_96(ratio, 79291567232598584799939703904)? }
        if tick & 32 != 0 { ratio = mul_shift_96(ratio, 79355022692464371645785046466)? }
        if tick & 64 != 0 { ratio = mul_shift_96(ratio, 79482085999252804386437311141)? }
        if tick & 128 != 0 { ratio = mul_shift_96(ratio, 79736823300114093921829183326)? }
        if tick & 256 != 0 { ratio = mul_shift_96(ratio, 80248749790819932309965073892)? }
        if tick & 512 != 0 { ratio = mul_shift_96(ratio, 81282483887344747381513967011)? }
        if tick & 1024 != 0 { ratio = mul_shift_96(ratio, 83390072131320151908154831281)? }
        if tick & 2048 != 0 { ratio = mul_shift_96(ratio, 87770609709833776024991924138)? }
        if tick & 4096 != 0 { ratio = mul_shift_96(ratio, 97234110755111693312479820773)? }
        if tick & 8192 != 0 { ratio = mul_shift_96(ratio, 119332217159966728226237229890)? }
        if tick & 16384 != 0 { ratio = mul_shift_96(ratio, 179736315981702064433883588727)? }
        if tick & 32768 != 0 { ratio = mul_shift_96(ratio, 407748233172238350107850275304)? }
        if tick & 65536 != 0 { ratio = mul_shift_96(ratio, 2098478828474011932436660412517)? }
        if tick & 131072 != 0 { ratio = mul_shift_96(ratio, 55581415166113811149459800483533)? }
        if tick & 262144 != 0 { ratio = mul_shift_96(ratio, 38992368544603139932233054999993551)? }

        Ok(ratio >> 32)
    } else {
        let abs_tick = tick.unsigned_abs();
        let mut ratio: u128 = if abs_tick & 1 != 0 {
            18445821805675392311
        } else {
            // 2^64
            18446744073709551616
        };
        if abs_tick & 2 != 0 { ratio = (ratio * 18444899583751176498) >> 64 }
        if abs_tick & 4 != 0 { ratio = (ratio * 18443055278223354162) >> 64 }
        if abs_tick & 8 != 0 { ratio = (ratio * 18439367220385604838) >> 64 }
        if abs_tick & 16 != 0 { ratio = (ratio * 18431993317065449817) >> 64 }
        if abs_tick & 32 != 0 { ratio = (ratio * 18417254355718160513) >> 64 }
        if abs_tick & 64 != 0 { ratio = (ratio * 18387811781193591352) >> 64 }
        if abs_tick & 128 != 0 { ratio = (ratio * 18329067761203520168) >> 64 }
        if abs_tick & 256 != 0 { ratio = (ratio * 18212142134806087854) >> 64 }
        if abs_tick & 512 != 0 { ratio = (ratio * 17980523815641551639) >> 64 }
        if abs_tick & 1024 != 0 { ratio = (ratio * 17526086738831147013) >> 64 }
        if abs_tick & 2048 != 0 { ratio = (ratio * 16651378430235024244) >> 64 }
        if abs_tick & 4096 != 0 { ratio = (ratio * 15030750278693429944) >> 64 }
        if abs_tick & 8192 != 0 { ratio = (ratio * 12247334978882834399) >> 64 }
        if abs_tick & 16384 != 0 { ratio = (ratio * 8131365268884726200) >> 64 }
        if abs_tick & 32768 != 0 { ratio = (ratio * 3584323654723342297) >> 64 }
        if abs_tick & 65536 != 0 { ratio = (ratio * 696457651847595233) >> 64 }
        if abs_tick & 131072 != 0 { ratio = (ratio * 26294789957452057) >> 64 }
        if abs_tick & 262144 != 0 { ratio = (ratio * 37481735321082) >> 64 }

        Ok(ratio)
    }
}
