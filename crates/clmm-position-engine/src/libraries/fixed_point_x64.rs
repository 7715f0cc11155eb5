/// A library for handling Q64.64 fixed point numbers
/// Used in full_math.rs, liquidity_amounts.rs and tick_math.rs

pub const Q64: u128 = 0x1_0000_0000_0000_0000; // 2^64
pub const RESOLUTION: u8 = 64;
