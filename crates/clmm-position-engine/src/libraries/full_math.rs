///! Wide multiplication helpers for Q64.64 values
///!
///! Products are taken in U256 or U512 and only narrowed back to u128 once the
///! final shift or division has been applied. Narrowing never truncates silently.
///
use super::big_num::{U256, U512};
use super::fixed_point_x64;
use crate::error::{ErrorCode, Result};

/// Narrows a U256 to u128, failing if the high half is not zero
pub fn u256_to_u128(x: U256) -> Result<u128> {
    if x.bits() > 128 {
        return Err(ErrorCode::MathOverflow);
    }
    Ok(x.low_u128())
}

/// Narrows a U512 to u128, failing if anything above bit 128 is set
pub fn u512_to_u128(x: U512) -> Result<u128> {
    if x.bits() > 128 {
        return Err(ErrorCode::MathOverflow);
    }
    Ok(x.low_u128())
}

/// Calculates `(a * b) >> 64`, rounding down
///
/// This converts a Q64.64 per-unit quantity multiplied by an integer back to integer units.
/// The product is formed in 256 bits so it cannot overflow before the shift.
///
/// # Arguments
///
/// * `a` - The first factor
/// * `b` - The second factor
///
pub fn mul_shr_64(a: u128, b: u128) -> Result<u128> {
    let product = U256::from(a) * U256::from(b);
    u256_to_u128(product >> fixed_point_x64::RESOLUTION)
}

/// Calculates `floor((a << 64) * b / (c * d))`
///
/// The numerator can reach 2^320, so the whole expression is evaluated in 512 bits
/// and floored once.
///
/// # Arguments
///
/// * `a` - Value shifted left by 64 bits
/// * `b` - Second numerator factor
/// * `c` - First denominator factor, must be greater than 0
/// * `d` - Second denominator factor, must be greater than 0
///
pub fn mul_shl_64_div_floor(a: u128, b: u128, c: u128, d: u128) -> Result<u128> {
    if c == 0 || d == 0 {
        return Err(ErrorCode::MathOverflow);
    }
    let numerator = (U512::from(a) << fixed_point_x64::RESOLUTION) * U512::from(b);
    let denominator = U512::from(c) * U512::from(d);
    u512_to_u128(numerator / denominator)
}
