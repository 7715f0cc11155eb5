use spl_token::solana_program::program_pack::Pack;
use spl_token::state::Mint;

use super::layout::AccountKind;
use crate::error::{ErrorCode, Result};

/// Reads the decimals of an SPL Token mint account
///
/// Token-2022 mints share the base layout in their first `Mint::LEN` bytes; any
/// extension data after it is ignored.
///
/// # Arguments
///
/// * `data` - The raw mint account bytes
///
pub fn decode_mint_decimals(data: &[u8]) -> Result<u8> {
    let base = data
        .get(..Mint::LEN)
        .ok_or_else(|| ErrorCode::malformed(AccountKind::Mint, "buffer shorter than a mint"))?;
    let mint = Mint::unpack_unchecked(base)
        .map_err(|_| ErrorCode::malformed(AccountKind::Mint, "invalid mint encoding"))?;
    if !mint.is_initialized {
        return Err(ErrorCode::malformed(AccountKind::Mint, "mint is not initialized"));
    }
    Ok(mint.decimals)
}
