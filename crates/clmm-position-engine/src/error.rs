use anchor_lang::prelude::Pubkey;
use thiserror::Error;

use crate::states::layout::AccountKind;

pub type Result<T> = std::result::Result<T, ErrorCode>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    // states/*: decode-time failures, permanent for the account

    #[error("Malformed {kind} account: {reason}")]
    MalformedAccount {
        kind: AccountKind,
        reason: &'static str,
    },

    // fees.rs: caller wiring defects

    #[error("Tick mismatch: position boundary is {expected}, supplied tick is {found}")]
    TickMismatch { expected: i32, found: i32 },

    #[error("Tick {tick_index} is not held by the tick array starting at {start_tick_index}")]
    TickArrayMismatch {
        tick_index: i32,
        start_tick_index: i32,
    },

    #[error("Pool mismatch: expected {expected}, account belongs to {found}")]
    PoolMismatch { expected: Pubkey, found: Pubkey },

    // libraries/liquidity_amounts.rs, libraries/tick_math.rs

    #[error("Invalid range: lower tick {lower} must be strictly below upper tick {upper}")]
    InvalidRange { lower: i32, upper: i32 },

    #[error("Invalid price range: lower sqrt price {lower} must be strictly below upper {upper}")]
    InvalidPriceRange { lower: u128, upper: u128 },

    #[error("Tick {0} is outside the supported range")]
    TickOutOfBounds(i32),

    #[error("Math overflow")]
    MathOverflow,
}

impl ErrorCode {
    pub(crate) fn malformed(kind: AccountKind, reason: &'static str) -> Self {
        ErrorCode::MalformedAccount { kind, reason }
    }
}
