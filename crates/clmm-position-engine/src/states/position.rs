/// Owed tokens, checkpointed fee growth and liquidity of a position
use anchor_lang::prelude::Pubkey;
use log::trace;

use super::account_data::AccountData;
use super::layout::{AccountKind, ProtocolVariant, POSITION_SEED};
use crate::error::{ErrorCode, Result};
use crate::libraries::full_math;

/// addr: [POSITION_SEED, position_mint]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub variant: ProtocolVariant,
    pub address: Pubkey,
    pub pool: Pubkey,
    pub position_mint: Pubkey,
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,

    // Virtual liquidity in the position the last time it was touched
    pub liquidity: u128,
    pub fee_growth_checkpoint_a: u128,
    pub fee_growth_checkpoint_b: u128,
    pub fee_owed_a: u64,
    pub fee_owed_b: u64,
}

impl Position {
    /// Decodes a position account
    ///
    /// # Arguments
    ///
    /// * `variant` - The program that produced `data`
    /// * `address` - Address of the position account
    /// * `data` - The raw account bytes, discriminator included
    ///
    pub fn decode(variant: ProtocolVariant, address: Pubkey, data: &[u8]) -> Result<Position> {
        let layout = &variant.layout().position;
        let account =
            AccountData::new(AccountKind::Position, data, layout.account_name, layout.len)?;

        let position = Position {
            variant,
            address,
            pool: account.read_pubkey(layout.pool)?,
            position_mint: account.read_pubkey(layout.position_mint)?,
            tick_lower_index: account.read_i32(layout.tick_lower_index)?,
            tick_upper_index: account.read_i32(layout.tick_upper_index)?,
            liquidity: account.read_u128(layout.liquidity)?,
            fee_growth_checkpoint_a: account.read_u128(layout.fee_growth_checkpoint_a)?,
            fee_growth_checkpoint_b: account.read_u128(layout.fee_growth_checkpoint_b)?,
            fee_owed_a: account.read_u64(layout.fee_owed_a)?,
            fee_owed_b: account.read_u64(layout.fee_owed_b)?,
        };

        if position.tick_lower_index >= position.tick_upper_index {
            return Err(ErrorCode::malformed(
                AccountKind::Position,
                "lower tick is not below the upper tick",
            ));
        }

        trace!(
            "decoded {:?} position {}: [{}, {}] liquidity {}",
            variant,
            address,
            position.tick_lower_index,
            position.tick_upper_index,
            position.liquidity
        );

        Ok(position)
    }

    /// Fees earned since the last checkpoint, not yet credited to `fee_owed_*`
    ///
    /// Calculates `(fee_growth_inside - checkpoint) * liquidity >> 64` per token. The
    /// growth delta wraps modulo 2^128, the product is taken in 256 bits.
    ///
    /// # Arguments
    ///
    /// * `fee_growth_inside_a` - The all-time fee growth in token_a, per unit of liquidity,
    /// inside the position's tick boundaries
    /// * `fee_growth_inside_b` - The all-time fee growth in token_b, per unit of liquidity,
    /// inside the position's tick boundaries
    ///
    pub fn fees_accrued(
        &self,
        fee_growth_inside_a: u128,
        fee_growth_inside_b: u128,
    ) -> Result<(u128, u128)> {
        if self.liquidity == 0 {
            return Ok((0, 0));
        }

        let fee_growth_delta_a = fee_growth_inside_a.wrapping_sub(self.fee_growth_checkpoint_a);
        let fee_growth_delta_b = fee_growth_inside_b.wrapping_sub(self.fee_growth_checkpoint_b);

        Ok((
            full_math::mul_shr_64(fee_growth_delta_a, self.liquidity)?,
            full_math::mul_shr_64(fee_growth_delta_b, self.liquidity)?,
        ))
    }

    /// Derives the address of the position owned by `position_mint`
    pub fn derive_address(variant: ProtocolVariant, position_mint: &Pubkey) -> Pubkey {
        let (address, _bump) = Pubkey::find_program_address(
            &[POSITION_SEED.as_bytes(), position_mint.as_ref()],
            &variant.program_id(),
        );
        address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libraries::fixed_point_x64::Q64;
    use crate::states::layout::account_discriminator;
    use crate::states::test_utils::{position_bytes, PositionFixture};

    fn position(liquidity: u128, checkpoint_a: u128, checkpoint_b: u128) -> Position {
        Position {
            variant: ProtocolVariant::OrcaWhirlpool,
            address: Pubkey::new_unique(),
            pool: Pubkey::new_unique(),
            position_mint: Pubkey::new_unique(),
            tick_lower_index: -100,
            tick_upper_index: 100,
            liquidity,
            fee_growth_checkpoint_a: checkpoint_a,
            fee_growth_checkpoint_b: checkpoint_b,
            fee_owed_a: 0,
            fee_owed_b: 0,
        }
    }

    #[test]
    fn decodes_every_field() {
        for variant in [ProtocolVariant::OrcaWhirlpool, ProtocolVariant::RaydiumClmm] {
            let fixture = PositionFixture::sample(Pubkey::new_unique());
            let data = position_bytes(variant, &fixture);
            let address = Pubkey::new_unique();

            let position = Position::decode(variant, address, &data).unwrap();
            assert_eq!(
                position,
                Position {
                    variant,
                    address,
                    pool: fixture.pool,
                    position_mint: fixture.position_mint,
                    tick_lower_index: fixture.tick_lower_index,
                    tick_upper_index: fixture.tick_upper_index,
                    liquidity: fixture.liquidity,
                    fee_growth_checkpoint_a: fixture.fee_growth_checkpoint_a,
                    fee_growth_checkpoint_b: fixture.fee_growth_checkpoint_b,
                    fee_owed_a: fixture.fee_owed_a,
                    fee_owed_b: fixture.fee_owed_b,
                }
            );
        }
    }

    #[test]
    fn inverted_range_is_malformed() {
        let fixture = PositionFixture {
            tick_lower_index: 64,
            tick_upper_index: 64,
            ..PositionFixture::sample(Pubkey::new_unique())
        };
        let data = position_bytes(ProtocolVariant::RaydiumClmm, &fixture);
        assert_eq!(
            Position::decode(ProtocolVariant::RaydiumClmm, Pubkey::new_unique(), &data),
            Err(ErrorCode::malformed(
                AccountKind::Position,
                "lower tick is not below the upper tick"
            ))
        );
    }

    #[test]
    fn pool_account_is_not_a_position() {
        let data = position_bytes(
            ProtocolVariant::OrcaWhirlpool,
            &PositionFixture::sample(Pubkey::new_unique()),
        );
        let result = Position::decode(ProtocolVariant::RaydiumClmm, Pubkey::new_unique(), &data);
        assert!(matches!(
            result,
            Err(ErrorCode::MalformedAccount {
                kind: AccountKind::Position,
                ..
            })
        ));
    }

    #[test]
    fn fees_accrued_since_checkpoint() {
        let position = position(3, 100 * Q64, 0);
        assert_eq!(
            position.fees_accrued(110 * Q64, Q64 / 2).unwrap(),
            (30, 1)
        );
    }

    #[test]
    fn fees_accrued_across_wraparound() {
        // the inside growth wrapped past 2^128 since the checkpoint
        let position = position(1 << 64, u128::MAX - 4, 0);
        assert_eq!(position.fees_accrued(5, 0).unwrap(), (10, 0));
    }

    #[test]
    fn zero_liquidity_accrues_nothing() {
        let position = position(0, 0, 0);
        assert_eq!(position.fees_accrued(u128::MAX, u128::MAX).unwrap(), (0, 0));
    }

    #[test]
    fn derived_address_is_program_specific() {
        let mint = Pubkey::new_unique();
        assert_ne!(
            Position::derive_address(ProtocolVariant::OrcaWhirlpool, &mint),
            Position::derive_address(ProtocolVariant::RaydiumClmm, &mint)
        );
    }

    #[test]
    fn whirlpool_fields_sit_at_their_on_chain_offsets() {
        let pool = Pubkey::new_from_array([0x11; 32]);
        let mint = Pubkey::new_from_array([0x22; 32]);
        let mut data = vec![0u8; 216];
        data[..8].copy_from_slice(&account_discriminator("Position"));
        data[8..40].copy_from_slice(&pool.to_bytes());
        data[40..72].copy_from_slice(&mint.to_bytes());
        data[72..88].copy_from_slice(&5_000_000u128.to_le_bytes());
        data[88..92].copy_from_slice(&(-128i32).to_le_bytes());
        data[92..96].copy_from_slice(&256i32.to_le_bytes());
        data[96..112].copy_from_slice(&(u128::MAX - 1).to_le_bytes());
        data[112..120].copy_from_slice(&77u64.to_le_bytes());
        data[120..136].copy_from_slice(&(Q64 + 3).to_le_bytes());
        data[136..144].copy_from_slice(&88u64.to_le_bytes());

        let position =
            Position::decode(ProtocolVariant::OrcaWhirlpool, Pubkey::new_unique(), &data).unwrap();
        assert_eq!(position.pool, pool);
        assert_eq!(position.position_mint, mint);
        assert_eq!(position.liquidity, 5_000_000);
        assert_eq!(position.tick_lower_index, -128);
        assert_eq!(position.tick_upper_index, 256);
        assert_eq!(position.fee_growth_checkpoint_a, u128::MAX - 1);
        assert_eq!(position.fee_owed_a, 77);
        assert_eq!(position.fee_growth_checkpoint_b, Q64 + 3);
        assert_eq!(position.fee_owed_b, 88);
    }

    #[test]
    fn raydium_fields_sit_at_their_on_chain_offsets() {
        let pool = Pubkey::new_from_array([0x11; 32]);
        let mint = Pubkey::new_from_array([0x22; 32]);
        let mut data = vec![0u8; 281];
        data[..8].copy_from_slice(&account_discriminator("PersonalPositionState"));
        data[9..41].copy_from_slice(&mint.to_bytes());
        data[41..73].copy_from_slice(&pool.to_bytes());
        data[73..77].copy_from_slice(&(-120i32).to_le_bytes());
        data[77..81].copy_from_slice(&250i32.to_le_bytes());
        data[81..97].copy_from_slice(&5_000_000u128.to_le_bytes());
        data[97..113].copy_from_slice(&(u128::MAX - 1).to_le_bytes());
        data[113..129].copy_from_slice(&(Q64 + 3).to_le_bytes());
        data[129..137].copy_from_slice(&77u64.to_le_bytes());
        data[137..145].copy_from_slice(&88u64.to_le_bytes());

        let position =
            Position::decode(ProtocolVariant::RaydiumClmm, Pubkey::new_unique(), &data).unwrap();
        assert_eq!(position.position_mint, mint);
        assert_eq!(position.pool, pool);
        assert_eq!(position.tick_lower_index, -120);
        assert_eq!(position.tick_upper_index, 250);
        assert_eq!(position.liquidity, 5_000_000);
        assert_eq!(position.fee_growth_checkpoint_a, u128::MAX - 1);
        assert_eq!(position.fee_growth_checkpoint_b, Q64 + 3);
        assert_eq!(position.fee_owed_a, 77);
        assert_eq!(position.fee_owed_b, 88);
    }
}
