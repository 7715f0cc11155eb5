///! Bounds checked little endian reads at absolute offsets of an account buffer
///
use anchor_lang::prelude::Pubkey;

use super::layout::{account_discriminator, AccountKind, DISCRIMINATOR_LEN};
use crate::error::{ErrorCode, Result};

/// A borrowed account buffer whose discriminator and length have been checked
pub struct AccountData<'a> {
    kind: AccountKind,
    data: &'a [u8],
}

impl<'a> AccountData<'a> {
    /// Validates the discriminator of `account_name` and the minimum length
    ///
    /// # Arguments
    ///
    /// * `kind` - The record kind, used for error reporting
    /// * `data` - The raw account bytes
    /// * `account_name` - The Anchor account name the discriminator is derived from
    /// * `len` - The documented account length
    ///
    pub fn new(
        kind: AccountKind,
        data: &'a [u8],
        account_name: &str,
        len: usize,
    ) -> Result<Self> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(ErrorCode::malformed(kind, "buffer shorter than its discriminator"));
        }
        if data[..DISCRIMINATOR_LEN] != account_discriminator(account_name) {
            return Err(ErrorCode::malformed(kind, "unexpected account discriminator"));
        }
        if data.len() < len {
            return Err(ErrorCode::malformed(kind, "buffer shorter than the account layout"));
        }
        Ok(AccountData { kind, data })
    }

    fn bytes<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        offset
            .checked_add(N)
            .and_then(|end| self.data.get(offset..end))
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| ErrorCode::malformed(self.kind, "field out of bounds"))
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.bytes::<1>(offset)?[0])
    }

    pub fn read_bool(&self, offset: usize) -> Result<bool> {
        match self.read_u8(offset)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(ErrorCode::malformed(self.kind, "invalid boolean byte")),
        }
    }

    pub fn read_u16(&self, offset: usize) -> Result<u16> {
        Ok(u16::from_le_bytes(self.bytes(offset)?))
    }

    pub fn read_i32(&self, offset: usize) -> Result<i32> {
        Ok(i32::from_le_bytes(self.bytes(offset)?))
    }

    pub fn read_u64(&self, offset: usize) -> Result<u64> {
        Ok(u64::from_le_bytes(self.bytes(offset)?))
    }

    pub fn read_u128(&self, offset: usize) -> Result<u128> {
        Ok(u128::from_le_bytes(self.bytes(offset)?))
    }

    pub fn read_i128(&self, offset: usize) -> Result<i128> {
        Ok(i128::from_le_bytes(self.bytes(offset)?))
    }

    /// Reads a 32 byte key, rejecting the all zero default key
    pub fn read_pubkey(&self, offset: usize) -> Result<Pubkey> {
        let key = Pubkey::new_from_array(self.bytes(offset)?);
        if key == Pubkey::default() {
            return Err(ErrorCode::malformed(self.kind, "embedded key is the default key"));
        }
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(name: &str, len: usize) -> Vec<u8> {
        let mut data = vec![0u8; len];
        data[..DISCRIMINATOR_LEN].copy_from_slice(&account_discriminator(name));
        data
    }

    #[test]
    fn rejects_wrong_discriminator() {
        let data = buffer("Position", 64);
        let result = AccountData::new(AccountKind::Pool, &data, "Whirlpool", 64);
        assert_eq!(
            result.err(),
            Some(ErrorCode::malformed(AccountKind::Pool, "unexpected account discriminator"))
        );
    }

    #[test]
    fn rejects_truncated_buffer() {
        let data = buffer("Whirlpool", 100);
        let result = AccountData::new(AccountKind::Pool, &data, "Whirlpool", 653);
        assert_eq!(
            result.err(),
            Some(ErrorCode::malformed(AccountKind::Pool, "buffer shorter than the account layout"))
        );

        let result = AccountData::new(AccountKind::Pool, &data[..4], "Whirlpool", 653);
        assert_eq!(
            result.err(),
            Some(ErrorCode::malformed(AccountKind::Pool, "buffer shorter than its discriminator"))
        );
    }

    #[test]
    fn reads_little_endian_fields() {
        let mut data = buffer("TickArray", 64);
        data[8..12].copy_from_slice(&(-5632i32).to_le_bytes());
        data[12..28].copy_from_slice(&(u128::MAX - 7).to_le_bytes());
        data[28..44].copy_from_slice(&(-42i128).to_le_bytes());
        data[44..52].copy_from_slice(&0x0102_0304_0506_0708u64.to_le_bytes());
        data[52..54].copy_from_slice(&64u16.to_le_bytes());
        data[54] = 1;

        let account = AccountData::new(AccountKind::TickArray, &data, "TickArray", 64).unwrap();
        assert_eq!(account.read_i32(8).unwrap(), -5632);
        assert_eq!(account.read_u128(12).unwrap(), u128::MAX - 7);
        assert_eq!(account.read_i128(28).unwrap(), -42);
        assert_eq!(account.read_u64(44).unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(account.read_u16(52).unwrap(), 64);
        assert!(account.read_bool(54).unwrap());
        assert!(!account.read_bool(55).unwrap());
    }

    #[test]
    fn out_of_bounds_read_is_malformed() {
        let data = buffer("TickArray", 16);
        let account = AccountData::new(AccountKind::TickArray, &data, "TickArray", 16).unwrap();
        assert_eq!(
            account.read_u128(8),
            Err(ErrorCode::malformed(AccountKind::TickArray, "field out of bounds"))
        );
        assert!(account.read_u64(8).is_ok());
        assert!(account.read_u8(usize::MAX).is_err());
    }

    #[test]
    fn invalid_bool_and_default_key_are_malformed() {
        let mut data = buffer("Position", 48);
        data[8] = 2;
        let account = AccountData::new(AccountKind::Position, &data, "Position", 48).unwrap();
        assert!(account.read_bool(8).is_err());
        assert_eq!(
            account.read_pubkey(16),
            Err(ErrorCode::malformed(AccountKind::Position, "embedded key is the default key"))
        );
    }
}
