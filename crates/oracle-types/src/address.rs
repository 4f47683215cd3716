use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use crc::{Crc, CRC_16_XMODEM};
use serde::{Deserialize, Serialize};

use crate::error::AddressError;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TESTNET_FLAG: u8 = 0x80;

/// A TON account identifier: a workchain id plus a 256-bit account hash.
///
/// Equality and hashing are defined on the raw form, matching `spec.md`
/// section 3 (`equality is defined on raw form`).
#[derive(Clone, Copy, Eq, Serialize, Deserialize)]
pub struct Address {
    pub workchain: i32,
    pub hash:      [u8; 32]
}

impl Address {
    pub fn new(workchain: i32, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    /// Parses the canonical raw form `{workchain}:{64 hex chars}`.
    pub fn from_raw(raw: &str) -> Result<Self, AddressError> {
        let (wc, hash_hex) = raw.split_once(':').ok_or(AddressError::MalformedRaw)?;
        let workchain: i32 = wc.parse().map_err(|_| AddressError::InvalidWorkchain)?;
        if hash_hex.len() != 64 {
            return Err(AddressError::InvalidHash);
        }
        let bytes = hex::decode(hash_hex).map_err(|_| AddressError::InvalidHash)?;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes);
        Ok(Self { workchain, hash })
    }

    /// Renders the canonical raw form `{workchain}:{64 hex chars}`.
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// Parses a user-friendly base64url address (tag + workchain + hash + CRC16/XMODEM).
    pub fn from_user_friendly(s: &str) -> Result<Self, AddressError> {
        let buf = URL_SAFE_NO_PAD
            .decode(s.as_bytes())
            .map_err(|_| AddressError::InvalidUserFriendly)?;
        if buf.len() != 36 {
            return Err(AddressError::WrongLength);
        }
        let tag = buf[0] & !TESTNET_FLAG;
        if tag != TAG_BOUNCEABLE && tag != TAG_NON_BOUNCEABLE {
            return Err(AddressError::UnknownTag);
        }
        let crc = CRC16.checksum(&buf[0..34]);
        let expected = u16::from_be_bytes([buf[34], buf[35]]);
        if crc != expected {
            return Err(AddressError::ChecksumMismatch);
        }
        let workchain = buf[1] as i8 as i32;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&buf[2..34]);
        Ok(Self { workchain, hash })
    }

    /// Renders a user-friendly base64url address. The original oracle always
    /// requests `ToHuman(true, false)` (bounceable, mainnet); mirrored here
    /// as explicit parameters rather than baked-in defaults.
    pub fn to_user_friendly(&self, bounceable: bool, testnet: bool) -> String {
        let mut tag = if bounceable { TAG_BOUNCEABLE } else { TAG_NON_BOUNCEABLE };
        if testnet {
            tag |= TESTNET_FLAG;
        }

        let mut buf = [0u8; 36];
        buf[0] = tag;
        buf[1] = self.workchain as i8 as u8;
        buf[2..34].copy_from_slice(&self.hash);
        let crc = CRC16.checksum(&buf[0..34]);
        buf[34..36].copy_from_slice(&crc.to_be_bytes());

        URL_SAFE_NO_PAD.encode(buf)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.workchain == other.workchain && self.hash == other.hash
    }
}

impl std::hash::Hash for Address {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.workchain.hash(state);
        self.hash.hash(state);
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_raw())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_raw())
    }
}
