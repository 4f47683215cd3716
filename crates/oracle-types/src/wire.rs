//! `SetConditionMessage` body codec (`spec.md` section 6).

use crate::{
    address::Address,
    bits::{BitReader, BitWriter}
};

pub const SET_CONDITION_OP: u32 = 0x1337_0011;
const PADDING_BITS: usize = 240;

/// The body sent to the raffle account once a user's counters saturate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetConditionMessage {
    pub user_address:    Address,
    pub white_minted:    u8,
    pub black_purchased: u8
}

impl SetConditionMessage {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BitWriter::new();
        w.write_uint(SET_CONDITION_OP as u64, 32).expect("32-bit op-code always fits");
        w.write_address(&self.user_address);
        w.write_uint(self.white_minted as u64, 8).expect("8-bit counter always fits");
        w.write_uint(self.black_purchased as u64, 8).expect("8-bit counter always fits");
        w.write_zeros(PADDING_BITS);
        w.into_bytes()
    }

    /// Decodes a body previously produced by [`Self::encode`]. Returns
    /// `None` on any shape mismatch, matching the decode-skip error kind
    /// other classifiers in `oracle-decoder` use.
    pub fn decode(body: &[u8]) -> Option<Self> {
        let mut r = BitReader::new(body);
        let op = r.read_uint(32).ok()? as u32;
        if op != SET_CONDITION_OP {
            return None;
        }
        let user_address = r.read_address()?;
        let white_minted = r.read_uint(8).ok()? as u8;
        let black_purchased = r.read_uint(8).ok()? as u8;
        r.skip_bits(PADDING_BITS as u32).ok()?;
        Some(Self { user_address, white_minted, black_purchased })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let msg = SetConditionMessage {
            user_address:    Address::new(0, [0x42; 32]),
            white_minted:    2,
            black_purchased: 2
        };
        let encoded = msg.encode();
        assert_eq!(SetConditionMessage::decode(&encoded), Some(msg));
    }

    #[test]
    fn rejects_wrong_opcode() {
        let mut w = BitWriter::new();
        w.write_uint(0xdead_beef, 32).unwrap();
        w.write_address(&Address::new(0, [0u8; 32]));
        w.write_uint(0, 8).unwrap();
        w.write_uint(0, 8).unwrap();
        w.write_zeros(PADDING_BITS);
        assert_eq!(SetConditionMessage::decode(&w.into_bytes()), None);
    }

    #[test]
    fn rejects_truncated_body() {
        assert_eq!(SetConditionMessage::decode(&[0, 0]), None);
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// `spec.md` §8: "Message body encode(decode(x)) = x for
        /// `SetConditionMessage`".
        #[test]
        fn encode_decode_round_trips(
            workchain in any::<i8>(),
            hash in proptest::array::uniform32(any::<u8>()),
            white_minted in any::<u8>(),
            black_purchased in any::<u8>()
        ) {
            let msg = SetConditionMessage {
                user_address: Address::new(workchain as i32, hash),
                white_minted,
                black_purchased
            };
            prop_assert_eq!(SetConditionMessage::decode(&msg.encode()), Some(msg));
        }
    }
}
