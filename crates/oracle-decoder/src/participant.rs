use oracle_chain::{AccountStatus, Transaction};
use oracle_types::{bits::BitReader, Address};

use crate::constants::PARTICIPANT_REG_OP;

/// A raffle participant registration. Structurally identical to
/// [`crate::candidate::CandidateRegistration`] but the body carries no
/// telegram id before the user address — `spec.md` §4.4 calls this
/// difference out explicitly as one to preserve, not collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantRegistration {
    pub user_address: Address
}

/// Classifies a single trace node as a participant registration. `None` on
/// any shape mismatch, never an error.
pub fn classify(tx: &Transaction) -> Option<ParticipantRegistration> {
    if tx.orig_status != AccountStatus::NonExistent || tx.end_status != AccountStatus::Active || !tx.success {
        return None;
    }
    let in_msg = tx.in_msg.as_ref()?;
    if in_msg.op_code != Some(PARTICIPANT_REG_OP) {
        return None;
    }
    let mut reader = BitReader::new(&in_msg.body);
    reader.skip_bits(32).ok()?; // op-code, already matched above
    let user_address = reader.read_address()?;
    Some(ParticipantRegistration { user_address })
}

#[cfg(test)]
mod tests {
    use oracle_types::bits::BitWriter;

    use super::*;

    fn body_for(address: &Address) -> Vec<u8> {
        let mut w = BitWriter::new();
        w.write_uint(PARTICIPANT_REG_OP as u64, 32).unwrap();
        w.write_address(address);
        w.into_bytes()
    }

    fn deployed_tx(in_msg: Option<oracle_chain::InMessage>) -> Transaction {
        Transaction {
            lt: 1,
            hash: [0u8; 32],
            account: Address::new(0, [1u8; 32]),
            unix_time: 0,
            orig_status: AccountStatus::NonExistent,
            end_status: AccountStatus::Active,
            success: true,
            in_msg
        }
    }

    #[test]
    fn classifies_a_well_formed_registration_with_no_telegram_id_skip() {
        let user = Address::new(0, [7u8; 32]);
        let tx = deployed_tx(Some(oracle_chain::InMessage {
            source:      None,
            destination: Address::new(0, [2u8; 32]),
            op_code:     Some(PARTICIPANT_REG_OP),
            body:        body_for(&user)
        }));
        assert_eq!(classify(&tx), Some(ParticipantRegistration { user_address: user }));
    }

    #[test]
    fn rejects_candidate_opcode() {
        let user = Address::new(0, [7u8; 32]);
        let mut tx = deployed_tx(Some(oracle_chain::InMessage {
            source:      None,
            destination: Address::new(0, [2u8; 32]),
            op_code:     Some(crate::constants::CANDIDATE_REG_OP),
            body:        body_for(&user)
        }));
        tx.in_msg.as_mut().unwrap().op_code = Some(crate::constants::CANDIDATE_REG_OP);
        assert_eq!(classify(&tx), None);
    }

    #[test]
    fn rejects_failed_transaction() {
        let user = Address::new(0, [7u8; 32]);
        let mut tx = deployed_tx(Some(oracle_chain::InMessage {
            source:      None,
            destination: Address::new(0, [2u8; 32]),
            op_code:     Some(PARTICIPANT_REG_OP),
            body:        body_for(&user)
        }));
        tx.success = false;
        assert_eq!(classify(&tx), None);
    }
}
