use oracle_chain::{AccountStatus, Transaction};
use oracle_types::{bits::BitReader, Address};

use crate::constants::CANDIDATE_REG_OP;

/// A raffle candidate registration: a wallet's first-ever message to the
/// raffle account, carrying its own address and a Telegram user id the
/// original tracked but the oracle doesn't otherwise use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRegistration {
    pub user_address: Address
}

/// Classifies a single trace node as a candidate registration. Returns
/// `None` on any shape mismatch — wrong op-code, a retried message on an
/// already-deployed account, a failed transaction, or a body too short to
/// hold the telegram id and address — never an error.
pub fn classify(tx: &Transaction) -> Option<CandidateRegistration> {
    if tx.orig_status != AccountStatus::NonExistent || tx.end_status != AccountStatus::Active || !tx.success {
        return None;
    }
    let in_msg = tx.in_msg.as_ref()?;
    if in_msg.op_code != Some(CANDIDATE_REG_OP) {
        return None;
    }
    let mut reader = BitReader::new(&in_msg.body);
    reader.skip_bits(32).ok()?; // op-code, already matched above
    reader.skip_bits(64).ok()?; // telegram user id, unused downstream
    let user_address = reader.read_address()?;
    Some(CandidateRegistration { user_address })
}

#[cfg(test)]
mod tests {
    use oracle_types::bits::BitWriter;

    use super::*;

    fn body_for(telegram_id: u64, address: &Address) -> Vec<u8> {
        let mut w = BitWriter::new();
        w.write_uint(CANDIDATE_REG_OP as u64, 32).unwrap();
        w.write_uint(telegram_id, 64).unwrap();
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
    fn classifies_a_well_formed_registration() {
        let user = Address::new(0, [9u8; 32]);
        let tx = deployed_tx(Some(oracle_chain::InMessage {
            source:      None,
            destination: Address::new(0, [2u8; 32]),
            op_code:     Some(CANDIDATE_REG_OP),
            body:        body_for(123456, &user)
        }));
        assert_eq!(classify(&tx), Some(CandidateRegistration { user_address: user }));
    }

    #[test]
    fn rejects_wrong_opcode() {
        let user = Address::new(0, [9u8; 32]);
        let mut tx = deployed_tx(Some(oracle_chain::InMessage {
            source:      None,
            destination: Address::new(0, [2u8; 32]),
            op_code:     Some(0xdead_beef),
            body:        body_for(123456, &user)
        }));
        tx.in_msg.as_mut().unwrap().op_code = Some(0xdead_beef);
        assert_eq!(classify(&tx), None);
    }

    #[test]
    fn rejects_non_deploy_transactions() {
        let user = Address::new(0, [9u8; 32]);
        let mut tx = deployed_tx(Some(oracle_chain::InMessage {
            source:      None,
            destination: Address::new(0, [2u8; 32]),
            op_code:     Some(CANDIDATE_REG_OP),
            body:        body_for(123456, &user)
        }));
        tx.orig_status = AccountStatus::Active;
        assert_eq!(classify(&tx), None);
    }

    #[test]
    fn rejects_missing_message() {
        let tx = deployed_tx(None);
        assert_eq!(classify(&tx), None);
    }
}
