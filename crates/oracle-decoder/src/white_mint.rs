use oracle_chain::{AccountStatus, Transaction};
use oracle_types::{bits::BitReader, Address};

use crate::constants::NFT_MINT_OPS;

/// A white-ticket mint: the NFT item's own deployment transaction, reached
/// as a descendant of an ancestor carrying one of [`NFT_MINT_OPS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhiteMint {
    pub user_address: Address,
    pub item_address: Address
}

/// Whether `tx`'s incoming message carries a collection-side mint op-code.
/// The walker's visitor ORs this into a flag threaded down to descendants —
/// the mint opcode lands on the collection, the deployment on the item
/// (`spec.md` §4.4's rationale).
pub fn marks_mint(tx: &Transaction) -> bool {
    matches!(tx.in_msg.as_ref().and_then(|m| m.op_code), Some(op) if NFT_MINT_OPS.contains(&op))
}

/// Classifies a single trace node as the mint of a white ticket, given
/// whether an ancestor already set the mint marker. `None` on any shape
/// mismatch, never an error.
pub fn classify(tx: &Transaction, has_mint_marker: bool) -> Option<WhiteMint> {
    if !has_mint_marker {
        return None;
    }
    if tx.orig_status != AccountStatus::NonExistent || tx.end_status != AccountStatus::Active || !tx.success {
        return None;
    }
    let in_msg = tx.in_msg.as_ref()?;
    let mut reader = BitReader::new(&in_msg.body);
    let user_address = reader.read_address()?;
    Some(WhiteMint { user_address, item_address: in_msg.destination })
}

#[cfg(test)]
mod tests {
    use oracle_types::bits::BitWriter;

    use super::*;

    fn body_for(address: &Address) -> Vec<u8> {
        let mut w = BitWriter::new();
        w.write_address(address);
        w.into_bytes()
    }

    fn deployed_tx(op_code: Option<u32>, in_msg_body: Vec<u8>, item: Address) -> Transaction {
        Transaction {
            lt: 1,
            hash: [0u8; 32],
            account: item,
            unix_time: 0,
            orig_status: AccountStatus::NonExistent,
            end_status: AccountStatus::Active,
            success: true,
            in_msg: Some(oracle_chain::InMessage {
                source: None,
                destination: item,
                op_code,
                body: in_msg_body
            })
        }
    }

    #[test]
    fn marks_mint_detects_either_collection_op_code() {
        let item = Address::new(0, [3u8; 32]);
        let tx1 = deployed_tx(Some(0x0000_0001), vec![], item);
        let tx2 = deployed_tx(Some(0x0000_0002), vec![], item);
        let tx3 = deployed_tx(Some(0xdead_beef), vec![], item);
        assert!(marks_mint(&tx1));
        assert!(marks_mint(&tx2));
        assert!(!marks_mint(&tx3));
    }

    #[test]
    fn classifies_a_deployment_when_marker_is_set() {
        let item = Address::new(0, [3u8; 32]);
        let user = Address::new(0, [4u8; 32]);
        let tx = deployed_tx(None, body_for(&user), item);
        assert_eq!(classify(&tx, true), Some(WhiteMint { user_address: user, item_address: item }));
    }

    #[test]
    fn rejects_deployment_without_an_ancestor_marker() {
        let item = Address::new(0, [3u8; 32]);
        let user = Address::new(0, [4u8; 32]);
        let tx = deployed_tx(None, body_for(&user), item);
        assert_eq!(classify(&tx, false), None);
    }

    #[test]
    fn rejects_non_deployment_even_with_marker_set() {
        let item = Address::new(0, [3u8; 32]);
        let user = Address::new(0, [4u8; 32]);
        let mut tx = deployed_tx(None, body_for(&user), item);
        tx.orig_status = AccountStatus::Active;
        assert_eq!(classify(&tx, true), None);
    }
}
