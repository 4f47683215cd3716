use oracle_chain::{ChainError, ChainGateway, Transaction};
use oracle_types::{bits::BitReader, Address};

use crate::constants::{BLACK_PURCHASE_OP, MARKETPLACE_ADDRESS_RAW};

const SALE_DATA_METHOD: &str = "get_sale_data";
const FIX_PRICE_METHOD: &str = "get_fix_price_data_v4";

/// A black-ticket purchase: an NFT transfer out of a trusted marketplace
/// sale contract, excluding sale cancellations (new owner = previous
/// owner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlackPurchase {
    pub user_address: Address,
    pub item_address: Address
}

/// Classifies a single trace node as a black-ticket purchase.
///
/// Unlike the other three classifiers this one needs the chain gateway: the
/// marketplace address and previous owner live in a sale contract's getter
/// stack, not the message body, and the NFT item's collection must be
/// confirmed independently (`spec.md` §4.4). Shape mismatches resolve to
/// `Ok(None)`; gateway errors propagate as `Err` (a "recoverable remote"
/// failure per `spec.md` §7, not a decode skip).
pub async fn classify(
    gateway: &dyn ChainGateway,
    tx: &Transaction,
    black_ticket_collection: &Address
) -> Result<Option<BlackPurchase>, ChainError> {
    if !tx.success {
        return Ok(None);
    }
    let Some(in_msg) = tx.in_msg.as_ref() else {
        return Ok(None);
    };
    if in_msg.op_code != Some(BLACK_PURCHASE_OP) {
        return Ok(None);
    }
    let Some(source) = in_msg.source else {
        return Ok(None);
    };

    let source_account = gateway.get_account(&source).await?;
    let (method, marketplace_idx, previous_owner_idx) = if source_account.implements(SALE_DATA_METHOD) {
        (SALE_DATA_METHOD, 3, 5)
    } else if source_account.implements(FIX_PRICE_METHOD) {
        (FIX_PRICE_METHOD, 2, 4)
    } else {
        return Ok(None);
    };

    let stack = gateway.exec_getter(&source, method, &[]).await?;
    let Some(marketplace_address) = stack.address_at(marketplace_idx) else {
        return Ok(None);
    };
    let Some(previous_owner) = stack.address_at(previous_owner_idx) else {
        return Ok(None);
    };

    let marketplace_constant =
        Address::from_raw(MARKETPLACE_ADDRESS_RAW).expect("marketplace constant is a valid raw address");
    if marketplace_address != marketplace_constant {
        return Ok(None);
    }

    let mut reader = BitReader::new(&in_msg.body);
    reader.skip_bits(32).ok(); // op-code, already matched above
    reader.skip_bits(64).ok(); // query id, unused
    let Some(new_owner) = reader.read_address() else {
        return Ok(None);
    };
    if new_owner == previous_owner {
        return Ok(None); // sale cancellation, not a purchase
    }

    let item = gateway.get_nft_item(&in_msg.destination).await?;
    if item.collection != Some(*black_ticket_collection) {
        return Ok(None);
    }

    Ok(Some(BlackPurchase { user_address: new_owner, item_address: in_msg.destination }))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use oracle_chain::{AccountInfo, AccountStatus, InMessage, NftItemData, Stack, StackItem, Trace};
    use oracle_types::bits::BitWriter;

    use super::*;

    struct FakeGateway {
        account:  AccountInfo,
        stack:    Stack,
        nft_item: NftItemData
    }

    #[async_trait]
    impl ChainGateway for FakeGateway {
        async fn list_traces(&self, _: &Address, _: i64, _: u32) -> Result<Vec<Trace>, ChainError> {
            unimplemented!()
        }

        async fn get_trace(&self, _: &[u8; 32]) -> Result<Option<Trace>, ChainError> {
            unimplemented!()
        }

        async fn get_account(&self, _: &Address) -> Result<AccountInfo, ChainError> {
            Ok(self.account.clone())
        }

        async fn exec_getter(&self, _: &Address, _: &str, _: &[StackItem]) -> Result<Stack, ChainError> {
            Ok(self.stack.clone())
        }

        async fn get_nft_item(&self, _: &Address) -> Result<NftItemData, ChainError> {
            Ok(self.nft_item.clone())
        }
    }

    fn body_for(new_owner: &Address) -> Vec<u8> {
        let mut w = BitWriter::new();
        w.write_uint(BLACK_PURCHASE_OP as u64, 32).unwrap();
        w.write_uint(999, 64).unwrap();
        w.write_address(new_owner);
        w.into_bytes()
    }

    fn purchase_tx(source: Address, destination: Address, body: Vec<u8>) -> Transaction {
        Transaction {
            lt: 1,
            hash: [0u8; 32],
            account: destination,
            unix_time: 0,
            orig_status: AccountStatus::Active,
            end_status: AccountStatus::Active,
            success: true,
            in_msg: Some(InMessage { source: Some(source), destination, op_code: Some(BLACK_PURCHASE_OP), body })
        }
    }

    fn marketplace() -> Address {
        Address::from_raw(MARKETPLACE_ADDRESS_RAW).unwrap()
    }

    #[tokio::test]
    async fn accepts_a_purchase_from_a_trusted_sale_contract() {
        let source = Address::new(0, [1u8; 32]);
        let item = Address::new(0, [2u8; 32]);
        let new_owner = Address::new(0, [3u8; 32]);
        let previous_owner = Address::new(0, [4u8; 32]);
        let collection = Address::new(0, [5u8; 32]);

        let mut stack = vec![StackItem::Null; 6];
        stack[3] = StackItem::Address(marketplace());
        stack[5] = StackItem::Address(previous_owner);

        let gateway = FakeGateway {
            account:  AccountInfo {
                address:     source,
                status:      AccountStatus::Active,
                balance_nano: 0,
                last_lt:     0,
                get_methods: vec![SALE_DATA_METHOD.to_owned()]
            },
            stack:    Stack(stack),
            nft_item: NftItemData { address: item, collection: Some(collection), owner: Some(new_owner), index: 0 }
        };

        let tx = purchase_tx(source, item, body_for(&new_owner));
        let result = classify(&gateway, &tx, &collection).await.unwrap();
        assert_eq!(result, Some(BlackPurchase { user_address: new_owner, item_address: item }));
    }

    #[tokio::test]
    async fn rejects_sale_cancellation_where_new_owner_equals_previous_owner() {
        let source = Address::new(0, [1u8; 32]);
        let item = Address::new(0, [2u8; 32]);
        let owner = Address::new(0, [3u8; 32]);
        let collection = Address::new(0, [5u8; 32]);

        let mut stack = vec![StackItem::Null; 6];
        stack[3] = StackItem::Address(marketplace());
        stack[5] = StackItem::Address(owner);

        let gateway = FakeGateway {
            account:  AccountInfo {
                address:     source,
                status:      AccountStatus::Active,
                balance_nano: 0,
                last_lt:     0,
                get_methods: vec![SALE_DATA_METHOD.to_owned()]
            },
            stack:    Stack(stack),
            nft_item: NftItemData { address: item, collection: Some(collection), owner: Some(owner), index: 0 }
        };

        let tx = purchase_tx(source, item, body_for(&owner));
        assert_eq!(classify(&gateway, &tx, &collection).await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_untrusted_marketplace() {
        let source = Address::new(0, [1u8; 32]);
        let item = Address::new(0, [2u8; 32]);
        let new_owner = Address::new(0, [3u8; 32]);
        let previous_owner = Address::new(0, [4u8; 32]);
        let collection = Address::new(0, [5u8; 32]);
        let untrusted = Address::new(0, [9u8; 32]);

        let mut stack = vec![StackItem::Null; 6];
        stack[3] = StackItem::Address(untrusted);
        stack[5] = StackItem::Address(previous_owner);

        let gateway = FakeGateway {
            account:  AccountInfo {
                address:     source,
                status:      AccountStatus::Active,
                balance_nano: 0,
                last_lt:     0,
                get_methods: vec![SALE_DATA_METHOD.to_owned()]
            },
            stack:    Stack(stack),
            nft_item: NftItemData { address: item, collection: Some(collection), owner: Some(new_owner), index: 0 }
        };

        let tx = purchase_tx(source, item, body_for(&new_owner));
        assert_eq!(classify(&gateway, &tx, &collection).await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_wrong_collection() {
        let source = Address::new(0, [1u8; 32]);
        let item = Address::new(0, [2u8; 32]);
        let new_owner = Address::new(0, [3u8; 32]);
        let previous_owner = Address::new(0, [4u8; 32]);
        let collection = Address::new(0, [5u8; 32]);
        let other_collection = Address::new(0, [6u8; 32]);

        let mut stack = vec![StackItem::Null; 6];
        stack[3] = StackItem::Address(marketplace());
        stack[5] = StackItem::Address(previous_owner);

        let gateway = FakeGateway {
            account:  AccountInfo {
                address:     source,
                status:      AccountStatus::Active,
                balance_nano: 0,
                last_lt:     0,
                get_methods: vec![SALE_DATA_METHOD.to_owned()]
            },
            stack:    Stack(stack),
            nft_item: NftItemData {
                address:    item,
                collection: Some(other_collection),
                owner:      Some(new_owner),
                index:      0
            }
        };

        let tx = purchase_tx(source, item, body_for(&new_owner));
        assert_eq!(classify(&gateway, &tx, &collection).await.unwrap(), None);
    }

    #[tokio::test]
    async fn uses_fix_price_layout_when_sale_data_is_not_implemented() {
        let source = Address::new(0, [1u8; 32]);
        let item = Address::new(0, [2u8; 32]);
        let new_owner = Address::new(0, [3u8; 32]);
        let previous_owner = Address::new(0, [4u8; 32]);
        let collection = Address::new(0, [5u8; 32]);

        let mut stack = vec![StackItem::Null; 5];
        stack[2] = StackItem::Address(marketplace());
        stack[4] = StackItem::Address(previous_owner);

        let gateway = FakeGateway {
            account:  AccountInfo {
                address:     source,
                status:      AccountStatus::Active,
                balance_nano: 0,
                last_lt:     0,
                get_methods: vec![FIX_PRICE_METHOD.to_owned()]
            },
            stack:    Stack(stack),
            nft_item: NftItemData { address: item, collection: Some(collection), owner: Some(new_owner), index: 0 }
        };

        let tx = purchase_tx(source, item, body_for(&new_owner));
        let result = classify(&gateway, &tx, &collection).await.unwrap();
        assert_eq!(result, Some(BlackPurchase { user_address: new_owner, item_address: item }));
    }

    #[tokio::test]
    async fn rejects_account_implementing_neither_getter() {
        let source = Address::new(0, [1u8; 32]);
        let item = Address::new(0, [2u8; 32]);
        let new_owner = Address::new(0, [3u8; 32]);
        let collection = Address::new(0, [5u8; 32]);

        let gateway = FakeGateway {
            account:  AccountInfo {
                address:     source,
                status:      AccountStatus::Active,
                balance_nano: 0,
                last_lt:     0,
                get_methods: vec![]
            },
            stack:    Stack(vec![]),
            nft_item: NftItemData { address: item, collection: Some(collection), owner: None, index: 0 }
        };

        let tx = purchase_tx(source, item, body_for(&new_owner));
        assert_eq!(classify(&gateway, &tx, &collection).await.unwrap(), None);
    }
}
