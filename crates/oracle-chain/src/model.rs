//! Domain shapes the gateway hands back to the rest of the oracle. These are
//! independent of whichever indexer API `HttpChainGateway` happens to talk
//! to — wire DTOs live in `http.rs` and convert into these.

use oracle_types::{Address, Lt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    NonExistent,
    Uninitialized,
    Frozen,
    Active
}

/// A message that produced a transaction, trimmed to what the decoders need:
/// the sender (if any), the raw body bits, and the op-code pulled out of the
/// body's first 32 bits (absent on empty bodies, e.g. plain TON transfers).
#[derive(Debug, Clone)]
pub struct InMessage {
    pub source:      Option<Address>,
    pub destination: Address,
    pub op_code:     Option<u32>,
    pub body:        Vec<u8>
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub lt:           Lt,
    pub hash:         [u8; 32],
    pub account:      Address,
    pub unix_time:    i64,
    pub orig_status:  AccountStatus,
    pub end_status:   AccountStatus,
    pub success:      bool,
    pub in_msg:       Option<InMessage>
}

/// One node of a transaction trace tree, as returned by `list_traces` /
/// `get_trace`. Implements [`oracle_walker::TraceNode`] directly so
/// collectors can feed it straight into `oracle_walker::walk`.
#[derive(Debug, Clone)]
pub struct Trace {
    pub transaction: Transaction,
    pub children:    Vec<Trace>
}

impl oracle_walker::TraceNode for Trace {
    fn lt(&self) -> Lt {
        self.transaction.lt
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

#[derive(Debug, Clone)]
pub struct AccountInfo {
    pub address:     Address,
    pub status:      AccountStatus,
    pub balance_nano: u64,
    pub last_lt:     Lt,
    /// Names of the contract's implemented get-methods, as reported by the
    /// indexer's account endpoint. The black-purchase classifier probes
    /// this to pick between `get_sale_data` and `get_fix_price_data_v4`
    /// (`spec.md` §4.4, "dual sale-getter dispatch").
    pub get_methods: Vec<String>
}

impl AccountInfo {
    pub fn implements(&self, method: &str) -> bool {
        self.get_methods.iter().any(|m| m == method)
    }
}

/// A single TVM stack slot returned by `exec_getter`. Only the variants the
/// decoder's getter calls actually produce are modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackItem {
    Int(i128),
    Address(Address),
    Cell(Vec<u8>),
    Slice(Vec<u8>),
    Null
}

/// The ordered return value of a getter invocation.
#[derive(Debug, Clone, Default)]
pub struct Stack(pub Vec<StackItem>);

impl Stack {
    pub fn int_at(&self, index: usize) -> Option<i128> {
        match self.0.get(index) {
            Some(StackItem::Int(v)) => Some(*v),
            _ => None
        }
    }

    pub fn address_at(&self, index: usize) -> Option<Address> {
        match self.0.get(index) {
            Some(StackItem::Address(a)) => Some(*a),
            _ => None
        }
    }

    pub fn cell_at(&self, index: usize) -> Option<&[u8]> {
        match self.0.get(index) {
            Some(StackItem::Cell(bytes)) | Some(StackItem::Slice(bytes)) => Some(bytes),
            _ => None
        }
    }
}

#[derive(Debug, Clone)]
pub struct NftItemData {
    pub address:    Address,
    pub collection: Option<Address>,
    pub owner:      Option<Address>,
    pub index:      u64
}
