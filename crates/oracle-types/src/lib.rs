//! Domain types shared by every crate in the oracle: the account address
//! form, the closed action-kind enumeration, the reconciled user status, the
//! raffle parameter cache, and the `SetConditionMessage` wire codec.

pub mod action;
pub mod address;
pub mod bits;
pub mod error;
pub mod raffle;
pub mod status;
pub mod wire;

pub use action::{ActionKind, TouchScope, UserAction, UserActionTouch};
pub use address::Address;
pub use error::AddressError;
pub use raffle::{RaffleConditions, RaffleParams};
pub use status::{UserStatus, COUNTER_CEILING};
pub use wire::SetConditionMessage;

/// Logical time: a monotone per-account counter assigned by the chain to
/// each transaction. The sole ordering / watermark key (`spec.md` section 3).
pub type Lt = i64;

/// The walker's empty-subtree sentinel (`spec.md` section 4.3).
pub const LT_SENTINEL_MAX: Lt = i64::MAX;
