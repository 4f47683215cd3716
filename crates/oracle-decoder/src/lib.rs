//! Pure trace classifiers (`spec.md` §4.4): decode a transaction's incoming
//! message body and decide whether it represents one of the four action
//! kinds. Every classifier returns `None`/`Ok(None)` on a shape mismatch —
//! trace trees are full of unrelated traffic, and that is expected, not an
//! error (`spec.md` §7, "decode skip").

pub mod black_purchase;
pub mod candidate;
pub mod constants;
pub mod participant;
pub mod white_mint;

pub use black_purchase::BlackPurchase;
pub use candidate::CandidateRegistration;
pub use participant::ParticipantRegistration;
pub use white_mint::WhiteMint;
