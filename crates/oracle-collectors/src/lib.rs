pub mod black_purchase;
pub mod crawl;
pub mod error;
pub mod registration;
pub mod white_mint;

pub use black_purchase::collect_black_purchases;
pub use error::CollectError;
pub use registration::{collect_candidate_registrations, collect_participant_registrations};
pub use white_mint::collect_white_mints;
