//! Wallet-facing seam (`SPEC_FULL.md` §4.8): the bit-exact `WalletVersion`
//! mapping, the `WalletSigner`/`WalletTransport` traits, and a
//! mnemonic-derived signer implementation.

pub mod error;
pub mod signer;
pub mod version;

pub use error::WalletError;
pub use signer::{MnemonicWalletSigner, NullWalletTransport, WalletSigner, WalletTransport, SET_CONDITION_AMOUNT_NANOTON};
pub use version::WalletVersion;
