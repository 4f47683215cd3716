use async_trait::async_trait;
use bip39::Mnemonic;
use oracle_types::{wire::SetConditionMessage, Address};

use crate::{error::WalletError, version::WalletVersion};

/// The attached value of a `SetConditionMessage` send: 0.05 TON, matching
/// `examples/original_source/backend/internal/tracker/synchronize.go`'s
/// `Amount: 5_000_000_0`.
pub const SET_CONDITION_AMOUNT_NANOTON: u64 = 50_000_000;

/// What the reconciler needs from the wallet (`spec.md` §4.6): assemble and
/// send exactly one `SetConditionMessage` per condition transition.
/// `spec.md` treats the wallet as an out-of-scope external collaborator, so
/// this crate owns message assembly only; the actual network send is a
/// separate [`WalletTransport`] seam.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    async fn send_set_condition(
        &self,
        raffle: Address,
        user: Address,
        white_minted: u8,
        black_purchased: u8
    ) -> Result<(), WalletError>;
}

/// The out-of-scope external collaborator: actually broadcasting a signed
/// external message. Kept separate from `oracle_chain::ChainGateway` since
/// on a real deployment it is a distinct service (the wallet's own RPC
/// session), not the read-only indexer.
#[async_trait]
pub trait WalletTransport: Send + Sync {
    async fn send(&self, to: Address, amount_nanoton: u64, bounce: bool, body: Vec<u8>) -> Result<(), WalletError>;
}

/// Logs the send and returns `Ok`. Ships for local runs and tests; a real
/// deployment supplies its own `WalletTransport` wired to a TON wallet
/// client (out of this crate's scope per `spec.md` §1).
pub struct NullWalletTransport;

#[async_trait]
impl WalletTransport for NullWalletTransport {
    async fn send(&self, to: Address, amount_nanoton: u64, bounce: bool, body: Vec<u8>) -> Result<(), WalletError> {
        tracing::info!(to = %to, amount_nanoton, bounce, body_len = body.len(), "wallet send (null transport)");
        Ok(())
    }
}

/// Derives signing material from `WALLET_MNEMONIC` and assembles
/// `SetConditionMessage` sends, delegating the actual broadcast to a
/// [`WalletTransport`].
pub struct MnemonicWalletSigner<T: WalletTransport> {
    version:   WalletVersion,
    seed:      [u8; 64],
    transport: T
}

impl<T: WalletTransport> MnemonicWalletSigner<T> {
    /// Validates `mnemonic` as a BIP-39 word list and derives its seed, the
    /// closest ecosystem equivalent to the original's `wallet.SeedToPrivateKey`
    /// (`spec.md` §6's `WALLET_MNEMONIC` environment variable).
    pub fn new(mnemonic: &str, version: WalletVersion, transport: T) -> Result<Self, WalletError> {
        let parsed: Mnemonic = mnemonic.parse().map_err(|err: bip39::Error| WalletError::InvalidMnemonic(err.to_string()))?;
        let seed = parsed.to_seed("");
        Ok(Self { version, seed, transport })
    }

    pub fn version(&self) -> WalletVersion {
        self.version
    }

    pub fn seed(&self) -> &[u8; 64] {
        &self.seed
    }
}

#[async_trait]
impl<T: WalletTransport> WalletSigner for MnemonicWalletSigner<T> {
    async fn send_set_condition(
        &self,
        raffle: Address,
        user: Address,
        white_minted: u8,
        black_purchased: u8
    ) -> Result<(), WalletError> {
        let body = SetConditionMessage { user_address: user, white_minted, black_purchased }.encode();
        self.transport.send(raffle, SET_CONDITION_AMOUNT_NANOTON, true, body).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[derive(Default)]
    struct RecordingTransport {
        sends: Mutex<Vec<(Address, u64, bool, Vec<u8>)>>
    }

    #[async_trait]
    impl WalletTransport for Arc<RecordingTransport> {
        async fn send(&self, to: Address, amount_nanoton: u64, bounce: bool, body: Vec<u8>) -> Result<(), WalletError> {
            self.sends.lock().unwrap().push((to, amount_nanoton, bounce, body));
            Ok(())
        }
    }

    #[test]
    fn rejects_an_invalid_mnemonic() {
        let result = MnemonicWalletSigner::new("not a real mnemonic", WalletVersion::V4R2, NullWalletTransport);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn sends_a_correctly_encoded_set_condition_message() {
        let transport = Arc::new(RecordingTransport::default());
        let signer = MnemonicWalletSigner::new(TEST_MNEMONIC, WalletVersion::V4R2, transport.clone()).unwrap();

        let raffle = Address::new(0, [1u8; 32]);
        let user = Address::new(0, [2u8; 32]);
        signer.send_set_condition(raffle, user, 2, 2).await.unwrap();

        let sends = transport.sends.lock().unwrap();
        assert_eq!(sends.len(), 1);
        let (to, amount, bounce, body) = &sends[0];
        assert_eq!(*to, raffle);
        assert_eq!(*amount, SET_CONDITION_AMOUNT_NANOTON);
        assert!(*bounce);
        let decoded = SetConditionMessage::decode(body).unwrap();
        assert_eq!(decoded, SetConditionMessage { user_address: user, white_minted: 2, black_purchased: 2 });
    }
}
