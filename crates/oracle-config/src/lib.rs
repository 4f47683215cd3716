//! Environment/CLI configuration surface (`spec.md` §6's enumerated
//! environment configuration, plus the `DATABASE_URL`/`CHAIN_API_*`
//! ambient additions `SPEC_FULL.md` §4.7 carries for a real deployment).
//! Parsed once via `clap::Parser` at process start, matching the teacher's
//! `bin/testnet` idiom, then resolved into strongly-typed values the rest
//! of the oracle consumes.

pub mod error;

use clap::Parser;
use oracle_types::Address;
use oracle_wallet::WalletVersion;

pub use error::ConfigError;

/// Raw CLI/env surface. Every field is a string so that a malformed value
/// produces a [`ConfigError`] from [`Cli::resolve`] rather than a clap
/// parse failure with a less specific message.
#[derive(Parser, Debug)]
#[command(about = "Raffle condition oracle")]
pub struct Cli {
    /// BIP-39 seed phrase for the wallet that signs `SetConditionMessage`.
    #[arg(long, env = "WALLET_MNEMONIC")]
    pub wallet_mnemonic: String,

    /// Named wallet contract version (e.g. `V4R2`), selecting signing
    /// behavior bit-exact with the original tracker's `WalletMap`.
    #[arg(long, env = "WALLET_VERSION")]
    pub wallet_version: String,

    /// Raffle contract account, in raw or user-friendly form.
    #[arg(long, env = "RAFFLE_ADDRESS")]
    pub raffle_address: String,

    /// Black-ticket NFT collection account.
    #[arg(long, env = "BLACK_TICKET_COLLECTION_ADDRESS")]
    pub black_ticket_collection_address: String,

    /// White-ticket NFT collection account.
    #[arg(long, env = "WHITE_TICKET_COLLECTION_ADDRESS")]
    pub white_ticket_collection_address: String,

    /// Postgres connection string for the store.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Base URL of the chain-indexing API the chain gateway talks to.
    #[arg(long, env = "CHAIN_API_URL")]
    pub chain_api_url: String,

    /// Optional API key, sent as a bearer token if present.
    #[arg(long, env = "CHAIN_API_KEY")]
    pub chain_api_key: Option<String>
}

/// Resolved, strongly-typed configuration. Built once at startup via
/// [`Cli::resolve`] and passed down to the orchestrator and collectors.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub wallet_mnemonic:                     String,
    pub wallet_version:                      WalletVersion,
    pub raffle_address:                      Address,
    pub black_ticket_collection_address:     Address,
    pub white_ticket_collection_address:     Address,
    pub database_url:                        String,
    pub chain_api_url:                       String,
    pub chain_api_key:                       Option<String>
}

impl Cli {
    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        Ok(ResolvedConfig {
            wallet_mnemonic: self.wallet_mnemonic,
            wallet_version: self
                .wallet_version
                .parse()
                .map_err(|_| ConfigError::InvalidWalletVersion(self.wallet_version.clone()))?,
            raffle_address: parse_address("RAFFLE_ADDRESS", &self.raffle_address)?,
            black_ticket_collection_address: parse_address(
                "BLACK_TICKET_COLLECTION_ADDRESS",
                &self.black_ticket_collection_address
            )?,
            white_ticket_collection_address: parse_address(
                "WHITE_TICKET_COLLECTION_ADDRESS",
                &self.white_ticket_collection_address
            )?,
            database_url: self.database_url,
            chain_api_url: self.chain_api_url,
            chain_api_key: self.chain_api_key
        })
    }
}

/// Accepts either the canonical raw form or the user-friendly base64url
/// form, so operators can paste whichever an explorer gives them.
fn parse_address(field: &'static str, raw: &str) -> Result<Address, ConfigError> {
    Address::from_raw(raw).or_else(|_| Address::from_user_friendly(raw)).map_err(|source| ConfigError::InvalidAddress { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_a_well_formed_cli() {
        let cli = Cli {
            wallet_mnemonic: "test mnemonic".to_string(),
            wallet_version: "V4R2".to_string(),
            raffle_address: "0:".to_string() + &"11".repeat(32),
            black_ticket_collection_address: "0:".to_string() + &"22".repeat(32),
            white_ticket_collection_address: "0:".to_string() + &"33".repeat(32),
            database_url: "postgres://localhost/oracle".to_string(),
            chain_api_url: "https://chain.example".to_string(),
            chain_api_key: None
        };

        let resolved = cli.resolve().unwrap();
        assert_eq!(resolved.wallet_version, WalletVersion::V4R2);
        assert_eq!(resolved.raffle_address.workchain, 0);
    }

    #[test]
    fn rejects_an_unknown_wallet_version() {
        let cli = Cli {
            wallet_mnemonic: "test mnemonic".to_string(),
            wallet_version: "NotAVersion".to_string(),
            raffle_address: "0:".to_string() + &"11".repeat(32),
            black_ticket_collection_address: "0:".to_string() + &"22".repeat(32),
            white_ticket_collection_address: "0:".to_string() + &"33".repeat(32),
            database_url: "postgres://localhost/oracle".to_string(),
            chain_api_url: "https://chain.example".to_string(),
            chain_api_key: None
        };

        assert!(cli.resolve().is_err());
    }
}
