mod cycle;
mod startup;

use std::sync::Arc;

use clap::Parser;
use cycle::CycleConfig;
use oracle_chain::HttpChainGateway;
use oracle_config::Cli;
use oracle_store::PostgresStore;
use oracle_wallet::{MnemonicWalletSigner, NullWalletTransport};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Cli::parse().resolve()?;
    let cancel = CancellationToken::new();

    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("received interrupt, shutting down at the end of the current cycle");
        ctrl_c_cancel.cancel();
    });

    let chain_api_url = config.chain_api_url.parse()?;
    let gateway = HttpChainGateway::new(chain_api_url, config.chain_api_key.clone(), cancel.clone());
    let store = PostgresStore::connect(&config.database_url).await?;
    let wallet = MnemonicWalletSigner::new(&config.wallet_mnemonic, config.wallet_version, NullWalletTransport)?;

    startup::verify_startup(&gateway, &config.raffle_address).await?;
    let params = Arc::new(startup::fetch_raffle_params(&gateway, &config.raffle_address).await?);
    tracing::info!(?params, "raffle parameters cached at startup");

    let cycle_config = CycleConfig {
        raffle_address: config.raffle_address,
        white_ticket_collection_address: config.white_ticket_collection_address,
        black_ticket_collection_address: config.black_ticket_collection_address,
        // `spec.md` REDESIGN FLAGS: the source hardcodes this lower bound;
        // here it's the runtime deployment LT read from `raffleData`.
        lt_floor_deploy: params.min_candidate_reached_lt
    };

    while !cancel.is_cancelled() {
        if let Err(err) = cycle::run_cycle(&gateway, &store, &wallet, &cycle_config, &params).await {
            tracing::error!(error = %err, "cycle aborted, retrying next iteration");
        }
    }

    tracing::info!("shutdown complete");
    Ok(())
}
