//! Command-line entry point: serve the HTTP surface or run one-shot
//! aggregation/underwriting against the configured sources.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trustline_core::{Config, SignalRequest, UnderwritingPipeline};

#[derive(Parser)]
#[command(name = "trustline", version, about = "Reputation-backed underwriting service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1:3000", env = "TRUSTLINE_BIND")]
        bind: String,
    },
    /// Aggregate a reputation profile and print it.
    Profile {
        #[command(flatten)]
        signals: SignalArgs,
    },
    /// Run one underwriting decision and print it.
    Score {
        #[command(flatten)]
        signals: SignalArgs,
        /// Requested collateral asset (e.g. BTC, SPY).
        #[arg(long)]
        asset: String,
    },
}

#[derive(clap::Args)]
struct SignalArgs {
    /// Developer-history username.
    #[arg(long)]
    developer: Option<String>,
    /// Q&A-reputation numeric user id.
    #[arg(long)]
    qa_id: Option<u64>,
    /// Wallet address for on-chain activity.
    #[arg(long)]
    wallet: Option<String>,
}

impl From<SignalArgs> for SignalRequest {
    fn from(args: SignalArgs) -> Self {
        Self {
            developer_id: args.developer,
            qa_id: args.qa_id,
            wallet_address: args.wallet,
        }
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("fatal: {e:?}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env();

    match cli.command {
        Commands::Serve { bind } => {
            let pipeline = Arc::new(UnderwritingPipeline::new(config)?);
            trustline_server::serve(&bind, pipeline).await
        }
        Commands::Profile { signals } => {
            let pipeline = UnderwritingPipeline::new(config)?;
            let profile = pipeline.reputation(&signals.into()).await;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
        Commands::Score { signals, asset } => {
            let pipeline = UnderwritingPipeline::new(config)?;
            let result = pipeline.underwrite(&signals.into(), &asset).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}
