//! remit-split: build remittance split transactions from the command line.

mod inspect;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use remit_builder::{
    BuildOptions, BuilderConfig, ContractError, SplitError, SplitTxBuilder, TransactionResult,
};
use remit_client::{KeyCustodian, SorobanRpcClient};
use remit_transactions::{validate_percentages, Envelope, PercentageInput};
use remit_types::NetworkId;
use remit_utils::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "remit-split", version, about = "Remittance split transaction builder")]
struct Cli {
    /// Network to target: "mainnet", "testnet", "futurenet" or "standalone".
    /// When a config file is provided, defaults to the file's network value.
    #[arg(long, global = true, env = "REMIT_NETWORK")]
    network: Option<NetworkId>,

    /// Soroban RPC endpoint (defaults to the network's public endpoint).
    #[arg(long, global = true, env = "REMIT_RPC_URL")]
    rpc_url: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "REMIT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "REMIT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true, env = "REMIT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the transaction that creates a split for OWNER.
    Initialize(BuildArgs),
    /// Build the transaction that changes the split of CALLER.
    Update(BuildArgs),
    /// Decode a base64 XDR envelope and print its contents.
    Inspect {
        /// The serialized transaction.
        xdr: String,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Account (`G...`) that owns or updates the split; also the source account.
    account: String,

    #[arg(long)]
    spending: Option<f64>,
    #[arg(long)]
    savings: Option<f64>,
    #[arg(long)]
    bills: Option<f64>,
    #[arg(long)]
    insurance: Option<f64>,

    /// Split contract (`C...`), overriding the configured one.
    #[arg(long, env = "REMIT_CONTRACT_ID")]
    contract_id: Option<String>,

    /// Pre-execute the transaction and attach the resources, authorization
    /// and fee it reports. Unsimulated output must be prepared before submission.
    #[arg(long)]
    simulate: bool,

    /// Sign with the custodial key from the configured environment variable.
    #[arg(long)]
    custodial: bool,

    /// Fee in stroops (defaults to the network's median inclusion fee).
    #[arg(long)]
    base_fee: Option<u32>,

    /// Validity window in seconds.
    #[arg(long)]
    timeout: Option<u64>,
}

impl BuildArgs {
    fn percentages(&self) -> PercentageInput {
        PercentageInput {
            spending: self.spending,
            savings: self.savings,
            bills: self.bills,
            insurance: self.insurance,
        }
    }

    fn options(&self, network: NetworkId) -> BuildOptions {
        BuildOptions {
            network: Some(network),
            contract_id: self.contract_id.clone(),
            simulate: self.simulate,
            custodial: self.custodial,
            base_fee: self.base_fee,
            timeout_secs: self.timeout,
        }
    }
}

/// File settings as the base, CLI flags and env vars on top.
fn load_config(cli: &Cli) -> anyhow::Result<BuilderConfig> {
    let mut config = match &cli.config {
        Some(path) => BuilderConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => BuilderConfig::default(),
    };
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(url) = &cli.rpc_url {
        config.networks.get_mut(config.network).rpc_url = Some(url.clone());
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn error_json(err: &SplitError) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "kind": err.kind().as_str(),
            "message": err.to_string(),
            "retryable": err.is_retryable(),
        }
    })
}

/// Load the signing key named by `var`. Missing or unusable key material
/// is a signing failure, reported like any other build error.
fn custodian_from_env(var: &str) -> Result<KeyCustodian, SplitError> {
    KeyCustodian::from_env(var).map_err(|e| {
        SplitError::from(ContractError::SigningFailed(format!(
            "loading custodial key from ${var}: {e}"
        )))
    })
}

async fn build(
    config: BuilderConfig,
    command: &Command,
) -> anyhow::Result<Result<TransactionResult, SplitError>> {
    let (args, initialize) = match command {
        Command::Initialize(args) => (args, true),
        Command::Update(args) => (args, false),
        Command::Inspect { .. } => anyhow::bail!("inspect does not build a transaction"),
    };

    let split = match validate_percentages(&args.percentages()) {
        Ok(split) => split,
        Err(e) => return Ok(Err(e.into())),
    };

    let network = config.network;
    let rpc_url = config
        .rpc_url(network)
        .with_context(|| format!("no RPC endpoint known for {network}; pass --rpc-url"))?
        .to_string();
    let ledger = Arc::new(SorobanRpcClient::new(rpc_url)?);

    let options = args.options(network);
    let mut builder = SplitTxBuilder::new(config, ledger);
    if options.custodial {
        let custodian = match custodian_from_env(&builder.config().custodial_secret_env) {
            Ok(custodian) => custodian,
            Err(e) => return Ok(Err(e)),
        };
        builder = builder.with_custodian(Arc::new(custodian));
    }

    let result = if initialize {
        builder
            .build_initialize_split_tx(&args.account, &split, &options)
            .await
    } else {
        builder
            .build_update_split_tx(&args.account, &split, &options)
            .await
    };
    Ok(result)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level)?;

    match &cli.command {
        Command::Inspect { xdr } => {
            let envelope = Envelope::from_base64(xdr).context("decoding transaction envelope")?;
            let network = config.network;
            let summary = inspect::summarize(&envelope, network, config.passphrase(network));
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        command => match build(config, command).await? {
            Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            Err(e) => {
                tracing::error!(kind = %e.kind(), "build failed: {e}");
                println!("{}", serde_json::to_string_pretty(&error_json(&e))?);
                std::process::exit(1);
            }
        },
    }
    Ok(())
}
