use anyhow::Context;
use asset_ledger::{
    build_dispatcher, open_store, state_root, Config, Invocation, Operation, ResponseView,
    StoreBackend,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::info;

#[derive(Parser)]
#[command(name = "asset-ledger-cli")]
#[command(about = "Asset Ledger CLI - record, query, and transfer asset records")]
#[command(version = "1.0.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "asset-ledger.toml", env = "ASSET_LEDGER_CONFIG")]
    config: PathBuf,

    /// State file (overrides config file)
    #[arg(long, env = "ASSET_LEDGER_STATE")]
    state_file: Option<PathBuf>,

    /// Use a throwaway in-memory store
    #[arg(long)]
    memory: bool,

    /// Print the full response envelope as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the ledger with the eleven sample assets
    Init,

    /// Show one asset by key
    Query {
        key: String,
    },

    /// List every asset in the scan range
    QueryAll,

    /// Create or overwrite an asset
    Record {
        key: String,
        cost: String,
        location: String,
        item: String,
        holder: String,
    },

    /// Transfer an asset to a new holder
    ChangeHolder {
        key: String,
        holder: String,
    },

    /// Dispatch an operation by name with raw arguments
    Invoke {
        function: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the state root of the scan range
    StateRoot,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(path) = cli.state_file {
        config.store.path = path;
    }
    if cli.memory {
        config.store.backend = StoreBackend::Memory;
    }

    init_tracing(&config)?;
    info!(
        backend = ?config.store.backend,
        path = %config.store.path.display(),
        "opening ledger store"
    );

    let store = open_store(&config)?;
    let dispatcher = build_dispatcher(&config, store);

    let invocation = match cli.command {
        Commands::Init => Invocation::new(Operation::InitLedger.name(), Vec::<String>::new()),
        Commands::Query { key } => Invocation::new(Operation::QueryAsset.name(), [key]),
        Commands::QueryAll => {
            Invocation::new(Operation::QueryAllAsset.name(), Vec::<String>::new())
        }
        Commands::Record {
            key,
            cost,
            location,
            item,
            holder,
        } => Invocation::new(
            Operation::RecordAsset.name(),
            [key, cost, location, item, holder],
        ),
        Commands::ChangeHolder { key, holder } => {
            Invocation::new(Operation::ChangeAssetHolder.name(), [key, holder])
        }
        Commands::Invoke { function, args } => Invocation::new(function, args),
        Commands::StateRoot => {
            let (start, end) = dispatcher.service().scan_range();
            println!("{}", state_root(dispatcher.service().store(), start, end)?);
            return Ok(());
        }
    };

    let response = dispatcher.invoke(&invocation);
    if cli.json {
        println!("{}", serde_json::to_string(&ResponseView::from(&response))?);
        if !response.is_ok() {
            process::exit(1);
        }
        return Ok(());
    }

    if !response.is_ok() {
        anyhow::bail!(response.message);
    }
    if !response.payload.is_empty() {
        println!("{}", response.payload);
    }
    Ok(())
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::try_new(&config.log.filter)
            .with_context(|| format!("invalid log filter {:?}", config.log.filter))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
