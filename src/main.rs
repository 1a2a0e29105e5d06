//! ledger-query: read-only queries against a permissioned ledger network.
//!
//! ```text
//! ledger-query --config network.toml channels --peer peer0.org1.example.com
//! ledger-query --config network.toml info --channel mychannel
//! ledger-query --config network.toml block --channel mychannel --index 3
//! ledger-query --config network.toml block --channel mychannel --hash 9f86d0...
//! ledger-query --config network.toml tx --channel mychannel --id 4a1b...
//! ```
//!
//! Results are printed as pretty JSON on stdout; logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use fabric_ledger_query::config::{load_config, ClientConfig};
use fabric_ledger_query::observability::logging;
use fabric_ledger_query::{query, TransactionId};

#[derive(Parser)]
#[command(name = "ledger-query")]
#[command(about = "Read-only channel and ledger queries", long_about = None)]
struct Cli {
    /// Connection profile (TOML).
    #[arg(short, long, default_value = "network.toml")]
    config: PathBuf,

    /// User to act as (defaults to client.user).
    #[arg(short, long)]
    user: Option<String>,

    /// Organization to act for (defaults to client.organization).
    #[arg(short, long)]
    org: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the channels a peer has joined
    Channels {
        #[arg(long)]
        peer: String,
    },
    /// Show height and tip hashes of a channel
    Info {
        #[arg(long)]
        channel: String,
    },
    /// Fetch a block by number or by hash
    Block {
        #[arg(long)]
        channel: String,
        #[arg(long, conflicts_with = "hash", required_unless_present = "hash")]
        index: Option<u64>,
        /// Block hash in hex
        #[arg(long)]
        hash: Option<String>,
    },
    /// Fetch a committed transaction
    Tx {
        #[arg(long)]
        channel: String,
        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Logging comes up before the SDK so its startup events are captured.
    // A broken profile is reported by new_sdk below.
    let observability = load_config(&cli.config)
        .map(|config| config.observability)
        .unwrap_or_default();
    logging::init_logging(&observability);

    let sdk = query::new_sdk(&cli.config)?;
    let (user, org) = identity(&sdk.config().client, cli.user, cli.org)?;
    tracing::debug!(user = %user, org = %org, "Resolved caller identity");

    match cli.command {
        Commands::Channels { peer } => {
            let channels = query::query_channels(&sdk, &peer, &user, &org).await?;
            print_json(&channels)
        }
        Commands::Info { channel } => {
            let info = query::query_block_info(&sdk, &channel, &user, &org).await?;
            print_json(&info)
        }
        Commands::Block {
            channel,
            index,
            hash,
        } => {
            let block = match (index, hash) {
                (Some(index), _) => {
                    query::query_block_by_index(&sdk, &channel, &user, &org, index).await?
                }
                (None, Some(hash)) => {
                    let hash = parse_block_hash(&hash)?;
                    query::query_block_by_hash(&sdk, &channel, &user, &org, &hash).await?
                }
                (None, None) => return Err("either --index or --hash is required".into()),
            };
            print_json(&block)
        }
        Commands::Tx { channel, id } => {
            let tx_id = TransactionId::from(id);
            let tx = query::query_tx_by_id(&sdk, &channel, &user, &org, &tx_id).await?;
            print_json(&tx)
        }
    }
}

/// Caller identity: command-line flags first, then the profile defaults.
fn identity(
    client: &ClientConfig,
    user: Option<String>,
    org: Option<String>,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    let user = user
        .or_else(|| client.user.clone())
        .ok_or("no --user given and client.user is not set")?;
    let org = org
        .or_else(|| client.organization.clone())
        .ok_or("no --org given and client.organization is not set")?;
    Ok((user, org))
}

/// Hex block hash, with or without a `0x` prefix.
fn parse_block_hash(raw: &str) -> Result<Vec<u8>, String> {
    hex::decode(raw.trim_start_matches("0x")).map_err(|e| format!("invalid block hash: {}", e))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
