use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use monta::client::{DateRange, ListChargePointsRequest, ListChargesRequest, ListWalletTransactionsRequest, PageRequest};
use monta::config::proc_loader::{build_client, file_to_config, write_credential};
use monta::model::ChargeState;
use monta::utils::logging::{self, LogLevel};
use monta::{CancellationToken, Client};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "monta.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current credential, issuing or refreshing it if needed
    Token,
    /// List charges
    Charges {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        charge_point_id: Option<i64>,
        #[arg(long)]
        team_id: Option<i64>,
        /// Charge state, e.g. `charging` or `completed`
        #[arg(long)]
        state: Option<ChargeState>,
        #[command(flatten)]
        created: CreatedArgs,
    },
    /// Get a single charge
    Charge { id: i64 },
    /// List charge points
    ChargePoints {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        site_id: Option<i64>,
        #[arg(long)]
        team_id: Option<i64>,
    },
    /// Get a single charge point
    ChargePoint { id: i64 },
    /// List wallet transactions
    WalletTransactions {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        created: CreatedArgs,
    },
    /// Get a single wallet transaction
    WalletTransaction { id: i64 },
}

#[derive(clap::Args)]
struct PageArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    per_page: Option<u32>,
}

#[derive(clap::Args)]
struct CreatedArgs {
    /// RFC 3339, inclusive
    #[arg(long)]
    from: Option<DateTime<Utc>>,
    /// RFC 3339, inclusive
    #[arg(long)]
    to: Option<DateTime<Utc>>,
}

impl From<CreatedArgs> for DateRange {
    fn from(args: CreatedArgs) -> Self {
        DateRange {
            from: args.from,
            to: args.to,
        }
    }
}

impl From<PageArgs> for PageRequest {
    fn from(args: PageArgs) -> Self {
        PageRequest {
            page: args.page,
            per_page: args.per_page,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config, init logging
    // -------------------------------

    let args = Args::parse();
    let service_config = file_to_config(Path::new(&args.config)).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Create client
    // -------------------------------

    let client = build_client(&service_config.client).await?;

    // -------------------------------
    // 3. Cancel in-flight work on Ctrl-C
    // -------------------------------

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, cancelling");
                cancel.cancel();
            }
        }
    });

    // -------------------------------
    // 4. Run command
    // -------------------------------

    let result = run(&client, args.command, &cancel).await;

    // -------------------------------
    // 5. Persist the credential for the next run
    // -------------------------------

    if let (Some(path), Some(credential)) = (&service_config.client.credential_file, client.credential().await) {
        write_credential(Path::new(path), &credential).await?;
        info!("credential saved to '{}'", path);
    }

    result
}

async fn run(client: &Client, command: Command, cancel: &CancellationToken) -> Result<()> {
    match command {
        Command::Token => print_json(&client.acquire_credential(cancel).await?),
        Command::Charges {
            page,
            charge_point_id,
            team_id,
            state,
            created,
        } => {
            let request = ListChargesRequest {
                page: page.into(),
                created: created.into(),
                charge_point_id,
                team_id,
                state,
            };
            print_json(&client.list_charges(&request, cancel).await?)
        }
        Command::Charge { id } => print_json(&client.get_charge(id, cancel).await?),
        Command::ChargePoints { page, site_id, team_id } => {
            let request = ListChargePointsRequest {
                page: page.into(),
                site_id,
                team_id,
            };
            print_json(&client.list_charge_points(&request, cancel).await?)
        }
        Command::ChargePoint { id } => print_json(&client.get_charge_point(id, cancel).await?),
        Command::WalletTransactions { page, created } => {
            let request = ListWalletTransactionsRequest {
                page: page.into(),
                created: created.into(),
            };
            print_json(&client.list_wallet_transactions(&request, cancel).await?)
        }
        Command::WalletTransaction { id } => print_json(&client.get_wallet_transaction(id, cancel).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
