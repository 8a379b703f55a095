use analytics::{AnalyticsEngine, build_equity_curve, daily_pnl};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use configuration::{StorageMode, init_logging, load_config, load_config_from};
use core_types::{CashMove, Trade, TradeFilter, TradeOutcome, TradeSide, new_record_id};
use database::{Journal, RecordStore, open_store};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod render;

/// The main entry point for the Tradelog journal.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(mode) = cli.storage {
        config.storage.mode = mode;
        config.validate()?;
    }

    let _log_guard = init_logging(&config.logging)?;

    let store = open_store(&config.storage).await?;
    tracing::debug!(store = store.name(), "Record store ready");

    // Execute the appropriate command
    match cli.command {
        Commands::AddTrade(args) => handle_add_trade(args, &store).await,
        Commands::AddDeposit(args) => handle_add_deposit(args, &store).await,
        Commands::Delete { id } => handle_delete(&id, &store).await,
        Commands::List { json } => handle_list(json, &store).await,
        Commands::Report(args) => handle_report(args, &store).await,
        Commands::Equity(args) => handle_equity(args, &store).await,
        Commands::Daily(args) => handle_daily(args, &store).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A personal trading journal: log trade outcomes and deposits, then review performance.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (defaults to ./config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides `storage.mode` from the configuration.
    #[arg(long, global = true, value_enum)]
    storage: Option<StorageMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a closed trade.
    AddTrade(AddTradeArgs),
    /// Log a deposit (positive) or withdrawal (negative).
    AddDeposit(AddDepositArgs),
    /// Delete a trade or deposit by id.
    Delete {
        id: String,
    },
    /// Show every logged record.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Summary statistics for the selected trades.
    Report(ViewArgs),
    /// The equity curve over the selected trades and deposits.
    Equity(EquityArgs),
    /// P&L per calendar day for the selected trades.
    Daily(ViewArgs),
}

#[derive(Parser)]
struct AddTradeArgs {
    /// The trade date (format: YYYY-MM-DD).
    #[arg(long)]
    date: NaiveDate,

    /// The instrument traded (e.g., "BTCUSDT").
    #[arg(long)]
    asset: String,

    /// long or short.
    #[arg(long)]
    side: TradeSide,

    /// win or loss.
    #[arg(long)]
    outcome: TradeOutcome,

    /// The unsigned amount won or lost.
    #[arg(long)]
    amount: Decimal,

    #[arg(long)]
    note: Option<String>,

    /// Explicit record id; a random one is generated otherwise.
    #[arg(long)]
    id: Option<String>,
}

#[derive(Parser)]
struct AddDepositArgs {
    /// The deposit date (format: YYYY-MM-DD).
    #[arg(long)]
    date: NaiveDate,

    /// Positive for a deposit, negative for a withdrawal.
    #[arg(long, allow_negative_numbers = true)]
    amount: Decimal,

    #[arg(long)]
    note: Option<String>,

    #[arg(long)]
    id: Option<String>,
}

/// Selects the trades under analysis.
#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    asset: Option<String>,

    #[arg(long)]
    side: Option<TradeSide>,

    #[arg(long)]
    outcome: Option<TradeOutcome>,

    /// First day included (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day included (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl FilterArgs {
    fn to_filter(&self) -> TradeFilter {
        TradeFilter {
            asset: self.asset.clone(),
            side: self.side,
            outcome: self.outcome,
            from: self.from,
            to: self.to,
        }
    }

    /// Cash moves only have a date, so only the date bounds apply to them.
    fn select_cash_moves(&self, cash_moves: &[CashMove]) -> Vec<CashMove> {
        cash_moves
            .iter()
            .filter(|c| self.from.is_none_or(|from| c.date >= from))
            .filter(|c| self.to.is_none_or(|to| c.date <= to))
            .cloned()
            .collect()
    }
}

#[derive(Args)]
struct ViewArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct EquityArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Leave deposits out of the curve.
    #[arg(long)]
    trades_only: bool,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

async fn handle_add_trade(args: AddTradeArgs, store: &impl RecordStore) -> anyhow::Result<()> {
    let mut trade = Trade::new(
        args.id.unwrap_or_else(new_record_id),
        args.date,
        args.asset,
        args.side,
        args.outcome,
        args.amount,
    )?;
    if let Some(note) = args.note {
        trade = trade.with_note(note);
    }

    store.insert_trade(&trade).await?;
    println!("Logged trade {}", trade.id);
    Ok(())
}

async fn handle_add_deposit(args: AddDepositArgs, store: &impl RecordStore) -> anyhow::Result<()> {
    let mut cash_move = CashMove::new(
        args.id.unwrap_or_else(new_record_id),
        args.date,
        args.amount,
    );
    if let Some(note) = args.note {
        cash_move = cash_move.with_note(note);
    }

    store.insert_cash_move(&cash_move).await?;
    println!("Logged deposit {}", cash_move.id);
    Ok(())
}

async fn handle_delete(id: &str, store: &impl RecordStore) -> anyhow::Result<()> {
    if store.delete(id).await? {
        println!("Deleted {id}");
    } else {
        anyhow::bail!("No trade or deposit with id '{id}'");
    }
    Ok(())
}

async fn handle_list(json: bool, store: &impl RecordStore) -> anyhow::Result<()> {
    let journal = store.list().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&journal)?);
    } else {
        println!("{}", render::journal_table(&journal));
    }
    Ok(())
}

async fn handle_report(args: ViewArgs, store: &impl RecordStore) -> anyhow::Result<()> {
    let journal: Journal = store.list().await?;
    let trades = args.filter.to_filter().apply(&journal.trades);
    let cash_moves = args.filter.select_cash_moves(&journal.cash_moves);

    let engine = AnalyticsEngine::new();
    let metrics = engine.calculate(&trades)?;
    let account = engine.summarize_account(&trades, &cash_moves)?;

    if args.json {
        let output = serde_json::json!({ "metrics": metrics, "account": account });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render::metrics_table(&metrics, &account));
    }
    Ok(())
}

async fn handle_equity(args: EquityArgs, store: &impl RecordStore) -> anyhow::Result<()> {
    let journal = store.list().await?;
    let trades = args.view.filter.to_filter().apply(&journal.trades);
    let cash_moves = if args.trades_only {
        Vec::new()
    } else {
        args.view.filter.select_cash_moves(&journal.cash_moves)
    };

    let curve = build_equity_curve(&trades, &cash_moves)?;

    if args.view.json {
        println!("{}", serde_json::to_string_pretty(&curve)?);
    } else {
        println!("{}", render::equity_table(&curve));
    }
    Ok(())
}

async fn handle_daily(args: ViewArgs, store: &impl RecordStore) -> anyhow::Result<()> {
    let journal = store.list().await?;
    let trades = args.filter.to_filter().apply(&journal.trades);

    let days = daily_pnl(&trades)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&days)?);
    } else {
        println!("{}", render::daily_table(&days));
    }
    Ok(())
}
