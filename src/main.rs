use analytics::{MetricsEngine, PortfolioMetrics, projected_growth};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use configuration::{Config, LogFormat, LoggingConfig};
use core_types::{Allocation, MarketSnapshot, PortfolioKind, PortfolioSet, RiskTolerance};
use ledger::{Decision, ReviewerId, VoteBook, Voter};
use portfolios::{fallback_portfolios, generated_or_fallback};
use projection::{ProfitProjection, ProjectionEngine, initial_investment};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

mod session;
mod store;

use session::SessionContext;

/// The main entry point for the advisor command-line tool.
fn main() -> Result<()> {
    // A missing .env file is fine; it only supplies RUST_LOG and ADVISOR__* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    let _log_guard = init_tracing(&config.logging)?;

    match cli.command {
        Commands::Metrics(args) => handle_metrics(args, &config),
        Commands::Project(args) => handle_project(args, &config),
        Commands::Portfolios(args) => handle_portfolios(args, &config),
        Commands::Vote(args) => handle_vote(args, &config),
        Commands::Decide(args) => handle_decide(args, &config),
        Commands::Reviewer(args) => handle_reviewer(args, &config),
        Commands::Session(command) => handle_session(command, &config),
    }
}

/// Installs the global subscriber: stderr always, plus a daily-rolling file
/// when `[logging].directory` is set. `RUST_LOG` wins over `[logging].level`.
fn init_tracing(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log filter '{}'", logging.level))?;

    let full = (logging.format == LogFormat::Full)
        .then(|| fmt::layer().with_writer(std::io::stderr));
    let compact = (logging.format == LogFormat::Compact)
        .then(|| fmt::layer().compact().with_writer(std::io::stderr));

    let (file, guard) = match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "advisor.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(full)
        .with(compact)
        .with(file)
        .try_init()?;

    Ok(guard)
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Portfolio metrics, profit projections and reward splits for reviewed allocations.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. Missing files fall back to defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Log line layout; overrides `[logging].format`.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute return, risk, diversification and exposure for an allocation.
    Metrics(MetricsArgs),
    /// Project profit over a holding period and split it.
    Project(ProjectArgs),
    /// Show a candidate portfolio pair with metrics and reviewer earnings.
    Portfolios(PortfoliosArgs),
    /// Record a reviewer's vote on a recommendation.
    Vote(VoteArgs),
    /// Record the user's final choice and split its projected profit.
    Decide(DecideArgs),
    /// Show a reviewer's earnings and track record.
    Reviewer(ReviewerArgs),
    /// Inspect or reset the persisted session.
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Args)]
struct AllocationInput {
    /// Weights as `asset=weight` pairs, comma separated (e.g. "eETH=60,Cash/FD=40").
    #[arg(long, value_delimiter = ',', value_parser = parse_weight, conflicts_with = "allocation_file")]
    allocation: Vec<(String, Decimal)>,

    /// A JSON file holding an object of asset -> weight.
    #[arg(long)]
    allocation_file: Option<PathBuf>,
}

#[derive(Args)]
struct MarketArgs {
    /// Base annual yield in percent; overrides `[market].base_yield_pct`.
    #[arg(long)]
    apy: Option<Decimal>,

    /// Reference price of the held asset; overrides `[market].reference_price`.
    #[arg(long)]
    price: Option<Decimal>,
}

#[derive(Args)]
struct MetricsArgs {
    #[command(flatten)]
    allocation: AllocationInput,

    #[command(flatten)]
    market: MarketArgs,

    /// Also print the projected growth checkpoints.
    #[arg(long)]
    growth: bool,
}

#[derive(Args)]
struct ProjectArgs {
    /// Principal in the reference currency. Defaults to holdings x price.
    #[arg(long, conflicts_with = "holdings")]
    principal: Option<Decimal>,

    /// Units of the held asset; overrides `[projection].holdings`.
    #[arg(long)]
    holdings: Option<Decimal>,

    /// Expected annual return in percent. Derived from the allocation when omitted.
    #[arg(long)]
    expected_return: Option<Decimal>,

    /// Holding period in days; overrides `[projection].holding_period_days`.
    #[arg(long)]
    days: Option<u32>,

    #[command(flatten)]
    allocation: AllocationInput,

    #[command(flatten)]
    market: MarketArgs,
}

#[derive(Args)]
struct PortfoliosArgs {
    /// Risk tolerance selecting the fallback pair: low, medium or high.
    #[arg(long, default_value_t = RiskTolerance::default())]
    risk: RiskTolerance,

    /// Portfolio family: etherfi-native or traditional.
    #[arg(long, default_value_t = PortfolioKind::default())]
    kind: PortfolioKind,

    /// A generator response to validate; the fallback pair is used if it is rejected.
    #[arg(long)]
    generated: Option<PathBuf>,

    /// Units of the held asset; overrides `[projection].holdings`.
    #[arg(long)]
    holdings: Option<Decimal>,

    /// Holding period in days; overrides `[projection].holding_period_days`.
    #[arg(long)]
    days: Option<u32>,

    #[command(flatten)]
    market: MarketArgs,

    /// Open a new recommendation for this pair and remember it in the session.
    #[arg(long)]
    save_session: bool,

    /// Anonymous user hash stored alongside the recommendation id.
    #[arg(long, requires = "save_session")]
    user_hash: Option<String>,
}

#[derive(Args)]
struct VoteArgs {
    /// Name of the portfolio being backed.
    #[arg(long)]
    choice: String,

    /// Recommendation to vote on. Defaults to the one in the session.
    #[arg(long)]
    rec_id: Option<Uuid>,

    /// Registered reviewer id. Votes without one are anonymous.
    #[arg(long, requires = "name")]
    reviewer: Option<ReviewerId>,

    /// Display name of the reviewer.
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args)]
struct DecideArgs {
    /// Name of the portfolio the user commits to.
    #[arg(long)]
    choice: String,

    /// Recommendation being decided. Defaults to the one in the session.
    #[arg(long)]
    rec_id: Option<Uuid>,

    /// Units of the held asset; overrides `[projection].holdings`.
    #[arg(long)]
    holdings: Option<Decimal>,

    /// Holding period in days; overrides `[projection].holding_period_days`.
    #[arg(long)]
    days: Option<u32>,

    #[command(flatten)]
    market: MarketArgs,
}

#[derive(Args)]
struct ReviewerArgs {
    /// Registered reviewer id.
    #[arg(long)]
    id: ReviewerId,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Print the current session.
    Show,
    /// Forget the current recommendation.
    Clear,
}

fn parse_weight(s: &str) -> Result<(String, Decimal), String> {
    let (asset, weight) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected asset=weight, got '{s}'"))?;
    let asset = asset.trim();
    if asset.is_empty() {
        return Err(format!("missing asset label in '{s}'"));
    }
    let weight = Decimal::from_str(weight.trim())
        .map_err(|e| format!("invalid weight for '{asset}': {e}"))?;
    Ok((asset.to_string(), weight))
}

impl AllocationInput {
    fn load(&self) -> Result<Option<Allocation>> {
        if let Some(path) = &self.allocation_file {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            return Ok(Some(Allocation::from_json_lenient(&value)?));
        }
        if self.allocation.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.allocation.iter().cloned().collect()))
    }
}

impl MarketArgs {
    fn snapshot(&self, config: &Config) -> MarketSnapshot {
        MarketSnapshot {
            base_yield_pct: Some(self.apy.unwrap_or(config.market.base_yield_pct)),
            reference_price: Some(self.price.unwrap_or(config.market.reference_price)),
            tvl_billions: Some(config.market.tvl_billions),
        }
    }
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_metrics(args: MetricsArgs, config: &Config) -> Result<()> {
    let Some(allocation) = args.allocation.load()? else {
        bail!("Provide --allocation or --allocation-file");
    };
    if !allocation.is_balanced() {
        tracing::warn!(total = %allocation.total_weight(), "Allocation weights do not sum to 100.");
    }

    let market = args.market.snapshot(config);
    let Some(metrics) = MetricsEngine::new().compute_metrics(&allocation, Some(&market)) else {
        println!("Metrics not computable yet: no base yield rate.");
        return Ok(());
    };

    println!("{}", metrics_table(&metrics));

    if args.growth {
        let mut table = Table::new();
        table.set_header(vec!["Checkpoint", "Years", "Indexed value"]);
        for point in projected_growth(&metrics) {
            table.add_row(vec![
                point.label.to_string(),
                point.years.round_dp(2).to_string(),
                point.indexed_value.to_string(),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}

fn handle_project(args: ProjectArgs, config: &Config) -> Result<()> {
    let market = args.market.snapshot(config);
    let days = args.days.unwrap_or(config.projection.holding_period_days);

    let expected_return = match args.expected_return {
        Some(pct) => pct,
        None => {
            let Some(allocation) = args.allocation.load()? else {
                bail!("Provide --expected-return or an allocation to derive it from");
            };
            MetricsEngine::new()
                .compute_metrics(&allocation, Some(&market))
                .map(|m| m.expected_return_pct)
                .context("Metrics not computable: no base yield rate")?
        }
    };

    let principal = match args.principal {
        Some(principal) => principal,
        None => {
            let holdings = args.holdings.unwrap_or(config.projection.holdings);
            initial_investment(holdings, market.reference_price.unwrap_or_default())
        }
    };

    let projection = ProjectionEngine::new().compute_projection(principal, expected_return, days);
    println!("{}", projection_table(&projection));
    Ok(())
}

fn handle_portfolios(args: PortfoliosArgs, config: &Config) -> Result<()> {
    let set: PortfolioSet = match &args.generated {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            generated_or_fallback(Some(&text), args.risk, args.kind)
        }
        None => fallback_portfolios(args.risk, args.kind),
    };

    let market = args.market.snapshot(config);
    let holdings = args.holdings.unwrap_or(config.projection.holdings);
    let days = args.days.unwrap_or(config.projection.holding_period_days);
    let principal = initial_investment(holdings, market.reference_price.unwrap_or_default());

    let metrics_engine = MetricsEngine::new();
    let projection_engine = ProjectionEngine::new();

    let mut table = Table::new();
    table.set_header(vec![
        "Portfolio",
        "Allocation",
        "Return %",
        "Risk",
        "Diversification",
        "Crypto %",
        "Stable %",
        "Reviewer earnings",
    ]);
    for portfolio in &set.portfolios {
        let weights = portfolio
            .allocation
            .iter()
            .map(|(asset, weight)| format!("{asset} {weight}%"))
            .collect::<Vec<_>>()
            .join("\n");
        let Some(metrics) = metrics_engine.compute_metrics(&portfolio.allocation, Some(&market))
        else {
            continue;
        };
        let earnings = projection_engine.reviewer_earnings(principal, &metrics, days);
        table.add_row(vec![
            portfolio.name.clone(),
            weights,
            metrics.expected_return_pct.to_string(),
            format!("{}/10", metrics.risk_score),
            format!("{}/10", metrics.diversification_score),
            metrics.crypto_exposure_pct.to_string(),
            metrics.stable_exposure_pct.to_string(),
            earnings.to_string(),
        ]);
    }
    println!("{table}");
    println!(
        "Principal {principal} over {days} days (risk: {}, kind: {})",
        args.risk, args.kind
    );

    if args.save_session {
        let mut book: VoteBook = store::load_or_default(&config.session.ledger_path)?;
        let rec_id = book.open_offering(set);
        store::save(&config.session.ledger_path, &book)?;

        let mut session = SessionContext::load(&config.session.path)?;
        session.begin(rec_id, args.user_hash);
        session.save(&config.session.path)?;
        println!("Recommendation created! Share ID with reviewers: {rec_id}");
    }
    Ok(())
}

/// Resolves an explicit recommendation id, falling back to the session's.
fn resolve_rec_id(explicit: Option<Uuid>, config: &Config) -> Result<Uuid> {
    match explicit {
        Some(id) => Ok(id),
        None => SessionContext::load(&config.session.path)?
            .rec_id
            .context("No --rec-id given and no recommendation in the session"),
    }
}

fn handle_vote(args: VoteArgs, config: &Config) -> Result<()> {
    let rec_id = resolve_rec_id(args.rec_id, config)?;
    let voter = match (args.reviewer, args.name) {
        (Some(id), Some(name)) => Voter::reviewer(id, name),
        _ => Voter::anonymous(),
    };

    let mut book: VoteBook = store::load_or_default(&config.session.ledger_path)?;
    let offered = &book.get(rec_id)?.portfolios;
    if !offered.portfolios.is_empty() && offered.get(&args.choice).is_none() {
        bail!("'{}' is not one of: {}", args.choice, offered.names().collect::<Vec<_>>().join(", "));
    }

    let tally = book.record_vote(rec_id, voter, &args.choice)?.clone();
    store::save(&config.session.ledger_path, &book)?;

    let mut table = Table::new();
    table.set_header(vec!["Portfolio", "Votes"]);
    for (choice, count) in &tally {
        table.add_row(vec![choice.clone(), count.to_string()]);
    }
    println!("{table}");
    Ok(())
}

fn handle_decide(args: DecideArgs, config: &Config) -> Result<()> {
    let rec_id = resolve_rec_id(args.rec_id, config)?;
    let mut book: VoteBook = store::load_or_default(&config.session.ledger_path)?;
    let allocation = book
        .get(rec_id)?
        .portfolios
        .get(&args.choice)
        .cloned()
        .with_context(|| format!("Recommendation {rec_id} offers no portfolio named '{}'", args.choice))?;

    let market = args.market.snapshot(config);
    let metrics = MetricsEngine::new()
        .compute_metrics(&allocation, Some(&market))
        .context("Metrics not computable: no base yield rate")?;
    let holdings = args.holdings.unwrap_or(config.projection.holdings);
    let days = args.days.unwrap_or(config.projection.holding_period_days);
    let principal = initial_investment(holdings, market.reference_price.unwrap_or_default());
    let projection = ProjectionEngine::new().project_portfolio(principal, &metrics, days);

    book.record_decision(rec_id, Decision::from_projection(&args.choice, &projection, Utc::now()))?;
    store::save(&config.session.ledger_path, &book)?;

    println!("{}", projection_table(&projection));
    Ok(())
}

fn handle_reviewer(args: ReviewerArgs, config: &Config) -> Result<()> {
    let book: VoteBook = store::load_or_default(&config.session.ledger_path)?;
    let profile = book.reviewer_profile(args.id);
    let earnings = book.reviewer_earnings(args.id);

    println!(
        "Reviewer {}: {} votes, {} followed ({}%), earned {} over {} decisions",
        profile.reviewer_id,
        profile.total_votes,
        profile.successful_recommendations,
        profile.success_rate,
        earnings.total_earnings,
        earnings.recommendations_count,
    );

    let mut table = Table::new();
    table.set_header(vec!["Recommendation", "Backed", "User chose", "Followed", "Earnings"]);
    for entry in &profile.vote_history {
        table.add_row(vec![
            entry.rec_id.to_string(),
            entry.recommended.clone(),
            entry.user_chose.clone().unwrap_or_else(|| "pending".to_string()),
            if entry.was_followed { "yes" } else { "no" }.to_string(),
            entry.earnings.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_session(command: SessionCommand, config: &Config) -> Result<()> {
    let path = &config.session.path;
    let mut session = SessionContext::load(path)?;
    match command {
        SessionCommand::Show => {
            match session.rec_id {
                Some(rec_id) => println!("Recommendation: {rec_id}"),
                None => println!("No active recommendation."),
            }
            if let Some(hash) = &session.user_hash {
                println!("User hash: {hash}");
            }
        }
        SessionCommand::Clear => {
            session.clear();
            session.save(path)?;
            println!("Session cleared.");
        }
    }
    Ok(())
}

// ==============================================================================
// Output
// ==============================================================================

fn metrics_table(metrics: &PortfolioMetrics) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Expected return".to_string(), format!("{}%", metrics.expected_return_pct)]);
    table.add_row(vec!["Risk score".to_string(), format!("{}/10", metrics.risk_score)]);
    table.add_row(vec![
        "Diversification".to_string(),
        format!("{}/10", metrics.diversification_score),
    ]);
    table.add_row(vec!["Crypto exposure".to_string(), format!("{}%", metrics.crypto_exposure_pct)]);
    table.add_row(vec!["Stable exposure".to_string(), format!("{}%", metrics.stable_exposure_pct)]);
    table
}

fn projection_table(p: &ProfitProjection) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Item", "Amount"]);
    let rows = [
        ("Initial investment", p.initial_investment),
        ("Expected return %", p.expected_return_pct),
        ("Total profit", p.total_profit),
        ("Final value", p.final_value),
        ("User share (96%)", p.split.user),
        ("Reviewer share (3%)", p.split.reviewer),
        ("Platform share (1%)", p.split.platform),
    ];
    table.add_row(vec!["Period (days)".to_string(), p.period_days.to_string()]);
    for (label, amount) in rows {
        table.add_row(vec![label.to_string(), amount.to_string()]);
    }
    table
}
