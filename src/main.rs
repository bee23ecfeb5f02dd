//! # Dastyar — scheduled posts + litigation cost estimates
//!
//! Usage:
//!   dastyar run                        # Start the trigger loop (Ctrl-C stops)
//!   dastyar tariff 850000000           # Court + attorney fee for a claim (ریال)
//!   dastyar schedule set "قهوه" --times 09:00,18:30
//!   dastyar schedule show

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dastyar_core::DastyarConfig;
use dastyar_scheduler::{
    ExecutionPipeline, HistoryFile, LogNotifier, Notifier, Schedule, ScheduleStore, TriggerEngine,
    WebhookNotifier, spawn_trigger_loop,
};

#[derive(Parser)]
#[command(name = "dastyar", version, about = "🗓️ Dastyar — scheduled posts & tariff estimates")]
struct Cli {
    /// Config file path (default: ~/.dastyar/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the recurring trigger loop.
    Run,
    /// Compute the court fee and attorney fee for a claim value (ریال).
    Tariff { claim_value: f64 },
    /// Inspect or replace the posting schedule.
    #[command(subcommand)]
    Schedule(ScheduleCommand),
}

#[derive(Subcommand)]
enum ScheduleCommand {
    /// Overwrite the schedule with a topic and comma-separated HH:MM slots.
    Set {
        topic: String,
        #[arg(long, value_delimiter = ',')]
        times: Vec<String>,
    },
    /// Print the persisted schedule.
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let config = match &cli.config {
        Some(path) => DastyarConfig::load_from(std::path::Path::new(path))?,
        None => DastyarConfig::load()?,
    };

    match cli.command {
        Command::Run => run(config).await,
        Command::Tariff { claim_value } => {
            let tariff = dastyar_tariff::estimate(claim_value);
            println!("هزینه دادرسی (مرحله بدوی): {} ریال", group_digits(tariff.court_fee));
            println!("حق‌الوکاله وکیل (طبق تعرفه): {} ریال", group_digits(tariff.attorney_fee));
            Ok(())
        }
        Command::Schedule(cmd) => schedule_cmd(&config, cmd),
    }
}

/// Start the trigger loop and block until Ctrl-C.
async fn run(config: DastyarConfig) -> Result<()> {
    let generator = dastyar_providers::create_generator(&config)?;

    let history_path = if config.scheduler.history_path.is_empty() {
        HistoryFile::default_path()
    } else {
        config.scheduler.history_path.clone().into()
    };
    let notifier: Arc<dyn Notifier> = if config.notify.webhook_url.is_empty() {
        Arc::new(LogNotifier)
    } else {
        Arc::new(WebhookNotifier::new(config.notify.webhook_url.clone()))
    };
    let pipeline = Arc::new(ExecutionPipeline::new(
        Arc::from(generator),
        Arc::new(HistoryFile::new(history_path)),
        notifier,
        config.notify.icon.clone(),
    ));

    let engine = TriggerEngine::new(schedule_store(&config));
    let loop_handle = spawn_trigger_loop(engine, pipeline, config.scheduler.tick_secs);

    tokio::signal::ctrl_c().await?;
    // Cancel the timer; in-flight firings finish best-effort.
    loop_handle.abort();
    tracing::info!("👋 Trigger loop stopped");
    Ok(())
}

fn schedule_cmd(config: &DastyarConfig, cmd: ScheduleCommand) -> Result<()> {
    let store = schedule_store(config);
    match cmd {
        ScheduleCommand::Set { topic, times } => {
            store.save(&Schedule::new(topic, times))?;
            println!("Schedule saved to {}", store.path().display());
        }
        ScheduleCommand::Show => match store.load()? {
            Some(schedule) => println!("{}", serde_json::to_string_pretty(&schedule)?),
            None => println!("No schedule configured"),
        },
    }
    Ok(())
}

fn schedule_store(config: &DastyarConfig) -> ScheduleStore {
    if config.scheduler.schedule_path.is_empty() {
        ScheduleStore::new(ScheduleStore::default_path())
    } else {
        ScheduleStore::new(config.scheduler.schedule_path.clone())
    }
}

/// Thousands grouping for ریال display (presentation only; the calculator
/// itself never rounds).
fn group_digits(value: f64) -> String {
    let whole = value.round() as i128;
    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 { format!("-{grouped}") } else { grouped }
}
