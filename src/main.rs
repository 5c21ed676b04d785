use auction_batch::notify::LogNotifier;
use auction_batch::persistence::JsonFileStore;
use auction_batch::{AuctionCloser, Clock, CloserOptions, Evaluator, FixedClock, PaymentGenerator, SystemClock};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Closes overdue auctions and generates their payments")]
struct Cli {
    /// JSON file holding auctions and payments
    #[arg(long, env = "AUCTION_STORE", default_value = "auctions.json")]
    store: PathBuf,

    /// Age in days at which an open auction is closed
    #[arg(long, env = "AUCTION_CLOSE_AFTER_DAYS", default_value_t = 7)]
    close_after_days: i64,

    /// Run as if the current time were this RFC 3339 instant
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Close auctions that have been open long enough
    Close,
    /// Create payments for closed auctions
    GeneratePayments,
    /// Close, then generate payments
    Run,
}

fn clock(cli: &Cli) -> Box<dyn Clock> {
    match cli.now {
        Some(now) => Box::new(FixedClock::new(now)),
        None => Box::new(SystemClock),
    }
}

fn close(cli: &Cli, store: &JsonFileStore) -> Result<(), Box<dyn std::error::Error>> {
    let notifier = LogNotifier;
    let options = CloserOptions { close_after: Duration::days(cli.close_after_days) };
    let mut closer = AuctionCloser::new(store, &notifier)
        .with_clock(clock(cli))
        .with_options(options);
    let report = closer.close()?;
    info!("{} auctions closed, {} failures", closer.total_closed(), report.failures.len());
    Ok(())
}

fn generate_payments(cli: &Cli, store: &JsonFileStore) -> Result<(), Box<dyn std::error::Error>> {
    let generator = PaymentGenerator::new(store, store, Evaluator::new())
        .with_clock(clock(cli));
    let payments = generator.generate()?;
    info!("{} payments generated", payments.len());
    Ok(())
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::open(&cli.store)?;
    info!("Using store {}", store.path().display());

    match cli.command {
        Command::Close => close(cli, &store),
        Command::GeneratePayments => generate_payments(cli, &store),
        Command::Run => {
            close(cli, &store)?;
            generate_payments(cli, &store)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("auction_batch=info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
