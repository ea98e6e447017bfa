//! arXiv Alert CLI
//!
//! Local execution entry point, intended to be run from cron or a systemd
//! timer once per day.

use std::path::PathBuf;

use arxiv_alert::{
    error::Result,
    models::Config,
    pipeline::{RunOptions, run_alert},
    services::{ArxivSource, SmtpMailer},
    storage::LocalHistory,
    utils::time,
};
use clap::{Parser, Subcommand};

/// arXiv Alert - keyword-filtered paper digests by email
#[derive(Parser, Debug)]
#[command(name = "arxiv-alert", version, about = "Fetch and email arXiv papers based on keywords")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, match, and email new papers
    Run {
        /// Run without sending emails or updating history
        #[arg(long)]
        dry_run: bool,

        /// List all fetched papers
        #[arg(long)]
        list_papers: bool,

        /// Run even on weekends
        #[arg(long)]
        force: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Show sent-paper history info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("arXiv Alert starting...");

    match cli.command {
        Command::Run {
            dry_run,
            list_papers,
            force,
        } => {
            let config = Config::load(&cli.config)?;
            config.validate()?;
            log::info!("Loaded configuration from {}", cli.config.display());

            if config.arxiv.skip_weekends && !force && !time::today_is_weekday() {
                log::info!("Today is not a weekday, exiting (use --force to override)");
                return Ok(());
            }

            let source = ArxivSource::new(&config.http)?;
            let store = LocalHistory::new(&config.history.file);
            let notifier = SmtpMailer::new(config.email.clone());
            let options = RunOptions {
                dry_run,
                list_papers,
            };

            let report = run_alert(&config, &source, &store, &notifier, &options).await?;

            log::info!(
                "Run complete: {} fetched, {} matched, delivered: {}, history updated: {}",
                report.fetched,
                report.matched,
                report.delivered,
                report.history_updated
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            let config = Config::load(&cli.config)?;
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }

            log::info!(
                "✓ Config OK ({} categories, {} keyword groups, {} recipients)",
                config.arxiv.categories.len(),
                config.search.keyword_groups.len(),
                config.email.recipients.len()
            );
        }

        Command::Info => {
            let config = Config::load_or_default(&cli.config);
            let store = LocalHistory::new(&config.history.file);

            log::info!("History file: {}", config.history.file);
            match store.read_history().await {
                Some(history) => {
                    log::info!("Sent papers: {}", history.sent_papers.len());
                    match history.last_updated {
                        Some(updated) => log::info!("Last updated: {}", updated),
                        None => log::info!("Last updated: unknown"),
                    }
                }
                None => log::info!("No history found yet."),
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
