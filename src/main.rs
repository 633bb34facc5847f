// taper-remote - keyboard and terminal remote for the taper daemon
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::sync::{Arc, Mutex};

use taper_remote::cli::{self, badge_from_config, Trigger};
use taper_remote::client::{DaemonClient, DaemonConfig, LevelControl};
use taper_remote::config::{config_path, load_config, Config};
use taper_remote::errors::connection_refused_error;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "taper-remote")]
#[command(about = "Keyboard and terminal remote for the taper throttling daemon", version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Raise the throttle level by one (bind to a keyboard shortcut)
    #[command(visible_aliases = ["up", "throttle_up"])]
    Increase,
    /// Lower the throttle level by one (bind to a keyboard shortcut)
    #[command(visible_aliases = ["down", "throttle_down"])]
    Decrease,
    /// Set the throttle level; out-of-range values are clamped to 1..=10
    Set {
        #[arg(allow_negative_numbers = true)]
        level: i64,
    },
    /// Show the daemon's current level and profile
    Status,
    /// Open the interactive panel (default)
    Panel,
}

/// Where log output goes
enum LogTarget {
    Stderr,
    /// The panel owns the terminal, so logs go to a file
    File,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic handler to cleanup terminal on panic
    install_panic_handler();

    let args = Args::parse();
    let config = load_config()?;

    let command = match args.command {
        Some(command) => command,
        None if io::stdout().is_terminal() => Command::Panel,
        None => Command::Status,
    };

    let log_target = match command {
        Command::Panel => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    init_tracing(&config, log_target)?;

    let client = DaemonClient::new(DaemonConfig::from_client_config(&config.client))?;

    match command {
        Command::Increase => run_trigger(&client, &config, Trigger::Increase).await,
        Command::Decrease => run_trigger(&client, &config, Trigger::Decrease).await,
        Command::Set { level } => {
            let badge = badge_from_config(&config.badge);
            cli::set_level(&client, badge.as_ref(), level).await;
            Ok(())
        }
        Command::Status => run_status(&client, &config).await,
        Command::Panel => cli::tui::run_panel(Arc::new(client)).await,
    }
}

/// Run one step command; daemon failures surface in the badge only
async fn run_trigger(client: &DaemonClient, config: &Config, trigger: Trigger) -> Result<()> {
    let badge = badge_from_config(&config.badge);
    cli::handle_trigger(client, badge.as_ref(), trigger).await;
    Ok(())
}

async fn run_status(client: &DaemonClient, config: &Config) -> Result<()> {
    match client.fetch_status().await {
        Ok(status) => {
            println!("Level: {}", status.effective_level());
            if let Some(profile) = status.profile {
                println!("Profile: {}", profile.summary());
            }
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Status failed: {}", e);
            let path = config_path().map(|p| p.display().to_string());
            anyhow::bail!(connection_refused_error(
                &config.client.daemon_address,
                path.as_deref()
            ))
        }
    }
}

fn install_panic_handler() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Emergency terminal cleanup
        use crossterm::{cursor, event, execute, terminal};
        let _ = terminal::disable_raw_mode();
        let _ = execute!(
            std::io::stdout(),
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );

        default_panic(info);
    }));
}

/// Initialize tracing
///
/// Default level is INFO, overridden by RUST_LOG. `debug_logging` in the
/// config file or TAPER_DEBUG=1 forces DEBUG.
fn init_tracing(config: &Config, target: LogTarget) -> Result<()> {
    let show_debug = config.debug_logging
        || std::env::var("TAPER_DEBUG")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

    let env_filter = if show_debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(false),
                )
                .init();
        }
        LogTarget::File => {
            let log_dir = dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".taper");
            std::fs::create_dir_all(&log_dir)
                .with_context(|| format!("Failed to create directory: {}", log_dir.display()))?;
            let log_path = log_dir.join("remote.log");
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .init();
        }
    }

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
    Ok(())
}
