
use crate::bus::DeliveryBus;
use crate::config::credentials::{CREDENTIAL_NAMES, get_credential_value};
use crate::config::{Config, get_config_path, load_config};
use crate::gateway::NotificationState;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "brainrelay")]
#[command(about = "Discord bot that relays DMs and button clicks to a remote Brain service")]
#[command(version = crate::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve the push endpoint
    Run {
        /// Config file (default: ~/.brainrelay/config.json)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
    /// Validate configuration and print the effective (redacted) values
    Check {
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => {
            run_relay(config.as_deref()).await?;
        }
        Commands::Check { config } => {
            check_command(config.as_deref())?;
        }
    }

    Ok(())
}

fn resolve_config_path(config_path: Option<&Path>) -> PathBuf {
    match config_path {
        Some(path) => path.to_path_buf(),
        None => get_config_path().unwrap_or_else(|_| PathBuf::from("config.json")),
    }
}

fn check_command(config_path: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(config_path);
    let config = load_config(Some(path.as_path()))?;
    print!("{}", check_report(&config, &path));
    Ok(())
}

/// Human-readable summary printed by `brainrelay check`. Secrets never appear.
fn check_report(config: &Config, path: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Config: {} {}",
        path.display(),
        if path.exists() { "✓" } else { "(not found, using defaults)" }
    );
    let _ = writeln!(out, "\nCredentials:");
    for name in CREDENTIAL_NAMES {
        let set = get_credential_value(config, name).is_some_and(|v| !v.is_empty());
        let _ = writeln!(out, "  {}: {}", name, if set { "✓" } else { "not set" });
    }
    let _ = writeln!(out, "\nEffective configuration:\n{:#?}", config);
    let _ = writeln!(out, "\nConfiguration OK");
    out
}

async fn run_relay(config_path: Option<&Path>) -> Result<()> {
    info!("Loading configuration...");
    let config = load_config(config_path)?;
    info!(
        "Configuration loaded. Brain at {}, push endpoint on {}:{}",
        config.brain.url, config.server.host, config.server.port
    );

    let mut bus = DeliveryBus::new(config.server.queue_capacity);
    let delivery_rx = bus
        .take_delivery_rx()
        .context("delivery receiver already taken")?;

    let state = NotificationState::new(
        &config.brain.secret_key,
        &config.server.status_text,
        bus.queue(),
    );
    let mut server_task =
        crate::gateway::start(&config.server.host, config.server.port, state).await?;

    start_discord(&config, delivery_rx, &mut server_task).await
}

#[cfg(feature = "channel-discord")]
async fn start_discord(
    config: &Config,
    delivery_rx: tokio::sync::mpsc::Receiver<crate::bus::DeliveryTask>,
    server_task: &mut tokio::task::JoinHandle<()>,
) -> Result<()> {
    use crate::brain::BrainClient;
    use crate::channels::discord::DiscordClient;
    use crate::relay::RelayCore;
    use std::sync::Arc;

    let brain = BrainClient::new(&config.brain)?;
    let client = DiscordClient::new(&config.discord.token).await?;
    let gateway = Arc::new(client.gateway());
    let relay = Arc::new(RelayCore::new(brain, gateway, config.replies.clone()));

    let worker_relay = relay.clone();
    let mut delivery_task = tokio::spawn(async move {
        worker_relay.run_deliveries(delivery_rx).await;
    });

    let mut discord = client.start(relay);
    info!("All services started. Relay is running.");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
        }
        () = discord.stopped() => {
            warn!("Discord client stopped");
        }
        _ = &mut *server_task => {
            warn!("notification server stopped");
        }
        _ = &mut delivery_task => {
            warn!("delivery worker stopped");
        }
    }

    discord.shutdown().await;
    server_task.abort();
    delivery_task.abort();
    Ok(())
}

#[cfg(not(feature = "channel-discord"))]
async fn start_discord(
    _config: &Config,
    _delivery_rx: tokio::sync::mpsc::Receiver<crate::bus::DeliveryTask>,
    server_task: &mut tokio::task::JoinHandle<()>,
) -> Result<()> {
    server_task.abort();
    anyhow::bail!("brainrelay was built without the channel-discord feature")
}
