//! Video Wall Control Tool
//!
//! CLI for driving MDC display panels and video-wall arrangements over
//! serial links.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vwall_mdc::mdc::{ControlCommand, Source, EXCLUDED_SOURCES};
use vwall_mdc::{Panel, Wall};

use config::Config;

#[derive(Parser)]
#[command(name = "vwallctl")]
#[command(about = "Control tool for MDC display panels and video walls")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long, default_value = "config/wall.toml")]
    config: String,

    /// Log packets instead of writing to serial ports
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Video wall commands
    Wall {
        #[command(subcommand)]
        action: WallCommands,
    },
    /// Turn panels on or off
    Power {
        /// Panel ID or "all"
        target: Target,
        /// on or off
        state: PowerState,
    },
    /// Select the input source
    Source {
        /// Panel ID or "all"
        target: Target,
        /// Source name (pc, hdmi1, displayport, ...)
        name: String,
    },
    /// Send a raw control command
    Send {
        /// Panel ID or "all"
        target: Target,
        /// Command name (power, volume, wall, ...)
        command: String,
        /// Data bytes, decimal or 0x-prefixed hex
        #[arg(value_parser = parse_byte)]
        data: Vec<u8>,
    },
    /// List control commands and sources
    List,
    /// Show configured panels
    Panels,
}

#[derive(Subcommand)]
enum WallCommands {
    /// Program tile positions and enable wall mode
    On {
        /// Validate every panel's placement before sending anything
        #[arg(long)]
        strict: bool,
    },
    /// Disable wall mode on every panel
    Off,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum PowerState {
    On,
    Off,
}

/// Panels addressed by a command.
#[derive(Clone, Copy, Debug)]
enum Target {
    All,
    Id(u8),
}

impl std::str::FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Target::All);
        }
        parse_byte(s).map(Target::Id)
    }
}

/// Parses a byte given as decimal or `0x` hex.
fn parse_byte(s: &str) -> std::result::Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid byte '{}': {}", s, e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::List = cli.command {
        init_logging(log_filter(cli.verbose, false));
        handle_list();
        return Ok(());
    }

    let loaded = Config::load(&cli.config);
    let debug = loaded
        .as_ref()
        .map_or(cli.debug, |config| config.any_debug(cli.debug));
    init_logging(log_filter(cli.verbose, debug));

    let config =
        loaded.with_context(|| format!("Failed to load configuration from {}", cli.config))?;
    info!(
        "Loaded configuration from: {} ({} panels)",
        cli.config,
        config.panels.len()
    );
    let panels = config.build_panels(cli.debug);

    match cli.command {
        Commands::Wall { action } => handle_wall(action, &panels).await,
        Commands::Power { target, state } => {
            let on = matches!(state, PowerState::On);
            for panel in select(&panels, target)? {
                panel
                    .power(on)
                    .await
                    .with_context(|| format!("Failed to set power on panel {}", panel.id()))?;
            }
            println!("Power {:?}", state);
            Ok(())
        }
        Commands::Source { target, name } => {
            for panel in select(&panels, target)? {
                panel
                    .select_source(&name)
                    .await
                    .with_context(|| format!("Failed to set source on panel {}", panel.id()))?;
            }
            println!("Source set to: {}", name);
            Ok(())
        }
        Commands::Send {
            target,
            command,
            data,
        } => {
            for panel in select(&panels, target)? {
                panel
                    .apply(&command, &data)
                    .await
                    .with_context(|| format!("Failed to send {} to panel {}", command, panel.id()))?;
            }
            println!("Sent {} {:02X?}", command, data);
            Ok(())
        }
        Commands::Panels => {
            handle_panels(&panels);
            Ok(())
        }
        Commands::List => Ok(()),
    }
}

/// Log filter: debug when verbose, info when any panel only logs its
/// packets (so they are visible), warn otherwise.
fn log_filter(verbose: bool, debug: bool) -> &'static str {
    if verbose {
        "debug"
    } else if debug {
        "info"
    } else {
        "warn"
    }
}

fn init_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();
}

/// Resolves a target to configured panels, in wall order.
fn select(panels: &[Panel], target: Target) -> Result<Vec<&Panel>> {
    match target {
        Target::All => Ok(panels.iter().collect()),
        Target::Id(id) => {
            let panel = panels
                .iter()
                .find(|p| p.id() == id)
                .with_context(|| format!("No panel with id {} in configuration", id))?;
            Ok(vec![panel])
        }
    }
}

async fn handle_wall(action: WallCommands, panels: &[Panel]) -> Result<()> {
    let wall = Wall::new(panels.iter().collect());
    if wall.is_empty() {
        anyhow::bail!("No panels configured");
    }

    match action {
        WallCommands::On { strict } => {
            if strict {
                wall.on_checked().await?;
            } else {
                wall.on().await?;
            }
            println!("Wall on ({} panels)", wall.len());
        }
        WallCommands::Off => {
            wall.off().await?;
            println!("Wall off ({} panels)", wall.len());
        }
    }

    Ok(())
}

fn handle_list() {
    println!("Commands:");
    for cmd in ControlCommand::ALL {
        println!("  {:<12} {:#04x}", cmd.name(), cmd.opcode());
    }
    println!("Sources:");
    for source in Source::ALL {
        println!("  {:<12} {:#04x}", source.name(), source.code());
    }
    println!("Unavailable sources (get-only or model-specific):");
    for (name, code) in EXCLUDED_SOURCES {
        println!("  {:<12} {:#04x}", name, code);
    }
}

fn handle_panels(panels: &[Panel]) {
    println!("Panels:");
    for panel in panels {
        println!(
            "  id {:<3} port {:<16} position {:<3} x {:<2} y {:<2}{}",
            panel.id(),
            panel.port(),
            panel.position(),
            panel.x(),
            panel.y(),
            if panel.is_debug() { " (debug)" } else { "" }
        );
    }
}
