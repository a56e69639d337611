use anyhow::Result;
use clap::{Parser, Subcommand};
use iftar_countdown::OutputFormat;
use iftar_countdown::commands;
use iftar_countdown::config;
use iftar_countdown::logging::{LoggingConfig, init_logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iftar")]
#[command(about = "Live countdown to Maghrib for breaking the fast")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Config file (default ~/.iftar-countdown/config.toml)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "City to look up prayer times for")]
    city: Option<String>,
    #[arg(long, global = true, help = "Country of the city")]
    country: Option<String>,
    #[arg(long, global = true, help = "Prayer time calculation method code")]
    method: Option<u8>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the live countdown (default)
    Watch,
    /// Print the current countdown once and exit
    Status {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Get {
        key: String,
    },
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_path()?,
    };

    // Init must work even when the existing file is unreadable
    if let Some(Commands::Config {
        action: ConfigAction::Init { force },
    }) = &cli.command
    {
        return commands::config::init(&config_path, *force);
    }

    let loaded = config::load(&config_path)?;
    let found = loaded.is_some();
    let config = loaded
        .unwrap_or_default()
        .with_overrides(cli.city.clone(), cli.country.clone(), cli.method);
    config.validate()?;

    init_logging(LoggingConfig {
        env_filter: config.logging.level.clone(),
        ..Default::default()
    });
    if !found {
        log::warn!(
            "No config found at {}, using built-in defaults",
            config_path.display()
        );
    }
    if !config.location.is_complete() {
        log::warn!("city or country not set; prayer times cannot be looked up");
    }

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => {
            tokio::runtime::Runtime::new()?.block_on(commands::watch::watch(&config))?;
        }
        Commands::Status { format } => {
            let ok =
                tokio::runtime::Runtime::new()?.block_on(commands::status::status(&config, format))?;
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::List => commands::config::list(&config)?,
            ConfigAction::Get { key } => commands::config::get(&key, &config)?,
            ConfigAction::Init { force } => commands::config::init(&config_path, force)?,
        },
    }

    Ok(())
}
