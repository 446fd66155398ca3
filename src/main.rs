use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

mod domain;
mod application;
mod infrastructure;
mod plugins;

use application::errors::ConfigError;
use application::events::{
    CommandErrorHandler, CommandLogHandler, EventDispatcher, InteractionErrorHandler,
    PuzzleDataHandler, RegistrySyncHandler,
};
use application::keys;
use application::lifecycle::Orchestrator;
use application::sync::CommandRegistrySync;
use domain::traits::{CommandRegistry, EventLog, Gateway};
use infrastructure::adapters::console::ConsoleGateway;
use infrastructure::adapters::discord::{DiscordCommandRegistry, LoggingCommandRegistry};
use infrastructure::config::Config;
use infrastructure::logging::{self, TracingEventLog};
use infrastructure::plugins::{DirectorySource, PluginLoader};
use infrastructure::puzzle_data::PuzzleDataInitializer;
use infrastructure::storage::JsonStateStore;

#[derive(Parser)]
#[command(name = "puzzle-bot")]
#[command(about = "Puzzle collection bot for Discord servers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides DISCORD_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
    /// Rewrite the state file with normalized keys
    NormalizeData,
}

fn main() -> ExitCode {
    logging::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Version => {
            println!("puzzle-bot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(),
        Commands::NormalizeData => normalize_data(&cli.config),
    }
}

fn load_config(config_path: &str, token_override: Option<String>) -> Result<Config, ConfigError> {
    let mut config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        tracing::warn!("Config file {} not found, using defaults", config_path);
        Config::default()
    };

    config.apply_env()?;
    if token_override.is_some() {
        config.discord.token = token_override;
    }
    Ok(config)
}

fn run_bot(config_path: &str, token_override: Option<String>) -> ExitCode {
    let config = match load_config(config_path, token_override) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting {}", config.bot.name);

    let log: Arc<dyn EventLog> = Arc::new(TracingEventLog);
    let registry: Arc<dyn CommandRegistry> = match (config.discord.application_id, &config.discord.token) {
        (Some(app_id), Some(token)) => Arc::new(DiscordCommandRegistry::new(
            token.clone(),
            app_id,
            config.discord.api_base.clone(),
        )),
        _ => {
            tracing::warn!("No application id configured; command sync is a dry run");
            Arc::new(LoggingCommandRegistry)
        }
    };

    // Ready handlers run in this order: puzzle data, then the one-shot sync
    let dispatcher = EventDispatcher::new(log.clone())
        .with_handler(PuzzleDataHandler::new(Arc::new(PuzzleDataInitializer)))
        .with_handler(RegistrySyncHandler::new(CommandRegistrySync::new(registry, log.clone())))
        .with_handler(CommandLogHandler::new(log.clone()))
        .with_handler(CommandErrorHandler::new(log.clone()))
        .with_handler(InteractionErrorHandler::new(log));

    let catalog = plugins::builtin_catalog();
    tracing::debug!("Compiled-in plugins: {:?}", catalog.names());
    let loader = PluginLoader::new(
        Box::new(DirectorySource::new(config.plugins.directory.clone())),
        config.plugins.excluded.clone(),
        catalog,
    );

    let prefix = config.bot.prefix.clone();
    let mut orchestrator = Orchestrator::new(
        config.discord.token.clone(),
        config.scope(),
        Arc::new(JsonStateStore::new(config.storage.path.clone())),
        loader,
        dispatcher,
        Box::new(move |_token: &str| Box::new(ConsoleGateway::stdin(prefix)) as Box<dyn Gateway>),
    );

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = rt.block_on(orchestrator.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }));

    // A pending console read must not hold up process exit
    rt.shutdown_background();

    match result {
        Ok(reason) => {
            tracing::info!("Stopped: {:?}", reason);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn normalize_data(config_path: &str) -> ExitCode {
    let config = match load_config(config_path, None) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = JsonStateStore::new(config.storage.path.clone());
    match rt.block_on(keys::normalize_stored(&store)) {
        Ok(state) => {
            tracing::info!(
                "Normalized {}: {} puzzles, {} piece sets",
                config.storage.path.display(),
                state.puzzles.len(),
                state.pieces.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to normalize {}: {}", config.storage.path.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_config() -> ExitCode {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
