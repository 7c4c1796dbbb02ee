use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use questionnaire_server::AppConfig;
use questionnaire_server::commands;

#[derive(Parser)]
#[command(name = "questionnaire", version, about = "Run conditional surveys")]
struct Cli {
    /// Path to config file
    #[arg(short, long, env = "QUESTIONNAIRE_CONFIG", default_value = "questionnaire.toml")]
    config: PathBuf,

    /// Survey definition (overrides the config file)
    #[arg(long, env = "QUESTIONNAIRE_SURVEY")]
    survey: Option<PathBuf>,

    /// Response database (overrides the config file)
    #[arg(long, env = "QUESTIONNAIRE_DATABASE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API (default)
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,
    },
    /// Take the survey in the terminal
    Take {
        /// Disable colors
        #[arg(long)]
        plain: bool,
    },
    /// Export all responses as CSV
    Export {
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show response counts and completion per session
    Stats,
    /// Validate the survey definition
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("questionnaire=info,warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(survey) = cli.survey {
        config.survey.path = survey;
    }
    if let Some(database) = cli.database {
        config.storage.database = database;
    }

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            commands::serve(&config).await
        }
        Commands::Take { plain } => commands::take(&config, plain),
        Commands::Export { output } => commands::export(&config, output).map(|_| ()),
        Commands::Stats => commands::stats(&config),
        Commands::Check => commands::check(&config).map(|_| ()),
    }
}
