use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// weekmenu - weekly dish schedule
#[derive(Parser)]
#[command(name = "weekmenu")]
#[command(about = "Browse the weekly dish schedule by ISO week", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the navigation server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Manage schedule weeks
    Week {
        #[command(subcommand)]
        command: cli::week::WeekCommand,
    },
    /// Manage sessions
    Session {
        #[command(subcommand)]
        command: cli::session::SessionCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = weekmenu::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    weekmenu::observability::init_observability(
        "weekmenu",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::migrate::migrate(config).await,
        Commands::Week { command } => cli::week::run(config, command).await,
        Commands::Session { command } => cli::session::run(config, command),
    }
}
