use clap::{Args, Parser, Subcommand};
use scorekeeper_core::ScorekeeperConfig;
use scorekeeper_server::{AppState, Server};
use scorekeeper_store::PgStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scorekeeper", version, about = "Players, games and scores over HTTP")]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "info", "scorekeeper_store=debug").
    #[arg(long, global = true, env = "SCOREKEEPER_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server.
    Serve {
        #[command(flatten)]
        common: CommonArgs,

        /// Bind address, overrides `server.listen`.
        #[arg(long)]
        listen: Option<String>,
    },

    /// Apply the schema migrations and exit.
    Migrate {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Path to the YAML configuration file. Defaults apply when it does not exist.
    #[arg(long, env = "SCOREKEEPER_CONFIG", default_value = "scorekeeper.yaml")]
    config: PathBuf,

    /// PostgreSQL connection URL, overrides every database setting in the file.
    #[arg(long = "database-url")]
    database_url: Option<String>,
}

impl CommonArgs {
    fn load(&self) -> anyhow::Result<ScorekeeperConfig> {
        let mut config = ScorekeeperConfig::load_or_default(&self.config)?;
        if let Some(url) = &self.database_url {
            config.database.database_url_env = None;
            config.database.database_url = Some(url.clone());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.cmd {
        Command::Serve { common, listen } => {
            let mut config = common.load()?;
            if let Some(listen) = listen {
                config.server.listen = listen;
            }

            let store = PgStore::connect(&config.database).await?;
            if config.database.run_migrations {
                store.migrate().await?;
            }

            let state = AppState::new(Arc::new(store));
            Server::new(config.server.listen, state).run().await?;
        }
        Command::Migrate { common } => {
            let config = common.load()?;
            let store = PgStore::connect(&config.database).await?;
            store.migrate().await?;
        }
    }

    Ok(())
}
