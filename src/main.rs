use anyhow::{bail, Context};
use clap::Parser;
use matchday::adapters::{DocumentStore, MemoryStore, PostgresStore};
use matchday::api::{create_router, AppState};
use matchday::cli::{Cli, Commands};
use matchday::config::AppConfig;
use matchday::logging::{init_logging, init_logging_simple};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load_from(&cli.config_dir)
        .with_context(|| format!("loading configuration from {}", cli.config_dir))?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            init_logging(&config.logging);
            validate(&config)?;
            run_server(config).await
        }
        Commands::Migrate => {
            init_logging_simple();
            validate(&config)?;
            let Some(url) = config.database.url.as_deref() else {
                bail!("database.url is not configured (set MATCHDAY_DATABASE__URL)");
            };
            let store = PostgresStore::new(url, config.database.max_connections).await?;
            store.migrate().await?;
            println!("Migrations applied");
            Ok(())
        }
    }
}

fn validate(config: &AppConfig) -> anyhow::Result<()> {
    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("config error: {}", e);
        }
        bail!("invalid configuration ({} problems)", errors.len());
    }
    Ok(())
}

async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let store: Arc<dyn DocumentStore> = match config.database.url.as_deref() {
        Some(url) => Arc::new(PostgresStore::new(url, config.database.max_connections).await?),
        None => {
            warn!("No database.url configured, serving from an empty in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::from_config(store, &config);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Matchday API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
