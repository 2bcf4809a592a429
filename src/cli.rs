use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "matchday")]
#[command(version = "0.1.0")]
#[command(about = "Fixture, prediction and smart-combo feed with tiered visibility", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding default.toml and environment overrides
    #[arg(short, long, default_value = "config", env = "MATCHDAY_CONFIG_DIR")]
    pub config_dir: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API (default)
    Serve {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,
        /// Override server.port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply SQL migrations to the configured database
    Migrate,
}
