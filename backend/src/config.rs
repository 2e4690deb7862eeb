use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::storage::db::DATABASE_URL;

/// Server settings, read from the command line or `CREATURE_COMFORT_*` variables
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "creature-comfort-backend", about = "Creature Comfort pet-care site server")]
pub struct AppConfig {
    /// SQLite database holding the storage slots
    #[arg(long, env = "CREATURE_COMFORT_DATABASE_URL", default_value = DATABASE_URL)]
    pub database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "CREATURE_COMFORT_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Directory with the built frontend, served for every non-API path
    #[arg(long, env = "CREATURE_COMFORT_STATIC_DIR", default_value = "../frontend/dist")]
    pub static_dir: PathBuf,

    /// Origin allowed to call the API from a separately served frontend
    #[arg(long, env = "CREATURE_COMFORT_ALLOWED_ORIGIN", default_value = "http://localhost:8080")]
    pub allowed_origin: String,
}

impl AppConfig {
    /// Read settings from the process arguments and environment
    pub fn from_env() -> Self {
        Self::parse()
    }
}
