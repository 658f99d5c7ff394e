//! Server-level configuration read from the environment.
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Directory holding `config.toml`, `abilities.ron`, `npcs.ron` and `players.ron`.
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data")),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl ServerConfig {
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - Content directory (default: the crate's `data/`)
    /// - `ARENA_LOG_DIR` - Log file directory (default: `logs`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("ARENA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env::var_os("ARENA_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        config
    }
}
