//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use linguasync_core::error::{LinguaSyncError, Result};

pub use schema::{ServerConfig, ServerSection, TranslatorSection};

/// Default config file path, next to the binary's working directory.
pub const DEFAULT_PATH: &str = "linguasync.yaml";

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| LinguaSyncError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| LinguaSyncError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the config file if present; an absent file falls back to built-in
/// defaults so the server can boot with nothing but a reachable translator.
pub fn load_or_default(path: &str) -> Result<ServerConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(%path, "config file not found, using defaults");
            Ok(ServerConfig::default())
        }
        Err(e) => Err(LinguaSyncError::Config(format!("read config failed: {e}"))),
    }
}
