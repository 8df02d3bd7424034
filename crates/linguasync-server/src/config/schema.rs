use serde::Deserialize;

use linguasync_core::error::{LinguaSyncError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub translator: TranslatorSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            translator: TranslatorSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LinguaSyncError::Config(
                "unsupported config version".into(),
            ));
        }
        self.server.validate()?;
        self.translator.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_ping_interval_ms")]
    pub ping_interval_ms: u64,

    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            ping_interval_ms: default_ping_interval_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.is_empty() {
            return Err(LinguaSyncError::Config(
                "server.listen must not be empty".into(),
            ));
        }
        if !(5000..=120000).contains(&self.ping_interval_ms) {
            return Err(LinguaSyncError::Config(
                "server.ping_interval_ms must be between 5000 and 120000".into(),
            ));
        }
        if !(10000..=600000).contains(&self.idle_timeout_ms) {
            return Err(LinguaSyncError::Config(
                "server.idle_timeout_ms must be between 10000 and 600000".into(),
            ));
        }
        if self.idle_timeout_ms <= self.ping_interval_ms {
            return Err(LinguaSyncError::Config(
                "server.idle_timeout_ms must be greater than ping_interval_ms".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3001".into()
}
fn default_ping_interval_ms() -> u64 {
    20000
}
fn default_idle_timeout_ms() -> u64 {
    60000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslatorSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Optional bearer credential for the gateway.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Bound on one translation round trip. One slow recipient must not
    /// stall the fan-out for everyone else.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for TranslatorSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl TranslatorSection {
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(LinguaSyncError::Config(
                "translator.endpoint must not be empty".into(),
            ));
        }
        if !(500..=60000).contains(&self.request_timeout_ms) {
            return Err(LinguaSyncError::Config(
                "translator.request_timeout_ms must be between 500 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8090".into()
}
fn default_request_timeout_ms() -> u64 {
    10000
}
