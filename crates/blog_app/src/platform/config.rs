use std::fs;
use std::path::Path;
use std::time::Duration;

use blog_engine::{ClientSettings, PrepareOptions};
use blog_logging::blog_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG_FILENAME: &str = "spacetraveling.ron";
const ENDPOINT_VAR: &str = "PRISMIC_API_ENDPOINT";
const TOKEN_VAR: &str = "PRISMIC_ACCESS_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },
    #[error("no CMS endpoint configured; set `endpoint` or PRISMIC_API_ENDPOINT")]
    MissingEndpoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub access_token: Option<String>,
    pub document_type: String,
    pub page_size: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub revalidate_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            access_token: None,
            document_type: "posts".to_string(),
            page_size: 3,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            max_bytes: 5 * 1024 * 1024,
            revalidate_secs: 60 * 60 * 5,
        }
    }
}

impl AppConfig {
    /// Environment wins over the file, matching how the site is deployed.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|v| !v.trim().is_empty()) {
            self.endpoint = Some(endpoint);
        }
        if let Some(token) = lookup(TOKEN_VAR).filter(|v| !v.trim().is_empty()) {
            self.access_token = Some(token);
        }
    }

    pub fn client_settings(&self) -> Result<ClientSettings, ConfigError> {
        let endpoint = self
            .endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .ok_or(ConfigError::MissingEndpoint)?;
        Ok(ClientSettings {
            access_token: self.access_token.clone(),
            document_type: self.document_type.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..ClientSettings::new(endpoint)
        })
    }

    pub fn prepare_options(&self, force: bool) -> PrepareOptions {
        PrepareOptions {
            page_size: self.page_size.max(1),
            revalidate: Duration::from_secs(self.revalidate_secs),
            force,
        }
    }
}

/// Loads the config file, then applies environment overrides.
///
/// An explicit path must exist; the default file is optional.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match explicit {
        Some(path) => read_file(path)?,
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILENAME);
            if path.exists() {
                read_file(path)?
            } else {
                AppConfig::default()
            }
        }
    };
    config.apply_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    blog_info!("Loaded config from {:?}", path);
    Ok(config)
}
