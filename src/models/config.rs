//! Configuration model loaded from external sources.

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::controller::{ControllerOptions, DEFAULT_PAGE_SIZES};
use crate::domain::types::PageLimit;

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> usize {
    10
}

fn default_page_sizes() -> Vec<usize> {
    DEFAULT_PAGE_SIZES.to_vec()
}

#[derive(Clone, Debug, Deserialize)]
/// Settings for talking to the booking backend.
pub struct AdminConfig {
    pub api_base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,
    #[serde(default)]
    pub reset_page_on_create: bool,
    /// Bearer token for unattended use; interactive sessions log in instead.
    #[serde(default)]
    pub token: Option<String>,
}

impl AdminConfig {
    /// Checks the values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Message("api_base_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.page_sizes.contains(&0) {
            return Err(ConfigError::Message("page_sizes must be positive".into()));
        }
        if !self.page_sizes.contains(&self.default_page_size) {
            return Err(ConfigError::Message(format!(
                "default_page_size {} is not one of {:?}",
                self.default_page_size, self.page_sizes
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn controller_options(&self) -> Result<ControllerOptions, ConfigError> {
        self.validate()?;
        let invalid = |e| ConfigError::Message(format!("invalid page size: {e}"));
        let page_sizes = self
            .page_sizes
            .iter()
            .map(|&size| PageLimit::new(size).map_err(invalid))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ControllerOptions {
            page_sizes,
            default_limit: PageLimit::new(self.default_page_size).map_err(invalid)?,
            request_timeout: self.request_timeout(),
            reset_page_on_create: self.reset_page_on_create,
        })
    }
}

/// Loads `<dir>/default.yaml`, then `<dir>/<app_env>.yaml` if present, then
/// `APP_*` environment variables.
pub fn load_config(dir: &Path, app_env: &str) -> Result<AdminConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::from(dir.join("default")))
        .add_source(File::from(dir.join(app_env)).required(false))
        .add_source(Environment::with_prefix("APP"))
        .build()?;

    let config = settings.try_deserialize::<AdminConfig>()?;
    config.validate()?;
    Ok(config)
}
