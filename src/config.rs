use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_LOG_TARGET: &str = "sso_group_utils";
pub const DEFAULT_DOMAIN: &str = "vsphere.local";
pub const DEFAULT_CONFIG_PATH: &str = "sso.toml";

#[derive(Deserialize, Clone, Debug, Default)]
pub struct SsoConf {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

fn default_user_agent() -> String {
    format!("sso-group/{}", env!("CARGO_PKG_VERSION"))
}

impl SsoConf {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse SSO config")
    }

    /// Reads `path` if it exists; a missing file yields an empty config so
    /// that the environment alone can supply the connection settings.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !path.exists() {
            if required {
                return Err(anyhow!("Config file '{}' not found", path.display()));
            }
            return Ok(Self {
                domain: default_domain(),
                user_agent: default_user_agent(),
                ..Self::default()
            });
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml(&contents)
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SSO_URL").filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup("SSO_TOKEN").filter(|v| !v.is_empty()) {
            self.token = token;
        }
        if let Some(domain) = lookup("SSO_DOMAIN").filter(|v| !v.is_empty()) {
            self.domain = domain;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow!("SSO base URL is not set (config base_url or SSO_URL)"));
        }
        reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid SSO base URL '{}'", self.base_url))?;
        if self.token.trim().is_empty() {
            return Err(anyhow!("SSO token is not set (config token or SSO_TOKEN)"));
        }
        Ok(())
    }
}

pub static LOGGER: OnceLock<String> = OnceLock::new();
pub fn get_log_target() -> &'static str {
    LOGGER
        .get()
        .map(String::as_str)
        .unwrap_or(DEFAULT_LOG_TARGET)
}

/// Returns false when a target was already set; the first one wins.
pub fn set_log_target(log_target: String) -> bool {
    LOGGER.set(log_target).is_ok()
}
