// messaging-api-client/src/config.rs
use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const LINE_PAY_ORIGIN: &str = "https://api-pay.line.me";
const LINE_PAY_SANDBOX_ORIGIN: &str = "https://sandbox-api-pay.line.me";
const GRAPH_API_ORIGIN: &str = "https://graph.facebook.com";
const DEFAULT_GRAPH_API_VERSION: &str = "19.0";

/// Credentials and endpoints for both APIs.
///
/// Read from `<config dir>/messaging-api/config.toml`, then overridden by
/// environment variables. Either section may be absent.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub line_pay: Option<LinePayConfig>,
    #[serde(default)]
    pub messenger: Option<MessengerConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinePayConfig {
    pub channel_id: String,
    pub channel_secret: String,
    /// Use the sandbox host instead of production
    #[serde(default)]
    pub sandbox: bool,
    /// Overrides the host, e.g. for a local mock server
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl LinePayConfig {
    pub fn new(channel_id: impl Into<String>, channel_secret: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            channel_secret: channel_secret.into(),
            sandbox: false,
            origin: None,
            timeout_secs: None,
        }
    }

    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Base URL all LINE Pay paths are relative to
    pub fn base_url(&self) -> String {
        let origin = match &self.origin {
            Some(origin) => origin.as_str(),
            None if self.sandbox => LINE_PAY_SANDBOX_ORIGIN,
            None => LINE_PAY_ORIGIN,
        };
        format!("{}/v2/", origin.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessengerConfig {
    /// Page access token
    pub access_token: String,
    #[serde(default)]
    pub app_id: Option<String>,
    /// Enables `appsecret_proof` and app-level calls
    #[serde(default)]
    pub app_secret: Option<String>,
    /// Graph API version, with or without the leading `v`
    #[serde(default = "default_graph_api_version")]
    pub version: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub skip_app_secret_proof: bool,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_graph_api_version() -> String {
    DEFAULT_GRAPH_API_VERSION.to_string()
}

impl MessengerConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            app_id: None,
            app_secret: None,
            version: default_graph_api_version(),
            origin: None,
            skip_app_secret_proof: false,
            timeout_secs: None,
        }
    }

    pub fn with_app(mut self, app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self.app_secret = Some(app_secret.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Base URL all Graph API paths are relative to
    pub fn base_url(&self) -> String {
        let origin = self.origin.as_deref().unwrap_or(GRAPH_API_ORIGIN);
        format!(
            "{}/v{}/",
            origin.trim_end_matches('/'),
            self.version.trim_start_matches('v')
        )
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load from the default location plus the process environment
    pub fn load() -> Result<Self> {
        let path = Self::config_dir()?.join("config.toml");
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load a specific file without environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from environment-style variables.
    ///
    /// A section missing from the file is created when its required
    /// variables are all present.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let channel_id = var("LINE_PAY_CHANNEL_ID");
        let channel_secret = var("LINE_PAY_CHANNEL_SECRET");
        if let Some(line_pay) = &mut self.line_pay {
            if let Some(id) = channel_id {
                line_pay.channel_id = id;
            }
            if let Some(secret) = channel_secret {
                line_pay.channel_secret = secret;
            }
        } else if let (Some(id), Some(secret)) = (channel_id, channel_secret) {
            self.line_pay = Some(LinePayConfig::new(id, secret));
        }
        if let (Some(line_pay), Some(sandbox)) = (&mut self.line_pay, var("LINE_PAY_SANDBOX")) {
            line_pay.sandbox = matches!(sandbox.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        let access_token = var("MESSENGER_ACCESS_TOKEN");
        if let Some(messenger) = &mut self.messenger {
            if let Some(token) = access_token {
                messenger.access_token = token;
            }
        } else if let Some(token) = access_token {
            self.messenger = Some(MessengerConfig::new(token));
        }
        if let Some(messenger) = &mut self.messenger {
            if let Some(app_id) = var("MESSENGER_APP_ID") {
                messenger.app_id = Some(app_id);
            }
            if let Some(app_secret) = var("MESSENGER_APP_SECRET") {
                messenger.app_secret = Some(app_secret);
            }
            if let Some(version) = var("MESSENGER_API_VERSION") {
                messenger.version = version;
            }
        }
    }

    fn config_dir() -> Result<PathBuf> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("Cannot determine config directory"))?;
        Ok(base_dirs.config_dir().join("messaging-api"))
    }

    pub fn line_pay(&self) -> Result<&LinePayConfig> {
        self.line_pay.as_ref().ok_or_else(|| {
            anyhow!(
                "LINE Pay is not configured. Set LINE_PAY_CHANNEL_ID and LINE_PAY_CHANNEL_SECRET"
            )
        })
    }

    pub fn messenger(&self) -> Result<&MessengerConfig> {
        self.messenger.as_ref().ok_or_else(|| {
            anyhow!("Messenger is not configured. Set MESSENGER_ACCESS_TOKEN")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_line_pay_base_url() {
        let config = LinePayConfig::new("id", "secret");
        assert_eq!(config.base_url(), "https://api-pay.line.me/v2/");
        assert_eq!(
            config.clone().sandbox(true).base_url(),
            "https://sandbox-api-pay.line.me/v2/"
        );
        assert_eq!(
            config.with_origin("http://localhost:8080/").base_url(),
            "http://localhost:8080/v2/"
        );
    }

    #[test]
    fn test_messenger_base_url() {
        let config = MessengerConfig::new("token");
        assert_eq!(config.base_url(), "https://graph.facebook.com/v19.0/");
        assert_eq!(
            config.with_version("v6.0").base_url(),
            "https://graph.facebook.com/v6.0/"
        );
    }

    #[test]
    fn test_parse_toml() {
        let config = Config::from_toml(
            r#"
[line_pay]
channel_id = "1234"
channel_secret = "s3cr3t"
sandbox = true

[messenger]
access_token = "EAAB"
app_secret = "app-secret"
"#,
        )
        .unwrap();

        let line_pay = config.line_pay().unwrap();
        assert_eq!(line_pay.channel_id, "1234");
        assert!(line_pay.sandbox);
        assert!(line_pay.timeout().is_none());

        let messenger = config.messenger().unwrap();
        assert_eq!(messenger.version, "19.0");
        assert_eq!(messenger.app_secret.as_deref(), Some("app-secret"));
        assert!(!messenger.skip_app_secret_proof);
    }

    #[test]
    fn test_empty_config_reports_missing_sections() {
        let config = Config::from_toml("").unwrap();
        assert!(config.line_pay().is_err());
        assert!(config.messenger().is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config::from_toml(
            r#"
[line_pay]
channel_id = "file-id"
channel_secret = "file-secret"
"#,
        )
        .unwrap();
        config.apply_env(env(&[
            ("LINE_PAY_CHANNEL_SECRET", "env-secret"),
            ("LINE_PAY_SANDBOX", "true"),
        ]));

        let line_pay = config.line_pay().unwrap();
        assert_eq!(line_pay.channel_id, "file-id");
        assert_eq!(line_pay.channel_secret, "env-secret");
        assert!(line_pay.sandbox);
    }

    #[test]
    fn test_env_creates_sections() {
        let mut config = Config::default();
        config.apply_env(env(&[
            ("LINE_PAY_CHANNEL_ID", "id"),
            ("MESSENGER_ACCESS_TOKEN", "token"),
            ("MESSENGER_APP_ID", "app"),
            ("MESSENGER_API_VERSION", "18.0"),
        ]));

        // channel secret missing, so no LINE Pay section
        assert!(config.line_pay.is_none());

        let messenger = config.messenger().unwrap();
        assert_eq!(messenger.access_token, "token");
        assert_eq!(messenger.app_id.as_deref(), Some("app"));
        assert_eq!(messenger.version, "18.0");
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from("/nonexistent/messaging-api/config.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
