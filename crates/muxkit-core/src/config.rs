//! Configuration module
//!
//! Proxy server configuration loaded from the process environment: listen
//! port, CORS, and the vendor credentials and request policy.

use std::collections::HashMap;
use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MUX_API_URL: &str = "https://api.mux.com";
const DEFAULT_LIST_LIMIT: u32 = 100;
const MAX_LIST_LIMIT: u32 = 100;
const DEFAULT_VENDOR_TIMEOUT_SECS: u64 = 30;

/// Settings unrelated to the vendor
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Vendor credentials and request policy
#[derive(Clone)]
pub struct MuxConfig {
    pub token_id: String,
    pub token_secret: String,
    pub api_url: String,
    /// Page size used when listing assets
    pub list_limit: u32,
    /// `cors_origin` sent with every new upload
    pub upload_cors_origin: String,
    pub timeout_secs: u64,
}

impl Debug for MuxConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MuxConfig")
            .field("token_id", &self.token_id_preview())
            .field("token_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("list_limit", &self.list_limit)
            .field("upload_cors_origin", &self.upload_cors_origin)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MuxConfig {
    /// First characters of the token id, safe to log.
    pub fn token_id_preview(&self) -> String {
        let preview: String = self.token_id.chars().take(10).collect();
        format!("{}...", preview)
    }
}

/// Proxy configuration
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    pub base: BaseConfig,
    pub mux: MuxConfig,
}

/// Application configuration (proxy server).
#[derive(Clone, Debug)]
pub struct Config(pub Box<ProxyConfig>);

impl Config {
    fn as_proxy(&self) -> &ProxyConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_proxy().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ProxyConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_proxy().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_proxy().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_proxy().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_proxy().base.environment
    }

    pub fn mux(&self) -> &MuxConfig {
        &self.as_proxy().mux
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an explicit key/value map (tests, embedding).
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: match lookup("PORT").filter(|s| !s.trim().is_empty()) {
                Some(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => DEFAULT_PORT,
            },
            cors_origins,
            environment,
        };

        let mux = MuxConfig {
            token_id: lookup("MUX_TOKEN_ID")
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("MUX_TOKEN_ID must be set"))?,
            token_secret: lookup("MUX_TOKEN_SECRET")
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("MUX_TOKEN_SECRET must be set"))?,
            api_url: lookup("MUX_API_URL")
                .unwrap_or_else(|| DEFAULT_MUX_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            list_limit: lookup("MUX_LIST_LIMIT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_LIST_LIMIT),
            upload_cors_origin: lookup("MUX_UPLOAD_CORS_ORIGIN")
                .unwrap_or_else(|| "*".to_string()),
            timeout_secs: lookup("MUX_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_VENDOR_TIMEOUT_SECS),
        };

        let config = ProxyConfig { base, mux };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.mux.api_url.starts_with("https://") || self.mux.api_url.starts_with("http://"))
        {
            return Err(anyhow::anyhow!(
                "MUX_API_URL must be an http(s) URL, got '{}'",
                self.mux.api_url
            ));
        }

        if self.mux.list_limit == 0 || self.mux.list_limit > MAX_LIST_LIMIT {
            return Err(anyhow::anyhow!(
                "MUX_LIST_LIMIT must be between 1 and {}",
                MAX_LIST_LIMIT
            ));
        }

        if self.mux.timeout_secs == 0 {
            return Err(anyhow::anyhow!("MUX_TIMEOUT_SECS must be greater than 0"));
        }

        Ok(())
    }
}
