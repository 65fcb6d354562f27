use anyhow::{anyhow, Context, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.emailjs.com";
pub const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STATUS_CLEAR_SECS: u64 = 5;

/// Credentials and endpoint of the email relay
#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub api_base: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Listings file to load instead of the bundled data
    pub listings_path: Option<PathBuf>,
    /// How long enquiry status messages stay visible
    pub status_clear: Duration,
    /// `None` when the relay credentials are not configured
    pub relay: Option<RelayConfig>,
}

impl AppConfig {
    /// Read configuration from the environment, after loading `.env` if present
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let secs = |key: &str, default: u64| -> Result<Duration> {
            match get(key) {
                Some(raw) => raw
                    .parse()
                    .map(Duration::from_secs)
                    .with_context(|| format!("{} must be a whole number of seconds, got '{}'", key, raw)),
                None => Ok(Duration::from_secs(default)),
            }
        };

        let relay = match (
            get("EMAILJS_SERVICE_ID"),
            get("EMAILJS_TEMPLATE_ID"),
            get("EMAILJS_PUBLIC_KEY"),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => Some(RelayConfig {
                service_id,
                template_id,
                public_key,
                api_base: get("EMAILJS_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                timeout: secs("RELAY_TIMEOUT_SECS", DEFAULT_RELAY_TIMEOUT_SECS)?,
            }),
            (None, None, None) => None,
            _ => {
                return Err(anyhow!(
                    "EMAILJS_SERVICE_ID, EMAILJS_TEMPLATE_ID and EMAILJS_PUBLIC_KEY must be set together"
                ))
            }
        };

        Ok(Self {
            listings_path: get("LISTINGS_PATH").map(PathBuf::from),
            status_clear: secs("STATUS_CLEAR_SECS", DEFAULT_STATUS_CLEAR_SECS)?,
            relay,
        })
    }

    /// Relay settings, or an error naming what to configure
    pub fn require_relay(&self) -> Result<&RelayConfig> {
        self.relay
            .as_ref()
            .context("Email relay is not configured; set EMAILJS_SERVICE_ID, EMAILJS_TEMPLATE_ID and EMAILJS_PUBLIC_KEY")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_relay() {
        let config = config(&[]).unwrap();
        assert!(config.listings_path.is_none());
        assert!(config.relay.is_none());
        assert_eq!(config.status_clear, Duration::from_secs(5));
        assert!(config.require_relay().is_err());
    }

    #[test]
    fn reads_relay_settings() {
        let config = config(&[
            ("EMAILJS_SERVICE_ID", "service_abc"),
            ("EMAILJS_TEMPLATE_ID", "template_xyz"),
            ("EMAILJS_PUBLIC_KEY", "pk_123"),
            ("RELAY_TIMEOUT_SECS", "10"),
            ("LISTINGS_PATH", "/srv/listings.json"),
        ])
        .unwrap();

        let relay = config.require_relay().unwrap();
        assert_eq!(relay.service_id, "service_abc");
        assert_eq!(relay.api_base, DEFAULT_API_BASE);
        assert_eq!(relay.timeout, Duration::from_secs(10));
        assert_eq!(config.listings_path, Some(PathBuf::from("/srv/listings.json")));
    }

    #[test]
    fn partial_relay_settings_are_an_error() {
        assert!(config(&[("EMAILJS_SERVICE_ID", "service_abc")]).is_err());
    }

    #[test]
    fn rejects_bad_durations() {
        let err = config(&[("STATUS_CLEAR_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("STATUS_CLEAR_SECS"));
    }
}
