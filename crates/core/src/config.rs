use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ControlError;

/// Base URL of the Control API.
pub const DEFAULT_API_URL: &str = "https://control.ably.net/v1";

/// Product entry that always leads the agent header.
pub const AGENT_PRODUCT: &str = "ably-control-rs";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled key: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_opt(lookup: &impl Fn(&str) -> Option<String>, profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = lookup(&prefixed) {
            return Some(v);
        }
    }
    lookup(key)
}

// ── Top-level config ──────────────────────────────────────────

/// Settings handed to the resource client that carries encoded rules over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub api_url: String,
    #[serde(skip_serializing, default)]
    pub access_token: Option<String>,
    /// Extra `product/version` entries for the agent header.
    #[serde(default)]
    pub agent_extras: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            agent_extras: Vec::new(),
        }
    }
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `CONTROL_PROFILE`. When set (e.g. `STAGING`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_opt("CONTROL_PROFILE").unwrap_or_default();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        Self::for_profile_with(profile, env_opt)
    }

    fn for_profile_with(profile: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            api_url: profiled_opt(&lookup, p, "CONTROL_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            access_token: profiled_opt(&lookup, p, "CONTROL_ACCESS_TOKEN"),
            agent_extras: profiled_opt(&lookup, p, "CONTROL_AGENT_EXTRA")
                .map(|raw| raw.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Append an extra entry to the agent header.
    pub fn append_agent(&mut self, product: &str, version: &str) {
        self.agent_extras.push(format!("{}/{}", product, version));
    }

    /// Value of the agent header: this crate first, then every appended entry.
    pub fn agent(&self) -> String {
        let mut agent = format!("{}/{}", AGENT_PRODUCT, env!("CARGO_PKG_VERSION"));
        for extra in &self.agent_extras {
            agent.push(' ');
            agent.push_str(extra);
        }
        agent
    }

    /// Reject settings the transport could not use.
    pub fn validate(&self) -> Result<(), ControlError> {
        if !(self.api_url.starts_with("https://") || self.api_url.starts_with("http://")) {
            return Err(ControlError::Config(format!(
                "api url must be http(s): '{}'",
                self.api_url
            )));
        }
        for extra in &self.agent_extras {
            match extra.split_once('/') {
                Some((product, version)) if !product.is_empty() && !version.is_empty() => {}
                _ => {
                    return Err(ControlError::Config(format!(
                        "agent entry must be product/version: '{}'",
                        extra
                    )))
                }
            }
        }
        Ok(())
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  api:    url={}", self.api_url);
        tracing::info!("  token:  configured={}", self.access_token.is_some());
        tracing::info!("  agent:  {}", self.agent());
    }

    /// Return a redacted view safe for display (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "api_url": self.api_url,
            "access_token": { "configured": self.access_token.is_some() },
            "agent": self.agent(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = Config::for_profile_with("", lookup_from(&[]));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.access_token.is_none());
        assert_eq!(config.profile_label(), "default");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn profiled_keys_win_over_plain_keys() {
        let lookup = lookup_from(&[
            ("CONTROL_API_URL", "https://control.example/v1"),
            ("STAGING_CONTROL_API_URL", "https://staging.example/v1"),
            ("CONTROL_ACCESS_TOKEN", "tok"),
        ]);
        let config = Config::for_profile_with("staging", lookup);
        assert_eq!(config.profile, "STAGING");
        assert_eq!(config.api_url, "https://staging.example/v1");
        assert_eq!(config.access_token.as_deref(), Some("tok"));
    }

    #[test]
    fn agent_includes_appended_entries() {
        let lookup = lookup_from(&[("CONTROL_AGENT_EXTRA", "terraform/1.2.0")]);
        let mut config = Config::for_profile_with("", lookup);
        config.append_agent("provider", "0.3.1");
        let agent = config.agent();
        assert!(agent.starts_with("ably-control-rs/"));
        assert!(agent.ends_with(" terraform/1.2.0 provider/0.3.1"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_settings() {
        let config = Config {
            api_url: "control.ably.net".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ControlError::Config(_))));

        let config = Config {
            agent_extras: vec!["no-version".to_string()],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn redacted_summary_hides_token() {
        let config = Config {
            access_token: Some("secret-token".to_string()),
            ..Config::default()
        };
        let summary = config.redacted_summary().to_string();
        assert!(!summary.contains("secret-token"));
        assert_eq!(config.redacted_summary()["access_token"]["configured"], true);
        assert!(!serde_json::to_string(&config).unwrap().contains("secret-token"));
    }
}
