use std::path::PathBuf;

use crate::app_config::{AppConfig, LogSettings};
use crate::ConfigError;

const DEFAULT_LOG_PATH: &str = "bskyconnect.log";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Load application configuration from environment variables already in the process.
///
/// Does not load `.env`; call [`load_log_settings`] first, which does.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load the log destination and level, loading `.env` first.
///
/// Needs no credentials, so the CLI can start logging before the rest of
/// the configuration is known to be valid.
#[must_use]
pub fn load_log_settings() -> LogSettings {
    dotenvy::dotenv().ok();
    build_log_settings(|key| std::env::var(key))
}

fn build_log_settings<F>(lookup: F) -> LogSettings
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    LogSettings {
        path: PathBuf::from(or_default("BSKYCONNECT_LOG_PATH", DEFAULT_LOG_PATH)),
        level: or_default("BSKYCONNECT_LOG_LEVEL", DEFAULT_LOG_LEVEL),
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let identifier = require("BSKY_IDENTIFIER")?;
    let app_password = require("BSKY_APP_PASSWORD")?;

    let service_url = or_default("BSKY_SERVICE_URL", "https://bsky.social");
    if !(service_url.starts_with("https://") || service_url.starts_with("http://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "BSKY_SERVICE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{service_url}\""),
        });
    }

    let LogSettings {
        path: log_path,
        level: log_level,
    } = build_log_settings(&lookup);
    let request_timeout_secs = parse_u64("BSKYCONNECT_REQUEST_TIMEOUT_SECS", "30")?;
    let action_delay_ms = parse_u64("BSKYCONNECT_ACTION_DELAY_MS", "2000")?;
    let policy_path = lookup("BSKYCONNECT_POLICY_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        identifier,
        app_password,
        service_url,
        log_path,
        log_level,
        request_timeout_secs,
        action_delay_ms,
        policy_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
