//! Tunable thresholds for the follow/unfollow policies.
//!
//! Defaults reproduce the built-in behaviour; an optional YAML file may
//! override any subset of keys.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Largest page size the listing endpoints accept.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Recency window for the `followers` program.
    pub followers_window_days: u32,
    /// Recency window for the `follows` program.
    pub follows_window_days: u32,
    /// Recency window for the `connect` program.
    pub connect_window_days: u32,
    /// Minimum followers/following ratio for influencer status.
    pub influencer_ratio: f64,
    /// Follower count an influencer must exceed.
    pub influencer_min_followers: u64,
    pub page_size: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            followers_window_days: 14,
            follows_window_days: 14,
            connect_window_days: 2,
            influencer_ratio: 3.0,
            influencer_min_followers: 10_000,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Load and validate policy thresholds from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_policy(path: &Path) -> Result<PolicyConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PolicyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_policy(&content)
}

fn parse_policy(content: &str) -> Result<PolicyConfig, ConfigError> {
    // An empty document deserializes to `()`, not to an all-defaults struct.
    if content.trim().is_empty() {
        return Ok(PolicyConfig::default());
    }
    let policy: PolicyConfig = serde_yaml::from_str(content)?;
    validate_policy(&policy)?;
    Ok(policy)
}

fn validate_policy(policy: &PolicyConfig) -> Result<(), ConfigError> {
    for (name, days) in [
        ("followers_window_days", policy.followers_window_days),
        ("follows_window_days", policy.follows_window_days),
        ("connect_window_days", policy.connect_window_days),
    ] {
        if days == 0 {
            return Err(ConfigError::Validation(format!(
                "{name} must be at least 1"
            )));
        }
    }

    if !policy.influencer_ratio.is_finite() || policy.influencer_ratio <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "influencer_ratio must be a positive number, got {}",
            policy.influencer_ratio
        )));
    }

    if policy.page_size == 0 || policy.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::Validation(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
            policy.page_size
        )));
    }

    Ok(())
}
