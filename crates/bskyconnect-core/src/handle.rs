//! Validation for the `--account` argument.
//!
//! Accepts a Bluesky handle (`alice.bsky.social`, optionally written with a
//! leading `@`) or a DID (`did:plc:...`). Handles are lowercased; DIDs are
//! returned unchanged.

use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

static HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]([a-z0-9-]{0,61}[a-z0-9])?$",
    )
    .expect("valid handle regex")
});

static DID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^did:[a-z]+:[a-zA-Z0-9._:%-]+$").expect("valid did regex"));

/// Normalizes an account identifier for use as an XRPC `actor` parameter.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidHandle`] if the input is neither a
/// syntactically valid handle nor a DID.
pub fn normalize_handle(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if DID_RE.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed).to_lowercase();
    if handle.len() > 253 || !HANDLE_RE.is_match(&handle) {
        return Err(ConfigError::InvalidHandle(raw.to_string()));
    }
    Ok(handle)
}
