pub mod app_config;
pub mod config;
pub mod handle;
pub mod policy_config;

pub use app_config::{AppConfig, LogSettings};
pub use config::{load_app_config_from_env, load_log_settings};
pub use handle::normalize_handle;
pub use policy_config::{load_policy, PolicyConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read policy file {path}: {source}")]
    PolicyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse policy file: {0}")]
    PolicyFileParse(#[from] serde_yaml::Error),

    #[error("invalid account handle \"{0}\"")]
    InvalidHandle(String),

    #[error("validation error: {0}")]
    Validation(String),
}
