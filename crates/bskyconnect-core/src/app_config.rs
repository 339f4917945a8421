use std::path::PathBuf;

/// Where and how verbosely the CLI logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub path: PathBuf,
    pub level: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub identifier: String,
    pub app_password: String,
    pub service_url: String,
    pub log_path: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub action_delay_ms: u64,
    pub policy_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("identifier", &self.identifier)
            .field("app_password", &"[redacted]")
            .field("service_url", &self.service_url)
            .field("log_path", &self.log_path)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("action_delay_ms", &self.action_delay_ms)
            .field("policy_path", &self.policy_path)
            .finish()
    }
}
