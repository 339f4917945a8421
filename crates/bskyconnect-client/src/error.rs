use thiserror::Error;

/// Errors returned by the Bluesky XRPC client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status and an XRPC error envelope.
    #[error("XRPC error {status} ({error}): {message}")]
    Api {
        status: u16,
        error: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid service URL \"{url}\": {reason}")]
    InvalidServiceUrl { url: String, reason: String },

    /// A follow record URI did not end in a record key.
    #[error("invalid record URI \"{0}\"")]
    InvalidRecordUri(String),

    /// The server handed back the same continuation cursor twice.
    #[error("pagination stalled on {endpoint} at cursor \"{cursor}\"")]
    PaginationStalled { endpoint: String, cursor: String },
}
