#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },
    #[error("backend rejected {endpoint} with status {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },
    #[error("failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    #[error("failed to encode request body for {endpoint}: {source}")]
    Encode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}
