#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid JSON input: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Expected a JSON object for {0}")]
    NotAnObject(&'static str),
}
