/// Errors raised while layering resolved routes into a configuration
/// builder.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("route serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
