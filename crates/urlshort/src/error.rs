//! Error returned when a record list cannot be decoded.

/// The record list was not well-formed: bad syntax, the wrong shape, or a
/// field of the wrong type.
///
/// The decoder's own error is kept as the source and its message is shown
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
