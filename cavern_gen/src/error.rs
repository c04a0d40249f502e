// Error type for cave generation.
//
// Generation itself cannot fail once a config has been accepted; every
// failure is a configuration problem caught up front by
// `CaveConfig::validate()` (or `Curve::new()` / `create_path()` for
// hand-built curves), before any tile set is touched. I/O and JSON errors only arise when loading a
// config from disk.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaveError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CaveError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CaveError>;
