//! Harness-level error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("fixture json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported fixture schema `{found}` (this harness reads `{supported}`)")]
    UnsupportedSchema { found: String, supported: String },
    #[error("fixture checksum mismatch: recorded {recorded}, computed {computed}")]
    ChecksumMismatch { recorded: String, computed: String },
    #[error("{failed} of {total} cases diverged")]
    Divergence { failed: usize, total: usize },
}
