use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while producing a `Configuration`. Every variant aborts loading;
/// no partial configuration is returned.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed configuration in {origin}: {reason}")]
    MalformedConfig { origin: String, reason: String },

    #[error("invalid content pattern #{index} {pattern:?}: {reason}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        reason: String,
    },

    #[error("invalid content pattern set: {reason}")]
    PatternSet { reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
