// Schedule error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a schedule document could not be produced
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Parity string is neither `numerator` nor `denominator`
    #[error("Invalid week parity '{0}': expected 'numerator' or 'denominator'")]
    InvalidParity(String),

    #[error("Schedule file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read schedule file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in schedule file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
