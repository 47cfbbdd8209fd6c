use std::{fmt::Display, path::PathBuf};

use thiserror::Error;

use crate::{Price, Timestamp};

/// Why [`validate_bars`](crate::validate_bars) rejected a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// `low > high`.
    Inverted,
    /// High or low is NaN or infinite.
    NonFinite,
}

impl Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Inverted => "low is above high",
            Self::NonFinite => "price is not finite",
        })
    }
}

/// A bar that swing detection would silently misread.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("malformed bar at index {index} (high {high}, low {low}): {reason}")]
pub struct MalformedBarError {
    pub index: usize,
    pub high: Price,
    pub low: Price,
    pub reason: MalformedReason,
}

/// Failure of a [`BarSource`](crate::BarSource) to produce bars.
///
/// Detection never returns these; they are raised before any bar reaches it.
#[derive(Debug, Error)]
pub enum DataRetrievalError {
    #[error("failed to read bars from {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("bar {index} opens at {open_time}, before previous bar at {previous}")]
    OutOfOrder {
        index: usize,
        open_time: Timestamp,
        previous: Timestamp,
    },

    #[error("unknown interval: {0}")]
    UnknownInterval(String),

    #[error("data provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors surfaced by [`fetch_and_detect`](crate::fetch_and_detect).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    MalformedBar(#[from] MalformedBarError),

    #[error(transparent)]
    DataRetrieval(#[from] DataRetrievalError),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
