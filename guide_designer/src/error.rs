use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised by the guide designer. Input variants are user-correctable and are raised
/// before any design work starts; the rest wrap I/O and format failures at the export edges.
pub enum Error {
    #[error("Target sequence is empty")]
    /// No bases were supplied
    EmptySequence,
    #[error("Target sequence is {length}bp but must be between {min}bp and {max}bp")]
    /// Sequence outside the accepted length window
    SequenceLength {
        /// Observed length
        length: usize,
        /// Minimum accepted length
        min: usize,
        /// Maximum accepted length
        max: usize,
    },
    #[error("Region input is missing its {0}")]
    /// Region mode without chromosome/start/end
    MissingRegionField(&'static str),
    #[error("Invalid coordinates, end {end} is smaller than start {start}")]
    /// Start/end pair that does not form an interval
    InvalidCoordinates {
        /// Region start
        start: u64,
        /// Region end
        end: u64,
    },
    #[error("Invalid parameter: {0}")]
    /// Design, primer or evaluation parameter out of range
    InvalidParameter(String),
    #[error("Primer length {length} exceeds the {available}bp target")]
    /// Target too short to place primers of the requested length
    PrimerLongerThanTarget {
        /// Requested primer length
        length: usize,
        /// Target length
        available: usize,
    },
    #[error("Could not read or write file")]
    /// File access error
    Io(#[from] std::io::Error),
    #[error("Could not (de)serialize JSON")]
    /// Config or export JSON error
    Json(#[from] serde_json::Error),
    #[error("Could not write CSV")]
    /// CSV export error
    Csv(#[from] csv::Error),
    #[error("Could not process guide table")]
    /// Batch evaluation error
    Polars(#[from] polars::error::PolarsError),
}

impl Error {
    /// Whether the error stems from user input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::EmptySequence
                | Error::SequenceLength { .. }
                | Error::MissingRegionField(_)
                | Error::InvalidCoordinates { .. }
                | Error::InvalidParameter(_)
                | Error::PrimerLongerThanTarget { .. }
        )
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
