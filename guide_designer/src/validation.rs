use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{SequenceSource, TargetSequence, MAX_TARGET_LENGTH, MIN_TARGET_LENGTH};

/// Checks a target before it is handed to the design or primer pipelines.
///
/// Length must be within [`MIN_TARGET_LENGTH`, `MAX_TARGET_LENGTH`]; region input additionally
/// needs a chromosome and an ordered start/end pair. A mismatch between the coordinates and the
/// sequence length is tolerated.
pub fn validate_target(target: &TargetSequence) -> Result<()> {
    if target.sequence.trim().is_empty() {
        return Err(Error::EmptySequence);
    }

    let length = target.len();
    if !(MIN_TARGET_LENGTH..=MAX_TARGET_LENGTH).contains(&length) {
        return Err(Error::SequenceLength {
            length,
            min: MIN_TARGET_LENGTH,
            max: MAX_TARGET_LENGTH,
        });
    }

    if target.source == SequenceSource::Region {
        if target.chromosome.trim().is_empty() {
            return Err(Error::MissingRegionField("chromosome"));
        }
        if target.end < target.start {
            return Err(Error::InvalidCoordinates {
                start: target.start,
                end: target.end,
            });
        }
    }

    let span = target.end.saturating_sub(target.start) + 1;
    if span != length as u64 {
        debug!(
            "Target {} spans {}bp but carries {}bp of sequence",
            target.region_string(),
            span,
            length
        );
    }
    Ok(())
}
