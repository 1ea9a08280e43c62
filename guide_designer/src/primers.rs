//! Flanking PCR primers for validating an edited target region.

use tracing::info;

use crate::error::{Error, Result};
use crate::helper_functions::{gc_count, reverse_complement};
use crate::models::{Primer, PrimerDirection, PrimerPair, PrimerParameters, TargetSequence};

/// Simplified Tm for primers, `64.9 + 41 * (gc_count - 16.4) / length`.
///
/// `gc_count` is the raw number of G/C bases, not a percentage.
pub fn melting_temperature(gc_count: usize, length: usize) -> f64 {
    if length == 0 {
        return 0.0;
    }
    64.9 + 41.0 * (gc_count as f64 - 16.4) / length as f64
}

fn build_primer(sequence: String, direction: PrimerDirection) -> Primer {
    let length = sequence.len();
    let gc_bases = gc_count(&sequence);
    let gc = if length == 0 {
        0.0
    } else {
        100.0 * gc_bases as f64 / length as f64
    };

    Primer {
        tm: melting_temperature(gc_bases, length),
        gc,
        length,
        direction,
        sequence,
    }
}

/// Forward primer from the first `length` bases, reverse primer as the reverse complement of
/// the last `length` bases. The amplicon spans the whole target.
pub fn design_primers(target: &TargetSequence, params: &PrimerParameters) -> Result<PrimerPair> {
    params.validate()?;

    let bases = target.sequence.as_bytes();
    if bases.len() < params.length {
        return Err(Error::PrimerLongerThanTarget {
            length: params.length,
            available: bases.len(),
        });
    }

    let forward = String::from_utf8_lossy(&bases[..params.length]).into_owned();
    let tail = String::from_utf8_lossy(&bases[bases.len() - params.length..]);
    let reverse = reverse_complement(&tail);

    let pair = PrimerPair {
        pair: 1,
        forward: build_primer(forward, PrimerDirection::Forward),
        reverse: build_primer(reverse, PrimerDirection::Reverse),
        product_size: bases.len(),
        purpose: params.purpose.clone(),
    };

    info!(
        "Designed primers for {}bp product (Tm {:.1} / {:.1})",
        pair.product_size, pair.forward.tm, pair.reverse.tm
    );
    Ok(pair)
}
