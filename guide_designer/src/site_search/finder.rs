use tracing::debug;

use crate::error::Result;
use crate::helper_functions::reverse_complement;
use crate::models::{DesignParameters, GuideCandidate, Strand};
use crate::site_search::pam::{PamMatcher, PAM_WINDOW};

/// Scans a target for guide+PAM windows on the strands requested by the design parameters.
#[derive(Debug, Clone)]
pub struct PamSiteFinder {
    matcher: PamMatcher,
    guide_length: usize,
    strands: &'static [Strand],
}

impl PamSiteFinder {
    pub fn new(params: &DesignParameters) -> Result<Self> {
        Ok(Self {
            matcher: PamMatcher::new(&params.pam_pattern)?,
            guide_length: params.guide_length,
            strands: params.target_strand.strands(),
        })
    }

    /// All matches, plus strand first. Sites found on both strands are reported twice.
    pub fn find(&self, sequence: &str) -> Vec<GuideCandidate> {
        let mut candidates = Vec::new();
        for strand in self.strands {
            let found = self.find_on_strand(sequence, *strand);
            debug!("Found {} candidate sites on {:?} strand", found.len(), strand);
            candidates.extend(found);
        }
        candidates
    }

    /// Matches on a single strand. Minus strand positions are translated back into plus strand
    /// coordinates of the original sequence.
    pub fn find_on_strand(&self, sequence: &str, strand: Strand) -> Vec<GuideCandidate> {
        let working = match strand {
            Strand::Plus => sequence.to_string(),
            Strand::Minus => reverse_complement(sequence),
        };
        let bases = working.as_bytes();
        let original_length = sequence.len();
        let window = self.guide_length + PAM_WINDOW;

        if self.guide_length == 0 || bases.len() < window {
            return Vec::new();
        }

        (0..=bases.len() - window)
            .filter_map(|i| {
                let guide = &bases[i..i + self.guide_length];
                let pam = &bases[i + self.guide_length..i + window];
                let pam = String::from_utf8_lossy(pam);
                if !self.matcher.is_match(&pam) {
                    return None;
                }

                let position = match strand {
                    Strand::Plus => i + 1,
                    Strand::Minus => original_length - i - self.guide_length + 1,
                };

                Some(GuideCandidate {
                    sequence: String::from_utf8_lossy(guide).into_owned(),
                    pam_site: pam.into_owned(),
                    position,
                    strand,
                    length: self.guide_length,
                })
            })
            .collect()
    }
}

pub fn find_pam_sites(sequence: &str, params: &DesignParameters) -> Result<Vec<GuideCandidate>> {
    Ok(PamSiteFinder::new(params)?.find(sequence))
}
