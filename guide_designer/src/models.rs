use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::site_search::pam::CasSystem;

pub const MIN_TARGET_LENGTH: usize = 50;
pub const MAX_TARGET_LENGTH: usize = 10_000;

/// Where a target sequence was obtained from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceSource {
    #[default]
    Direct,
    Gene,
    Region,
    Viewport,
}

/// Raw bases plus the coordinates they were taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSequence {
    pub sequence: String,
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
    pub source: SequenceSource,
}

impl TargetSequence {
    pub fn new(
        sequence: impl Into<String>,
        chromosome: impl Into<String>,
        start: u64,
        end: u64,
        source: SequenceSource,
    ) -> Self {
        Self {
            sequence: sequence.into(),
            chromosome: chromosome.into(),
            start,
            end,
            source,
        }
    }

    /// Pasted sequence without genomic context, coordinates are 1..=len
    pub fn direct(sequence: impl Into<String>) -> Self {
        let sequence = sequence.into();
        let end = sequence.len() as u64;
        Self::new(sequence, "", 1, end, SequenceSource::Direct)
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// `chrom:start-end`
    pub fn region_string(&self) -> String {
        format!("{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    pub fn symbol(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
        }
    }
}

/// Strands searched for PAM sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStrand {
    Plus,
    Minus,
    #[default]
    Both,
}

impl TargetStrand {
    pub fn strands(&self) -> &'static [Strand] {
        match self {
            TargetStrand::Plus => &[Strand::Plus],
            TargetStrand::Minus => &[Strand::Minus],
            TargetStrand::Both => &[Strand::Plus, Strand::Minus],
        }
    }
}

/// GC window and homopolymer limit handed to the guide scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringLimits {
    pub min_gc: u32,
    pub max_gc: u32,
    pub max_homopolymer: usize,
}

impl Default for ScoringLimits {
    /// Limits applied in evaluation mode, independent of any design run
    fn default() -> Self {
        Self {
            min_gc: 20,
            max_gc: 80,
            max_homopolymer: 4,
        }
    }
}

/// Parameters for a single design run, immutable while it executes.
///
/// `min_score_threshold` is compared against the composite `overall_score`, not against the
/// efficiency sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignParameters {
    pub pam_pattern: String,
    pub guide_length: usize,
    pub target_strand: TargetStrand,
    pub max_guides: usize,
    pub min_score_threshold: f64,
    pub min_gc: u32,
    pub max_gc: u32,
    pub max_homopolymer: usize,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self::for_system(CasSystem::SpCas9)
    }
}

impl DesignParameters {
    /// Parameters seeded with the PAM and guide length of a nuclease preset
    pub fn for_system(system: CasSystem) -> Self {
        let limits = ScoringLimits::default();
        Self {
            pam_pattern: system.pam().to_string(),
            guide_length: system.guide_length(),
            target_strand: TargetStrand::Both,
            max_guides: 10,
            min_score_threshold: 0.5,
            min_gc: limits.min_gc,
            max_gc: limits.max_gc,
            max_homopolymer: limits.max_homopolymer,
        }
    }

    pub fn scoring_limits(&self) -> ScoringLimits {
        ScoringLimits {
            min_gc: self.min_gc,
            max_gc: self.max_gc,
            max_homopolymer: self.max_homopolymer,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.guide_length == 0 {
            return Err(Error::InvalidParameter(
                "guide length must be greater than zero".to_string(),
            ));
        }
        if self.max_guides == 0 {
            return Err(Error::InvalidParameter(
                "maximum number of guides must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_score_threshold) {
            return Err(Error::InvalidParameter(format!(
                "minimum score threshold {} is outside [0, 1]",
                self.min_score_threshold
            )));
        }
        if self.min_gc > self.max_gc {
            return Err(Error::InvalidParameter(format!(
                "minimum GC {}% exceeds maximum GC {}%",
                self.min_gc, self.max_gc
            )));
        }
        Ok(())
    }
}

/// Guide site found next to a PAM. `position` is 1-based in plus-strand target coordinates
/// regardless of the strand the site was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideCandidate {
    pub sequence: String,
    pub pam_site: String,
    pub position: usize,
    pub strand: Strand,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideScores {
    pub gc_content: f64,
    pub gc_score: f64,
    pub efficiency_score: f64,
    pub specificity_score: f64,
    pub secondary_structure_score: f64,
    pub homopolymer_score: f64,
    pub overall_score: f64,
}

/// A scored guide. Design results carry their site; evaluated sequences have none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredGuide {
    pub sequence: String,
    pub pam_site: Option<String>,
    pub position: Option<usize>,
    pub strand: Option<Strand>,
    pub length: usize,
    #[serde(flatten)]
    pub scores: GuideScores,
}

impl ScoredGuide {
    pub fn from_candidate(candidate: GuideCandidate, scores: GuideScores) -> Self {
        Self {
            sequence: candidate.sequence,
            pam_site: Some(candidate.pam_site),
            position: Some(candidate.position),
            strand: Some(candidate.strand),
            length: candidate.length,
            scores,
        }
    }

    pub fn unplaced(sequence: String, scores: GuideScores) -> Self {
        let length = sequence.len();
        Self {
            sequence,
            pam_site: None,
            position: None,
            strand: None,
            length,
            scores,
        }
    }

    pub fn overall_score(&self) -> f64 {
        self.scores.overall_score
    }

    /// Absolute genomic coordinate of the guide start, used to jump a viewer to the site
    pub fn genomic_position(&self, target: &TargetSequence) -> Option<u64> {
        self.position
            .map(|position| target.start + position as u64 - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimerDirection {
    Forward,
    Reverse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Primer {
    pub sequence: String,
    pub tm: f64,
    pub gc: f64,
    pub length: usize,
    pub direction: PrimerDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimerPair {
    pub pair: usize,
    pub forward: Primer,
    pub reverse: Primer,
    pub product_size: usize,
    pub purpose: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrimerParameters {
    pub length: usize,
    pub purpose: String,
}

impl Default for PrimerParameters {
    fn default() -> Self {
        Self {
            length: 20,
            purpose: "CRISPR target validation".to_string(),
        }
    }
}

impl PrimerParameters {
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(Error::InvalidParameter(
                "primer length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_set_pam_and_length_only() {
        let params = DesignParameters::for_system(CasSystem::SaCas9);
        assert_eq!(params.pam_pattern, "NNGRRT");
        assert_eq!(params.guide_length, 21);
        assert_eq!(params.scoring_limits(), ScoringLimits::default());
        assert_eq!(params.max_guides, DesignParameters::default().max_guides);
    }

    #[test]
    fn default_parameters_are_spcas9() {
        let params = DesignParameters::default();
        assert_eq!(params.pam_pattern, "NGG");
        assert_eq!(params.guide_length, 20);
        assert_eq!(params.target_strand, TargetStrand::Both);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_gc_window() {
        let params = DesignParameters {
            min_gc: 70,
            max_gc: 30,
            ..DesignParameters::default()
        };
        assert!(matches!(params.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn rejects_threshold_outside_unit_interval() {
        let params = DesignParameters {
            min_score_threshold: 1.5,
            ..DesignParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn genomic_position_offsets_from_target_start() {
        let target = TargetSequence::new("ACGT", "chr7", 1_000, 1_003, SequenceSource::Region);
        let guide = ScoredGuide {
            sequence: "AC".to_string(),
            pam_site: Some("TGG".to_string()),
            position: Some(3),
            strand: Some(Strand::Plus),
            length: 2,
            scores: GuideScores::default(),
        };
        assert_eq!(guide.genomic_position(&target), Some(1_002));
        assert_eq!(target.region_string(), "chr7:1000-1003");

        let unplaced = ScoredGuide::unplaced("AC".to_string(), GuideScores::default());
        assert_eq!(unplaced.genomic_position(&target), None);
    }

    #[test]
    fn parameters_deserialize_with_defaults() {
        let params: DesignParameters =
            serde_json::from_str(r#"{"pamPattern":"TTTV","targetStrand":"minus"}"#).unwrap();
        assert_eq!(params.pam_pattern, "TTTV");
        assert_eq!(params.target_strand, TargetStrand::Minus);
        assert_eq!(params.guide_length, 20);
    }
}
