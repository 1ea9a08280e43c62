//! The design service and the caller-owned session holding its latest results.

use tracing::{info, warn};

use crate::config::DesignerConfig;
use crate::error::{Error, Result};
use crate::evaluation::evaluate_guides;
use crate::export::ExportRecord;
use crate::models::{
    DesignParameters, PrimerPair, PrimerParameters, ScoredGuide, ScoringLimits, Strand,
    TargetSequence,
};
use crate::primers::design_primers;
use crate::scoring::{rank_guides, score_candidates};
use crate::site_search::PamSiteFinder;

/// Counts gathered over one design run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DesignSummary {
    pub plus_candidates: usize,
    pub minus_candidates: usize,
    pub passing_threshold: usize,
    pub returned: usize,
    pub best_score: Option<f64>,
}

impl DesignSummary {
    pub fn total_candidates(&self) -> usize {
        self.plus_candidates + self.minus_candidates
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignOutcome {
    pub guides: Vec<ScoredGuide>,
    pub summary: DesignSummary,
}

/// Guide design, evaluation and primer service.
///
/// Holds no state besides its configuration; every call is a pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct GuideDesigner {
    config: DesignerConfig,
}

impl GuideDesigner {
    pub fn new(config: DesignerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    /// Find, score and rank guides in a target
    pub fn design(
        &self,
        target: &TargetSequence,
        params: &DesignParameters,
    ) -> Result<Vec<ScoredGuide>> {
        Ok(self.design_with_summary(target, params)?.guides)
    }

    pub fn design_with_summary(
        &self,
        target: &TargetSequence,
        params: &DesignParameters,
    ) -> Result<DesignOutcome> {
        params.validate()?;

        // Soft-masked input would otherwise never match the uppercase PAM class
        let sequence = target.sequence.to_ascii_uppercase();
        let candidates = PamSiteFinder::new(params)?.find(&sequence);

        let mut summary = DesignSummary::default();
        for candidate in &candidates {
            match candidate.strand {
                Strand::Plus => summary.plus_candidates += 1,
                Strand::Minus => summary.minus_candidates += 1,
            }
        }

        let scored = score_candidates(candidates, &params.scoring_limits());
        summary.passing_threshold = scored
            .iter()
            .filter(|guide| guide.overall_score() >= params.min_score_threshold)
            .count();

        let guides = rank_guides(scored, params);
        summary.returned = guides.len();
        summary.best_score = guides.first().map(ScoredGuide::overall_score);

        if guides.is_empty() {
            warn!(
                "No suitable guides in {} ({} candidate sites)",
                target.region_string(),
                summary.total_candidates()
            );
        } else {
            info!(
                "Designed {} guides from {} candidate sites ({} plus, {} minus), best score {:.3}",
                summary.returned,
                summary.total_candidates(),
                summary.plus_candidates,
                summary.minus_candidates,
                summary.best_score.unwrap_or_default()
            );
        }

        Ok(DesignOutcome { guides, summary })
    }

    /// Score pasted guides against the fixed default limits (20-80% GC, runs up to 4).
    /// Neither the configuration nor any design parameters affect the result.
    pub fn evaluate(&self, text: &str) -> Vec<ScoredGuide> {
        evaluate_guides(text, &ScoringLimits::default())
    }

    pub fn design_primers(
        &self,
        target: &TargetSequence,
        params: &PrimerParameters,
    ) -> Result<PrimerPair> {
        design_primers(target, params)
    }
}

/// Current target and latest results of each request type. Each run replaces the previous
/// results of its kind.
#[derive(Debug, Clone, Default)]
pub struct DesignSession {
    target: Option<TargetSequence>,
    design_results: Vec<ScoredGuide>,
    evaluation_results: Vec<ScoredGuide>,
    primer_results: Vec<PrimerPair>,
}

impl DesignSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the target. Design and primer results refer to the old target and are cleared.
    pub fn set_target(&mut self, target: TargetSequence) {
        self.target = Some(target);
        self.design_results.clear();
        self.primer_results.clear();
    }

    pub fn target(&self) -> Option<&TargetSequence> {
        self.target.as_ref()
    }

    pub fn design_results(&self) -> &[ScoredGuide] {
        &self.design_results
    }

    pub fn evaluation_results(&self) -> &[ScoredGuide] {
        &self.evaluation_results
    }

    pub fn primer_results(&self) -> &[PrimerPair] {
        &self.primer_results
    }

    fn require_target(&self) -> Result<&TargetSequence> {
        self.target.as_ref().ok_or(Error::EmptySequence)
    }

    pub fn run_design(
        &mut self,
        designer: &GuideDesigner,
        params: &DesignParameters,
    ) -> Result<DesignSummary> {
        let outcome = designer.design_with_summary(self.require_target()?, params)?;
        self.design_results = outcome.guides;
        Ok(outcome.summary)
    }

    pub fn run_evaluation(&mut self, designer: &GuideDesigner, text: &str) -> &[ScoredGuide] {
        self.evaluation_results = designer.evaluate(text);
        &self.evaluation_results
    }

    pub fn run_primers(
        &mut self,
        designer: &GuideDesigner,
        params: &PrimerParameters,
    ) -> Result<&PrimerPair> {
        let pair = designer.design_primers(self.require_target()?, params)?;
        self.primer_results = vec![pair];
        Ok(&self.primer_results[0])
    }

    pub fn export(&self) -> ExportRecord {
        ExportRecord::new(
            self.target.clone(),
            self.design_results.clone(),
            self.evaluation_results.clone(),
            self.primer_results.clone(),
        )
    }
}
