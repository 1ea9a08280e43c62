//! CRISPR guide design and scoring.
//!
//! Candidate guides are found next to a PAM on either strand of a target sequence, scored on GC
//! content, rule-based efficiency, nucleotide diversity, self-complementarity and homopolymer
//! runs, then filtered and ranked on the composite of efficiency, specificity and GC score.
//! Flanking primers for validation PCR and a standalone evaluation of pasted guides are provided
//! alongside. All computation is synchronous and free of shared state; callers own a
//! [`GuideDesigner`] and, optionally, a [`DesignSession`] holding the latest results.

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod helper_functions;
pub mod models;
pub mod primers;
pub mod scoring;
pub mod site_search;
pub mod validation;

pub use config::DesignerConfig;
pub use engine::{DesignOutcome, DesignSession, DesignSummary, GuideDesigner};
pub use error::{Error, Result};
pub use models::{
    DesignParameters, GuideCandidate, GuideScores, Primer, PrimerDirection, PrimerPair,
    PrimerParameters, ScoredGuide, ScoringLimits, SequenceSource, Strand, TargetSequence,
    TargetStrand,
};
pub use site_search::CasSystem;
pub use validation::validate_target;
