use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Number of bases read after the guide as the candidate PAM
pub const PAM_WINDOW: usize = 3;

const NGG: &str = "NGG";
const NGG_REGEX: &str = "^[ATCG]GG$";

/// Nuclease systems with their PAM and default guide length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CasSystem {
    SpCas9,
    SaCas9,
    Cas12a,
    Cas13,
}

impl CasSystem {
    pub fn get(name: &str) -> Option<CasSystem> {
        match name.to_ascii_lowercase().as_ref() {
            "spcas9" | "cas9" => Some(CasSystem::SpCas9),
            "sacas9" => Some(CasSystem::SaCas9),
            "cas12a" | "cpf1" => Some(CasSystem::Cas12a),
            "cas13" => Some(CasSystem::Cas13),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CasSystem::SpCas9 => "SpCas9",
            CasSystem::SaCas9 => "SaCas9",
            CasSystem::Cas12a => "Cas12a",
            CasSystem::Cas13 => "Cas13",
        }
    }

    pub fn pam(&self) -> &'static str {
        match self {
            CasSystem::SpCas9 => NGG,
            CasSystem::SaCas9 => "NNGRRT",
            CasSystem::Cas12a => "TTTV",
            CasSystem::Cas13 => "H",
        }
    }

    pub fn guide_length(&self) -> usize {
        match self {
            CasSystem::SpCas9 => 20,
            CasSystem::SaCas9 => 21,
            CasSystem::Cas12a => 23,
            CasSystem::Cas13 => 28,
        }
    }
}

/// Tests the 3-base window following a guide against the configured PAM.
///
/// Only `NGG` is matched for real. Every other pattern, the empty one included, accepts any
/// window; these systems are listed for configuration but have no IUPAC matcher.
#[derive(Debug, Clone)]
pub enum PamMatcher {
    Ngg(Regex),
    AcceptAll,
}

impl PamMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern == NGG {
            let regex = Regex::new(NGG_REGEX)
                .map_err(|e| Error::InvalidParameter(format!("PAM pattern {}: {}", pattern, e)))?;
            Ok(PamMatcher::Ngg(regex))
        } else {
            debug!("PAM pattern '{}' has no matcher, accepting every window", pattern);
            Ok(PamMatcher::AcceptAll)
        }
    }

    pub fn is_match(&self, window: &str) -> bool {
        match self {
            PamMatcher::Ngg(regex) => regex.is_match(window),
            PamMatcher::AcceptAll => true,
        }
    }
}
