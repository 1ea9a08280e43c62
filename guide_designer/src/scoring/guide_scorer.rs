use rayon::prelude::*;
use tracing::debug;

use crate::helper_functions::{gc_percent, reverse_complement};
use crate::models::{GuideCandidate, GuideScores, ScoredGuide, ScoringLimits};

/// Longest self-complementary run considered by the hairpin heuristic
pub const MAX_SELF_MATCH: usize = 6;

const EFFICIENCY_BASE: f64 = 0.5;
const POLY_T_TERMINATOR: &[u8] = b"TTTT";

/// Score a GC percentage against the allowed window
///
/// # Returns
///
/// * `0` outside `[min_gc, max_gc]`, otherwise a triangle peaking at 50% and reaching zero 30
///   points away from it
pub fn gc_score(gc_content: f64, limits: &ScoringLimits) -> f64 {
    if gc_content < limits.min_gc as f64 || gc_content > limits.max_gc as f64 {
        return 0.0;
    }
    (1.0 - (gc_content - 50.0).abs() / 30.0).max(0.0)
}

/// Rule-based on-target efficiency estimate.
///
/// Offsets are those of a 20nt SpCas9 spacer. Shorter guides simply miss the bonuses whose
/// positions they do not have.
pub fn efficiency_score(guide: &str) -> f64 {
    let bases = guide.as_bytes();
    let len = bases.len();
    let mut score = EFFICIENCY_BASE;

    if bases.first() == Some(&b'G') {
        score += 0.1;
    }
    if bases.get(19) == Some(&b'G') {
        score += 0.1;
    }
    if bases[16.min(len)..20.min(len)].contains(&b'T') {
        score += 0.1;
    }

    let tail = &bases[len.saturating_sub(5)..];
    if !tail.windows(POLY_T_TERMINATOR.len()).any(|w| w == POLY_T_TERMINATOR) {
        score += 0.2;
    }

    score.clamp(0.0, 1.0)
}

/// Step function over nucleotide diversity (distinct bases / 4)
pub fn specificity_score(guide: &str) -> f64 {
    let mut seen = [false; 256];
    for base in guide.bytes() {
        seen[base.to_ascii_uppercase() as usize] = true;
    }
    let diversity = seen.iter().filter(|present| **present).count() as f64 / 4.0;

    if diversity < 0.5 {
        0.3
    } else if diversity < 0.75 {
        0.7
    } else {
        0.9
    }
}

/// Longest run, capped at [`MAX_SELF_MATCH`], where the guide matches its own reverse complement
/// for any pair of start offsets.
pub fn max_self_complementarity(guide: &str) -> usize {
    let bases = guide.as_bytes();
    let revcomp = reverse_complement(guide);
    let revcomp = revcomp.as_bytes();
    let mut max_match = 0;

    for i in 0..bases.len() {
        for j in 0..revcomp.len() {
            let run = bases[i..]
                .iter()
                .zip(&revcomp[j..])
                .take(MAX_SELF_MATCH)
                .take_while(|(a, b)| a == b)
                .count();
            max_match = max_match.max(run);
            if max_match == MAX_SELF_MATCH {
                return max_match;
            }
        }
    }
    max_match
}

pub fn secondary_structure_score(guide: &str) -> f64 {
    (1.0 - max_self_complementarity(guide) as f64 / 10.0).max(0.0)
}

/// Length of the longest single-base run of at least two bases, `0` if there is none
pub fn longest_homopolymer(guide: &str) -> usize {
    let bases = guide.as_bytes();
    let mut longest = 0;
    let mut current = 0;

    for (i, base) in bases.iter().enumerate() {
        if i > 0 && bases[i - 1] == *base {
            current += 1;
        } else {
            current = 1;
        }
        if current >= 2 {
            longest = longest.max(current);
        }
    }
    longest
}

pub fn homopolymer_score(guide: &str, max_homopolymer: usize) -> f64 {
    let longest = longest_homopolymer(guide);
    if longest > max_homopolymer {
        (1.0 - (longest - max_homopolymer) as f64 / 5.0).max(0.0)
    } else {
        1.0
    }
}

/// Compute every sub-score of a guide and the composite score
///
/// # Arguments
///
/// * `guide` - Guide sequence without PAM, expected uppercase
/// * `limits` - GC window and homopolymer limit
///
/// # Returns
///
/// * All sub-scores. `overall_score` is the product of efficiency, specificity and GC score;
///   the secondary structure and homopolymer scores are reported alongside but do not enter it.
pub fn score_guide(guide: &str, limits: &ScoringLimits) -> GuideScores {
    let gc_content = gc_percent(guide);
    let gc_score = gc_score(gc_content, limits);
    let efficiency_score = efficiency_score(guide);
    let specificity_score = specificity_score(guide);

    GuideScores {
        gc_content,
        gc_score,
        efficiency_score,
        specificity_score,
        secondary_structure_score: secondary_structure_score(guide),
        homopolymer_score: homopolymer_score(guide, limits.max_homopolymer),
        overall_score: efficiency_score * specificity_score * gc_score,
    }
}

/// Score candidates in parallel, keeping their input order
pub fn score_candidates(
    candidates: Vec<GuideCandidate>,
    limits: &ScoringLimits,
) -> Vec<ScoredGuide> {
    debug!("Scoring {} candidate guides", candidates.len());
    candidates
        .into_par_iter()
        .map(|candidate| {
            let scores = score_guide(&candidate.sequence, limits);
            ScoredGuide::from_candidate(candidate, scores)
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
