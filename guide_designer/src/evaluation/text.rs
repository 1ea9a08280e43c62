use tracing::{info, warn};

use crate::models::{ScoredGuide, ScoringLimits};
use crate::scoring::score_guide;

/// Trimmed, uppercased, non-empty lines of a pasted guide block, in input order
pub fn parse_guide_block(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().to_ascii_uppercase())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Score every guide of a newline-separated block.
///
/// Produces one record per non-empty line, in order, without ranking or filtering. The limits are
/// passed explicitly so that design-run parameters never leak into evaluation.
pub fn evaluate_guides(text: &str, limits: &ScoringLimits) -> Vec<ScoredGuide> {
    let guides = parse_guide_block(text);
    info!("Evaluating {} guide sequences", guides.len());

    guides
        .into_iter()
        .map(|guide| {
            if guide.len() < 20 {
                warn!(
                    "Guide {} is {}nt, positional efficiency rules assume 20nt",
                    guide,
                    guide.len()
                );
            }
            let scores = score_guide(&guide, limits);
            ScoredGuide::unplaced(guide, scores)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_dropped() {
        let results = evaluate_guides("AAAA\n\nGGGG", &ScoringLimits::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].sequence, "AAAA");
        assert_eq!(results[1].sequence, "GGGG");
        assert!(results.iter().all(|r| r.position.is_none() && r.pam_site.is_none()));
    }

    #[test]
    fn lines_are_trimmed_and_uppercased() {
        let parsed = parse_guide_block("  acgtacgt \r\n\t\nGGCC\n   \n");
        assert_eq!(parsed, vec!["ACGTACGT".to_string(), "GGCC".to_string()]);
    }

    #[test]
    fn evaluation_uses_supplied_limits() {
        let guide = "GACTAAAAAGCTGACTGACG";
        let results = evaluate_guides(guide, &ScoringLimits::default());
        assert_eq!(results[0].length, 20);
        assert!((results[0].scores.homopolymer_score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn empty_input_gives_no_records() {
        assert!(evaluate_guides("\n \n", &ScoringLimits::default()).is_empty());
    }
}
