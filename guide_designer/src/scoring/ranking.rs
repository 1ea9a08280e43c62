use tracing::debug;

use crate::models::{DesignParameters, ScoredGuide};

/// Keep guides whose composite score reaches the threshold, best first, at most `max_guides`.
///
/// The sort is stable so guides with equal scores keep the order the site finder produced them in.
/// An empty result means no suitable guides and is not an error.
pub fn rank_guides(guides: Vec<ScoredGuide>, params: &DesignParameters) -> Vec<ScoredGuide> {
    let total = guides.len();
    let mut ranked: Vec<ScoredGuide> = guides
        .into_iter()
        .filter(|guide| guide.overall_score() >= params.min_score_threshold)
        .collect();
    debug!(
        "{} of {} guides pass the {} score threshold",
        ranked.len(),
        total,
        params.min_score_threshold
    );

    ranked.sort_by(|a, b| b.overall_score().total_cmp(&a.overall_score()));
    ranked.truncate(params.max_guides);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GuideScores;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn guide(tag: &str, overall: f64) -> ScoredGuide {
        ScoredGuide::unplaced(
            tag.to_string(),
            GuideScores {
                overall_score: overall,
                ..GuideScores::default()
            },
        )
    }

    fn params(threshold: f64, max_guides: usize) -> DesignParameters {
        DesignParameters {
            min_score_threshold: threshold,
            max_guides,
            ..DesignParameters::default()
        }
    }

    #[test]
    fn filters_sorts_and_truncates() {
        let guides = vec![
            guide("a", 0.2),
            guide("b", 0.9),
            guide("c", 0.5),
            guide("d", 0.7),
        ];
        let ranked = rank_guides(guides, &params(0.5, 2));
        let tags: Vec<&str> = ranked.iter().map(|g| g.sequence.as_str()).collect();
        assert_eq!(tags, vec!["b", "d"]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let ranked = rank_guides(vec![guide("a", 0.5)], &params(0.5, 10));
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn ties_keep_input_order() {
        let guides = vec![
            guide("first", 0.6),
            guide("top", 0.8),
            guide("second", 0.6),
            guide("third", 0.6),
        ];
        let ranked = rank_guides(guides, &params(0.0, 10));
        let tags: Vec<&str> = ranked.iter().map(|g| g.sequence.as_str()).collect();
        assert_eq!(tags, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn nothing_passing_is_empty() {
        let ranked = rank_guides(vec![guide("a", 0.1), guide("b", 0.2)], &params(0.9, 10));
        assert!(ranked.is_empty());
    }

    #[test]
    fn random_inputs_respect_ranking_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let n = rng.gen_range(0..40);
            let guides: Vec<ScoredGuide> = (0..n)
                .map(|i| guide(&i.to_string(), rng.gen_range(0.0..1.0)))
                .collect();
            let threshold = rng.gen_range(0.0..1.0);
            let max_guides = rng.gen_range(1..15);
            let ranked = rank_guides(guides, &params(threshold, max_guides));

            assert!(ranked.len() <= max_guides);
            assert!(ranked.iter().all(|g| g.overall_score() >= threshold));
            assert!(ranked
                .windows(2)
                .all(|w| w[0].overall_score() >= w[1].overall_score()));
        }
    }
}
