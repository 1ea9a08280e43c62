//! Per-guide heuristics, the composite score and the ranking applied to design results.

pub mod guide_scorer;
pub mod ranking;

pub use guide_scorer::{score_candidates, score_guide};
pub use ranking::rank_guides;
