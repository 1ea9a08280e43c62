//! Scoring of externally supplied guide sequences, without a site search.

pub mod batch;
pub mod text;

pub use batch::{run_batch_evaluation, score_dataframe};
pub use text::{evaluate_guides, parse_guide_block};
