use polars::prelude::*;
use tracing::{error, info};

use crate::error::Result;
use crate::helper_functions::read_csv;
use crate::models::{GuideScores, ScoringLimits};
use crate::scoring::score_guide;

pub const SCORE_COLUMNS: [&str; 7] = [
    "gc_content",
    "gc_score",
    "efficiency_score",
    "specificity_score",
    "secondary_structure_score",
    "homopolymer_score",
    "overall_score",
];

fn score_values(scores: &GuideScores) -> [f64; 7] {
    [
        scores.gc_content,
        scores.gc_score,
        scores.efficiency_score,
        scores.specificity_score,
        scores.secondary_structure_score,
        scores.homopolymer_score,
        scores.overall_score,
    ]
}

/// Apply the guide scorer to a DataFrame
///
/// # Arguments
///
/// * `df` - DataFrame containing guide sequences
/// * `sequence_column` - Name of column containing guide sequences
/// * `limits` - GC window and homopolymer limit
///
/// # Returns
///
/// * A DataFrame with one additional column per score. Null or blank sequences get null scores.
pub fn score_dataframe(
    df: &DataFrame,
    sequence_column: &str,
    limits: &ScoringLimits,
) -> PolarsResult<DataFrame> {
    let seq_strs = df.column(sequence_column)?.str()?;

    let mut columns: Vec<Vec<Option<f64>>> = (0..SCORE_COLUMNS.len())
        .map(|_| Vec::with_capacity(df.height()))
        .collect();

    for i in 0..df.height() {
        let guide = seq_strs
            .get(i)
            .map(|seq| seq.trim().to_ascii_uppercase())
            .filter(|seq| !seq.is_empty());

        match guide {
            Some(guide) => {
                let values = score_values(&score_guide(&guide, limits));
                for (column, value) in columns.iter_mut().zip(values) {
                    column.push(Some(value));
                }
            }
            None => columns.iter_mut().for_each(|column| column.push(None)),
        }
    }

    let mut result_df = df.clone();
    for (name, values) in SCORE_COLUMNS.iter().zip(columns) {
        result_df.with_column(Series::new(PlSmallStr::from(*name), values))?;
    }

    Ok(result_df)
}

/// Score a CSV guide library and write it back out with the score columns appended
pub fn run_batch_evaluation(
    input_path: &str,
    sequence_column: &str,
    output_path: &str,
    limits: &ScoringLimits,
) -> Result<DataFrame> {
    let df = read_csv(input_path).map_err(|e| {
        error!("Failed to read guide library {}: {}", input_path, e);
        e
    })?;
    info!("Scoring {} guides from {}", df.height(), input_path);

    let mut result_df = score_dataframe(&df, sequence_column, limits)?;

    let mut file = std::fs::File::create(output_path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut result_df)?;

    info!("Batch evaluation results saved to {}", output_path);
    Ok(result_df)
}
