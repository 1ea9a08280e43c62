use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{PrimerPair, ScoredGuide, TargetSequence};

/// Persisted snapshot of a design session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    /// Seconds since the Unix epoch
    pub timestamp: u64,
    pub target: Option<TargetSequence>,
    pub design_results: Vec<ScoredGuide>,
    pub evaluation_results: Vec<ScoredGuide>,
    pub primer_results: Vec<PrimerPair>,
}

impl ExportRecord {
    pub fn new(
        target: Option<TargetSequence>,
        design_results: Vec<ScoredGuide>,
        evaluation_results: Vec<ScoredGuide>,
        primer_results: Vec<PrimerPair>,
    ) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        Self {
            timestamp,
            target,
            design_results,
            evaluation_results,
            primer_results,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!("Results exported to {}", path.display());
        Ok(())
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Flat row for tabular output. Genomic columns are empty for evaluated guides.
#[derive(Debug, Serialize)]
struct GuideRow<'a> {
    rank: usize,
    sequence: &'a str,
    pam: Option<&'a str>,
    strand: Option<char>,
    position: Option<usize>,
    chromosome: Option<&'a str>,
    genomic_position: Option<u64>,
    gc_content: f64,
    gc_score: f64,
    efficiency_score: f64,
    specificity_score: f64,
    secondary_structure_score: f64,
    homopolymer_score: f64,
    overall_score: f64,
}

/// Write guides as CSV, one row per guide in the given order
pub fn write_guides_csv<P: AsRef<Path>>(
    path: P,
    guides: &[ScoredGuide],
    target: Option<&TargetSequence>,
) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;
    debug!("CSV writer initialized for {}", path.display());

    for (i, guide) in guides.iter().enumerate() {
        let scores = &guide.scores;
        wtr.serialize(GuideRow {
            rank: i + 1,
            sequence: &guide.sequence,
            pam: guide.pam_site.as_deref(),
            strand: guide.strand.map(|strand| strand.symbol()),
            position: guide.position,
            chromosome: target
                .map(|target| target.chromosome.as_str())
                .filter(|chrom| !chrom.is_empty()),
            genomic_position: target.and_then(|target| guide.genomic_position(target)),
            gc_content: scores.gc_content,
            gc_score: scores.gc_score,
            efficiency_score: scores.efficiency_score,
            specificity_score: scores.specificity_score,
            secondary_structure_score: scores.secondary_structure_score,
            homopolymer_score: scores.homopolymer_score,
            overall_score: scores.overall_score,
        })?;
    }
    wtr.flush()?;

    info!("{} guides written to {}", guides.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GuideScores, SequenceSource, Strand};

    fn placed_guide() -> ScoredGuide {
        ScoredGuide {
            sequence: "ATGCATGCATGCATGCATGC".to_string(),
            pam_site: Some("TGG".to_string()),
            position: Some(5),
            strand: Some(Strand::Minus),
            length: 20,
            scores: GuideScores {
                gc_content: 50.0,
                gc_score: 1.0,
                efficiency_score: 0.8,
                specificity_score: 0.7,
                secondary_structure_score: 0.6,
                homopolymer_score: 1.0,
                overall_score: 0.8 * 0.7,
            },
        }
    }

    #[test]
    fn json_uses_export_field_names() {
        let record = ExportRecord::new(
            Some(TargetSequence::direct("ACGT")),
            vec![placed_guide()],
            vec![],
            vec![],
        );
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        for key in ["timestamp", "target", "designResults", "evaluationResults", "primerResults"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        let guide = &value["designResults"][0];
        assert_eq!(guide["pamSite"], "TGG");
        assert_eq!(guide["strand"], "minus");
        assert_eq!(guide["overallScore"], 0.8 * 0.7);
        assert_eq!(value["target"]["source"], "direct");
    }

    #[test]
    fn json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let record = ExportRecord::new(None, vec![], vec![placed_guide()], vec![]);
        record.write_json(&path).unwrap();
        assert_eq!(ExportRecord::read_json(&path).unwrap(), record);
    }

    #[test]
    fn csv_rows_carry_genomic_positions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guides.csv");
        let target =
            TargetSequence::new("A".repeat(60), "chr3", 1_000, 1_059, SequenceSource::Region);
        let evaluated = ScoredGuide::unplaced("GGGG".to_string(), GuideScores::default());

        write_guides_csv(&path, &[placed_guide(), evaluated], Some(&target)).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0]
            .starts_with("rank,sequence,pam,strand,position,chromosome,genomic_position"));
        assert!(lines[1].starts_with("1,ATGCATGCATGCATGCATGC,TGG,-,5,chr3,1004,"));
        assert!(lines[2].starts_with("2,GGGG,,,,chr3,,"));
    }
}
