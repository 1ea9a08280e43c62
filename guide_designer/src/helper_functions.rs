use std::env;
use std::path::PathBuf;

use polars::error::PolarsResult;
use polars::frame::DataFrame;
use polars::prelude::{CsvReadOptions, SerReader};

pub const ROOT_ENV_VAR: &str = "GUIDE_DESIGNER_ROOT";

pub fn project_root() -> PathBuf {
    match env::var_os(ROOT_ENV_VAR) {
        Some(val) => PathBuf::from(val),
        None => {
            // Fall back to current directory if the root is not set
            env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }
    }
}

pub fn read_csv(file_path: &str) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(PathBuf::from(file_path)))?
        .finish()
}

/// Watson-Crick complement of a single base, case preserved. Anything else is returned as is.
pub fn complement(base: char) -> char {
    match base {
        'A' => 'T',
        'T' => 'A',
        'G' => 'C',
        'C' => 'G',
        'a' => 't',
        't' => 'a',
        'g' => 'c',
        'c' => 'g',
        other => other,
    }
}

/// Reverse complement of a sequence. Non-ACGT characters pass through in reversed position.
pub fn reverse_complement(sequence: &str) -> String {
    sequence.chars().rev().map(complement).collect()
}

/// Number of G and C bases, either case
pub fn gc_count(sequence: &str) -> usize {
    sequence
        .bytes()
        .filter(|base| matches!(base, b'G' | b'C' | b'g' | b'c'))
        .count()
}

/// GC content in percent, 0 for an empty sequence
pub fn gc_percent(sequence: &str) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }
    100.0 * gc_count(sequence) as f64 / sequence.len() as f64
}

/// Drops whitespace and FASTA header lines and uppercases what remains
pub fn clean_sequence(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with('>'))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const ALPHABET: [char; 8] = ['A', 'T', 'G', 'C', 'a', 't', 'g', 'c'];

    #[test]
    fn reverse_complement_of_atgc() {
        assert_eq!(reverse_complement("ATGC"), "GCAT");
    }

    #[test]
    fn reverse_complement_keeps_case_and_unknowns() {
        assert_eq!(reverse_complement("aTgN-c"), "g-NcAt");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn reverse_complement_is_an_involution() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let len = rng.gen_range(0..64);
            let seq: String = (0..len)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
                .collect();
            assert_eq!(reverse_complement(&reverse_complement(&seq)), seq);
        }
    }

    #[test]
    fn gc_content_counts_both_cases() {
        assert_eq!(gc_count("GgCcAT"), 4);
        assert!((gc_percent("GCAT") - 50.0).abs() < 1e-12);
        assert_eq!(gc_percent(""), 0.0);
    }

    #[test]
    fn clean_sequence_strips_fasta_header() {
        let raw = ">chr1:100-120 test\nacgt ACGT\nNNaa\n";
        assert_eq!(clean_sequence(raw), "ACGTACGTNNAA");
    }
}
