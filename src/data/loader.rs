// ============================================================
// Layer 4 — Question Pair Loader
// ============================================================
// Reads labelled question pairs from a CSV file using the csv
// crate, mapping columns to QuestionPair fields by header name.
//
// Expected header (extra columns such as id/qid1/qid2 are fine):
//
//   id,qid1,qid2,question1,question2,is_duplicate
//   0,1,2,"What is AI?","What's artificial intelligence?",1
//
// Quoted cells may contain commas and newlines.
//
// A missing file is reported as PipelineError::MissingInputFile
// before anything else happens. A malformed row, including an
// is_duplicate other than 0 or 1, aborts the load with the row
// number in the error context.
//
// An empty question cell stays empty text and later encodes to the
// zero vector. It is deliberately not turned into a placeholder word
// such as "nan", which would get a pseudo-random embedding of its own.
//
// Reference: csv crate documentation (serde deserialisation)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::domain::error::PipelineError;
use crate::domain::question_pair::QuestionPair;
use crate::domain::traits::PairSource;

/// Loads every row of a question-pair CSV file.
pub struct CsvPairLoader {
    path: PathBuf,
}

impl CsvPairLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PairSource for CsvPairLoader {
    fn load_all(&self) -> Result<Vec<QuestionPair>> {
        if !self.path.exists() {
            return Err(PipelineError::MissingInputFile(self.path.clone()).into());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Cannot open '{}'", self.path.display()))?;

        let mut pairs = Vec::new();
        for (i, row) in reader.deserialize::<QuestionPair>().enumerate() {
            // +2: one for the header, one for 1-based numbering
            let pair = row
                .map_err(anyhow::Error::from)
                .and_then(check_label)
                .with_context(|| {
                    format!("Malformed row {} in '{}'", i + 2, self.path.display())
                })?;
            pairs.push(pair);
        }

        tracing::info!(
            "Loaded {} question pairs from '{}'",
            pairs.len(),
            self.path.display()
        );
        Ok(pairs)
    }
}

/// `is_duplicate` must be exactly 0 or 1; NaN fails both comparisons.
fn check_label(pair: QuestionPair) -> Result<QuestionPair> {
    if pair.is_duplicate == 0.0 || pair.is_duplicate == 1.0 {
        Ok(pair)
    } else {
        Err(PipelineError::InvalidArgument(format!(
            "is_duplicate must be 0 or 1, got {}",
            pair.is_duplicate
        ))
        .into())
    }
}
