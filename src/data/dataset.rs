use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::encoder::SentenceEncoder;
use crate::domain::error::PipelineError;
use crate::domain::question_pair::QuestionPair;

/// One training example: both sentence vectors plus the 0/1 label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSample {
    pub q1:    Vec<f32>,
    pub q2:    Vec<f32>,
    pub label: f32,
}

/// Aligned question-vector pairs. Immutable once built.
#[derive(Debug, Clone)]
pub struct PairDataset {
    q1:     Vec<Vec<f32>>,
    q2:     Vec<Vec<f32>>,
    labels: Vec<f32>,
    dim:    usize,
}

impl PairDataset {
    /// Build from three aligned sequences.
    ///
    /// Fails with `ShapeMismatch` when the sequences differ in length
    /// or any vector is not as wide as the first question1 vector.
    pub fn new(
        q1:     Vec<Vec<f32>>,
        q2:     Vec<Vec<f32>>,
        labels: Vec<f32>,
    ) -> Result<Self, PipelineError> {
        let n = q1.len();
        if q2.len() != n {
            return Err(PipelineError::ShapeMismatch {
                what: "question2 vectors", expected: n, actual: q2.len(),
            });
        }
        if labels.len() != n {
            return Err(PipelineError::ShapeMismatch {
                what: "labels", expected: n, actual: labels.len(),
            });
        }

        let dim = q1.first().map_or(0, Vec::len);
        if let Some(bad) = q1.iter().chain(q2.iter()).find(|v| v.len() != dim) {
            return Err(PipelineError::ShapeMismatch {
                what: "vector width", expected: dim, actual: bad.len(),
            });
        }

        Ok(Self { q1, q2, labels, dim })
    }

    /// Encode every pair with `encoder` and collect the labels.
    pub fn from_pairs(
        pairs:   &[QuestionPair],
        encoder: &mut SentenceEncoder,
    ) -> Result<Self, PipelineError> {
        let q1     = pairs.iter().map(|p| encoder.encode(&p.question1)).collect();
        let q2     = pairs.iter().map(|p| encoder.encode(&p.question2)).collect();
        let labels = pairs.iter().map(QuestionPair::label).collect();
        Self::new(q1, q2, labels)
    }

    pub fn sample_count(&self) -> usize { self.labels.len() }

    /// Width of every stored vector (0 for an empty dataset)
    pub fn dim(&self) -> usize { self.dim }

    /// Fraction of samples labelled duplicate
    pub fn positive_rate(&self) -> f32 {
        if self.labels.is_empty() {
            return 0.0;
        }
        self.labels.iter().sum::<f32>() / self.labels.len() as f32
    }
}

impl Dataset<PairSample> for PairDataset {
    fn get(&self, index: usize) -> Option<PairSample> {
        Some(PairSample {
            q1:    self.q1.get(index)?.clone(),
            q2:    self.q2.get(index)?.clone(),
            label: *self.labels.get(index)?,
        })
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vecs(n: usize, dim: usize) -> Vec<Vec<f32>> {
        (0..n).map(|i| vec![i as f32; dim]).collect()
    }

    #[test]
    fn test_label_count_mismatch() {
        let err = PairDataset::new(vecs(3, 4), vecs(3, 4), vec![0.0; 4]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ShapeMismatch { what: "labels", expected: 3, actual: 4 }
        ));
    }

    #[test]
    fn test_question2_count_mismatch() {
        let err = PairDataset::new(vecs(3, 4), vecs(2, 4), vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, PipelineError::ShapeMismatch { what: "question2 vectors", .. }));
    }

    #[test]
    fn test_ragged_vectors_rejected() {
        let mut q2 = vecs(3, 4);
        q2[1] = vec![0.0; 5];
        let err = PairDataset::new(vecs(3, 4), q2, vec![1.0; 3]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ShapeMismatch { what: "vector width", expected: 4, actual: 5 }
        ));
    }

    #[test]
    fn test_get_and_len() {
        let ds = PairDataset::new(vecs(3, 2), vecs(3, 2), vec![1.0, 0.0, 1.0]).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.dim(), 2);

        let s = ds.get(1).unwrap();
        assert_eq!(s.q1, vec![1.0, 1.0]);
        assert_eq!(s.label, 0.0);
        assert!(ds.get(3).is_none());
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        let ds = PairDataset::new(Vec::new(), Vec::new(), Vec::new()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.positive_rate(), 0.0);
    }

    #[test]
    fn test_from_pairs_encodes_both_sides() {
        let pairs = vec![
            QuestionPair::new("what is ai", "what is ai", true),
            QuestionPair::new("cats are great", "dogs are bad", false),
        ];
        let mut enc = SentenceEncoder::new(8);
        let ds = PairDataset::from_pairs(&pairs, &mut enc).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dim(), 8);
        let first = ds.get(0).unwrap();
        assert_eq!(first.q1, first.q2);
        assert_eq!(first.label, 1.0);
        assert_eq!(ds.positive_rate(), 0.5);
    }
}
