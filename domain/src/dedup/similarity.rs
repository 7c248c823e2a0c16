//! Cosine similarity and pair detection

use serde::{Deserialize, Serialize};

/// Threshold above which two fragments count as redundant
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.8;

/// Two fragment indices whose similarity exceeded the threshold (`i < j`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub i: usize,
    pub j: usize,
    pub score: f32,
}

impl SimilarityPair {
    pub fn indices(&self) -> (usize, usize) {
        (self.i, self.j)
    }
}

/// Cosine similarity in `[-1, 1]`.
///
/// Vectors of different length, or any zero vector, score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Every unordered pair `(i, j)`, `i < j`, whose similarity strictly exceeds
/// `threshold`, in lexicographic index order.
pub fn find_pairs<V: AsRef<[f32]>>(vectors: &[V], threshold: f32) -> Vec<SimilarityPair> {
    let mut pairs = Vec::new();
    for i in 0..vectors.len() {
        for j in (i + 1)..vectors.len() {
            let score = cosine_similarity(vectors[i].as_ref(), vectors[j].as_ref());
            if score > threshold {
                pairs.push(SimilarityPair { i, j, score });
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(angle_cos: f32) -> Vec<f32> {
        vec![angle_cos, (1.0 - angle_cos * angle_cos).sqrt()]
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mismatched_or_zero_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_find_pairs_scenario() {
        // v0 = x axis; v1 at cos 0.9 from v0; v2 chosen so cos(v0,v2)=cos(v1,v2)=0.5
        let v0 = vec![1.0, 0.0, 0.0];
        let v1 = vec![0.9, (1.0f32 - 0.81).sqrt(), 0.0];
        // v2 = (0.5, y, z) with v1.v2 = 0.5
        let y = (0.5 - 0.9 * 0.5) / (1.0f32 - 0.81).sqrt();
        let z = (1.0 - 0.25 - y * y).sqrt();
        let v2 = vec![0.5, y, z];

        assert!((cosine_similarity(&v0, &v1) - 0.9).abs() < 1e-4);
        assert!((cosine_similarity(&v0, &v2) - 0.5).abs() < 1e-4);
        assert!((cosine_similarity(&v1, &v2) - 0.5).abs() < 1e-4);

        let pairs = find_pairs(&[v0, v1, v2], 0.8);
        let indices: Vec<(usize, usize)> = pairs.iter().map(SimilarityPair::indices).collect();
        assert_eq!(indices, vec![(0, 1)]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let a = unit(1.0);
        let b = unit(0.8);
        let score = cosine_similarity(&a, &b);
        let pairs = find_pairs(&[a, b], score);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_never_self_pairs_and_ordered() {
        let same = vec![vec![1.0, 0.0]; 4];
        let pairs = find_pairs(&same, 0.5);
        assert_eq!(pairs.len(), 6);
        for pair in &pairs {
            assert!(pair.i < pair.j);
        }
    }

    #[test]
    fn test_empty_input() {
        let vectors: Vec<Vec<f32>> = vec![];
        assert!(find_pairs(&vectors, 0.8).is_empty());
    }
}
