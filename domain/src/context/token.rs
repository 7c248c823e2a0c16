//! Token estimation

/// Estimates how many tokens a model would see for a piece of text.
///
/// Implementations must be deterministic and monotonic: appending text
/// never lowers the estimate.
pub trait TokenEstimator: Send + Sync {
    fn estimate(&self, text: &str) -> usize;
}

/// Character-ratio heuristic (roughly four characters per token for
/// English prose), rounded up so any non-empty text costs at least one token.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicEstimator {
    chars_per_token: usize,
}

impl HeuristicEstimator {
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Default for HeuristicEstimator {
    fn default() -> Self {
        Self::new(4)
    }
}

impl TokenEstimator for HeuristicEstimator {
    fn estimate(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chars_per_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_zero() {
        assert_eq!(HeuristicEstimator::default().estimate(""), 0);
    }

    #[test]
    fn test_rounds_up() {
        let estimator = HeuristicEstimator::default();
        assert_eq!(estimator.estimate("abc"), 1);
        assert_eq!(estimator.estimate("abcde"), 2);
    }

    #[test]
    fn test_monotonic_under_append() {
        let estimator = HeuristicEstimator::default();
        let mut text = String::new();
        let mut last = 0;
        for word in ["alpha ", "beta ", "gamma ", "delta"] {
            text.push_str(word);
            let now = estimator.estimate(&text);
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let estimator = HeuristicEstimator::new(1);
        assert_eq!(estimator.estimate("日本"), 2);
    }
}
