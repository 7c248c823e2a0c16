//! Folding redundant fragments together

use super::similarity::SimilarityPair;

/// Separator placed between merged fragment texts
pub const MERGE_SEPARATOR: &str = "\n\n";

/// Fold each paired fragment `j` into fragment `i` and drop `j`.
///
/// Pairs are applied in the order given. Merging is not transitive: with
/// pairs `(0, 1)` and `(1, 2)` fragment 0 absorbs 1 and fragment 1's original
/// text absorbs 2, so a chain never collapses into one fragment in a single
/// pass. Empty fragments are dropped once any pair applies; survivors keep
/// their original relative order.
pub fn merge_fragments(fragments: &[String], pairs: &[SimilarityPair]) -> Vec<String> {
    if pairs.is_empty() {
        return fragments.to_vec();
    }

    let mut merged: Vec<Option<String>> = fragments.iter().cloned().map(Some).collect();

    for pair in pairs {
        let (i, j) = pair.indices();
        if i >= fragments.len() || j >= fragments.len() || i == j {
            continue;
        }
        let base = merged[i].take().unwrap_or_else(|| fragments[i].clone());
        merged[i] = Some(format!("{}{}{}", base, MERGE_SEPARATOR, fragments[j]));
        merged[j] = None;
    }

    merged
        .into_iter()
        .flatten()
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(i: usize, j: usize) -> SimilarityPair {
        SimilarityPair { i, j, score: 0.9 }
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_pairs_returns_input_unchanged() {
        let input = texts(&["a", "", "c"]);
        assert_eq!(merge_fragments(&input, &[]), input);
    }

    #[test]
    fn test_single_pair_merges_and_preserves_order() {
        let input = texts(&["a", "b", "c", "d"]);
        let merged = merge_fragments(&input, &[pair(1, 3)]);
        assert_eq!(merged, texts(&["a", "b\n\nd", "c"]));
    }

    #[test]
    fn test_multiple_pairs_into_same_target_accumulate() {
        let input = texts(&["a", "b", "c"]);
        let merged = merge_fragments(&input, &[pair(0, 1), pair(0, 2)]);
        assert_eq!(merged, texts(&["a\n\nb\n\nc"]));
    }

    #[test]
    fn test_chained_pairs_not_transitive() {
        let input = texts(&["a", "b", "c"]);
        let merged = merge_fragments(&input, &[pair(0, 1), pair(1, 2)]);
        assert_eq!(merged, texts(&["a\n\nb", "b\n\nc"]));
    }

    #[test]
    fn test_empty_input_fragments_dropped_after_merge() {
        let input = texts(&["a", "", "c"]);
        let merged = merge_fragments(&input, &[pair(0, 2)]);
        assert_eq!(merged, texts(&["a\n\nc"]));
    }

    #[test]
    fn test_out_of_range_pairs_ignored() {
        let input = texts(&["a", "b"]);
        assert_eq!(merge_fragments(&input, &[pair(0, 5)]), input);
    }
}
