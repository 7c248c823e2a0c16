//! Semantic deduplication primitives
//!
//! Pure math over already-computed embedding vectors. Embedding itself is an
//! application port; these functions decide which fragments are redundant
//! and fold them together.

pub mod merge;
pub mod similarity;

pub use merge::{MERGE_SEPARATOR, merge_fragments};
pub use similarity::{DEFAULT_SIMILARITY_THRESHOLD, SimilarityPair, cosine_similarity, find_pairs};
