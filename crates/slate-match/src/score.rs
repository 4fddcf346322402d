//! Header similarity scoring.
//!
//! Uses Jaro-Winkler similarity as the base algorithm, combined with a
//! token-sorted edit-distance comparison so word order ("Revenue Total" vs
//! "Total Revenue") does not depress the score.

use rapidfuzz::distance::{jaro_winkler, levenshtein};
use slate_fingerprint::normalize::tokens;

/// Score boost floor when two headers share an exact normalized token.
///
/// Headers frequently differ only in qualifier noise ("Total Revenue" vs
/// "Revenue (EUR)"); a shared content token is strong evidence they label the
/// same logical column.
const SHARED_TOKEN_FLOOR: f64 = 0.85;

/// Capability interface for comparing two column names.
///
/// Implementations must be symmetric (`score(a, b) == score(b, a)`) and
/// return values in `[0, 1]`. The matcher depends only on this contract, so
/// the underlying algorithm is swappable and unit-testable in isolation.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, a: &str, b: &str) -> f64;

    /// Stable identifier distinguishing scorer implementations, e.g. when
    /// keying caches of derived results.
    fn name(&self) -> &'static str;
}

/// Default scorer: the best of whole-name Jaro-Winkler, token-sorted
/// normalized Levenshtein, and the shared-token floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenScorer;

impl TokenScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SimilarityScorer for TokenScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        let tokens_a = tokens(a);
        let tokens_b = tokens(b);

        if tokens_a.is_empty() || tokens_b.is_empty() {
            return if tokens_a == tokens_b { 1.0 } else { 0.0 };
        }

        let joined_a = tokens_a.join(" ");
        let joined_b = tokens_b.join(" ");
        let mut score = jaro_winkler::similarity(joined_a.chars(), joined_b.chars());

        let mut sorted_a = tokens_a.clone();
        let mut sorted_b = tokens_b.clone();
        sorted_a.sort();
        sorted_b.sort();
        let token_sort = levenshtein::normalized_similarity(
            sorted_a.join(" ").chars(),
            sorted_b.join(" ").chars(),
        );
        score = score.max(token_sort);

        if tokens_a.iter().any(|t| tokens_b.contains(t)) {
            score = score.max(SHARED_TOKEN_FLOOR);
        }

        score.clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "token"
    }
}
