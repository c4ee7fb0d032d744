//! Text normalization for equality and substring comparisons.
//!
//! The normalized form is used both for the stem-exclusion check and as
//! the storage uniqueness key (`norm_target`).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a string for comparison: compatibility-decompose,
/// strip combining marks, lowercase, trim. Idempotent; empty input
/// stays empty.
pub fn norm_lower(text: &str) -> String {
    let stripped: String = text.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    stripped.to_lowercase().trim().to_string()
}
