//! Safety filtering: profanity matching and stem exclusion.
//!
//! The profanity pattern is built once at startup from the word-list
//! resource and the filter is passed by reference into the pipeline.
//! A missing or empty word list yields a permissive filter (fail-open,
//! logged by the caller at startup), never a startup failure.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use super::textnorm::norm_lower;
use super::Card;

/// Immutable safety filter, constructed at process start.
#[derive(Debug, Clone)]
pub struct SafetyFilter {
    /// `None` means no usable word list: every card passes the
    /// family-friendly check.
    profanity: Option<Regex>,
}

impl SafetyFilter {
    /// Build the filter from a newline-separated word list. Blank lines
    /// are skipped; entries are matched case-insensitively as
    /// substrings. An unusable list degrades to the permissive filter.
    pub fn from_word_list(content: &str) -> Self {
        let words: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(regex::escape)
            .collect();

        if words.is_empty() {
            return Self::permissive();
        }

        let pattern = format!("({})", words.join("|"));
        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(re) => Self { profanity: Some(re) },
            Err(e) => {
                warn!("Failed to compile profanity pattern: {e} — filter is permissive");
                Self::permissive()
            }
        }
    }

    /// Filter with no word list; the family-friendly check passes
    /// everything.
    pub fn permissive() -> Self {
        Self { profanity: None }
    }

    /// True when no word list is active, for startup logging.
    pub fn is_permissive(&self) -> bool {
        self.profanity.is_none()
    }

    /// True when neither the target nor any forbidden word matches the
    /// profanity list.
    pub fn is_family_friendly(&self, card: &Card) -> bool {
        let Some(re) = &self.profanity else {
            return true;
        };
        if re.is_match(&card.target) {
            return false;
        }
        !card.forbidden.iter().any(|word| re.is_match(word))
    }

    /// True when no forbidden word trivially contains the target or is
    /// contained by it. Both sides are compared in normalized form.
    pub fn passes_stem_exclusion(&self, card: &Card) -> bool {
        let target = norm_lower(&card.target);
        for word in &card.forbidden {
            let norm = norm_lower(word);
            if norm.is_empty() {
                continue;
            }
            if target.contains(&norm) || norm.contains(&target) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(target: &str, forbidden: &[&str]) -> Card {
        Card::new(
            "en",
            "family",
            "easy",
            target,
            forbidden.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_profane_target_rejected() {
        let filter = SafetyFilter::from_word_list("damn\nbollocks\n");
        assert!(!filter.is_family_friendly(&card("Damn", &["Curse"])));
        assert!(!filter.is_family_friendly(&card("Goddamn", &["Curse"])));
    }

    #[test]
    fn test_profane_forbidden_word_rejected() {
        let filter = SafetyFilter::from_word_list("damn\n");
        assert!(!filter.is_family_friendly(&card("Dog", &["Bark", "DAMN"])));
    }

    #[test]
    fn test_clean_card_passes() {
        let filter = SafetyFilter::from_word_list("damn\n");
        assert!(filter.is_family_friendly(&card("Dog", &["Bark", "Leash"])));
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let filter = SafetyFilter::from_word_list("ass\n");
        assert!(!filter.is_family_friendly(&card("Bypass", &["Road"])));
    }

    #[test]
    fn test_blank_lines_and_whitespace_ignored() {
        let filter = SafetyFilter::from_word_list("\n  damn  \n\n");
        assert!(!filter.is_family_friendly(&card("damn", &["x"])));
        assert!(filter.is_family_friendly(&card("Dog", &["Bark"])));
    }

    #[test]
    fn test_empty_list_is_permissive_not_reject_all() {
        // Fail-open: with no word list, every card passes.
        let filter = SafetyFilter::from_word_list("");
        assert!(filter.is_permissive());
        assert!(filter.is_family_friendly(&card("Anything", &["At", "All"])));
    }

    #[test]
    fn test_special_characters_escaped() {
        let filter = SafetyFilter::from_word_list("a.b\n");
        // '.' is literal, not a wildcard.
        assert!(filter.is_family_friendly(&card("acb", &["x"])));
        assert!(!filter.is_family_friendly(&card("a.b", &["x"])));
    }

    // ── Stem exclusion ──────────────────────────────────────────────

    #[test]
    fn test_forbidden_contains_target() {
        let filter = SafetyFilter::permissive();
        assert!(!filter.passes_stem_exclusion(&card("Dog", &["Doghouse"])));
    }

    #[test]
    fn test_target_contains_forbidden() {
        let filter = SafetyFilter::permissive();
        assert!(!filter.passes_stem_exclusion(&card("Doghouse", &["Dog"])));
    }

    #[test]
    fn test_stem_exclusion_normalizes_both_sides() {
        // Both sides run through norm_lower, so diacritics and case
        // never hide a trivial overlap.
        let filter = SafetyFilter::permissive();
        assert!(!filter.passes_stem_exclusion(&card("Café", &["CAFETERIA"])));
        assert!(!filter.passes_stem_exclusion(&card("Cafeteria", &["café"])));
    }

    #[test]
    fn test_unrelated_words_pass() {
        let filter = SafetyFilter::permissive();
        assert!(filter.passes_stem_exclusion(&card("Dog", &["Bark", "Leash", "Fur"])));
    }

    #[test]
    fn test_whitespace_only_forbidden_word_ignored() {
        // A word that normalizes to empty would be a substring of
        // everything; it must not reject the card by itself.
        let filter = SafetyFilter::permissive();
        assert!(filter.passes_stem_exclusion(&card("Dog", &["  ", "Bark"])));
    }
}
