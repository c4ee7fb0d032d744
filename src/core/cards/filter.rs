//! Batch validation and deduplication.
//!
//! The predicate chain runs in a fixed order; later predicates assume
//! earlier invariants hold (the dedup steps rely on a non-blank
//! target). The duplicate-target guard appears twice on purpose: once
//! as a pre-check before the expensive safety predicates, once as the
//! final seen-set insert. Both use `str::to_lowercase` on the raw
//! target over one shared set, so a card rejected late still blocks
//! nothing (only the final insert records a target as seen).

use std::collections::HashSet;

use super::safety::SafetyFilter;
use super::{Card, CardBatch, MAX_FORBIDDEN_WORDS};

/// Run the filter chain over a raw provider batch and truncate the
/// survivors to `count`, preserving the original relative order.
pub fn filter_batch(
    batch: CardBatch,
    requested_lang: &str,
    count: usize,
    safety: &SafetyFilter,
) -> Vec<Card> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();

    for card in batch.cards.into_iter().flatten() {
        if kept.len() >= count {
            break;
        }
        if !requested_lang.eq_ignore_ascii_case(&card.language) {
            continue;
        }
        if !has_target(&card) {
            continue;
        }
        // Dedup pre-check, before the more expensive safety predicates.
        if seen.contains(&card.target.to_lowercase()) {
            continue;
        }
        if !non_empty_forbidden(&card) {
            continue;
        }
        if !max_forbidden(&card) {
            continue;
        }
        if !safety.is_family_friendly(&card) {
            continue;
        }
        if !safety.passes_stem_exclusion(&card) {
            continue;
        }
        // Final dedup guard: only cards that survived everything above
        // reserve their target.
        if !seen.insert(card.target.to_lowercase()) {
            continue;
        }
        kept.push(card);
    }

    kept
}

fn has_target(card: &Card) -> bool {
    !card.target.trim().is_empty()
}

fn non_empty_forbidden(card: &Card) -> bool {
    !card.forbidden.is_empty()
}

fn max_forbidden(card: &Card) -> bool {
    card.forbidden.len() <= MAX_FORBIDDEN_WORDS
}
