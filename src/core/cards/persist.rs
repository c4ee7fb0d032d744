//! Persistence gate.
//!
//! Attempts to durably store each card exactly once per
//! (language, normalized target) pair. A card that already exists is
//! skipped silently; concurrent requests racing on the same pair are
//! settled by the store's unique index, and losing that race is a
//! normal outcome.

use tracing::{debug, info};

use super::Card;
use crate::database::{CardRecord, CardWriteOps, Database};

/// Store the cards that are new, returning only the subset that was
/// actually inserted, each carrying its assigned id.
pub async fn store_only_new(db: &Database, generated: &[Card]) -> Result<Vec<Card>, sqlx::Error> {
    let attempted = generated.len();
    let mut inserted = Vec::new();

    for card in generated {
        let record = CardRecord::from_card(card);
        if let Some(id) = db.insert_card_if_new(&record, &card.forbidden).await? {
            debug!(
                "DB insert id={} target='{}' lang={} diff={} cat={}",
                id, card.target, card.language, card.difficulty, card.category
            );
            let mut stored = card.clone();
            stored.id = Some(id);
            inserted.push(stored);
        }
    }

    info!(
        "DB storeOnlyNew attempted={} inserted={} duplicates={}",
        attempted,
        inserted.len(),
        attempted - inserted.len()
    );

    Ok(inserted)
}
