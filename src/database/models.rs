//! Database row models.

use sqlx::FromRow;

use crate::core::cards::textnorm::norm_lower;
use crate::core::cards::Card;

/// One row of the `cards` table. Forbidden words live in the
/// `card_forbidden` table and are joined in by the read operations.
#[derive(Debug, Clone, FromRow)]
pub struct CardRecord {
    pub id: String,
    pub language: String,
    pub category: String,
    pub difficulty: String,
    pub target: String,
    pub norm_target: String,
    pub created_at: String,
}

impl CardRecord {
    /// Build a record for an unpersisted card: fresh v4 id, UTC
    /// timestamp, normalized target for the uniqueness key.
    pub fn from_card(card: &Card) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            language: card.language.clone(),
            category: card.category.clone(),
            difficulty: card.difficulty.clone(),
            target: card.target.clone(),
            norm_target: norm_lower(&card.target),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Rehydrate a `Card` from this row and its forbidden words.
    pub fn into_card(self, forbidden: Vec<String>) -> Card {
        Card {
            id: Some(self.id),
            language: self.language,
            category: self.category,
            difficulty: self.difficulty,
            target: self.target,
            forbidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_card_normalizes_target() {
        let card = Card::new("de-CH", "family", "easy", " Zürich ", vec!["See".into()]);
        let record = CardRecord::from_card(&card);
        assert_eq!(record.norm_target, "zurich");
        // Raw target is stored untouched.
        assert_eq!(record.target, " Zürich ");
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let card = Card::new("en", "family", "easy", "Dog", vec!["Bark".into()]);
        let a = CardRecord::from_card(&card);
        let b = CardRecord::from_card(&card);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_into_card_carries_id() {
        let card = Card::new("en", "family", "easy", "Dog", vec![]);
        let record = CardRecord::from_card(&card);
        let id = record.id.clone();
        let restored = record.into_card(vec!["Bark".into()]);
        assert_eq!(restored.id.as_deref(), Some(id.as_str()));
        assert_eq!(restored.forbidden, vec!["Bark"]);
    }
}
