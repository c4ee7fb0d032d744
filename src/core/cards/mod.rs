//! Card domain types and the generation pipeline.
//!
//! A `Card` is one game unit: a target word the players must guess plus
//! a list of forbidden related words the clue-giver may not say. Cards
//! arrive in batches from the LLM provider, pass through a fixed filter
//! chain, and are persisted with a uniqueness guarantee on
//! (language, normalized target).

pub mod filter;
pub mod generator;
pub mod openai;
pub mod persist;
pub mod provider;
pub mod safety;
pub mod textnorm;

use serde::{Deserialize, Serialize};

/// Maximum number of forbidden words per card.
pub const MAX_FORBIDDEN_WORDS: usize = 7;

/// One game card. `id` is absent on freshly generated cards and set
/// once the card has been persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub language: String,
    pub category: String,
    pub difficulty: String,
    pub target: String,
    pub forbidden: Vec<String>,
}

/// Ordered batch of candidate cards as returned by the provider.
/// An absent `cards` field deserializes to an empty batch; null
/// entries are representable and dropped by the filter chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardBatch {
    #[serde(default)]
    pub cards: Vec<Option<Card>>,
}

impl Card {
    /// Test/fixture constructor for an unpersisted card.
    pub fn new(
        language: impl Into<String>,
        category: impl Into<String>,
        difficulty: impl Into<String>,
        target: impl Into<String>,
        forbidden: Vec<String>,
    ) -> Self {
        Self {
            id: None,
            language: language.into(),
            category: category.into(),
            difficulty: difficulty.into(),
            target: target.into(),
            forbidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_missing_cards_field_is_empty() {
        let batch: CardBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.cards.is_empty());
    }

    #[test]
    fn test_batch_null_entries_are_representable() {
        let batch: CardBatch = serde_json::from_str(
            r#"{"cards":[null,{"language":"en","category":"family","difficulty":"easy","target":"Dog","forbidden":["Bark"]}]}"#,
        )
        .unwrap();
        assert_eq!(batch.cards.len(), 2);
        assert!(batch.cards[0].is_none());
        assert_eq!(batch.cards[1].as_ref().unwrap().target, "Dog");
    }

    #[test]
    fn test_card_without_id_skips_field() {
        let card = Card::new("en", "family", "easy", "Dog", vec!["Bark".into()]);
        let json = serde_json::to_value(&card).unwrap();
        assert!(json.get("id").is_none());
    }
}
