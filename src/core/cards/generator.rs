//! Generation orchestrator.
//!
//! Requests one batch from the provider with a rendered prompt, runs
//! the filter chain, and truncates to the requested count. A batch
//! with fewer surviving cards than requested is a valid outcome; only
//! provider failures and a missing prompt template are errors.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::filter::filter_batch;
use super::provider::{CardProvider, ProviderError};
use super::safety::SafetyFilter;
use super::Card;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("prompt template is not available")]
    MissingPromptTemplate,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub struct CardGenerator {
    provider: Arc<dyn CardProvider>,
    safety: SafetyFilter,
    /// `None` when the template resource failed to load at startup;
    /// every generation request then fails while draws keep working.
    prompt_template: Option<String>,
    max_gen_count: usize,
}

impl CardGenerator {
    pub fn new(
        provider: Arc<dyn CardProvider>,
        safety: SafetyFilter,
        prompt_template: Option<String>,
        max_gen_count: usize,
    ) -> Self {
        Self {
            provider,
            safety,
            prompt_template,
            max_gen_count,
        }
    }

    /// Generate up to `count` cards for the requested language,
    /// category, and difficulty.
    pub async fn get_or_generate(
        &self,
        lang: &str,
        category: &str,
        difficulty: &str,
        count: usize,
    ) -> Result<Vec<Card>, GenerateError> {
        info!(
            "GEN start model={} lang={} cat={} diff={} count={}",
            self.provider.model(),
            lang,
            category,
            difficulty,
            count
        );

        let batch_size = count.min(self.max_gen_count);
        let prompt = self.render_prompt(lang, category, difficulty, batch_size)?;

        let batch = self.provider.generate_batch(&prompt).await?;

        let before_filter = batch.cards.len();
        let filtered = filter_batch(batch, lang, count, &self.safety);

        info!(
            "GEN parsed beforeFilter={} afterFilter={}",
            before_filter,
            filtered.len()
        );

        Ok(filtered)
    }

    fn render_prompt(
        &self,
        lang: &str,
        category: &str,
        difficulty: &str,
        count: usize,
    ) -> Result<String, GenerateError> {
        let template = self
            .prompt_template
            .as_ref()
            .ok_or(GenerateError::MissingPromptTemplate)?;

        Ok(template
            .replace("{LANG}", lang)
            .replace("{COUNT}", &count.to_string())
            .replace("{CATEGORY}", category)
            .replace("{DIFFICULTY}", difficulty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cards::provider::Result as ProviderResult;
    use crate::core::cards::CardBatch;
    use std::sync::Mutex;

    /// Stub provider that records the rendered prompt and returns a
    /// canned batch.
    struct StubProvider {
        batch: CardBatch,
        prompts: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new(batch: CardBatch) -> Self {
            Self {
                batch,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl CardProvider for StubProvider {
        async fn generate_batch(&self, prompt: &str) -> ProviderResult<CardBatch> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.batch.clone())
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    fn sample_batch() -> CardBatch {
        CardBatch {
            cards: vec![
                Some(Card::new("en", "family", "easy", "Dog", vec!["Bark".into()])),
                Some(Card::new("en", "family", "easy", "Cat", vec!["Meow".into()])),
                Some(Card::new("en", "family", "easy", "Fish", vec!["Swim".into()])),
            ],
        }
    }

    const TEMPLATE: &str = "lang={LANG} count={COUNT} cat={CATEGORY} diff={DIFFICULTY}";

    #[tokio::test]
    async fn test_prompt_placeholders_substituted() {
        let provider = Arc::new(StubProvider::new(sample_batch()));
        let gen = CardGenerator::new(
            provider.clone(),
            SafetyFilter::permissive(),
            Some(TEMPLATE.to_string()),
            50,
        );

        gen.get_or_generate("en", "family", "medium", 3)
            .await
            .expect("Failed to generate");

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1, "exactly one provider call");
        assert_eq!(prompts[0], "lang=en count=3 cat=family diff=medium");
    }

    #[tokio::test]
    async fn test_upstream_size_capped_by_max_gen_count() {
        let provider = Arc::new(StubProvider::new(sample_batch()));
        let gen = CardGenerator::new(
            provider.clone(),
            SafetyFilter::permissive(),
            Some(TEMPLATE.to_string()),
            2,
        );

        // Requested 10 but provider only ever sees the capped size.
        let out = gen
            .get_or_generate("en", "family", "easy", 10)
            .await
            .expect("Failed to generate");

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].contains("count=2"));
        // Truncation uses the original requested count, not the cap.
        assert_eq!(out.len(), 3);
    }

    #[tokio::test]
    async fn test_short_batch_is_success() {
        let provider = Arc::new(StubProvider::new(CardBatch {
            cards: vec![Some(Card::new("en", "family", "easy", "Dog", vec!["Bark".into()]))],
        }));
        let gen = CardGenerator::new(
            provider,
            SafetyFilter::permissive(),
            Some(TEMPLATE.to_string()),
            50,
        );

        let out = gen
            .get_or_generate("en", "family", "easy", 2)
            .await
            .expect("short batch must not be an error");
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_template_is_request_error() {
        let provider = Arc::new(StubProvider::new(sample_batch()));
        let gen = CardGenerator::new(provider.clone(), SafetyFilter::permissive(), None, 50);

        let err = gen
            .get_or_generate("en", "family", "easy", 3)
            .await
            .expect_err("missing template must fail the request");
        assert!(matches!(err, GenerateError::MissingPromptTemplate));
        // No provider call was made.
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_chain_applied() {
        let provider = Arc::new(StubProvider::new(CardBatch {
            cards: vec![
                None,
                Some(Card::new("en", "family", "easy", "Dog", vec!["Bark".into()])),
                Some(Card::new("en", "family", "easy", "dog", vec!["Fur".into()])),
                Some(Card::new("en", "family", "easy", "Cat", vec![])),
            ],
        }));
        let gen = CardGenerator::new(
            provider,
            SafetyFilter::permissive(),
            Some(TEMPLATE.to_string()),
            50,
        );

        let out = gen
            .get_or_generate("en", "family", "easy", 5)
            .await
            .expect("Failed to generate");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].target, "Dog");
    }
}
