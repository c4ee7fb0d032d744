//! Card store operations.
//!
//! Write side: atomic insert-if-new keyed by the unique
//! (language, norm_target) index. Read side: newest-first paging,
//! random sampling, and batched forbidden-word loading.

use std::collections::HashMap;

use sqlx::Row;

use super::models::CardRecord;
use super::Database;
use crate::core::cards::Card;

/// Extension trait for card write operations.
pub trait CardWriteOps {
    /// Insert the card row if no card with the same
    /// (language, norm_target) exists. Returns the new id on insert,
    /// `None` when the row already existed. Forbidden words are only
    /// written after a successful card-row insert.
    fn insert_card_if_new(
        &self,
        record: &CardRecord,
        forbidden: &[String],
    ) -> impl std::future::Future<Output = Result<Option<String>, sqlx::Error>> + Send;
}

/// Extension trait for card read operations.
pub trait CardReadOps {
    /// Most recently created cards first, with offset paging.
    fn draw_latest(
        &self,
        lang: &str,
        category: &str,
        difficulty: &str,
        limit: i64,
        offset: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Card>, sqlx::Error>> + Send;

    /// Uniform random sample of matching cards.
    fn draw_random(
        &self,
        lang: &str,
        category: &str,
        difficulty: &str,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Card>, sqlx::Error>> + Send;

    /// Forbidden words for a set of card ids, grouped by id.
    fn load_forbidden(
        &self,
        ids: &[String],
    ) -> impl std::future::Future<Output = Result<HashMap<String, Vec<String>>, sqlx::Error>> + Send;
}

impl CardWriteOps for Database {
    async fn insert_card_if_new(
        &self,
        record: &CardRecord,
        forbidden: &[String],
    ) -> Result<Option<String>, sqlx::Error> {
        // One transaction for the card row and its forbidden words: a
        // failed word insert must roll back the card row, otherwise the
        // half-written card would block every retry as a duplicate.
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO cards
                (id, language, category, difficulty, target, norm_target, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.language)
        .bind(&record.category)
        .bind(&record.difficulty)
        .bind(&record.target)
        .bind(&record.norm_target)
        .bind(&record.created_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        for word in forbidden {
            sqlx::query("INSERT INTO card_forbidden (card_id, word) VALUES (?, ?)")
                .bind(&record.id)
                .bind(word)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(record.id.clone()))
    }
}

impl CardReadOps for Database {
    async fn draw_latest(
        &self,
        lang: &str,
        category: &str,
        difficulty: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CardRecord>(
            r#"
            SELECT id, language, category, difficulty, target, norm_target, created_at
            FROM cards
            WHERE language = ? AND category = ? AND difficulty = ?
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(lang)
        .bind(category)
        .bind(difficulty)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await?;

        self.hydrate(rows).await
    }

    async fn draw_random(
        &self,
        lang: &str,
        category: &str,
        difficulty: &str,
        limit: i64,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CardRecord>(
            r#"
            SELECT id, language, category, difficulty, target, norm_target, created_at
            FROM cards
            WHERE language = ? AND category = ? AND difficulty = ?
            ORDER BY RANDOM()
            LIMIT ?
            "#,
        )
        .bind(lang)
        .bind(category)
        .bind(difficulty)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        self.hydrate(rows).await
    }

    async fn load_forbidden(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT card_id, word FROM card_forbidden WHERE card_id IN ({placeholders})"
        );

        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(self.pool()).await?;

        let mut out: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            let card_id: String = row.try_get("card_id")?;
            let word: String = row.try_get("word")?;
            out.entry(card_id).or_default().push(word);
        }
        Ok(out)
    }
}

impl Database {
    /// Join forbidden words into the fetched rows, preserving row order.
    async fn hydrate(&self, rows: Vec<CardRecord>) -> Result<Vec<Card>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let mut forbidden = self.load_forbidden(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let words = forbidden.remove(&row.id).unwrap_or_default();
                row.into_card(words)
            })
            .collect())
    }
}
