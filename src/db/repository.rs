use sqlx::{Pool, Sqlite};
use anyhow::Result;
use crate::{
    db::models::{Card, NewCard},
    error::UniqueViolation,
    service::CardRepository,
};

/// SQLite implementation of CardRepository
#[derive(Clone)]
pub struct SqliteCardRepository {
    pool: Pool<Sqlite>,
}

impl SqliteCardRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    async fn find_by_id(&self, card_id: i64) -> Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE card_id = ?")
            .bind(card_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(card)
    }
}

#[async_trait::async_trait]
impl CardRepository for SqliteCardRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE mobile_number = ?")
            .bind(mobile_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(card)
    }

    async fn find_by_card_number(&self, card_number: &str) -> Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE card_number = ?")
            .bind(card_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(card)
    }

    async fn insert(&self, card: &NewCard) -> Result<Card> {
        let result = sqlx::query(
            "INSERT INTO cards (mobile_number, card_number, card_type, total_limit,
             amount_used, available_amount)
             VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&card.mobile_number)
        .bind(&card.card_number)
        .bind(&card.card_type)
        .bind(card.total_limit)
        .bind(card.amount_used)
        .bind(card.available_amount)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        let card_id = result.last_insert_rowid();
        self.find_by_id(card_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("card {} missing right after insert", card_id))
    }

    async fn update(&self, card: &Card) -> Result<Option<Card>> {
        let result = sqlx::query(
            "UPDATE cards SET card_type = ?, total_limit = ?, amount_used = ?,
             available_amount = ?, updated_at = datetime('now')
             WHERE card_id = ?"
        )
        .bind(&card.card_type)
        .bind(card.total_limit)
        .bind(card.amount_used)
        .bind(card.available_amount)
        .bind(card.card_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(card.card_id).await
    }

    async fn delete_by_id(&self, card_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM cards WHERE card_id = ?")
            .bind(card_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

const UNIQUE_COLUMNS: [&str; 2] = ["mobile_number", "card_number"];

/// Turns a UNIQUE constraint failure on a known column into [`UniqueViolation`].
/// Anything else stays a plain database error.
fn map_unique_violation(err: sqlx::Error) -> anyhow::Error {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            if let Some(column) = unique_column(db_err.message()) {
                return UniqueViolation { column: column.to_string() }.into();
            }
        }
    }
    err.into()
}

/// SQLite reports these as "UNIQUE constraint failed: cards.<column>"
fn unique_column(message: &str) -> Option<&'static str> {
    let (_, failed) = message.split_once("UNIQUE constraint failed:")?;
    let column = failed.trim().strip_prefix("cards.")?;
    UNIQUE_COLUMNS.into_iter().find(|known| *known == column)
}
