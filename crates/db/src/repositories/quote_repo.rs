//! Repository for the `quotes` table.

use solar_core::quote::NewQuote;
use sqlx::PgExecutor;

use crate::models::quote::QuoteRow;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, client_name, contact, city, kwh, budget_value, \
     payment_term, observation, approved, created_at";

/// Provides CRUD operations for quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Insert a new quote, returning the created row.
    ///
    /// A `created_at` of `None` falls back to the database clock.
    pub async fn create<'e, E>(
        executor: E,
        id: &str,
        input: &NewQuote,
    ) -> Result<QuoteRow, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO quotes
                (id, client_name, contact, city, kwh, budget_value,
                 payment_term, observation, approved, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, COALESCE($9, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuoteRow>(&query)
            .bind(id)
            .bind(&input.client_name)
            .bind(&input.contact)
            .bind(&input.city)
            .bind(input.kwh)
            .bind(input.budget_value)
            .bind(&input.payment_term)
            .bind(&input.observation)
            .bind(input.created_at)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<QuoteRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1");
        sqlx::query_as::<_, QuoteRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all quotes, newest first. Rows without `created_at` sort last.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<QuoteRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM quotes ORDER BY created_at DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, QuoteRow>(&query)
            .fetch_all(executor)
            .await
    }

    /// Delete a quote, returning the removed row if it existed.
    pub async fn delete<'e, E>(executor: E, id: &str) -> Result<Option<QuoteRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("DELETE FROM quotes WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, QuoteRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
