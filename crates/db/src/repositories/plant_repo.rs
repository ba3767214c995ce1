//! Repository for the `plants` table.

use solar_core::plant::Plant;
use solar_core::status::{Milestone, PlantStatus};
use sqlx::PgExecutor;

use crate::models::plant::PlantRow;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, client_name, contact, city, kwh, budget_value, \
     payment_term, observation, art, parecer_acesso, material, estoque, instalado, created_at";

/// Provides CRUD operations for plants.
pub struct PlantRepo;

impl PlantRepo {
    /// Insert a fully formed plant record, milestones included.
    pub async fn create<'e, E>(executor: E, plant: &Plant) -> Result<PlantRow, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO plants
                (id, client_name, contact, city, kwh, budget_value, payment_term,
                 observation, art, parecer_acesso, material, estoque, instalado, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        let m = &plant.milestones;
        sqlx::query_as::<_, PlantRow>(&query)
            .bind(&plant.id)
            .bind(&plant.client_name)
            .bind(&plant.contact)
            .bind(&plant.city)
            .bind(plant.kwh)
            .bind(plant.budget_value)
            .bind(&plant.payment_term)
            .bind(&plant.observation)
            .bind(m.art.as_str())
            .bind(m.parecer_acesso.as_str())
            .bind(m.material.as_str())
            .bind(m.estoque.as_str())
            .bind(m.instalado.as_str())
            .bind(plant.created_at)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<PlantRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM plants WHERE id = $1");
        sqlx::query_as::<_, PlantRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all plants, newest first. Rows without `created_at` sort last.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<PlantRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM plants ORDER BY created_at DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, PlantRow>(&query)
            .fetch_all(executor)
            .await
    }

    /// Set a single milestone column. Returns `None` if the plant is absent.
    pub async fn set_milestone<'e, E>(
        executor: E,
        id: &str,
        milestone: Milestone,
        status: PlantStatus,
    ) -> Result<Option<PlantRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        // The column name comes from a closed enum, never from input.
        let column = milestone.column_name();
        let query = format!("UPDATE plants SET {column} = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, PlantRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Delete a plant. Returns `true` if a row was removed.
    pub async fn delete<'e, E>(executor: E, id: &str) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM plants WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
