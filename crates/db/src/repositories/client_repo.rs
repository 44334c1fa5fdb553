//! Repository for the `clients` table.

use sqlx::PgPool;
use wirekit_core::model::Client;

use crate::models::client::ClientRow;

/// Column list for clients queries.
const COLUMNS: &str = "id, name, created_at";

pub struct ClientRepo;

impl ClientRepo {
    /// List all clients, ordered by name (case-insensitive).
    pub async fn list(pool: &PgPool) -> Result<Vec<ClientRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY LOWER(name) ASC");
        sqlx::query_as::<_, ClientRow>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace a client.
    pub async fn upsert(pool: &PgPool, client: &Client) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO clients (id, name, created_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name",
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(client.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete a client. Projects and comments go with it via `ON DELETE
    /// CASCADE`. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
