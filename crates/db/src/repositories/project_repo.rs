//! Repository for the `projects` table.

use sqlx::types::Json;
use sqlx::PgPool;
use wirekit_core::model::Project;

use crate::models::project::ProjectRow;

/// Column list for projects queries.
const COLUMNS: &str = "id, client_id, name, pages, navigation_config, footer_config, \
                       welcome_page_config, active_components, created_at";

pub struct ProjectRepo;

impl ProjectRepo {
    /// List projects, newest first, optionally for one client.
    pub async fn list(
        pool: &PgPool,
        client_id: Option<&str>,
    ) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::TEXT IS NULL OR client_id = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the full project graph.
    pub async fn upsert(pool: &PgPool, project: &Project) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO projects (id, client_id, name, pages, navigation_config, footer_config,
                                   welcome_page_config, active_components, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (id) DO UPDATE SET
                client_id = EXCLUDED.client_id,
                name = EXCLUDED.name,
                pages = EXCLUDED.pages,
                navigation_config = EXCLUDED.navigation_config,
                footer_config = EXCLUDED.footer_config,
                welcome_page_config = EXCLUDED.welcome_page_config,
                active_components = EXCLUDED.active_components,
                updated_at = NOW()",
        )
        .bind(&project.id)
        .bind(&project.client_id)
        .bind(&project.name)
        .bind(Json(&project.pages))
        .bind(project.navigation_config.as_ref().map(Json))
        .bind(project.footer_config.as_ref().map(Json))
        .bind(project.welcome_page_config.as_ref().map(Json))
        .bind(project.active_components.as_ref().map(Json))
        .bind(project.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete a project and, via cascade, its comments.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
