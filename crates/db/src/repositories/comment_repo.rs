//! Repository for the `comments` table.

use sqlx::PgPool;
use wirekit_core::comment::Comment;

use crate::models::comment::CommentRow;

/// Column list for comments queries.
const COLUMNS: &str = "id, project_id, page_id, target_id, x_pct, y_pct, comment_text, \
                       author_name, author_email, status, created_at, resolved_at, resolved_by";

pub struct CommentRepo;

impl CommentRepo {
    /// Comments for a project, oldest first. `page_id` narrows to one page.
    pub async fn list(
        pool: &PgPool,
        project_id: &str,
        page_id: Option<&str>,
    ) -> Result<Vec<CommentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE project_id = $1 AND ($2::TEXT IS NULL OR page_id = $2)
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(project_id)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<CommentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace a comment.
    pub async fn upsert(pool: &PgPool, comment: &Comment) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO comments (id, project_id, page_id, target_id, x_pct, y_pct, comment_text,
                                   author_name, author_email, status, created_at, resolved_at,
                                   resolved_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             ON CONFLICT (id) DO UPDATE SET
                page_id = EXCLUDED.page_id,
                target_id = EXCLUDED.target_id,
                x_pct = EXCLUDED.x_pct,
                y_pct = EXCLUDED.y_pct,
                comment_text = EXCLUDED.comment_text,
                author_name = EXCLUDED.author_name,
                author_email = EXCLUDED.author_email,
                status = EXCLUDED.status,
                resolved_at = EXCLUDED.resolved_at,
                resolved_by = EXCLUDED.resolved_by",
        )
        .bind(&comment.id)
        .bind(&comment.project_id)
        .bind(&comment.page_id)
        .bind(&comment.target_id)
        .bind(comment.x_pct)
        .bind(comment.y_pct)
        .bind(&comment.comment_text)
        .bind(&comment.author_name)
        .bind(&comment.author_email)
        .bind(comment.status.as_str())
        .bind(comment.created_at)
        .bind(comment.resolved_at)
        .bind(&comment.resolved_by)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
