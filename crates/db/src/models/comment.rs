use sqlx::FromRow;
use wirekit_core::comment::{Comment, CommentStatus};
use wirekit_core::types::{EntityId, Timestamp};

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: EntityId,
    pub project_id: EntityId,
    pub page_id: Option<EntityId>,
    pub target_id: Option<EntityId>,
    pub x_pct: Option<f64>,
    pub y_pct: Option<f64>,
    pub comment_text: String,
    pub author_name: String,
    pub author_email: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<String>,
}

impl CommentRow {
    /// Convert to the core type. `None` if the status column holds an
    /// unknown value.
    pub fn into_comment(self) -> Option<Comment> {
        Some(Comment {
            status: CommentStatus::parse(&self.status)?,
            id: self.id,
            project_id: self.project_id,
            page_id: self.page_id,
            target_id: self.target_id,
            x_pct: self.x_pct,
            y_pct: self.y_pct,
            comment_text: self.comment_text,
            author_name: self.author_name,
            author_email: self.author_email,
            created_at: self.created_at,
            resolved_at: self.resolved_at,
            resolved_by: self.resolved_by,
        })
    }
}
