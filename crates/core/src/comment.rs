//! Stakeholder feedback comments.
//!
//! Comments live beside the document model rather than inside it: they are
//! keyed by project (and optionally page and component) and persisted
//! separately so feedback survives page edits.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{new_id, EntityId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStatus {
    #[default]
    New,
    InProgress,
    Resolved,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "in_progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }
}

/// A persisted comment. `target_id == None` is a general page comment;
/// otherwise it is a marker positioned at fractional `x_pct`/`y_pct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub project_id: EntityId,
    pub page_id: Option<EntityId>,
    pub target_id: Option<EntityId>,
    pub x_pct: Option<f64>,
    pub y_pct: Option<f64>,
    pub comment_text: String,
    pub author_name: String,
    pub author_email: Option<String>,
    pub status: CommentStatus,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<String>,
}

/// Comment submission payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    #[validate(length(min = 1, message = "projectId is required"))]
    pub project_id: EntityId,
    pub page_id: Option<EntityId>,
    pub target_id: Option<EntityId>,
    #[validate(range(min = 0.0, max = 1.0, message = "xPct must be between 0 and 1"))]
    pub x_pct: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0, message = "yPct must be between 0 and 1"))]
    pub y_pct: Option<f64>,
    #[validate(length(min = 1, max = 200, message = "authorName is required"))]
    pub author_name: String,
    #[validate(email(message = "authorEmail must be a valid email address"))]
    pub author_email: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "message is required"))]
    pub message: String,
}

impl NewComment {
    /// Validate and build the comment to persist.
    pub fn into_comment(mut self, now: Timestamp) -> Result<Comment, CoreError> {
        self.author_email = self.author_email.filter(|e| !e.trim().is_empty());
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        if self.author_name.trim().is_empty() {
            return Err(CoreError::Validation("authorName is required".to_string()));
        }
        if self.message.trim().is_empty() {
            return Err(CoreError::Validation("message is required".to_string()));
        }

        // Coordinates only mean something for a positioned marker.
        let (x_pct, y_pct) = match self.target_id {
            Some(_) => (self.x_pct, self.y_pct),
            None => (None, None),
        };

        Ok(Comment {
            id: new_id(),
            project_id: self.project_id,
            page_id: self.page_id,
            target_id: self.target_id,
            x_pct,
            y_pct,
            comment_text: self.message.trim().to_string(),
            author_name: self.author_name.trim().to_string(),
            author_email: self.author_email,
            status: CommentStatus::New,
            created_at: now,
            resolved_at: None,
            resolved_by: None,
        })
    }
}

/// Move a comment to `status`. Resolving stamps `resolved_at`/`resolved_by`;
/// leaving `resolved` clears them.
pub fn apply_status(
    comment: &mut Comment,
    status: CommentStatus,
    resolved_by: Option<String>,
    now: Timestamp,
) {
    match status {
        CommentStatus::Resolved => {
            if comment.status != CommentStatus::Resolved {
                comment.resolved_at = Some(now);
            }
            if resolved_by.is_some() {
                comment.resolved_by = resolved_by;
            }
        }
        CommentStatus::New | CommentStatus::InProgress => {
            comment.resolved_at = None;
            comment.resolved_by = None;
        }
    }
    comment.status = status;
}
