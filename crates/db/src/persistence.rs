//! [`Persistence`] backed by PostgreSQL.

use async_trait::async_trait;
use wirekit_core::comment::Comment;
use wirekit_core::model::{Client, Project};
use wirekit_core::persistence::{Persistence, PersistenceError};

use crate::models::comment::CommentRow;
use crate::repositories::{ClientRepo, CommentRepo, ProjectRepo};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgPersistence {
    pool: DbPool,
}

impl PgPersistence {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn backend(e: sqlx::Error) -> PersistenceError {
    tracing::error!(error = %e, "Database error");
    PersistenceError::Backend(e.to_string())
}

fn comment_from_row(row: CommentRow) -> Result<Comment, PersistenceError> {
    let (id, status) = (row.id.clone(), row.status.clone());
    row.into_comment().ok_or_else(|| {
        PersistenceError::Backend(format!("comment {id} has unknown status '{status}'"))
    })
}

#[async_trait]
impl Persistence for PgPersistence {
    async fn health_check(&self) -> Result<(), PersistenceError> {
        crate::health_check(&self.pool).await.map_err(backend)
    }

    async fn list_clients(&self) -> Result<Vec<Client>, PersistenceError> {
        let rows = ClientRepo::list(&self.pool).await.map_err(backend)?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn get_client(&self, id: &str) -> Result<Option<Client>, PersistenceError> {
        let row = ClientRepo::find_by_id(&self.pool, id).await.map_err(backend)?;
        Ok(row.map(Client::from))
    }

    async fn save_client(&self, client: &Client) -> Result<(), PersistenceError> {
        ClientRepo::upsert(&self.pool, client).await.map_err(backend)
    }

    async fn delete_client(&self, id: &str) -> Result<bool, PersistenceError> {
        ClientRepo::delete(&self.pool, id).await.map_err(backend)
    }

    async fn list_projects(
        &self,
        client_id: Option<&str>,
    ) -> Result<Vec<Project>, PersistenceError> {
        let rows = ProjectRepo::list(&self.pool, client_id)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, PersistenceError> {
        let row = ProjectRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?;
        Ok(row.map(Project::from))
    }

    async fn save_project(&self, project: &Project) -> Result<(), PersistenceError> {
        ProjectRepo::upsert(&self.pool, project).await.map_err(backend)
    }

    async fn delete_project(&self, id: &str) -> Result<bool, PersistenceError> {
        ProjectRepo::delete(&self.pool, id).await.map_err(backend)
    }

    async fn list_comments(
        &self,
        project_id: &str,
        page_id: Option<&str>,
    ) -> Result<Vec<Comment>, PersistenceError> {
        CommentRepo::list(&self.pool, project_id, page_id)
            .await
            .map_err(backend)?
            .into_iter()
            .map(comment_from_row)
            .collect()
    }

    async fn get_comment(&self, id: &str) -> Result<Option<Comment>, PersistenceError> {
        CommentRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?
            .map(comment_from_row)
            .transpose()
    }

    async fn save_comment(&self, comment: &Comment) -> Result<(), PersistenceError> {
        CommentRepo::upsert(&self.pool, comment).await.map_err(backend)
    }

    async fn delete_comment(&self, id: &str) -> Result<bool, PersistenceError> {
        CommentRepo::delete(&self.pool, id).await.map_err(backend)
    }
}
