use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Persistence, PersistenceError, StoreSnapshot};
use crate::comment::Comment;
use crate::model::{Client, Project};

/// Process-local persistence. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    data: RwLock<StoreSnapshot>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot (fixtures, CLI imports).
    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            data: RwLock::new(snapshot),
        }
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn health_check(&self) -> Result<(), PersistenceError> {
        Ok(())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, PersistenceError> {
        Ok(self.data.read().await.sorted_clients())
    }

    async fn get_client(&self, id: &str) -> Result<Option<Client>, PersistenceError> {
        Ok(self.data.read().await.client(id).cloned())
    }

    async fn save_client(&self, client: &Client) -> Result<(), PersistenceError> {
        self.data.write().await.upsert_client(client);
        Ok(())
    }

    async fn delete_client(&self, id: &str) -> Result<bool, PersistenceError> {
        Ok(self.data.write().await.remove_client(id))
    }

    async fn list_projects(
        &self,
        client_id: Option<&str>,
    ) -> Result<Vec<Project>, PersistenceError> {
        Ok(self.data.read().await.projects_for(client_id))
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, PersistenceError> {
        Ok(self.data.read().await.project(id).cloned())
    }

    async fn save_project(&self, project: &Project) -> Result<(), PersistenceError> {
        self.data.write().await.upsert_project(project);
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<bool, PersistenceError> {
        Ok(self.data.write().await.remove_project(id))
    }

    async fn list_comments(
        &self,
        project_id: &str,
        page_id: Option<&str>,
    ) -> Result<Vec<Comment>, PersistenceError> {
        Ok(self.data.read().await.comments_for(project_id, page_id))
    }

    async fn get_comment(&self, id: &str) -> Result<Option<Comment>, PersistenceError> {
        Ok(self.data.read().await.comment(id).cloned())
    }

    async fn save_comment(&self, comment: &Comment) -> Result<(), PersistenceError> {
        self.data.write().await.upsert_comment(comment);
        Ok(())
    }

    async fn delete_comment(&self, id: &str) -> Result<bool, PersistenceError> {
        Ok(self.data.write().await.remove_comment(id))
    }
}
