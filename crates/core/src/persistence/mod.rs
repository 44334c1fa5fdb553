//! Pluggable persistence for the document model and comments.
//!
//! The store only ever talks to `Arc<dyn Persistence>`. Backends:
//!
//! - [`memory::MemoryPersistence`]: process-local, used by tests and demos.
//! - [`file::JsonFilePersistence`]: a single JSON document on disk.
//! - `wirekit_db::PgPersistence`: PostgreSQL.
//! - `wirekit_client::RemotePersistence`: another wirekit API over HTTP.
//!
//! Projects are always read and written as a full graph (pages and
//! components included).

pub mod file;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::comment::Comment;
use crate::model::{Client, Project};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("remote returned {status}: {body}")]
    Remote { status: u16, body: String },
}

#[async_trait]
pub trait Persistence: Send + Sync {
    /// Cheap connectivity check used by `/health`.
    async fn health_check(&self) -> Result<(), PersistenceError>;

    // -- clients --

    async fn list_clients(&self) -> Result<Vec<Client>, PersistenceError>;

    async fn get_client(&self, id: &str) -> Result<Option<Client>, PersistenceError>;

    /// Insert or replace a client.
    async fn save_client(&self, client: &Client) -> Result<(), PersistenceError>;

    /// Delete a client and, transitively, its projects and their comments.
    /// Returns `false` if the client did not exist.
    async fn delete_client(&self, id: &str) -> Result<bool, PersistenceError>;

    // -- projects (full graph) --

    async fn list_projects(
        &self,
        client_id: Option<&str>,
    ) -> Result<Vec<Project>, PersistenceError>;

    async fn get_project(&self, id: &str) -> Result<Option<Project>, PersistenceError>;

    /// Insert or replace a project with all its pages and components.
    async fn save_project(&self, project: &Project) -> Result<(), PersistenceError>;

    /// Delete a project and its comments.
    async fn delete_project(&self, id: &str) -> Result<bool, PersistenceError>;

    // -- comments --

    async fn list_comments(
        &self,
        project_id: &str,
        page_id: Option<&str>,
    ) -> Result<Vec<Comment>, PersistenceError>;

    async fn get_comment(&self, id: &str) -> Result<Option<Comment>, PersistenceError>;

    /// Insert or replace a comment.
    async fn save_comment(&self, comment: &Comment) -> Result<(), PersistenceError>;

    async fn delete_comment(&self, id: &str) -> Result<bool, PersistenceError>;
}

// ---------------------------------------------------------------------------
// Snapshot shared by the local backends
// ---------------------------------------------------------------------------

/// Everything a local backend holds. Also the on-disk format of
/// [`file::JsonFilePersistence`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl StoreSnapshot {
    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn comment(&self, id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Clients sorted by name.
    pub fn sorted_clients(&self) -> Vec<Client> {
        let mut clients = self.clients.clone();
        clients.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        clients
    }

    /// Projects, optionally for one client, newest first.
    pub fn projects_for(&self, client_id: Option<&str>) -> Vec<Project> {
        let mut projects: Vec<Project> = self
            .projects
            .iter()
            .filter(|p| client_id.is_none_or(|id| p.client_id == id))
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        projects
    }

    /// Comments for a project (optionally one page), oldest first.
    pub fn comments_for(&self, project_id: &str, page_id: Option<&str>) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.project_id == project_id)
            .filter(|c| page_id.is_none_or(|id| c.page_id.as_deref() == Some(id)))
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        comments
    }

    pub fn upsert_client(&mut self, client: &Client) {
        match self.clients.iter_mut().find(|c| c.id == client.id) {
            Some(existing) => *existing = client.clone(),
            None => self.clients.push(client.clone()),
        }
    }

    pub fn upsert_project(&mut self, project: &Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project.clone(),
            None => self.projects.push(project.clone()),
        }
    }

    pub fn upsert_comment(&mut self, comment: &Comment) {
        match self.comments.iter_mut().find(|c| c.id == comment.id) {
            Some(existing) => *existing = comment.clone(),
            None => self.comments.push(comment.clone()),
        }
    }

    pub fn remove_client(&mut self, id: &str) -> bool {
        let before = self.clients.len();
        self.clients.retain(|c| c.id != id);
        if self.clients.len() == before {
            return false;
        }
        let project_ids: Vec<String> = self
            .projects
            .iter()
            .filter(|p| p.client_id == id)
            .map(|p| p.id.clone())
            .collect();
        for project_id in &project_ids {
            self.remove_project(project_id);
        }
        true
    }

    pub fn remove_project(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        self.comments.retain(|c| c.project_id != id);
        self.projects.len() != before
    }

    pub fn remove_comment(&mut self, id: &str) -> bool {
        let before = self.comments.len();
        self.comments.retain(|c| c.id != id);
        self.comments.len() != before
    }
}
