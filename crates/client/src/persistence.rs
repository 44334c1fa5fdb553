use async_trait::async_trait;
use wirekit_core::comment::Comment;
use wirekit_core::model::{Client, Project};
use wirekit_core::persistence::{Persistence, PersistenceError};

use crate::api::{RemoteApi, RemoteApiError};

/// Persistence backed by another wirekit server.
///
/// Reads map a 404 to "absent"; writes are full-record `PUT` upserts, so
/// the remote store holds exactly what this process last saved.
#[derive(Debug, Clone)]
pub struct RemotePersistence {
    api: RemoteApi,
}

impl RemotePersistence {
    pub fn new(base_url: &str) -> Result<Self, PersistenceError> {
        Ok(Self {
            api: RemoteApi::new(base_url).map_err(into_persistence)?,
        })
    }

    pub fn with_api(api: RemoteApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &RemoteApi {
        &self.api
    }
}

fn into_persistence(err: RemoteApiError) -> PersistenceError {
    match err {
        RemoteApiError::Status { status, body } => PersistenceError::Remote { status, body },
        other => PersistenceError::Backend(other.to_string()),
    }
}

#[async_trait]
impl Persistence for RemotePersistence {
    async fn health_check(&self) -> Result<(), PersistenceError> {
        self.api.health().await.map_err(into_persistence)
    }

    // -- clients --

    async fn list_clients(&self) -> Result<Vec<Client>, PersistenceError> {
        self.api
            .get(&["clients"], &[])
            .await
            .map_err(into_persistence)
    }

    async fn get_client(&self, id: &str) -> Result<Option<Client>, PersistenceError> {
        self.api
            .get_optional(&["clients", id])
            .await
            .map_err(into_persistence)
    }

    async fn save_client(&self, client: &Client) -> Result<(), PersistenceError> {
        tracing::debug!(client_id = %client.id, "Saving client remotely");
        self.api
            .put(&["clients", &client.id], client)
            .await
            .map_err(into_persistence)
    }

    async fn delete_client(&self, id: &str) -> Result<bool, PersistenceError> {
        self.api
            .delete(&["clients", id])
            .await
            .map_err(into_persistence)
    }

    // -- projects --

    async fn list_projects(
        &self,
        client_id: Option<&str>,
    ) -> Result<Vec<Project>, PersistenceError> {
        let query: Vec<(&str, &str)> = client_id.map(|id| ("client_id", id)).into_iter().collect();
        self.api
            .get(&["projects"], &query)
            .await
            .map_err(into_persistence)
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, PersistenceError> {
        self.api
            .get_optional(&["projects", id])
            .await
            .map_err(into_persistence)
    }

    async fn save_project(&self, project: &Project) -> Result<(), PersistenceError> {
        tracing::debug!(project_id = %project.id, "Saving project remotely");
        self.api
            .put(&["projects", &project.id], project)
            .await
            .map_err(into_persistence)
    }

    async fn delete_project(&self, id: &str) -> Result<bool, PersistenceError> {
        self.api
            .delete(&["projects", id])
            .await
            .map_err(into_persistence)
    }

    // -- comments --

    async fn list_comments(
        &self,
        project_id: &str,
        page_id: Option<&str>,
    ) -> Result<Vec<Comment>, PersistenceError> {
        let query: Vec<(&str, &str)> = page_id.map(|id| ("page_id", id)).into_iter().collect();
        self.api
            .get(&["projects", project_id, "comments"], &query)
            .await
            .map_err(into_persistence)
    }

    async fn get_comment(&self, id: &str) -> Result<Option<Comment>, PersistenceError> {
        self.api
            .get_optional(&["comments", id])
            .await
            .map_err(into_persistence)
    }

    async fn save_comment(&self, comment: &Comment) -> Result<(), PersistenceError> {
        self.api
            .put(&["comments", &comment.id], comment)
            .await
            .map_err(into_persistence)
    }

    async fn delete_comment(&self, id: &str) -> Result<bool, PersistenceError> {
        self.api
            .delete(&["comments", id])
            .await
            .map_err(into_persistence)
    }
}
