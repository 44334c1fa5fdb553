use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Persistence, PersistenceError, StoreSnapshot};
use crate::comment::Comment;
use crate::model::{Client, Project};

/// Persistence backed by one pretty-printed JSON document.
///
/// Every write replaces the file through a temp file + rename, and the
/// in-memory copy is only updated once that succeeds.
#[derive(Debug)]
pub struct JsonFilePersistence {
    path: PathBuf,
    data: Mutex<StoreSnapshot>,
}

impl JsonFilePersistence {
    /// Open `path`, starting empty if the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "Data file not found, starting empty");
                StoreSnapshot::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        self.data.lock().await.clone()
    }

    /// Apply `change` to a copy, write it, then commit the copy.
    async fn write_with<T>(
        &self,
        change: impl FnOnce(&mut StoreSnapshot) -> T,
    ) -> Result<T, PersistenceError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let result = change(&mut next);
        write_atomically(&self.path, &next).await?;
        *data = next;
        Ok(result)
    }
}

/// Serialize `snapshot` and move it into place at `path`.
pub async fn write_atomically(path: &Path, snapshot: &StoreSnapshot) -> Result<(), PersistenceError> {
    let json = serde_json::to_vec_pretty(snapshot)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl Persistence for JsonFilePersistence {
    async fn health_check(&self) -> Result<(), PersistenceError> {
        match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => {
                tokio::fs::metadata(dir).await?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    async fn list_clients(&self) -> Result<Vec<Client>, PersistenceError> {
        Ok(self.data.lock().await.sorted_clients())
    }

    async fn get_client(&self, id: &str) -> Result<Option<Client>, PersistenceError> {
        Ok(self.data.lock().await.client(id).cloned())
    }

    async fn save_client(&self, client: &Client) -> Result<(), PersistenceError> {
        self.write_with(|d| d.upsert_client(client)).await
    }

    async fn delete_client(&self, id: &str) -> Result<bool, PersistenceError> {
        self.write_with(|d| d.remove_client(id)).await
    }

    async fn list_projects(
        &self,
        client_id: Option<&str>,
    ) -> Result<Vec<Project>, PersistenceError> {
        Ok(self.data.lock().await.projects_for(client_id))
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, PersistenceError> {
        Ok(self.data.lock().await.project(id).cloned())
    }

    async fn save_project(&self, project: &Project) -> Result<(), PersistenceError> {
        self.write_with(|d| d.upsert_project(project)).await
    }

    async fn delete_project(&self, id: &str) -> Result<bool, PersistenceError> {
        self.write_with(|d| d.remove_project(id)).await
    }

    async fn list_comments(
        &self,
        project_id: &str,
        page_id: Option<&str>,
    ) -> Result<Vec<Comment>, PersistenceError> {
        Ok(self.data.lock().await.comments_for(project_id, page_id))
    }

    async fn get_comment(&self, id: &str) -> Result<Option<Comment>, PersistenceError> {
        Ok(self.data.lock().await.comment(id).cloned())
    }

    async fn save_comment(&self, comment: &Comment) -> Result<(), PersistenceError> {
        self.write_with(|d| d.upsert_comment(comment)).await
    }

    async fn delete_comment(&self, id: &str) -> Result<bool, PersistenceError> {
        self.write_with(|d| d.remove_comment(id)).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::{Page, PageType};
    use crate::registry::ComponentType;
    use crate::types::PropsBag;

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePersistence::open(dir.path().join("data.json")).await.unwrap();
        assert!(store.list_clients().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let client = Client::new("Acme", Utc::now());
        let mut project = Project::new(&client.id, "Site", Utc::now());
        let mut page = Page::new("Home", PageType::Homepage);
        page.push_with_defaults(ComponentType::Hero, &PropsBag::new());
        project.pages.push(page);

        {
            let store = JsonFilePersistence::open(&path).await.unwrap();
            store.save_client(&client).await.unwrap();
            store.save_project(&project).await.unwrap();
        }

        let reopened = JsonFilePersistence::open(&path).await.unwrap();
        assert_eq!(reopened.get_client(&client.id).await.unwrap(), Some(client));
        assert_eq!(reopened.get_project(&project.id).await.unwrap(), Some(project));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();
        let result = JsonFilePersistence::open(&path).await;
        assert!(matches!(result, Err(PersistenceError::Serialization(_))));
    }
}
