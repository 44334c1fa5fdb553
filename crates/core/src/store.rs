//! Builder store: the only mutator of clients, projects, pages and placed
//! components.
//!
//! Every mutation follows persist-then-apply: the project is cloned, the
//! clone is changed and persisted, and only then does it replace the cached
//! copy. The cache mutex is held across the persist call, so mutations are
//! serialized per store and a failed write leaves state exactly as it was.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::active;
use crate::comment::{apply_status, Comment, CommentStatus, NewComment};
use crate::error::CoreError;
use crate::model::config::{parse_footer_config, parse_navigation_config, parse_welcome_config};
use crate::model::{merge_props, Client, Page, PageType, PlacedComponent, Project};
use crate::persistence::Persistence;
use crate::registry::ComponentKind;
use crate::schema::{self, FormView};
use crate::types::{EntityId, PropsBag};

/// Request to place a component.
#[derive(Debug, Clone, Deserialize)]
pub struct NewComponent {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default)]
    pub props: PropsBag,
}

/// Current builder focus. View state only; never persisted and never part
/// of the document model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub project_id: Option<EntityId>,
    pub page_id: Option<EntityId>,
    pub component_id: Option<EntityId>,
}

impl Selection {
    pub fn select_project(&mut self, project_id: impl Into<EntityId>) {
        self.project_id = Some(project_id.into());
        self.page_id = None;
        self.component_id = None;
    }

    pub fn select_page(&mut self, page_id: impl Into<EntityId>) {
        self.page_id = Some(page_id.into());
        self.component_id = None;
    }

    pub fn select_component(&mut self, component_id: Option<EntityId>) {
        self.component_id = component_id;
    }

    /// Drop ids that no longer resolve against `project`.
    pub fn reconcile(&mut self, project: Option<&Project>) {
        let Some(project) = project.filter(|p| self.project_id.as_deref() == Some(p.id.as_str()))
        else {
            *self = Selection::default();
            return;
        };
        let page = self.page_id.as_deref().and_then(|id| project.page(id));
        match page {
            None => {
                self.page_id = None;
                self.component_id = None;
            }
            Some(page) => {
                if let Some(cid) = self.component_id.as_deref() {
                    if page.component(cid).is_none() {
                        self.component_id = None;
                    }
                }
            }
        }
    }
}

/// Whether a project mutation changed anything worth persisting.
enum Mutation<T> {
    Changed(T),
    Unchanged(T),
}

fn require_name(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn page_mut<'a>(project: &'a mut Project, page_id: &str) -> Result<&'a mut Page, CoreError> {
    project
        .page_mut(page_id)
        .ok_or_else(|| CoreError::not_found("Page", page_id))
}

pub struct BuilderStore {
    persistence: Arc<dyn Persistence>,
    projects: Mutex<HashMap<EntityId, Project>>,
}

impl BuilderStore {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self {
            persistence,
            projects: Mutex::new(HashMap::new()),
        }
    }

    pub fn persistence(&self) -> &Arc<dyn Persistence> {
        &self.persistence
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn load(
        &self,
        cache: &HashMap<EntityId, Project>,
        project_id: &str,
    ) -> Result<Project, CoreError> {
        if let Some(project) = cache.get(project_id) {
            return Ok(project.clone());
        }
        self.persistence
            .get_project(project_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Project", project_id))
    }

    /// Clone, mutate, persist, commit.
    async fn mutate_project<T>(
        &self,
        project_id: &str,
        change: impl FnOnce(&mut Project) -> Result<Mutation<T>, CoreError>,
    ) -> Result<T, CoreError> {
        let mut cache = self.projects.lock().await;
        let mut next = self.load(&cache, project_id).await?;
        match change(&mut next)? {
            Mutation::Unchanged(value) => Ok(value),
            Mutation::Changed(value) => {
                self.persistence.save_project(&next).await?;
                cache.insert(next.id.clone(), next);
                Ok(value)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Clients
    // -----------------------------------------------------------------------

    pub async fn list_clients(&self) -> Result<Vec<Client>, CoreError> {
        Ok(self.persistence.list_clients().await?)
    }

    pub async fn get_client(&self, id: &str) -> Result<Client, CoreError> {
        self.persistence
            .get_client(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Client", id))
    }

    pub async fn create_client(&self, name: &str) -> Result<Client, CoreError> {
        let client = Client::new(require_name("Client name", name)?, Utc::now());
        let _guard = self.projects.lock().await;
        self.persistence.save_client(&client).await?;
        tracing::info!(client_id = %client.id, name = %client.name, "Client created");
        Ok(client)
    }

    pub async fn rename_client(&self, id: &str, name: &str) -> Result<Client, CoreError> {
        let name = require_name("Client name", name)?;
        let _guard = self.projects.lock().await;
        let mut client = self.get_client(id).await?;
        client.name = name;
        self.persistence.save_client(&client).await?;
        tracing::info!(client_id = %client.id, "Client renamed");
        Ok(client)
    }

    /// Upsert a full client record (used by remote clients and imports).
    pub async fn replace_client(&self, client: Client) -> Result<Client, CoreError> {
        require_name("Client name", &client.name)?;
        if client.id.trim().is_empty() {
            return Err(CoreError::Validation("Client id must not be empty".to_string()));
        }
        let _guard = self.projects.lock().await;
        self.persistence.save_client(&client).await?;
        tracing::info!(client_id = %client.id, "Client replaced");
        Ok(client)
    }

    /// Delete a client with its projects and their comments.
    pub async fn delete_client(&self, id: &str) -> Result<(), CoreError> {
        let mut cache = self.projects.lock().await;
        if !self.persistence.delete_client(id).await? {
            return Err(CoreError::not_found("Client", id));
        }
        cache.retain(|_, p| p.client_id != id);
        tracing::info!(client_id = %id, "Client deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    pub async fn list_projects(&self, client_id: Option<&str>) -> Result<Vec<Project>, CoreError> {
        Ok(self.persistence.list_projects(client_id).await?)
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, CoreError> {
        let cache = self.projects.lock().await;
        self.load(&cache, id).await
    }

    pub async fn create_project(&self, client_id: &str, name: &str) -> Result<Project, CoreError> {
        let name = require_name("Project name", name)?;
        let mut cache = self.projects.lock().await;
        if self.persistence.get_client(client_id).await?.is_none() {
            return Err(CoreError::not_found("Client", client_id));
        }
        let project = Project::new(client_id, name, Utc::now());
        self.persistence.save_project(&project).await?;
        cache.insert(project.id.clone(), project.clone());
        tracing::info!(project_id = %project.id, client_id = %client_id, "Project created");
        Ok(project)
    }

    /// Copy a project with fresh ids throughout. Defaults the name to
    /// "<name> (copy)".
    pub async fn duplicate_project(
        &self,
        id: &str,
        name: Option<&str>,
    ) -> Result<Project, CoreError> {
        let mut cache = self.projects.lock().await;
        let source = self.load(&cache, id).await?;
        let name = match name {
            Some(name) => require_name("Project name", name)?,
            None => format!("{} (copy)", source.name),
        };
        let copy = source.duplicate(name, Utc::now());
        self.persistence.save_project(&copy).await?;
        cache.insert(copy.id.clone(), copy.clone());
        tracing::info!(source_id = %id, project_id = %copy.id, "Project duplicated");
        Ok(copy)
    }

    pub async fn rename_project(&self, id: &str, name: &str) -> Result<Project, CoreError> {
        let name = require_name("Project name", name)?;
        self.mutate_project(id, |project| {
            project.name = name;
            Ok(Mutation::Changed(project.clone()))
        })
        .await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), CoreError> {
        let mut cache = self.projects.lock().await;
        if !self.persistence.delete_project(id).await? {
            return Err(CoreError::not_found("Project", id));
        }
        cache.remove(id);
        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }

    /// Upsert a full project graph (used by remote clients and imports).
    /// Component order is normalized on the way in.
    pub async fn replace_project(&self, mut project: Project) -> Result<Project, CoreError> {
        require_name("Project name", &project.name)?;
        if project.id.trim().is_empty() {
            return Err(CoreError::Validation("Project id must not be empty".to_string()));
        }
        for page in &mut project.pages {
            page.normalize_order();
        }

        let mut cache = self.projects.lock().await;
        if self.persistence.get_client(&project.client_id).await?.is_none() {
            return Err(CoreError::not_found("Client", project.client_id.clone()));
        }
        self.persistence.save_project(&project).await?;
        cache.insert(project.id.clone(), project.clone());
        tracing::info!(project_id = %project.id, pages = project.pages.len(), "Project replaced");
        Ok(project)
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    pub async fn update_navigation_config(
        &self,
        project_id: &str,
        raw: &Value,
    ) -> Result<Project, CoreError> {
        let config =
            parse_navigation_config(raw).map_err(|e| CoreError::Validation(e.to_string()))?;
        self.mutate_project(project_id, |project| {
            project.navigation_config = Some(config);
            Ok(Mutation::Changed(project.clone()))
        })
        .await
    }

    pub async fn update_footer_config(
        &self,
        project_id: &str,
        raw: &Value,
    ) -> Result<Project, CoreError> {
        let config = parse_footer_config(raw).map_err(|e| CoreError::Validation(e.to_string()))?;
        self.mutate_project(project_id, |project| {
            project.footer_config = Some(config);
            Ok(Mutation::Changed(project.clone()))
        })
        .await
    }

    pub async fn update_welcome_config(
        &self,
        project_id: &str,
        raw: &Value,
    ) -> Result<Project, CoreError> {
        let config = parse_welcome_config(raw).map_err(|e| CoreError::Validation(e.to_string()))?;
        self.mutate_project(project_id, |project| {
            project.welcome_page_config = Some(config);
            Ok(Mutation::Changed(project.clone()))
        })
        .await
    }

    /// Replace the allow-list. `None` makes every type active again.
    pub async fn set_active_components(
        &self,
        project_id: &str,
        names: Option<&[String]>,
    ) -> Result<Project, CoreError> {
        let list = names.map(active::normalize_allow_list).transpose()?;
        self.mutate_project(project_id, |project| {
            project.active_components = list;
            Ok(Mutation::Changed(project.clone()))
        })
        .await
    }

    // -----------------------------------------------------------------------
    // Pages
    // -----------------------------------------------------------------------

    pub async fn add_page(
        &self,
        project_id: &str,
        name: &str,
        page_type: PageType,
    ) -> Result<Page, CoreError> {
        let name = require_name("Page name", name)?;
        let page = self
            .mutate_project(project_id, |project| {
                let page = Page::new(name, page_type);
                project.pages.push(page.clone());
                Ok(Mutation::Changed(page))
            })
            .await?;
        tracing::info!(project_id = %project_id, page_id = %page.id, "Page added");
        Ok(page)
    }

    pub async fn rename_page(
        &self,
        project_id: &str,
        page_id: &str,
        name: &str,
    ) -> Result<Page, CoreError> {
        let name = require_name("Page name", name)?;
        self.mutate_project(project_id, |project| {
            let page = page_mut(project, page_id)?;
            page.name = name;
            Ok(Mutation::Changed(page.clone()))
        })
        .await
    }

    pub async fn set_page_type(
        &self,
        project_id: &str,
        page_id: &str,
        page_type: PageType,
    ) -> Result<Page, CoreError> {
        self.mutate_project(project_id, |project| {
            let page = page_mut(project, page_id)?;
            page.page_type = page_type;
            Ok(Mutation::Changed(page.clone()))
        })
        .await
    }

    /// Delete a page and every component on it.
    pub async fn delete_page(&self, project_id: &str, page_id: &str) -> Result<(), CoreError> {
        self.mutate_project(project_id, |project| {
            let before = project.pages.len();
            project.pages.retain(|p| p.id != page_id);
            if project.pages.len() == before {
                return Err(CoreError::not_found("Page", page_id));
            }
            Ok(Mutation::Changed(()))
        })
        .await?;
        tracing::info!(project_id = %project_id, page_id = %page_id, "Page deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Components
    // -----------------------------------------------------------------------

    /// Place a component at the end of a page. The type must be active for
    /// the project.
    pub async fn add_component(
        &self,
        project_id: &str,
        page_id: &str,
        input: NewComponent,
    ) -> Result<PlacedComponent, CoreError> {
        let placed = self
            .mutate_project(project_id, |project| {
                let component_type = active::ensure_component_allowed(
                    project.active_components.as_deref(),
                    &input.kind,
                )?;
                let page = page_mut(project, page_id)?;
                Ok(Mutation::Changed(
                    page.push_with_defaults(component_type, &input.props).clone(),
                ))
            })
            .await?;
        tracing::info!(
            project_id = %project_id,
            page_id = %page_id,
            component_id = %placed.id,
            component_type = %placed.kind,
            "Component added"
        );
        Ok(placed)
    }

    /// Place a component without the active-set check. Known types still
    /// start from their defaults; unknown kinds keep the given props as-is.
    pub async fn insert_component_unchecked(
        &self,
        project_id: &str,
        page_id: &str,
        input: NewComponent,
    ) -> Result<PlacedComponent, CoreError> {
        self.mutate_project(project_id, |project| {
            let page = page_mut(project, page_id)?;
            let placed = match input.kind.known() {
                Some(component_type) => page.push_with_defaults(component_type, &input.props),
                None => page.push_component(input.kind, input.props),
            };
            Ok(Mutation::Changed(placed.clone()))
        })
        .await
    }

    /// Shallow-merge props into a component. `Ok(None)` when the component
    /// is not on the page; nothing is persisted in that case.
    pub async fn update_component(
        &self,
        project_id: &str,
        page_id: &str,
        component_id: &str,
        partial: &PropsBag,
    ) -> Result<Option<PlacedComponent>, CoreError> {
        self.mutate_project(project_id, |project| {
            let page = page_mut(project, page_id)?;
            Ok(match page.merge_component_props(component_id, partial) {
                Some(updated) => Mutation::Changed(Some(updated.clone())),
                None => Mutation::Unchanged(None),
            })
        })
        .await
    }

    /// Set help text verbatim: `Some("")` clears it, `None` reverts to the
    /// type's default.
    pub async fn update_component_help_text(
        &self,
        project_id: &str,
        page_id: &str,
        component_id: &str,
        help_text: Option<String>,
    ) -> Result<Option<PlacedComponent>, CoreError> {
        self.mutate_project(project_id, |project| {
            let page = page_mut(project, page_id)?;
            Ok(match page.set_help_text(component_id, help_text) {
                Some(updated) => Mutation::Changed(Some(updated.clone())),
                None => Mutation::Unchanged(None),
            })
        })
        .await
    }

    /// Apply a submitted property form (flat keys) to a component.
    pub async fn update_component_form(
        &self,
        project_id: &str,
        page_id: &str,
        component_id: &str,
        flat: &PropsBag,
    ) -> Result<Option<PlacedComponent>, CoreError> {
        self.mutate_project(project_id, |project| {
            let page = page_mut(project, page_id)?;
            let Some(component) = page.component_mut(component_id) else {
                return Ok(Mutation::Unchanged(None));
            };
            match component.kind.known() {
                Some(component_type) => {
                    schema::apply_form(component_type, &mut component.props, flat)
                }
                None => merge_props(&mut component.props, flat),
            }
            Ok(Mutation::Changed(Some(component.clone())))
        })
        .await
    }

    /// Property form for a component: field schema plus flattened values.
    pub async fn component_form(
        &self,
        project_id: &str,
        page_id: &str,
        component_id: &str,
    ) -> Result<FormView, CoreError> {
        let project = self.get_project(project_id).await?;
        let page = project
            .page(page_id)
            .ok_or_else(|| CoreError::not_found("Page", page_id))?;
        let component = page
            .component(component_id)
            .ok_or_else(|| CoreError::not_found("Component", component_id))?;
        let component_type = component.kind.known().ok_or_else(|| {
            CoreError::Validation(format!(
                "Component type '{}' has no property form",
                component.kind
            ))
        })?;
        Ok(schema::form_view(component_type, &component.props))
    }

    /// Remove a component and renumber the rest of the page.
    pub async fn delete_component(
        &self,
        project_id: &str,
        page_id: &str,
        component_id: &str,
    ) -> Result<(), CoreError> {
        self.mutate_project(project_id, |project| {
            let page = page_mut(project, page_id)?;
            page.remove_component(component_id)
                .ok_or_else(|| CoreError::not_found("Component", component_id))?;
            Ok(Mutation::Changed(()))
        })
        .await?;
        tracing::info!(component_id = %component_id, "Component deleted");
        Ok(())
    }

    /// Apply a drag-and-drop ordering. Returns the page in its new order.
    pub async fn reorder_components(
        &self,
        project_id: &str,
        page_id: &str,
        ordered_ids: &[EntityId],
    ) -> Result<Page, CoreError> {
        self.mutate_project(project_id, |project| {
            let page = page_mut(project, page_id)?;
            let outcome = page.reorder(ordered_ids);
            if !outcome.is_clean() {
                tracing::warn!(
                    page_id = %page_id,
                    dropped = ?outcome.dropped,
                    ignored = ?outcome.ignored,
                    "Reorder list did not match page components"
                );
            }
            Ok(Mutation::Changed(page.clone()))
        })
        .await
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    pub async fn submit_comment(&self, input: NewComment) -> Result<Comment, CoreError> {
        let project = self.get_project(&input.project_id).await?;
        if let Some(page_id) = input.page_id.as_deref() {
            if project.page(page_id).is_none() {
                return Err(CoreError::not_found("Page", page_id));
            }
        }
        let comment = input.into_comment(Utc::now())?;
        self.persistence.save_comment(&comment).await?;
        tracing::info!(comment_id = %comment.id, project_id = %comment.project_id, "Comment submitted");
        Ok(comment)
    }

    pub async fn list_comments(
        &self,
        project_id: &str,
        page_id: Option<&str>,
    ) -> Result<Vec<Comment>, CoreError> {
        Ok(self.persistence.list_comments(project_id, page_id).await?)
    }

    pub async fn get_comment(&self, id: &str) -> Result<Comment, CoreError> {
        self.persistence
            .get_comment(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Comment", id))
    }

    pub async fn set_comment_status(
        &self,
        id: &str,
        status: CommentStatus,
        resolved_by: Option<String>,
    ) -> Result<Comment, CoreError> {
        let mut comment = self.get_comment(id).await?;
        apply_status(&mut comment, status, resolved_by, Utc::now());
        self.persistence.save_comment(&comment).await?;
        tracing::info!(comment_id = %id, status = status.as_str(), "Comment status changed");
        Ok(comment)
    }

    /// Upsert a full comment record (used by remote clients).
    pub async fn replace_comment(&self, comment: Comment) -> Result<Comment, CoreError> {
        require_name("Comment text", &comment.comment_text)?;
        self.persistence.save_comment(&comment).await?;
        Ok(comment)
    }

    pub async fn delete_comment(&self, id: &str) -> Result<(), CoreError> {
        if !self.persistence.delete_comment(id).await? {
            return Err(CoreError::not_found("Comment", id));
        }
        tracing::info!(comment_id = %id, "Comment deleted");
        Ok(())
    }
}

/// Year used for the footer copyright when rendering live.
pub fn current_year() -> i32 {
    Utc::now().year()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::persistence::memory::MemoryPersistence;
    use crate::persistence::PersistenceError;
    use crate::registry::ComponentType;

    /// Delegates to memory but can be told to fail project writes.
    #[derive(Default)]
    struct FlakyPersistence {
        inner: MemoryPersistence,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl Persistence for FlakyPersistence {
        async fn health_check(&self) -> Result<(), PersistenceError> {
            self.inner.health_check().await
        }
        async fn list_clients(&self) -> Result<Vec<Client>, PersistenceError> {
            self.inner.list_clients().await
        }
        async fn get_client(&self, id: &str) -> Result<Option<Client>, PersistenceError> {
            self.inner.get_client(id).await
        }
        async fn save_client(&self, client: &Client) -> Result<(), PersistenceError> {
            self.inner.save_client(client).await
        }
        async fn delete_client(&self, id: &str) -> Result<bool, PersistenceError> {
            self.inner.delete_client(id).await
        }
        async fn list_projects(
            &self,
            client_id: Option<&str>,
        ) -> Result<Vec<Project>, PersistenceError> {
            self.inner.list_projects(client_id).await
        }
        async fn get_project(&self, id: &str) -> Result<Option<Project>, PersistenceError> {
            self.inner.get_project(id).await
        }
        async fn save_project(&self, project: &Project) -> Result<(), PersistenceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(PersistenceError::Backend("disk full".into()));
            }
            self.inner.save_project(project).await
        }
        async fn delete_project(&self, id: &str) -> Result<bool, PersistenceError> {
            self.inner.delete_project(id).await
        }
        async fn list_comments(
            &self,
            project_id: &str,
            page_id: Option<&str>,
        ) -> Result<Vec<Comment>, PersistenceError> {
            self.inner.list_comments(project_id, page_id).await
        }
        async fn get_comment(&self, id: &str) -> Result<Option<Comment>, PersistenceError> {
            self.inner.get_comment(id).await
        }
        async fn save_comment(&self, comment: &Comment) -> Result<(), PersistenceError> {
            self.inner.save_comment(comment).await
        }
        async fn delete_comment(&self, id: &str) -> Result<bool, PersistenceError> {
            self.inner.delete_comment(id).await
        }
    }

    struct Fixture {
        store: BuilderStore,
        backend: Arc<FlakyPersistence>,
        project_id: String,
        page_id: String,
    }

    async fn fixture() -> Fixture {
        let backend = Arc::new(FlakyPersistence::default());
        let store = BuilderStore::new(backend.clone());
        let client = store.create_client("Acme").await.unwrap();
        let project = store.create_project(&client.id, "Website").await.unwrap();
        let page = store
            .add_page(&project.id, "Home", PageType::Homepage)
            .await
            .unwrap();
        Fixture {
            store,
            backend,
            project_id: project.id,
            page_id: page.id,
        }
    }

    fn new_component(component_type: ComponentType) -> NewComponent {
        NewComponent {
            kind: component_type.into(),
            props: PropsBag::new(),
        }
    }

    fn bag(value: Value) -> PropsBag {
        value.as_object().cloned().unwrap()
    }

    async fn add_n(f: &Fixture, n: usize) -> Vec<String> {
        let mut ids = Vec::new();
        for _ in 0..n {
            let placed = f
                .store
                .add_component(&f.project_id, &f.page_id, new_component(ComponentType::RichText))
                .await
                .unwrap();
            ids.push(placed.id);
        }
        ids
    }

    async fn page_orders(f: &Fixture) -> Vec<(String, u32)> {
        let project = f.store.get_project(&f.project_id).await.unwrap();
        project
            .page(&f.page_id)
            .unwrap()
            .sorted_components()
            .iter()
            .map(|c| (c.id.clone(), c.order))
            .collect()
    }

    #[tokio::test]
    async fn add_component_appends_and_persists() {
        let f = fixture().await;
        let ids = add_n(&f, 3).await;

        let orders = page_orders(&f).await;
        assert_eq!(orders.iter().map(|(_, o)| *o).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(orders.iter().map(|(id, _)| id.clone()).collect::<Vec<_>>(), ids);

        let stored = f.backend.inner.get_project(&f.project_id).await.unwrap().unwrap();
        assert_eq!(stored.page(&f.page_id).unwrap().components.len(), 3);
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Add,
        Delete(usize),
        Reverse,
        ReorderStale,
    }

    #[tokio::test]
    async fn order_stays_contiguous_across_mixed_edits() {
        use Step::*;

        let f = fixture().await;
        let mut expected: Vec<String> = Vec::new();
        let steps = [
            Add, Add, Add, Add, Delete(1), Reverse, Add, Delete(0), ReorderStale, Add,
            Delete(2), Reverse, Delete(1), Add, ReorderStale, Delete(0),
        ];

        for step in steps {
            match step {
                Add => {
                    let placed = f
                        .store
                        .add_component(&f.project_id, &f.page_id, new_component(ComponentType::Quote))
                        .await
                        .unwrap();
                    expected.push(placed.id);
                }
                Delete(index) => {
                    let id = expected.remove(index);
                    f.store
                        .delete_component(&f.project_id, &f.page_id, &id)
                        .await
                        .unwrap();
                }
                Reverse => {
                    expected.reverse();
                    f.store
                        .reorder_components(&f.project_id, &f.page_id, &expected)
                        .await
                        .unwrap();
                }
                ReorderStale => {
                    // First id missing, an unknown id and a duplicate appended.
                    expected.remove(0);
                    let mut ids = expected.clone();
                    ids.push("gone".to_string());
                    if let Some(first) = expected.first() {
                        ids.push(first.clone());
                    }
                    f.store
                        .reorder_components(&f.project_id, &f.page_id, &ids)
                        .await
                        .unwrap();
                }
            }

            let project = f.store.get_project(&f.project_id).await.unwrap();
            let page = project.page(&f.page_id).unwrap();
            assert!(page.has_contiguous_order(), "after {step:?}");
            let ids: Vec<String> = page_orders(&f).await.into_iter().map(|(id, _)| id).collect();
            assert_eq!(ids, expected, "after {step:?}");
        }
    }

    #[tokio::test]
    async fn add_component_rejects_inactive_type() {
        let f = fixture().await;
        f.store
            .set_active_components(&f.project_id, Some(&["quote".to_string()]))
            .await
            .unwrap();

        let result = f
            .store
            .add_component(&f.project_id, &f.page_id, new_component(ComponentType::Tabs))
            .await;
        assert_matches!(result, Err(CoreError::Validation(_)));

        // Always-active types stay placeable.
        assert!(f
            .store
            .add_component(&f.project_id, &f.page_id, new_component(ComponentType::Hero))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn unchecked_insert_places_inactive_and_unknown_types() {
        let f = fixture().await;
        f.store
            .set_active_components(&f.project_id, Some(&[]))
            .await
            .unwrap();

        let tabs = f
            .store
            .insert_component_unchecked(&f.project_id, &f.page_id, new_component(ComponentType::Tabs))
            .await
            .unwrap();
        assert_eq!(tabs.props["heading"], "More information");

        let legacy = f
            .store
            .insert_component_unchecked(
                &f.project_id,
                &f.page_id,
                NewComponent {
                    kind: ComponentKind::Unknown("legacy".into()),
                    props: bag(json!({ "speed": 2 })),
                },
            )
            .await
            .unwrap();
        assert_eq!(legacy.order, 1);
        assert_eq!(legacy.props, bag(json!({ "speed": 2 })));
    }

    #[tokio::test]
    async fn delete_renumbers_contiguously() {
        let f = fixture().await;
        let ids = add_n(&f, 4).await;

        f.store
            .delete_component(&f.project_id, &f.page_id, &ids[1])
            .await
            .unwrap();

        assert_eq!(
            page_orders(&f).await,
            vec![
                (ids[0].clone(), 0),
                (ids[2].clone(), 1),
                (ids[3].clone(), 2)
            ]
        );
    }

    #[tokio::test]
    async fn delete_unknown_component_is_not_found() {
        let f = fixture().await;
        let result = f
            .store
            .delete_component(&f.project_id, &f.page_id, "missing")
            .await;
        assert_matches!(result, Err(CoreError::NotFound { entity: "Component", .. }));
    }

    #[tokio::test]
    async fn reorder_tolerates_stale_lists() {
        let f = fixture().await;
        let ids = add_n(&f, 3).await;

        let page = f
            .store
            .reorder_components(
                &f.project_id,
                &f.page_id,
                &[ids[2].clone(), "ghost".to_string(), ids[0].clone()],
            )
            .await
            .unwrap();

        assert!(page.has_contiguous_order());
        assert_eq!(
            page_orders(&f).await,
            vec![(ids[2].clone(), 0), (ids[0].clone(), 1)]
        );
    }

    #[tokio::test]
    async fn update_component_merges_shallowly() {
        let f = fixture().await;
        let placed = f
            .store
            .add_component(&f.project_id, &f.page_id, new_component(ComponentType::Hero))
            .await
            .unwrap();

        let updated = f
            .store
            .update_component(
                &f.project_id,
                &f.page_id,
                &placed.id,
                &bag(json!({ "heading": "New heading" })),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.props["heading"], "New heading");
        assert_eq!(updated.props["buttonText"], placed.props["buttonText"]);
    }

    #[tokio::test]
    async fn update_missing_component_is_none() {
        let f = fixture().await;
        let result = f
            .store
            .update_component(&f.project_id, &f.page_id, "nope", &PropsBag::new())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn help_text_can_be_cleared_and_reset() {
        let f = fixture().await;
        let ids = add_n(&f, 1).await;

        let cleared = f
            .store
            .update_component_help_text(&f.project_id, &f.page_id, &ids[0], Some(String::new()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.help_text.as_deref(), Some(""));

        let reset = f
            .store
            .update_component_help_text(&f.project_id, &f.page_id, &ids[0], None)
            .await
            .unwrap()
            .unwrap();
        assert!(reset.help_text.is_none());
        assert!(reset.effective_help_text().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn form_round_trip_through_store() {
        let f = fixture().await;
        let placed = f
            .store
            .add_component(&f.project_id, &f.page_id, new_component(ComponentType::Signposts))
            .await
            .unwrap();

        let mut form = f
            .store
            .component_form(&f.project_id, &f.page_id, &placed.id)
            .await
            .unwrap()
            .values;
        form.insert("itemCount".into(), json!(2));
        form.insert("item0Title".into(), json!("Design"));
        form.insert("item1Title".into(), json!("Build"));
        form.insert("item1Link".into(), json!("/build"));

        let updated = f
            .store
            .update_component_form(&f.project_id, &f.page_id, &placed.id, &form)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            updated.props["items"],
            json!([{ "title": "Design" }, { "title": "Build", "link": "/build" }])
        );
        assert!(!updated.props.contains_key("item0Title"));
    }

    #[tokio::test]
    async fn persistence_failure_leaves_state_unchanged() {
        let f = fixture().await;
        let ids = add_n(&f, 2).await;
        let before = f.store.get_project(&f.project_id).await.unwrap();

        f.backend.fail_writes.store(true, Ordering::SeqCst);

        assert_matches!(
            f.store
                .add_component(&f.project_id, &f.page_id, new_component(ComponentType::Quote))
                .await,
            Err(CoreError::Persistence(_))
        );
        assert_matches!(
            f.store.delete_component(&f.project_id, &f.page_id, &ids[0]).await,
            Err(CoreError::Persistence(_))
        );
        assert_matches!(
            f.store.rename_project(&f.project_id, "Renamed").await,
            Err(CoreError::Persistence(_))
        );

        assert_eq!(f.store.get_project(&f.project_id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_and_previous_kept() {
        let f = fixture().await;
        let nav = json!({ "siteName": "Acme", "items": [ { "label": "Home", "href": "/" } ] });
        f.store
            .update_navigation_config(&f.project_id, &nav)
            .await
            .unwrap();

        let result = f
            .store
            .update_navigation_config(&f.project_id, &json!({ "items": 3 }))
            .await;
        assert_matches!(result, Err(CoreError::Validation(_)));

        let project = f.store.get_project(&f.project_id).await.unwrap();
        assert_eq!(project.navigation().site_name, "Acme");
    }

    #[tokio::test]
    async fn set_active_components_rejects_unknown_names() {
        let f = fixture().await;
        let result = f
            .store
            .set_active_components(&f.project_id, Some(&["tabs".into(), "slider".into()]))
            .await;
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_page_cascades_components() {
        let f = fixture().await;
        add_n(&f, 2).await;
        f.store.delete_page(&f.project_id, &f.page_id).await.unwrap();
        let project = f.store.get_project(&f.project_id).await.unwrap();
        assert!(project.pages.is_empty());
    }

    #[tokio::test]
    async fn delete_client_cascades_projects() {
        let f = fixture().await;
        let project = f.store.get_project(&f.project_id).await.unwrap();
        f.store.delete_client(&project.client_id).await.unwrap();
        assert_matches!(
            f.store.get_project(&f.project_id).await,
            Err(CoreError::NotFound { entity: "Project", .. })
        );
    }

    #[tokio::test]
    async fn duplicate_project_gets_fresh_ids() {
        let f = fixture().await;
        add_n(&f, 1).await;
        let copy = f.store.duplicate_project(&f.project_id, None).await.unwrap();
        assert_eq!(copy.name, "Website (copy)");
        assert_ne!(copy.pages[0].id, f.page_id);
        assert_eq!(f.store.list_projects(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn comments_lifecycle() {
        let f = fixture().await;
        let comment = f
            .store
            .submit_comment(NewComment {
                project_id: f.project_id.clone(),
                page_id: Some(f.page_id.clone()),
                target_id: None,
                x_pct: None,
                y_pct: None,
                author_name: "Sam".into(),
                author_email: None,
                message: "Love it".into(),
            })
            .await
            .unwrap();
        assert_eq!(comment.status, CommentStatus::New);

        let resolved = f
            .store
            .set_comment_status(&comment.id, CommentStatus::Resolved, Some("Jo".into()))
            .await
            .unwrap();
        assert!(resolved.resolved_at.is_some());

        let listed = f
            .store
            .list_comments(&f.project_id, Some(&f.page_id))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);

        f.store.delete_comment(&comment.id).await.unwrap();
        assert!(f.store.list_comments(&f.project_id, None).await.unwrap().is_empty());
    }

    #[test]
    fn selection_reconciles_against_project() {
        let mut project = Project::new("c", "Site", Utc::now());
        let mut page = Page::new("Home", PageType::Homepage);
        let component_id = page
            .push_with_defaults(ComponentType::Hero, &PropsBag::new())
            .id
            .clone();
        let page_id = page.id.clone();
        project.pages.push(page);

        let mut selection = Selection::default();
        selection.select_project(project.id.clone());
        selection.select_page(page_id.clone());
        selection.select_component(Some(component_id));
        selection.reconcile(Some(&project));
        assert!(selection.component_id.is_some());

        project.page_mut(&page_id).unwrap().components.clear();
        selection.reconcile(Some(&project));
        assert!(selection.component_id.is_none());
        assert_eq!(selection.page_id.as_deref(), Some(page_id.as_str()));

        selection.reconcile(None);
        assert_eq!(selection, Selection::default());
    }
}
