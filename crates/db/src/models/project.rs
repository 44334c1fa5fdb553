use sqlx::types::Json;
use sqlx::FromRow;
use wirekit_core::model::{FooterConfig, NavigationConfig, Page, Project, WelcomePageConfig};
use wirekit_core::registry::ComponentKind;
use wirekit_core::types::{EntityId, Timestamp};

/// A row from the `projects` table. Pages and settings are JSONB columns.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: EntityId,
    pub client_id: EntityId,
    pub name: String,
    pub pages: Json<Vec<Page>>,
    pub navigation_config: Option<Json<NavigationConfig>>,
    pub footer_config: Option<Json<FooterConfig>>,
    pub welcome_page_config: Option<Json<WelcomePageConfig>>,
    pub active_components: Option<Json<Vec<ComponentKind>>>,
    pub created_at: Timestamp,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            client_id: row.client_id,
            name: row.name,
            pages: row.pages.0,
            created_at: row.created_at,
            navigation_config: row.navigation_config.map(|j| j.0),
            footer_config: row.footer_config.map(|j| j.0),
            welcome_page_config: row.welcome_page_config.map(|j| j.0),
            active_components: row.active_components.map(|j| j.0),
        }
    }
}
