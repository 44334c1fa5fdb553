//! Integration tests for the PostgreSQL backend.
//!
//! Need a reachable database in `DATABASE_URL`; run with
//! `cargo test -p wirekit-db -- --ignored`.

use chrono::Utc;
use sqlx::PgPool;
use wirekit_core::comment::{Comment, CommentStatus};
use wirekit_core::model::{Client, Page, PageType, Project};
use wirekit_core::persistence::Persistence;
use wirekit_core::registry::ComponentType;
use wirekit_core::types::PropsBag;
use wirekit_db::PgPersistence;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_project(client_id: &str) -> Project {
    let mut project = Project::new(client_id, "Main site", Utc::now());
    let mut page = Page::new("Home", PageType::Homepage);
    page.push_with_defaults(ComponentType::Hero, &PropsBag::new());
    page.push_with_defaults(ComponentType::Stats, &PropsBag::new());
    project.pages.push(page);
    project.active_components = Some(vec![ComponentType::Quote.into()]);
    project
}

fn sample_comment(project_id: &str, page_id: Option<&str>) -> Comment {
    Comment {
        id: wirekit_core::types::new_id(),
        project_id: project_id.to_string(),
        page_id: page_id.map(str::to_string),
        target_id: None,
        x_pct: None,
        y_pct: None,
        comment_text: "Move this up".to_string(),
        author_name: "Sam".to_string(),
        author_email: None,
        status: CommentStatus::New,
        created_at: Utc::now(),
        resolved_at: None,
        resolved_by: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn project_graph_round_trips(pool: PgPool) {
    let store = PgPersistence::new(pool);
    let client = Client::new("Acme", Utc::now());
    store.save_client(&client).await.unwrap();

    let project = sample_project(&client.id);
    store.save_project(&project).await.unwrap();

    let loaded = store.get_project(&project.id).await.unwrap().unwrap();
    assert_eq!(loaded.pages, project.pages);
    assert_eq!(loaded.active_components, project.active_components);
    assert_eq!(loaded.navigation_config, None);

    let listed = store.list_projects(Some(&client.id)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(store.list_projects(Some("other")).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upsert_replaces_existing_project(pool: PgPool) {
    let store = PgPersistence::new(pool);
    let client = Client::new("Acme", Utc::now());
    store.save_client(&client).await.unwrap();

    let mut project = sample_project(&client.id);
    store.save_project(&project).await.unwrap();

    project.name = "Renamed".to_string();
    project.pages.clear();
    store.save_project(&project).await.unwrap();

    let loaded = store.get_project(&project.id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "Renamed");
    assert!(loaded.pages.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn deleting_client_cascades(pool: PgPool) {
    let store = PgPersistence::new(pool);
    let client = Client::new("Acme", Utc::now());
    store.save_client(&client).await.unwrap();
    let project = sample_project(&client.id);
    store.save_project(&project).await.unwrap();
    let comment = sample_comment(&project.id, None);
    store.save_comment(&comment).await.unwrap();

    assert!(store.delete_client(&client.id).await.unwrap());
    assert!(store.get_project(&project.id).await.unwrap().is_none());
    assert!(store.get_comment(&comment.id).await.unwrap().is_none());
    assert!(!store.delete_client(&client.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn comments_filter_by_page_and_keep_status(pool: PgPool) {
    let store = PgPersistence::new(pool);
    let client = Client::new("Acme", Utc::now());
    store.save_client(&client).await.unwrap();
    let project = sample_project(&client.id);
    store.save_project(&project).await.unwrap();

    let page_id = project.pages[0].id.clone();
    let mut on_page = sample_comment(&project.id, Some(&page_id));
    let general = sample_comment(&project.id, None);
    store.save_comment(&on_page).await.unwrap();
    store.save_comment(&general).await.unwrap();

    on_page.status = CommentStatus::Resolved;
    on_page.resolved_by = Some("Lee".to_string());
    on_page.resolved_at = Some(Utc::now());
    store.save_comment(&on_page).await.unwrap();

    let all = store.list_comments(&project.id, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let filtered = store.list_comments(&project.id, Some(&page_id)).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].status, CommentStatus::Resolved);
    assert_eq!(filtered[0].resolved_by.as_deref(), Some("Lee"));
}
