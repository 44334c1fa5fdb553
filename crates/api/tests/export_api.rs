//! HTTP-level tests for the static site export download.

mod common;

use std::collections::BTreeSet;
use std::io::{Cursor, Read};

use axum::http::{header, StatusCode};
use common::{body_bytes, data, get, post_json, put_json, seed_page, seed_project};
use serde_json::{json, Value};

fn read_archive(bytes: Vec<u8>) -> zip::ZipArchive<Cursor<Vec<u8>>> {
    zip::ZipArchive::new(Cursor::new(bytes)).unwrap()
}

fn read_entry(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut contents = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    contents
}

#[tokio::test]
async fn export_returns_zip_attachment() {
    let app = common::build_test_app();
    let (_, project_id) = seed_project(&app, "Acme", "Main Website").await;
    let home = seed_page(&app, &project_id, "Home", "homepage").await;
    seed_page(&app, &project_id, "About us", "content").await;
    post_json(
        &app,
        &format!("/api/v1/projects/{project_id}/pages/{home}/components"),
        json!({ "type": "hero", "props": { "heading": "Hello Acme" } }),
    )
    .await;

    let response = get(&app, &format!("/api/v1/projects/{project_id}/export")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/zip"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"main-website-wireframes.zip\""
    );

    let mut archive = read_archive(body_bytes(response).await);
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    for expected in [
        "index.html",
        "showcase.html",
        "home.html",
        "about-us.html",
        "interactivity.js",
        "README.txt",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }

    let home_html = read_entry(&mut archive, "home.html");
    assert!(home_html.contains("Hello Acme"));

    let index_html = read_entry(&mut archive, "index.html");
    assert!(index_html.contains("Acme"));
    assert!(index_html.contains("about-us.html"));
}

#[tokio::test]
async fn export_links_navigation_to_exported_pages() {
    let app = common::build_test_app();
    let (_, project_id) = seed_project(&app, "Acme", "Website").await;
    seed_page(&app, &project_id, "Home", "homepage").await;
    seed_page(&app, &project_id, "About", "content").await;
    put_json(
        &app,
        &format!("/api/v1/projects/{project_id}/navigation"),
        json!({
            "siteName": "Acme",
            "items": [
                { "label": "Home", "href": "/" },
                { "label": "About", "href": "/about" }
            ]
        }),
    )
    .await;

    let response = get(&app, &format!("/api/v1/projects/{project_id}/export")).await;
    let mut archive = read_archive(body_bytes(response).await);

    let about = read_entry(&mut archive, "about.html");
    assert!(about.contains("href=\"about.html\""));
    assert!(!about.contains("href=\"/about\""));
}

fn type_names(value: &Value) -> BTreeSet<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

/// Split the showcase into (active, inactive) type names using the
/// `data-active` marker of each entry and the type of the component inside it.
fn showcase_sets(html: &str) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut active = BTreeSet::new();
    let mut inactive = BTreeSet::new();
    for entry in html.split("data-active=\"").skip(1) {
        let is_active = entry.starts_with("true");
        let type_name = entry
            .split("data-component-type=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap()
            .to_string();
        if is_active {
            active.insert(type_name);
        } else {
            inactive.insert(type_name);
        }
    }
    (active, inactive)
}

#[tokio::test]
async fn showcase_markers_match_live_active_components() {
    let app = common::build_test_app();
    let (_, project_id) = seed_project(&app, "Acme", "Website").await;
    let uri = format!("/api/v1/projects/{project_id}/active-components");

    for allow_list in [
        Value::Null,
        json!([]),
        json!(["hero", "tabs", "quote"]),
        json!(["hero", "rich_text", "breadcrumbs"]),
    ] {
        let response = put_json(&app, &uri, json!({ "activeComponents": allow_list })).await;
        assert_eq!(response.status(), StatusCode::OK, "{allow_list}");
        let view = data(get(&app, &uri).await).await;

        let response = get(&app, &format!("/api/v1/projects/{project_id}/export")).await;
        let mut archive = read_archive(body_bytes(response).await);
        let (active, inactive) = showcase_sets(&read_entry(&mut archive, "showcase.html"));

        assert_eq!(active, type_names(&view["active"]), "{allow_list}");
        assert_eq!(inactive, type_names(&view["inactive"]), "{allow_list}");
        assert_eq!(active.len() + inactive.len(), 14);
    }
}

#[tokio::test]
async fn export_of_missing_project_returns_404() {
    let app = common::build_test_app();
    let response = get(&app, "/api/v1/projects/missing/export").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
