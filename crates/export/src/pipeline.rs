//! Orchestrates a full project export.

use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use chrono::Datelike;
use wirekit_core::model::display::{slugify, sort_pages_for_display};
use wirekit_core::model::{Page, Project};
use wirekit_core::types::{EntityId, Timestamp};

use crate::archive;
use crate::documents::{self, PageLink, RenderedDocument};
use crate::links::{rewrite_links, LinkMap, INDEX_FILE, SHOWCASE_FILE};
use crate::readme::{readme, README_FILE_NAME};
use crate::script::{INTERACTIVITY_JS, SCRIPT_FILE_NAME};
use crate::stylesheet::{document_css, StylesheetProvider};

/// File stems no page may take.
const RESERVED_STEMS: &[&str] = &["index", "showcase", "interactivity", "readme"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything time- or client-dependent an export needs.
#[derive(Debug, Clone)]
pub struct ExportContext {
    pub client_name: String,
    pub generated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub name: String,
    /// Human-readable description shown in the README.
    pub title: String,
    pub contents: Vec<u8>,
}

/// A component or page that was replaced by an error block.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFailure {
    pub file: String,
    pub page: String,
    /// `None` when the whole page failed.
    pub component_id: Option<EntityId>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExportBundle {
    pub files: Vec<ExportFile>,
    pub failures: Vec<ExportFailure>,
}

impl ExportBundle {
    pub fn file(&self, name: &str) -> Option<&ExportFile> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn to_zip(&self) -> Result<Vec<u8>, ExportError> {
        archive::write_zip(&self.files)
    }
}

/// File names for pages in display order. Colliding slugs get `-2`, `-3`.
pub fn assign_file_names(pages: &[&Page]) -> Vec<String> {
    let mut taken: BTreeSet<String> = RESERVED_STEMS.iter().map(|s| s.to_string()).collect();
    pages
        .iter()
        .map(|page| {
            let mut base = slugify(&page.name);
            if base.is_empty() {
                base = "page".to_string();
            }
            let mut stem = base.clone();
            let mut n = 2;
            while taken.contains(&stem) {
                stem = format!("{base}-{n}");
                n += 1;
            }
            taken.insert(stem.clone());
            format!("{stem}.html")
        })
        .collect()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "page could not be rendered".to_string()
    }
}

fn html_file(name: &str, title: &str, html: &str, links: &LinkMap) -> ExportFile {
    ExportFile {
        name: name.to_string(),
        title: title.to_string(),
        contents: rewrite_links(html, links).into_bytes(),
    }
}

fn record_component_failures(
    failures: &mut Vec<ExportFailure>,
    file: &str,
    page: &str,
    rendered: &RenderedDocument,
) {
    failures.extend(rendered.failures.iter().map(|f| ExportFailure {
        file: file.to_string(),
        page: page.to_string(),
        component_id: Some(f.component_id.clone()),
        message: format!("{}: {}", f.component_type, f.message),
    }));
}

/// Render every document of a project.
///
/// Never fails: broken components and pages are replaced by error blocks
/// and listed in [`ExportBundle::failures`] and the README.
pub fn build_bundle(
    project: &Project,
    ctx: &ExportContext,
    stylesheet: &dyn StylesheetProvider,
) -> ExportBundle {
    let css = document_css(stylesheet);
    let year = ctx.generated_at.year();
    let pages = sort_pages_for_display(&project.pages);
    let file_names = assign_file_names(&pages);

    let mut links = LinkMap::new();
    for (page, file_name) in pages.iter().zip(&file_names) {
        links.insert(slugify(&page.name), file_name.clone());
    }

    let mut bundle = ExportBundle::default();

    let page_links: Vec<PageLink<'_>> = pages
        .iter()
        .zip(&file_names)
        .map(|(page, file_name)| PageLink {
            name: &page.name,
            file_name,
        })
        .collect();
    let welcome = documents::welcome_document(project, &ctx.client_name, &page_links, &css);
    bundle
        .files
        .push(html_file(INDEX_FILE, "Welcome page", &welcome, &links));

    let showcase = documents::showcase_document(project, &css);
    record_component_failures(&mut bundle.failures, SHOWCASE_FILE, "Component showcase", &showcase);
    bundle.files.push(html_file(
        SHOWCASE_FILE,
        "Component showcase",
        &showcase.html,
        &links,
    ));

    for (page, file_name) in pages.iter().zip(&file_names) {
        let rendered = panic::catch_unwind(AssertUnwindSafe(|| {
            documents::page_document(project, page, year, &css)
        }));

        let html = match rendered {
            Ok(doc) => {
                record_component_failures(&mut bundle.failures, file_name, &page.name, &doc);
                doc.html
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(
                    project_id = %project.id,
                    page_id = %page.id,
                    error = %message,
                    "Page failed to render during export",
                );
                bundle.failures.push(ExportFailure {
                    file: file_name.clone(),
                    page: page.name.clone(),
                    component_id: None,
                    message: message.clone(),
                });
                documents::error_document(&page.name, &message, &css)
            }
        };
        bundle
            .files
            .push(html_file(file_name, &page.name, &html, &links));
    }

    bundle.files.push(ExportFile {
        name: SCRIPT_FILE_NAME.to_string(),
        title: "Interactive behaviour".to_string(),
        contents: INTERACTIVITY_JS.as_bytes().to_vec(),
    });

    let readme = readme(&project.name, ctx, &bundle.files, &bundle.failures);
    bundle.files.push(ExportFile {
        name: README_FILE_NAME.to_string(),
        title: "This file".to_string(),
        contents: readme.into_bytes(),
    });

    if !bundle.failures.is_empty() {
        tracing::warn!(
            project_id = %project.id,
            failures = bundle.failures.len(),
            "Export completed with failures",
        );
    }
    tracing::info!(
        project_id = %project.id,
        files = bundle.files.len(),
        "Project exported",
    );
    bundle
}

/// Render a project and pack it into a zip archive.
pub fn export_project(
    project: &Project,
    ctx: &ExportContext,
    stylesheet: &dyn StylesheetProvider,
) -> Result<Vec<u8>, ExportError> {
    build_bundle(project, ctx, stylesheet).to_zip()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use wirekit_core::model::PageType;
    use wirekit_core::registry::{ComponentKind, ComponentType};
    use wirekit_core::types::PropsBag;

    use super::*;
    use crate::stylesheet::EmbeddedStylesheet;

    fn ctx() -> ExportContext {
        ExportContext {
            client_name: "Acme Ltd".to_string(),
            generated_at: Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn bag(value: serde_json::Value) -> PropsBag {
        value.as_object().cloned().unwrap()
    }

    fn html(bundle: &ExportBundle, name: &str) -> String {
        String::from_utf8(bundle.file(name).unwrap().contents.clone()).unwrap()
    }

    fn sample_project() -> Project {
        let mut project = Project::new("client-1", "Acme website", ctx().generated_at);

        let mut home = Page::new("Home", PageType::Homepage);
        home.push_with_defaults(ComponentType::Hero, &bag(json!({ "buttonLink": "/about-us" })));
        home.push_with_defaults(ComponentType::Accordion, &PropsBag::new());

        let mut about = Page::new("About Us", PageType::Content);
        about.push_with_defaults(ComponentType::RichText, &PropsBag::new());

        let mut contact = Page::new("Contact", PageType::Content);
        contact.push_with_defaults(ComponentType::ContactForm, &PropsBag::new());

        project.pages = vec![contact, about, home];
        project
    }

    #[test]
    fn bundle_contains_expected_files() {
        let bundle = build_bundle(&sample_project(), &ctx(), &EmbeddedStylesheet);
        assert_eq!(
            bundle.file_names(),
            vec![
                "index.html",
                "showcase.html",
                "home.html",
                "about-us.html",
                "contact.html",
                "interactivity.js",
                "README.txt",
            ]
        );
        assert!(bundle.failures.is_empty());
    }

    #[test]
    fn export_is_deterministic_for_same_context() {
        let project = sample_project();
        let first = build_bundle(&project, &ctx(), &EmbeddedStylesheet);
        let second = build_bundle(&project, &ctx(), &EmbeddedStylesheet);
        assert_eq!(first.files, second.files);
        assert_eq!(
            export_project(&project, &ctx(), &EmbeddedStylesheet).unwrap(),
            export_project(&project, &ctx(), &EmbeddedStylesheet).unwrap(),
        );
        assert_eq!(
            bundle_script(&first),
            INTERACTIVITY_JS.as_bytes(),
        );
    }

    fn bundle_script(bundle: &ExportBundle) -> &[u8] {
        &bundle.file(SCRIPT_FILE_NAME).unwrap().contents
    }

    #[test]
    fn links_are_rewritten_to_exported_files() {
        let bundle = build_bundle(&sample_project(), &ctx(), &EmbeddedStylesheet);
        let home = html(&bundle, "home.html");
        assert!(home.contains(r#"href="about-us.html""#));
        assert!(home.contains(r#"href="index.html""#));
        assert!(!home.contains(r#"href="/""#));

        let index = html(&bundle, "index.html");
        assert!(index.contains(r#"<a href="home.html">Home</a>"#));
        assert!(index.contains(r#"href="showcase.html""#));
    }

    #[test]
    fn pages_carry_chrome_and_component_wrappers() {
        let bundle = build_bundle(&sample_project(), &ctx(), &EmbeddedStylesheet);
        let home = html(&bundle, "home.html");
        assert!(home.starts_with("<!DOCTYPE html>"));
        assert!(home.contains("wf-site-header"));
        assert!(home.contains("© 2026 Site name"));
        assert!(home.contains(r#"data-component-type="hero""#));
        assert!(home.contains(r#"data-component-category="Heroes""#));
        assert!(home.contains("data-help-text="));
        assert!(home.contains("data-info-button"));
        assert!(home.contains(r#"<script src="interactivity.js"></script>"#));
        assert!(home.contains(".wf-modal"));
    }

    #[test]
    fn broken_component_is_isolated() {
        let mut project = sample_project();
        let page = project.pages.iter_mut().find(|p| p.name == "Contact").unwrap();
        let bad_id = page
            .push_component(ComponentType::Tabs.into(), bag(json!({ "tabCount": "several" })))
            .id
            .clone();

        let bundle = build_bundle(&project, &ctx(), &EmbeddedStylesheet);
        assert_eq!(bundle.files.len(), 7);
        assert_eq!(bundle.failures.len(), 1);
        assert_eq!(bundle.failures[0].file, "contact.html");
        assert_eq!(bundle.failures[0].component_id.as_deref(), Some(bad_id.as_str()));

        let contact = html(&bundle, "contact.html");
        assert!(contact.contains("wf-placeholder--error"));
        assert!(contact.contains("data-static-form"));
        assert!(!html(&bundle, "home.html").contains("wf-placeholder--error"));
        assert!(html(&bundle, "README.txt").contains("Problems"));
    }

    #[test]
    fn unknown_component_renders_placeholder_without_failure() {
        let mut project = sample_project();
        project.pages[0].push_component(ComponentKind::from("retired_widget".to_string()), PropsBag::new());

        let bundle = build_bundle(&project, &ctx(), &EmbeddedStylesheet);
        assert!(bundle.failures.is_empty());
        assert!(html(&bundle, "contact.html").contains("wf-placeholder--unknown"));
    }

    #[test]
    fn colliding_slugs_get_suffixes() {
        let pages = [
            Page::new("News", PageType::Content),
            Page::new("news", PageType::Listing),
            Page::new("News ", PageType::Content),
            Page::new("Showcase", PageType::Content),
            Page::new("???", PageType::Content),
        ];
        let refs: Vec<&Page> = pages.iter().collect();
        assert_eq!(
            assign_file_names(&refs),
            vec!["news.html", "news-2.html", "news-3.html", "showcase-2.html", "page.html"]
        );
    }

    #[test]
    fn showcase_marks_inactive_types() {
        let mut project = sample_project();
        project.active_components = Some(vec![ComponentType::Quote.into()]);

        let bundle = build_bundle(&project, &ctx(), &EmbeddedStylesheet);
        let showcase = html(&bundle, "showcase.html");
        let active = showcase.matches(r#"data-active="true""#).count();
        let inactive = showcase.matches(r#"data-active="false""#).count();
        // Quote plus the three always-active types.
        assert_eq!(active, 4);
        assert_eq!(active + inactive, ComponentType::ALL.len());
    }

    #[test]
    fn empty_project_still_exports() {
        let project = Project::new("client-1", "Empty", ctx().generated_at);
        let bytes = export_project(&project, &ctx(), &EmbeddedStylesheet);
        assert_matches!(bytes, Ok(b) if !b.is_empty());
    }
}
