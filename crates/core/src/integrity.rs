//! Data integrity scan and repair over raw JSON documents.
//!
//! These run on `serde_json::Value` rather than typed models so they can look
//! at documents the typed model would refuse to load. Nothing here runs on
//! read paths: scans are explicit, and repair is a separate opt-in step.
//!
//! Repair rules:
//!
//! | problem                                   | fix                          |
//! |-------------------------------------------|------------------------------|
//! | page without `components` array           | `[]`                         |
//! | page without `id`                         | `<project-id>-p<index>`      |
//! | component without `id`                    | `<page-id>-c<index>`         |
//! | component without `type`                  | `rich_text`                  |
//! | missing or non-numeric `order`            | array index                  |
//! | non-contiguous orders                     | renumbered `0..n-1`          |
//! | `props` not an object                     | `{}`                         |
//! | delimited string where a list is expected | split into the list shape    |

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::registry::ComponentType;
use crate::schema::split_delimited;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingComponents,
    MissingId,
    DuplicateId,
    MissingType,
    UnknownType,
    InvalidOrder,
    NonContiguousOrder,
    InvalidProps,
    DelimitedList,
}

impl IssueKind {
    /// Whether [`repair_project`] fixes this kind of issue.
    pub fn is_repairable(&self) -> bool {
        !matches!(self, Self::UnknownType | Self::DuplicateId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// JSON path to the offending value, e.g. `$.pages[0].components[2].order`.
    pub path: String,
    pub kind: IssueKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub issues: Vec<Issue>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn repairable_count(&self) -> usize {
        self.issues.iter().filter(|i| i.kind.is_repairable()).count()
    }

    fn push(&mut self, path: String, kind: IssueKind, message: impl Into<String>) {
        self.issues.push(Issue {
            path,
            kind,
            message: message.into(),
        });
    }
}

/// Props keys that hold lists but are sometimes hand-edited as delimited strings.
fn delimited_list_key(component_type: &str) -> Option<&'static str> {
    match ComponentType::parse(component_type)? {
        ComponentType::Signposts | ComponentType::Accordion => Some("items"),
        ComponentType::NewsListing => Some("categories"),
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Scan one project document. `base` is the JSON path of the project.
pub fn scan_project(project: &Value, base: &str) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    scan_project_into(project, base, &mut report);
    report
}

/// Scan a whole store document (`{ clients, projects, comments }`).
pub fn scan_document(document: &Value) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    if let Some(projects) = document.get("projects").and_then(Value::as_array) {
        for (i, project) in projects.iter().enumerate() {
            scan_project_into(project, &format!("$.projects[{i}]"), &mut report);
        }
    }
    report
}

fn scan_project_into(project: &Value, base: &str, report: &mut IntegrityReport) {
    let Some(pages) = project.get("pages").and_then(Value::as_array) else {
        return;
    };
    let mut seen_ids = std::collections::HashSet::new();

    for (p, page) in pages.iter().enumerate() {
        let page_path = format!("{base}.pages[{p}]");
        if non_empty_str(page.get("id")).is_none() {
            report.push(format!("{page_path}.id"), IssueKind::MissingId, "Page has no id");
        }
        let Some(components) = page.get("components").and_then(Value::as_array) else {
            report.push(
                format!("{page_path}.components"),
                IssueKind::MissingComponents,
                "Page has no components array",
            );
            continue;
        };

        let mut orders = Vec::new();
        let mut orders_valid = true;
        for (c, component) in components.iter().enumerate() {
            let path = format!("{page_path}.components[{c}]");

            match non_empty_str(component.get("id")) {
                None => report.push(format!("{path}.id"), IssueKind::MissingId, "Component has no id"),
                Some(id) => {
                    if !seen_ids.insert(id.to_string()) {
                        report.push(
                            format!("{path}.id"),
                            IssueKind::DuplicateId,
                            format!("Component id '{id}' is used more than once"),
                        );
                    }
                }
            }

            match non_empty_str(component.get("type")) {
                None => report.push(
                    format!("{path}.type"),
                    IssueKind::MissingType,
                    "Component has no type",
                ),
                Some(t) if ComponentType::parse(t).is_none() => report.push(
                    format!("{path}.type"),
                    IssueKind::UnknownType,
                    format!("Unknown component type '{t}'"),
                ),
                Some(_) => {}
            }

            match component.get("order").and_then(Value::as_u64) {
                Some(order) => orders.push(order),
                None => {
                    orders_valid = false;
                    report.push(
                        format!("{path}.order"),
                        IssueKind::InvalidOrder,
                        "Component order is missing or not a whole number",
                    );
                }
            }

            match component.get("props") {
                Some(Value::Object(props)) => {
                    if let Some(key) = component
                        .get("type")
                        .and_then(Value::as_str)
                        .and_then(delimited_list_key)
                    {
                        if props.get(key).is_some_and(Value::is_string) {
                            report.push(
                                format!("{path}.props.{key}"),
                                IssueKind::DelimitedList,
                                format!("'{key}' is a delimited string, expected a list"),
                            );
                        }
                    }
                }
                _ => report.push(
                    format!("{path}.props"),
                    IssueKind::InvalidProps,
                    "Component props are missing or not an object",
                ),
            }
        }

        if orders_valid {
            orders.sort_unstable();
            let contiguous = orders.iter().enumerate().all(|(i, &o)| o == i as u64);
            if !contiguous {
                report.push(
                    format!("{page_path}.components"),
                    IssueKind::NonContiguousOrder,
                    format!("Component orders {orders:?} are not 0..{}", orders.len()),
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Repair
// ---------------------------------------------------------------------------

/// Repair one project document in place. Returns the issues that were fixed.
pub fn repair_project(project: &mut Value, base: &str) -> IntegrityReport {
    let before = scan_project(project, base);
    let project_id = non_empty_str(project.get("id"))
        .unwrap_or("project")
        .to_string();

    if let Some(pages) = project.get_mut("pages").and_then(Value::as_array_mut) {
        for (p, page) in pages.iter_mut().enumerate() {
            if let Some(page) = page.as_object_mut() {
                repair_page(page, &format!("{project_id}-p{p}"));
            }
        }
    }

    IntegrityReport {
        issues: before
            .issues
            .into_iter()
            .filter(|i| i.kind.is_repairable())
            .collect(),
    }
}

/// Repair every project in a store document.
pub fn repair_document(document: &mut Value) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    if let Some(projects) = document.get_mut("projects").and_then(Value::as_array_mut) {
        for (i, project) in projects.iter_mut().enumerate() {
            let fixed = repair_project(project, &format!("$.projects[{i}]"));
            report.issues.extend(fixed.issues);
        }
    }
    report
}

fn repair_page(page: &mut Map<String, Value>, fallback_page_id: &str) {
    if non_empty_str(page.get("id")).is_none() {
        page.insert("id".to_string(), Value::String(fallback_page_id.to_string()));
    }
    let page_id = non_empty_str(page.get("id"))
        .unwrap_or(fallback_page_id)
        .to_string();

    if !page.get("components").is_some_and(Value::is_array) {
        page.insert("components".to_string(), Value::Array(Vec::new()));
    }
    let Some(components) = page.get_mut("components").and_then(Value::as_array_mut) else {
        return;
    };

    for (index, component) in components.iter_mut().enumerate() {
        if !component.is_object() {
            *component = json!({});
        }
        if let Some(component) = component.as_object_mut() {
            repair_component(component, &page_id, index);
        }
    }

    // Renumber by current order (stable on ties) so orders are 0..n-1.
    let mut indexed: Vec<(u64, usize)> = components
        .iter()
        .enumerate()
        .map(|(i, c)| (c.get("order").and_then(Value::as_u64).unwrap_or(i as u64), i))
        .collect();
    indexed.sort();
    let mut taken: Vec<Option<Value>> = components.drain(..).map(Some).collect();
    for (order, (_, original)) in indexed.into_iter().enumerate() {
        if let Some(mut component) = taken[original].take() {
            component["order"] = Value::from(order as u64);
            components.push(component);
        }
    }
}

fn repair_component(component: &mut Map<String, Value>, page_id: &str, index: usize) {
    if non_empty_str(component.get("id")).is_none() {
        component.insert("id".to_string(), Value::String(format!("{page_id}-c{index}")));
    }
    if non_empty_str(component.get("type")).is_none() {
        component.insert(
            "type".to_string(),
            Value::String(ComponentType::RichText.as_str().to_string()),
        );
    }
    if component.get("order").and_then(Value::as_u64).is_none() {
        component.insert("order".to_string(), Value::from(index as u64));
    }
    if !component.get("props").is_some_and(Value::is_object) {
        component.insert("props".to_string(), Value::Object(Map::new()));
    }

    let list_key = component
        .get("type")
        .and_then(Value::as_str)
        .and_then(delimited_list_key);
    if let (Some(key), Some(Value::Object(props))) = (list_key, component.get_mut("props")) {
        if let Some(Value::String(text)) = props.get(key) {
            let parts = split_delimited(text);
            let list: Vec<Value> = if key == "categories" {
                parts.into_iter().map(Value::String).collect()
            } else {
                parts.into_iter().map(|title| json!({ "title": title })).collect()
            };
            props.insert(key.to_string(), Value::Array(list));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Project;

    fn broken_project() -> Value {
        json!({
            "id": "proj",
            "clientId": "client",
            "name": "Site",
            "createdAt": "2024-05-01T00:00:00Z",
            "pages": [
                {
                    "id": "home",
                    "name": "Home",
                    "type": "homepage",
                    "components": [
                        { "type": "hero", "props": {}, "order": 4 },
                        { "id": "b", "props": "oops", "order": "first" },
                        { "id": "c", "type": "signposts", "props": { "items": "Design|Build" }, "order": 1 },
                        { "id": "d", "type": "news_listing", "props": { "categories": "News, Events" }, "order": 9 }
                    ]
                },
                { "id": "about", "name": "About" }
            ]
        })
    }

    fn kinds(report: &IntegrityReport) -> Vec<IssueKind> {
        report.issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn scan_finds_every_problem_with_paths() {
        let report = scan_project(&broken_project(), "$");
        let kinds = kinds(&report);
        assert!(kinds.contains(&IssueKind::MissingId));
        assert!(kinds.contains(&IssueKind::MissingType));
        assert!(kinds.contains(&IssueKind::InvalidOrder));
        assert!(kinds.contains(&IssueKind::InvalidProps));
        assert!(kinds.contains(&IssueKind::DelimitedList));
        assert!(kinds.contains(&IssueKind::MissingComponents));
        assert!(report
            .issues
            .iter()
            .any(|i| i.path == "$.pages[0].components[1].order"));
        assert!(report.issues.iter().any(|i| i.path == "$.pages[1].components"));
    }

    #[test]
    fn repair_produces_a_loadable_project() {
        let mut value = broken_project();
        let fixed = repair_project(&mut value, "$");
        assert!(!fixed.is_clean());

        assert!(scan_project(&value, "$").is_clean());
        let project: Project = serde_json::from_value(value).unwrap();

        let home = project.page("home").unwrap();
        assert!(home.has_contiguous_order());
        let ids: Vec<&str> = home.sorted_components().iter().map(|c| c.id.as_str()).collect();
        // "b" had an invalid order and fell back to its index (1); ties keep
        // array position, so "b" precedes "c".
        assert_eq!(ids, vec!["b", "c", "home-c0", "d"]);

        let b = home.component("b").unwrap();
        assert_eq!(b.kind.name(), "rich_text");
        assert!(b.props.is_empty());

        let c = home.component("c").unwrap();
        assert_eq!(c.props["items"], json!([{ "title": "Design" }, { "title": "Build" }]));
        let d = home.component("d").unwrap();
        assert_eq!(d.props["categories"], json!(["News", "Events"]));

        assert!(project.page("about").unwrap().components.is_empty());
    }

    #[test]
    fn repair_is_idempotent() {
        let mut value = broken_project();
        repair_project(&mut value, "$");
        let once = value.clone();
        let second = repair_project(&mut value, "$");
        assert!(second.is_clean());
        assert_eq!(value, once);
    }

    #[test]
    fn unknown_types_are_reported_not_repaired() {
        let mut value = json!({
            "pages": [{ "id": "p", "components": [
                { "id": "x", "type": "legacy", "props": {}, "order": 0 }
            ]}]
        });
        let report = scan_project(&value, "$");
        assert_eq!(kinds(&report), vec![IssueKind::UnknownType]);
        assert!(repair_project(&mut value, "$").is_clean());
        assert_eq!(value["pages"][0]["components"][0]["type"], "legacy");
    }

    #[test]
    fn document_scan_prefixes_project_paths() {
        let document = json!({ "clients": [], "projects": [broken_project()] });
        let report = scan_document(&document);
        assert!(report
            .issues
            .iter()
            .all(|i| i.path.starts_with("$.projects[0].pages")));
    }
}
