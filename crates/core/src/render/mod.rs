//! Renderer adapter: component kind + raw property bag → [`RenderNode`].
//!
//! The same entry point backs the live preview endpoint and the static
//! exporter, so a page looks identical in both.

pub mod chrome;
pub mod components;
pub mod node;

pub use node::{escape_attr, escape_text, RenderNode};

use serde_json::Value;

use crate::props::{ComponentProps, PropsError};
use crate::registry::{ComponentKind, ComponentType};
use crate::schema::{read_count, MAX_GALLERY_IMAGES, MAX_TABS};
use crate::types::PropsBag;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Props(#[from] PropsError),

    #[error("cannot prepare {component_type} props: {message}")]
    Transform {
        component_type: ComponentType,
        message: String,
    },
}

/// Render one component.
///
/// Unknown kinds render a visible placeholder rather than failing, so a
/// document written by a newer build still displays.
pub fn render(kind: &ComponentKind, raw: &PropsBag) -> Result<RenderNode, RenderError> {
    let Some(component_type) = kind.known() else {
        return Ok(unknown_placeholder(kind.name()));
    };

    let prepared = prepare(component_type, raw)?;
    let props = ComponentProps::decode(component_type, &prepared)?;
    Ok(components::render_props(&props))
}

/// Render one component, replacing any failure with an inline error block.
pub fn render_or_placeholder(kind: &ComponentKind, raw: &PropsBag) -> RenderNode {
    match render(kind, raw) {
        Ok(node) => node,
        Err(e) => {
            tracing::warn!(component_type = %kind, error = %e, "Component failed to render");
            error_placeholder(kind.name(), &e.to_string())
        }
    }
}

pub fn unknown_placeholder(type_name: &str) -> RenderNode {
    RenderNode::element("div")
        .with_class("wf-placeholder")
        .with_class("wf-placeholder--unknown")
        .with_attr("role", "note")
        .with_child(
            RenderNode::element("p")
                .with_text(format!("Unknown component type \"{type_name}\"")),
        )
}

pub fn error_placeholder(type_name: &str, message: &str) -> RenderNode {
    RenderNode::element("div")
        .with_class("wf-placeholder")
        .with_class("wf-placeholder--error")
        .with_attr("role", "alert")
        .with_child(
            RenderNode::element("p")
                .with_child(RenderNode::element("strong").with_text(type_name))
                .with_text(" could not be rendered."),
        )
        .with_child(
            RenderNode::element("p")
                .with_class("wf-placeholder__detail")
                .with_text(message),
        )
}

// ---------------------------------------------------------------------------
// Render-time transforms
// ---------------------------------------------------------------------------

/// Apply the per-type transform that runs before decoding.
fn prepare(component_type: ComponentType, raw: &PropsBag) -> Result<PropsBag, RenderError> {
    match component_type {
        ComponentType::Tabs => numbered_to_list(
            component_type,
            raw,
            &NumberedList {
                count_key: "tabCount",
                array_key: "tabs",
                max: MAX_TABS,
                slot: |props, n| {
                    let label = slot_text(props, &format!("tab{n}Label"));
                    let content = slot_text(props, &format!("tab{n}Content"));
                    serde_json::json!({
                        "label": label.unwrap_or_else(|| format!("Tab {n}")),
                        "content": content.unwrap_or_default(),
                    })
                },
                slot_keys: |n| vec![format!("tab{n}Label"), format!("tab{n}Content")],
            },
        ),
        ComponentType::ImageGallery => numbered_to_list(
            component_type,
            raw,
            &NumberedList {
                count_key: "imageCount",
                array_key: "images",
                max: MAX_GALLERY_IMAGES,
                slot: |props, n| {
                    let caption = slot_text(props, &format!("image{n}Caption"));
                    serde_json::json!({
                        "caption": caption.unwrap_or_else(|| format!("Image {n}")),
                    })
                },
                slot_keys: |n| vec![format!("image{n}Caption")],
            },
        ),
        _ => Ok(raw.clone()),
    }
}

/// 1-based numbered flat keys collapsed into an array before decoding.
struct NumberedList {
    count_key: &'static str,
    array_key: &'static str,
    max: usize,
    slot: fn(&PropsBag, usize) -> Value,
    slot_keys: fn(usize) -> Vec<String>,
}

fn slot_text(props: &PropsBag, key: &str) -> Option<String> {
    props
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn numbered_to_list(
    component_type: ComponentType,
    raw: &PropsBag,
    list: &NumberedList,
) -> Result<PropsBag, RenderError> {
    let highest_slot = (1..=list.max)
        .rev()
        .find(|&n| (list.slot_keys)(n).iter().any(|k| raw.contains_key(k)));

    let count = match raw.get(list.count_key) {
        None | Some(Value::Null) => match highest_slot {
            Some(n) => n,
            // Nothing authored through numbered keys: keep whatever array is there.
            None => return Ok(raw.clone()),
        },
        Some(value) => read_count(Some(value)).ok_or_else(|| RenderError::Transform {
            component_type,
            message: format!("{} must be a whole number, got {value}", list.count_key),
        })?,
    };
    let count = count.min(list.max);

    let mut props = raw.clone();
    props.remove(list.count_key);
    for n in 1..=list.max {
        for key in (list.slot_keys)(n) {
            props.remove(&key);
        }
    }

    let items: Vec<Value> = (1..=count).map(|n| (list.slot)(raw, n)).collect();
    if items.is_empty() {
        props.remove(list.array_key);
    } else {
        props.insert(list.array_key.to_string(), Value::Array(items));
    }
    Ok(props)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
