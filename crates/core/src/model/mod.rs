//! Page document model: Client → Project → Page → ordered components.
//!
//! Ordering invariant: after every insert, delete or reorder the `order`
//! values of a page's components are exactly `0..n-1`, and the backing
//! vector is kept sorted by `order`. Readers still go through
//! [`Page::sorted_components`] so documents loaded from disk with gaps
//! render in a stable sequence.

pub mod config;
pub mod display;

use serde::{Deserialize, Serialize};

use crate::registry::{ComponentKind, ComponentType};
use crate::types::{new_id, EntityId, PropsBag, Timestamp};

pub use config::{FooterConfig, NavigationConfig, WelcomePageConfig};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: EntityId,
    pub name: String,
    pub created_at: Timestamp,
}

impl Client {
    pub fn new(name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub client_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub pages: Vec<Page>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_config: Option<NavigationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_config: Option<FooterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_page_config: Option<WelcomePageConfig>,
    /// Allow-list of placeable types; `None` allows every registered type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_components: Option<Vec<ComponentKind>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Homepage,
    #[default]
    Content,
    Listing,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub page_type: PageType,
    #[serde(default)]
    pub components: Vec<PlacedComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedComponent {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default)]
    pub props: PropsBag,
    pub order: u32,
    /// `None` means "use the type's default help text"; `Some("")` means the
    /// author cleared it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl PlacedComponent {
    /// Help text to display: the stored value, or the registry default.
    pub fn effective_help_text(&self) -> Option<&str> {
        match (&self.help_text, self.kind.known()) {
            (Some(text), _) => Some(text.as_str()),
            (None, Some(t)) => Some(crate::registry::meta(t).default_help_text),
            (None, None) => None,
        }
    }
}

/// Shallow merge: top-level keys in `partial` replace those in `base`.
pub fn merge_props(base: &mut PropsBag, partial: &PropsBag) {
    for (key, value) in partial {
        base.insert(key.clone(), value.clone());
    }
}

// ---------------------------------------------------------------------------
// Page operations
// ---------------------------------------------------------------------------

/// What a reorder did with ids that did not line up with the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderOutcome {
    /// Components on the page that were absent from the input and removed.
    pub dropped: Vec<EntityId>,
    /// Input ids that were unknown or repeated.
    pub ignored: Vec<EntityId>,
}

impl ReorderOutcome {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty() && self.ignored.is_empty()
    }
}

impl Page {
    pub fn new(name: impl Into<String>, page_type: PageType) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            page_type,
            components: Vec::new(),
        }
    }

    /// Components in render order.
    pub fn sorted_components(&self) -> Vec<&PlacedComponent> {
        let mut sorted: Vec<&PlacedComponent> = self.components.iter().collect();
        sorted.sort_by_key(|c| c.order);
        sorted
    }

    pub fn component(&self, id: &str) -> Option<&PlacedComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn component_mut(&mut self, id: &str) -> Option<&mut PlacedComponent> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    /// Append a component at the end of the page.
    pub fn push_component(&mut self, kind: ComponentKind, props: PropsBag) -> &PlacedComponent {
        self.normalize_order();
        let order = self.components.len() as u32;
        self.components.push(PlacedComponent {
            id: new_id(),
            kind,
            props,
            order,
            help_text: None,
        });
        &self.components[self.components.len() - 1]
    }

    /// Append a component of a registered type, starting from its default
    /// props shallow-merged with `props`.
    pub fn push_with_defaults(
        &mut self,
        component_type: ComponentType,
        props: &PropsBag,
    ) -> &PlacedComponent {
        let mut merged = crate::registry::default_props(component_type);
        merge_props(&mut merged, props);
        self.push_component(component_type.into(), merged)
    }

    /// Shallow-merge `partial` into a component's props. `None` if the id is
    /// not on this page.
    pub fn merge_component_props(
        &mut self,
        id: &str,
        partial: &PropsBag,
    ) -> Option<&PlacedComponent> {
        let component = self.component_mut(id)?;
        merge_props(&mut component.props, partial);
        Some(component)
    }

    pub fn set_help_text(&mut self, id: &str, help_text: Option<String>) -> Option<&PlacedComponent> {
        let component = self.component_mut(id)?;
        component.help_text = help_text;
        Some(component)
    }

    /// Remove a component and renumber the rest to `0..n-1`.
    pub fn remove_component(&mut self, id: &str) -> Option<PlacedComponent> {
        let index = self.components.iter().position(|c| c.id == id)?;
        let removed = self.components.remove(index);
        self.normalize_order();
        Some(removed)
    }

    /// Apply a full ordering. Components missing from `ordered_ids` are
    /// dropped; unknown and repeated ids are ignored.
    pub fn reorder(&mut self, ordered_ids: &[EntityId]) -> ReorderOutcome {
        let mut outcome = ReorderOutcome::default();
        let mut remaining = std::mem::take(&mut self.components);
        let mut reordered = Vec::with_capacity(remaining.len());

        for id in ordered_ids {
            match remaining.iter().position(|c| &c.id == id) {
                Some(index) => {
                    let mut component = remaining.remove(index);
                    component.order = reordered.len() as u32;
                    reordered.push(component);
                }
                None => outcome.ignored.push(id.clone()),
            }
        }

        outcome.dropped = remaining.into_iter().map(|c| c.id).collect();
        self.components = reordered;
        outcome
    }

    /// Sort by current `order` (stable) and renumber to `0..n-1`.
    pub fn normalize_order(&mut self) {
        self.components.sort_by_key(|c| c.order);
        for (index, component) in self.components.iter_mut().enumerate() {
            component.order = index as u32;
        }
    }

    pub fn has_contiguous_order(&self) -> bool {
        let mut orders: Vec<u32> = self.components.iter().map(|c| c.order).collect();
        orders.sort_unstable();
        orders.iter().enumerate().all(|(i, &o)| o == i as u32)
    }
}

// ---------------------------------------------------------------------------
// Project operations
// ---------------------------------------------------------------------------

impl Project {
    pub fn new(client_id: impl Into<String>, name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: new_id(),
            client_id: client_id.into(),
            name: name.into(),
            pages: Vec::new(),
            created_at: now,
            navigation_config: None,
            footer_config: None,
            welcome_page_config: None,
            active_components: None,
        }
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    /// Deep copy under a new name with fresh ids for the project, its pages
    /// and every component.
    pub fn duplicate(&self, name: impl Into<String>, now: Timestamp) -> Project {
        let mut copy = self.clone();
        copy.id = new_id();
        copy.name = name.into();
        copy.created_at = now;
        for page in &mut copy.pages {
            page.id = new_id();
            for component in &mut page.components {
                component.id = new_id();
            }
        }
        copy
    }

    pub fn navigation(&self) -> NavigationConfig {
        self.navigation_config.clone().unwrap_or_default()
    }

    pub fn footer(&self) -> FooterConfig {
        self.footer_config.clone().unwrap_or_default()
    }

    pub fn welcome(&self) -> WelcomePageConfig {
        self.welcome_page_config.clone().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
