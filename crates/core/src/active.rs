//! Active-component resolution.
//!
//! A project's `activeComponents` allow-list decides which types can be
//! placed and which are marked inactive in the showcase. The live catalog
//! endpoint, the store and the exporter all go through these functions.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::registry::{ComponentKind, ComponentType, ALWAYS_ACTIVE};

/// Active types for an allow-list: every type when `None`, otherwise the
/// always-active types unioned with the known names in the list.
pub fn resolve_active_components(active: Option<&[ComponentKind]>) -> BTreeSet<ComponentType> {
    match active {
        None => ComponentType::ALL.into_iter().collect(),
        Some(list) => ALWAYS_ACTIVE
            .iter()
            .copied()
            .chain(list.iter().filter_map(ComponentKind::known))
            .collect(),
    }
}

/// Registered types not in the active set.
pub fn resolve_inactive_components(active: Option<&[ComponentKind]>) -> BTreeSet<ComponentType> {
    let active = resolve_active_components(active);
    ComponentType::ALL
        .into_iter()
        .filter(|t| !active.contains(t))
        .collect()
}

/// The single check deciding whether a type may be placed on a project.
pub fn ensure_component_allowed(
    active: Option<&[ComponentKind]>,
    kind: &ComponentKind,
) -> Result<ComponentType, CoreError> {
    let Some(component_type) = kind.known() else {
        return Err(CoreError::Validation(format!(
            "unknown component type '{}'",
            kind.name()
        )));
    };
    if !resolve_active_components(active).contains(&component_type) {
        return Err(CoreError::Validation(format!(
            "component type '{component_type}' is not active for this project"
        )));
    }
    Ok(component_type)
}

/// Validate and normalize a requested allow-list: unknown names are
/// rejected, duplicates removed, registry order kept.
pub fn normalize_allow_list(names: &[String]) -> Result<Vec<ComponentKind>, CoreError> {
    let mut seen = BTreeSet::new();
    for name in names {
        let component_type = ComponentType::parse(name.trim()).ok_or_else(|| {
            CoreError::Validation(format!("unknown component type '{name}'"))
        })?;
        seen.insert(component_type);
    }
    Ok(ComponentType::ALL
        .into_iter()
        .filter(|t| seen.contains(t))
        .map(ComponentKind::Known)
        .collect())
}
