//! Core domain logic for the wirekit page builder.
//!
//! This crate has no I/O dependencies beyond the local persistence backends,
//! so the API service, the static exporter and the CLI all share the exact
//! same registry, document model, schema transforms and renderer.

pub mod active;
pub mod comment;
pub mod error;
pub mod integrity;
pub mod model;
pub mod persistence;
pub mod props;
pub mod registry;
pub mod render;
pub mod richtext;
pub mod schema;
pub mod store;
pub mod types;
