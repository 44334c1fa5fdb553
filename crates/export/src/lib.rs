//! Static site export: renders a project into standalone HTML documents and
//! packs them with the interactivity script and a README into a zip.

pub mod archive;
pub mod documents;
pub mod links;
pub mod pipeline;
pub mod readme;
pub mod script;
pub mod stylesheet;

pub use pipeline::{
    build_bundle, export_project, ExportBundle, ExportContext, ExportError, ExportFailure,
    ExportFile,
};
pub use stylesheet::{EmbeddedStylesheet, FileStylesheet, StylesheetProvider};
