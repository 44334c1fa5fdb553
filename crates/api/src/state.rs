use std::sync::Arc;

use wirekit_core::store::BuilderStore;
use wirekit_export::StylesheetProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The builder store; the only mutator of the document model.
    pub store: Arc<BuilderStore>,
    pub config: Arc<ServerConfig>,
    /// Base CSS for static exports.
    pub stylesheet: Arc<dyn StylesheetProvider>,
}
