//! HTTP client for a remote wirekit API.
//!
//! [`RemotePersistence`] implements the core `Persistence` trait over the
//! API's REST endpoints, so a builder store can run against another
//! server's data exactly as it runs against a local file or database.

pub mod api;
pub mod persistence;

pub use api::{RemoteApi, RemoteApiError};
pub use persistence::RemotePersistence;
