//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod client_repo;
pub mod comment_repo;
pub mod project_repo;

pub use client_repo::ClientRepo;
pub use comment_repo::CommentRepo;
pub use project_repo::ProjectRepo;
