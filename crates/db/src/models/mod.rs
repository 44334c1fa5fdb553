//! Row structs for the `clients`, `projects` and `comments` tables, with
//! conversions to and from the core document model.

pub mod client;
pub mod comment;
pub mod project;
