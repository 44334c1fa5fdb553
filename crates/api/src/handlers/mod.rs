pub mod clients;
pub mod comments;
pub mod components;
pub mod export;
pub mod pages;
pub mod projects;
pub mod registry;
