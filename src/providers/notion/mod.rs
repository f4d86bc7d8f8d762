//! Workspace-database provider: static-secret auth, cursor pagination, and
//! a fixed minimum spacing between requests.

mod client;
mod database;
mod models;

pub use client::NotionClient;
pub use models::{DatabaseQuery, DatabaseQueryResponse, DatabaseRow};
