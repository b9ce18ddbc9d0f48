pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod rest;
pub mod status;
pub mod store;
pub mod views;

use sqlx::sqlite::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Re-run the monotonic-mileage check when a job is edited, not just
    /// when it is created. Off by default: edits stay permissive so a typo
    /// in an old entry can be corrected by hand.
    pub strict_job_edits: bool,
}
