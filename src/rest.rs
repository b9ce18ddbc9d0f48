use axum::{
    routing::{get, post},
    Router,
};
use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::{handlers, AppState};

/// Full application: routes plus the cookie-session layer backed by the
/// same SQLite pool as the data.
pub async fn app(state: AppState) -> Result<Router, sqlx::Error> {
    let session_store = SqliteStore::new(state.db.clone());
    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::days(14)));

    Ok(router(state).layer(session_layer))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard::index))
        .route(
            "/register",
            get(handlers::auth::register_form).post(handlers::auth::register),
        )
        .route(
            "/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout))
        .route("/add_car", post(handlers::cars::add_car))
        .route("/add_job", post(handlers::jobs::add_job))
        .route("/cars/:id", get(handlers::cars::show))
        .route("/cars/:id/delete", post(handlers::cars::delete))
        .route(
            "/jobs/:id/edit",
            get(handlers::jobs::edit_form).post(handlers::jobs::edit_save),
        )
        .route("/jobs/:id/delete", post(handlers::jobs::delete))
        .route("/reminders/add", post(handlers::reminders::add))
        .route("/reminders/:id/done", post(handlers::reminders::done))
        .route("/reminders/:id/toggle", post(handlers::reminders::toggle))
        .with_state(state)
}
