use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::views;

#[derive(Debug)]
pub enum AppError {
    Sqlx(sqlx::Error),
    PasswordHash(argon2::password_hash::Error),
    Session(tower_sessions::session::Error),
    NotFound,
}

impl From<sqlx::Error> for AppError {
    fn from(inner: sqlx::Error) -> Self {
        AppError::Sqlx(inner)
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(inner: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(inner)
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(inner: tower_sessions::session::Error) -> Self {
        AppError::Session(inner)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Html(views::page("Not found", "<p>Not found.</p>")),
            )
                .into_response(),
            AppError::Sqlx(e) => {
                tracing::error!("database error: {}", e);
                internal_error()
            }
            AppError::PasswordHash(e) => {
                tracing::error!("password hashing error: {}", e);
                internal_error()
            }
            AppError::Session(e) => {
                tracing::error!("session error: {}", e);
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(views::page("Error", "<p>Something went wrong.</p>")),
    )
        .into_response()
}

/// Duplicate-key probe used by registration to turn the users.username
/// unique constraint into a friendly form error.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}
