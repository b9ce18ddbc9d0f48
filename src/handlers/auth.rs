use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::auth::{self, SESSION_USER_KEY};
use crate::error::{is_unique_violation, AppError};
use crate::store::users;
use crate::views;
use crate::AppState;

const MIN_PASSWORD_LEN: usize = 4;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_form() -> Html<String> {
    Html(views::auth::login_page(&[], ""))
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(payload): Form<Credentials>,
) -> Result<Response, AppError> {
    let username = payload.username.trim();
    let user = users::by_username(&state.db, username).await?;

    // One generic failure path: whether the username exists stays private.
    let user = match user {
        Some(user) if auth::verify_password(&user.password_hash, &payload.password) => user,
        _ => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Html(views::auth::login_page(
                    &["invalid username or password".to_string()],
                    username,
                )),
            )
                .into_response());
        }
    };

    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, user.id).await?;
    tracing::debug!(user_id = user.id, "login");

    Ok(Redirect::to("/").into_response())
}

pub async fn register_form() -> Html<String> {
    Html(views::auth::register_page(&[], ""))
}

pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(payload): Form<Credentials>,
) -> Result<Response, AppError> {
    let username = payload.username.trim();

    let mut errors = Vec::new();
    if username.is_empty() {
        errors.push("username must not be empty".to_string());
    }
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    if !errors.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(views::auth::register_page(&errors, username)),
        )
            .into_response());
    }

    let password_hash = auth::hash_password(&payload.password)?;

    let user_id = match users::create(&state.db, username, &password_hash).await {
        Ok(id) => id,
        Err(e) if is_unique_violation(&e) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Html(views::auth::register_page(
                    &["username already exists".to_string()],
                    username,
                )),
            )
                .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    // Auto-login right after registration.
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, user_id).await?;
    tracing::info!(user_id, "registered");

    Ok(Redirect::to("/").into_response())
}

pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session.flush().await?;
    Ok(Redirect::to("/login"))
}
