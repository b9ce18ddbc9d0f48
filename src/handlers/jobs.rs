use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::handlers::dashboard;
use crate::models::JobForm;
use crate::store::{cars, jobs};
use crate::views;
use crate::AppState;

pub async fn add_job(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Form(form): Form<JobForm>,
) -> Result<Response, AppError> {
    match jobs::create_job(&state.db, user_id, &form).await? {
        jobs::JobOutcome::Created { car_id } => {
            Ok(Redirect::to(&format!("/cars/{car_id}")).into_response())
        }
        jobs::JobOutcome::Invalid(errors) => {
            let data = dashboard::load(&state.db, user_id).await?;
            Ok((
                StatusCode::BAD_REQUEST,
                Html(views::dashboard::page(&data, &errors, &form)),
            )
                .into_response())
        }
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(job_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let job = jobs::require_owned_job(&state.db, user_id, job_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let cars = cars::list_cars(&state.db, user_id).await?;

    Ok(Html(views::job::edit_page(
        job_id,
        &JobForm::from_job(&job),
        &cars,
        &[],
    )))
}

pub async fn edit_save(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(job_id): Path<i64>,
    Form(form): Form<JobForm>,
) -> Result<Response, AppError> {
    match jobs::update_job(&state.db, user_id, job_id, &form, state.strict_job_edits).await? {
        jobs::UpdateOutcome::NotFound => Err(AppError::NotFound),
        jobs::UpdateOutcome::Invalid(errors) => {
            let cars = cars::list_cars(&state.db, user_id).await?;
            Ok((
                StatusCode::BAD_REQUEST,
                Html(views::job::edit_page(job_id, &form, &cars, &errors)),
            )
                .into_response())
        }
        jobs::UpdateOutcome::Updated { car_id } => {
            Ok(Redirect::to(&format!("/cars/{car_id}")).into_response())
        }
    }
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(job_id): Path<i64>,
) -> Result<Redirect, AppError> {
    match jobs::delete_job(&state.db, user_id, job_id).await? {
        None => Err(AppError::NotFound),
        Some(Some(car_id)) => Ok(Redirect::to(&format!("/cars/{car_id}"))),
        // Legacy rows without a car land back on the dashboard.
        Some(None) => Ok(Redirect::to("/")),
    }
}
