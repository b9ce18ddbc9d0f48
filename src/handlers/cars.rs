use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use chrono::Local;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::filters::{FilterParams, JobFilter};
use crate::models::car_image;
use crate::store::{cars, jobs, reminders};
use crate::views;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddCarForm {
    #[serde(default)]
    pub image: String,
}

/// Cars come from the fixed catalog; an unknown key creates nothing, and a
/// duplicate title for the same user is absorbed by the idempotent insert.
pub async fn add_car(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Form(form): Form<AddCarForm>,
) -> Result<Redirect, AppError> {
    if let Some(image) = car_image(form.image.trim()) {
        cars::create_car(&state.db, user_id, image).await?;
    }
    Ok(Redirect::to("/"))
}

pub async fn show(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(car_id): Path<i64>,
    Query(params): Query<FilterParams>,
) -> Result<Html<String>, AppError> {
    let car = cars::require_owned_car(&state.db, user_id, car_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let current_mileage = cars::current_mileage(&state.db, user_id, car_id).await?;
    let today = Local::now().date_naive();

    let reminder_rows = reminders::list_for_car(&state.db, user_id, car_id).await?;
    let reminder_rows: Vec<_> = reminder_rows
        .into_iter()
        .map(|r| {
            let due = r.due_info(current_mileage, today);
            (r, due)
        })
        .collect();

    let filter = JobFilter::from_params(&params);
    let (history, totals) = jobs::filtered_history(&state.db, user_id, car_id, &filter).await?;

    Ok(Html(views::car::page(
        &car,
        current_mileage,
        today,
        &reminder_rows,
        &params,
        &history,
        &totals,
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(car_id): Path<i64>,
) -> Result<Redirect, AppError> {
    cars::delete_car(&state.db, user_id, car_id).await?;
    Ok(Redirect::to("/"))
}
