use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use chrono::Local;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::store::{cars, reminders};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReminderForm {
    #[serde(default)]
    pub car_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub interval_km: String,
    #[serde(default)]
    pub interval_days: String,
    #[serde(default)]
    pub last_mileage: String,
    #[serde(default)]
    pub last_date: String,
}

pub async fn add(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Form(form): Form<ReminderForm>,
) -> Result<Redirect, AppError> {
    let car_id = form
        .car_id
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::NotFound)?;
    cars::require_owned_car(&state.db, user_id, car_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let today = Local::now().date_naive();
    // A reminder needs a title and at least one positive interval; anything
    // less goes back to the car page without creating a row.
    if let Some(reminder) = reminders::NewReminder::parse(
        &form.title,
        &form.interval_km,
        &form.interval_days,
        &form.last_mileage,
        &form.last_date,
        today,
    ) {
        reminders::create(&state.db, user_id, car_id, &reminder).await?;
    }

    Ok(Redirect::to(&format!("/cars/{car_id}")))
}

pub async fn done(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(reminder_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let reminder = reminders::require_owned_reminder(&state.db, user_id, reminder_id)
        .await?
        .ok_or(AppError::NotFound)?;

    // The checkpoint comes from the server's own records, not the form.
    let current_mileage = cars::current_mileage(&state.db, user_id, reminder.car_id).await?;
    let today = Local::now().date_naive();
    reminders::mark_done(&state.db, user_id, reminder_id, current_mileage, today).await?;

    Ok(Redirect::to(&format!("/cars/{}", reminder.car_id)))
}

pub async fn toggle(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(reminder_id): Path<i64>,
) -> Result<Redirect, AppError> {
    match reminders::toggle(&state.db, user_id, reminder_id).await? {
        Some(car_id) => Ok(Redirect::to(&format!("/cars/{car_id}"))),
        None => Err(AppError::NotFound),
    }
}
