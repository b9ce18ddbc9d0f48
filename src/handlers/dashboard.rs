use axum::{extract::State, response::Html};
use sqlx::sqlite::SqlitePool;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::{Car, JobForm, JobWithCar};
use crate::store::{cars, jobs};
use crate::views;
use crate::AppState;

const RECENT_JOBS: i64 = 50;

pub struct DashboardData {
    pub cars: Vec<Car>,
    pub recent: Vec<JobWithCar>,
    pub summary: Vec<cars::CarSummary>,
}

/// Also re-fetched when a job submission fails, so the 400 re-render shows
/// current data next to the echoed form.
pub async fn load(db: &SqlitePool, user_id: i64) -> Result<DashboardData, AppError> {
    Ok(DashboardData {
        cars: cars::list_cars(db, user_id).await?,
        recent: jobs::recent_jobs(db, user_id, RECENT_JOBS).await?,
        summary: cars::cost_summary(db, user_id).await?,
    })
}

pub async fn index(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Html<String>, AppError> {
    let data = load(&state.db, user_id).await?;
    Ok(Html(views::dashboard::page(&data, &[], &JobForm::default())))
}
