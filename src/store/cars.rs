use sqlx::sqlite::SqlitePool;

use crate::models::{Car, CarImage};

pub async fn list_cars(db: &SqlitePool, user_id: i64) -> Result<Vec<Car>, sqlx::Error> {
    sqlx::query_as::<_, Car>(
        "SELECT id, user_id, title, image, created_at FROM cars
         WHERE user_id = ? ORDER BY title ASC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Idempotent create: a second car with the same title for the same user is
/// a silent no-op. Different users may own identically-titled cars.
pub async fn create_car(
    db: &SqlitePool,
    user_id: i64,
    image: &CarImage,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO cars (user_id, title, image) VALUES (?, ?, ?)
         ON CONFLICT (user_id, title) DO NOTHING",
    )
    .bind(user_id)
    .bind(image.title)
    .bind(image.key)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn require_owned_car(
    db: &SqlitePool,
    user_id: i64,
    car_id: i64,
) -> Result<Option<Car>, sqlx::Error> {
    sqlx::query_as::<_, Car>(
        "SELECT id, user_id, title, image, created_at FROM cars
         WHERE id = ? AND user_id = ?",
    )
    .bind(car_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Deleting a foreign or missing car is a no-op; jobs and reminders go with
/// the car via the foreign-key cascade.
pub async fn delete_car(db: &SqlitePool, user_id: i64, car_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM cars WHERE id = ? AND user_id = ?")
        .bind(car_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(())
}

/// The car's odometer as recorded: the highest mileage across its jobs.
pub async fn current_mileage(
    db: &SqlitePool,
    user_id: i64,
    car_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COALESCE(MAX(mileage), 0) FROM jobs WHERE car_id = ? AND user_id = ?",
    )
    .bind(car_id)
    .bind(user_id)
    .fetch_one(db)
    .await
}

/// Per-car cost breakdown for the dashboard, most expensive first.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CarSummary {
    pub id: i64,
    pub title: String,
    pub total: i64,
    pub parts: i64,
    pub work: i64,
    pub job_count: i64,
}

pub async fn cost_summary(db: &SqlitePool, user_id: i64) -> Result<Vec<CarSummary>, sqlx::Error> {
    sqlx::query_as::<_, CarSummary>(
        "SELECT
            c.id,
            c.title,
            COALESCE(SUM(j.cost), 0) AS total,
            COALESCE(SUM(CASE WHEN j.category = 'part' THEN j.cost ELSE 0 END), 0) AS parts,
            COALESCE(SUM(CASE WHEN j.category = 'work' THEN j.cost ELSE 0 END), 0) AS work,
            COUNT(j.id) AS job_count
         FROM cars c
         LEFT JOIN jobs j ON j.car_id = c.id
         WHERE c.user_id = ?
         GROUP BY c.id, c.title
         ORDER BY total DESC, c.title ASC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}
