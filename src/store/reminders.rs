use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool;

use crate::models::Reminder;

/// Input for a new reminder, already validated: at least one interval is
/// present and positive, and the title is non-empty.
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub title: String,
    pub interval_km: Option<i64>,
    pub interval_days: Option<i64>,
    pub last_mileage: i64,
    pub last_date: NaiveDate,
}

impl NewReminder {
    /// `None` when the raw fields don't make a usable reminder: without a
    /// title or at least one positive interval there is nothing to track.
    pub fn parse(
        title: &str,
        interval_km: &str,
        interval_days: &str,
        last_mileage: &str,
        last_date: &str,
        today: NaiveDate,
    ) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let interval_km = positive(interval_km);
        let interval_days = positive(interval_days);
        if interval_km.is_none() && interval_days.is_none() {
            return None;
        }

        let last_mileage = crate::filters::parse_non_negative(last_mileage.trim()).unwrap_or(0);
        let last_date = last_date.trim().parse::<NaiveDate>().unwrap_or(today);

        Some(Self {
            title: title.to_string(),
            interval_km,
            interval_days,
            last_mileage,
            last_date,
        })
    }
}

fn positive(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|v| *v > 0)
}

pub async fn list_for_car(
    db: &SqlitePool,
    user_id: i64,
    car_id: i64,
) -> Result<Vec<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(
        "SELECT id, user_id, car_id, title, interval_km, interval_days,
                last_mileage, last_date, is_active, created_at
         FROM reminders
         WHERE car_id = ? AND user_id = ?
         ORDER BY is_active DESC, id DESC",
    )
    .bind(car_id)
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn create(
    db: &SqlitePool,
    user_id: i64,
    car_id: i64,
    reminder: &NewReminder,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO reminders
            (user_id, car_id, title, interval_km, interval_days, last_mileage, last_date, is_active)
         VALUES (?, ?, ?, ?, ?, ?, ?, 1)",
    )
    .bind(user_id)
    .bind(car_id)
    .bind(&reminder.title)
    .bind(reminder.interval_km)
    .bind(reminder.interval_days)
    .bind(reminder.last_mileage)
    .bind(reminder.last_date)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn require_owned_reminder(
    db: &SqlitePool,
    user_id: i64,
    reminder_id: i64,
) -> Result<Option<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(
        "SELECT id, user_id, car_id, title, interval_km, interval_days,
                last_mileage, last_date, is_active, created_at
         FROM reminders WHERE id = ? AND user_id = ?",
    )
    .bind(reminder_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// "Done": slide the checkpoint to the moment of service. Both next-due
/// values recompute forward from here, not from the original schedule.
pub async fn mark_done(
    db: &SqlitePool,
    user_id: i64,
    reminder_id: i64,
    current_mileage: i64,
    today: NaiveDate,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar(
        "UPDATE reminders SET last_mileage = ?, last_date = ?
         WHERE id = ? AND user_id = ?
         RETURNING car_id",
    )
    .bind(current_mileage)
    .bind(today)
    .bind(reminder_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn toggle(
    db: &SqlitePool,
    user_id: i64,
    reminder_id: i64,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar(
        "UPDATE reminders SET is_active = NOT is_active
         WHERE id = ? AND user_id = ?
         RETURNING car_id",
    )
    .bind(reminder_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}
