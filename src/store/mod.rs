//! Owner-scoped data access. Every statement carries the authenticated
//! user's id in its predicate; the `require_owned_*` helpers answer with
//! `None` for both "does not exist" and "belongs to someone else" so callers
//! cannot leak which of the two happened.

pub mod cars;
pub mod jobs;
pub mod reminders;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support {
    use std::str::FromStr;

    use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

    use crate::db;

    /// In-memory database, single connection so every query sees the same
    /// memory file.
    pub async fn pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        db::migrate(&pool).await.unwrap();
        pool
    }

    pub async fn user(pool: &SqlitePool, username: &str) -> i64 {
        super::users::create(pool, username, "phc-hash-placeholder")
            .await
            .unwrap()
    }

    pub async fn car(pool: &SqlitePool, user_id: i64, key: &str) -> i64 {
        let image = crate::models::car_image(key).unwrap();
        super::cars::create_car(pool, user_id, image).await.unwrap();
        sqlx::query_scalar("SELECT id FROM cars WHERE user_id = ? AND title = ?")
            .bind(user_id)
            .bind(image.title)
            .fetch_one(pool)
            .await
            .unwrap()
    }
}
