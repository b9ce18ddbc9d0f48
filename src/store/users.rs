use sqlx::sqlite::SqlitePool;

use crate::models::User;

pub async fn by_username(db: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(db)
    .await
}

/// Inserts a new user and returns its id. A duplicate username surfaces as
/// the unique-violation database error; registration maps it to a form
/// error.
pub async fn create(
    db: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("INSERT INTO users (username, password_hash) VALUES (?, ?) RETURNING id")
        .bind(username)
        .bind(password_hash)
        .fetch_one(db)
        .await
}
