use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Ordered migration steps. `PRAGMA user_version` records how many have been
/// applied, so startup runs only the remainder — a fresh database gets all of
/// them, a legacy one picks up where it left off.
const MIGRATIONS: &[&[&str]] = &[
    // 1: base schema. The free-text jobs.car column predates cars as an
    // entity and survives as a read-only display fallback.
    &[
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        "CREATE TABLE IF NOT EXISTS cars (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            image TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (user_id, title)
        )",
        "CREATE TABLE IF NOT EXISTS jobs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            car TEXT,
            car_id INTEGER REFERENCES cars(id) ON DELETE CASCADE,
            mileage INTEGER NOT NULL,
            description TEXT NOT NULL,
            cost INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        "CREATE TABLE IF NOT EXISTS reminders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            car_id INTEGER NOT NULL REFERENCES cars(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            interval_km INTEGER,
            interval_days INTEGER,
            last_mileage INTEGER NOT NULL DEFAULT 0,
            last_date TEXT NOT NULL DEFAULT CURRENT_DATE,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    ],
    // 2: jobs grew a work/part split.
    &["ALTER TABLE jobs ADD COLUMN category TEXT NOT NULL DEFAULT 'work'"],
    // 3: indexes for the listing paths.
    &[
        "CREATE INDEX IF NOT EXISTS idx_jobs_car_id ON jobs(car_id)",
        "CREATE INDEX IF NOT EXISTS idx_jobs_user_id ON jobs(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_reminders_car_id ON reminders(car_id)",
    ],
];

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;

    for (index, step) in MIGRATIONS.iter().enumerate().skip(version as usize) {
        let mut tx = pool.begin().await?;
        for statement in *step {
            if let Err(e) = sqlx::query(statement).execute(&mut *tx).await {
                // A database evolved by hand before versioning may already
                // carry a later column; that is the one benign failure.
                if is_duplicate_column(&e) {
                    tracing::warn!("migration {}: column already present", index + 1);
                    continue;
                }
                return Err(e);
            }
        }
        sqlx::query(&format!("PRAGMA user_version = {}", index + 1))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!("applied migration {}", index + 1);
    }

    Ok(())
}

fn is_duplicate_column(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.message().contains("duplicate column name"))
}
