use sqlx::sqlite::SqlitePool;
use sqlx::QueryBuilder;

use crate::filters::{self, JobFilter};
use crate::models::{Category, Job, JobForm, JobWithCar, Totals};
use crate::store::cars;

/// Newest-first cap on the car history page.
const HISTORY_LIMIT: i64 = 500;

#[derive(Debug, PartialEq, Eq)]
pub enum JobOutcome {
    Created { car_id: i64 },
    Invalid(Vec<String>),
}

#[derive(Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    NotFound,
    Invalid(Vec<String>),
    Updated { car_id: i64 },
}

struct ParsedFields {
    car_id: Option<i64>,
    mileage: Option<i64>,
    cost: Option<i64>,
    description: Option<String>,
    category: Option<Category>,
    errors: Vec<String>,
}

/// Field-level validation. Problems accumulate; nothing short-circuits, so
/// the form can show every complaint at once.
fn parse_fields(form: &JobForm) -> ParsedFields {
    let mut errors = Vec::new();

    let car_id = form.car_id.trim().parse::<i64>().ok();
    if car_id.is_none() {
        errors.push("pick a car".to_string());
    }

    let mileage = filters::parse_non_negative(form.mileage.trim());
    if mileage.is_none() {
        errors.push("mileage must be a non-negative number".to_string());
    }

    let cost = filters::parse_non_negative(form.cost.trim());
    if cost.is_none() {
        errors.push("cost must be a non-negative number".to_string());
    }

    let description = Some(form.description.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_owned);
    if description.is_none() {
        errors.push("description must not be empty".to_string());
    }

    let category = Category::parse(form.category.trim());
    if category.is_none() {
        errors.push("unknown category".to_string());
    }

    ParsedFields {
        car_id,
        mileage,
        cost,
        description,
        category,
        errors,
    }
}

pub async fn create_job(
    db: &SqlitePool,
    user_id: i64,
    form: &JobForm,
) -> Result<JobOutcome, sqlx::Error> {
    let mut parsed = parse_fields(form);

    if let Some(car_id) = parsed.car_id {
        match cars::require_owned_car(db, user_id, car_id).await? {
            None => parsed.errors.push("pick one of your cars".to_string()),
            Some(_) => {
                // The odometer only advances: a new entry may not sit below
                // the car's highest recorded mileage.
                if let Some(mileage) = parsed.mileage {
                    let max = cars::current_mileage(db, user_id, car_id).await?;
                    if mileage < max {
                        parsed
                            .errors
                            .push(format!("mileage must be at least {max} for this car"));
                    }
                }
            }
        }
    }

    if !parsed.errors.is_empty() {
        return Ok(JobOutcome::Invalid(parsed.errors));
    }

    let (Some(car_id), Some(mileage), Some(cost), Some(description), Some(category)) = (
        parsed.car_id,
        parsed.mileage,
        parsed.cost,
        parsed.description,
        parsed.category,
    ) else {
        return Ok(JobOutcome::Invalid(vec!["invalid form".to_string()]));
    };

    sqlx::query(
        "INSERT INTO jobs (user_id, car_id, mileage, description, cost, category)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(car_id)
    .bind(mileage)
    .bind(&description)
    .bind(cost)
    .bind(category)
    .execute(db)
    .await?;

    Ok(JobOutcome::Created { car_id })
}

pub async fn require_owned_job(
    db: &SqlitePool,
    user_id: i64,
    job_id: i64,
) -> Result<Option<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>(
        "SELECT id, user_id, car, car_id, mileage, description, cost, category, created_at
         FROM jobs WHERE id = ? AND user_id = ?",
    )
    .bind(job_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Edits are permissive by default; `strict` re-enables the monotonic
/// mileage check against the car's other entries.
pub async fn update_job(
    db: &SqlitePool,
    user_id: i64,
    job_id: i64,
    form: &JobForm,
    strict: bool,
) -> Result<UpdateOutcome, sqlx::Error> {
    if require_owned_job(db, user_id, job_id).await?.is_none() {
        return Ok(UpdateOutcome::NotFound);
    }

    let mut parsed = parse_fields(form);

    if let Some(car_id) = parsed.car_id {
        match cars::require_owned_car(db, user_id, car_id).await? {
            None => parsed.errors.push("pick one of your cars".to_string()),
            Some(_) => {
                if strict {
                    if let Some(mileage) = parsed.mileage {
                        let max = max_mileage_excluding(db, user_id, car_id, job_id).await?;
                        if mileage < max {
                            parsed
                                .errors
                                .push(format!("mileage must be at least {max} for this car"));
                        }
                    }
                }
            }
        }
    }

    if !parsed.errors.is_empty() {
        return Ok(UpdateOutcome::Invalid(parsed.errors));
    }

    let (Some(car_id), Some(mileage), Some(cost), Some(description), Some(category)) = (
        parsed.car_id,
        parsed.mileage,
        parsed.cost,
        parsed.description,
        parsed.category,
    ) else {
        return Ok(UpdateOutcome::Invalid(vec!["invalid form".to_string()]));
    };

    sqlx::query(
        "UPDATE jobs SET car_id = ?, category = ?, mileage = ?, description = ?, cost = ?
         WHERE id = ? AND user_id = ?",
    )
    .bind(car_id)
    .bind(category)
    .bind(mileage)
    .bind(&description)
    .bind(cost)
    .bind(job_id)
    .bind(user_id)
    .execute(db)
    .await?;

    Ok(UpdateOutcome::Updated { car_id })
}

async fn max_mileage_excluding(
    db: &SqlitePool,
    user_id: i64,
    car_id: i64,
    job_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COALESCE(MAX(mileage), 0) FROM jobs
         WHERE car_id = ? AND user_id = ? AND id != ?",
    )
    .bind(car_id)
    .bind(user_id)
    .bind(job_id)
    .fetch_one(db)
    .await
}

/// Returns the deleted job's car id (which may be null for legacy rows), or
/// `None` when the job is absent or foreign.
pub async fn delete_job(
    db: &SqlitePool,
    user_id: i64,
    job_id: i64,
) -> Result<Option<Option<i64>>, sqlx::Error> {
    let car_id: Option<Option<i64>> =
        sqlx::query_scalar("SELECT car_id FROM jobs WHERE id = ? AND user_id = ?")
            .bind(job_id)
            .bind(user_id)
            .fetch_optional(db)
            .await?;

    let Some(car_id) = car_id else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM jobs WHERE id = ? AND user_id = ?")
        .bind(job_id)
        .bind(user_id)
        .execute(db)
        .await?;

    Ok(Some(car_id))
}

pub async fn recent_jobs(
    db: &SqlitePool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<JobWithCar>, sqlx::Error> {
    sqlx::query_as::<_, JobWithCar>(
        "SELECT j.id, COALESCE(c.title, j.car, '—') AS car_title, j.car_id,
                j.mileage, j.description, j.cost, j.category, j.created_at
         FROM jobs j
         LEFT JOIN cars c ON c.id = j.car_id
         WHERE j.user_id = ?
         ORDER BY j.id DESC
         LIMIT ?",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await
}

/// One filter pass drives both queries, so the totals always describe
/// exactly the listed rows.
pub async fn filtered_history(
    db: &SqlitePool,
    user_id: i64,
    car_id: i64,
    filter: &JobFilter,
) -> Result<(Vec<Job>, Totals), sqlx::Error> {
    let mut list = QueryBuilder::new(
        "SELECT id, user_id, car, car_id, mileage, description, cost, category, created_at
         FROM jobs WHERE car_id = ",
    );
    list.push_bind(car_id);
    list.push(" AND user_id = ").push_bind(user_id);
    filters::push_predicates(&mut list, filter);
    list.push(" ORDER BY id DESC LIMIT ").push_bind(HISTORY_LIMIT);
    let jobs = list.build_query_as::<Job>().fetch_all(db).await?;

    let mut aggregate = QueryBuilder::new(
        "SELECT
            COALESCE(SUM(cost), 0) AS total,
            COALESCE(SUM(CASE WHEN category = 'part' THEN cost ELSE 0 END), 0) AS parts,
            COALESCE(SUM(CASE WHEN category = 'work' THEN cost ELSE 0 END), 0) AS work,
            COUNT(*) AS job_count
         FROM jobs WHERE car_id = ",
    );
    aggregate.push_bind(car_id);
    aggregate.push(" AND user_id = ").push_bind(user_id);
    filters::push_predicates(&mut aggregate, filter);
    let totals = aggregate.build_query_as::<Totals>().fetch_one(db).await?;

    Ok((jobs, totals))
}
