use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Part,
}

impl Category {
    /// Strict parse: anything but the two literal values is rejected, which
    /// the filter layer treats as "no filter" and validation as an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "work" => Some(Category::Work),
            "part" => Some(Category::Part),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Part => "part",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Work => "🔧",
            Category::Part => "🧩",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Job {
    pub id: i64,
    pub user_id: i64,
    /// Legacy free-text car name from before cars became an entity.
    /// Display fallback only; nothing writes it.
    pub car: Option<String>,
    pub car_id: Option<i64>,
    pub mileage: i64,
    pub description: String,
    pub cost: i64,
    pub category: Category,
    pub created_at: chrono::NaiveDateTime,
}

/// A job row joined with its car's display title for the dashboard list.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobWithCar {
    pub id: i64,
    pub car_title: String,
    pub car_id: Option<i64>,
    pub mileage: i64,
    pub description: String,
    pub cost: i64,
    pub category: Category,
    pub created_at: chrono::NaiveDateTime,
}

/// Aggregates over a filtered job set. Computed with the same predicate as
/// the job list so the two can never disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct Totals {
    pub total: i64,
    pub parts: i64,
    pub work: i64,
    pub job_count: i64,
}

/// Raw job form fields, kept as strings so a failed submission can be echoed
/// back exactly as typed.
#[derive(Debug, Clone, Deserialize)]
pub struct JobForm {
    #[serde(default)]
    pub car_id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub mileage: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: String,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            car_id: String::new(),
            category: "work".into(),
            mileage: String::new(),
            description: String::new(),
            cost: "0".into(),
        }
    }
}

impl JobForm {
    pub fn from_job(job: &Job) -> Self {
        Self {
            car_id: job.car_id.map(|id| id.to_string()).unwrap_or_default(),
            category: job.category.as_str().into(),
            mileage: job.mileage.to_string(),
            description: job.description.clone(),
            cost: job.cost.to_string(),
        }
    }
}
