pub mod auth;
pub mod cars;
pub mod dashboard;
pub mod jobs;
pub mod reminders;
