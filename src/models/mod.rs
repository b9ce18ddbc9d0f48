pub mod car;
pub mod job;
pub mod reminder;
pub mod user;

pub use car::{badge_for, car_image, Car, CarImage, CAR_CATALOG};
pub use job::{Category, Job, JobForm, JobWithCar, Totals};
pub use reminder::Reminder;
pub use user::User;
