use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Car {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub image: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

/// One entry of the fixed car catalog. Cars are created by picking an image
/// key; the key resolves to a fixed display title and an illustration badge.
#[derive(Debug, Clone, Copy)]
pub struct CarImage {
    pub key: &'static str,
    pub title: &'static str,
    pub badge: &'static str,
}

pub const CAR_CATALOG: &[CarImage] = &[
    CarImage {
        key: "audi_a4",
        title: "Audi A4",
        badge: "🚗",
    },
    CarImage {
        key: "bmw_e90",
        title: "BMW E90 320i",
        badge: "🚗",
    },
    CarImage {
        key: "bmw_x1",
        title: "BMW X1",
        badge: "🚙",
    },
    CarImage {
        key: "lada_vesta",
        title: "Lada Vesta",
        badge: "🚗",
    },
    CarImage {
        key: "toyota_corolla",
        title: "Toyota Corolla",
        badge: "🚗",
    },
    CarImage {
        key: "volvo_xc60",
        title: "Volvo XC60",
        badge: "🚙",
    },
    CarImage {
        key: "vw_golf",
        title: "VW Golf",
        badge: "🚙",
    },
];

pub fn car_image(key: &str) -> Option<&'static CarImage> {
    CAR_CATALOG.iter().find(|image| image.key == key)
}

pub fn badge_for(image: Option<&str>) -> &'static str {
    image
        .and_then(car_image)
        .map(|image| image.badge)
        .unwrap_or("🚗")
}
