//! End-to-end tests driving the router the way a browser would: register,
//! collect the session cookie, and walk the forms.

use std::str::FromStr;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use garage_log::{db, rest, AppState};

async fn test_app() -> Router {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    db::migrate(&pool).await.unwrap();

    rest::app(AppState {
        db: pool,
        strict_job_edits: false,
    })
    .await
    .unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn session_cookie(response: &axum::response::Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("expected a session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("expected a redirect location")
        .to_str()
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn register(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(post(
            "/register",
            &format!("username={username}&password={password}"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    session_cookie(&response)
}

#[tokio::test]
async fn anonymous_requests_are_redirected_to_login() {
    let app = test_app().await;

    for uri in ["/", "/cars/1", "/jobs/1/edit"] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login");
    }
}

#[tokio::test]
async fn registration_logs_the_user_in() {
    let app = test_app().await;
    let cookie = register(&app, "alice", "secret9").await;

    let response = app.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Garage log"));
}

#[tokio::test]
async fn registration_validates_its_form() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post("/register", "username=alice&password=abc", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("at least 4 characters"));
    // The submitted username comes back.
    assert!(body.contains("value=\"alice\""));

    let response = app
        .clone()
        .oneshot(post("/register", "username=&password=secret9", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("username must not be empty"));
}

#[tokio::test]
async fn duplicate_usernames_are_rejected_generically() {
    let app = test_app().await;
    register(&app, "alice", "secret9").await;

    let response = app
        .clone()
        .oneshot(post("/register", "username=alice&password=other99", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("username already exists"));
}

#[tokio::test]
async fn login_failures_share_one_generic_message() {
    let app = test_app().await;
    register(&app, "alice", "secret9").await;

    for body in [
        "username=alice&password=wrong",
        "username=nobody&password=secret9",
    ] {
        let response = app.clone().oneshot(post("/login", body, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let text = body_string(response).await;
        assert!(text.contains("invalid username or password"));
    }

    let response = app
        .clone()
        .oneshot(post("/login", "username=alice&password=secret9", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&response);
    let response = app.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = test_app().await;
    let cookie = register(&app, "alice", "secret9").await;

    let response = app
        .clone()
        .oneshot(get("/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn car_and_job_flow_with_monotonic_mileage() {
    let app = test_app().await;
    let cookie = register(&app, "alice", "secret9").await;

    let response = app
        .clone()
        .oneshot(post("/add_car", "image=bmw_x1", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app
        .clone()
        .oneshot(get("/cars/1", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("BMW X1"));

    let response = app
        .clone()
        .oneshot(post(
            "/add_job",
            "car_id=1&category=work&mileage=80000&description=timing+belt&cost=300",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cars/1");

    // Odometer going backwards: 400, message names the minimum, values echoed.
    let response = app
        .clone()
        .oneshot(post(
            "/add_job",
            "car_id=1&category=work&mileage=79000&description=wipers&cost=10",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("mileage must be at least 80000"));
    assert!(body.contains("value=\"79000\""));
    assert!(body.contains("value=\"wipers\""));

    // The rejected entry never landed.
    let response = app
        .clone()
        .oneshot(get("/cars/1", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("timing belt"));
    assert!(!body.contains("wipers"));
}

#[tokio::test]
async fn unknown_image_keys_create_nothing() {
    let app = test_app().await;
    let cookie = register(&app, "alice", "secret9").await;

    let response = app
        .clone()
        .oneshot(post("/add_car", "image=delorean", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app
        .clone()
        .oneshot(get("/cars/1", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cars_are_invisible_across_tenants() {
    let app = test_app().await;
    let alice = register(&app, "alice", "secret9").await;
    app.clone()
        .oneshot(post("/add_car", "image=bmw_x1", Some(&alice)))
        .await
        .unwrap();

    let bob = register(&app, "bob", "secret9").await;
    let response = app.clone().oneshot(get("/cars/1", Some(&bob))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Bob can own a car with the same title.
    let response = app
        .clone()
        .oneshot(post("/add_car", "image=bmw_x1", Some(&bob)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = app.clone().oneshot(get("/cars/2", Some(&bob))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reminder_lifecycle_over_http() {
    let app = test_app().await;
    let cookie = register(&app, "alice", "secret9").await;
    app.clone()
        .oneshot(post("/add_car", "image=bmw_x1", Some(&cookie)))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post(
            "/reminders/add",
            "car_id=1&title=Oil+change&interval_km=10000&interval_days=&last_mileage=&last_date=",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cars/1");

    let response = app
        .clone()
        .oneshot(get("/cars/1", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Oil change"));
    assert!(body.contains("🟢"));

    // Without a title or interval nothing is created.
    let response = app
        .clone()
        .oneshot(post(
            "/reminders/add",
            "car_id=1&title=&interval_km=10000",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = app
        .clone()
        .oneshot(post(
            "/reminders/add",
            "car_id=1&title=Ghost&interval_km=0&interval_days=",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = app
        .clone()
        .oneshot(get("/cars/1", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(!body.contains("Ghost"));

    let response = app
        .clone()
        .oneshot(post("/reminders/1/done", "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(post("/reminders/1/toggle", "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = app
        .clone()
        .oneshot(get("/cars/1", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("(paused)"));
}

#[tokio::test]
async fn foreign_jobs_and_reminders_are_not_found() {
    let app = test_app().await;
    let alice = register(&app, "alice", "secret9").await;
    app.clone()
        .oneshot(post("/add_car", "image=bmw_x1", Some(&alice)))
        .await
        .unwrap();
    app.clone()
        .oneshot(post(
            "/add_job",
            "car_id=1&category=work&mileage=1000&description=oil&cost=50",
            Some(&alice),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post(
            "/reminders/add",
            "car_id=1&title=Oil&interval_km=10000",
            Some(&alice),
        ))
        .await
        .unwrap();

    let bob = register(&app, "bob", "secret9").await;
    let response = app
        .clone()
        .oneshot(get("/jobs/1/edit", Some(&bob)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(post("/jobs/1/delete", "", Some(&bob)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(post("/reminders/1/toggle", "", Some(&bob)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn job_edits_are_permissive_by_default() {
    let app = test_app().await;
    let cookie = register(&app, "alice", "secret9").await;
    app.clone()
        .oneshot(post("/add_car", "image=bmw_x1", Some(&cookie)))
        .await
        .unwrap();
    for body in [
        "car_id=1&category=work&mileage=50000&description=service&cost=200",
        "car_id=1&category=work&mileage=60000&description=service&cost=200",
    ] {
        app.clone()
            .oneshot(post("/add_job", body, Some(&cookie)))
            .await
            .unwrap();
    }

    // Lower the newer entry's mileage below the car's maximum.
    let response = app
        .clone()
        .oneshot(post(
            "/jobs/2/edit",
            "car_id=1&category=work&mileage=40000&description=service+corrected&cost=200",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cars/1");

    let response = app
        .clone()
        .oneshot(get("/cars/1", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("service corrected"));
}

#[tokio::test]
async fn filters_narrow_both_the_list_and_the_totals() {
    let app = test_app().await;
    let cookie = register(&app, "alice", "secret9").await;
    app.clone()
        .oneshot(post("/add_car", "image=bmw_x1", Some(&cookie)))
        .await
        .unwrap();
    for body in [
        "car_id=1&category=work&mileage=10000&description=oil+change&cost=50",
        "car_id=1&category=part&mileage=11000&description=oil+filter&cost=15",
        "car_id=1&category=part&mileage=12000&description=brake+pads&cost=120",
    ] {
        app.clone()
            .oneshot(post("/add_job", body, Some(&cookie)))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(get("/cars/1?category=part&q=oil", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("oil filter"));
    assert!(!body.contains("brake pads"));
    assert!(body.contains("<b>Found:</b> 1 entries"));
    assert!(body.contains("<b>Total:</b> 15"));

    // A malformed category is no filter at all.
    let response = app
        .clone()
        .oneshot(get("/cars/1?category=everything&d_from=bogus", Some(&cookie)))
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("<b>Found:</b> 3 entries"));
    assert!(body.contains("<b>Total:</b> 185"));
}
