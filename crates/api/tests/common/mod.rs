#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use troupe_api::auth::jwt::{generate_access_token, JwtConfig};
use troupe_api::auth::password::hash_password;
use troupe_api::config::ServerConfig;
use troupe_api::router::build_app_router;
use troupe_api::state::AppState;
use troupe_core::capabilities::CapabilitySet;
use troupe_db::models::actor::{Actor, CreateActor};
use troupe_db::models::user::{CreateUser, User};
use troupe_db::repositories::{ActorRepo, UserRepo};

/// Password used for every seeded account.
pub const TEST_PASSWORD: &str = "stage-door-42";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        password_min_length: 8,
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        admin_seed: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub fn token_for(user_id: i64) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token signing should succeed")
}

/// Create a user without an actor profile and return it with a Bearer token.
pub async fn seed_superadmin(pool: &PgPool, username: &str) -> (User, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: true,
        },
    )
    .await
    .expect("user creation should succeed");
    let token = token_for(user.id);
    (user, token)
}

/// Create an actor with exactly `caps` and return it with a Bearer token.
pub async fn seed_actor(
    pool: &PgPool,
    username: &str,
    caps: CapabilitySet,
    is_staff: bool,
) -> (Actor, String) {
    let name = capitalize(username);
    let actor = ActorRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            first_name: name.clone(),
            last_name: "Test".to_string(),
            is_staff,
        },
        &CreateActor {
            name,
            family: "Test".to_string(),
            age: 30,
            role: "Dancer".to_string(),
            capabilities: caps,
        },
    )
    .await
    .expect("actor creation should succeed");
    let token = token_for(actor.user_id);
    (actor, token)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A complete, valid party body.
pub fn party_body(place: &str, date: &str, actor_ids: &[i64]) -> serde_json::Value {
    serde_json::json!({
        "day": "Friday",
        "date": date,
        "time": "19:30:00",
        "duration": "03:00:00",
        "place": place,
        "event": "Wedding",
        "number_of_actors": actor_ids.len(),
        "meeting_time": "17:00:00",
        "meeting_date": date,
        "meeting_place": "Studio",
        "transport_vehicle": "Van",
        "camera_man": "Reza",
        "dress_details": "Black suits",
        "actor_ids": actor_ids,
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("router should respond")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Assert the status and return the parsed body.
pub async fn expect_json(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
