// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router-level test helpers.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use boleteria_api::{DEFAULT_TOKEN_TTL, TokenConfig, bootstrap_admin};
use boleteria_persistence::Persistence;
use serde_json::{Value, json};
use std::time::Duration;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tower::ServiceExt;

use crate::{AppState, build_router};

/// Creates app state over a fresh in-memory database with the default admin.
pub fn create_test_app_state() -> AppState {
    create_test_app_state_with_lock_timeout(Duration::from_secs(5))
}

/// Like [`create_test_app_state`] with a custom wait for the persistence lock.
pub fn create_test_app_state_with_lock_timeout(lock_timeout: Duration) -> AppState {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    bootstrap_admin(&mut persistence).expect("Failed to bootstrap admin");
    AppState::new(
        persistence,
        TokenConfig::new("router-test-secret", DEFAULT_TOKEN_TTL),
        lock_timeout,
    )
}

pub fn create_test_app() -> Router {
    build_router(create_test_app_state())
}

/// Sends one request through the router and decodes the JSON body.
///
/// Empty bodies decode to `Value::Null`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

pub async fn admin_token(app: &Router) -> String {
    login(app, "admin", "admin").await
}

/// Registers a client and returns its token.
pub async fn client_token(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "secret",
            "name": "Test",
            "surname": "Client",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    login(app, username, "secret").await
}

/// A showtime a few days after the real current instant.
pub fn upcoming_showtime(days: i64) -> String {
    (OffsetDateTime::now_utc() + time::Duration::days(days))
        .replace_nanosecond(0)
        .unwrap()
        .format(&Rfc3339)
        .unwrap()
}

/// Creates a movie, an auditorium and one upcoming screening.
///
/// Returns `(movie_id, auditorium_id, screening_id)`.
pub async fn seed_screening(app: &Router, admin: &str, seats: i64) -> (i64, i64, i64) {
    let (status, movie) = send(
        app,
        Method::POST,
        "/api/movies",
        Some(admin),
        Some(json!({
            "title": "Movie M",
            "duration_minutes": 100,
            "genre": "Drama",
            "director": "Someone",
            "rating": "PG-13",
            "synopsis": "A film.",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "movie: {movie}");

    let (status, auditorium) = send(
        app,
        Method::POST,
        "/api/auditoriums",
        Some(admin),
        Some(json!({
            "name": "Sala A",
            "screen_type": "IMAX",
            "seat_capacity": seats,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "auditorium: {auditorium}");

    let movie_id: i64 = movie["id"].as_i64().unwrap();
    let auditorium_id: i64 = auditorium["id"].as_i64().unwrap();
    let (status, screening) = send(
        app,
        Method::POST,
        "/api/screenings",
        Some(admin),
        Some(json!({
            "movie_id": movie_id,
            "auditorium_id": auditorium_id,
            "showtime": upcoming_showtime(3),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "screening: {screening}");

    (movie_id, auditorium_id, screening["id"].as_i64().unwrap())
}

/// Creates a card for the caller and loads it with `amount` units.
pub async fn fund_card(app: &Router, token: &str, card_number: &str, amount: i64) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/cards",
        Some(token),
        Some(json!({
            "card_number": card_number,
            "holder_name": "Test Client",
            "issue_date": "01/20",
            "expiration_date": "01/40",
            "cvv": "123",
            "card_type": "DEBIT",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "card: {body}");

    let mut remaining: i64 = amount;
    while remaining > 0 {
        let step: i64 = remaining.min(20_000);
        let (status, body) = send(
            app,
            Method::POST,
            "/api/cards/me/recharge",
            Some(token),
            Some(json!({ "amount": step })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "recharge: {body}");
        remaining -= step;
    }
}
