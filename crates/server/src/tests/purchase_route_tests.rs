// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use axum::Router;
use std::time::Duration;

use super::helpers::{
    admin_token, client_token, create_test_app, create_test_app_state_with_lock_timeout,
    fund_card, seed_screening, send,
};
use crate::build_router;

async fn purchase(
    app: &axum::Router,
    token: &str,
    screening_id: i64,
    quantity: i64,
) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/tickets",
        Some(token),
        Some(json!({ "screening_id": screening_id, "quantity": quantity })),
    )
    .await
}

async fn available_capacity(app: &axum::Router, token: &str, screening_id: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::GET,
        &format!("/api/screenings/{screening_id}"),
        Some(token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["available_capacity"].as_i64().unwrap()
}

#[tokio::test]
async fn test_purchase_flow() {
    let app = create_test_app();
    let admin: String = admin_token(&app).await;
    let client: String = client_token(&app, "maria").await;
    let (_, _, screening_id) = seed_screening(&app, &admin, 10).await;
    fund_card(&app, &client, "4111111111111111", 10_000).await;

    let (status, body) = purchase(&app, &client, screening_id, 2).await;

    assert_eq!(status, StatusCode::CREATED, "purchase: {body}");
    assert_eq!(body["tickets"].as_array().unwrap().len(), 2);
    assert_eq!(body["tickets"][0]["movie_title"], "Movie M");
    assert_eq!(available_capacity(&app, &client, screening_id).await, 8);

    let (_, balance) = send(&app, Method::GET, "/api/cards/me/balance", Some(&client), None).await;
    let (_, card) = send(&app, Method::GET, "/api/cards/me", Some(&client), None).await;
    assert_eq!(balance["balance"], card["balance"]);
    assert!(card.get("cvv").is_none());

    let (status, mine) = send(&app, Method::GET, "/api/tickets/me", Some(&client), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["tickets"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_purchase_without_card_is_not_found() {
    let app = create_test_app();
    let admin: String = admin_token(&app).await;
    let client: String = client_token(&app, "maria").await;
    let (_, _, screening_id) = seed_screening(&app, &admin, 10).await;

    let (status, body) = purchase(&app, &client, screening_id, 1).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["reason"], "no_card");
    assert_eq!(available_capacity(&app, &client, screening_id).await, 10);
}

#[tokio::test]
async fn test_insufficient_funds_changes_nothing() {
    let app = create_test_app();
    let admin: String = admin_token(&app).await;
    let client: String = client_token(&app, "maria").await;
    let (_, _, screening_id) = seed_screening(&app, &admin, 10).await;
    fund_card(&app, &client, "4111111111111111", 3_000).await;
    let (_, before) = send(&app, Method::GET, "/api/cards/me/balance", Some(&client), None).await;

    let (status, body) = purchase(&app, &client, screening_id, 2).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["reason"], "insufficient_funds");
    let (_, after) = send(&app, Method::GET, "/api/cards/me/balance", Some(&client), None).await;
    assert_eq!(before, after);
    assert_eq!(available_capacity(&app, &client, screening_id).await, 10);
}

#[tokio::test]
async fn test_admin_cannot_purchase() {
    let app = create_test_app();
    let admin: String = admin_token(&app).await;
    let (_, _, screening_id) = seed_screening(&app, &admin, 10).await;

    let (status, body) = purchase(&app, &admin, screening_id, 1).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "FORBIDDEN");
    assert_eq!(
        body["message"],
        "Forbidden: buying tickets requires the CLIENT role"
    );
}

#[tokio::test]
async fn test_admin_has_no_wallet() {
    let app = create_test_app();
    let admin: String = admin_token(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/cards",
        Some(&admin),
        Some(json!({
            "card_number": "4111111111111111",
            "holder_name": "Admin",
            "issue_date": "01/20",
            "expiration_date": "01/40",
            "cvv": "123",
            "card_type": "DEBIT",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "create: {body}");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/cards/me/recharge",
        Some(&admin),
        Some(json!({ "amount": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, "/api/cards/me/balance", Some(&admin), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_ticket_visibility() {
    let app = create_test_app();
    let admin: String = admin_token(&app).await;
    let owner: String = client_token(&app, "maria").await;
    let other: String = client_token(&app, "juan").await;
    let (_, _, screening_id) = seed_screening(&app, &admin, 10).await;
    fund_card(&app, &owner, "4111111111111111", 5_000).await;
    let (_, body) = purchase(&app, &owner, screening_id, 1).await;
    let ticket_id: i64 = body["tickets"][0]["id"].as_i64().unwrap();
    let owner_id: i64 = body["tickets"][0]["user_id"].as_i64().unwrap();
    let uri: String = format!("/api/tickets/{ticket_id}");

    let (status, _) = send(&app, Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "FORBIDDEN");

    let (status, _) = send(&app, Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/api/tickets/9999", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/users/{owner_id}/tickets"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tickets"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/users/{owner_id}/card"),
        Some(&other),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_concurrent_purchases_never_oversell() {
    let app = create_test_app();
    let admin: String = admin_token(&app).await;
    let first: String = client_token(&app, "maria").await;
    let second: String = client_token(&app, "juan").await;
    let (_, _, screening_id) = seed_screening(&app, &admin, 1).await;
    fund_card(&app, &first, "4111111111111111", 5_000).await;
    fund_card(&app, &second, "4222222222222222", 5_000).await;
    let (_, first_before) =
        send(&app, Method::GET, "/api/cards/me/balance", Some(&first), None).await;
    let (_, second_before) =
        send(&app, Method::GET, "/api/cards/me/balance", Some(&second), None).await;

    let (a, b) = tokio::join!(
        purchase(&app, &first, screening_id, 1),
        purchase(&app, &second, screening_id, 1),
    );

    let mut statuses: Vec<StatusCode> = vec![a.0, b.0];
    statuses.sort_by_key(StatusCode::as_u16);
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
    let loser: &Value = if a.0 == StatusCode::CONFLICT { &a.1 } else { &b.1 };
    assert_eq!(loser["reason"], "capacity");
    assert_eq!(available_capacity(&app, &admin, screening_id).await, 0);

    // Exactly one wallet was charged.
    let (_, first_after) =
        send(&app, Method::GET, "/api/cards/me/balance", Some(&first), None).await;
    let (_, second_after) =
        send(&app, Method::GET, "/api/cards/me/balance", Some(&second), None).await;
    let charged: usize = usize::from(first_before != first_after)
        + usize::from(second_before != second_after);
    assert_eq!(charged, 1);
}

#[tokio::test]
async fn test_busy_persistence_answers_retry_and_recovers() {
    let state = create_test_app_state_with_lock_timeout(Duration::from_millis(50));
    let app: Router = build_router(state.clone());
    let admin: String = admin_token(&app).await;
    let client: String = client_token(&app, "maria").await;
    let (_, _, screening_id) = seed_screening(&app, &admin, 10).await;
    fund_card(&app, &client, "4111111111111111", 10_000).await;

    let guard = state.persistence.lock().await;
    let (status, body) = purchase(&app, &client, screening_id, 1).await;
    assert_eq!(status, StatusCode::CONFLICT, "busy purchase: {body}");
    assert_eq!(body["kind"], "CONFLICT_STATE");
    assert_eq!(body["reason"], "retry");
    drop(guard);

    assert_eq!(available_capacity(&app, &client, screening_id).await, 10);
    let (status, body) = purchase(&app, &client, screening_id, 1).await;
    assert_eq!(status, StatusCode::CREATED, "purchase after release: {body}");
    assert_eq!(available_capacity(&app, &client, screening_id).await, 9);
}
