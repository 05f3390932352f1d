// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boleteria_domain::{Card, Money, Screening, TICKET_PRICE};
use time::macros::datetime;

use crate::tests::helpers::{NOW, create_test_card, create_test_screening};
use crate::{CoreError, PurchasePlan, plan_purchase};

#[test]
fn test_happy_purchase_plan() {
    let screening: Screening = create_test_screening(50);
    let card: Card = create_test_card(1_000_000);

    let plan: PurchasePlan = plan_purchase(&screening, Some(&card), 3, NOW).unwrap();

    assert_eq!(plan.quantity, 3);
    assert_eq!(plan.unit_price, TICKET_PRICE);
    assert_eq!(plan.total, Money::from_cents(750_000));
    assert_eq!(plan.remaining_capacity, 47);
    assert_eq!(plan.new_balance, Money::from_cents(250_000));
}

#[test]
fn test_insufficient_funds() {
    let screening: Screening = create_test_screening(50);
    let card: Card = create_test_card(500_000);

    let result = plan_purchase(&screening, Some(&card), 3, NOW);
    match result.unwrap_err() {
        CoreError::InsufficientFunds { balance, required } => {
            assert_eq!(balance, Money::from_cents(500_000));
            assert_eq!(required, Money::from_cents(750_000));
        }
        other => panic!("Expected InsufficientFunds, got {other:?}"),
    }
}

#[test]
fn test_exact_balance_is_sufficient() {
    let screening: Screening = create_test_screening(50);
    let card: Card = create_test_card(750_000);

    let plan: PurchasePlan = plan_purchase(&screening, Some(&card), 3, NOW).unwrap();
    assert_eq!(plan.new_balance, Money::ZERO);
}

#[test]
fn test_capacity_reports_remaining_seats() {
    let screening: Screening = create_test_screening(2);
    let card: Card = create_test_card(10_000_000);

    let result = plan_purchase(&screening, Some(&card), 3, NOW);
    assert!(matches!(
        result,
        Err(CoreError::InsufficientCapacity { remaining: 2 })
    ));
}

#[test]
fn test_capacity_is_checked_before_card() {
    let screening: Screening = create_test_screening(0);
    let result = plan_purchase(&screening, None, 1, NOW);
    assert!(matches!(
        result,
        Err(CoreError::InsufficientCapacity { remaining: 0 })
    ));
}

#[test]
fn test_missing_card() {
    let screening: Screening = create_test_screening(50);
    let result = plan_purchase(&screening, None, 1, NOW);
    assert_eq!(result.unwrap_err().reason(), "no_card");
}

#[test]
fn test_started_screening_rejects_purchase() {
    let screening: Screening = create_test_screening(50);
    let card: Card = create_test_card(10_000_000);

    let result = plan_purchase(
        &screening,
        Some(&card),
        1,
        datetime!(2030-01-01 20:00 UTC),
    );
    assert!(matches!(
        result,
        Err(CoreError::ScreeningStarted { screening_id: 1 })
    ));
}

#[test]
fn test_repeated_failed_purchase_yields_same_error() {
    let screening: Screening = create_test_screening(50);
    let card: Card = create_test_card(100);

    let first = plan_purchase(&screening, Some(&card), 1, NOW);
    let second = plan_purchase(&screening, Some(&card), 1, NOW);
    assert_eq!(first, second);
}
