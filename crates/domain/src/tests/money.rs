// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;

use crate::{DomainError, MAX_RECHARGE_AMOUNT, MAX_TOTAL_BALANCE, Money, TICKET_PRICE};

#[test]
fn test_constants_have_expected_values() {
    assert_eq!(TICKET_PRICE.to_decimal(), Decimal::new(2500, 0));
    assert_eq!(MAX_RECHARGE_AMOUNT.to_decimal(), Decimal::new(20_000, 0));
    assert_eq!(MAX_TOTAL_BALANCE.to_decimal(), Decimal::new(1_000_000, 0));
}

#[test]
fn test_from_decimal_accepts_two_decimal_places() {
    let money: Money = Money::from_decimal(Decimal::new(123_456, 2)).unwrap();
    assert_eq!(money.cents(), 123_456);
    assert_eq!(money.to_string(), "1234.56");
}

#[test]
fn test_from_decimal_accepts_trailing_zeros_beyond_two_places() {
    let money: Money = Money::from_decimal(Decimal::new(15_000, 4)).unwrap();
    assert_eq!(money.cents(), 150);
}

#[test]
fn test_from_decimal_rejects_three_decimal_places() {
    let result: Result<Money, DomainError> = Money::from_decimal(Decimal::new(1_001, 3));
    assert!(matches!(result, Err(DomainError::InvalidMoney { .. })));
}

#[test]
fn test_from_decimal_rejects_negative() {
    let result: Result<Money, DomainError> = Money::from_decimal(Decimal::new(-1, 0));
    assert!(matches!(result, Err(DomainError::InvalidMoney { .. })));
}

#[test]
fn test_from_decimal_rejects_values_beyond_cent_range() {
    let result: Result<Money, DomainError> = Money::from_decimal(Decimal::MAX);
    assert!(matches!(result, Err(DomainError::InvalidMoney { .. })));
}

#[test]
fn test_checked_sub_refuses_negative_result() {
    let balance: Money = Money::from_cents(500_000);
    assert_eq!(balance.checked_sub(Money::from_cents(750_000)), None);
    assert_eq!(
        balance.checked_sub(TICKET_PRICE),
        Some(Money::from_cents(250_000))
    );
}

#[test]
fn test_checked_mul_computes_ticket_totals() {
    assert_eq!(TICKET_PRICE.checked_mul(3), Some(Money::from_cents(750_000)));
    assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
}

#[test]
fn test_display_keeps_two_decimals() {
    assert_eq!(TICKET_PRICE.to_string(), "2500.00");
    assert_eq!(Money::ZERO.to_string(), "0.00");
}

#[test]
fn test_money_serializes_as_decimal_string() {
    let json: String = serde_json::to_string(&TICKET_PRICE).unwrap();
    assert_eq!(json, "\"2500.00\"");
}

#[test]
fn test_money_deserializes_from_string_and_number() {
    let from_string: Money = serde_json::from_str("\"12.50\"").unwrap();
    let from_number: Money = serde_json::from_str("40").unwrap();
    assert_eq!(from_string.cents(), 1250);
    assert_eq!(from_number.cents(), 4000);
}

#[test]
fn test_money_deserialize_rejects_three_decimal_places() {
    let result: Result<Money, _> = serde_json::from_str("\"1.005\"");
    assert!(result.is_err());
}
