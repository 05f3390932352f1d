// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boleteria_domain::{DomainError, MAX_RECHARGE_AMOUNT, Money};

use crate::tests::helpers::create_test_card;
use crate::{
    CoreError, apply_debit, apply_recharge, ensure_can_open_card, ensure_card_number_available,
};

#[test]
fn test_recharge_adds_amount() {
    let balance: Money = apply_recharge(Money::ZERO, Money::from_cents(1_000_000)).unwrap();
    assert_eq!(balance, Money::from_cents(1_000_000));
}

#[test]
fn test_recharge_rejects_zero_amount_as_invalid_argument() {
    let result: Result<Money, CoreError> = apply_recharge(Money::ZERO, Money::ZERO);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidRechargeAmount { .. }
        ))
    ));
}

#[test]
fn test_recharge_rejects_amount_above_single_recharge_limit() {
    let amount: Money = Money::from_cents(MAX_RECHARGE_AMOUNT.cents() + 1);
    assert!(matches!(
        apply_recharge(Money::ZERO, amount),
        Err(CoreError::DomainViolation(_))
    ));
}

#[test]
fn test_recharge_cap_on_total_balance() {
    let balance: Money = Money::from_cents(99_900_000);

    let result: Result<Money, CoreError> = apply_recharge(balance, Money::from_cents(200_000));
    assert!(matches!(result, Err(CoreError::BalanceCapExceeded { .. })));

    let topped_up: Money = apply_recharge(balance, Money::from_cents(100_000)).unwrap();
    assert_eq!(topped_up, Money::from_cents(100_000_000));
}

#[test]
fn test_debit_refuses_negative_balance() {
    let result: Result<Money, CoreError> =
        apply_debit(Money::from_cents(500_000), Money::from_cents(750_000));
    assert_eq!(result.unwrap_err().reason(), "insufficient_funds");
}

#[test]
fn test_only_one_card_per_user() {
    assert!(ensure_can_open_card(None).is_ok());
    assert!(matches!(
        ensure_can_open_card(Some(&create_test_card(0))),
        Err(CoreError::CardAlreadyExists)
    ));
}

#[test]
fn test_card_number_uniqueness_excludes_self() {
    assert!(ensure_card_number_available(None, None).is_ok());
    assert!(ensure_card_number_available(Some(3), Some(3)).is_ok());
    assert!(matches!(
        ensure_card_number_available(Some(3), Some(4)),
        Err(CoreError::DuplicateCardNumber)
    ));
    assert!(ensure_card_number_available(Some(3), None).is_err());
}
