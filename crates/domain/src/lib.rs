// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod limits;
mod money;
mod schedule;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use limits::{
    MAX_MOVIE_DURATION_MINUTES, MAX_NAME_LENGTH, MAX_RECHARGE_AMOUNT, MAX_SEAT_CAPACITY,
    MAX_SYNOPSIS_LENGTH, MAX_TOTAL_BALANCE, MIN_SEAT_CAPACITY, SCHEDULING_HORIZON_YEARS,
    TICKET_PRICE,
};
pub use money::Money;
pub use schedule::{
    RunWindow, ScreeningPhase, format_instant, normalize_instant, parse_showtime,
    scheduling_horizon, validate_showtime, validate_showtime_in_future,
};
pub use types::{
    Auditorium, AuditoriumFields, Card, CardFields, CardMonth, CardType, Movie, MovieFields,
    ProfileFields, Registration, Role, ScreenType, Screening, Ticket, User, ValidatedCard,
};
pub use validation::{
    validate_auditorium_fields, validate_card_fields, validate_identifier, validate_movie_fields,
    validate_profile, validate_quantity, validate_recharge_amount, validate_registration,
};
