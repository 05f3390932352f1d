// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use boleteria_domain::{
    AuditoriumFields, CardMonth, CardType, Money, MovieFields, Registration, Role, ScreenType,
    ValidatedCard,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub const NOW: OffsetDateTime = datetime!(2029-06-01 12:00 UTC);
pub const SHOWTIME: OffsetDateTime = datetime!(2030-01-01 20:00 UTC);

/// Rows created by [`seed`].
pub struct Fixture {
    pub client_id: i64,
    pub movie_id: i64,
    pub auditorium_id: i64,
    pub screening_id: i64,
}

pub fn create_test_registration(username: &str) -> Registration {
    Registration {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: String::from("secret"),
        name: String::from("Test"),
        surname: String::from("User"),
    }
}

pub fn create_test_movie_fields(title: &str, duration_minutes: i64) -> MovieFields {
    MovieFields {
        title: title.to_string(),
        duration_minutes,
        genre: String::from("Drama"),
        director: String::from("Some Director"),
        rating: String::from("PG-13"),
        synopsis: String::from("A movie."),
    }
}

pub fn create_test_auditorium_fields(name: &str, seat_capacity: i64) -> AuditoriumFields {
    AuditoriumFields {
        name: name.to_string(),
        screen_type: ScreenType::Standard,
        atmos: false,
        seat_capacity,
        enabled: true,
    }
}

pub fn create_test_card(card_number: &str) -> ValidatedCard {
    ValidatedCard {
        card_number: card_number.to_string(),
        holder_name: String::from("Test User"),
        issue_date: CardMonth::parse("issue_date", "01/28").unwrap(),
        expiration_date: CardMonth::parse("expiration_date", "01/33").unwrap(),
        cvv: String::from("123"),
        card_type: CardType::Debit,
    }
}

pub fn create_client(persistence: &mut Persistence, username: &str) -> i64 {
    persistence
        .create_user(&create_test_registration(username), Role::Client)
        .unwrap()
}

pub fn create_movie(persistence: &mut Persistence, title: &str, duration_minutes: u32) -> i64 {
    persistence
        .create_movie(
            &create_test_movie_fields(title, i64::from(duration_minutes)),
            duration_minutes,
        )
        .unwrap()
}

pub fn create_auditorium(persistence: &mut Persistence, name: &str, seat_capacity: u32) -> i64 {
    persistence
        .create_auditorium(
            &create_test_auditorium_fields(name, i64::from(seat_capacity)),
            seat_capacity,
        )
        .unwrap()
}

/// Opens a card for the user and recharges it to `balance_cents`.
pub fn fund_card(
    persistence: &mut Persistence,
    user_id: i64,
    card_number: &str,
    balance_cents: i64,
) {
    persistence
        .create_card(user_id, &create_test_card(card_number))
        .unwrap();

    let mut remaining: i64 = balance_cents;
    while remaining > 0 {
        let step: i64 = remaining.min(2_000_000);
        persistence
            .recharge_card(user_id, Money::from_cents(step))
            .unwrap();
        remaining -= step;
    }
}

/// Seeds a client, a 100 minute movie, a 50 seat auditorium and a
/// screening at [`SHOWTIME`].
pub fn seed(persistence: &mut Persistence) -> Fixture {
    let client_id: i64 = create_client(persistence, "client");
    let movie_id: i64 = create_movie(persistence, "Movie M", 100);
    let auditorium_id: i64 = create_auditorium(persistence, "Sala A", 50);
    let screening_id: i64 = persistence
        .create_screening(movie_id, auditorium_id, SHOWTIME, NOW)
        .unwrap()
        .id;

    Fixture {
        client_id,
        movie_id,
        auditorium_id,
        screening_id,
    }
}
