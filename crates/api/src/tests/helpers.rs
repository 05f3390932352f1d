// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use boleteria_domain::Role;
use boleteria_persistence::Persistence;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    AuditoriumRequest, CardRequest, MovieRequest, Principal, RechargeRequest, RegisterRequest,
    ScreeningRequest, TokenConfig, UserInfo, bootstrap_admin, create_auditorium, create_card,
    create_movie, create_screening, recharge_card, register_user,
};

/// The pinned current instant for every test.
pub const NOW: OffsetDateTime = datetime!(2029-06-01 12:00 UTC);

/// A showtime comfortably inside the scheduling horizon.
pub const SHOWTIME: &str = "2030-01-01T20:00:00Z";

pub fn setup_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn token_config() -> TokenConfig {
    TokenConfig::new("test-signing-secret", time::Duration::hours(1))
}

pub fn create_register_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: String::from("secret"),
        name: String::from("Test"),
        surname: String::from("User"),
    }
}

pub fn register_client(persistence: &mut Persistence, username: &str) -> Principal {
    let info: UserInfo = register_user(persistence, &create_register_request(username))
        .expect("Failed to register client");
    Principal::new(info.id, info.username, Role::Client)
}

pub fn bootstrap_test_admin(persistence: &mut Persistence) -> Principal {
    bootstrap_admin(persistence).expect("Failed to bootstrap admin");
    let credentials = persistence
        .get_credentials_by_username("admin")
        .expect("Failed to look up admin")
        .expect("Admin not found");
    Principal::from(&credentials.user)
}

pub fn create_movie_request(title: &str, duration_minutes: i64) -> MovieRequest {
    MovieRequest {
        title: title.to_string(),
        duration_minutes,
        genre: String::from("Drama"),
        director: String::from("Someone"),
        rating: String::from("PG-13"),
        synopsis: String::from("A film."),
    }
}

pub fn create_auditorium_request(name: &str, seat_capacity: i64) -> AuditoriumRequest {
    AuditoriumRequest {
        name: name.to_string(),
        screen_type: String::from("STANDARD"),
        atmos: false,
        seat_capacity,
        enabled: true,
    }
}

pub fn create_screening_request(
    movie_id: i64,
    auditorium_id: i64,
    showtime: &str,
) -> ScreeningRequest {
    ScreeningRequest {
        movie_id,
        auditorium_id,
        showtime: showtime.to_string(),
    }
}

pub fn create_card_request(card_number: &str) -> CardRequest {
    CardRequest {
        card_number: card_number.to_string(),
        holder_name: String::from("Test User"),
        issue_date: String::from("01/28"),
        expiration_date: String::from("01/33"),
        cvv: String::from("123"),
        card_type: String::from("DEBIT"),
    }
}

/// Identifiers of a seeded catalog: one movie in one auditorium, one screening.
pub struct Catalog {
    pub movie_id: i64,
    pub auditorium_id: i64,
    pub screening_id: i64,
}

/// Seeds a 100 minute movie in a theater of `seats` seats, shown at [`SHOWTIME`].
pub fn seed_catalog(persistence: &mut Persistence, admin: &Principal, seats: i64) -> Catalog {
    let movie = create_movie(persistence, &create_movie_request("Movie M", 100), admin)
        .expect("Failed to create movie");
    let auditorium = create_auditorium(
        persistence,
        &create_auditorium_request("Sala A", seats),
        admin,
    )
    .expect("Failed to create auditorium");
    let screening = create_screening(
        persistence,
        &create_screening_request(movie.id, auditorium.id, SHOWTIME),
        admin,
        NOW,
    )
    .expect("Failed to create screening");

    Catalog {
        movie_id: movie.id,
        auditorium_id: auditorium.id,
        screening_id: screening.id,
    }
}

/// Opens a card for `principal` and recharges it with `amount`, in steps of
/// the recharge limit.
pub fn fund_client(
    persistence: &mut Persistence,
    principal: &Principal,
    number: &str,
    amount: i64,
) {
    create_card(persistence, &create_card_request(number), principal, NOW)
        .expect("Failed to create card");
    let mut remaining: i64 = amount;
    while remaining > 0 {
        let step: i64 = remaining.min(20_000);
        recharge_card(
            persistence,
            &RechargeRequest {
                amount: Decimal::from(step),
            },
            principal,
        )
        .expect("Failed to recharge card");
        remaining -= step;
    }
}
