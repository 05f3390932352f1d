// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boleteria_domain::{
    Auditorium, Card, CardMonth, CardType, Money, ScreenType, Screening,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{ScheduledShowing, ScreeningCandidate};

pub const NOW: OffsetDateTime = datetime!(2029-06-01 12:00 UTC);

pub fn create_test_auditorium(id: i64, seat_capacity: u32) -> Auditorium {
    Auditorium {
        id,
        name: format!("Sala {id}"),
        screen_type: ScreenType::Standard,
        atmos: false,
        seat_capacity,
        enabled: true,
    }
}

pub fn create_test_showing(
    screening_id: i64,
    auditorium_id: i64,
    showtime: OffsetDateTime,
    duration_minutes: u32,
) -> ScheduledShowing {
    ScheduledShowing {
        screening_id,
        movie_id: 100 + screening_id,
        auditorium_id,
        showtime,
        duration_minutes,
    }
}

pub fn create_test_candidate(
    auditorium_id: i64,
    showtime: OffsetDateTime,
    duration_minutes: u32,
) -> ScreeningCandidate {
    ScreeningCandidate {
        movie_id: 7,
        auditorium_id,
        showtime,
        duration_minutes,
    }
}

pub fn create_test_screening(available_capacity: u32) -> Screening {
    Screening {
        id: 1,
        movie_id: 7,
        auditorium_id: 1,
        showtime: datetime!(2030-01-01 20:00 UTC),
        available_capacity,
    }
}

pub fn create_test_card(balance_cents: i64) -> Card {
    Card {
        id: 1,
        user_id: 42,
        card_number: String::from("4111111111111111"),
        holder_name: String::from("Jane Client"),
        issue_date: CardMonth::parse("issue_date", "01/25").unwrap(),
        expiration_date: CardMonth::parse("expiration_date", "01/31").unwrap(),
        card_type: CardType::Debit,
        balance: Money::from_cents(balance_cents),
    }
}
