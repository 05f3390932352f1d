// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Records returned by the persistence layer.
//!
//! Single-table reads return domain types directly. The types here cover
//! credential reads and joined views.

use boleteria_domain::{ScreenType, Screening, Ticket, User};
use time::OffsetDateTime;

/// A user together with the stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// The user.
    pub user: User,
    /// The bcrypt hash of the user's password.
    pub password_hash: String,
}

/// A screening joined with its movie and auditorium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningDetails {
    /// The screening row.
    pub screening: Screening,
    /// Title of the movie.
    pub movie_title: String,
    /// Runtime of the movie in minutes.
    pub duration_minutes: u32,
    /// Name of the auditorium.
    pub auditorium_name: String,
    /// Screen type of the auditorium.
    pub screen_type: ScreenType,
    /// Seat capacity of the auditorium.
    pub seat_capacity: u32,
}

/// A ticket joined with what its holder needs to attend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDetails {
    /// The ticket row.
    pub ticket: Ticket,
    /// Title of the movie.
    pub movie_title: String,
    /// The auditorium of the screening.
    pub auditorium_id: i64,
    /// When the screening starts.
    pub showtime: OffsetDateTime,
}

/// Filters for listing auditoriums. Unset fields do not filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditoriumFilter {
    /// Only auditoriums with this screen type.
    pub screen_type: Option<ScreenType>,
    /// Only auditoriums with this enabled flag.
    pub enabled: Option<bool>,
    /// Only auditoriums with at least this many seats.
    pub min_seat_capacity: Option<u32>,
}
