// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Money travels as decimal strings with two fractional digits. Instants
//! travel as RFC 3339 strings in UTC.

use boleteria_domain::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// API request to register a new client account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// The login name.
    pub username: String,
    /// The email address.
    pub email: String,
    /// The plaintext password.
    pub password: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The login name.
    pub username: String,
    /// The plaintext password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The bearer token.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Token expiration timestamp (RFC 3339).
    pub expires_at: String,
    /// The user's login name.
    pub username: String,
    /// The user's role.
    pub role: String,
}

/// Information about a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// The user's canonical identifier.
    pub id: i64,
    /// The login name.
    pub username: String,
    /// The email address.
    pub email: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// `ADMIN` or `CLIENT`.
    pub role: String,
}

/// API request to update the caller's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// The new email address.
    pub email: String,
    /// The new given name.
    pub name: String,
    /// The new family name.
    pub surname: String,
}

/// API request to change a user's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRoleRequest {
    /// `ADMIN` or `CLIENT`.
    pub role: String,
}

/// API response listing users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    /// The users, by ID.
    pub users: Vec<UserInfo>,
}

/// API request to create or replace a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRequest {
    /// Unique title.
    pub title: String,
    /// Runtime in minutes.
    pub duration_minutes: i64,
    /// Genre.
    pub genre: String,
    /// Director.
    pub director: String,
    /// Age rating.
    pub rating: String,
    /// Synopsis.
    pub synopsis: String,
}

/// Information about a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieInfo {
    /// The movie's canonical identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Runtime in minutes.
    pub duration_minutes: u32,
    /// Genre.
    pub genre: String,
    /// Director.
    pub director: String,
    /// Age rating.
    pub rating: String,
    /// Synopsis.
    pub synopsis: String,
}

/// API response listing movies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMoviesResponse {
    /// The movies, by title.
    pub movies: Vec<MovieInfo>,
}

fn default_enabled() -> bool {
    true
}

/// API request to create or replace an auditorium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditoriumRequest {
    /// Unique name.
    pub name: String,
    /// `STANDARD`, `D3`, `D4` or `IMAX`.
    pub screen_type: String,
    /// Whether the auditorium has Dolby Atmos sound.
    #[serde(default)]
    pub atmos: bool,
    /// Number of seats, 1 to 200.
    pub seat_capacity: i64,
    /// Whether screenings may be scheduled. Defaults to `true`.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// Filters for listing auditoriums.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditoriumQuery {
    /// Only this screen type.
    pub screen_type: Option<String>,
    /// Only this enabled flag.
    pub enabled: Option<bool>,
    /// Only auditoriums with at least this many seats.
    pub min_seat_capacity: Option<i64>,
}

/// Information about an auditorium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditoriumInfo {
    /// The auditorium's canonical identifier.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Screen type.
    pub screen_type: String,
    /// Whether the auditorium has Dolby Atmos sound.
    pub atmos: bool,
    /// Number of seats.
    pub seat_capacity: u32,
    /// Whether screenings may be scheduled.
    pub enabled: bool,
}

/// API response listing auditoriums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAuditoriumsResponse {
    /// The auditoriums, by ID.
    pub auditoriums: Vec<AuditoriumInfo>,
}

/// API request to create or replace a screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningRequest {
    /// The movie to show.
    pub movie_id: i64,
    /// The auditorium to show it in.
    pub auditorium_id: i64,
    /// RFC 3339, or `YYYY-MM-DDTHH:MM[:SS]` taken as UTC.
    pub showtime: String,
}

/// Information about a screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningInfo {
    /// The screening's canonical identifier.
    pub id: i64,
    /// The movie shown.
    pub movie_id: i64,
    /// Title of the movie.
    pub movie_title: String,
    /// Runtime of the movie in minutes.
    pub duration_minutes: u32,
    /// The auditorium.
    pub auditorium_id: i64,
    /// Name of the auditorium.
    pub auditorium_name: String,
    /// Screen type of the auditorium.
    pub screen_type: String,
    /// Start time (RFC 3339).
    pub showtime: String,
    /// Seats left.
    pub available_capacity: u32,
    /// `SCHEDULED`, `IN_PROGRESS` or `PAST`.
    pub phase: String,
}

/// API response listing screenings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListScreeningsResponse {
    /// The screenings, by showtime.
    pub screenings: Vec<ScreeningInfo>,
}

/// API request to open or replace a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRequest {
    /// Sixteen digits.
    pub card_number: String,
    /// Name printed on the card.
    pub holder_name: String,
    /// `MM/YY`.
    pub issue_date: String,
    /// `MM/YY`.
    pub expiration_date: String,
    /// Three or four digits. Never returned.
    pub cvv: String,
    /// `CREDIT` or `DEBIT`.
    pub card_type: String,
}

/// Information about a card. The CVV is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    /// The card's canonical identifier.
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    /// Card number.
    pub card_number: String,
    /// Name printed on the card.
    pub holder_name: String,
    /// `MM/YY`.
    pub issue_date: String,
    /// `MM/YY`.
    pub expiration_date: String,
    /// `CREDIT` or `DEBIT`.
    pub card_type: String,
    /// Current balance.
    pub balance: Money,
}

/// API response carrying a card balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// Current balance.
    pub balance: Money,
}

/// API request to recharge the caller's card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RechargeRequest {
    /// Amount to add, at most two fractional digits.
    pub amount: Decimal,
}

/// API request to buy tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// The screening.
    pub screening_id: i64,
    /// Number of tickets, at least 1.
    pub quantity: i64,
}

/// Information about a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketInfo {
    /// The ticket's canonical identifier.
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    /// The screening.
    pub screening_id: i64,
    /// Purchase date, `YYYY-MM-DD` in UTC.
    pub purchase_date: String,
    /// Purchase time, `HH:MM:SS` in UTC.
    pub purchase_time: String,
    /// Title of the movie.
    pub movie_title: String,
    /// The auditorium.
    pub auditorium_id: i64,
    /// Start time of the screening (RFC 3339).
    pub showtime: String,
    /// Price paid.
    pub price: Money,
}

/// API response listing tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTicketsResponse {
    /// The tickets.
    pub tickets: Vec<TicketInfo>,
}

/// API response for a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseResponse {
    /// The tickets bought, one per seat.
    pub tickets: Vec<TicketInfo>,
    /// Amount charged to the card.
    pub total: Money,
}
