// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime};

use crate::error::DomainError;
use crate::money::Money;

/// The role held by a user.
///
/// A user holds exactly one role at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Curates the catalog and manages user roles.
    Admin,
    /// Registers, tops up a card and buys tickets.
    Client,
}

impl Role {
    /// Returns the canonical role name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Client => "CLIENT",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    /// Parses a role name, tolerating a `ROLE_` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("ROLE_").unwrap_or(s) {
            "ADMIN" => Ok(Self::Admin),
            "CLIENT" => Ok(Self::Client),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The projection technology of an auditorium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScreenType {
    /// Standard 2D projection.
    Standard,
    /// Stereoscopic 3D.
    D3,
    /// 4D with motion seats.
    D4,
    /// IMAX.
    Imax,
}

impl ScreenType {
    /// Returns the canonical screen type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::D3 => "D3",
            Self::D4 => "D4",
            Self::Imax => "IMAX",
        }
    }
}

impl std::str::FromStr for ScreenType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STANDARD" => Ok(Self::Standard),
            "D3" => Ok(Self::D3),
            "D4" => Ok(Self::D4),
            "IMAX" => Ok(Self::Imax),
            _ => Err(DomainError::InvalidScreenType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScreenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of payment card backing a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardType {
    /// Credit card.
    Credit,
    /// Debit card.
    Debit,
}

impl CardType {
    /// Returns the canonical card type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "CREDIT",
            Self::Debit => "DEBIT",
        }
    }
}

impl std::str::FromStr for CardType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CREDIT" => Ok(Self::Credit),
            "DEBIT" => Ok(Self::Debit),
            _ => Err(DomainError::InvalidCardType(s.to_string())),
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A calendar month printed on a card, written `MM/YY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardMonth {
    year: i32,
    month: Month,
}

impl CardMonth {
    /// Parses a `MM/YY` string. Two-digit years are taken as 20YY.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not of the form `MM/YY` with a month
    /// between 01 and 12.
    pub fn parse(field: &'static str, value: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidCard {
            field,
            reason: String::from("must be formatted as MM/YY"),
        };

        let (month_part, year_part) = value.split_once('/').ok_or_else(invalid)?;
        if month_part.len() != 2
            || year_part.len() != 2
            || !month_part.bytes().chain(year_part.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let month_number: u8 = month_part.parse().map_err(|_| invalid())?;
        let month: Month = Month::try_from(month_number).map_err(|_| invalid())?;
        let short_year: i32 = year_part.parse().map_err(|_| invalid())?;

        Ok(Self {
            year: 2000 + short_year,
            month,
        })
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub const fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the four-digit year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    fn ordinal(&self) -> i32 {
        self.year * 12 + i32::from(u8::from(self.month))
    }
}

impl PartialOrd for CardMonth {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CardMonth {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl std::fmt::Display for CardMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:02}", u8::from(self.month), self.year.rem_euclid(100))
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// The user's identifier.
    pub id: i64,
    /// The unique login name.
    pub username: String,
    /// The unique email address.
    pub email: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// The user's role.
    pub role: Role,
}

/// A movie in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    /// The movie's identifier.
    pub id: i64,
    /// The unique title.
    pub title: String,
    /// Runtime in whole minutes.
    pub duration_minutes: u32,
    /// Genre label.
    pub genre: String,
    /// Director.
    pub director: String,
    /// Age classification.
    pub rating: String,
    /// Synopsis.
    pub synopsis: String,
}

/// A screening room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Auditorium {
    /// The auditorium's identifier.
    pub id: i64,
    /// The unique name.
    pub name: String,
    /// Projection technology.
    pub screen_type: ScreenType,
    /// Whether the room has Dolby Atmos sound.
    pub atmos: bool,
    /// Number of seats.
    pub seat_capacity: u32,
    /// Whether new screenings may be scheduled in the room.
    pub enabled: bool,
}

/// A scheduled showing of a movie in an auditorium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screening {
    /// The screening's identifier.
    pub id: i64,
    /// The movie being shown.
    pub movie_id: i64,
    /// The auditorium it is shown in.
    pub auditorium_id: i64,
    /// When the showing starts.
    pub showtime: OffsetDateTime,
    /// Seats not yet sold.
    pub available_capacity: u32,
}

/// A prepaid card bound to one user.
///
/// The CVV is write-only and is never part of this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// The card's identifier.
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    /// The 16-digit card number.
    pub card_number: String,
    /// Name printed on the card.
    pub holder_name: String,
    /// Month of issue.
    pub issue_date: CardMonth,
    /// Month of expiration.
    pub expiration_date: CardMonth,
    /// Credit or debit.
    pub card_type: CardType,
    /// Current balance.
    pub balance: Money,
}

/// A purchased ticket. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// The ticket's identifier.
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    /// The screening the ticket admits to.
    pub screening_id: i64,
    /// Price paid.
    pub price: Money,
    /// When the purchase committed.
    pub purchased_at: OffsetDateTime,
}

/// Fields supplied when registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Requested login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
}

/// Editable profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    /// Email address.
    pub email: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
}

/// Fields supplied when creating or updating a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFields {
    /// Title.
    pub title: String,
    /// Runtime in minutes, as supplied.
    pub duration_minutes: i64,
    /// Genre.
    pub genre: String,
    /// Director.
    pub director: String,
    /// Age classification.
    pub rating: String,
    /// Synopsis.
    pub synopsis: String,
}

/// Fields supplied when creating or updating an auditorium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditoriumFields {
    /// Name.
    pub name: String,
    /// Projection technology.
    pub screen_type: ScreenType,
    /// Atmos flag.
    pub atmos: bool,
    /// Seat capacity, as supplied.
    pub seat_capacity: i64,
    /// Enabled flag.
    pub enabled: bool,
}

/// Fields supplied when creating or updating a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFields {
    /// Card number.
    pub card_number: String,
    /// Holder name.
    pub holder_name: String,
    /// Issue month, `MM/YY`.
    pub issue_date: String,
    /// Expiration month, `MM/YY`.
    pub expiration_date: String,
    /// Security code.
    pub cvv: String,
    /// Credit or debit.
    pub card_type: CardType,
}

/// Card fields after validation, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCard {
    /// The 16-digit card number.
    pub card_number: String,
    /// Trimmed holder name.
    pub holder_name: String,
    /// Month of issue.
    pub issue_date: CardMonth,
    /// Month of expiration.
    pub expiration_date: CardMonth,
    /// Security code.
    pub cvv: String,
    /// Credit or debit.
    pub card_type: CardType,
}
