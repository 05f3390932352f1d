// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boleteria_domain::{DomainError, Money};
use time::OffsetDateTime;

/// Errors produced when a request is well-formed but conflicts with
/// stored state, or when a domain rule is violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// New screenings cannot be scheduled in a disabled auditorium.
    AuditoriumDisabled {
        /// The disabled auditorium.
        auditorium_id: i64,
    },
    /// A screening already starts at this showtime in the auditorium.
    DuplicateShowtime {
        /// The auditorium.
        auditorium_id: i64,
        /// The contested showtime.
        showtime: OffsetDateTime,
    },
    /// The screening's run would intersect another screening's run.
    Overlap {
        /// The auditorium.
        auditorium_id: i64,
        /// The screening already occupying the interval.
        conflicting_screening_id: i64,
    },
    /// The change is not allowed once tickets have been sold.
    HasTickets {
        /// Tickets sold so far.
        tickets_sold: u64,
    },
    /// The screening has already started.
    ScreeningStarted {
        /// The screening.
        screening_id: i64,
    },
    /// Not enough seats remain.
    InsufficientCapacity {
        /// Seats still available.
        remaining: u32,
    },
    /// The caller has no card.
    NoCard,
    /// The card balance does not cover the purchase.
    InsufficientFunds {
        /// Current balance.
        balance: Money,
        /// Amount required.
        required: Money,
    },
    /// The recharge would push the balance past the maximum.
    BalanceCapExceeded {
        /// Current balance.
        balance: Money,
        /// Rejected recharge amount.
        amount: Money,
    },
    /// The caller already has a card.
    CardAlreadyExists,
    /// Another card already uses this number.
    DuplicateCardNumber,
    /// The entity is still referenced by screenings.
    Referenced {
        /// Screenings referencing the entity.
        dependents: u64,
    },
}

impl CoreError {
    /// Returns a short stable tag for the error.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::DomainViolation(DomainError::ShowtimeBeyondHorizon { .. }) => "horizon",
            Self::DomainViolation(_) => "invalid",
            Self::AuditoriumDisabled { .. } => "auditorium_disabled",
            Self::DuplicateShowtime { .. }
            | Self::CardAlreadyExists
            | Self::DuplicateCardNumber => "duplicate",
            Self::Overlap { .. } => "overlap",
            Self::HasTickets { .. } => "has_tickets",
            Self::ScreeningStarted { .. } => "started",
            Self::InsufficientCapacity { .. } => "capacity",
            Self::NoCard => "no_card",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::BalanceCapExceeded { .. } => "balance_cap",
            Self::Referenced { .. } => "in_use",
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::AuditoriumDisabled { auditorium_id } => {
                write!(f, "Auditorium {auditorium_id} is disabled")
            }
            Self::DuplicateShowtime { auditorium_id, .. } => write!(
                f,
                "Auditorium {auditorium_id} already has a screening at that showtime"
            ),
            Self::Overlap { auditorium_id, .. } => write!(
                f,
                "Screening overlaps another screening in auditorium {auditorium_id}"
            ),
            Self::HasTickets { tickets_sold } => {
                write!(f, "Not allowed: {tickets_sold} tickets have been sold")
            }
            Self::ScreeningStarted { .. } => write!(f, "The screening has already started"),
            Self::InsufficientCapacity { remaining } => {
                write!(f, "Not enough seats available, {remaining} remaining")
            }
            Self::NoCard => write!(f, "No card registered"),
            Self::InsufficientFunds { balance, required } => write!(
                f,
                "Insufficient funds: balance {balance}, required {required}"
            ),
            Self::BalanceCapExceeded { .. } => {
                write!(f, "Recharge would exceed the maximum card balance")
            }
            Self::CardAlreadyExists => write!(f, "A card is already registered for this user"),
            Self::DuplicateCardNumber => write!(f, "Card number is already registered"),
            Self::Referenced { dependents } => {
                write!(f, "Still referenced by {dependents} screenings")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
