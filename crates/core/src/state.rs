// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshots read from storage and the decisions computed from them.

use boleteria_domain::{Money, RunWindow};
use time::OffsetDateTime;

/// An existing screening together with its movie's runtime.
///
/// This is the row shape used for overlap checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledShowing {
    /// The screening.
    pub screening_id: i64,
    /// The movie being shown.
    pub movie_id: i64,
    /// The auditorium it occupies.
    pub auditorium_id: i64,
    /// When it starts.
    pub showtime: OffsetDateTime,
    /// The movie's runtime in minutes.
    pub duration_minutes: u32,
}

impl ScheduledShowing {
    /// Returns the interval this showing occupies.
    #[must_use]
    pub fn window(&self) -> RunWindow {
        RunWindow::new(self.showtime, self.duration_minutes)
    }
}

/// A screening to be admitted, either new or the target of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningCandidate {
    /// The movie to show.
    pub movie_id: i64,
    /// The auditorium to show it in.
    pub auditorium_id: i64,
    /// When it starts.
    pub showtime: OffsetDateTime,
    /// The movie's runtime in minutes.
    pub duration_minutes: u32,
}

impl ScreeningCandidate {
    /// Returns the interval the candidate would occupy.
    #[must_use]
    pub fn window(&self) -> RunWindow {
        RunWindow::new(self.showtime, self.duration_minutes)
    }
}

/// The outcome of admitting a screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreeningAdmission {
    /// The available capacity the stored screening must carry.
    pub available_capacity: u32,
}

/// The effects of a purchase that passed every precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchasePlan {
    /// Number of tickets to issue.
    pub quantity: u32,
    /// Price of each ticket.
    pub unit_price: Money,
    /// Amount debited from the card.
    pub total: Money,
    /// The screening's available capacity after the purchase.
    pub remaining_capacity: u32,
    /// The card balance after the purchase.
    pub new_balance: Money,
}
