// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed business parameters.

use crate::money::Money;

/// Price of a single ticket (2500.00).
pub const TICKET_PRICE: Money = Money::from_cents(250_000);

/// Largest amount accepted by a single recharge (20 000.00).
pub const MAX_RECHARGE_AMOUNT: Money = Money::from_cents(2_000_000);

/// Largest balance a card may hold (1 000 000.00).
pub const MAX_TOTAL_BALANCE: Money = Money::from_cents(100_000_000);

/// How far ahead of now a screening may be scheduled, in calendar years.
pub const SCHEDULING_HORIZON_YEARS: i32 = 2;

/// Smallest seat capacity of an auditorium.
pub const MIN_SEAT_CAPACITY: u32 = 1;

/// Largest seat capacity of an auditorium.
pub const MAX_SEAT_CAPACITY: u32 = 200;

/// Longest accepted movie runtime, in minutes.
pub const MAX_MOVIE_DURATION_MINUTES: u32 = 600;

/// Longest accepted name or title.
pub const MAX_NAME_LENGTH: usize = 100;

/// Longest accepted synopsis.
pub const MAX_SYNOPSIS_LENGTH: usize = 1000;
