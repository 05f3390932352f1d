// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Showtime handling and the derived screening phase.
//!
//! A screening occupies its auditorium over the half-open interval
//! `[showtime, showtime + duration)`. Its phase is never stored; it is
//! derived from the current instant every time it is needed.

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::DomainError;
use crate::limits::SCHEDULING_HORIZON_YEARS;

const LOCAL_WITH_SECONDS: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const LOCAL_WITHOUT_SECONDS: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// The lifecycle phase of a screening relative to a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreeningPhase {
    /// The showing has not started.
    Scheduled,
    /// The showing has started and not yet ended.
    InProgress,
    /// The showing has ended.
    Past,
}

impl ScreeningPhase {
    /// Returns the canonical phase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::InProgress => "IN_PROGRESS",
            Self::Past => "PAST",
        }
    }

    /// Derives the phase of a showing at `now`.
    ///
    /// # Arguments
    ///
    /// * `showtime` - When the showing starts
    /// * `duration_minutes` - The movie's runtime
    /// * `now` - The instant to evaluate at
    #[must_use]
    pub fn at(showtime: OffsetDateTime, duration_minutes: u32, now: OffsetDateTime) -> Self {
        let window: RunWindow = RunWindow::new(showtime, duration_minutes);
        if now < window.start() {
            Self::Scheduled
        } else if now < window.end() {
            Self::InProgress
        } else {
            Self::Past
        }
    }
}

impl std::fmt::Display for ScreeningPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The half-open interval during which a showing occupies its auditorium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunWindow {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl RunWindow {
    /// Creates the window `[showtime, showtime + duration_minutes)`.
    ///
    /// The end saturates at the largest representable instant.
    #[must_use]
    pub fn new(showtime: OffsetDateTime, duration_minutes: u32) -> Self {
        let end: OffsetDateTime = showtime
            .checked_add(Duration::minutes(i64::from(duration_minutes)))
            .unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc());
        Self {
            start: showtime,
            end,
        }
    }

    /// Returns the start of the window.
    #[must_use]
    pub const fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// Returns the (exclusive) end of the window.
    #[must_use]
    pub const fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// Returns `true` if the two windows share any instant.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Returns the latest instant at which a screening may be scheduled.
///
/// The horizon is `now` moved forward by [`SCHEDULING_HORIZON_YEARS`]
/// calendar years. February 29 maps to February 28 in non-leap years.
///
/// # Errors
///
/// Returns an error if the resulting year is not representable.
pub fn scheduling_horizon(now: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: String::from("scheduling horizon"),
    };
    let target_year: i32 = now
        .year()
        .checked_add(SCHEDULING_HORIZON_YEARS)
        .ok_or_else(overflow)?;

    now.replace_year(target_year)
        .or_else(|_| now.replace_day(28).and_then(|t| t.replace_year(target_year)))
        .map_err(|_| overflow())
}

/// Validates that a showtime is strictly after `now`.
///
/// # Errors
///
/// Returns [`DomainError::ShowtimeNotInFuture`] otherwise.
pub fn validate_showtime_in_future(
    showtime: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    if showtime <= now {
        return Err(DomainError::ShowtimeNotInFuture { showtime });
    }
    Ok(())
}

/// Validates that a showtime is strictly in the future and within the
/// scheduling horizon.
///
/// # Errors
///
/// Returns an error if the showtime is not after `now` or lies past the
/// horizon.
pub fn validate_showtime(showtime: OffsetDateTime, now: OffsetDateTime) -> Result<(), DomainError> {
    validate_showtime_in_future(showtime, now)?;

    let horizon: OffsetDateTime = scheduling_horizon(now)?;
    if showtime > horizon {
        return Err(DomainError::ShowtimeBeyondHorizon { showtime, horizon });
    }

    Ok(())
}

/// Parses a showtime.
///
/// Accepts RFC 3339 (`2030-01-01T20:00:00-03:00`) or a local
/// `YYYY-MM-DDTHH:MM[:SS]` which is taken as UTC. The result is
/// normalized to UTC and truncated to whole seconds.
///
/// # Errors
///
/// Returns an error if the value matches none of the accepted forms.
pub fn parse_showtime(value: &str) -> Result<OffsetDateTime, DomainError> {
    let trimmed: &str = value.trim();
    let parsed: OffsetDateTime = OffsetDateTime::parse(trimmed, &Rfc3339)
        .or_else(|_| PrimitiveDateTime::parse(trimmed, LOCAL_WITH_SECONDS).map(|t| t.assume_utc()))
        .or_else(|_| {
            PrimitiveDateTime::parse(trimmed, LOCAL_WITHOUT_SECONDS).map(|t| t.assume_utc())
        })
        .map_err(|_| DomainError::InvalidShowtime(value.to_string()))?;

    Ok(normalize_instant(parsed))
}

/// Converts an instant to UTC and drops sub-second precision.
#[must_use]
pub fn normalize_instant(instant: OffsetDateTime) -> OffsetDateTime {
    let utc: OffsetDateTime = instant.to_offset(UtcOffset::UTC);
    utc.replace_nanosecond(0).unwrap_or(utc)
}

/// Formats an instant as UTC RFC 3339 with whole seconds.
///
/// Formatted values of normalized instants sort chronologically as text.
///
/// # Errors
///
/// Returns an error if the instant's year cannot be written in RFC 3339.
pub fn format_instant(instant: OffsetDateTime) -> Result<String, DomainError> {
    normalize_instant(instant)
        .format(&Rfc3339)
        .map_err(|e| DomainError::DateArithmeticOverflow {
            operation: format!("format instant: {e}"),
        })
}
