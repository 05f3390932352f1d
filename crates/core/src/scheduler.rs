// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Screening admission rules.
//!
//! Every function here is a pure decision over rows the caller read inside
//! its transaction. The caller must hold the storage write lock from the
//! read until the resulting write commits, otherwise two admissions could
//! both pass the overlap check.

use boleteria_domain::{
    Auditorium, RunWindow, Screening, validate_identifier, validate_showtime,
    validate_showtime_in_future,
};
use time::OffsetDateTime;

use crate::error::CoreError;
use crate::state::{ScheduledShowing, ScreeningAdmission, ScreeningCandidate};

/// Requires an auditorium to accept new screenings.
///
/// # Errors
///
/// Returns [`CoreError::AuditoriumDisabled`] if it is disabled.
pub const fn ensure_auditorium_enabled(auditorium: &Auditorium) -> Result<(), CoreError> {
    if !auditorium.enabled {
        return Err(CoreError::AuditoriumDisabled {
            auditorium_id: auditorium.id,
        });
    }
    Ok(())
}

fn check_slot(
    candidate: &ScreeningCandidate,
    auditorium: &Auditorium,
    existing: &[ScheduledShowing],
    excluded_screening_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<(), CoreError> {
    validate_identifier("movie_id", candidate.movie_id)?;
    validate_identifier("auditorium_id", candidate.auditorium_id)?;
    validate_showtime_in_future(candidate.showtime, now)?;
    ensure_auditorium_enabled(auditorium)?;

    validate_showtime(candidate.showtime, now)?;

    let others = existing.iter().filter(|s| {
        s.auditorium_id == auditorium.id && Some(s.screening_id) != excluded_screening_id
    });

    let window: RunWindow = candidate.window();
    let mut overlapping: Option<i64> = None;
    for showing in others {
        if showing.showtime == candidate.showtime {
            return Err(CoreError::DuplicateShowtime {
                auditorium_id: auditorium.id,
                showtime: candidate.showtime,
            });
        }
        if overlapping.is_none() && window.overlaps(&showing.window()) {
            overlapping = Some(showing.screening_id);
        }
    }

    if let Some(conflicting_screening_id) = overlapping {
        return Err(CoreError::Overlap {
            auditorium_id: auditorium.id,
            conflicting_screening_id,
        });
    }

    Ok(())
}

/// Admits a new screening.
///
/// # Arguments
///
/// * `candidate` - The requested screening
/// * `auditorium` - The target auditorium
/// * `existing` - Every screening currently in the auditorium
/// * `now` - The current instant
///
/// # Returns
///
/// The admission, carrying the auditorium's full seat capacity.
///
/// # Errors
///
/// Returns an error if:
/// - The showtime is not in the future or is past the scheduling horizon
/// - The auditorium is disabled
/// - A screening already starts at the same showtime
/// - The run would overlap an existing screening
pub fn admit_screening(
    candidate: &ScreeningCandidate,
    auditorium: &Auditorium,
    existing: &[ScheduledShowing],
    now: OffsetDateTime,
) -> Result<ScreeningAdmission, CoreError> {
    check_slot(candidate, auditorium, existing, None, now)?;

    Ok(ScreeningAdmission {
        available_capacity: auditorium.seat_capacity,
    })
}

/// Admits an update to an existing screening.
///
/// The screening being updated is ignored in the overlap set. Capacity is
/// reset to the auditorium's seat capacity when the auditorium changes, or
/// when it no longer matches an unsold screening; otherwise it is kept.
///
/// # Arguments
///
/// * `current` - The stored screening
/// * `candidate` - The requested values
/// * `auditorium` - The target auditorium
/// * `existing` - Every screening currently in the target auditorium
/// * `tickets_sold` - Tickets already sold for the screening
/// * `now` - The current instant
///
/// # Errors
///
/// Returns an error if any admission rule fails, or
/// [`CoreError::HasTickets`] if the auditorium changes after tickets were
/// sold.
pub fn admit_screening_update(
    current: &Screening,
    candidate: &ScreeningCandidate,
    auditorium: &Auditorium,
    existing: &[ScheduledShowing],
    tickets_sold: u64,
    now: OffsetDateTime,
) -> Result<ScreeningAdmission, CoreError> {
    let auditorium_changed: bool = candidate.auditorium_id != current.auditorium_id;
    if auditorium_changed && tickets_sold > 0 {
        return Err(CoreError::HasTickets { tickets_sold });
    }

    check_slot(candidate, auditorium, existing, Some(current.id), now)?;

    let available_capacity: u32 = if auditorium_changed
        || (tickets_sold == 0 && current.available_capacity != auditorium.seat_capacity)
    {
        auditorium.seat_capacity
    } else {
        current.available_capacity
    };

    Ok(ScreeningAdmission { available_capacity })
}

/// Checks that a screening may be deleted.
///
/// # Errors
///
/// Returns [`CoreError::HasTickets`] if any ticket references the screening.
pub const fn ensure_screening_deletable(tickets_sold: u64) -> Result<(), CoreError> {
    if tickets_sold > 0 {
        return Err(CoreError::HasTickets { tickets_sold });
    }
    Ok(())
}

/// Checks that a movie or auditorium may be deleted.
///
/// # Errors
///
/// Returns [`CoreError::Referenced`] if any screening references it.
pub const fn ensure_unreferenced(screening_count: u64) -> Result<(), CoreError> {
    if screening_count > 0 {
        return Err(CoreError::Referenced {
            dependents: screening_count,
        });
    }
    Ok(())
}

/// Decides whether an auditorium may change its seat capacity.
///
/// # Arguments
///
/// * `auditorium` - The stored auditorium
/// * `new_capacity` - The requested seat capacity
/// * `tickets_sold` - Tickets sold across all of the auditorium's screenings
///
/// # Returns
///
/// `true` if the capacity changes and the auditorium's screenings must have
/// their available capacity reset, `false` if the capacity is unchanged.
///
/// # Errors
///
/// Returns [`CoreError::HasTickets`] if the capacity changes after tickets
/// were sold.
pub const fn plan_seat_capacity_change(
    auditorium: &Auditorium,
    new_capacity: u32,
    tickets_sold: u64,
) -> Result<bool, CoreError> {
    if auditorium.seat_capacity == new_capacity {
        return Ok(false);
    }
    if tickets_sold > 0 {
        return Err(CoreError::HasTickets { tickets_sold });
    }
    Ok(true)
}

/// Checks that changing a movie's runtime keeps every auditorium free of
/// overlaps.
///
/// # Arguments
///
/// * `movie_id` - The movie whose runtime changes
/// * `new_duration_minutes` - The requested runtime
/// * `showings` - Every screening in every auditorium that shows the movie
///
/// # Errors
///
/// Returns [`CoreError::Overlap`] naming the first screening that would be
/// overlapped.
pub fn check_runtime_change(
    movie_id: i64,
    new_duration_minutes: u32,
    showings: &[ScheduledShowing],
) -> Result<(), CoreError> {
    let window_of = |s: &ScheduledShowing| -> RunWindow {
        if s.movie_id == movie_id {
            RunWindow::new(s.showtime, new_duration_minutes)
        } else {
            s.window()
        }
    };

    for changed in showings.iter().filter(|s| s.movie_id == movie_id) {
        let changed_window: RunWindow = window_of(changed);
        let conflict: Option<&ScheduledShowing> = showings.iter().find(|other| {
            other.screening_id != changed.screening_id
                && other.auditorium_id == changed.auditorium_id
                && changed_window.overlaps(&window_of(other))
        });
        if let Some(other) = conflict {
            return Err(CoreError::Overlap {
                auditorium_id: changed.auditorium_id,
                conflicting_screening_id: other.screening_id,
            });
        }
    }

    Ok(())
}
