// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod purchase;
mod scheduler;
mod state;
mod wallet;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use purchase::plan_purchase;
pub use scheduler::{
    admit_screening, admit_screening_update, check_runtime_change, ensure_auditorium_enabled,
    ensure_screening_deletable, ensure_unreferenced, plan_seat_capacity_change,
};
pub use state::{PurchasePlan, ScheduledShowing, ScreeningAdmission, ScreeningCandidate};
pub use wallet::{apply_debit, apply_recharge, ensure_can_open_card, ensure_card_number_available};
