// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! Every mutation that reads rows to decide what to write runs inside
//! `SqliteConnection::immediate_transaction`, so the database write lock is
//! held from the first read until commit.
//!
//! ## Module Organization
//!
//! - `users`: registration, profile and role changes
//! - `catalog`: movie and auditorium writes
//! - `screenings`: screening admission, update and deletion
//! - `cards`: card lifecycle and recharge
//! - `purchase`: the ticket purchase transaction

pub mod cards;
pub mod catalog;
pub mod purchase;
pub mod screenings;
pub mod users;
