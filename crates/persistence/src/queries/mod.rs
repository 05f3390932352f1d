// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//! Mutations reuse these functions to read rows inside their transactions.
//!
//! ## Module Organization
//!
//! - `users`: User and credential lookups
//! - `movies`: Movie catalog reads
//! - `auditoriums`: Auditorium reads and list filters
//! - `screenings`: Screening rows, joined views, and overlap sets
//! - `cards`: Card lookups by owner and number
//! - `tickets`: Ticket views and counts

pub mod auditoriums;
pub mod cards;
pub mod movies;
pub mod screenings;
pub mod tickets;
pub mod users;
