// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversions between stored column values and domain values.

use std::str::FromStr;

use boleteria_domain::format_instant;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

pub fn parse_instant(column: &str, value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::CorruptRecord(format!("{column}: {e}")))
}

pub fn instant_text(instant: OffsetDateTime) -> Result<String, PersistenceError> {
    format_instant(instant).map_err(|e| PersistenceError::QueryFailed(e.to_string()))
}

pub fn parse_enum<T: FromStr>(column: &str, value: &str) -> Result<T, PersistenceError> {
    T::from_str(value)
        .map_err(|_| PersistenceError::CorruptRecord(format!("{column}: unexpected value {value}")))
}

pub fn count_u32(column: &str, value: i32) -> Result<u32, PersistenceError> {
    u32::try_from(value)
        .map_err(|_| PersistenceError::CorruptRecord(format!("{column}: negative value {value}")))
}

pub fn column_i32(column: &str, value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|_| PersistenceError::QueryFailed(format!("{column}: value {value} out of range")))
}

pub fn count_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

pub fn flag(value: bool) -> i32 {
    i32::from(value)
}
