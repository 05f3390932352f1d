// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Boleteria cinema back-office.
//!
//! This crate resolves callers to a [`Principal`], enforces role and
//! ownership rules, and exposes one handler function per operation. It owns
//! the closed error taxonomy ([`ApiError`]) every operation reports and the
//! request/response DTOs the HTTP layer serializes.
//!
//! Handlers are synchronous and transport-agnostic: they take a mutable
//! [`boleteria_persistence::Persistence`] handle, the request, the caller and
//! the current instant where one is needed.

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

mod auth;
mod error;
mod handlers;
mod request_response;
mod token;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, AuthorizationService, Principal};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    BOOTSTRAP_ADMIN_USERNAME, bootstrap_admin, create_auditorium, create_card, create_movie,
    create_screening, delete_auditorium, delete_card, delete_movie, delete_screening,
    get_auditorium, get_balance, get_movie, get_my_card, get_profile, get_screening, get_ticket,
    get_user_card, list_auditoriums, list_movies, list_my_tickets, list_screenings,
    list_screenings_by_screen_type, list_screenings_for_movie, list_user_tickets, list_users,
    login, purchase_tickets, recharge_card, register_user, set_user_role, update_auditorium,
    update_card, update_movie, update_profile, update_screening,
};
pub use request_response::{
    AuditoriumInfo, AuditoriumQuery, AuditoriumRequest, BalanceResponse, CardInfo, CardRequest,
    ListAuditoriumsResponse, ListMoviesResponse, ListScreeningsResponse, ListTicketsResponse,
    ListUsersResponse, LoginRequest, LoginResponse, MovieInfo, MovieRequest, PurchaseRequest,
    PurchaseResponse, RechargeRequest, RegisterRequest, ScreeningInfo, ScreeningRequest,
    SetRoleRequest, TicketInfo, UpdateProfileRequest, UserInfo,
};
pub use token::{Claims, DEFAULT_TOKEN_TTL, IssuedToken, TokenConfig, issue_token, verify_token};
