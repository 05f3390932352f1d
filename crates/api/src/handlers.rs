// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions, one per operation.
//!
//! Handlers validate request payloads, enforce role and ownership rules
//! against the resolved [`Principal`], call into persistence, and shape
//! results into response DTOs. Every failure leaves as an [`ApiError`].
//!
//! Operations that only require an authenticated caller take no principal;
//! the transport rejects unauthenticated requests before they get here.

use std::str::FromStr;

use boleteria_domain::{
    Auditorium, AuditoriumFields, Card, CardFields, CardType, DomainError, Money, Movie,
    MovieFields, ProfileFields, Registration, Role, ScreenType, ScreeningPhase, User,
    ValidatedCard, format_instant, parse_showtime, validate_auditorium_fields,
    validate_card_fields, validate_identifier, validate_movie_fields, validate_profile,
    validate_quantity, validate_recharge_amount, validate_registration,
    validate_showtime_in_future,
};
use boleteria_persistence::{
    AuditoriumFilter, Persistence, ScreeningDetails, ScreeningListing, TicketDetails,
};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::info;

use crate::auth::{AuthenticationService, AuthorizationService, Principal};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AuditoriumInfo, AuditoriumQuery, AuditoriumRequest, BalanceResponse, CardInfo, CardRequest,
    ListAuditoriumsResponse, ListMoviesResponse, ListScreeningsResponse, ListTicketsResponse,
    ListUsersResponse, LoginRequest, LoginResponse, MovieInfo, MovieRequest, PurchaseRequest,
    PurchaseResponse, RechargeRequest, RegisterRequest, ScreeningInfo, ScreeningRequest,
    SetRoleRequest, TicketInfo, UpdateProfileRequest, UserInfo,
};
use crate::token::TokenConfig;

/// Username of the administrator ensured at startup.
pub const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

const BOOTSTRAP_ADMIN_PASSWORD: &str = "admin";

const PURCHASE_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");
const PURCHASE_TIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[hour]:[minute]:[second]");

fn check_id(field: &'static str, value: i64) -> Result<(), ApiError> {
    validate_identifier(field, value).map_err(translate_domain_error)
}

fn parse_field<T>(value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    value.parse().map_err(translate_domain_error)
}

fn format_time(instant: OffsetDateTime) -> Result<String, ApiError> {
    format_instant(instant).map_err(translate_domain_error)
}

fn user_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        email: user.email,
        name: user.name,
        surname: user.surname,
        role: user.role.to_string(),
    }
}

fn movie_info(movie: Movie) -> MovieInfo {
    MovieInfo {
        id: movie.id,
        title: movie.title,
        duration_minutes: movie.duration_minutes,
        genre: movie.genre,
        director: movie.director,
        rating: movie.rating,
        synopsis: movie.synopsis,
    }
}

fn auditorium_info(auditorium: Auditorium) -> AuditoriumInfo {
    AuditoriumInfo {
        id: auditorium.id,
        name: auditorium.name,
        screen_type: auditorium.screen_type.to_string(),
        atmos: auditorium.atmos,
        seat_capacity: auditorium.seat_capacity,
        enabled: auditorium.enabled,
    }
}

fn screening_info(
    details: ScreeningDetails,
    now: OffsetDateTime,
) -> Result<ScreeningInfo, ApiError> {
    let phase: ScreeningPhase =
        ScreeningPhase::at(details.screening.showtime, details.duration_minutes, now);
    Ok(ScreeningInfo {
        id: details.screening.id,
        movie_id: details.screening.movie_id,
        movie_title: details.movie_title,
        duration_minutes: details.duration_minutes,
        auditorium_id: details.screening.auditorium_id,
        auditorium_name: details.auditorium_name,
        screen_type: details.screen_type.to_string(),
        showtime: format_time(details.screening.showtime)?,
        available_capacity: details.screening.available_capacity,
        phase: phase.to_string(),
    })
}

fn card_info(card: Card) -> CardInfo {
    CardInfo {
        id: card.id,
        user_id: card.user_id,
        card_number: card.card_number,
        holder_name: card.holder_name,
        issue_date: card.issue_date.to_string(),
        expiration_date: card.expiration_date.to_string(),
        card_type: card.card_type.to_string(),
        balance: card.balance,
    }
}

fn ticket_info(details: TicketDetails) -> Result<TicketInfo, ApiError> {
    let purchased_at: OffsetDateTime = details.ticket.purchased_at;
    let format_err = |_| ApiError::Internal {
        message: String::from("failed to format purchase instant"),
    };
    Ok(TicketInfo {
        id: details.ticket.id,
        user_id: details.ticket.user_id,
        screening_id: details.ticket.screening_id,
        purchase_date: purchased_at
            .format(PURCHASE_DATE_FORMAT)
            .map_err(format_err)?,
        purchase_time: purchased_at
            .format(PURCHASE_TIME_FORMAT)
            .map_err(format_err)?,
        movie_title: details.movie_title,
        auditorium_id: details.auditorium_id,
        showtime: format_time(details.showtime)?,
        price: details.ticket.price,
    })
}

fn ticket_list(tickets: Vec<TicketDetails>) -> Result<Vec<TicketInfo>, ApiError> {
    tickets.into_iter().map(ticket_info).collect()
}

fn screening_list(
    screenings: Vec<ScreeningDetails>,
    now: OffsetDateTime,
) -> Result<ListScreeningsResponse, ApiError> {
    let screenings: Vec<ScreeningInfo> = screenings
        .into_iter()
        .map(|details| screening_info(details, now))
        .collect::<Result<_, _>>()?;
    Ok(ListScreeningsResponse { screenings })
}

fn load_user(persistence: &mut Persistence, user_id: i64) -> Result<User, ApiError> {
    persistence
        .get_user(user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("user"))
}

fn load_movie(persistence: &mut Persistence, movie_id: i64) -> Result<Movie, ApiError> {
    persistence
        .get_movie(movie_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("movie"))
}

fn load_auditorium(
    persistence: &mut Persistence,
    auditorium_id: i64,
) -> Result<Auditorium, ApiError> {
    persistence
        .get_auditorium(auditorium_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("auditorium"))
}

fn load_screening(
    persistence: &mut Persistence,
    screening_id: i64,
) -> Result<ScreeningDetails, ApiError> {
    persistence
        .get_screening_details(screening_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("screening"))
}

fn load_card(persistence: &mut Persistence, user_id: i64) -> Result<Card, ApiError> {
    persistence
        .get_card_for_user(user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("card"))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Registers a new client account.
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation
/// - The username or email is already in use
pub fn register_user(
    persistence: &mut Persistence,
    request: &RegisterRequest,
) -> Result<UserInfo, ApiError> {
    let registration: Registration = Registration {
        username: request.username.trim().to_string(),
        email: request.email.clone(),
        password: request.password.clone(),
        name: request.name.clone(),
        surname: request.surname.clone(),
    };
    validate_registration(&registration).map_err(translate_domain_error)?;

    let user_id: i64 = persistence
        .create_user(&registration, Role::Client)
        .map_err(translate_persistence_error)?;
    info!(user_id, username = %registration.username, "Registered client");

    load_user(persistence, user_id).map(user_info)
}

/// Authenticates with username and password and issues a bearer token.
///
/// # Errors
///
/// Returns `AuthRequired` if the credentials do not match a user.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
    config: &TokenConfig,
    now: OffsetDateTime,
) -> Result<LoginResponse, ApiError> {
    let (issued, principal) = AuthenticationService::login(
        persistence,
        request.username.trim(),
        &request.password,
        config,
        now,
    )?;

    Ok(LoginResponse {
        token: issued.token,
        token_type: String::from("Bearer"),
        expires_at: format_time(issued.expires_at)?,
        username: principal.username,
        role: principal.role.to_string(),
    })
}

/// Returns the caller's own profile.
///
/// # Errors
///
/// Returns an error if the caller's user record no longer exists.
pub fn get_profile(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<UserInfo, ApiError> {
    load_user(persistence, principal.user_id).map(user_info)
}

/// Updates the caller's email, name and surname.
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation
/// - The email is already in use by another user
pub fn update_profile(
    persistence: &mut Persistence,
    request: &UpdateProfileRequest,
    principal: &Principal,
) -> Result<UserInfo, ApiError> {
    let profile: ProfileFields = ProfileFields {
        email: request.email.clone(),
        name: request.name.clone(),
        surname: request.surname.clone(),
    };
    validate_profile(&profile).map_err(translate_domain_error)?;

    persistence
        .update_profile(principal.user_id, &profile)
        .map_err(translate_persistence_error)?;
    info!(user_id = principal.user_id, "Updated profile");

    load_user(persistence, principal.user_id).map(user_info)
}

/// Lists every user.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller is an administrator.
pub fn list_users(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<ListUsersResponse, ApiError> {
    AuthorizationService::is_admin(principal, "listing users")?;

    let users: Vec<UserInfo> = persistence
        .list_users()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(user_info)
        .collect();
    Ok(ListUsersResponse { users })
}

/// Changes a user's role.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - The role name is unknown
/// - The user does not exist
pub fn set_user_role(
    persistence: &mut Persistence,
    user_id: i64,
    request: &SetRoleRequest,
    principal: &Principal,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::is_admin(principal, "changing a user's role")?;
    check_id("user_id", user_id)?;
    let role: Role = parse_field(request.role.trim())?;

    persistence
        .set_role(user_id, role)
        .map_err(translate_persistence_error)?;
    info!(user_id, %role, changed_by = principal.user_id, "Changed user role");

    load_user(persistence, user_id).map(user_info)
}

/// Ensures the bootstrap administrator exists.
///
/// Creates `admin` with password `admin` and the ADMIN role when no user
/// named `admin` exists. An existing `admin` account is left untouched.
///
/// Returns whether the account was created.
///
/// # Errors
///
/// Returns an error if the lookup or insert fails.
pub fn bootstrap_admin(persistence: &mut Persistence) -> Result<bool, ApiError> {
    let existing = persistence
        .get_credentials_by_username(BOOTSTRAP_ADMIN_USERNAME)
        .map_err(translate_persistence_error)?;
    if existing.is_some() {
        return Ok(false);
    }

    let registration: Registration = Registration {
        username: String::from(BOOTSTRAP_ADMIN_USERNAME),
        email: String::from("admin@boleteria.local"),
        password: String::from(BOOTSTRAP_ADMIN_PASSWORD),
        name: String::from("Admin"),
        surname: String::from("Boleteria"),
    };
    let user_id: i64 = persistence
        .create_user(&registration, Role::Admin)
        .map_err(translate_persistence_error)?;
    info!(user_id, "Created bootstrap administrator");
    Ok(true)
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

fn movie_fields(request: &MovieRequest) -> MovieFields {
    MovieFields {
        title: request.title.clone(),
        duration_minutes: request.duration_minutes,
        genre: request.genre.clone(),
        director: request.director.clone(),
        rating: request.rating.clone(),
        synopsis: request.synopsis.clone(),
    }
}

/// Adds a movie to the catalog.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - A field fails validation
/// - The title is already in use
pub fn create_movie(
    persistence: &mut Persistence,
    request: &MovieRequest,
    principal: &Principal,
) -> Result<MovieInfo, ApiError> {
    AuthorizationService::is_admin(principal, "creating a movie")?;
    let fields: MovieFields = movie_fields(request);
    let duration: u32 = validate_movie_fields(&fields).map_err(translate_domain_error)?;

    let movie_id: i64 = persistence
        .create_movie(&fields, duration)
        .map_err(translate_persistence_error)?;
    info!(movie_id, duration, "Created movie");

    load_movie(persistence, movie_id).map(movie_info)
}

/// Retrieves a movie.
///
/// # Errors
///
/// Returns `NotFound` if the movie does not exist.
pub fn get_movie(persistence: &mut Persistence, movie_id: i64) -> Result<MovieInfo, ApiError> {
    check_id("movie_id", movie_id)?;
    load_movie(persistence, movie_id).map(movie_info)
}

/// Lists movies by title.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_movies(persistence: &mut Persistence) -> Result<ListMoviesResponse, ApiError> {
    let movies: Vec<MovieInfo> = persistence
        .list_movies()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(movie_info)
        .collect();
    Ok(ListMoviesResponse { movies })
}

/// Replaces a movie's fields.
///
/// A runtime change is re-checked against every screening in the
/// auditoriums the movie plays in.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - A field fails validation
/// - The movie does not exist
/// - The title is in use by another movie
/// - The new runtime makes two screenings overlap
pub fn update_movie(
    persistence: &mut Persistence,
    movie_id: i64,
    request: &MovieRequest,
    principal: &Principal,
) -> Result<MovieInfo, ApiError> {
    AuthorizationService::is_admin(principal, "editing a movie")?;
    check_id("movie_id", movie_id)?;
    let fields: MovieFields = movie_fields(request);
    let duration: u32 = validate_movie_fields(&fields).map_err(translate_domain_error)?;

    persistence
        .update_movie(movie_id, &fields, duration)
        .map_err(translate_persistence_error)?;
    info!(movie_id, duration, "Updated movie");

    load_movie(persistence, movie_id).map(movie_info)
}

/// Removes a movie that no screening references.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - The movie does not exist
/// - Screenings still reference the movie
pub fn delete_movie(
    persistence: &mut Persistence,
    movie_id: i64,
    principal: &Principal,
) -> Result<(), ApiError> {
    AuthorizationService::is_admin(principal, "deleting a movie")?;
    check_id("movie_id", movie_id)?;

    persistence
        .delete_movie(movie_id)
        .map_err(translate_persistence_error)?;
    info!(movie_id, "Deleted movie");
    Ok(())
}

// ---------------------------------------------------------------------------
// Auditoriums
// ---------------------------------------------------------------------------

fn auditorium_fields(request: &AuditoriumRequest) -> Result<AuditoriumFields, ApiError> {
    Ok(AuditoriumFields {
        name: request.name.clone(),
        screen_type: parse_field(request.screen_type.trim())?,
        atmos: request.atmos,
        seat_capacity: request.seat_capacity,
        enabled: request.enabled,
    })
}

/// Adds an auditorium.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - A field fails validation
/// - The name is already in use
pub fn create_auditorium(
    persistence: &mut Persistence,
    request: &AuditoriumRequest,
    principal: &Principal,
) -> Result<AuditoriumInfo, ApiError> {
    AuthorizationService::is_admin(principal, "creating an auditorium")?;
    let fields: AuditoriumFields = auditorium_fields(request)?;
    let seat_capacity: u32 = validate_auditorium_fields(&fields).map_err(translate_domain_error)?;

    let auditorium_id: i64 = persistence
        .create_auditorium(&fields, seat_capacity)
        .map_err(translate_persistence_error)?;
    info!(auditorium_id, seat_capacity, "Created auditorium");

    load_auditorium(persistence, auditorium_id).map(auditorium_info)
}

/// Retrieves an auditorium.
///
/// # Errors
///
/// Returns `NotFound` if the auditorium does not exist.
pub fn get_auditorium(
    persistence: &mut Persistence,
    auditorium_id: i64,
) -> Result<AuditoriumInfo, ApiError> {
    check_id("auditorium_id", auditorium_id)?;
    load_auditorium(persistence, auditorium_id).map(auditorium_info)
}

/// Lists auditoriums matching every given filter.
///
/// # Errors
///
/// Returns an error if a filter value is invalid or the query fails.
pub fn list_auditoriums(
    persistence: &mut Persistence,
    query: &AuditoriumQuery,
) -> Result<ListAuditoriumsResponse, ApiError> {
    let screen_type: Option<ScreenType> = query
        .screen_type
        .as_deref()
        .map(|value| parse_field(value.trim()))
        .transpose()?;
    let min_seat_capacity: Option<u32> = query
        .min_seat_capacity
        .map(|value| {
            u32::try_from(value).map_err(|_| ApiError::InvalidArgument {
                field: String::from("min_seat_capacity"),
                message: String::from("must not be negative"),
            })
        })
        .transpose()?;
    let filter: AuditoriumFilter = AuditoriumFilter {
        screen_type,
        enabled: query.enabled,
        min_seat_capacity,
    };

    let auditoriums: Vec<AuditoriumInfo> = persistence
        .list_auditoriums(filter)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(auditorium_info)
        .collect();
    Ok(ListAuditoriumsResponse { auditoriums })
}

/// Replaces an auditorium's fields, including its enabled flag.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - A field fails validation
/// - The auditorium does not exist
/// - The name is in use by another auditorium
/// - The seat capacity changes after tickets were sold
pub fn update_auditorium(
    persistence: &mut Persistence,
    auditorium_id: i64,
    request: &AuditoriumRequest,
    principal: &Principal,
) -> Result<AuditoriumInfo, ApiError> {
    AuthorizationService::is_admin(principal, "editing an auditorium")?;
    check_id("auditorium_id", auditorium_id)?;
    let fields: AuditoriumFields = auditorium_fields(request)?;
    let seat_capacity: u32 = validate_auditorium_fields(&fields).map_err(translate_domain_error)?;

    persistence
        .update_auditorium(auditorium_id, &fields, seat_capacity)
        .map_err(translate_persistence_error)?;
    info!(
        auditorium_id,
        seat_capacity,
        enabled = fields.enabled,
        "Updated auditorium"
    );

    load_auditorium(persistence, auditorium_id).map(auditorium_info)
}

/// Removes an auditorium that no screening references.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - The auditorium does not exist
/// - Screenings still reference the auditorium
pub fn delete_auditorium(
    persistence: &mut Persistence,
    auditorium_id: i64,
    principal: &Principal,
) -> Result<(), ApiError> {
    AuthorizationService::is_admin(principal, "deleting an auditorium")?;
    check_id("auditorium_id", auditorium_id)?;

    persistence
        .delete_auditorium(auditorium_id)
        .map_err(translate_persistence_error)?;
    info!(auditorium_id, "Deleted auditorium");
    Ok(())
}

// ---------------------------------------------------------------------------
// Screenings
// ---------------------------------------------------------------------------

/// Checks the parts of a screening request that need no stored rows.
fn screening_target(
    request: &ScreeningRequest,
    now: OffsetDateTime,
) -> Result<OffsetDateTime, ApiError> {
    let showtime: OffsetDateTime =
        parse_showtime(&request.showtime).map_err(translate_domain_error)?;
    validate_showtime_in_future(showtime, now).map_err(translate_domain_error)?;
    check_id("movie_id", request.movie_id)?;
    check_id("auditorium_id", request.auditorium_id)?;
    Ok(showtime)
}

/// Schedules a screening.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - The showtime is malformed, not in the future, or past the horizon
/// - The movie or auditorium does not exist
/// - The auditorium is disabled
/// - The showtime collides with or overlaps another screening
pub fn create_screening(
    persistence: &mut Persistence,
    request: &ScreeningRequest,
    principal: &Principal,
    now: OffsetDateTime,
) -> Result<ScreeningInfo, ApiError> {
    AuthorizationService::is_admin(principal, "scheduling a screening")?;
    let showtime: OffsetDateTime = screening_target(request, now)?;

    let screening = persistence
        .create_screening(request.movie_id, request.auditorium_id, showtime, now)
        .map_err(translate_persistence_error)?;

    let details: ScreeningDetails = load_screening(persistence, screening.id)?;
    screening_info(details, now)
}

/// Retrieves a screening.
///
/// # Errors
///
/// Returns `NotFound` if the screening does not exist.
pub fn get_screening(
    persistence: &mut Persistence,
    screening_id: i64,
    now: OffsetDateTime,
) -> Result<ScreeningInfo, ApiError> {
    check_id("screening_id", screening_id)?;
    let details: ScreeningDetails = load_screening(persistence, screening_id)?;
    screening_info(details, now)
}

/// Lists every screening by showtime.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_screenings(
    persistence: &mut Persistence,
    now: OffsetDateTime,
) -> Result<ListScreeningsResponse, ApiError> {
    let screenings: Vec<ScreeningDetails> = persistence
        .list_screenings(ScreeningListing::All, now)
        .map_err(translate_persistence_error)?;
    screening_list(screenings, now)
}

/// Lists the future screenings of a movie that still have seats.
///
/// # Errors
///
/// Returns `NotFound` if the movie does not exist.
pub fn list_screenings_for_movie(
    persistence: &mut Persistence,
    movie_id: i64,
    now: OffsetDateTime,
) -> Result<ListScreeningsResponse, ApiError> {
    check_id("movie_id", movie_id)?;
    load_movie(persistence, movie_id)?;

    let screenings: Vec<ScreeningDetails> = persistence
        .list_screenings(ScreeningListing::AvailableForMovie(movie_id), now)
        .map_err(translate_persistence_error)?;
    screening_list(screenings, now)
}

/// Lists the future screenings with seats in auditoriums of a screen type.
///
/// An unknown screen type is an invalid argument. A known type with no
/// matching screenings yields an empty list.
///
/// # Errors
///
/// Returns an error if the screen type is unknown or the query fails.
pub fn list_screenings_by_screen_type(
    persistence: &mut Persistence,
    screen_type: &str,
    now: OffsetDateTime,
) -> Result<ListScreeningsResponse, ApiError> {
    let screen_type: ScreenType = parse_field(screen_type.trim())?;

    let screenings: Vec<ScreeningDetails> = persistence
        .list_screenings(ScreeningListing::AvailableByScreenType(screen_type), now)
        .map_err(translate_persistence_error)?;
    screening_list(screenings, now)
}

/// Moves a screening to another showtime, movie or auditorium.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - The screening, movie or auditorium does not exist
/// - Any scheduling rule rejects the new placement
/// - Tickets were sold and the auditorium changes
pub fn update_screening(
    persistence: &mut Persistence,
    screening_id: i64,
    request: &ScreeningRequest,
    principal: &Principal,
    now: OffsetDateTime,
) -> Result<ScreeningInfo, ApiError> {
    AuthorizationService::is_admin(principal, "rescheduling a screening")?;
    check_id("screening_id", screening_id)?;
    let showtime: OffsetDateTime = screening_target(request, now)?;

    persistence
        .update_screening(
            screening_id,
            request.movie_id,
            request.auditorium_id,
            showtime,
            now,
        )
        .map_err(translate_persistence_error)?;

    let details: ScreeningDetails = load_screening(persistence, screening_id)?;
    screening_info(details, now)
}

/// Cancels a screening with no tickets sold.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - The screening does not exist
/// - Tickets were sold for the screening
pub fn delete_screening(
    persistence: &mut Persistence,
    screening_id: i64,
    principal: &Principal,
) -> Result<(), ApiError> {
    AuthorizationService::is_admin(principal, "deleting a screening")?;
    check_id("screening_id", screening_id)?;

    persistence
        .delete_screening(screening_id)
        .map_err(translate_persistence_error)
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

fn validated_card(request: &CardRequest, now: OffsetDateTime) -> Result<ValidatedCard, ApiError> {
    let card_type: CardType = parse_field(request.card_type.trim())?;
    let fields: CardFields = CardFields {
        card_number: request.card_number.clone(),
        holder_name: request.holder_name.clone(),
        issue_date: request.issue_date.clone(),
        expiration_date: request.expiration_date.clone(),
        cvv: request.cvv.clone(),
        card_type,
    };
    validate_card_fields(&fields, now.date()).map_err(translate_domain_error)
}

/// Opens the caller's card with a zero balance.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a client
/// - A field fails validation
/// - The caller already has a card
/// - The card number is in use
pub fn create_card(
    persistence: &mut Persistence,
    request: &CardRequest,
    principal: &Principal,
    now: OffsetDateTime,
) -> Result<CardInfo, ApiError> {
    AuthorizationService::is_client(principal, "registering a card")?;
    let card: ValidatedCard = validated_card(request, now)?;
    persistence
        .create_card(principal.user_id, &card)
        .map(card_info)
        .map_err(translate_persistence_error)
}

/// Retrieves the caller's card.
///
/// # Errors
///
/// Returns `NotFound` if the caller has no card.
pub fn get_my_card(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<CardInfo, ApiError> {
    load_card(persistence, principal.user_id).map(card_info)
}

/// Retrieves a user's card.
///
/// Administrators may read any card; other callers only their own.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is neither an administrator nor the card's owner
/// - The user has no card
pub fn get_user_card(
    persistence: &mut Persistence,
    user_id: i64,
    principal: &Principal,
) -> Result<CardInfo, ApiError> {
    check_id("user_id", user_id)?;
    let admin = AuthorizationService::is_admin(principal, "reading another user's card");
    // Non-owners are refused before the lookup so absence is not leaked.
    if user_id != principal.user_id {
        admin.clone()?;
    }

    let card: Card = load_card(persistence, user_id)?;
    admin.or_else(|_| AuthorizationService::owns_card(principal, &card))?;
    Ok(card_info(card))
}

/// Replaces the caller's card details. The balance is kept.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a client
/// - A field fails validation
/// - The caller has no card
/// - The card number is in use by another card
pub fn update_card(
    persistence: &mut Persistence,
    request: &CardRequest,
    principal: &Principal,
    now: OffsetDateTime,
) -> Result<CardInfo, ApiError> {
    AuthorizationService::is_client(principal, "replacing a card")?;
    let card: ValidatedCard = validated_card(request, now)?;
    persistence
        .update_card(principal.user_id, &card)
        .map(card_info)
        .map_err(translate_persistence_error)
}

/// Deletes the caller's card. Tickets already bought are kept.
///
/// # Errors
///
/// Returns `Forbidden` for administrators and `NotFound` if the caller has
/// no card.
pub fn delete_card(persistence: &mut Persistence, principal: &Principal) -> Result<(), ApiError> {
    AuthorizationService::is_client(principal, "removing a card")?;
    persistence
        .delete_card(principal.user_id)
        .map_err(translate_persistence_error)
}

/// Returns the balance of the caller's card.
///
/// # Errors
///
/// Returns `Forbidden` for administrators and `NotFound` if the caller has
/// no card.
pub fn get_balance(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<BalanceResponse, ApiError> {
    AuthorizationService::is_client(principal, "checking a card balance")?;
    let card: Card = load_card(persistence, principal.user_id)?;
    Ok(BalanceResponse {
        balance: card.balance,
    })
}

/// Adds funds to the caller's card.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a client
/// - The amount is not positive, too precise, or above the recharge limit
/// - The caller has no card
/// - The new balance would exceed the balance cap
pub fn recharge_card(
    persistence: &mut Persistence,
    request: &RechargeRequest,
    principal: &Principal,
) -> Result<BalanceResponse, ApiError> {
    AuthorizationService::is_client(principal, "recharging a card")?;
    let amount: Money = Money::from_decimal(request.amount).map_err(translate_domain_error)?;
    validate_recharge_amount(amount).map_err(translate_domain_error)?;

    let balance: Money = persistence
        .recharge_card(principal.user_id, amount)
        .map_err(translate_persistence_error)?;
    Ok(BalanceResponse { balance })
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

/// Buys `quantity` tickets for a screening with the caller's card.
///
/// Either every ticket is issued, the seats are taken and the card is
/// charged, or nothing changes.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a client
/// - The quantity is below one
/// - The screening does not exist or has started
/// - Not enough seats remain
/// - The caller has no card, or it cannot cover the total
/// - A concurrent writer held the storage lock too long
pub fn purchase_tickets(
    persistence: &mut Persistence,
    request: &PurchaseRequest,
    principal: &Principal,
    now: OffsetDateTime,
) -> Result<PurchaseResponse, ApiError> {
    AuthorizationService::is_client(principal, "buying tickets")?;
    check_id("screening_id", request.screening_id)?;
    let quantity: u32 = validate_quantity(request.quantity).map_err(translate_domain_error)?;

    let tickets: Vec<TicketDetails> = persistence
        .purchase_tickets(principal.user_id, request.screening_id, quantity, now)
        .map_err(translate_persistence_error)?;

    let total: Money = tickets
        .iter()
        .try_fold(Money::ZERO, |acc, details| acc.checked_add(details.ticket.price))
        .ok_or_else(|| ApiError::Internal {
            message: String::from("ticket total overflowed"),
        })?;
    Ok(PurchaseResponse {
        tickets: ticket_list(tickets)?,
        total,
    })
}

/// Lists the caller's tickets, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_my_tickets(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<ListTicketsResponse, ApiError> {
    let tickets: Vec<TicketDetails> = persistence
        .list_tickets_for_user(principal.user_id)
        .map_err(translate_persistence_error)?;
    Ok(ListTicketsResponse {
        tickets: ticket_list(tickets)?,
    })
}

/// Retrieves a ticket owned by the caller, or any ticket for administrators.
///
/// # Errors
///
/// Returns an error if:
/// - The ticket does not exist
/// - The caller is neither its owner nor an administrator
pub fn get_ticket(
    persistence: &mut Persistence,
    ticket_id: i64,
    principal: &Principal,
) -> Result<TicketInfo, ApiError> {
    check_id("ticket_id", ticket_id)?;
    let details: TicketDetails = persistence
        .get_ticket(ticket_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("ticket"))?;

    AuthorizationService::owns_ticket(principal, &details.ticket).or_else(|_| {
        AuthorizationService::is_admin(principal, "reading another user's ticket")
    })?;
    ticket_info(details)
}

/// Lists a user's tickets, newest first.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - The user does not exist
pub fn list_user_tickets(
    persistence: &mut Persistence,
    user_id: i64,
    principal: &Principal,
) -> Result<ListTicketsResponse, ApiError> {
    AuthorizationService::is_admin(principal, "listing another user's tickets")?;
    check_id("user_id", user_id)?;
    load_user(persistence, user_id)?;

    let tickets: Vec<TicketDetails> = persistence
        .list_tickets_for_user(user_id)
        .map_err(translate_persistence_error)?;
    Ok(ListTicketsResponse {
        tickets: ticket_list(tickets)?,
    })
}
