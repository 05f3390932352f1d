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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod extract;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use boleteria_api::{
    ApiError, AuditoriumInfo, AuditoriumQuery, AuditoriumRequest, BalanceResponse, CardInfo,
    CardRequest, ListAuditoriumsResponse, ListMoviesResponse, ListScreeningsResponse,
    ListTicketsResponse, ListUsersResponse, LoginRequest, LoginResponse, MovieInfo, MovieRequest,
    PurchaseRequest, PurchaseResponse, RechargeRequest, RegisterRequest, ScreeningInfo,
    ScreeningRequest, SetRoleRequest, TicketInfo, TokenConfig, UpdateProfileRequest, UserInfo,
};
use boleteria_persistence::Persistence;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use time::OffsetDateTime;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

use crate::{
    extract::{JsonBody, PathParam, QueryParams},
    session::Session,
};

/// Boleteria Server - HTTP server for the cinema ticketing back-office
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// HS256 signing key for bearer tokens
    #[arg(long, env = "BOLETERIA_JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Lifetime of issued tokens, in minutes
    #[arg(
        long,
        env = "BOLETERIA_TOKEN_TTL_MINUTES",
        default_value_t = 60,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    token_ttl_minutes: u32,

    /// How long a request waits for the database before giving up, in milliseconds
    #[arg(
        long,
        env = "BOLETERIA_LOCK_TIMEOUT_MS",
        default_value_t = 5000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    lock_timeout_ms: u64,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a single async mutex. Every request
/// holds it for the duration of one operation, so mutations are serialized
/// in-process before `SQLite` serializes them again.
#[derive(Clone)]
pub(crate) struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Token signing configuration.
    tokens: TokenConfig,
    /// Upper bound on the wait for the persistence lock.
    lock_timeout: Duration,
}

impl AppState {
    fn new(persistence: Persistence, tokens: TokenConfig, lock_timeout: Duration) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            tokens,
            lock_timeout,
        }
    }

    /// Acquires the persistence handle, failing with a retryable conflict
    /// when the wait exceeds the configured lock timeout.
    async fn lock_persistence(&self) -> Result<MutexGuard<'_, Persistence>, HttpError> {
        tokio::time::timeout(self.lock_timeout, self.persistence.lock())
            .await
            .map_err(|_| {
                warn!(
                    timeout = ?self.lock_timeout,
                    "Timed out waiting for persistence"
                );
                HttpError::from(ApiError::Conflict {
                    reason: String::from("retry"),
                    message: String::from("The system is busy, retry the request"),
                })
            })
    }
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always true.
    error: bool,
    /// The error taxonomy name.
    kind: String,
    /// The invalid field, missing resource or violated invariant.
    reason: Option<String>,
    /// A human-readable message.
    message: String,
}

/// Error wrapper that carries an HTTP status.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error taxonomy name.
    kind: &'static str,
    /// Short machine-readable tag.
    reason: Option<String>,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            kind: self.kind.to_string(),
            reason: self.reason,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            ApiError::AuthRequired { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            kind: err.kind(),
            reason: err.reason().map(str::to_string),
            message: err.to_string(),
        }
    }
}

type Created<T> = Result<(StatusCode, Json<T>), HttpError>;

// ============================================================================
// Identity
// ============================================================================

async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Created<UserInfo> {
    let mut persistence = app_state.lock_persistence().await?;
    let user: UserInfo = boleteria_api::register_user(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.lock_persistence().await?;
    let response: LoginResponse =
        boleteria_api::login(&mut persistence, &req, &app_state.tokens, now)?;
    Ok(Json(response))
}

async fn handle_get_profile(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
) -> Result<Json<UserInfo>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::get_profile(&mut persistence, &principal)?))
}

async fn handle_update_profile(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::update_profile(
        &mut persistence,
        &req,
        &principal,
    )?))
}

async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::list_users(&mut persistence, &principal)?))
}

async fn handle_set_role(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    PathParam(user_id): PathParam<i64>,
    JsonBody(req): JsonBody<SetRoleRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::set_user_role(
        &mut persistence,
        user_id,
        &req,
        &principal,
    )?))
}

async fn handle_get_user_card(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    PathParam(user_id): PathParam<i64>,
) -> Result<Json<CardInfo>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::get_user_card(
        &mut persistence,
        user_id,
        &principal,
    )?))
}

async fn handle_list_user_tickets(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    PathParam(user_id): PathParam<i64>,
) -> Result<Json<ListTicketsResponse>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::list_user_tickets(
        &mut persistence,
        user_id,
        &principal,
    )?))
}

// ============================================================================
// Movies
// ============================================================================

async fn handle_list_movies(
    AxumState(app_state): AxumState<AppState>,
    Session(_): Session,
) -> Result<Json<ListMoviesResponse>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::list_movies(&mut persistence)?))
}

async fn handle_create_movie(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    JsonBody(req): JsonBody<MovieRequest>,
) -> Created<MovieInfo> {
    let mut persistence = app_state.lock_persistence().await?;
    let movie: MovieInfo = boleteria_api::create_movie(&mut persistence, &req, &principal)?;
    Ok((StatusCode::CREATED, Json(movie)))
}

async fn handle_get_movie(
    AxumState(app_state): AxumState<AppState>,
    Session(_): Session,
    PathParam(movie_id): PathParam<i64>,
) -> Result<Json<MovieInfo>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::get_movie(&mut persistence, movie_id)?))
}

async fn handle_update_movie(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    PathParam(movie_id): PathParam<i64>,
    JsonBody(req): JsonBody<MovieRequest>,
) -> Result<Json<MovieInfo>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::update_movie(
        &mut persistence,
        movie_id,
        &req,
        &principal,
    )?))
}

async fn handle_delete_movie(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    PathParam(movie_id): PathParam<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    boleteria_api::delete_movie(&mut persistence, movie_id, &principal)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_list_movie_screenings(
    AxumState(app_state): AxumState<AppState>,
    Session(_): Session,
    PathParam(movie_id): PathParam<i64>,
) -> Result<Json<ListScreeningsResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::list_screenings_for_movie(
        &mut persistence,
        movie_id,
        now,
    )?))
}

// ============================================================================
// Auditoriums
// ============================================================================

async fn handle_list_auditoriums(
    AxumState(app_state): AxumState<AppState>,
    Session(_): Session,
    QueryParams(query): QueryParams<AuditoriumQuery>,
) -> Result<Json<ListAuditoriumsResponse>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::list_auditoriums(
        &mut persistence,
        &query,
    )?))
}

async fn handle_create_auditorium(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    JsonBody(req): JsonBody<AuditoriumRequest>,
) -> Created<AuditoriumInfo> {
    let mut persistence = app_state.lock_persistence().await?;
    let auditorium: AuditoriumInfo =
        boleteria_api::create_auditorium(&mut persistence, &req, &principal)?;
    Ok((StatusCode::CREATED, Json(auditorium)))
}

async fn handle_get_auditorium(
    AxumState(app_state): AxumState<AppState>,
    Session(_): Session,
    PathParam(auditorium_id): PathParam<i64>,
) -> Result<Json<AuditoriumInfo>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::get_auditorium(
        &mut persistence,
        auditorium_id,
    )?))
}

async fn handle_update_auditorium(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    PathParam(auditorium_id): PathParam<i64>,
    JsonBody(req): JsonBody<AuditoriumRequest>,
) -> Result<Json<AuditoriumInfo>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::update_auditorium(
        &mut persistence,
        auditorium_id,
        &req,
        &principal,
    )?))
}

async fn handle_delete_auditorium(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    PathParam(auditorium_id): PathParam<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    boleteria_api::delete_auditorium(&mut persistence, auditorium_id, &principal)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Screenings
// ============================================================================

async fn handle_list_screenings(
    AxumState(app_state): AxumState<AppState>,
    Session(_): Session,
) -> Result<Json<ListScreeningsResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::list_screenings(&mut persistence, now)?))
}

async fn handle_create_screening(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    JsonBody(req): JsonBody<ScreeningRequest>,
) -> Created<ScreeningInfo> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.lock_persistence().await?;
    let screening: ScreeningInfo =
        boleteria_api::create_screening(&mut persistence, &req, &principal, now)?;
    Ok((StatusCode::CREATED, Json(screening)))
}

async fn handle_get_screening(
    AxumState(app_state): AxumState<AppState>,
    Session(_): Session,
    PathParam(screening_id): PathParam<i64>,
) -> Result<Json<ScreeningInfo>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::get_screening(
        &mut persistence,
        screening_id,
        now,
    )?))
}

async fn handle_update_screening(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    PathParam(screening_id): PathParam<i64>,
    JsonBody(req): JsonBody<ScreeningRequest>,
) -> Result<Json<ScreeningInfo>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::update_screening(
        &mut persistence,
        screening_id,
        &req,
        &principal,
        now,
    )?))
}

async fn handle_delete_screening(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    PathParam(screening_id): PathParam<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    boleteria_api::delete_screening(&mut persistence, screening_id, &principal)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_list_screenings_by_screen_type(
    AxumState(app_state): AxumState<AppState>,
    Session(_): Session,
    PathParam(screen_type): PathParam<String>,
) -> Result<Json<ListScreeningsResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::list_screenings_by_screen_type(
        &mut persistence,
        &screen_type,
        now,
    )?))
}

// ============================================================================
// Cards
// ============================================================================

async fn handle_get_my_card(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
) -> Result<Json<CardInfo>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::get_my_card(&mut persistence, &principal)?))
}

async fn handle_create_card(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    JsonBody(req): JsonBody<CardRequest>,
) -> Created<CardInfo> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.lock_persistence().await?;
    let card: CardInfo = boleteria_api::create_card(&mut persistence, &req, &principal, now)?;
    Ok((StatusCode::CREATED, Json(card)))
}

async fn handle_update_card(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    JsonBody(req): JsonBody<CardRequest>,
) -> Result<Json<CardInfo>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::update_card(
        &mut persistence,
        &req,
        &principal,
        now,
    )?))
}

async fn handle_delete_card(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    boleteria_api::delete_card(&mut persistence, &principal)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_get_balance(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
) -> Result<Json<BalanceResponse>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::get_balance(&mut persistence, &principal)?))
}

async fn handle_recharge(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    JsonBody(req): JsonBody<RechargeRequest>,
) -> Result<Json<BalanceResponse>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::recharge_card(
        &mut persistence,
        &req,
        &principal,
    )?))
}

// ============================================================================
// Tickets
// ============================================================================

async fn handle_purchase(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    JsonBody(req): JsonBody<PurchaseRequest>,
) -> Created<PurchaseResponse> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.lock_persistence().await?;
    let purchase: PurchaseResponse =
        boleteria_api::purchase_tickets(&mut persistence, &req, &principal, now)?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

async fn handle_list_my_tickets(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
) -> Result<Json<ListTicketsResponse>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::list_my_tickets(
        &mut persistence,
        &principal,
    )?))
}

async fn handle_get_ticket(
    AxumState(app_state): AxumState<AppState>,
    Session(principal): Session,
    PathParam(ticket_id): PathParam<i64>,
) -> Result<Json<TicketInfo>, HttpError> {
    let mut persistence = app_state.lock_persistence().await?;
    Ok(Json(boleteria_api::get_ticket(
        &mut persistence,
        ticket_id,
        &principal,
    )?))
}

/// Liveness response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/auth/register", post(handle_register))
        .route("/api/auth/login", post(handle_login))
        .route(
            "/api/users/me",
            get(handle_get_profile).put(handle_update_profile),
        )
        .route("/api/users", get(handle_list_users))
        .route("/api/users/{id}/role", put(handle_set_role))
        .route("/api/users/{id}/card", get(handle_get_user_card))
        .route("/api/users/{id}/tickets", get(handle_list_user_tickets))
        .route(
            "/api/movies",
            get(handle_list_movies).post(handle_create_movie),
        )
        .route(
            "/api/movies/{id}",
            get(handle_get_movie)
                .put(handle_update_movie)
                .delete(handle_delete_movie),
        )
        .route(
            "/api/movies/{id}/screenings",
            get(handle_list_movie_screenings),
        )
        .route(
            "/api/auditoriums",
            get(handle_list_auditoriums).post(handle_create_auditorium),
        )
        .route(
            "/api/auditoriums/{id}",
            get(handle_get_auditorium)
                .put(handle_update_auditorium)
                .delete(handle_delete_auditorium),
        )
        .route(
            "/api/screenings",
            get(handle_list_screenings).post(handle_create_screening),
        )
        .route(
            "/api/screenings/{id}",
            get(handle_get_screening)
                .put(handle_update_screening)
                .delete(handle_delete_screening),
        )
        .route(
            "/api/screenings/screen-type/{screen_type}",
            get(handle_list_screenings_by_screen_type),
        )
        .route("/api/cards", post(handle_create_card))
        .route(
            "/api/cards/me",
            get(handle_get_my_card)
                .put(handle_update_card)
                .delete(handle_delete_card),
        )
        .route("/api/cards/me/balance", get(handle_get_balance))
        .route("/api/cards/me/recharge", post(handle_recharge))
        .route("/api/tickets", post(handle_purchase))
        .route("/api/tickets/me", get(handle_list_my_tickets))
        .route("/api/tickets/{id}", get(handle_get_ticket))
        .with_state(app_state)
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Boleteria Server");

    let lock_timeout: Duration = Duration::from_millis(args.lock_timeout_ms);
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path, lock_timeout)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if boleteria_api::bootstrap_admin(&mut persistence)? {
        warn!(
            username = boleteria_api::BOOTSTRAP_ADMIN_USERNAME,
            "Created default administrator, change its password"
        );
    }

    let tokens: TokenConfig = TokenConfig::new(
        &args.jwt_secret,
        time::Duration::minutes(i64::from(args.token_ttl_minutes)),
    );
    let app_state: AppState = AppState::new(persistence, tokens, lock_timeout);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
