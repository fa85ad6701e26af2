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

mod live;
mod session;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use helpdesk_api::{
    AgentWorkloadInfo, ApiError, AuthenticationService, CategoryCountInfo, CreateTicketRequest,
    NotificationInfo, OverdueReport, RegisterRequest, ResolutionReport, SessionContext,
    StatusReport, TicketInfo, UpdateProfileRequest, UserInfo, VolumeReport, add_category,
    add_comment, add_note, agent_workload_report, category_report, change_status,
    change_user_role, create_ticket, delete_ticket, delete_user, get_ticket, list_categories,
    list_notifications, list_tickets, list_users, mark_all_notifications_read,
    mark_notification_read, overdue_report, resolution_report, seed_categories, status_report,
    system_reset, update_profile, volume_report,
};
use helpdesk_persistence::DocumentStore;
use live::{LiveEvent, LiveEventBroadcaster};
use session::SessionUser;

/// Helpdesk Server - HTTP server for the Helpdesk System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the data directory. If not provided, records are kept in memory.
    #[arg(short, long)]
    data_dir: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The record store is wrapped in a Mutex to allow safe concurrent access;
/// the broadcaster fans store change signals out to WebSocket clients.
#[derive(Clone)]
struct AppState {
    /// The document store holding all helpdesk records.
    store: Arc<Mutex<DocumentStore>>,
    /// The live change broadcaster.
    live: Arc<LiveEventBroadcaster>,
}

/// API request for logging in.
#[derive(Debug, Clone, Deserialize)]
struct LoginApiRequest {
    /// The account email.
    email: String,
    /// The account password.
    password: String,
}

/// API request carrying a new ticket status.
#[derive(Debug, Clone, Deserialize)]
struct StatusApiRequest {
    /// The new status, as its wire string.
    status: String,
}

/// API request carrying reply or note text.
#[derive(Debug, Clone, Deserialize)]
struct TextApiRequest {
    /// The message body.
    text: String,
}

/// API request carrying a category name.
#[derive(Debug, Clone, Deserialize)]
struct CategoryApiRequest {
    /// The category name.
    name: String,
}

/// API request carrying a role assignment.
#[derive(Debug, Clone, Deserialize)]
struct RoleApiRequest {
    /// The new role, as its wire string.
    role: String,
}

/// API response describing the logged-in session.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionApiResponse {
    /// The session user's id.
    user_id: i64,
    /// The session user's display name.
    name: String,
    /// The session user's role, as its wire string.
    role: String,
}

impl SessionApiResponse {
    fn from_session(session: &SessionContext) -> Self {
        Self {
            user_id: session.user_id,
            name: session.name.clone(),
            role: session.role.as_str().to_string(),
        }
    }
}

/// API response for write operations without a record body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

// ============================================================================
// Auth Handlers
// ============================================================================

/// Handler for POST /register endpoint.
///
/// Registers a new account. Privileged roles require a management session;
/// the very first account and client self-registration do not.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(email = %req.email, role = %req.role, "Handling register request");

    let mut store = app_state.store.lock().await;
    let acting: Option<SessionContext> = AuthenticationService::current_session(&*store);
    let info: UserInfo = AuthenticationService::register(&mut *store, &req, acting.as_ref())?;
    drop(store);

    Ok(Json(info))
}

/// Handler for POST /login endpoint.
///
/// Verifies credentials and writes the session document.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginApiRequest>,
) -> Result<Json<SessionApiResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let mut store = app_state.store.lock().await;
    let session: SessionContext =
        AuthenticationService::login(&mut *store, &req.email, &req.password)?;
    drop(store);

    Ok(Json(SessionApiResponse::from_session(&session)))
}

/// Handler for POST /logout endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!("Handling logout request");

    let mut store = app_state.store.lock().await;
    AuthenticationService::logout(&mut *store)?;
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Logged out")),
    }))
}

/// Handler for GET /session endpoint.
///
/// Returns the logged-in session, or 401 when none exists.
async fn handle_session(
    SessionUser(session): SessionUser,
) -> Result<Json<SessionApiResponse>, HttpError> {
    Ok(Json(SessionApiResponse::from_session(&session)))
}

// ============================================================================
// Ticket Handlers
// ============================================================================

/// Handler for GET /tickets endpoint.
///
/// Lists the tickets visible to the session user.
async fn handle_list_tickets(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<Vec<TicketInfo>>, HttpError> {
    let store = app_state.store.lock().await;
    let tickets: Vec<TicketInfo> = list_tickets(&*store, &session, OffsetDateTime::now_utc());
    drop(store);

    Ok(Json(tickets))
}

/// Handler for POST /tickets endpoint.
///
/// Opens a new ticket for the session user.
async fn handle_create_ticket(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
    Json(req): Json<CreateTicketRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(
        user_id = session.user_id,
        title = %req.title,
        "Handling create_ticket request"
    );

    let mut store = app_state.store.lock().await;
    let info: TicketInfo = create_ticket(&mut *store, &session, &req, OffsetDateTime::now_utc())?;
    drop(store);

    Ok(Json(info))
}

/// Handler for GET `/tickets/{ticket_id}` endpoint.
async fn handle_get_ticket(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
    Path(ticket_id): Path<i64>,
) -> Result<Json<TicketInfo>, HttpError> {
    let store = app_state.store.lock().await;
    let info: TicketInfo = get_ticket(&*store, &session, ticket_id, OffsetDateTime::now_utc())?;
    drop(store);

    Ok(Json(info))
}

/// Handler for POST `/tickets/{ticket_id}/status` endpoint.
///
/// Moves a ticket through its lifecycle, claiming it for the acting agent.
async fn handle_change_status(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
    Path(ticket_id): Path<i64>,
    Json(req): Json<StatusApiRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(
        user_id = session.user_id,
        ticket_id = ticket_id,
        status = %req.status,
        "Handling change_status request"
    );

    let mut store = app_state.store.lock().await;
    let info: TicketInfo = change_status(
        &mut *store,
        &session,
        ticket_id,
        &req.status,
        OffsetDateTime::now_utc(),
    )?;
    drop(store);

    Ok(Json(info))
}

/// Handler for POST `/tickets/{ticket_id}/comments` endpoint.
async fn handle_add_comment(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
    Path(ticket_id): Path<i64>,
    Json(req): Json<TextApiRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(
        user_id = session.user_id,
        ticket_id = ticket_id,
        "Handling add_comment request"
    );

    let mut store = app_state.store.lock().await;
    let info: TicketInfo = add_comment(
        &mut *store,
        &session,
        ticket_id,
        &req.text,
        OffsetDateTime::now_utc(),
    )?;
    drop(store);

    Ok(Json(info))
}

/// Handler for POST `/tickets/{ticket_id}/notes` endpoint.
async fn handle_add_note(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
    Path(ticket_id): Path<i64>,
    Json(req): Json<TextApiRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(
        user_id = session.user_id,
        ticket_id = ticket_id,
        "Handling add_note request"
    );

    let mut store = app_state.store.lock().await;
    let info: TicketInfo = add_note(
        &mut *store,
        &session,
        ticket_id,
        &req.text,
        OffsetDateTime::now_utc(),
    )?;
    drop(store);

    Ok(Json(info))
}

/// Handler for DELETE `/tickets/{ticket_id}` endpoint.
///
/// Owners may remove their own closed tickets.
async fn handle_delete_ticket(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
    Path(ticket_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        user_id = session.user_id,
        ticket_id = ticket_id,
        "Handling delete_ticket request"
    );

    let mut store = app_state.store.lock().await;
    delete_ticket(&mut *store, &session, ticket_id, OffsetDateTime::now_utc())?;
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Deleted ticket {ticket_id}")),
    }))
}

// ============================================================================
// Notification Handlers
// ============================================================================

/// Handler for GET /notifications endpoint.
///
/// Lists the notifications visible to the session user, newest first.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<Vec<NotificationInfo>>, HttpError> {
    let store = app_state.store.lock().await;
    let inbox: Vec<NotificationInfo> = list_notifications(&*store, &session);
    drop(store);

    Ok(Json(inbox))
}

/// Handler for POST `/notifications/{notification_id}/read` endpoint.
async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
    Path(notification_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    mark_notification_read(&mut *store, &session, notification_id)?;
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST /notifications/read_all endpoint.
async fn handle_mark_all_notifications_read(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    mark_all_notifications_read(&mut *store, &session)?;
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

// ============================================================================
// Category Handlers
// ============================================================================

/// Handler for GET /categories endpoint.
async fn handle_list_categories(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_session): SessionUser,
) -> Result<Json<Vec<String>>, HttpError> {
    let store = app_state.store.lock().await;
    let categories: Vec<String> = list_categories(&*store);
    drop(store);

    Ok(Json(categories))
}

/// Handler for POST /categories endpoint.
///
/// Adds a ticket category. Management only.
async fn handle_add_category(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
    Json(req): Json<CategoryApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        user_id = session.user_id,
        name = %req.name,
        "Handling add_category request"
    );

    let mut store = app_state.store.lock().await;
    add_category(&mut *store, &session, &req.name)?;
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Added category '{}'", req.name)),
    }))
}

// ============================================================================
// User Administration Handlers
// ============================================================================

/// Handler for GET /users endpoint.
///
/// Lists all accounts. Management only.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<Vec<UserInfo>>, HttpError> {
    let store = app_state.store.lock().await;
    let users: Vec<UserInfo> = list_users(&*store, &session)?;
    drop(store);

    Ok(Json(users))
}

/// Handler for POST `/users/{user_id}/role` endpoint.
async fn handle_change_user_role(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
    Path(user_id): Path<i64>,
    Json(req): Json<RoleApiRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(
        user_id = session.user_id,
        target = user_id,
        role = %req.role,
        "Handling change_user_role request"
    );

    let mut store = app_state.store.lock().await;
    let info: UserInfo = change_user_role(&mut *store, &session, user_id, &req.role)?;
    drop(store);

    Ok(Json(info))
}

/// Handler for DELETE `/users/{user_id}` endpoint.
async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        user_id = session.user_id,
        target = user_id,
        "Handling delete_user request"
    );

    let mut store = app_state.store.lock().await;
    delete_user(&mut *store, &session, user_id)?;
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Deleted user {user_id}")),
    }))
}

/// Handler for POST /profile endpoint.
///
/// Updates the session user's own name, password, or profile image.
async fn handle_update_profile(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(user_id = session.user_id, "Handling update_profile request");

    let mut store = app_state.store.lock().await;
    let info: UserInfo = update_profile(&mut *store, &session, &req)?;
    drop(store);

    Ok(Json(info))
}

/// Handler for POST /admin/reset endpoint.
///
/// Clears all notifications and reseeds the default categories.
async fn handle_system_reset(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(user_id = session.user_id, "Handling system_reset request");

    let mut store = app_state.store.lock().await;
    system_reset(&mut *store, &session)?;
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("System reset complete")),
    }))
}

// ============================================================================
// Report Handlers
// ============================================================================

/// Handler for GET /reports/status endpoint.
async fn handle_status_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<StatusReport>, HttpError> {
    let store = app_state.store.lock().await;
    let report: StatusReport = status_report(&*store, &session)?;
    drop(store);

    Ok(Json(report))
}

/// Handler for GET /reports/workload endpoint.
async fn handle_workload_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<Vec<AgentWorkloadInfo>>, HttpError> {
    let store = app_state.store.lock().await;
    let report: Vec<AgentWorkloadInfo> = agent_workload_report(&*store, &session)?;
    drop(store);

    Ok(Json(report))
}

/// Handler for GET /reports/categories endpoint.
async fn handle_category_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<Vec<CategoryCountInfo>>, HttpError> {
    let store = app_state.store.lock().await;
    let report: Vec<CategoryCountInfo> = category_report(&*store, &session)?;
    drop(store);

    Ok(Json(report))
}

/// Handler for GET /reports/volume endpoint.
async fn handle_volume_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<VolumeReport>, HttpError> {
    let store = app_state.store.lock().await;
    let report: VolumeReport = volume_report(&*store, &session)?;
    drop(store);

    Ok(Json(report))
}

/// Handler for GET /reports/overdue endpoint.
async fn handle_overdue_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<OverdueReport>, HttpError> {
    let store = app_state.store.lock().await;
    let report: OverdueReport = overdue_report(&*store, &session, OffsetDateTime::now_utc())?;
    drop(store);

    Ok(Json(report))
}

/// Handler for GET /reports/resolution endpoint.
async fn handle_resolution_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<ResolutionReport>, HttpError> {
    let store = app_state.store.lock().await;
    let report: ResolutionReport = resolution_report(&*store, &session)?;
    drop(store);

    Ok(Json(report))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/register", post(handle_register))
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/session", get(handle_session))
        .route(
            "/tickets",
            get(handle_list_tickets).post(handle_create_ticket),
        )
        .route(
            "/tickets/{ticket_id}",
            get(handle_get_ticket).delete(handle_delete_ticket),
        )
        .route("/tickets/{ticket_id}/status", post(handle_change_status))
        .route("/tickets/{ticket_id}/comments", post(handle_add_comment))
        .route("/tickets/{ticket_id}/notes", post(handle_add_note))
        .route("/notifications", get(handle_list_notifications))
        .route(
            "/notifications/read_all",
            post(handle_mark_all_notifications_read),
        )
        .route(
            "/notifications/{notification_id}/read",
            post(handle_mark_notification_read),
        )
        .route(
            "/categories",
            get(handle_list_categories).post(handle_add_category),
        )
        .route("/users", get(handle_list_users))
        .route("/users/{user_id}", delete(handle_delete_user))
        .route("/users/{user_id}/role", post(handle_change_user_role))
        .route("/profile", post(handle_update_profile))
        .route("/admin/reset", post(handle_system_reset))
        .route("/reports/status", get(handle_status_report))
        .route("/reports/workload", get(handle_workload_report))
        .route("/reports/categories", get(handle_category_report))
        .route("/reports/volume", get(handle_volume_report))
        .route("/reports/overdue", get(handle_overdue_report))
        .route("/reports/resolution", get(handle_resolution_report))
        .route("/live", get(live::live_events_handler))
        .with_state(app_state)
}

/// Wires a store to a live broadcaster and wraps both into shared state.
fn build_app_state(mut store: DocumentStore) -> AppState {
    let live: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());

    let bridge: Arc<LiveEventBroadcaster> = Arc::clone(&live);
    store.subscribe(move |collection| {
        bridge.broadcast(&LiveEvent::CollectionChanged {
            key: collection.key().to_string(),
        });
    });

    AppState {
        store: Arc::new(Mutex::new(store)),
        live,
    }
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

    info!("Initializing Helpdesk Server");

    // Initialize the store (in-memory or file-backed based on CLI argument)
    let mut store: DocumentStore = if let Some(data_dir) = &args.data_dir {
        info!("Using data directory at: {}", data_dir);
        DocumentStore::new_with_dir(std::path::Path::new(data_dir))?
    } else {
        info!("Using in-memory store");
        DocumentStore::new_in_memory()
    };

    // Seed the default categories on first run
    seed_categories(&mut store)?;

    let app_state: AppState = build_app_state(store);

    // Periodic overdue refresh for connected clients
    live::spawn_overdue_refresh(Arc::clone(&app_state.live));

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
