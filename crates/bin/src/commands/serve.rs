//! Serve command - runs the chatbox web server.

use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, CookieManagerLayer, Cookies};
use tracing_subscriber::EnvFilter;

use chatbox::{ChatSession, RenderNode, TranscriptController};

use crate::cli::ServeArgs;
use crate::session::{SessionHandle, SessionStore, sweep_expired};

const SESSION_COOKIE: &str = "chatbox_session";

/// Log directives used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "chatbox=info,chatbox_bin=info";

/// Longest gap between idle-session sweeps
const SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Shared application state
#[derive(Clone)]
struct AppState {
    sessions: SessionStore,
}

/// Chat form data
#[derive(Deserialize)]
struct SendForm {
    message: Option<String>,
}

/// JSON submission body
#[derive(Deserialize)]
struct SubmitRequest {
    message: Option<String>,
}

/// JSON view of a session's transcript
#[derive(Debug, Serialize)]
struct TranscriptView {
    status: Option<String>,
    pending: bool,
    nodes: Vec<RenderNode>,
}

impl From<&ChatSession> for TranscriptView {
    fn from(session: &ChatSession) -> Self {
        Self {
            status: session.status().map(str::to_string),
            pending: session.is_pending(),
            nodes: session.render(),
        }
    }
}

/// Run the chatbox server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref())?)
        .init();

    let controller = TranscriptController::new().with_plot_trigger(args.plot_trigger.clone());
    tracing::info!("Plot trigger: {:?}", controller.plot_trigger());

    let idle_ttl = Duration::from_secs(args.session_ttl);
    let sessions = SessionStore::new(controller).with_limits(idle_ttl, args.max_sessions);
    tracing::info!(
        "Sessions expire after {}s idle, at most {} live",
        args.session_ttl,
        args.max_sessions
    );
    tokio::spawn(sweep_expired(sessions.clone(), idle_ttl.min(SWEEP_PERIOD)));

    let app = router(sessions);

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    // Print startup message
    println!("Chatbox server started");
    println!();
    println!("Web Interface: http://localhost:{}", local_addr.port());
    println!();
    println!("Available endpoints:");
    println!("  GET  /                - Chat page");
    println!("  POST /send            - Submit a message (form)");
    println!("  POST /reset           - Start a new chat");
    println!("  GET  /api/transcript  - Current transcript (JSON)");
    println!("  POST /api/submit      - Submit a message (JSON)");
    println!("  GET  /health          - Health check");
    println!("  GET  /stats           - Server statistics");
    println!();
    println!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("Server shut down");
    Ok(())
}

/// Log filter from `RUST_LOG`, or the crate defaults when it is unset
fn log_filter(directives: Option<&str>) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    match directives {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(DEFAULT_LOG_FILTER),
    }
}

/// Build the application router
fn router(sessions: SessionStore) -> Router {
    Router::new()
        .route("/", get(handle_chat_page))
        .route("/send", post(handle_send))
        .route("/reset", post(handle_reset))
        .route("/api/transcript", get(handle_transcript))
        .route("/api/submit", post(handle_api_submit))
        .route("/health", get(handle_health_endpoint))
        .route("/stats", get(handle_stats_request))
        .layer(CookieManagerLayer::new())
        .with_state(AppState { sessions })
}

/// Resolve when SIGINT or SIGTERM arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to set up SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
        _ = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}

/// Look up the caller's session without creating one
async fn existing_session(state: &AppState, cookies: &Cookies) -> Option<SessionHandle> {
    let cookie = cookies.get(SESSION_COOKIE)?;
    state.sessions.get_session(cookie.value()).await
}

/// Look up the caller's session, creating one (and its cookie) if needed
async fn session_for(state: &AppState, cookies: &Cookies) -> SessionHandle {
    let existing = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let (token, session) = state.sessions.get_or_create(existing.as_deref()).await;

    if existing.as_deref() != Some(token.as_str()) {
        let mut cookie = Cookie::new(SESSION_COOKIE, token);
        cookie.set_http_only(true);
        cookie.set_path("/");
        cookies.add(cookie);
    }
    session
}

/// Run one request against `session`
///
/// The session is locked only to begin and complete the request, so a
/// concurrent submission observes the pending flag instead of queueing.
async fn run_submission(session: &SessionHandle, message: &str) -> chatbox::Result<()> {
    let (request, controller) = {
        let mut session = session.lock().await;
        (session.begin_request()?, session.controller().clone())
    };

    let outcome = controller.submit(request.snapshot(), message);

    let mut session = session.lock().await;
    session.complete_request(request, outcome)?;
    Ok(())
}

/// HTTP status for the outcome of an API submission
fn submission_status(outcome: &chatbox::Result<()>) -> StatusCode {
    match outcome {
        Ok(()) => StatusCode::OK,
        Err(e) if e.is_conflict() => StatusCode::CONFLICT,
        Err(e) if e.is_validation_error() => StatusCode::UNPROCESSABLE_ENTITY,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Run an API submission and describe the session afterwards
async fn api_submission(session: &SessionHandle, message: &str) -> (StatusCode, TranscriptView) {
    let outcome = run_submission(session, message).await;
    let status = submission_status(&outcome);
    if let Err(e) = &outcome {
        tracing::info!(%status, "API submission not applied: {e}");
    }

    let view = TranscriptView::from(&*session.lock().await);
    (status, view)
}

// ============================================================================
// Page Handlers
// ============================================================================

/// Handler for GET / - Show the chat page
async fn handle_chat_page(State(state): State<AppState>, cookies: Cookies) -> Html<String> {
    let Some(session) = existing_session(&state, &cookies).await else {
        return Html(crate::templates::chat_page(&[], None, false));
    };
    let session = session.lock().await;
    Html(crate::templates::chat_page(
        &session.render(),
        session.status(),
        session.is_pending(),
    ))
}

/// Handler for POST /send - Submit a message from the chat form
async fn handle_send(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<SendForm>,
) -> Redirect {
    let session = session_for(&state, &cookies).await;
    let message = form.message.unwrap_or_default();

    if let Err(e) = run_submission(&session, &message).await {
        tracing::info!("Form submission not applied: {e}");
    }
    Redirect::to("/")
}

/// Handler for POST /reset - Drop the session and start over
async fn handle_reset(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        state.sessions.destroy_session(cookie.value()).await;
        cookies.remove(Cookie::from(SESSION_COOKIE));
    }
    Redirect::to("/")
}

// ============================================================================
// JSON API Handlers
// ============================================================================

/// Handler for GET /api/transcript - Current session as JSON
async fn handle_transcript(State(state): State<AppState>, cookies: Cookies) -> Json<TranscriptView> {
    let view = match existing_session(&state, &cookies).await {
        Some(session) => {
            let session = session.lock().await;
            TranscriptView::from(&*session)
        }
        None => TranscriptView::from(&ChatSession::new()),
    };
    Json(view)
}

/// Handler for POST /api/submit - Submit a message as JSON
async fn handle_api_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(request): Json<SubmitRequest>,
) -> Response {
    let session = session_for(&state, &cookies).await;
    let message = request.message.unwrap_or_default();

    let (status, view) = api_submission(&session, &message).await;
    (status, Json(view)).into_response()
}

// ============================================================================
// Health and Stats Handlers
// ============================================================================

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    sessions: usize,
}

/// Handler for GET /health - Health check endpoint
async fn handle_health_endpoint(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        sessions: state.sessions.session_count().await,
    })
}

/// Handler for GET /stats - Statistics page
async fn handle_stats_request(State(state): State<AppState>) -> Html<String> {
    let session_count = state.sessions.session_count().await;
    Html(crate::templates::stats_page(session_count))
}
