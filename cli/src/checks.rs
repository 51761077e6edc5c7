//! The five checks of a smoke run.
//!
//! Each check prints its own outcome and returns a `Result`; none of them
//! panics or lets an error escape unprinted, so the runner can always move
//! on to the next one.

use crate::{client::ApiClient, console::Console, error::SmokeError};
use reqwest::StatusCode;
use serde_json::Value;
use shared_types::{
    AuthResponse, LoginRequest, RegisterStudentRequest, RouteSummary, SessionToken, UserInfo,
    NOT_AVAILABLE,
};
use std::io::Write;
use tracing::{debug, warn};

const TOKEN_PREVIEW_CHARS: usize = 20;

/// How a check words its two kinds of failure
struct FailureText {
    /// Server answered with an unexpected status. `None` words it like any
    /// other error, status code included.
    rejected: Option<&'static str>,
    /// Transport or parse error
    crashed: &'static str,
}

fn report_failure<W: Write>(
    console: &mut Console<W>,
    check: &str,
    text: &FailureText,
    err: &SmokeError,
) {
    warn!("{} check failed: {}", check, err);
    match (err, text.rejected) {
        (SmokeError::Status { body, .. }, Some(rejected)) => {
            console.line(format!("❌ {rejected}: {body}"))
        }
        (other, _) => console.line(format!("❌ {}: {}", text.crashed, other)),
    }
}

/// `GET /`: the API must answer 2xx with a JSON body.
pub async fn health<W: Write>(
    client: &ApiClient,
    console: &mut Console<W>,
) -> Result<(), SmokeError> {
    let result = try_health(client, console).await;
    if let Err(ref e) = result {
        report_failure(
            console,
            "health",
            &FailureText {
                rejected: None,
                crashed: "API Health Check Failed",
            },
            e,
        );
    }
    result
}

async fn try_health<W: Write>(
    client: &ApiClient,
    console: &mut Console<W>,
) -> Result<(), SmokeError> {
    let response = client.get_root().await?;
    console.line(format!("🩺 API Health Check: {}", response.status_code()));

    if !response.status.is_success() {
        return Err(SmokeError::status(response.status, response.body));
    }

    let body: Value = response.json()?;
    console.line("✅ API is online");
    console.line(format!("Response: {body}"));
    Ok(())
}

/// Register a fresh student. `Ok(None)` means the call succeeded but no
/// token came back.
pub async fn register<W: Write>(
    client: &ApiClient,
    console: &mut Console<W>,
    payload: &RegisterStudentRequest,
) -> Result<Option<SessionToken>, SmokeError> {
    let result = try_register(client, console, payload).await;
    if let Err(ref e) = result {
        report_failure(
            console,
            "register",
            &FailureText {
                rejected: Some("Registration failed"),
                crashed: "Register Test Failed",
            },
            e,
        );
    }
    result
}

async fn try_register<W: Write>(
    client: &ApiClient,
    console: &mut Console<W>,
    payload: &RegisterStudentRequest,
) -> Result<Option<SessionToken>, SmokeError> {
    let response = client.register_student(payload).await?;
    console.line(format!("📝 Register Test: {}", response.status_code()));

    let auth: AuthResponse = response.expect_status(StatusCode::OK)?.json()?;
    console.line("✅ Registration successful!");
    console.line(format!("User ID: {}", auth.user_id()));
    Ok(auth.session_token())
}

/// Log in with the fixed test account.
pub async fn login<W: Write>(
    client: &ApiClient,
    console: &mut Console<W>,
    credentials: &LoginRequest,
) -> Result<Option<SessionToken>, SmokeError> {
    let result = try_login(client, console, credentials).await;
    if let Err(ref e) = result {
        report_failure(
            console,
            "login",
            &FailureText {
                rejected: Some("Login failed"),
                crashed: "Login Test Failed",
            },
            e,
        );
    }
    result
}

async fn try_login<W: Write>(
    client: &ApiClient,
    console: &mut Console<W>,
    credentials: &LoginRequest,
) -> Result<Option<SessionToken>, SmokeError> {
    let response = client.login(credentials).await?;
    console.line(format!("🔐 Login Test: {}", response.status_code()));

    let auth: AuthResponse = response.expect_status(StatusCode::OK)?.json()?;
    let token = auth.session_token();
    let preview = token
        .as_ref()
        .map(|t| t.prefix(TOKEN_PREVIEW_CHARS))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    console.line("✅ Login successful!");
    console.line(format!("Token: {preview}..."));
    console.line(format!("User: {}", auth.user_name()));
    Ok(token)
}

/// `GET /auth/me` with the session token. Without a token no request is
/// sent.
pub async fn protected<W: Write>(
    client: &ApiClient,
    console: &mut Console<W>,
    token: Option<&SessionToken>,
) -> Result<(), SmokeError> {
    let Some(token) = token else {
        console.line("❌ No token available for protected endpoint test");
        return Err(SmokeError::MissingToken);
    };

    let result = try_protected(client, console, token).await;
    if let Err(ref e) = result {
        report_failure(
            console,
            "protected",
            &FailureText {
                rejected: Some("Protected endpoint failed"),
                crashed: "Protected Endpoint Test Failed",
            },
            e,
        );
    }
    result
}

async fn try_protected<W: Write>(
    client: &ApiClient,
    console: &mut Console<W>,
    token: &SessionToken,
) -> Result<(), SmokeError> {
    let response = client.current_user(token).await?;
    console.line(format!(
        "🔒 Protected Endpoint Test: {}",
        response.status_code()
    ));

    let user: UserInfo = response.expect_status(StatusCode::OK)?.json()?;
    console.line("✅ Protected endpoint successful!");
    console.line(format!("User: {}", user.display_name()));
    Ok(())
}

/// List active routes and return how many there are.
pub async fn routes<W: Write>(
    client: &ApiClient,
    console: &mut Console<W>,
) -> Result<usize, SmokeError> {
    let result = try_routes(client, console).await;
    if let Err(ref e) = result {
        report_failure(
            console,
            "routes",
            &FailureText {
                rejected: Some("Routes endpoint failed"),
                crashed: "Routes Test Failed",
            },
            e,
        );
    }
    result
}

async fn try_routes<W: Write>(
    client: &ApiClient,
    console: &mut Console<W>,
) -> Result<usize, SmokeError> {
    let response = client.active_routes().await?;
    console.line(format!("🛣️ Routes Test: {}", response.status_code()));

    // A 200 whose body is not a JSON array is a parse failure
    let routes: Vec<Value> = response.expect_status(StatusCode::OK)?.json()?;
    for route in routes.iter().filter_map(RouteSummary::from_value) {
        debug!(
            "Active route {}: {} ({})",
            route.id.as_deref().unwrap_or(NOT_AVAILABLE),
            route.nome_rota.as_deref().unwrap_or(NOT_AVAILABLE),
            route.turno.as_deref().unwrap_or(NOT_AVAILABLE)
        );
    }

    console.line("✅ Routes endpoint successful!");
    console.line(format!("Found {} active routes", routes.len()));
    Ok(routes.len())
}
