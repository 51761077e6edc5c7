use chrono::{Local, TimeZone};
use mockito::{Matcher, Mock, ServerGuard};
use rotafacil_cli::{CheckKind, CheckOutcome};
use serde_json::json;

mod common;
use common::JSON;

async fn mock_json(
    server: &mut ServerGuard,
    method: &str,
    path: &str,
    status: usize,
    body: &str,
) -> Mock {
    server
        .mock(method, path)
        .with_status(status)
        .with_header("content-type", JSON)
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_full_run_with_registration_token() {
    let mut server = mockito::Server::new_async().await;
    let health = mock_json(&mut server, "GET", "/", 200, r#"{"status":"ok"}"#).await;
    let register = mock_json(
        &mut server,
        "POST",
        "/api/v1/auth/register/aluno",
        200,
        r#"{"access_token":"abc123","user_info":{"id":1}}"#,
    )
    .await;
    let login = server
        .mock("POST", "/api/v1/auth/login")
        .expect(0)
        .create_async()
        .await;
    let me = server
        .mock("GET", "/api/v1/auth/me")
        .match_header("authorization", "Bearer abc123")
        .with_status(200)
        .with_header("content-type", JSON)
        .with_body(r#"{"nome":"Ana"}"#)
        .create_async()
        .await;
    let routes = mock_json(&mut server, "GET", "/api/v1/rotas/ativas", 200, "[1,2,3]").await;

    let mut runner = common::runner_for(&server.url());
    let report = runner.run().await;

    health.assert_async().await;
    register.assert_async().await;
    login.assert_async().await;
    me.assert_async().await;
    routes.assert_async().await;

    assert!(!report.aborted);
    assert!(report.is_success());
    assert_eq!(report.passed(), 4);
    assert_eq!(report.skipped(), 1);
    assert!(matches!(
        report.outcome(CheckKind::Login),
        Some(CheckOutcome::Skipped(_))
    ));

    let output = runner.into_console().contents();
    assert!(output.starts_with("🚀 Starting RotaFácil API integration checks\n"));
    assert!(output.contains("User ID: 1"));
    assert!(output.contains("User: Ana"));
    assert!(output.contains("Found 3 active routes"));
    assert!(output.contains("✅ Checks completed!"));
    assert!(output.contains("📊 Summary: 4 passed, 0 failed, 1 skipped"));
    assert!(!output.contains("Aborting"));
}

#[tokio::test]
async fn test_health_failure_aborts_run() {
    let mut server = mockito::Server::new_async().await;
    let health = server
        .mock("GET", "/")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;
    let mut untouched = Vec::new();
    for (method, path) in [
        ("POST", "/api/v1/auth/register/aluno"),
        ("POST", "/api/v1/auth/login"),
        ("GET", "/api/v1/auth/me"),
        ("GET", "/api/v1/rotas/ativas"),
    ] {
        untouched.push(server.mock(method, path).expect(0).create_async().await);
    }

    let mut runner = common::runner_for(&server.url());
    let report = runner.run().await;

    health.assert_async().await;
    for mock in &untouched {
        mock.assert_async().await;
    }

    assert!(report.aborted);
    assert!(!report.is_success());
    assert_eq!(report.results.len(), 1);

    let output = runner.into_console().contents();
    assert!(output.contains("❌ API Health Check Failed: HTTP 500"));
    assert!(output.contains("❌ API is not available. Aborting checks."));
    assert!(!output.contains("Checks completed"));
    assert!(!output.contains("Summary"));
}

#[tokio::test]
async fn test_unreachable_api_aborts_run() {
    let mut runner = common::runner_for(&common::refused_url());
    let report = runner.run().await;

    assert!(report.aborted);
    assert!(!report.ran(CheckKind::Register));
    assert!(runner
        .console()
        .contents()
        .ends_with("❌ API is not available. Aborting checks.\n"));
}

#[tokio::test]
async fn test_login_fallback_supplies_token() {
    let mut server = mockito::Server::new_async().await;
    mock_json(&mut server, "GET", "/", 200, r#"{"status":"ok"}"#).await;
    mock_json(
        &mut server,
        "POST",
        "/api/v1/auth/register/aluno",
        400,
        r#"{"detail":"Email já cadastrado"}"#,
    )
    .await;
    let login = mock_json(
        &mut server,
        "POST",
        "/api/v1/auth/login",
        200,
        r#"{"access_token":"login-token","user_info":{"id":"9","nome":"Teste"}}"#,
    )
    .await;
    let me = server
        .mock("GET", "/api/v1/auth/me")
        .match_header("authorization", "Bearer login-token")
        .with_status(200)
        .with_header("content-type", JSON)
        .with_body(r#"{"nome":"Teste"}"#)
        .create_async()
        .await;
    mock_json(&mut server, "GET", "/api/v1/rotas/ativas", 200, "[]").await;

    let mut runner = common::runner_for(&server.url());
    let report = runner.run().await;

    login.assert_async().await;
    me.assert_async().await;

    assert!(!report.aborted);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.outcome(CheckKind::Login), Some(&CheckOutcome::Passed));
    assert_eq!(
        report.outcome(CheckKind::Protected),
        Some(&CheckOutcome::Passed)
    );

    let output = runner.into_console().contents();
    assert!(output.contains("❌ Registration failed:"));
    assert!(output.contains("✅ Login successful!"));
    assert!(output.contains("📊 Summary: 4 passed, 1 failed, 0 skipped"));
}

#[tokio::test]
async fn test_registration_without_token_falls_back_to_login() {
    let mut server = mockito::Server::new_async().await;
    mock_json(&mut server, "GET", "/", 200, "{}").await;
    mock_json(
        &mut server,
        "POST",
        "/api/v1/auth/register/aluno",
        200,
        r#"{"user_info":{"id":5}}"#,
    )
    .await;
    let login = mock_json(
        &mut server,
        "POST",
        "/api/v1/auth/login",
        200,
        r#"{"access_token":"fallback"}"#,
    )
    .await;
    mock_json(&mut server, "GET", "/api/v1/auth/me", 200, r#"{"nome":"Ana"}"#).await;
    mock_json(&mut server, "GET", "/api/v1/rotas/ativas", 200, "[1]").await;

    let mut runner = common::runner_for(&server.url());
    let report = runner.run().await;

    login.assert_async().await;
    assert!(report.is_success());
    assert_eq!(report.passed(), 5);
}

#[tokio::test]
async fn test_no_token_skips_protected_check() {
    let mut server = mockito::Server::new_async().await;
    mock_json(&mut server, "GET", "/", 200, r#"{"status":"ok"}"#).await;
    mock_json(
        &mut server,
        "POST",
        "/api/v1/auth/register/aluno",
        422,
        r#"{"detail":"invalid"}"#,
    )
    .await;
    let login = mock_json(
        &mut server,
        "POST",
        "/api/v1/auth/login",
        401,
        r#"{"detail":"Credenciais inválidas"}"#,
    )
    .await;
    let me = server
        .mock("GET", "/api/v1/auth/me")
        .expect(0)
        .create_async()
        .await;
    let routes = mock_json(&mut server, "GET", "/api/v1/rotas/ativas", 200, "[1,2]").await;

    let mut runner = common::runner_for(&server.url());
    let report = runner.run().await;

    login.assert_async().await;
    me.assert_async().await;
    routes.assert_async().await;

    assert!(!report.aborted);
    assert!(!report.is_success());
    assert!(matches!(
        report.outcome(CheckKind::Protected),
        Some(CheckOutcome::Skipped(_))
    ));

    let output = runner.into_console().contents();
    assert!(output.contains("❌ Login failed:"));
    assert!(!output.contains("🔒"));
    assert!(output.contains("Found 2 active routes"));
    assert!(output.contains("✅ Checks completed!"));
}

#[tokio::test]
async fn test_registration_payload_is_timestamped() {
    let mut server = mockito::Server::new_async().await;
    mock_json(&mut server, "GET", "/", 200, "{}").await;
    let register = server
        .mock("POST", "/api/v1/auth/register/aluno")
        .match_body(Matcher::PartialJson(json!({
            "email": "aluno.teste.20240309140507@exemplo.com",
            "matricula": "202420240309140507"
        })))
        .with_status(200)
        .with_header("content-type", JSON)
        .with_body(r#"{"access_token":"t","user_info":{"id":3}}"#)
        .create_async()
        .await;
    mock_json(&mut server, "GET", "/api/v1/auth/me", 200, "{}").await;
    mock_json(&mut server, "GET", "/api/v1/rotas/ativas", 200, "[]").await;

    let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
    let mut runner = common::runner_for(&server.url());
    let report = runner.run_at(now).await;

    register.assert_async().await;
    assert!(report.is_success());
    // `/auth/me` without a name still passes
    assert!(runner.console().contents().contains("User: N/A"));
}

#[tokio::test]
async fn test_sections_are_separated() {
    let mut server = mockito::Server::new_async().await;
    mock_json(&mut server, "GET", "/", 200, "{}").await;
    mock_json(
        &mut server,
        "POST",
        "/api/v1/auth/register/aluno",
        200,
        r#"{"access_token":"abc"}"#,
    )
    .await;
    mock_json(&mut server, "GET", "/api/v1/auth/me", 200, "{}").await;
    mock_json(&mut server, "GET", "/api/v1/rotas/ativas", 200, "[]").await;

    let mut runner = common::runner_for(&server.url());
    runner.run().await;

    let output = runner.into_console().contents();
    let separator = "=".repeat(60);
    // start banner plus one separator before each of the five sections
    assert_eq!(output.matches(&separator).count(), 6);
}
