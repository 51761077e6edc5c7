use crate::{
    checks,
    client::ApiClient,
    config::{SmokeConfig, StudentConfig},
    console::Console,
    report::{CheckKind, RunReport},
};
use chrono::{DateTime, Local};
use shared_types::LoginRequest;
use std::io::Write;
use tracing::{error, info};

/// Runs the checks in their fixed order against one API.
pub struct SmokeRunner<W: Write> {
    client: ApiClient,
    console: Console<W>,
    credentials: LoginRequest,
    student: StudentConfig,
}

impl<W: Write> SmokeRunner<W> {
    pub fn new(client: ApiClient, console: Console<W>, config: &SmokeConfig) -> Self {
        Self {
            client,
            console,
            credentials: config.login_request(),
            student: config.student.clone(),
        }
    }

    pub fn console(&self) -> &Console<W> {
        &self.console
    }

    pub fn into_console(self) -> Console<W> {
        self.console
    }

    pub async fn run(&mut self) -> RunReport {
        self.run_at(Local::now()).await
    }

    /// Run with `now` as the registration timestamp
    pub async fn run_at(&mut self, now: DateTime<Local>) -> RunReport {
        let mut report = RunReport::default();
        info!("Starting smoke run against {}", self.client.base_url());

        self.console.line("🚀 Starting RotaFácil API integration checks");
        self.console.separator();

        let health = checks::health(&self.client, &mut self.console).await;
        report.record(CheckKind::Health, &health);
        if health.is_err() {
            error!("API at {} is not available, aborting", self.client.base_url());
            self.console.line("❌ API is not available. Aborting checks.");
            self.console.flush();
            report.abort();
            return report;
        }

        self.console.section();

        let payload = self.student.payload_at(now);
        let registered = checks::register(&self.client, &mut self.console, &payload).await;
        report.record(CheckKind::Register, &registered);
        let mut token = registered.ok().flatten();

        self.console.section();

        if token.is_none() {
            let logged_in =
                checks::login(&self.client, &mut self.console, &self.credentials).await;
            report.record(CheckKind::Login, &logged_in);
            token = logged_in.ok().flatten();
        } else {
            report.skip(CheckKind::Login, "registration issued a token");
        }

        self.console.section();

        match token.as_ref() {
            Some(token) => {
                let protected =
                    checks::protected(&self.client, &mut self.console, Some(token)).await;
                report.record(CheckKind::Protected, &protected);
            }
            None => report.skip(CheckKind::Protected, "no session token"),
        }

        self.console.section();

        let routes = checks::routes(&self.client, &mut self.console).await;
        report.record(CheckKind::Routes, &routes);

        self.console.section();
        self.console.line("✅ Checks completed!");
        self.console.blank();
        self.console.line("📱 The Android app can now be tested against this API!");
        self.console.line(report.summary_line());
        self.console.flush();

        info!(
            "Smoke run finished: {} passed, {} failed, {} skipped",
            report.passed(),
            report.failed(),
            report.skipped()
        );
        report
    }
}
