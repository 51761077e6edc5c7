use crate::error::SmokeError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Health,
    Register,
    Login,
    Protected,
    Routes,
}

impl CheckKind {
    pub fn label(&self) -> &'static str {
        match self {
            CheckKind::Health => "health",
            CheckKind::Register => "register",
            CheckKind::Login => "login",
            CheckKind::Protected => "protected",
            CheckKind::Routes => "routes",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub check: CheckKind,
    pub outcome: CheckOutcome,
}

/// Per-check outcomes of one run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub results: Vec<CheckResult>,
    pub aborted: bool,
}

impl RunReport {
    pub fn record<T>(&mut self, check: CheckKind, result: &Result<T, SmokeError>) {
        match result {
            Ok(_) => self.pass(check),
            Err(e) => self.fail(check, e.to_string()),
        }
    }

    pub fn pass(&mut self, check: CheckKind) {
        self.push(check, CheckOutcome::Passed);
    }

    pub fn fail(&mut self, check: CheckKind, reason: impl Into<String>) {
        self.push(check, CheckOutcome::Failed(reason.into()));
    }

    pub fn skip(&mut self, check: CheckKind, reason: impl Into<String>) {
        self.push(check, CheckOutcome::Skipped(reason.into()));
    }

    pub fn abort(&mut self) {
        self.aborted = true;
    }

    fn push(&mut self, check: CheckKind, outcome: CheckOutcome) {
        self.results.push(CheckResult { check, outcome });
    }

    pub fn outcome(&self, check: CheckKind) -> Option<&CheckOutcome> {
        self.results
            .iter()
            .find(|r| r.check == check)
            .map(|r| &r.outcome)
    }

    pub fn ran(&self, check: CheckKind) -> bool {
        matches!(
            self.outcome(check),
            Some(CheckOutcome::Passed) | Some(CheckOutcome::Failed(_))
        )
    }

    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, CheckOutcome::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CheckOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, CheckOutcome::Skipped(_)))
    }

    fn count(&self, pred: impl Fn(&CheckOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    /// Skips do not count against the run
    pub fn is_success(&self) -> bool {
        !self.aborted && self.failed() == 0
    }

    pub fn summary_line(&self) -> String {
        format!(
            "📊 Summary: {} passed, {} failed, {} skipped",
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }
}
