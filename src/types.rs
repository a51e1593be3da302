use std::fmt;

use serde::Serialize;

/// Why a single check did not pass.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum FailureKind {
    /// A required file or directory is absent.
    MissingPath,
    /// A module could not be resolved or loaded.
    ImportFailure,
    /// The module loaded, but a later call into it raised.
    RuntimeFailure,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::MissingPath => "missing path",
            FailureKind::ImportFailure => "import failure",
            FailureKind::RuntimeFailure => "runtime failure",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub detail: String,
}

impl Failure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckResult {
    pub id: String,
    pub description: String,
    pub passed: bool,
    /// Extra information on success, e.g. the value read from settings.
    pub detail: Option<String>,
    pub failure: Option<Failure>,
    pub fix_hint: Option<String>,
}

impl CheckResult {
    pub fn pass(id: &str, description: &str, detail: Option<String>) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            passed: true,
            detail,
            failure: None,
            fix_hint: None,
        }
    }

    pub fn fail(id: &str, description: &str, failure: Failure, fix_hint: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            passed: false,
            detail: None,
            failure: Some(failure),
            fix_hint: Some(fix_hint.to_string()),
        }
    }
}

/// Results sharing one category label, kept in declaration order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckGroup {
    pub label: String,
    pub results: Vec<CheckResult>,
}

/// Logical AND over every result. An empty run is vacuously true.
pub fn verdict<'a>(results: impl IntoIterator<Item = &'a CheckResult>) -> bool {
    results.into_iter().all(|r| r.passed)
}

/// Verdict across every group of a run.
pub fn run_verdict(groups: &[CheckGroup]) -> bool {
    verdict(groups.iter().flat_map(|g| g.results.iter()))
}
