use std::path::Path;

use crate::existence::{check_path, PathKind};
use crate::import::{ImportTarget, ModuleLoader};
use crate::progress::{finish_spinner, stage_spinner};
use crate::types::{CheckGroup, CheckResult};

/// What a check looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Exists {
        path: &'static str,
        kind: PathKind,
    },
    Import {
        target: ImportTarget,
        /// Label for the value read from the module, e.g. "App name".
        value_label: Option<&'static str>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub id: &'static str,
    pub description: &'static str,
    pub probe: Probe,
    pub fix_hint: &'static str,
}

/// An ordered list of checks sharing a category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    pub label: &'static str,
    pub checks: Vec<Check>,
}

/// Everything a check needs from the outside world.
pub struct CheckContext<'a> {
    pub root: &'a Path,
    pub loader: &'a dyn ModuleLoader,
    /// Draw a spinner on stderr while each check runs.
    pub show_progress: bool,
}

/// Run one check. Failures of any kind come back as a failed result.
pub fn run_one(check: &Check, ctx: &CheckContext<'_>) -> CheckResult {
    let outcome = match check.probe {
        Probe::Exists { path, kind } => check_path(ctx.root, path, kind).map(|()| Some(path.to_string())),
        Probe::Import { target, value_label } => ctx.loader.load(&target).map(|value| {
            match (value_label, value) {
                (Some(label), Some(value)) => Some(format!("{label}: {value}")),
                (None, Some(value)) => Some(value),
                (_, None) => None,
            }
        }),
    };

    match outcome {
        Ok(detail) => CheckResult::pass(check.id, check.description, detail),
        Err(failure) => CheckResult::fail(check.id, check.description, failure, check.fix_hint),
    }
}

/// Run every check of every group in declaration order. No check gates
/// another, so a run always reports every failure at once.
pub fn run_groups(groups: &[GroupSpec], ctx: &CheckContext<'_>) -> Vec<CheckGroup> {
    groups
        .iter()
        .map(|group| {
            let results = group
                .checks
                .iter()
                .map(|check| {
                    if ctx.show_progress {
                        let pb = stage_spinner(&format!("Checking {}...", check.description));
                        let result = run_one(check, ctx);
                        finish_spinner(&pb);
                        result
                    } else {
                        run_one(check, ctx)
                    }
                })
                .collect();
            CheckGroup {
                label: group.label.to_string(),
                results,
            }
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::testing::StubLoader;
    use super::*;
    use crate::types::{Failure, FailureKind};

    fn exists(id: &'static str, path: &'static str, kind: PathKind) -> Check {
        Check {
            id,
            description: id,
            probe: Probe::Exists { path, kind },
            fix_hint: "create it",
        }
    }

    fn import(id: &'static str, module: &'static str, value_label: Option<&'static str>) -> Check {
        Check {
            id,
            description: id,
            probe: Probe::Import {
                target: ImportTarget {
                    module,
                    symbol: "router",
                    read_attribute: None,
                },
                value_label,
            },
            fix_hint: "fix the module",
        }
    }

    #[test]
    fn test_exists_pass_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        let loader = StubLoader::default();
        let ctx = CheckContext { root: dir.path(), loader: &loader, show_progress: false };

        let result = run_one(&exists("a", "a.txt", PathKind::File), &ctx);
        assert!(result.passed);
        assert_eq!(result.detail.as_deref(), Some("a.txt"));
        assert!(result.fix_hint.is_none());
    }

    #[test]
    fn test_import_failure_carries_hint_and_kind() {
        let dir = tempfile::tempdir().unwrap();
        let loader = StubLoader::default().with(
            "m",
            Err(Failure::new(FailureKind::ImportFailure, "ModuleNotFoundError: m")),
        );
        let ctx = CheckContext { root: dir.path(), loader: &loader, show_progress: false };

        let result = run_one(&import("m", "m", None), &ctx);
        assert!(!result.passed);
        assert_eq!(result.failure.unwrap().kind, FailureKind::ImportFailure);
        assert_eq!(result.fix_hint.as_deref(), Some("fix the module"));
    }

    #[test]
    fn test_import_value_is_labelled() {
        let dir = tempfile::tempdir().unwrap();
        let loader = StubLoader::default().with("cfg", Ok(Some("PCM".to_string())));
        let ctx = CheckContext { root: dir.path(), loader: &loader, show_progress: false };

        let result = run_one(&import("cfg", "cfg", Some("App name")), &ctx);
        assert_eq!(result.detail.as_deref(), Some("App name: PCM"));
    }

    #[test]
    fn test_run_groups_keeps_order_and_runs_every_check() {
        let dir = tempfile::tempdir().unwrap();
        let loader = StubLoader::default()
            .with("first", Err(Failure::new(FailureKind::RuntimeFailure, "boom")))
            .with("third", Err(Failure::new(FailureKind::ImportFailure, "gone")));
        let ctx = CheckContext { root: dir.path(), loader: &loader, show_progress: false };

        let groups = vec![
            GroupSpec {
                label: "Paths",
                checks: vec![exists("missing", "nope", PathKind::Directory)],
            },
            GroupSpec {
                label: "Modules",
                checks: vec![
                    import("first", "first", None),
                    import("second", "second", None),
                    import("third", "third", None),
                ],
            },
        ];

        let results = run_groups(&groups, &ctx);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "Paths");
        let ids: Vec<_> = results[1].results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
        let passed: Vec<_> = results[1].results.iter().map(|r| r.passed).collect();
        assert_eq!(passed, [false, true, false]);
        assert_eq!(*loader.calls.borrow(), ["first", "second", "third"]);
    }
}
