//! Structural validation: required files and directories, then one
//! configuration load.

use crate::check::{run_groups, Check, CheckContext, GroupSpec, Probe};
use crate::existence::PathKind;
use crate::import::ImportTarget;
use crate::lang::Lang;
use crate::report::{self, RunReport};
use crate::types::run_verdict;

struct PathSpec {
    id: &'static str,
    path: &'static str,
    description: &'static str,
    fix_hint: &'static str,
}

const REQUIRED_FILES: &[PathSpec] = &[
    PathSpec {
        id: "backend-main",
        path: "backend/src/main.py",
        description: "Backend main application",
        fix_hint: "Create the backend entry point at backend/src/main.py",
    },
    PathSpec {
        id: "backend-config",
        path: "backend/src/config.py",
        description: "Backend configuration",
        fix_hint: "Create backend/src/config.py exposing get_settings()",
    },
    PathSpec {
        id: "backend-deps",
        path: "backend/requirements.txt",
        description: "Backend dependencies",
        fix_hint: "Add backend/requirements.txt listing the backend's Python packages",
    },
    PathSpec {
        id: "alembic-config",
        path: "backend/alembic.ini",
        description: "Database migrations config",
        fix_hint: "Initialise migrations: cd backend && alembic init alembic",
    },
    PathSpec {
        id: "frontend-deps",
        path: "frontend/package.json",
        description: "Frontend dependencies",
        fix_hint: "Initialise the frontend: cd frontend && npm init",
    },
    PathSpec {
        id: "compose",
        path: "docker-compose.yml",
        description: "Docker composition",
        fix_hint: "Add docker-compose.yml describing the backend, frontend, database and cache services",
    },
    PathSpec {
        id: "env-template",
        path: ".env.example",
        description: "Environment template",
        fix_hint: "Add .env.example listing every variable the backend reads",
    },
];

const REQUIRED_DIRS: &[PathSpec] = &[
    PathSpec {
        id: "api-dir",
        path: "backend/src/api",
        description: "API routes directory",
        fix_hint: "mkdir -p backend/src/api",
    },
    PathSpec {
        id: "models-dir",
        path: "backend/src/models",
        description: "Database models directory",
        fix_hint: "mkdir -p backend/src/models",
    },
    PathSpec {
        id: "services-dir",
        path: "backend/src/services",
        description: "Business logic directory",
        fix_hint: "mkdir -p backend/src/services",
    },
    PathSpec {
        id: "tests-dir",
        path: "backend/tests",
        description: "Backend tests directory",
        fix_hint: "mkdir -p backend/tests",
    },
    PathSpec {
        id: "frontend-src",
        path: "frontend/src",
        description: "Frontend source directory",
        fix_hint: "mkdir -p frontend/src",
    },
    PathSpec {
        id: "migration-versions",
        path: "backend/alembic/versions",
        description: "Migration versions",
        fix_hint: "mkdir -p backend/alembic/versions",
    },
];

pub const SETTINGS_TARGET: ImportTarget = ImportTarget {
    module: "src.config",
    symbol: "get_settings",
    read_attribute: Some("app_name"),
};

fn path_checks(specs: &[PathSpec], kind: PathKind) -> Vec<Check> {
    specs
        .iter()
        .map(|s| Check {
            id: s.id,
            description: s.description,
            probe: Probe::Exists { path: s.path, kind },
            fix_hint: s.fix_hint,
        })
        .collect()
}

/// The validator's groups, in report order.
pub fn validation_groups() -> Vec<GroupSpec> {
    vec![
        GroupSpec {
            label: "Project Structure",
            checks: path_checks(REQUIRED_FILES, PathKind::File),
        },
        GroupSpec {
            label: "Directory Structure",
            checks: path_checks(REQUIRED_DIRS, PathKind::Directory),
        },
        GroupSpec {
            label: "Backend Configuration",
            checks: vec![Check {
                id: "config-load",
                description: "Configuration loaded",
                probe: Probe::Import {
                    target: SETTINGS_TARGET,
                    value_label: Some("App name"),
                },
                fix_hint: "Install backend dependencies (pip install -r backend/requirements.txt) and make sure get_settings() succeeds",
            }],
        },
    ]
}

const NEXT_STEPS: &[&str] = &[
    "Copy .env.example to .env and configure your settings",
    "Start services: docker-compose up -d",
    "Run database migrations: alembic upgrade head",
    "Access the application:\n   - Frontend: http://localhost:3000\n   - Backend API: http://localhost:8000/docs",
];

/// 0 when every check passed, 1 otherwise.
pub fn exit_status(passed: bool) -> i32 {
    if passed { 0 } else { 1 }
}

/// Run the structural validation and print its report.
pub fn run_validate(ctx: &CheckContext<'_>, json: bool) -> i32 {
    let groups = run_groups(&validation_groups(), ctx);
    let passed = run_verdict(&groups);

    if json {
        report::print_json(&RunReport::new("validate", &groups));
        return exit_status(passed);
    }

    println!("Stack Setup Validation");
    println!("{}", report::rule('='));
    for (i, group) in groups.iter().enumerate() {
        report::print_group(&format!("{}. {}:", i + 1, group.label), group, Lang::En);
    }

    println!("\n{}", report::rule('='));
    if passed {
        report::success_banner("✅ All validations passed! Setup is complete.");
        println!("\nNext steps:");
        for (i, step) in NEXT_STEPS.iter().enumerate() {
            println!("{}. {}", i + 1, step);
        }
    } else {
        report::failure_banner("❌ Some validations failed. Please check the issues above.");
    }

    exit_status(passed)
}


#[cfg(test)]
mod tests {
    use super::fixtures::complete_tree;
    use super::*;
    use crate::check::testing::StubLoader;
    use crate::types::{verdict, CheckGroup, Failure, FailureKind};

    fn run(root: &std::path::Path, loader: &StubLoader) -> Vec<CheckGroup> {
        let ctx = CheckContext { root, loader, show_progress: false };
        run_groups(&validation_groups(), &ctx)
    }

    fn failed_ids(groups: &[CheckGroup]) -> Vec<String> {
        groups
            .iter()
            .flat_map(|g| g.results.iter())
            .filter(|r| !r.passed)
            .map(|r| r.id.clone())
            .collect()
    }

    fn loadable() -> StubLoader {
        StubLoader::default().with("src.config", Ok(Some("PCM".to_string())))
    }

    #[test]
    fn test_declared_path_set() {
        let groups = validation_groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].checks.len(), 7);
        assert_eq!(groups[1].checks.len(), 6);
        assert_eq!(groups[2].checks.len(), 1);
        assert_eq!(groups[0].label, "Project Structure");
        assert_eq!(groups[1].label, "Directory Structure");
        assert_eq!(groups[2].label, "Backend Configuration");
    }

    #[test]
    fn test_complete_project_passes() {
        let dir = tempfile::tempdir().unwrap();
        complete_tree(dir.path());
        let groups = run(dir.path(), &loadable());
        assert!(run_verdict(&groups));
        assert_eq!(
            groups[2].results[0].detail.as_deref(),
            Some("App name: PCM")
        );
        let loader = loadable();
        let ctx = CheckContext { root: dir.path(), loader: &loader, show_progress: false };
        assert_eq!(run_validate(&ctx, true), 0);
    }

    #[test]
    fn test_missing_requirements_is_the_only_failure() {
        let dir = tempfile::tempdir().unwrap();
        complete_tree(dir.path());
        std::fs::remove_file(dir.path().join("backend/requirements.txt")).unwrap();

        let groups = run(dir.path(), &loadable());
        assert_eq!(failed_ids(&groups), ["backend-deps"]);
        let failure = groups[0].results[2].failure.clone().unwrap();
        assert_eq!(failure.kind, FailureKind::MissingPath);
        assert!(failure.detail.contains("backend/requirements.txt"));
        assert_eq!(exit_status(run_verdict(&groups)), 1);
    }

    #[test]
    fn test_each_missing_path_fails_only_its_check() {
        for spec in REQUIRED_FILES.iter().chain(REQUIRED_DIRS) {
            let dir = tempfile::tempdir().unwrap();
            complete_tree(dir.path());
            let target = dir.path().join(spec.path);
            if target.is_dir() {
                std::fs::remove_dir_all(&target).unwrap();
            } else {
                std::fs::remove_file(&target).unwrap();
            }

            let groups = run(dir.path(), &loadable());
            let failed = failed_ids(&groups);
            // Removing a directory also removes anything declared beneath it.
            assert!(failed.contains(&spec.id.to_string()), "{} should fail", spec.id);
            for id in &failed {
                let other = REQUIRED_FILES
                    .iter()
                    .chain(REQUIRED_DIRS)
                    .find(|s| s.id == id.as_str())
                    .unwrap();
                assert!(
                    other.path.starts_with(spec.path),
                    "{} failed after removing {}",
                    id,
                    spec.path
                );
            }
            assert!(!run_verdict(&groups));
        }
    }

    #[test]
    fn test_settings_error_fails_only_configuration() {
        let dir = tempfile::tempdir().unwrap();
        complete_tree(dir.path());
        let loader = StubLoader::default().with(
            "src.config",
            Err(Failure::new(FailureKind::RuntimeFailure, "ValidationError: secret_key missing")),
        );

        let groups = run(dir.path(), &loader);
        assert!(verdict(&groups[0].results));
        assert!(verdict(&groups[1].results));
        assert_eq!(failed_ids(&groups), ["config-load"]);
        assert_eq!(
            groups[2].results[0].failure.as_ref().unwrap().kind,
            FailureKind::RuntimeFailure
        );
    }

    #[test]
    fn test_configuration_is_probed_even_when_paths_are_missing() {
        let dir = tempfile::tempdir().unwrap();
        let loader = loadable();
        let groups = run(dir.path(), &loader);
        assert_eq!(failed_ids(&groups).len(), 13);
        assert!(verdict(&groups[2].results));
        assert_eq!(*loader.calls.borrow(), ["src.config"]);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        complete_tree(dir.path());
        std::fs::remove_dir_all(dir.path().join("backend/tests")).unwrap();
        let loader = loadable();
        assert_eq!(run(dir.path(), &loader), run(dir.path(), &loader));
    }
}
