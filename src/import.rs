//! Dynamic import probe.
//!
//! Backend modules are loaded by the backend's own interpreter in a child
//! process. The child catches every exception itself and reports the outcome
//! through its exit code, so nothing escapes the check that asked for it.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::exec::{run_cmd_in, ExecResult};
use crate::types::{Failure, FailureKind};

/// A module to load, the symbol it must expose, and optionally an attribute to
/// read from the value returned by calling that symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTarget {
    pub module: &'static str,
    pub symbol: &'static str,
    pub read_attribute: Option<&'static str>,
}

impl ImportTarget {
    pub fn display_name(&self) -> String {
        match self.read_attribute {
            Some(attr) => format!("{}.{}().{}", self.module, self.symbol, attr),
            None => format!("{}.{}", self.module, self.symbol),
        }
    }
}

/// Success carries the attribute value when one was read.
pub type ImportOutcome = Result<Option<String>, Failure>;

pub trait ModuleLoader {
    fn load(&self, target: &ImportTarget) -> ImportOutcome;
}

const EXIT_IMPORT: i32 = 3;
const EXIT_RUNTIME: i32 = 4;

/// argv: backend_dir module symbol [attribute]
const PROBE_PROGRAM: &str = r#"import importlib, sys

def fail(code, exc):
    print(f"{type(exc).__name__}: {exc}", file=sys.stderr)
    sys.exit(code)

sys.path.insert(0, sys.argv[1])
try:
    module = importlib.import_module(sys.argv[2])
except ImportError as exc:
    fail(3, exc)
except Exception as exc:
    fail(4, exc)
if not hasattr(module, sys.argv[3]):
    fail(3, ImportError(f"cannot import name {sys.argv[3]!r} from {sys.argv[2]!r}"))
if len(sys.argv) > 4:
    try:
        text = str(getattr(getattr(module, sys.argv[3])(), sys.argv[4]))
    except Exception as exc:
        fail(4, exc)
    print(text)
"#;

/// Loads modules with an external Python interpreter.
pub struct PythonLoader {
    interpreter: Result<PathBuf, String>,
    root: PathBuf,
    backend_dir: PathBuf,
    verbose: bool,
}

impl PythonLoader {
    /// `interpreter` may be a bare name looked up on PATH or a path, which is
    /// resolved against `root` when relative. Resolution failure is not an
    /// error here; every load then reports it as an import failure.
    pub fn new(interpreter: &str, root: &Path, backend_dir: &Path, verbose: bool) -> Self {
        let resolved = which::which_in(interpreter, std::env::var_os("PATH"), root)
            .map_err(|e| format!("interpreter '{interpreter}' not found: {e}"));
        if verbose {
            match &resolved {
                Ok(path) => eprintln!("  interpreter: {}", path.display()),
                Err(e) => eprintln!("  {e}"),
            }
        }
        Self {
            interpreter: resolved,
            root: root.to_path_buf(),
            backend_dir: backend_dir.to_path_buf(),
            verbose,
        }
    }
}

impl ModuleLoader for PythonLoader {
    fn load(&self, target: &ImportTarget) -> ImportOutcome {
        let interpreter = self
            .interpreter
            .as_ref()
            .map_err(|e| Failure::new(FailureKind::ImportFailure, e.clone()))?;

        let backend_dir = self.backend_dir.to_string_lossy();
        let mut args = vec!["-c", PROBE_PROGRAM, &*backend_dir, target.module, target.symbol];
        if let Some(attr) = target.read_attribute {
            args.push(attr);
        }

        if self.verbose {
            eprintln!(
                "  probing {} with {} (cwd {})",
                target.display_name(),
                interpreter.display(),
                self.root.display()
            );
        }

        let exec = run_cmd_in(interpreter, &args, &self.root)
            .map_err(|e| Failure::new(FailureKind::ImportFailure, format!("{e:#}")))?;

        if self.verbose {
            eprintln!(
                "  {} exited {} after {:?}",
                target.display_name(),
                exec.exit_code,
                exec.duration
            );
        }

        classify(&exec, target.read_attribute.is_some())
    }
}

/// Map the probe child's exit status onto an outcome.
///
/// Exit codes the probe program does not produce itself (interpreter crashes,
/// `SystemExit` raised during import) are treated as the module failing to load.
pub fn classify(exec: &ExecResult, read_attribute: bool) -> ImportOutcome {
    match exec.exit_code {
        0 if read_attribute => Ok(last_line(&exec.stdout).map(str::to_string)),
        0 => Ok(None),
        EXIT_IMPORT => Err(Failure::new(FailureKind::ImportFailure, error_line(exec))),
        EXIT_RUNTIME => Err(Failure::new(FailureKind::RuntimeFailure, error_line(exec))),
        _ => Err(Failure::new(FailureKind::ImportFailure, error_line(exec))),
    }
}

static EXCEPTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([A-Za-z_][\w.]*(?:Error|Exception|Exit)\b.*)$").expect("Invalid regex")
});

/// The most specific error text available in the child's stderr.
fn error_line(exec: &ExecResult) -> String {
    let exception = EXCEPTION_LINE
        .captures_iter(&exec.stderr)
        .last()
        .map(|c| c[1].trim().to_string());
    if let Some(line) = exception {
        return line;
    }
    last_line(&exec.stderr)
        .map(str::to_string)
        .unwrap_or_else(|| format!("exited with code {}", exec.exit_code))
}

/// Modules may print while importing; the probe's own output comes last.
fn last_line(text: &str) -> Option<&str> {
    text.lines().rev().map(str::trim).find(|l| !l.is_empty())
}
