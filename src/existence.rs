use std::fmt;
use std::path::Path;

use crate::types::{Failure, FailureKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::File => f.write_str("file"),
            PathKind::Directory => f.write_str("directory"),
        }
    }
}

/// Stat `rel_path` under `root`.
///
/// A file only has to exist; a directory has to exist and be a directory.
/// Absence is a normal negative result carrying the path and expected kind.
pub fn check_path(root: &Path, rel_path: &str, kind: PathKind) -> Result<(), Failure> {
    let full = root.join(rel_path);
    let present = match kind {
        PathKind::File => full.exists(),
        PathKind::Directory => full.is_dir(),
    };
    if present {
        Ok(())
    } else {
        Err(Failure::new(
            FailureKind::MissingPath,
            format!("{rel_path} ({kind} NOT FOUND)"),
        ))
    }
}
