mod check;
mod cli;
mod config;
mod exec;
mod existence;
mod import;
mod lang;
mod progress;
mod report;
mod startup;
mod types;
mod validate;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};

use crate::check::CheckContext;
use crate::import::PythonLoader;

fn main() {
    let cli = Cli::parse();

    let root = match resolve_root(&cli.root) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    };

    let cfg = match config::resolve_config(&root, cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    };
    let interpreter = cli.python.clone().unwrap_or(cfg.interpreter);

    if cli.verbose {
        eprintln!("  project root: {}", root.display());
        eprintln!("  backend dir: {}", cfg.backend_dir.display());
    }

    let loader = PythonLoader::new(&interpreter, &root, &cfg.backend_dir, cli.verbose);
    let ctx = CheckContext {
        root: &root,
        loader: &loader,
        show_progress: cli.show_progress(),
    };

    match cli.command {
        Commands::Validate => {
            std::process::exit(validate::run_validate(&ctx, cli.json));
        }
        Commands::Probe { lang, strict } => {
            let passed = startup::run_probe(&ctx, lang, cli.json);
            if strict && !passed {
                std::process::exit(1);
            }
        }
    }
}

/// The project root every check is resolved against.
fn resolve_root(root: &std::path::Path) -> anyhow::Result<PathBuf> {
    let resolved = std::fs::canonicalize(root)
        .with_context(|| format!("Project root not found: {}", root.display()))?;
    if !resolved.is_dir() {
        anyhow::bail!("Project root is not a directory: {}", resolved.display());
    }
    Ok(resolved)
}
