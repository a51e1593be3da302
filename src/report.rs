use console::Style;
use serde::Serialize;

use crate::lang::{Lang, Text};
use crate::types::{run_verdict, CheckGroup, CheckResult, FailureKind};

/// Machine-readable form of a whole run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub flow: &'a str,
    pub groups: &'a [CheckGroup],
    pub passed: bool,
}

impl<'a> RunReport<'a> {
    pub fn new(flow: &'a str, groups: &'a [CheckGroup]) -> Self {
        Self {
            flow,
            groups,
            passed: run_verdict(groups),
        }
    }
}

pub fn print_json(report: &RunReport<'_>) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing JSON: {e}"),
    }
}

const HINT: Text = Text::new("hint", "提示");

pub fn kind_label(kind: FailureKind, lang: Lang) -> &'static str {
    match kind {
        FailureKind::MissingPath => Text::new("missing path", "路徑不存在"),
        FailureKind::ImportFailure => Text::new("import failure", "導入失敗"),
        FailureKind::RuntimeFailure => Text::new("runtime failure", "執行錯誤"),
    }
    .get(lang)
}

/// One status line for a check, without colour.
///
/// A failure always names the missing path or the captured error text.
pub fn format_result(r: &CheckResult, lang: Lang) -> String {
    if r.passed {
        match &r.detail {
            Some(detail) => format!("✓ {}: {}", r.description, detail),
            None => format!("✓ {}", r.description),
        }
    } else {
        match &r.failure {
            Some(f) if f.kind == FailureKind::MissingPath => {
                format!("✗ {}: {}", r.description, f.detail)
            }
            Some(f) => format!("✗ {}: {} [{}]", r.description, f.detail, kind_label(f.kind, lang)),
            None => format!("✗ {}", r.description),
        }
    }
}

pub fn print_result(r: &CheckResult, lang: Lang) {
    let green = Style::new().green();
    let red = Style::new().red();

    let line = format_result(r, lang);
    if r.passed {
        println!("{}", green.apply_to(line));
    } else {
        println!("{}", red.apply_to(line));
        if let Some(hint) = &r.fix_hint {
            println!("    {}: {hint}", HINT.get(lang));
        }
    }
}

/// Print a group under its header.
pub fn print_group(header: &str, group: &CheckGroup, lang: Lang) {
    println!("\n{header}");
    for r in &group.results {
        print_result(r, lang);
    }
}

pub fn rule(ch: char) -> String {
    ch.to_string().repeat(50)
}

pub fn success_banner(text: &str) {
    println!("{}", Style::new().green().bold().apply_to(text));
}

pub fn failure_banner(text: &str) {
    println!("{}", Style::new().red().bold().apply_to(text));
}
