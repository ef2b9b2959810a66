//! `architecture-lint [SRC_DIR]`
//!
//! Checks `backend/src` (or `SRC_DIR`) and exits non-zero when any rule is
//! broken or the tree cannot be read.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use architecture_lint::check_tree;

fn default_src_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../backend/src")
}

fn main() -> ExitCode {
    let src_dir = std::env::args_os()
        .nth(1)
        .map_or_else(default_src_dir, PathBuf::from);

    let report = match check_tree(&src_dir) {
        Ok(report) => report,
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "architecture-lint: {err}");
            return ExitCode::from(2);
        }
    };

    let mut out = io::stderr().lock();
    for finding in &report.findings {
        let _ = writeln!(out, "{finding}");
    }
    let _ = writeln!(
        out,
        "architecture-lint: {} file(s), {} finding(s)",
        report.files_checked,
        report.findings.len()
    );

    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
