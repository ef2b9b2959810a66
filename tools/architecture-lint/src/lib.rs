//! Dependency checks for the task list backend.
//!
//! The backend is laid out as a hexagon: `domain` owns tasks, accounts and
//! the access policy; `inbound` turns HTTP into calls on domain ports; and
//! `outbound` implements those ports with Diesel, bcrypt and JWT. The rules
//! in [`RULES`] pin that shape down, including which adapter may touch which
//! third-party crate.
//!
//! Every path and `use` item in each file is matched against the rules that
//! govern the file. Files outside the three layers (binaries, server wiring)
//! carry no rules.
//!
//! Run it with `cargo run -p architecture-lint` from the workspace root.

mod rules;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use syn::spanned::Spanned;
use syn::visit::Visit;
use walkdir::WalkDir;

pub use rules::{RULES, Rule, Target};

/// Name the backend library is imported under from binaries and tests.
const LIBRARY: &str = "tasklist_backend";

/// Failures that stop the check before any rule is applied.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("cannot walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },
}

/// A reference that breaks a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    pub line: usize,
    /// The offending path as written, e.g. `jsonwebtoken::decode`.
    pub reference: String,
    pub target: Target,
    pub reason: &'static str,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: `{}` uses {}; {}",
            self.file.display(),
            self.line,
            self.reference,
            self.target.describe(),
            self.reason
        )
    }
}

/// Findings for a whole source tree, ordered by file then line.
#[derive(Debug, Default)]
pub struct Report {
    pub files_checked: usize,
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Check every `.rs` file below `src_dir` against [`RULES`].
pub fn check_tree(src_dir: &Path) -> Result<Report, LintError> {
    let mut report = Report::default();
    for entry in WalkDir::new(src_dir).sort_by_file_name() {
        let entry = entry.map_err(|source| LintError::Walk {
            path: src_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }
        let contents = std::fs::read_to_string(path).map_err(|source| LintError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let relative = path.strip_prefix(src_dir).unwrap_or(path);
        report.findings.extend(check_source(relative, &contents)?);
        report.files_checked += 1;
    }
    Ok(report)
}

/// Check one file's contents. `file` is its path relative to `backend/src`
/// and decides which rules apply.
pub fn check_source(file: &Path, contents: &str) -> Result<Vec<Finding>, LintError> {
    let rules: Vec<&Rule> = RULES.iter().filter(|rule| rule.governs(file)).collect();
    if rules.is_empty() {
        return Ok(Vec::new());
    }

    let parsed = syn::parse_file(contents).map_err(|source| LintError::Parse {
        path: file.to_path_buf(),
        source,
    })?;
    let mut references = References::default();
    references.visit_file(&parsed);

    let mut findings = Vec::new();
    for reference in &references.found {
        for rule in &rules {
            for target in rule.forbidden {
                if reference.hits(*target) {
                    findings.push(Finding {
                        file: file.to_path_buf(),
                        line: reference.line,
                        reference: reference.segments.join("::"),
                        target: *target,
                        reason: rule.reason,
                    });
                }
            }
        }
    }
    findings.sort_by_key(|finding| finding.line);
    findings.dedup();
    Ok(findings)
}

/// A path as written in source, with `use` trees flattened.
#[derive(Debug)]
struct Reference {
    segments: Vec<String>,
    line: usize,
}

impl Reference {
    fn hits(&self, target: Target) -> bool {
        match target {
            Target::Crate(name) => self.segments.first().is_some_and(|first| *first == name),
            Target::Module(name) => self.crate_module() == Some(name),
            Target::Item(name) => self
                .segments
                .iter()
                .any(|segment| *segment == name || segment.strip_prefix("Mock") == Some(name)),
        }
    }

    /// First module below the crate root for `crate::`, `super::` and
    /// `tasklist_backend::` paths.
    fn crate_module(&self) -> Option<&str> {
        let mut segments = self.segments.iter().map(String::as_str);
        match segments.next()? {
            "crate" | LIBRARY => segments.next(),
            "super" => segments.find(|segment| *segment != "super"),
            _ => None,
        }
    }
}

#[derive(Default)]
struct References {
    found: Vec<Reference>,
}

impl References {
    fn push(&mut self, segments: Vec<String>, span: proc_macro2::Span) {
        if !segments.is_empty() {
            self.found.push(Reference {
                segments,
                line: span.start().line,
            });
        }
    }

    fn flatten_use(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.flatten_use(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.push(prefix, name.ident.span());
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.push(prefix, rename.ident.span());
            }
            syn::UseTree::Glob(glob) => self.push(prefix, glob.star_token.span()),
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.flatten_use(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for References {
    fn visit_path(&mut self, path: &'ast syn::Path) {
        let segments = path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        self.push(segments, path.span());
        syn::visit::visit_path(self, path);
    }

    fn visit_item_use(&mut self, item: &'ast syn::ItemUse) {
        self.flatten_use(&item.tree, Vec::new());
    }
}

#[cfg(test)]
mod tests;
