//! Rule and reporting tests for the dependency checks.

use std::fs;
use std::path::Path;

use rstest::rstest;

use super::*;

fn targets(file: &str, contents: &str) -> Vec<Target> {
    check_source(Path::new(file), contents)
        .expect("source parses")
        .into_iter()
        .map(|finding| finding.target)
        .collect()
}

#[rstest]
#[case("domain/task.rs", "use serde::Serialize; #[derive(Serialize)] struct Task;")]
#[case("domain/access.rs", "use super::{Caller, Task}; fn f(_: &Caller, _: &Task) {}")]
#[case("inbound/http/tasks.rs", "use crate::domain::ports::TaskCommand; fn f(_: &dyn TaskCommand) {}")]
#[case("inbound/http/tasks.rs", "use crate::domain::TaskId; fn f() { let _ = TaskId::new(1); }")]
#[case("outbound/token/jwt_session_tokens.rs", "use jsonwebtoken::{Header, encode};")]
#[case("outbound/crypto/bcrypt_password_hasher.rs", "fn f(p: &str) { let _ = bcrypt::hash(p, 4); }")]
#[case("outbound/persistence/pool.rs", "use diesel_async::pooled_connection::bb8::Pool;")]
#[case("outbound/memory/task_repository.rs", "use crate::domain::ports::TaskRepository;")]
#[case("main.rs", "use diesel::prelude::*; use tasklist_backend::outbound::token;")]
#[case("server/mod.rs", "use actix_web::App; use tasklist_backend::inbound::http::tasks;")]
fn allowed_references(#[case] file: &str, #[case] contents: &str) {
    assert_eq!(targets(file, contents), Vec::<Target>::new());
}

#[rstest]
#[case("domain/user.rs", "use crate::inbound::http::state::HttpState;", Target::Module("inbound"))]
#[case("domain/task_service.rs", "use super::super::outbound::memory::InMemoryTaskRepository;", Target::Module("outbound"))]
#[case("domain/credential_service.rs", "fn f(p: &str) { let _ = bcrypt::hash(p, 4); }", Target::Crate("bcrypt"))]
#[case("domain/task.rs", "use utoipa::ToSchema;", Target::Crate("utoipa"))]
#[case("domain/auth.rs", "use jsonwebtoken::decode;", Target::Crate("jsonwebtoken"))]
#[case("inbound/http/auth.rs", "fn f(t: &str) { let _ = jsonwebtoken::decode_header(t); }", Target::Crate("jsonwebtoken"))]
#[case("inbound/http/tasks.rs", "use tasklist_backend::outbound::persistence::DbPool;", Target::Module("outbound"))]
#[case("inbound/http/tasks.rs", "use diesel::prelude::*;", Target::Crate("diesel"))]
#[case("outbound/token/config.rs", "use actix_web::HttpRequest;", Target::Crate("actix_web"))]
fn layer_violations(#[case] file: &str, #[case] contents: &str, #[case] expected: Target) {
    assert_eq!(targets(file, contents), vec![expected]);
}

#[rstest]
#[case("use crate::domain::ports::TaskRepository;", "TaskRepository")]
#[case("fn f(repo: &dyn crate::domain::ports::UserRepository) {}", "UserRepository")]
#[case("use crate::domain::ports::{MockPasswordHasher, TaskQuery};", "PasswordHasher")]
fn handlers_may_not_bypass_the_services(#[case] contents: &str, #[case] item: &'static str) {
    assert_eq!(
        targets("inbound/http/tasks.rs", contents),
        vec![Target::Item(item)]
    );
}

#[rstest]
#[case("outbound/persistence/diesel_user_repository.rs", "use jsonwebtoken::Header;", Target::Crate("jsonwebtoken"))]
#[case("outbound/memory/user_repository.rs", "fn f(p: &str) { let _ = bcrypt::verify(p, \"h\"); }", Target::Crate("bcrypt"))]
#[case("outbound/token/config.rs", "use diesel::prelude::*;", Target::Crate("diesel"))]
#[case("outbound/crypto/mod.rs", "use diesel_migrations::embed_migrations;", Target::Crate("diesel_migrations"))]
fn third_party_crates_stay_in_their_adapter(
    #[case] file: &str,
    #[case] contents: &str,
    #[case] expected: Target,
) {
    assert_eq!(targets(file, contents), vec![expected]);
}

#[rstest]
fn findings_carry_line_and_reference() {
    let contents = "use crate::domain::Task;\n\nuse jsonwebtoken::{Header, decode};\n";
    let findings =
        check_source(Path::new("inbound/http/auth.rs"), contents).expect("source parses");

    let rendered: Vec<String> = findings.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "inbound/http/auth.rs:3: `jsonwebtoken::Header` uses crate `jsonwebtoken`; \
             handlers talk to ports, never to adapters",
            "inbound/http/auth.rs:3: `jsonwebtoken::decode` uses crate `jsonwebtoken`; \
             handlers talk to ports, never to adapters",
        ]
    );
}

#[rstest]
fn unparseable_sources_are_errors() {
    let err = check_source(Path::new("domain/task.rs"), "fn broken(").expect_err("parse error");
    assert!(matches!(err, LintError::Parse { .. }));
    assert!(err.to_string().starts_with("cannot parse domain/task.rs"));
}

#[rstest]
fn files_without_rules_are_not_parsed() {
    let findings = check_source(Path::new("bin/openapi_dump.rs"), "fn broken(")
        .expect("no rule governs binaries");
    assert!(findings.is_empty());
}

#[rstest]
fn check_tree_walks_nested_layers() {
    let temp = tempfile::tempdir().expect("temp dir");
    let src = temp.path();
    fs::create_dir_all(src.join("domain")).expect("domain dir");
    fs::create_dir_all(src.join("outbound/memory")).expect("outbound dir");
    fs::write(src.join("domain/task.rs"), "use serde::Serialize;").expect("write task");
    fs::write(
        src.join("outbound/memory/task_repository.rs"),
        "use crate::domain::Task;\nuse diesel::prelude::*;\n",
    )
    .expect("write repository");
    fs::write(src.join("main.rs"), "fn main() {}").expect("write main");
    fs::write(src.join("README.md"), "not rust").expect("write readme");

    let report = check_tree(src).expect("tree readable");

    assert_eq!(report.files_checked, 3);
    assert!(!report.is_clean());
    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    assert_eq!(finding.file, Path::new("outbound/memory/task_repository.rs"));
    assert_eq!(finding.line, 2);
    assert_eq!(finding.target, Target::Crate("diesel"));
}

#[rstest]
fn backend_sources_follow_the_rules() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../backend/src");
    let report = check_tree(&src).expect("backend sources readable");

    assert!(report.files_checked > 0);
    let rendered: Vec<String> = report.findings.iter().map(ToString::to_string).collect();
    assert!(report.is_clean(), "unexpected findings: {rendered:#?}");
}
