//! End-to-end coverage of the task list API over the in-memory record store.
//!
//! Handlers, services, bcrypt and JWT adapters are all real; only the clock is
//! swapped for a settable one so token expiry can be simulated.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use chrono::{TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tasklist_backend::Trace;
use tasklist_backend::domain::ports::PasswordHasher;
use tasklist_backend::domain::{CredentialService, Email, Role, TaskService, User, UserId};
use tasklist_backend::inbound::http::state::HttpState;
use tasklist_backend::inbound::http::tasks::{
    create_task, delete_task, list_tasks, mark_task_done,
};
use tasklist_backend::inbound::http::users::{login, register};
use tasklist_backend::inbound::http::validation::json_config;
use tasklist_backend::outbound::crypto::BcryptPasswordHasher;
use tasklist_backend::outbound::memory::{InMemoryTaskRepository, InMemoryUserRepository};
use tasklist_backend::outbound::token::{JwtSessionTokens, TokenSettings};
use tasklist_backend::test_support::MutableClock;

const SECRET: &[u8] = b"integration-test-secret-of-32-bytes!";
const ADMIN_EMAIL: &str = "root@example.com";
const ADMIN_PASSWORD: &str = "admin-pw";

struct Harness {
    clock: Arc<MutableClock>,
    users: Arc<InMemoryUserRepository>,
    hasher: Arc<BcryptPasswordHasher>,
    state: web::Data<HttpState>,
}

#[fixture]
fn harness() -> Harness {
    let clock = Arc::new(MutableClock::new(
        Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0)
            .single()
            .expect("valid start time"),
    ));
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    let users = Arc::new(InMemoryUserRepository::new());
    let hasher = Arc::new(BcryptPasswordHasher::new(4).expect("valid bcrypt cost"));
    let credentials = Arc::new(CredentialService::new(users.clone(), hasher.clone()));
    let tasks = Arc::new(TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        dyn_clock.clone(),
    ));
    let settings = TokenSettings::new(SECRET.to_vec()).unwrap_or_else(|_| panic!("valid secret"));
    let tokens = Arc::new(JwtSessionTokens::new(&settings, dyn_clock));
    let state = web::Data::new(HttpState::new(
        credentials.clone(),
        credentials,
        tokens,
        tasks.clone(),
        tasks,
    ));
    Harness {
        clock,
        users,
        hasher,
        state,
    }
}

impl Harness {
    async fn seed_admin(&self) {
        let hash = self
            .hasher
            .hash(ADMIN_PASSWORD)
            .await
            .expect("hash admin password");
        let admin = User::new(
            UserId::random(),
            Email::new(ADMIN_EMAIL).expect("valid admin email"),
            hash,
            Role::Admin,
        );
        self.users.seed(admin).expect("seed admin");
    }

    async fn app(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
        test::init_service(
            App::new()
                .app_data(self.state.clone())
                .app_data(json_config())
                .wrap(Trace)
                .service(
                    web::scope("/api")
                        .service(register)
                        .service(login)
                        .service(list_tasks)
                        .service(create_task)
                        .service(mark_task_done)
                        .service(delete_task),
                ),
        )
        .await
    }
}

async fn send<S>(
    app: &S,
    request: test::TestRequest,
    token: Option<&str>,
) -> (StatusCode, Option<String>, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = match token {
        Some(token) => request.insert_header((AUTHORIZATION, format!("Bearer {token}"))),
        None => request,
    };
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, trace_id, value)
}

async fn register_user<S>(app: &S, email: &str, password: &str) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({ "email": email, "password": password }));
    send(app, request, None).await.0
}

async fn login_token<S>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": email, "password": password }));
    let (status, _, body) = send(app, request, None).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body.get("token")
        .and_then(Value::as_str)
        .expect("token in login response")
        .to_owned()
}

async fn create<S>(app: &S, token: &str, text: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/todos")
        .set_json(json!({ "text": text }));
    let (status, _, body) = send(app, request, Some(token)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

fn task_id(task: &Value) -> i64 {
    task.get("id").and_then(Value::as_i64).expect("task id")
}

fn code(body: &Value) -> Option<&str> {
    body.get("code").and_then(Value::as_str)
}

#[rstest]
#[actix_web::test]
async fn register_login_create_complete_delete(harness: Harness) {
    let app = harness.app().await;

    assert_eq!(
        register_user(&app, "alice@example.com", "pw123").await,
        StatusCode::CREATED
    );
    let token = login_token(&app, "alice@example.com", "pw123").await;

    let task = create(&app, &token, "  Buy milk  ").await;
    let id = task_id(&task);
    assert_eq!(task.get("text").and_then(Value::as_str), Some("Buy milk"));
    assert_eq!(task.get("done").and_then(Value::as_bool), Some(false));
    assert_eq!(
        task.get("createdAt").and_then(Value::as_str),
        Some("2026-01-05T12:00:00Z")
    );

    let (status, _, listed) = send(&app, test::TestRequest::get().uri("/api/todos"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    for _ in 0..2 {
        let (status, _, done) = send(
            &app,
            test::TestRequest::put().uri(&format!("/api/todos/{id}")),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(done.get("done").and_then(Value::as_bool), Some(true));
    }

    let (status, _, body) = send(
        &app,
        test::TestRequest::delete().uri(&format!("/api/todos/{id}")),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, trace_id, body) = send(
        &app,
        test::TestRequest::delete().uri(&format!("/api/todos/{id}")),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), Some("not_found"));
    assert_eq!(
        body.get("traceId").and_then(Value::as_str),
        trace_id.as_deref()
    );
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_rejected(harness: Harness) {
    let app = harness.app().await;

    assert_eq!(
        register_user(&app, "alice@example.com", "pw123").await,
        StatusCode::CREATED
    );
    let request = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({ "email": " alice@example.com ", "password": "other" }));
    let (status, _, body) = send(&app, request, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), Some("duplicate_email"));
}

#[rstest]
#[actix_web::test]
async fn login_failures_are_indistinguishable(harness: Harness) {
    let app = harness.app().await;
    register_user(&app, "alice@example.com", "pw123").await;

    let attempt = |email: &'static str, password: &'static str| {
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "email": email, "password": password }))
    };
    let (wrong_status, _, wrong) = send(&app, attempt("alice@example.com", "nope"), None).await;
    let (unknown_status, _, unknown) = send(&app, attempt("nobody@example.com", "pw123"), None).await;

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&wrong), Some("invalid_credentials"));
    assert_eq!(wrong.get("message"), unknown.get("message"));
    assert_eq!(code(&wrong), code(&unknown));
}

#[rstest]
#[actix_web::test]
async fn other_users_are_forbidden_but_admins_are_not(harness: Harness) {
    harness.seed_admin().await;
    let app = harness.app().await;
    register_user(&app, "alice@example.com", "pw123").await;
    register_user(&app, "bob@example.com", "pw456").await;
    let alice = login_token(&app, "alice@example.com", "pw123").await;
    let bob = login_token(&app, "bob@example.com", "pw456").await;
    let admin = login_token(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let id = task_id(&create(&app, &alice, "Alice's task").await);
    create(&app, &bob, "Bob's task").await;

    let (status, _, body) = send(
        &app,
        test::TestRequest::put().uri(&format!("/api/todos/{id}")),
        Some(&bob),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), Some("forbidden"));

    let (status, _, _) = send(
        &app,
        test::TestRequest::delete().uri(&format!("/api/todos/{id}")),
        Some(&bob),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, _, bob_list) = send(&app, test::TestRequest::get().uri("/api/todos"), Some(&bob)).await;
    let bob_texts: Vec<&str> = bob_list
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|task| task.get("text").and_then(Value::as_str))
        .collect();
    assert_eq!(bob_texts, vec!["Bob's task"]);

    let (_, _, admin_list) =
        send(&app, test::TestRequest::get().uri("/api/todos"), Some(&admin)).await;
    assert_eq!(admin_list.as_array().map(Vec::len), Some(2));

    let (status, _, _) = send(
        &app,
        test::TestRequest::delete().uri(&format!("/api/todos/{id}")),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[rstest]
#[actix_web::test]
async fn tokens_expire_after_twenty_four_hours(harness: Harness) {
    let app = harness.app().await;
    register_user(&app, "alice@example.com", "pw123").await;
    let token = login_token(&app, "alice@example.com", "pw123").await;

    harness.clock.advance_seconds(24 * 60 * 60 - 1);
    let (status, _, _) = send(&app, test::TestRequest::get().uri("/api/todos"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    harness.clock.advance_seconds(1);
    let (status, _, body) = send(&app, test::TestRequest::get().uri("/api/todos"), Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), Some("invalid_token"));
}

#[rstest]
#[case(None, StatusCode::UNAUTHORIZED, "missing_token")]
#[case(Some("not-a-jwt"), StatusCode::FORBIDDEN, "invalid_token")]
#[actix_web::test]
async fn protected_routes_require_a_valid_token(
    harness: Harness,
    #[case] token: Option<&str>,
    #[case] status: StatusCode,
    #[case] expected: &str,
) {
    let app = harness.app().await;
    let request = test::TestRequest::post()
        .uri("/api/todos")
        .set_json(json!({ "text": "sneaky" }));
    let (actual, _, body) = send(&app, request, token).await;

    assert_eq!(actual, status);
    assert_eq!(code(&body), Some(expected));
}

#[rstest]
#[actix_web::test]
async fn tampered_tokens_are_rejected(harness: Harness) {
    let app = harness.app().await;
    register_user(&app, "alice@example.com", "pw123").await;
    let token = login_token(&app, "alice@example.com", "pw123").await;
    let (unsigned, signature) = token.rsplit_once('.').expect("signed token");
    let first = signature.chars().next().expect("non-empty signature");
    let replacement = if first == 'A' { 'Q' } else { 'A' };
    let tampered = format!("{unsigned}.{replacement}{}", &signature[1..]);

    let (status, _, body) =
        send(&app, test::TestRequest::get().uri("/api/todos"), Some(&tampered)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), Some("invalid_token"));
}

#[rstest]
#[actix_web::test]
async fn non_integer_task_ids_are_not_found(harness: Harness) {
    let app = harness.app().await;
    register_user(&app, "alice@example.com", "pw123").await;
    let token = login_token(&app, "alice@example.com", "pw123").await;

    let (status, _, body) = send(
        &app,
        test::TestRequest::put().uri("/api/todos/not-a-number"),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), Some("not_found"));
}
