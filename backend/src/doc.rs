//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers for domain types ([`ErrorSchema`],
//! [`ErrorCodeSchema`], [`TaskSchema`]), so domain types stay free of utoipa.
//! Task routes require the `BearerAuth` scheme; registration, login and the
//! health probes opt out with an empty security list.
//!
//! The document backs Swagger UI in debug builds and is printed by the
//! `openapi-dump` binary.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, TaskSchema};
use crate::inbound::http::tasks::CreateTaskRequest;
use crate::inbound::http::users::{CredentialsRequest, RegisteredResponse, TokenResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Task list API",
        description = "Multi-user task list with bearer-token authentication and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::mark_task_done,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TaskSchema,
        ErrorSchema,
        ErrorCodeSchema,
        CredentialsRequest,
        RegisteredResponse,
        TokenResponse,
        CreateTaskRequest
    )),
    tags(
        (name = "users", description = "Account registration and login"),
        (name = "tasks", description = "Task list operations for the authenticated caller"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
