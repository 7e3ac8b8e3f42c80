//! OpenAPI documentation for the REST API.
//!
//! Registers every handler in the inbound HTTP layer together with the error
//! envelope schema. Served through Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo backend API",
        description = "Todo list management with a single levelling profile."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::todos::list_todos,
        crate::inbound::http::todos::get_todo,
        crate::inbound::http::todos::create_todo,
        crate::inbound::http::todos::update_todo,
        crate::inbound::http::todos::complete_todo,
        crate::inbound::http::todos::incomplete_todo,
        crate::inbound::http::todos::delete_todo,
        crate::inbound::http::todos::delete_all_todos,
        crate::inbound::http::todos::delete_todos_by_category,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::create_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::profile::level_up,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "todos", description = "Todo items"),
        (name = "profile", description = "Player profile and levels"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
