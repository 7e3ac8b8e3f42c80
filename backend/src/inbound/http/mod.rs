//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod profile;
pub mod schemas;
pub mod state;
pub mod todos;
pub(crate) mod validation;

pub use error::{ApiResult, ErrorResponseBody};

/// Register the todo and profile routes together with the JSON extractor
/// configuration that renders malformed bodies as validation errors.
///
/// Health checks are registered separately because they need the
/// [`health::HealthState`] app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(todos::list_todos)
        .service(todos::create_todo)
        .service(todos::delete_all_todos)
        .service(todos::delete_todos_by_category)
        .service(todos::get_todo)
        .service(todos::update_todo)
        .service(todos::delete_todo)
        .service(todos::complete_todo)
        .service(todos::incomplete_todo)
        .service(profile::get_profile)
        .service(profile::create_profile)
        .service(profile::update_profile)
        .service(profile::level_up);
}
