//! HTTP server assembly: repositories, routes, middleware and the listener.

#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use todo_backend::Trace;
use todo_backend::inbound::http::configure;
use todo_backend::inbound::http::health::{HealthState, live, ready};
use todo_backend::inbound::http::state::HttpState;
use todo_backend::outbound::persistence::DbPool;

use state_builders::build_http_state;

/// Listener address plus the optional database pool.
///
/// Without a pool the server keeps todos and the profile in memory.
pub struct ServerConfig {
    bind_addr: SocketAddr,
    db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Back the repositories with PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    pub(crate) fn db_pool(&self) -> Option<&DbPool> {
        self.db_pool.as_ref()
    }
}

fn todo_app(
    health: web::Data<HealthState>,
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health)
        .app_data(state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    // Interactive docs are only mounted in debug builds.
    #[cfg(debug_assertions)]
    let app = {
        use todo_backend::ApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
    };

    app
}

/// Bind the listener and return the server future.
///
/// `health` is marked ready once the socket is bound. The returned
/// [`Server`] must be awaited to accept connections.
///
/// # Errors
/// Returns [`std::io::Error`] when binding fails or, with the `metrics`
/// feature, when the metrics registry cannot be built.
pub fn create_server(health: web::Data<HealthState>, config: ServerConfig) -> std::io::Result<Server> {
    let state = build_http_state(&config);
    let worker_health = health.clone();

    #[cfg(feature = "metrics")]
    let request_metrics = metrics::request_metrics()?;

    let server = HttpServer::new(move || {
        let app = todo_app(worker_health.clone(), state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(request_metrics.clone());

        app
    })
    .bind(config.bind_addr)?
    .run();

    info!(addr = %config.bind_addr, "listener bound");
    health.mark_ready();
    Ok(server)
}
