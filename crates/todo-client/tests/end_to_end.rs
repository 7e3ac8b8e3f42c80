//! Drives the HTTP client and stores against a live in-memory backend.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use url::Url;

use todo_backend::Trace;
use todo_backend::inbound::http::configure;
use todo_backend::test_support::in_memory_http_state;
use todo_client::{
    ApiError, ClientConfig, ClientStores, HttpApiClient, NewTodo, ProfileApi, TodoApi,
};

struct Backend {
    addr: SocketAddr,
    handle: ServerHandle,
}

impl Backend {
    fn start() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let state = web::Data::new(in_memory_http_state(clock));
        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(Trace)
                .configure(configure)
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind ephemeral port");
        let addr = server
            .addrs()
            .first()
            .copied()
            .expect("bound address");
        let running = server.run();
        let handle = running.handle();
        actix_web::rt::spawn(running);
        Self { addr, handle }
    }

    fn client(&self) -> Arc<HttpApiClient> {
        let base = Url::parse(&format!("http://{}/", self.addr)).expect("base URL");
        Arc::new(HttpApiClient::new(ClientConfig::new(base)).expect("client"))
    }

    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

#[actix_web::test]
async fn api_client_round_trips_todos() {
    let backend = Backend::start();
    let api = backend.client();

    let created = api
        .create_todo(NewTodo {
            text: "write docs".to_owned(),
            category: None,
        })
        .await
        .expect("create todo");
    assert_eq!(created.category, "personal");
    assert!(!created.completed);

    let completed = api.complete_todo(created.id).await.expect("complete");
    assert!(completed.completed);

    let listed = api.list_todos().await.expect("list");
    assert_eq!(listed, vec![completed]);

    api.delete_todo(created.id).await.expect("delete");
    let missing = api.get_todo(created.id).await.expect_err("todo is gone");
    assert!(missing.is_not_found());

    backend.stop().await;
}

#[actix_web::test]
async fn server_messages_reach_the_caller() {
    let backend = Backend::start();
    let api = backend.client();

    let blank = api
        .create_todo(NewTodo {
            text: "  ".to_owned(),
            category: None,
        })
        .await
        .expect_err("blank text rejected");
    assert_eq!(blank.status(), Some(400));

    let missing = api.get_profile().await.expect_err("no profile yet");
    assert!(matches!(missing, ApiError::Status { status: 404, .. }));

    api.create_profile("ada".to_owned()).await.expect("create");
    let conflict = api
        .create_profile("grace".to_owned())
        .await
        .expect_err("second profile rejected");
    assert_eq!(conflict.status(), Some(409));

    backend.stop().await;
}

#[actix_web::test]
async fn completing_a_todo_through_the_store_levels_up() {
    let backend = Backend::start();
    let stores = ClientStores::new(backend.client());

    stores.profile().initialize().await;
    assert_eq!(stores.profile().profile(), None);
    stores.profile().create("ada").await;
    assert_eq!(stores.profile().profile().map(|p| p.level), Some(1));

    stores.todos().add("ship release", Some("work".to_owned())).await;
    stores.todos().add("water plants", None).await;
    let items = stores.todos().state().items;
    assert_eq!(items.len(), 2);
    let id = items.first().map(|todo| todo.id).expect("first todo");

    stores.todos().toggle(id).await;
    assert_eq!(stores.todos().remaining(), 1);
    assert_eq!(stores.profile().profile().map(|p| p.level), Some(2));

    stores.todos().toggle(id).await;
    assert_eq!(stores.todos().remaining(), 2);
    assert_eq!(stores.profile().profile().map(|p| p.level), Some(2));

    stores.todos().remove_by_category("work").await;
    let remaining = stores.todos().state();
    assert_eq!(remaining.error, None);
    assert_eq!(remaining.items.len(), 1);
    assert_eq!(stores.todos().items_in_category("personal").len(), 1);

    stores.todos().remove_all().await;
    stores.todos().load_all().await;
    assert!(stores.todos().state().items.is_empty());

    backend.stop().await;
}
