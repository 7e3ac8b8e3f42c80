//! End-to-end behaviour of the todo endpoints over in-memory storage.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use todo_backend::Trace;
use todo_backend::inbound::http::configure;
use todo_backend::test_support::{MutableClock, fixture_timestamp, in_memory_http_state};

#[fixture]
fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(fixture_timestamp()))
}

async fn app(
    clock: Arc<MutableClock>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let clock: Arc<dyn Clock> = clock;
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(in_memory_http_state(clock)))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn post(body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri("/todos").set_json(body)
}

fn id_of(todo: &Value) -> String {
    todo["id"].as_str().expect("todo id").to_owned()
}

#[rstest]
#[actix_web::test]
async fn create_complete_and_list(clock: Arc<MutableClock>) {
    let app = app(clock).await;

    let (status, created) = send(&app, post(json!({"text": "buy milk", "category": "shopping"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = id_of(&created);

    let (status, completed) = send(
        &app,
        actix_test::TestRequest::patch().uri(&format!("/todos/{id}/complete")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["completed"], true);

    let (status, listed) = send(&app, actix_test::TestRequest::get().uri("/todos")).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().expect("array");
    assert!(
        listed
            .iter()
            .any(|todo| todo["id"] == id.as_str() && todo["completed"] == true)
    );
}

#[rstest]
#[actix_web::test]
async fn create_then_get_round_trips_fields(clock: Arc<MutableClock>) {
    let app = app(clock).await;

    let (_, created) = send(&app, post(json!({"text": "read", "category": "home"}))).await;
    let (status, fetched) = send(
        &app,
        actix_test::TestRequest::get().uri(&format!("/todos/{}", id_of(&created))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["completed"], false);
    assert_eq!(fetched["createdAt"], fetched["updatedAt"]);
}

#[rstest]
#[actix_web::test]
async fn repeated_complete_keeps_updated_at(clock: Arc<MutableClock>) {
    let app = app(clock.clone()).await;
    let (_, created) = send(&app, post(json!({"text": "stretch"}))).await;
    let id = id_of(&created);
    let complete = || actix_test::TestRequest::patch().uri(&format!("/todos/{id}/complete"));

    clock.advance_seconds(10);
    let (_, first) = send(&app, complete()).await;
    clock.advance_seconds(10);
    let (_, second) = send(&app, complete()).await;

    assert_eq!(first["updatedAt"], "2026-03-01T09:00:10Z");
    assert_eq!(second["updatedAt"], first["updatedAt"]);
}

#[rstest]
#[actix_web::test]
async fn complete_then_incomplete_bumps_updated_at(clock: Arc<MutableClock>) {
    let app = app(clock.clone()).await;
    let (_, created) = send(&app, post(json!({"text": "stretch"}))).await;
    let id = id_of(&created);

    clock.advance_seconds(5);
    send(
        &app,
        actix_test::TestRequest::patch().uri(&format!("/todos/{id}/complete")),
    )
    .await;
    clock.advance_seconds(5);
    let (_, reopened) = send(
        &app,
        actix_test::TestRequest::patch().uri(&format!("/todos/{id}/incomplete")),
    )
    .await;

    assert_eq!(reopened["completed"], false);
    assert_eq!(reopened["updatedAt"], "2026-03-01T09:00:10Z");
    assert_eq!(reopened["createdAt"], "2026-03-01T09:00:00Z");
}

#[rstest]
#[actix_web::test]
async fn delete_by_category_removes_only_that_category(clock: Arc<MutableClock>) {
    let app = app(clock).await;
    for (text, category) in [("a", "work"), ("b", "home"), ("c", "work"), ("d", "personal")] {
        send(&app, post(json!({"text": text, "category": category}))).await;
    }

    let (status, _) = send(
        &app,
        actix_test::TestRequest::delete().uri("/todos/category/work"),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = send(&app, actix_test::TestRequest::get().uri("/todos")).await;
    let categories: Vec<&str> = listed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|todo| todo["category"].as_str())
        .collect();
    assert_eq!(categories, ["home", "personal"]);
}

#[rstest]
#[actix_web::test]
async fn empty_category_is_stored_as_given(clock: Arc<MutableClock>) {
    let app = app(clock).await;

    let (status, created) = send(&app, post(json!({"text": "x", "category": ""}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["category"], "");
}

#[rstest]
#[actix_web::test]
async fn deleting_a_missing_todo_succeeds(clock: Arc<MutableClock>) {
    let app = app(clock).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::delete().uri("/todos/3fa85f64-5717-4562-b3fc-2c963f66afa6"),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[rstest]
#[actix_web::test]
async fn error_responses_echo_the_trace_header(clock: Arc<MutableClock>) {
    let app = app(clock).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/todos/3fa85f64-5717-4562-b3fc-2c963f66afa6")
            .to_request(),
    )
    .await;
    let header = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace header");
    let body: Value = actix_test::read_body_json(response).await;

    assert_eq!(body["traceId"], header.as_str());
    assert_eq!(body["status"], 404);
    assert!(body["timestamp"].is_string());
}
