use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use task_database::tasks::handlers::router;
use task_database::tasks::service::TaskService;

/// Sends one request and returns the status and the body as text.
async fn call(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post(app: &Router, uri: &str) -> (StatusCode, String) {
    call(app, Method::POST, uri, Body::empty()).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    call(app, Method::GET, uri, Body::empty()).await
}

async fn set_by_id(app: &Router, body: Value) -> (StatusCode, String) {
    call(app, Method::POST, "/setByID", Body::from(body.to_string())).await
}

fn test_app() -> Router {
    router(TaskService::new())
}

#[tokio::test]
async fn test_new_task_returns_sequential_ids() {
    let app = test_app();

    for expected in 0..3 {
        let (status, body) = post(&app, "/newTask").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected.to_string());
    }
}

#[tokio::test]
async fn test_full_worker_flow_and_listing() {
    let app = test_app();
    for _ in 0..3 {
        post(&app, "/newTask").await;
    }

    let (status, body) = post(&app, "/getNewTask").await;
    assert_eq!(status, StatusCode::OK);
    let task: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(task, json!({"id": 0, "state": 1}));

    let (status, body) = post(&app, "/finishTask?id=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "success");

    let (status, body) = get(&app, "/getByID?id=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"id": 0, "state": 2}));

    let (_, body) = post(&app, "/getNewTask").await;
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["id"], 1);

    let (status, body) = get(&app, "/list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "0: id:0 state:2\n1: id:1 state:1\n2: id:2 state:0\n");
}

#[tokio::test]
async fn test_get_new_task_on_empty_store() {
    let app = test_app();

    let (status, body) = post(&app, "/getNewTask").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Error: No non-started task");

    post(&app, "/newTask").await;
    let (status, _) = post(&app, "/getNewTask").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_finish_rejects_unclaimed_and_finished_tasks() {
    let app = test_app();
    post(&app, "/newTask").await;

    let (status, body) = post(&app, "/finishTask?id=0").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.starts_with("Error:"), "got: {}", body);

    post(&app, "/getNewTask").await;
    assert_eq!(post(&app, "/finishTask?id=0").await.0, StatusCode::OK);
    assert_eq!(post(&app, "/finishTask?id=0").await.0, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_id_validation() {
    let app = test_app();
    post(&app, "/newTask").await;

    for uri in ["/getByID", "/getByID?id=", "/getByID?id=abc", "/getByID?id=-1", "/getByID?id=1"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
        assert_eq!(body, "Error: Wrong input", "uri {}", uri);
    }

    for uri in ["/finishTask", "/finishTask?id=x", "/finishTask?id=5"] {
        let (status, body) = post(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
        assert_eq!(body, "Error: Wrong input", "uri {}", uri);
    }
}

#[tokio::test]
async fn test_set_by_id_round_trip() {
    let app = test_app();
    post(&app, "/newTask").await;

    for state in [2, 1, 0] {
        let (status, body) = set_by_id(&app, json!({"id": 0, "state": state})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "success");

        let (_, body) = get(&app, "/getByID?id=0").await;
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"id": 0, "state": state})
        );
    }
}

#[tokio::test]
async fn test_set_by_id_rejects_bad_input() {
    let app = test_app();
    post(&app, "/newTask").await;

    let bad_bodies = [
        json!({"id": 1, "state": 0}),
        json!({"id": 0, "state": 3}),
        json!({"id": 0, "state": -1}),
        json!({"id": -1, "state": 0}),
        json!({"state": 0}),
    ];
    for body in bad_bodies {
        let (status, text) = set_by_id(&app, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(text, "Error: Wrong input", "body {}", body);
    }

    let (status, _) = call(&app, Method::POST, "/setByID", Body::from("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/getByID?id=0").await;
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"id": 0, "state": 0}));
}

#[tokio::test]
async fn test_wrong_method_is_rejected_with_fixed_message() {
    let app = test_app();

    for uri in ["/getByID?id=0", "/list"] {
        let (status, body) = post(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Error: Only GET accepted");
    }

    for uri in ["/newTask", "/getNewTask", "/finishTask?id=0", "/setByID"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Error: Only POST accepted");
    }
}

#[tokio::test]
async fn test_empty_listing() {
    let app = test_app();

    let (status, body) = get(&app, "/list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");
}
