use async_trait::async_trait;
use painless::mock::MockWorkflow;
use painless::{
    App, Method, Request, Response, Workflow, WorkflowError, WorkflowResult,
    response::{METHOD_NOT_SUPPORTED_MESSAGE, NOT_FOUND_MESSAGE},
};
use serde_json::json;

/// Serves GET only.
struct ReadOnly;

#[async_trait]
impl Workflow for ReadOnly {
    async fn get(&self, request: &Request) -> WorkflowResult {
        Ok(Response::ok(json!({ "id": request.params().at(0) })))
    }
}

/// Fails every call with "boom".
struct Exploding;

#[async_trait]
impl Workflow for Exploding {
    async fn get(&self, _request: &Request) -> WorkflowResult {
        Err("boom".into())
    }

    async fn post(&self, _request: &Request) -> WorkflowResult {
        Err(WorkflowError::NotFound("no such post".into()))
    }
}

fn app() -> App {
    App::builder("acme")
        .workflow("blog", "post", || ReadOnly)
        .workflow("blog", "broken", || Exploding)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_unresolved_workflow_is_404() {
    let app = app();
    let request = Request::new(Method::Get, "blog", "missing");

    let response = app.router().dispatch(request).await;

    assert_eq!(response.status, 404);
    assert_eq!(response.message, NOT_FOUND_MESSAGE);
    assert_eq!(response.module, "blog");
    assert_eq!(response.workflow, "missing");
}

#[tokio::test]
async fn test_missing_verb_hook_is_405() {
    let app = app();
    let request = Request::new(Method::Delete, "blog", "post");

    let response = app.router().dispatch(request).await;

    assert_eq!(response.status, 405);
    assert_eq!(response.message, METHOD_NOT_SUPPORTED_MESSAGE);
    assert_eq!(response.method, Some(Method::Delete));
}

#[tokio::test]
async fn test_workflow_error_message_reaches_the_500() {
    let app = app();
    let request = Request::new(Method::Get, "blog", "broken");

    let response = app.router().dispatch(request).await;

    assert_eq!(response.status, 500);
    assert!(response.message.contains("boom"), "{}", response.message);
}

#[tokio::test]
async fn test_not_found_from_the_workflow_is_404() {
    let app = app();
    let response = app.call("POST blog/broken").await;
    assert_eq!(response.status, 404);
    assert_eq!(response.message, "no such post");
}

#[tokio::test]
async fn test_panicking_workflow_is_500() {
    let mock = MockWorkflow::new();
    mock.expect_get().panic_with("boom");
    let app = App::builder("acme")
        .workflow("blog", "post", {
            let mock = mock.clone();
            move || mock.clone()
        })
        .build()
        .unwrap();

    let response = app.call("blog/post").await;

    assert_eq!(response.status, 500);
    assert_eq!(response.message, "General server error: boom");
    mock.verify();
}

#[tokio::test]
async fn test_successful_dispatch_carries_request_back_references() {
    let app = app();
    let response = app.call("blog/post/7").await;

    assert_eq!(response.status, 200);
    assert_eq!(response.payload, json!({ "id": "7" }));
    assert_eq!(response.module, "blog");
    assert_eq!(response.workflow, "post");
    assert_eq!(response.agent, "internal");
}

#[tokio::test]
async fn test_mock_records_dispatched_requests() {
    let mock = MockWorkflow::new();
    mock.expect_put().return_ok(Response::created(json!({ "saved": true })));
    let app = App::builder("acme")
        .workflow("blog", "post", {
            let mock = mock.clone();
            move || mock.clone()
        })
        .build()
        .unwrap();

    let response = app.call("PUT blog/post/draft").await;

    assert_eq!(response.status, 201);
    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method(), Method::Put);
    assert_eq!(calls[0].params().at(0), Some("draft"));
    mock.verify();
}

#[tokio::test]
async fn test_workflow_instance_is_shared_between_calls() {
    let mock = MockWorkflow::new();
    mock.expect_get().return_ok(Response::ok(json!(1)));
    mock.expect_get().return_ok(Response::ok(json!(2)));
    let app = App::builder("acme")
        .workflow("blog", "post", {
            let mock = mock.clone();
            move || mock.clone()
        })
        .build()
        .unwrap();

    assert_eq!(app.call("blog/post").await.payload, json!(1));
    assert_eq!(app.call("blog/post").await.payload, json!(2));
    assert_eq!(app.loader().registry().namespaces(), ["workflow/blog/post"]);
}
