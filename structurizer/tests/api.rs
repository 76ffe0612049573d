use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use structurizer::{
    create_router, AppState, ModelClient, ModelConfig, RuntimeClient, TargetSchema,
};
use structurizer_core::{
    AiError, ChatCompletionRequest, ChatCompletionResponse, Choice, FinishReason, Message,
    Provider, ProviderInfo, ResponseFormat, RuntimeExecutor, Usage,
};

/// Client whose answers are fixed up front.
struct CannedClient {
    completion: Result<String, String>,
    parsed: Result<Value, String>,
}

impl CannedClient {
    fn completing(text: &str) -> Self {
        Self {
            completion: Ok(text.to_string()),
            parsed: Err("unused".to_string()),
        }
    }

    fn parsing(value: Value) -> Self {
        Self {
            completion: Err("unused".to_string()),
            parsed: Ok(value),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            completion: Err(message.to_string()),
            parsed: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl ModelClient for CannedClient {
    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _temperature: f32,
    ) -> Result<String, AiError> {
        self.completion.clone().map_err(AiError::provider)
    }

    async fn parse(
        &self,
        _system: &str,
        _user: &str,
        _target: &TargetSchema,
    ) -> Result<Value, AiError> {
        self.parsed.clone().map_err(AiError::provider)
    }
}

fn app(client: impl ModelClient + 'static) -> Router {
    create_router(AppState::new(Arc::new(client)))
}

async fn post_raw(app: Router, uri: &str, body: Value) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, body) = post_raw(app, uri, body).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn structure_endpoint_valid_input() {
    let app = app(CannedClient::completing(
        r#"{"customer": "John", "order": "books"}"#,
    ));

    let (status, body) =
        post_raw(app, "/structure/", json!({"text": "John ordered some books."})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"structured_output":{"customer":"John","order":"books"}}"#
    );
}

#[tokio::test]
async fn structure_endpoint_wraps_non_json_output() {
    let app = app(CannedClient::completing("John bought books, I think.\n"));

    let (status, body) =
        post_json(app, "/structure/", json!({"text": "John ordered some books."})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"structured_output": {"raw_text_output": "John bought books, I think."}})
    );
}

#[tokio::test]
async fn structure_endpoint_no_input() {
    let bodies = [
        json!({}),
        json!({"text": ""}),
        json!({"text": "   "}),
        json!({"text": null}),
    ];
    for body in bodies {
        let app = app(CannedClient::failing("unused"));
        let (status, response) = post_json(app, "/structure/", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({"error": "No input text provided."}));
    }
}

#[tokio::test]
async fn structure_endpoint_provider_failure() {
    let app = app(CannedClient::failing("OpenAI API error: upstream unavailable"));

    let (status, body) = post_json(app, "/structure", json!({"text": "hello"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"error": "Provider error: OpenAI API error: upstream unavailable"})
    );
}

#[tokio::test]
async fn extract_calendar() {
    let event = json!({
        "name": "science fair",
        "date": "Friday",
        "participants": ["Alice", "Bob"]
    });
    let app = app(CannedClient::parsing(event.clone()));

    let (status, body) = post_json(
        app,
        "/extract/",
        json!({
            "schema": "calendar",
            "text": "Alice and Bob are going to a science fair on Friday."
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["structured_output"], event);
    assert!(body["structured_output"]["participants"]
        .as_array()
        .unwrap()
        .contains(&json!("Alice")));
}

#[tokio::test]
async fn extract_invalid_schema() {
    for schema in ["invalid", "Calendars", "", "research paper"] {
        let (status, body) = post_json(
            app(CannedClient::failing("unused")),
            "/extract/",
            json!({"schema": schema, "text": "Some text"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"error": "Invalid schema type. Use 'calendar' or 'research'."})
        );
    }
}

#[tokio::test]
async fn extract_no_input() {
    let (status, body) = post_json(
        app(CannedClient::failing("unused")),
        "/extract/",
        json!({"schema": "research", "text": " \n "}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "No input text provided."}));
}

#[tokio::test]
async fn extract_provider_failure() {
    let (status, body) = post_json(
        app(CannedClient::failing("boom")),
        "/extract",
        json!({"schema": "Research", "text": "paper"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "Provider error: boom"}));
}

#[tokio::test]
async fn malformed_body_is_rejected_by_extractor() {
    let response = app(CannedClient::failing("unused"))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/structure/")
                .header("content-type", "application/json")
                .body(Body::from("[\"not\", \"an\", \"object\"]"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn service_info_lists_endpoints() {
    let response = app(CannedClient::failing("unused"))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let info: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(info["title"], "AI Structurizer");
    assert_eq!(info["version"], "1.0.0");
    let description = info["description"].as_str().unwrap();
    assert!(description.contains("/structure/"), "{description}");
    assert!(description.contains("/extract/"), "{description}");
    assert!(info["endpoints"].get("/structure/").is_some());
    assert!(info["endpoints"].get("/extract/").is_some());
}

/// Provider that answers every chat completion with the same text.
#[derive(Debug)]
struct FixedProvider {
    reply: String,
    seen: Mutex<Vec<ChatCompletionRequest>>,
}

impl FixedProvider {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Provider for FixedProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        Arc::new(ProviderInfo {
            id: "openai".to_string(),
            name: "OpenAI".to_string(),
        })
    }

    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AiError> {
        let model = req.model.clone();
        self.seen.lock().unwrap().push(req);
        Ok(ChatCompletionResponse {
            id: "chatcmpl-fixed".to_string(),
            model,
            choices: vec![Choice {
                index: 0,
                message: Message::assistant(self.reply.clone()),
                finish_reason: FinishReason::Stop,
            }],
            usage: Usage::default(),
            created: None,
        })
    }
}

fn runtime_app(provider: Arc<FixedProvider>) -> Router {
    let executor = RuntimeExecutor::builder(provider).finish();
    app(RuntimeClient::new(executor, ModelConfig::default()))
}

#[tokio::test]
async fn structure_through_runtime_uses_structure_model() {
    let provider = Arc::new(FixedProvider::new(r#"{"city": "Paris"}"#));

    let (_, body) = post_json(
        runtime_app(provider.clone()),
        "/structure/",
        json!({"text": "  I live in Paris.  "}),
    )
    .await;
    assert_eq!(body, json!({"structured_output": {"city": "Paris"}}));

    let seen = provider.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].model, "gpt-4.1-mini");
    assert_eq!(seen[0].temperature, Some(0.0));
    assert_eq!(seen[0].response_format, Some(ResponseFormat::Text));
    assert_eq!(seen[0].messages[1].text(), "I live in Paris.");
}

#[tokio::test]
async fn extract_through_runtime_sends_strict_schema() {
    let provider = Arc::new(FixedProvider::new(
        r#"{"title": "T", "authors": ["A"], "abstract": "B", "keywords": ["k"]}"#,
    ));

    let (_, body) = post_json(
        runtime_app(provider.clone()),
        "/extract/",
        json!({"schema": "research", "text": "Title: T. By A."}),
    )
    .await;
    assert_eq!(
        body,
        json!({"structured_output": {
            "title": "T",
            "authors": ["A"],
            "abstract": "B",
            "keywords": ["k"]
        }})
    );

    let seen = provider.seen.lock().unwrap();
    assert_eq!(seen[0].model, "gpt-4o-2024-08-06");
    assert_eq!(seen[0].temperature, None);
    match &seen[0].response_format {
        Some(ResponseFormat::JsonSchema { name, schema, strict }) => {
            assert_eq!(name, "ResearchPaperExtraction");
            assert!(*strict);
            assert_eq!(schema["additionalProperties"], false);
        }
        other => panic!("expected strict JSON schema, got {other:?}"),
    }
}

#[tokio::test]
async fn extract_through_runtime_keeps_schema_field_order() {
    let provider = Arc::new(FixedProvider::new(
        r#"{"participants": ["Alice", "Bob"], "date": "Friday", "name": "science fair"}"#,
    ));

    let (status, body) = post_raw(
        runtime_app(provider),
        "/extract/",
        json!({"schema": "calendar", "text": "Alice and Bob: science fair on Friday."}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        concat!(
            r#"{"structured_output":"#,
            r#"{"name":"science fair","date":"Friday","participants":["Alice","Bob"]}}"#
        )
    );
}

#[tokio::test]
async fn extract_through_runtime_rejects_off_schema_reply() {
    let provider = Arc::new(FixedProvider::new(r#"{"name": "science fair"}"#));

    let (status, body) = post_json(
        runtime_app(provider),
        "/extract/",
        json!({"text": "Science fair on Friday."}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("CalendarEvent validation failed:"), "{error}");
}
