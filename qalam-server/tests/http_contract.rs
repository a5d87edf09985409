//! HTTP contract for the chat endpoint: status codes and body shapes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use qalam_model::{GenerationParams, Generator, TextGenerator};
use qalam_rag::document::{Document, DocumentSet};
use qalam_rag::embedding::EmbeddingProvider;
use qalam_rag::index::VectorIndex;
use qalam_rag::{Language, Retriever};
use qalam_server::server::{AppState, app_router};
use qalam_server::{ChatService, LanguagePolicy};
use serde_json::Value;

struct StubEmbedder;

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    async fn embed(&self, _text: &str) -> qalam_rag::Result<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    fn dimensions(&self) -> usize {
        2
    }
}

struct EchoBackend;

#[async_trait]
impl TextGenerator for EchoBackend {
    async fn complete(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> qalam_model::Result<String> {
        Ok(format!("{prompt} Paris."))
    }
}

fn test_state() -> AppState {
    let mut index = VectorIndex::new(2);
    index.insert(0, "eng_00", vec![1.0, 0.0]).unwrap();
    let docs = DocumentSet::from_documents(vec![Document {
        id: "eng_00".into(),
        text: "Paris is the capital of France.".into(),
    }]);

    let retriever = Retriever::from_parts(
        Arc::new(StubEmbedder),
        HashMap::from([(Language::En, docs), (Language::Ar, DocumentSet::default())]),
        HashMap::from([(Language::En, index)]),
    );

    let chat = ChatService::new(
        Arc::new(retriever),
        Arc::new(Generator::new(Arc::new(EchoBackend))),
        1,
        LanguagePolicy::Default,
    );
    AppState { chat: Arc::new(chat) }
}

async fn spawn_server() -> (String, tokio::task::JoinHandle<()>) {
    let app = app_router(test_state());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    (format!("http://{}", addr), handle)
}

#[tokio::test]
async fn health_reports_ok() {
    let (base, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/health", base)).send().await.expect("health response");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("health json");
    assert_eq!(body.get("status").and_then(Value::as_str), Some("ok"));

    handle.abort();
}

#[tokio::test]
async fn chat_answers_an_english_question() {
    let (base, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/chat", base))
        .json(&serde_json::json!({"question": "What is the capital of France?"}))
        .send()
        .await
        .expect("chat response");
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.expect("chat json");
    let answer = body.get("response").and_then(Value::as_str).expect("response field");
    assert!(!answer.is_empty());

    handle.abort();
}

#[tokio::test]
async fn empty_question_is_a_400() {
    let (base, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/chat", base))
        .json(&serde_json::json!({"question": ""}))
        .send()
        .await
        .expect("chat response");
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.expect("error json");
    assert!(body.get("error").and_then(Value::as_str).is_some());

    handle.abort();
}

#[tokio::test]
async fn missing_question_field_is_a_400() {
    let (base, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/chat", base))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("chat response");
    assert_eq!(response.status().as_u16(), 400);

    handle.abort();
}

#[tokio::test]
async fn arabic_question_without_documents_gets_arabic_fallback() {
    let (base, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/chat", base))
        .json(&serde_json::json!({"question": "ما هي عاصمة فرنسا وأين تقع هذه المدينة؟"}))
        .send()
        .await
        .expect("chat response");
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.expect("chat json");
    let answer = body.get("response").and_then(Value::as_str).expect("response field");
    assert_eq!(answer, "لم أتمكن من العثور على معلومات ذات صلة للإجابة على سؤالك.");

    handle.abort();
}
