//! Route-level tests driving the router with in-process providers

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use suvidhaa::config::AppConfig;
use suvidhaa::providers::{CompletionRequest, LlmProvider, ObjectStoreProvider, ResourceType};
use suvidhaa::server::{router, state::AppState};
use suvidhaa::storage::RecordStore;
use suvidhaa::{Error, Result};

const BOUNDARY: &str = "suvidhaa-test-boundary";

const STRUCTURED_REPLY: &str = r#"{
    "summary": "The municipality announces a public hearing.",
    "key_points": ["Hearing on Friday", "Open to all residents"],
    "affected_groups": ["Residents"],
    "key_dates": ["Friday"],
    "responsible_offices": ["Municipal Office"],
    "plain_language": "Come to the hearing on Friday."
}"#;

struct FakeLlm {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.prompts.lock().push(request.prompt.clone());
        self.reply.clone().ok_or_else(|| Error::llm("service unavailable"))
    }

    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

struct FakeObjectStore {
    fail: bool,
    keys: Mutex<Vec<String>>,
}

impl FakeObjectStore {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            keys: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ObjectStoreProvider for FakeObjectStore {
    async fn upload(&self, key: &str, _data: &[u8], _resource_type: ResourceType) -> Result<String> {
        self.keys.lock().push(key.to_string());
        if self.fail {
            Err(Error::object_store("quota exceeded"))
        } else {
            Ok(format!("https://res.example.com/{}", key))
        }
    }

    fn name(&self) -> &str {
        "fake-store"
    }
}

struct TestApp {
    router: Router,
    state: AppState,
    store: RecordStore,
}

fn app(llm: Arc<FakeLlm>, object_store: Option<Arc<FakeObjectStore>>) -> TestApp {
    let store = RecordStore::in_memory().unwrap();
    let object_store = object_store.map(|s| s as Arc<dyn ObjectStoreProvider>);
    let state = AppState::with_providers(AppConfig::default(), store.clone(), llm, object_store);
    TestApp {
        router: router(state.clone()),
        state,
        store,
    }
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

fn multipart(parts: &[Part<'_>]) -> Body {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    Body::from(body)
}

fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(multipart(parts))
        .unwrap()
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

fn upload_parts<'a>(title: &'a str, content_type: &'a str, data: &'a [u8]) -> Vec<Part<'a>> {
    vec![
        Part::Text("title", title),
        Part::Text("document_type", "notice"),
        Part::File {
            name: "file",
            file_name: "upload.bin",
            content_type,
            data,
        },
    ]
}

fn document_count(store: &RecordStore) -> usize {
    store.list::<suvidhaa::Document>(0, 1000).unwrap().len()
}

#[tokio::test]
async fn test_root_message() {
    let app = app(FakeLlm::replying("{}"), None);
    let (status, body) = send(&app.router, get("/api/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Welcome to Suvidhaa API - Your Bridge to Transparent Governance"
    );

    let response = app.router.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_follows_state() {
    let app = app(FakeLlm::replying("{}"), None);

    let response = app.router.clone().oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    app.state.set_ready(false);
    let response = app.router.clone().oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_text_upload_produces_structured_document() {
    let app = app(FakeLlm::replying(STRUCTURED_REPLY), Some(FakeObjectStore::new(false)));
    let text = "Public hearing on the new ward budget this Friday."; // 50 chars
    assert_eq!(text.chars().count(), 50);

    let req = multipart_request(
        "/api/documents/upload",
        &upload_parts("Test Notice", "text/plain", text.as_bytes()),
    );
    let (status, doc) = send(&app.router, req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["id"].as_str().is_some());
    assert_eq!(doc["title"], "Test Notice");
    assert_eq!(doc["document_type"], "notice");
    assert_eq!(doc["original_content"], text);
    assert_eq!(doc["summary_english"], "The municipality announces a public hearing.");
    assert!(!doc["key_points"].as_array().unwrap().is_empty());
    assert!(doc["file_url"].as_str().unwrap().starts_with("https://res.example.com/documents/"));
    assert!(!doc["file_base64"].as_str().unwrap().is_empty());

    let id = doc["id"].as_str().unwrap();
    let (status, fetched) = send(&app.router, get(&format!("/api/documents/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, doc);

    let (status, listed) = send(&app.router, get("/api/documents")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unsupported_type_rejected_without_record() {
    let llm = FakeLlm::replying(STRUCTURED_REPLY);
    let app = app(llm.clone(), None);

    let req = multipart_request(
        "/api/documents/upload",
        &upload_parts("Photo", "image/png", b"\x89PNG\r\n\x1a\n"),
    );
    let (status, body) = send(&app.router, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "unsupported_type");
    assert_eq!(document_count(&app.store), 0);
    assert!(llm.prompts.lock().is_empty());
}

#[tokio::test]
async fn test_object_store_failure_keeps_inline_copy() {
    let object_store = FakeObjectStore::new(true);
    let app = app(FakeLlm::replying(STRUCTURED_REPLY), Some(object_store.clone()));

    let req = multipart_request(
        "/api/documents/upload",
        &upload_parts("Notice", "text/plain", b"Road closed for repairs"),
    );
    let (status, doc) = send(&app.router, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(object_store.keys.lock().len(), 1);
    assert!(doc["file_url"].is_null());
    assert_eq!(doc["file_base64"], "Um9hZCBjbG9zZWQgZm9yIHJlcGFpcnM=");
    assert_eq!(document_count(&app.store), 1);
}

#[tokio::test]
async fn test_long_content_truncated_for_model_only() {
    let llm = FakeLlm::replying(STRUCTURED_REPLY);
    let app = app(llm.clone(), None);
    let content = format!("{}{}", "b".repeat(8000), "OVERFLOW");

    let req = multipart_request(
        "/api/documents/upload",
        &upload_parts("Annual Budget", "text/plain", content.as_bytes()),
    );
    let (status, doc) = send(&app.router, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["original_content"].as_str().unwrap().chars().count(), 8008);

    let prompts = llm.prompts.lock();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(&"b".repeat(8000)));
    assert!(!prompts[0].contains("OVERFLOW"));
}

#[tokio::test]
async fn test_extraction_and_model_failure_still_persist() {
    let app = app(FakeLlm::failing(), None);

    let req = multipart_request(
        "/api/documents/upload",
        &upload_parts("Broken PDF", "application/pdf", b"%PDF-1.4 truncated garbage"),
    );
    let (status, doc) = send(&app.router, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["original_content"], "Error extracting text from PDF");
    assert_eq!(
        doc["summary_english"],
        "AI processing temporarily unavailable. Document uploaded successfully."
    );
    assert_eq!(doc["key_points"], json!(["Document requires manual review"]));
    assert_eq!(doc["affected_groups"], json!(["General public"]));
    assert_eq!(doc["key_dates"], json!([]));
    assert_eq!(doc["responsible_offices"], json!(["To be determined"]));
    assert_eq!(doc["plain_language"], "AI analysis will be available shortly.");
    assert_eq!(document_count(&app.store), 1);
}

#[tokio::test]
async fn test_plain_text_reply_becomes_unstructured() {
    let app = app(FakeLlm::replying("This notice is about parking rules."), None);

    let req = multipart_request(
        "/api/documents/upload",
        &upload_parts("Parking", "text/plain", b"No parking on Main Street"),
    );
    let (status, doc) = send(&app.router, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["summary_english"], "This notice is about parking rules.");
    assert_eq!(doc["responsible_offices"], json!(["To be determined"]));
}

#[tokio::test]
async fn test_upload_missing_title_is_bad_request() {
    let app = app(FakeLlm::replying("{}"), None);
    let req = multipart_request(
        "/api/documents/upload",
        &[Part::File {
            name: "file",
            file_name: "a.txt",
            content_type: "text/plain",
            data: b"hello",
        }],
    );
    let (status, body) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "bad_request");
}

#[tokio::test]
async fn test_unknown_document_is_not_found() {
    let app = app(FakeLlm::replying("{}"), None);

    let (status, _) = send(
        &app.router,
        get("/api/documents/6a1f0c8e-2b1d-4c3e-9f8a-0d6b5e4c3a21"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app.router, get("/api/documents/not-a-uuid")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_suggestion_and_cosign() {
    let app = app(FakeLlm::replying("{}"), None);

    let (status, suggestion) = send(
        &app.router,
        json_request(
            "/api/suggestions",
            json!({
                "user_name": "Anita",
                "email": "anita@example.com",
                "suggestion_text": "Extend library hours",
                "category": "education"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(suggestion["status"], "public");
    let id = suggestion["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app.router,
        multipart_request(
            &format!("/api/suggestions/{}/cosign", id),
            &[
                Part::Text("signer_name", "Bikash"),
                Part::Text("signer_email", "bikash@example.com"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Co-signature added successfully");

    // Urlencoded forms work too
    let req = Request::builder()
        .method("POST")
        .uri(format!("/api/suggestions/{}/cosign", id))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("signer_name=Chandra&signer_email=chandra%40example.com"))
        .unwrap();
    let (status, _) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::OK);

    let (_, submissions) = send(&app.router, get("/api/submissions?user_email=anita@example.com")).await;
    let signatures = submissions["suggestions"][0]["co_signatures"].as_array().unwrap().clone();
    assert_eq!(signatures.len(), 2);
    assert_eq!(signatures[0]["name"], "Bikash");
    assert_eq!(signatures[1]["email"], "chandra@example.com");

    let (status, _) = send(
        &app.router,
        multipart_request(
            "/api/suggestions/6a1f0c8e-2b1d-4c3e-9f8a-0d6b5e4c3a21/cosign",
            &[
                Part::Text("signer_name", "Bikash"),
                Part::Text("signer_email", "bikash@example.com"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_grievance_with_evidence() {
    let object_store = FakeObjectStore::new(false);
    let app = app(FakeLlm::replying("{}"), Some(object_store.clone()));

    let req = multipart_request(
        "/api/grievances",
        &[
            Part::Text("user_name", "Dipak"),
            Part::Text("email", "dipak@example.com"),
            Part::Text("phone", "9800000001"),
            Part::Text("grievance_text", "Garbage not collected for two weeks"),
            Part::Text("category", "sanitation"),
            Part::Text("affected_area", "Ward 12"),
            Part::Text("government_office", "Metropolitan City Office"),
            Part::File {
                name: "evidence_files",
                file_name: "street.jpg",
                content_type: "image/jpeg",
                data: b"jpeg-bytes",
            },
        ],
    );
    let (status, grievance) = send(&app.router, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(grievance["status"], "filed");
    assert_eq!(grievance["evidence_base64"], json!(["anBlZy1ieXRlcw=="]));
    let urls = grievance["evidence_urls"].as_array().unwrap();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].as_str().unwrap().contains("/grievance_evidence/"));
    assert!(object_store.keys.lock()[0].starts_with("grievance_evidence/"));
}

#[tokio::test]
async fn test_question_evidence_skips_unnamed_parts() {
    let object_store = FakeObjectStore::new(false);
    let app = app(FakeLlm::replying("{}"), Some(object_store.clone()));

    let req = multipart_request(
        "/api/questions",
        &[
            Part::Text("user_name", "Gita"),
            Part::Text("email", "gita@example.com"),
            Part::Text("question_text", "Why is the water supply cut every Tuesday?"),
            Part::Text("category", "utilities"),
            Part::Text("government_office", "Water Supply Board"),
            Part::File {
                name: "evidence_files",
                file_name: "notice.pdf",
                content_type: "application/pdf",
                data: b"notice-bytes",
            },
            Part::File {
                name: "evidence_files",
                file_name: "",
                content_type: "application/octet-stream",
                data: b"",
            },
        ],
    );
    let (status, question) = send(&app.router, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(question["evidence_base64"], json!(["bm90aWNlLWJ5dGVz"]));
    let urls = question["evidence_urls"].as_array().unwrap();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].as_str().unwrap().contains("/evidence/"));

    let keys = object_store.keys.lock();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].starts_with("evidence/"));
}

#[tokio::test]
async fn test_question_stats_and_submissions() {
    let app = app(FakeLlm::replying(STRUCTURED_REPLY), None);

    let req = multipart_request(
        "/api/questions",
        &[
            Part::Text("user_name", "Esha"),
            Part::Text("email", "esha@example.com"),
            Part::Text("question_text", "When will the bridge reopen?"),
            Part::Text("category", "infrastructure"),
            Part::Text("government_office", "Department of Roads"),
        ],
    );
    let (status, question) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(question["status"], "submitted");
    assert!(question["phone"].is_null());
    assert_eq!(question["evidence_urls"], json!([]));

    let req = multipart_request(
        "/api/documents/upload",
        &upload_parts("Bridge Notice", "text/plain", b"Bridge closed until June"),
    );
    let (status, _) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) = send(&app.router, get("/api/dashboard/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_documents"], 1);
    assert_eq!(stats["documents_this_month"], 1);
    assert_eq!(stats["total_questions"], 1);
    assert_eq!(stats["answered_questions"], 0);
    assert_eq!(stats["total_grievances"], 0);

    let (status, submissions) = send(&app.router, get("/api/submissions?user_email=esha@example.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submissions["questions"].as_array().unwrap().len(), 1);
    assert!(submissions["grievances"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_watchlists() {
    let app = app(FakeLlm::replying("{}"), None);

    let (status, watchlist) = send(
        &app.router,
        json_request(
            "/api/watchlists",
            json!({
                "user_email": "farah@example.com",
                "name": "Health budget",
                "keywords": ["health", "budget"],
                "categories": ["budget"],
                "government_offices": ["Ministry of Health"]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(watchlist["notification_frequency"], "daily");

    let (status, listed) = send(&app.router, get("/api/watchlists?user_email=farah@example.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "Health budget");

    let (_, other) = send(&app.router, get("/api/watchlists?user_email=nobody@example.com")).await;
    assert!(other.as_array().unwrap().is_empty());
}
