//! In-memory transports for native tests.

use super::transport::{HttpRequest, HttpResponse, Method, RequestBody, Transport, TransportError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const BASE: &str = "http://localhost:8000/api/v1";

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// Records every request and answers through a swappable handler
#[derive(Clone)]
pub struct MockTransport {
    handler: Arc<Mutex<Arc<Handler>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        let not_found: Arc<Handler> = Arc::new(|_| Ok(json_response(404, json!({ "detail": "Not Found" }))));
        Self {
            handler: Arc::new(Mutex::new(not_found)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn shared(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    pub fn with_handler(
        &self,
        handler: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    ) {
        *self.handler.lock().unwrap() = Arc::new(handler);
    }

    pub fn respond_json(&self, status: u16, body: Value) {
        self.with_handler(move |_| Ok(json_response(status, body.clone())));
    }

    pub fn respond_text(&self, status: u16, content_type: &str, body: &str) {
        let content_type = content_type.to_string();
        let body = body.to_string();
        self.with_handler(move |_| {
            Ok(HttpResponse {
                status,
                content_type: Some(content_type.clone()),
                body: body.clone(),
            })
        });
    }

    pub fn respond_empty(&self, status: u16) {
        self.with_handler(move |_| {
            Ok(HttpResponse {
                status,
                content_type: None,
                body: String::new(),
            })
        });
    }

    pub fn fail_network(&self, message: &str) {
        let message = message.to_string();
        self.with_handler(move |_| Err(TransportError::Unreachable(message.clone())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let handler = self.handler.lock().unwrap().clone();
        handler(&request)
    }
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    }
}

#[derive(Default)]
struct FakeState {
    sessions: Vec<Value>,
    documents: Vec<Value>,
    messages: Vec<Value>,
    next_id: u64,
    offline: bool,
}

impl FakeState {
    fn id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }
}

/// Small stateful stand-in for the REST backend.
///
/// Sessions and chat messages are listed as bare arrays (`skip`/`limit`),
/// documents inside a paginated envelope, errors as `{detail}`.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport(&self) -> MockTransport {
        let mock = MockTransport::new();
        let backend = self.clone();
        mock.with_handler(move |req| backend.route(req));
        mock
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub fn seed_documents(&self, count: usize) {
        let mut state = self.state.lock().unwrap();
        for i in 0..count {
            let id = state.id();
            state.documents.push(json!({
                "id": id,
                "filename": format!("doc_{i:02}.pdf"),
                "file_type": "application/pdf",
                "file_size": 1024 * (i + 1),
                "category": "legislacao",
                "status": "completed",
                "chunks_count": 3,
                "created_at": "2024-05-01T10:00:00",
            }));
        }
    }

    pub fn seed_session(&self, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.id();
        state.sessions.push(json!({
            "id": id,
            "name": name,
            "created_at": "2024-05-01T10:00:00",
            "updated_at": "2024-05-01T10:00:00",
        }));
        id
    }

    fn route(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        if state.offline {
            return Err(TransportError::Unreachable("Failed to fetch".to_string()));
        }
        let full = req.path_from(BASE);
        let (path, query) = full.split_once('?').unwrap_or((full, ""));
        let query: HashMap<String, String> = serde_qs::from_str(query).unwrap_or_default();
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let now = chrono::Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();

        let skip: usize = query.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
        let limit: usize = query.get("limit").and_then(|v| v.parse().ok()).unwrap_or(100);

        let response = match (req.method, segments.as_slice()) {
            (Method::Get, ["sessions"]) => {
                let page: Vec<Value> = state.sessions.iter().skip(skip).take(limit).cloned().collect();
                json_response(200, Value::Array(page))
            }
            (Method::Post, ["sessions"]) => {
                let body = json_body(req);
                let id = state.id();
                let session = json!({
                    "id": id,
                    "name": body["name"],
                    "description": body["description"],
                    "created_at": now,
                    "updated_at": now,
                    "metadata": { "message_count": 0 },
                });
                state.sessions.push(session.clone());
                json_response(201, session)
            }
            (method, ["sessions", id]) => match find(&state.sessions, id) {
                None => json_response(404, json!({ "detail": "Session not found" })),
                Some(pos) => match method {
                    Method::Get => json_response(200, state.sessions[pos].clone()),
                    Method::Put => {
                        let body = json_body(req);
                        if let Some(name) = body.get("name") {
                            state.sessions[pos]["name"] = name.clone();
                        }
                        state.sessions[pos]["updated_at"] = json!(now);
                        json_response(200, state.sessions[pos].clone())
                    }
                    Method::Delete => {
                        state.sessions.remove(pos);
                        json_response(200, json!({ "message": "Session deleted" }))
                    }
                    Method::Post => json_response(405, json!({ "detail": "Method Not Allowed" })),
                },
            },
            (Method::Get, ["documents"]) => {
                let total = state.documents.len();
                let page: Vec<Value> = state.documents.iter().skip(skip).take(limit).cloned().collect();
                let per_page = limit.max(1);
                json_response(
                    200,
                    json!({
                        "data": page,
                        "page": skip / per_page + 1,
                        "per_page": per_page,
                        "total": total,
                        "total_pages": total.div_ceil(per_page),
                    }),
                )
            }
            (Method::Post, ["documents", "upload"]) => match &req.body {
                RequestBody::Multipart(form) => {
                    let Some(file) = &form.file else {
                        return Ok(json_response(422, json!({ "detail": "file is required" })));
                    };
                    let id = state.id();
                    let doc = json!({
                        "id": id,
                        "filename": file.filename,
                        "file_type": file.content_type,
                        "file_size": file.bytes.len(),
                        "category": form.field("category").unwrap_or("legislacao"),
                        "tags": form.field("tags"),
                        "status": "completed",
                        "chunks_count": 1,
                        "created_at": now,
                        "processed_at": now,
                    });
                    state.documents.push(doc.clone());
                    json_response(
                        200,
                        json!({
                            "id": doc["id"],
                            "filename": doc["filename"],
                            "status": "completed",
                            "chunks_count": 1,
                            "processed_at": now,
                        }),
                    )
                }
                _ => json_response(422, json!({ "detail": "multipart body expected" })),
            },
            (Method::Get, ["documents", "vector", "info"]) => json_response(
                200,
                json!({ "collection_name": "acfi_docs", "document_count": state.documents.len() }),
            ),
            (method, ["documents", id]) => match find(&state.documents, id) {
                None => json_response(404, json!({ "detail": "Document not found" })),
                Some(pos) => match method {
                    Method::Get => json_response(200, json!({ "data": state.documents[pos] })),
                    Method::Delete => {
                        state.documents.remove(pos);
                        HttpResponse {
                            status: 204,
                            content_type: None,
                            body: String::new(),
                        }
                    }
                    _ => json_response(405, json!({ "detail": "Method Not Allowed" })),
                },
            },
            (Method::Post, ["chats"]) => {
                let session_id = query.get("session_id").cloned().unwrap_or_default();
                let question = query.get("question").cloned().unwrap_or_default();
                if find(&state.sessions, &session_id).is_none() {
                    return Ok(json_response(404, json!({ "detail": "Session not found" })));
                }
                let answer = format!("Resposta para: {question}");
                for (role, content) in [("user", question.clone()), ("assistant", answer.clone())] {
                    let id = state.id();
                    state.messages.push(json!({
                        "id": id,
                        "session_id": session_id,
                        "role": role,
                        "content": content,
                        "created_at": now,
                    }));
                }
                json_response(
                    200,
                    json!({
                        "question": question,
                        "answer": answer,
                        "sources": [{
                            "number": 1,
                            "filename": "lei_kandir.pdf",
                            "content_preview": "Art. 13...",
                            "relevance_score": 0.91
                        }],
                        "chunks_used": 1,
                        "cited_excerpts": [],
                    }),
                )
            }
            (Method::Get, ["chats", "session", id]) => {
                let list: Vec<Value> = state
                    .messages
                    .iter()
                    .filter(|m| m["session_id"] == *id)
                    .skip(skip)
                    .take(limit)
                    .cloned()
                    .collect();
                json_response(200, Value::Array(list))
            }
            (method, ["chats", id]) => match find(&state.messages, id) {
                None => json_response(404, json!({ "detail": "Chat not found" })),
                Some(pos) => match method {
                    Method::Get => json_response(200, state.messages[pos].clone()),
                    Method::Put => {
                        if let Some(content) = json_body(req).get("content") {
                            state.messages[pos]["content"] = content.clone();
                        }
                        json_response(200, state.messages[pos].clone())
                    }
                    Method::Delete => {
                        state.messages.remove(pos);
                        json_response(200, json!({ "message": "Chat deleted" }))
                    }
                    Method::Post => json_response(405, json!({ "detail": "Method Not Allowed" })),
                },
            },
            _ => json_response(404, json!({ "detail": "Not Found" })),
        };
        Ok(response)
    }
}

fn find(items: &[Value], id: &str) -> Option<usize> {
    items.iter().position(|item| item["id"] == id)
}

fn json_body(req: &HttpRequest) -> Value {
    match &req.body {
        RequestBody::Json(json) => serde_json::from_str(json).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
