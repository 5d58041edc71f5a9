//! HTTP client wrapper shared by every resource service.

use super::cancel::CancelToken;
use super::error::ApiError;
use super::transport::{HttpRequest, Method, MultipartForm, RequestBody, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

const JSON: &str = "application/json";

/// Explicitly constructed client: base URL, shared headers and a transport.
///
/// Every call is attempted exactly once.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    default_headers: Vec<(String, String)>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_headers: Vec::new(),
            transport,
        }
    }

    /// Header sent with every request (callers may still override it)
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn url_with_query<Q: Serialize>(&self, path: &str, query: &Q) -> Result<String, ApiError> {
        let qs = serde_qs::to_string(query)
            .map_err(|e| ApiError::Parse(format!("parâmetros inválidos: {e}")))?;
        if qs.is_empty() {
            Ok(self.url(path))
        } else {
            Ok(format!("{}?{}", self.url(path), qs))
        }
    }

    /// Issue one request and normalise every failure into `ApiError`.
    ///
    /// Returns the parsed JSON body, or `None` for non-JSON / empty success
    /// responses (e.g. `204 No Content` after a delete).
    pub async fn execute(
        &self,
        method: Method,
        url: String,
        body: RequestBody,
        headers: &[(String, String)],
        cancel: &CancelToken,
    ) -> Result<Option<Value>, ApiError> {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let mut merged = Vec::new();
        if !matches!(body, RequestBody::Multipart(_)) {
            merged.push(("Content-Type".to_string(), JSON.to_string()));
        }
        merge_headers(&mut merged, &self.default_headers);
        merge_headers(&mut merged, headers);

        log::debug!("{} {}", method.as_str(), url);
        let request = HttpRequest {
            method,
            url,
            headers: merged,
            body,
        };
        let target = format!("{} {}", request.method.as_str(), request.url);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) if cancel.is_cancelled() => {
                log::debug!("{target}: falha após cancelamento: {e}");
                return Err(ApiError::Cancelled);
            }
            Err(e) => {
                log::warn!("{target}: servidor inacessível: {e}");
                return Err(ApiError::network(e.to_string()));
            }
        };

        if cancel.is_cancelled() {
            log::debug!("{target}: resposta ignorada, requisição cancelada");
            return Err(ApiError::Cancelled);
        }

        if !response.is_success() {
            let body = serde_json::from_str::<Value>(&response.body).unwrap_or(Value::Null);
            let error = ApiError::from_status(response.status, body);
            log::warn!("{target}: {} ({})", error, response.status);
            return Err(error);
        }

        if !response.is_json() || response.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&response.body).map(Some).map_err(|e| {
            log::error!("{target}: JSON inválido: {e}");
            ApiError::from(e)
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, cancel: &CancelToken) -> Result<T, ApiError> {
        let value = self
            .execute(Method::Get, self.url(path), RequestBody::Empty, &[], cancel)
            .await?;
        decode(value)
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q, cancel: &CancelToken) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let url = self.url_with_query(path, query)?;
        let value = self
            .execute(Method::Get, url, RequestBody::Empty, &[], cancel)
            .await?;
        decode(value)
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B, cancel: &CancelToken) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let json = serde_json::to_string(body)?;
        let value = self
            .execute(Method::Post, self.url(path), RequestBody::Json(json), &[], cancel)
            .await?;
        decode(value)
    }

    /// POST whose parameters travel in the query string
    pub async fn post_query<T, Q>(&self, path: &str, query: &Q, cancel: &CancelToken) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let url = self.url_with_query(path, query)?;
        let value = self
            .execute(Method::Post, url, RequestBody::Empty, &[], cancel)
            .await?;
        decode(value)
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
        cancel: &CancelToken,
    ) -> Result<T, ApiError> {
        let value = self
            .execute(Method::Post, self.url(path), RequestBody::Multipart(form), &[], cancel)
            .await?;
        decode(value)
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B, cancel: &CancelToken) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let json = serde_json::to_string(body)?;
        let value = self
            .execute(Method::Put, self.url(path), RequestBody::Json(json), &[], cancel)
            .await?;
        decode(value)
    }

    /// DELETE; any success status counts, the body is ignored
    pub async fn delete(&self, path: &str, cancel: &CancelToken) -> Result<(), ApiError> {
        self.execute(Method::Delete, self.url(path), RequestBody::Empty, &[], cancel)
            .await
            .map(|_| ())
    }
}

/// Later entries replace earlier ones with the same (case-insensitive) name
fn merge_headers(into: &mut Vec<(String, String)>, extra: &[(String, String)]) {
    for (name, value) in extra {
        into.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        into.push((name.clone(), value.clone()));
    }
}

fn decode<T: DeserializeOwned>(value: Option<Value>) -> Result<T, ApiError> {
    let value = value.ok_or_else(|| ApiError::Parse("resposta sem conteúdo JSON".to_string()))?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use crate::shared::api::transport::TransportError;
    use futures::executor::block_on;
    use serde_json::json;

    fn client(mock: &MockTransport) -> ApiClient {
        ApiClient::new("http://localhost:8000/api/v1/", mock.shared())
            .with_header("X-Client", "acfi-web")
    }

    #[test]
    fn test_url_join() {
        let mock = MockTransport::new();
        let api = client(&mock);
        assert_eq!(api.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(api.url("/documents"), "http://localhost:8000/api/v1/documents");
        assert_eq!(api.url("documents"), "http://localhost:8000/api/v1/documents");
    }

    #[test]
    fn test_json_headers_are_merged() {
        let mock = MockTransport::new();
        mock.respond_json(200, json!({ "ok": true }));
        let api = client(&mock);
        let token = CancelToken::new();
        let headers = vec![("x-client".to_string(), "override".to_string())];
        block_on(api.execute(Method::Get, api.url("/x"), RequestBody::Empty, &headers, &token)).unwrap();

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.header("X-Client"), Some("override"));
        assert_eq!(sent.headers.len(), 2);
    }

    #[test]
    fn test_multipart_does_not_force_json_content_type() {
        let mock = MockTransport::new();
        mock.respond_json(201, json!({ "id": "1" }));
        let api = client(&mock);
        let _: Value = block_on(api.post_multipart("/documents/upload", MultipartForm::default(), &CancelToken::new()))
            .unwrap();
        assert_eq!(mock.last_request().unwrap().header("content-type"), None);
    }

    #[test]
    fn test_http_error_carries_status_message_and_body() {
        let mock = MockTransport::new();
        mock.respond_json(400, json!({ "message": "pergunta vazia", "code": "EMPTY" }));
        let api = client(&mock);
        let err = block_on(api.get::<Value>("/chats/1", &CancelToken::new())).unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(err.to_string(), "pergunta vazia");
        assert_eq!(err.body()["code"], "EMPTY");
    }

    #[test]
    fn test_http_error_tolerates_invalid_body() {
        let mock = MockTransport::new();
        mock.respond_text(500, "text/html", "<h1>Internal Server Error</h1>");
        let api = client(&mock);
        let err = block_on(api.get::<Value>("/sessions", &CancelToken::new())).unwrap_err();
        assert_eq!(err, ApiError::from_status(500, Value::Null));
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn test_network_failure_rejects_with_status_zero() {
        let mock = MockTransport::new();
        mock.fail_network("connection refused");
        let api = client(&mock);
        let err = block_on(api.get::<Value>("/sessions", &CancelToken::new())).unwrap_err();
        assert!(err.is_network());
        assert_eq!(err.status(), 0);
    }

    #[test]
    fn test_no_content_resolves_empty() {
        let mock = MockTransport::new();
        mock.respond_empty(204);
        let api = client(&mock);
        let value = block_on(api.execute(
            Method::Delete,
            api.url("/documents/1"),
            RequestBody::Empty,
            &[],
            &CancelToken::new(),
        ))
        .unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_typed_call_on_empty_body_is_parse_error() {
        let mock = MockTransport::new();
        mock.respond_empty(200);
        let api = client(&mock);
        let err = block_on(api.get::<Value>("/dashboard/stats", &CancelToken::new())).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let mock = MockTransport::new();
        mock.respond_text(200, "application/json", "{ not json");
        let api = client(&mock);
        let err = block_on(api.get::<Value>("/dashboard/stats", &CancelToken::new())).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_cancelled_token_never_hits_the_network() {
        let mock = MockTransport::new();
        mock.respond_json(200, json!({}));
        let api = client(&mock);
        let token = CancelToken::new();
        token.cancel();
        let err = block_on(api.get::<Value>("/sessions", &token)).unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_transport_failure_after_cancel_is_cancelled() {
        let mock = MockTransport::new();
        let token = CancelToken::new();
        let inflight = token.clone();
        mock.with_handler(move |_| {
            inflight.cancel();
            Err(TransportError::Unreachable("aborted".into()))
        });
        let api = client(&mock);
        let err = block_on(api.get::<Value>("/sessions", &token)).unwrap_err();
        assert!(err.is_cancelled());
        assert!(!err.is_network());
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn test_query_encoding() {
        #[derive(Serialize)]
        struct Q<'a> {
            session_id: &'a str,
            question: &'a str,
            k: u32,
        }
        let mock = MockTransport::new();
        mock.respond_json(200, json!({}));
        let api = client(&mock);
        let q = Q {
            session_id: "s1",
            question: "Como calcular ICMS?",
            k: 50,
        };
        let _: Value = block_on(api.post_query("/chats", &q, &CancelToken::new())).unwrap();
        let sent = mock.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert!(sent.url.starts_with("http://localhost:8000/api/v1/chats?session_id=s1&question=Como"));
        assert!(sent.url.ends_with("&k=50"));
        assert!(!sent.url.contains(' '));
    }
}
