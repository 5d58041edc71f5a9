use contracts::shared::ContractError;
use thiserror::Error;

/// Single error shape for every backend call.
///
/// `status()` is 0 whenever the server could not be reached or the call
/// was abandoned, so "server down" and "server said no" stay distinct.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Erro de conexão com o servidor: {message}")]
    Network { message: String },

    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        body: serde_json::Value,
    },

    #[error("Resposta inválida do servidor: {0}")]
    Parse(String),

    /// Rejected before any request was sent
    #[error("{0}")]
    Invalid(String),

    #[error("Requisição cancelada")]
    Cancelled,
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    /// Build an HTTP error from a status and whatever body came back.
    ///
    /// The message is taken from `message`, then FastAPI's `detail`,
    /// otherwise `HTTP {status}`.
    pub fn from_status(status: u16, body: serde_json::Value) -> Self {
        let message = ["message", "detail"]
            .iter()
            .find_map(|key| body.get(key).and_then(serde_json::Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}"));
        ApiError::Http {
            status,
            message,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => *status,
            ApiError::Network { .. } | ApiError::Parse(_) | ApiError::Invalid(_) | ApiError::Cancelled => 0,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == 404
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ApiError::Invalid(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Raw error body, `Null` when none was sent
    pub fn body(&self) -> &serde_json::Value {
        match self {
            ApiError::Http { body, .. } => body,
            _ => &serde_json::Value::Null,
        }
    }

    /// Text suitable for a banner or a transcript entry
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { status, message, .. } if *status >= 500 => {
                format!("O servidor encontrou um erro ({status}): {message}")
            }
            ApiError::Http { status: 404, .. } => "Recurso não encontrado".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ContractError> for ApiError {
    fn from(e: ContractError) -> Self {
        ApiError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_from_body() {
        let e = ApiError::from_status(422, json!({ "message": "categoria inválida", "field": "category" }));
        assert_eq!(e.status(), 422);
        assert_eq!(e.to_string(), "categoria inválida");
        assert_eq!(e.body()["field"], "category");
    }

    #[test]
    fn test_message_from_fastapi_detail() {
        let e = ApiError::from_status(404, json!({ "detail": "Session not found" }));
        assert_eq!(e.to_string(), "Session not found");
        assert!(e.is_not_found());
    }

    #[test]
    fn test_generic_message_for_empty_body() {
        let e = ApiError::from_status(503, serde_json::Value::Null);
        assert_eq!(e.to_string(), "HTTP 503");
        assert_eq!(e.user_message(), "O servidor encontrou um erro (503): HTTP 503");
    }

    #[test]
    fn test_network_errors_have_status_zero() {
        let e = ApiError::network("connection refused");
        assert_eq!(e.status(), 0);
        assert!(e.is_network());
        assert_eq!(ApiError::Cancelled.status(), 0);
    }

    #[test]
    fn test_local_rejection_is_not_an_http_status() {
        let e = ApiError::Invalid("Informe um nome para a sessão".into());
        assert_eq!(e.status(), 0);
        assert!(e.is_invalid());
        assert!(!e.is_network());
        assert_eq!(e.user_message(), "Informe um nome para a sessão");
    }
}
