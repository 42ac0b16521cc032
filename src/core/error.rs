//! 核心错误处理模块

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{error, warn};

use crate::infrastructure::{Collection, RepositoryError};

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    pub code: u16,
    pub timestamp: String,
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CoreError::BadRequest(msg)
            | CoreError::NotFound(msg)
            | CoreError::InternalServerError(msg) => msg,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status(), self.message())
    }
}

impl std::error::Error for CoreError {}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = match self {
            CoreError::BadRequest(_) => "BAD_REQUEST",
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        };

        let error_response = ErrorResponse {
            error: self.message().to_string(),
            kind: kind.to_string(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

/// 记录不存在时返回给客户端的提示
pub fn not_found_message(collection: Collection) -> &'static str {
    match collection {
        Collection::Products => "Produto não encontrado.",
        Collection::Customers => "Cliente não encontrado.",
        Collection::Shipments => "Envio não encontrado.",
    }
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { collection, .. } => {
                CoreError::NotFound(not_found_message(collection).to_string())
            }
            other => {
                error!("存储错误: {}", other);
                CoreError::InternalServerError("Erro interno ao acessar os dados.".to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        // 多个字段共用同一条提示时只保留一次
        let messages: BTreeSet<String> = err
            .field_errors()
            .into_values()
            .flat_map(|errors| {
                errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("Campo inválido: {}", error.code))
                })
            })
            .collect();

        CoreError::BadRequest(messages.into_iter().collect::<Vec<_>>().join(" "))
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("请求体无法解析: {}", rejection.body_text());
        CoreError::BadRequest(format!("Corpo da requisição inválido: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::StoreError;

    #[test]
    fn test_not_found_maps_to_entity_message() {
        let err: CoreError = RepositoryError::NotFound {
            collection: Collection::Shipments,
            id: "1".to_string(),
        }
        .into();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Envio não encontrado.");
    }

    #[test]
    fn test_storage_faults_are_internal() {
        let err: CoreError = RepositoryError::Store(StoreError::Read {
            collection: Collection::Products,
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "negado"),
        })
        .into();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("negado"));
    }

    #[test]
    fn test_error_response_status() {
        let response = CoreError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
