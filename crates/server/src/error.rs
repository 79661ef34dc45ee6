//! HTTP error responses

use crate::clients::LookupError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, detail: &str) -> Self {
        Self {
            error: error_type.to_string(),
            detail: detail.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Não foi possível comunicar com a API de clientes: {0}")]
    Upstream(String),

    #[error("Ocorreu um erro interno ao gerar o documento PDF: {0}")]
    Render(String),

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NotFound",
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::Upstream(_) => "GatewayTimeout",
            ApiError::Render(_) => "RenderFailure",
            ApiError::Storage(_) => "StorageError",
            ApiError::Internal(_) => "InternalServerError",
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(_) => {
                ApiError::NotFound("Cliente não encontrado na API externa.".to_string())
            }
            LookupError::Unavailable(reason) => ApiError::Upstream(reason),
        }
    }
}

impl From<contract::RenderError> for ApiError {
    fn from(err: contract::RenderError) -> Self {
        ApiError::Render(err.to_string())
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Render(_) | ApiError::Storage(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{self}");
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.kind(), &self.to_string()))
    }
}
