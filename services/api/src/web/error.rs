//! services/api/src/web/error.rs
//!
//! Translates port errors into HTTP responses.

use axum::{http::StatusCode, Json};
use company_directory_core::ports::PortError;
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// The error half of every handler's result.
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub fn into_http(err: PortError) -> HandlerError {
    let (status, detail) = match &err {
        PortError::NotFound(_) => (StatusCode::NOT_FOUND, "Empresa não encontrada"),
        PortError::Conflict(_) => (StatusCode::BAD_REQUEST, "Empresa já cadastrada"),
        PortError::Unauthorized => (StatusCode::UNAUTHORIZED, "Email ou senha inválidos"),
        PortError::InvalidIdentifier(_) => (StatusCode::BAD_REQUEST, "ID inválido"),
        PortError::Unexpected(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Erro interno do servidor"),
    };

    if status.is_server_error() {
        error!("Request failed: {:?}", err);
    } else {
        debug!("Request rejected: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            detail: detail.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_port_error_has_its_status() {
        let cases = [
            (PortError::NotFound("a".into()), StatusCode::NOT_FOUND),
            (PortError::Conflict("a".into()), StatusCode::BAD_REQUEST),
            (PortError::Unauthorized, StatusCode::UNAUTHORIZED),
            (PortError::InvalidIdentifier("a".into()), StatusCode::BAD_REQUEST),
            (PortError::Unexpected("a".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(into_http(err).0, expected);
        }
    }

    #[test]
    fn unexpected_errors_hide_their_cause() {
        let (_, Json(body)) = into_http(PortError::Unexpected("connection refused".into()));
        assert_eq!(body.detail, "Erro interno do servidor");
    }
}
