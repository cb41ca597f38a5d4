//! services/api/src/web/auth.rs
//!
//! Credential check for company login.

use axum::{extract::State, Json};
use company_directory_core::domain::Company;
use company_directory_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::web::error::{into_http, ErrorResponse, HandlerError};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// Missing fields read as empty strings, which never match a stored record.
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
}

/// The subset of company fields returned on a successful login.
#[derive(Serialize, ToSchema)]
pub struct LoginCompany {
    pub id: String,
    pub nome: String,
    pub email: String,
    pub numero: String,
    pub plano: String,
    pub senha: String,
}

impl From<Company> for LoginCompany {
    fn from(c: Company) -> Self {
        LoginCompany {
            id: c.id,
            nome: c.data.name,
            email: c.data.email,
            numero: c.data.phone,
            plano: c.data.plan,
            senha: c.data.password,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub empresa: LoginCompany,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /login - Check a company's email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HandlerError> {
    let company = state
        .db
        .find_by_credentials(&req.email, &req.senha)
        .await
        .map_err(|e| match e {
            PortError::NotFound(_) => into_http(PortError::Unauthorized),
            other => into_http(other),
        })?;

    info!("Company {} logged in", company.id);
    Ok(Json(LoginResponse {
        message: "Login realizado com sucesso".to_string(),
        empresa: LoginCompany::from(company),
    }))
}
