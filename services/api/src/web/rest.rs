//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the company REST endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::auth::{LoginCompany, LoginRequest, LoginResponse};
use crate::web::error::{into_http, ErrorResponse, HandlerError};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use company_directory_core::domain::{
    BusinessHour, Company, CompanyData, CompanyPatch, DEFAULT_RESET_PASSWORD,
};
use company_directory_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        root_handler,
        list_companies_handler,
        create_company_handler,
        get_company_handler,
        update_company_handler,
        delete_company_handler,
        reset_password_handler,
        crate::web::auth::login_handler,
    ),
    components(
        schemas(
            StatusResponse,
            BusinessHourPayload,
            CompanyPayload,
            CompanyPatchPayload,
            CompanyResponse,
            CreateCompanyResponse,
            MessageResponse,
            MsgResponse,
            ErrorResponse,
            LoginRequest,
            LoginResponse,
            LoginCompany,
        )
    ),
    tags(
        (name = "Company Directory API", description = "Company records, business hours and auto-reply settings.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BusinessHourPayload {
    pub dia: String,
    pub inicio: String,
    pub fim: String,
    pub ativo: bool,
}

impl From<BusinessHourPayload> for BusinessHour {
    fn from(p: BusinessHourPayload) -> Self {
        BusinessHour {
            day: p.dia,
            start: p.inicio,
            end: p.fim,
            active: p.ativo,
        }
    }
}

impl From<BusinessHour> for BusinessHourPayload {
    fn from(h: BusinessHour) -> Self {
        BusinessHourPayload {
            dia: h.day,
            inicio: h.start,
            fim: h.end,
            ativo: h.active,
        }
    }
}

fn hours_from_payload(hours: Vec<BusinessHourPayload>) -> Vec<BusinessHour> {
    hours.into_iter().map(BusinessHour::from).collect()
}

/// A complete company as accepted by the create endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CompanyPayload {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub numero: String,
    pub plano: String,
    #[serde(default)]
    pub mensagem_inicial: Option<String>,
    #[serde(default)]
    pub mensagem_fora_horario: Option<String>,
    #[serde(default)]
    pub tempo_resposta: Option<String>,
    #[serde(default)]
    pub tempo_resposta_ativo: Option<bool>,
    #[serde(default)]
    pub opcoes_resposta_rapida: Option<Vec<String>>,
    #[serde(default)]
    pub links_externos: Option<Vec<String>>,
    #[serde(default)]
    pub horario_funcionamento: Option<Vec<BusinessHourPayload>>,
}

impl From<CompanyPayload> for CompanyData {
    fn from(p: CompanyPayload) -> Self {
        let mut data = CompanyData::new(p.nome, p.email, p.senha, p.numero, p.plano);
        data.apply(CompanyPatch {
            initial_message: p.mensagem_inicial,
            after_hours_message: p.mensagem_fora_horario,
            response_time: p.tempo_resposta,
            response_time_enabled: p.tempo_resposta_ativo,
            quick_replies: p.opcoes_resposta_rapida,
            external_links: p.links_externos,
            business_hours: p.horario_funcionamento.map(hours_from_payload),
            ..Default::default()
        });
        data
    }
}

/// Body of an update. Every field is optional; unknown fields are rejected.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CompanyPatchPayload {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub numero: Option<String>,
    pub plano: Option<String>,
    pub mensagem_inicial: Option<String>,
    pub mensagem_fora_horario: Option<String>,
    pub tempo_resposta: Option<String>,
    pub tempo_resposta_ativo: Option<bool>,
    pub opcoes_resposta_rapida: Option<Vec<String>>,
    pub links_externos: Option<Vec<String>>,
    pub horario_funcionamento: Option<Vec<BusinessHourPayload>>,
}

impl From<CompanyPatchPayload> for CompanyPatch {
    fn from(p: CompanyPatchPayload) -> Self {
        CompanyPatch {
            name: p.nome,
            email: p.email,
            password: p.senha,
            phone: p.numero,
            plan: p.plano,
            initial_message: p.mensagem_inicial,
            after_hours_message: p.mensagem_fora_horario,
            response_time: p.tempo_resposta,
            response_time_enabled: p.tempo_resposta_ativo,
            quick_replies: p.opcoes_resposta_rapida,
            external_links: p.links_externos,
            business_hours: p.horario_funcionamento.map(hours_from_payload),
        }
    }
}

/// A stored company, with the store identifier exposed as `id`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyResponse {
    pub id: String,
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub numero: String,
    pub plano: String,
    pub mensagem_inicial: String,
    pub mensagem_fora_horario: String,
    pub tempo_resposta: String,
    pub tempo_resposta_ativo: bool,
    pub opcoes_resposta_rapida: Vec<String>,
    pub links_externos: Vec<String>,
    pub horario_funcionamento: Vec<BusinessHourPayload>,
}

impl From<Company> for CompanyResponse {
    fn from(c: Company) -> Self {
        let d = c.data;
        CompanyResponse {
            id: c.id,
            nome: d.name,
            email: d.email,
            senha: d.password,
            numero: d.phone,
            plano: d.plan,
            mensagem_inicial: d.initial_message,
            mensagem_fora_horario: d.after_hours_message,
            tempo_resposta: d.response_time,
            tempo_resposta_ativo: d.response_time_enabled,
            opcoes_resposta_rapida: d.quick_replies,
            links_externos: d.external_links,
            horario_funcionamento: d
                .business_hours
                .into_iter()
                .map(BusinessHourPayload::from)
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CreateCompanyResponse {
    pub id: String,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct MsgResponse {
    pub msg: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness check.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = StatusResponse))
)]
pub async fn root_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "API rodando".to_string(),
    })
}

/// List every company, in the store's natural order.
#[utoipa::path(
    get,
    path = "/empresas",
    responses(
        (status = 200, description = "All companies", body = [CompanyResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_companies_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<CompanyResponse>>, HandlerError> {
    let companies = app_state.db.list_companies().await.map_err(into_http)?;
    Ok(Json(companies.into_iter().map(CompanyResponse::from).collect()))
}

/// Register a new company. The email must not be registered yet.
#[utoipa::path(
    post,
    path = "/empresas",
    request_body = CompanyPayload,
    responses(
        (status = 200, description = "Company created", body = CreateCompanyResponse),
        (status = 400, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Missing or mistyped fields"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_company_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CompanyPayload>,
) -> Result<Json<CreateCompanyResponse>, HandlerError> {
    let db = &app_state.db;
    if db.email_exists(&payload.email).await.map_err(into_http)? {
        return Err(into_http(PortError::Conflict(payload.email)));
    }

    let id = db
        .insert_company(CompanyData::from(payload))
        .await
        .map_err(into_http)?;
    info!("Company {} created", id);
    Ok(Json(CreateCompanyResponse { id }))
}

/// Fetch one company by email.
#[utoipa::path(
    get,
    path = "/empresas/{email}",
    params(("email" = String, Path, description = "Registered email of the company.")),
    responses(
        (status = 200, description = "The company", body = CompanyResponse),
        (status = 404, description = "No company with that email", body = ErrorResponse)
    )
)]
pub async fn get_company_handler(
    State(app_state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<CompanyResponse>, HandlerError> {
    let company = app_state
        .db
        .get_company_by_email(&email)
        .await
        .map_err(into_http)?;
    Ok(Json(CompanyResponse::from(company)))
}

/// Update a company.
///
/// Only the fields present in the body are written; every other field keeps
/// its stored value.
#[utoipa::path(
    put,
    path = "/empresas/{email}",
    params(("email" = String, Path, description = "Registered email of the company.")),
    request_body = CompanyPatchPayload,
    responses(
        (status = 200, description = "Update applied", body = MessageResponse),
        (status = 400, description = "New email already registered", body = ErrorResponse),
        (status = 404, description = "No company with that email", body = ErrorResponse),
        (status = 422, description = "Unknown or mistyped fields")
    )
)]
pub async fn update_company_handler(
    State(app_state): State<Arc<AppState>>,
    Path(email): Path<String>,
    Json(payload): Json<CompanyPatchPayload>,
) -> Result<Json<MessageResponse>, HandlerError> {
    let db = &app_state.db;
    if !db.email_exists(&email).await.map_err(into_http)? {
        return Err(into_http(PortError::NotFound(email)));
    }

    let patch = CompanyPatch::from(payload);
    if let Some(new_email) = patch.email.as_deref() {
        if new_email != email && db.email_exists(new_email).await.map_err(into_http)? {
            return Err(into_http(PortError::Conflict(new_email.to_string())));
        }
    }
    if !patch.is_empty() {
        db.patch_company(&email, patch).await.map_err(into_http)?;
    }

    Ok(Json(MessageResponse {
        message: "Empresa atualizada com sucesso".to_string(),
    }))
}

/// Delete a company by email.
#[utoipa::path(
    delete,
    path = "/empresas/{email}",
    params(("email" = String, Path, description = "Registered email of the company.")),
    responses(
        (status = 200, description = "Company removed", body = MsgResponse),
        (status = 404, description = "No company with that email", body = ErrorResponse)
    )
)]
pub async fn delete_company_handler(
    State(app_state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<MsgResponse>, HandlerError> {
    app_state
        .db
        .delete_company(&email)
        .await
        .map_err(into_http)?;
    info!("Company {} removed", email);
    Ok(Json(MsgResponse {
        msg: "Empresa removida".to_string(),
    }))
}

/// Reset a company's password to the default value.
#[utoipa::path(
    patch,
    path = "/empresas/{id}/reset",
    params(("id" = String, Path, description = "Store identifier (24 hex digits).")),
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "No company with that identifier", body = ErrorResponse)
    )
)]
pub async fn reset_password_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), HandlerError> {
    app_state
        .db
        .set_password(&id, DEFAULT_RESET_PASSWORD)
        .await
        .map_err(into_http)?;
    info!("Password reset for company {}", id);
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Senha redefinida com sucesso".to_string(),
        }),
    ))
}
