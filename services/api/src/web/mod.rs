pub mod auth;
pub mod error;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use self::auth::login_handler;
use self::rest::{
    create_company_handler, delete_company_handler, get_company_handler,
    list_companies_handler, reset_password_handler, root_handler, update_company_handler,
};
use self::state::AppState;

pub use rest::ApiDoc;

/// Builds the API router with CORS and request tracing.
///
/// Any origin, method and header is accepted with credentials. The allowed
/// values are mirrored from the request because a literal `*` cannot be
/// combined with credentials.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route("/", get(root_handler))
        .route("/login", post(login_handler))
        .route(
            "/empresas",
            get(list_companies_handler).post(create_company_handler),
        )
        .route(
            "/empresas/{email}",
            get(get_company_handler)
                .put(update_company_handler)
                .delete(delete_company_handler),
        )
        .route("/empresas/{id}/reset", patch(reset_password_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
