//! # API REST
//!
//! REST API implementation for Folio.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `folio-core` for every decision.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::{
    routing::{delete, get, post},
    Router,
};
use folio_core::{AdminService, BlogResult, CoreConfig, DocumentService, WebhookService};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub(crate) admin: AdminService,
    pub(crate) webhooks: WebhookService,
}

impl AppState {
    /// Build the services from a resolved configuration.
    pub fn new(cfg: Arc<CoreConfig>) -> BlogResult<Self> {
        let gate = cfg.capability_gate()?;
        let verifier = cfg.signature_verifier()?;
        let documents = DocumentService::new(cfg.clone());

        Ok(Self {
            admin: AdminService::new(cfg, gate),
            webhooks: WebhookService::new(documents, verifier),
        })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_published_posts,
        handlers::get_published_post,
        handlers::verify,
        handlers::list_posts,
        handlers::get_post,
        handlers::create_post,
        handlers::update_post,
        handlers::delete_post,
        handlers::list_tags,
        handlers::create_tag,
        handlers::delete_tag,
        handlers::webhook_publish,
        handlers::webhook_replace,
        handlers::webhook_retract,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::PostSummaryRes,
        api_shared::PostListRes,
        api_shared::PostRes,
        api_shared::PostReq,
        api_shared::DeletedRes,
        api_shared::TagRes,
        api_shared::TagListRes,
        api_shared::TagReq,
        api_shared::TagCreatedRes,
        api_shared::TagRemovedRes,
        api_shared::VerifyReq,
        api_shared::VerifyRes,
        api_shared::WebhookRes,
    ))
)]
pub struct ApiDoc;

/// Build the full application router, including Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/posts", get(handlers::list_published_posts))
        .route("/posts/:slug", get(handlers::get_published_post))
        .route("/admin/verify", post(handlers::verify))
        .route(
            "/admin/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/admin/posts/:slug",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route(
            "/admin/tags",
            get(handlers::list_tags).post(handlers::create_tag),
        )
        .route("/admin/tags/:tag", delete(handlers::delete_tag))
        .route(
            "/webhook/posts",
            post(handlers::webhook_publish)
                .put(handlers::webhook_replace)
                .delete(handlers::webhook_retract),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
