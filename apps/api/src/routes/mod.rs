pub mod health;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::documents::handlers as documents;
use crate::rate_limit::rate_limit_middleware;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::steps::handlers as steps;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Wizard steps
        .route("/api/v1/steps/:document_type", get(steps::handle_get_structure))
        .route(
            "/api/v1/steps/:document_type/progress",
            post(steps::handle_progress),
        )
        .route(
            "/api/v1/steps/:document_type/components/:component",
            get(steps::handle_get_step_by_component),
        )
        // Templates and rendering
        .route("/api/v1/templates", get(render::handle_list_templates))
        .route("/api/v1/templates/:id", get(render::handle_get_template))
        .route("/api/v1/render", post(render::handle_render))
        .route(
            "/api/v1/admin/templates",
            post(render::handle_create_template),
        )
        .route(
            "/api/v1/admin/templates/:id",
            delete(render::handle_delete_template),
        )
        // Documents
        .route(
            "/api/v1/documents",
            get(documents::handle_list_documents).post(documents::handle_create_document),
        )
        .route(
            "/api/v1/documents/:id",
            get(documents::handle_get_document)
                .put(documents::handle_update_document)
                .delete(documents::handle_delete_document),
        )
        .route(
            "/api/v1/documents/:id/export",
            get(documents::handle_export_document),
        )
        // AI suggestions
        .route("/api/v1/ai/suggest", post(suggestions::handle_suggest))
        // Auth
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/session", get(auth::handle_session))
        .route("/api/v1/admin/users", get(auth::handle_list_users))
        .layer(from_fn_with_state(
            state.request_limiter.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(api)
        .with_state(state)
}
