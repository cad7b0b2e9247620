pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth;
use crate::generation;
use crate::resumes;
use crate::state::AppState;
use crate::storage;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/v1/auth/me", get(auth::handlers::handle_me))
        .route(
            "/api/v1/resumes",
            post(resumes::handlers::handle_create).get(resumes::handlers::handle_list),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handlers::handle_get)
                .put(resumes::handlers::handle_update)
                .delete(resumes::handlers::handle_delete),
        )
        .route(
            "/api/v1/resumes/:id/ats-score",
            post(resumes::handlers::handle_ats_score),
        )
        .route(
            "/api/v1/resumes/generate",
            post(generation::handlers::handle_generate),
        )
        .route("/api/v1/uploads/image", post(storage::handle_upload_image))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::authenticate,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/auth/register", post(auth::handlers::handle_register))
        .route("/api/v1/auth/login", post(auth::handlers::handle_login))
        .merge(protected)
        .with_state(state)
}
