use axum::{routing::get, Extension, Router};
use std::sync::Arc;

use crate::controllers;
use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(controllers::health))
        .route(
            "/api/v1/organizations/:organization_id/messages",
            get(controllers::list_messages).post(controllers::create_message),
        )
        .route(
            "/api/v1/organizations/:organization_id/messages/:id",
            get(controllers::get_message)
                .put(controllers::update_message)
                .delete(controllers::delete_message),
        )
        .layer(Extension(state))
}
