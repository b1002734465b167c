use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use orgboard_core::{Message, MessageRequest, Outcome};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::{health_with_repository, AppState};

pub const MESSAGES_BASE: &str = "/api/v1/organizations";

/// Percorso canonico di un messaggio, usato per l'header Location.
pub fn message_location(organization_id: Uuid, id: Uuid) -> String {
    format!("{}/{}/messages/{}", MESSAGES_BASE, organization_id, id)
}

// un guasto dello storage non è un esito di business: log e 500 senza dettagli
fn storage_failure(op: &str, e: RepositoryError) -> StatusCode {
    tracing::error!(operation = op, error = %e, "repository failure");
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Handler per GET /health
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> StatusCode {
    health_with_repository(state.repo.as_ref()).await
}

/// Handler per GET /api/v1/organizations/{organizationId}/messages
pub async fn list_messages(
    Extension(state): Extension<Arc<AppState>>,
    Path(organization_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, StatusCode> {
    let messages = state
        .messages
        .list_all(organization_id)
        .await
        .map_err(|e| storage_failure("list", e))?;
    Ok(Json(messages))
}

/// Handler per GET /api/v1/organizations/{organizationId}/messages/{id}
pub async fn get_message(
    Extension(state): Extension<Arc<AppState>>,
    Path((organization_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Message>, StatusCode> {
    match state.messages.get_by_id(organization_id, id).await {
        Ok(Some(message)) => Ok(Json(message)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(storage_failure("get", e)),
    }
}

/// Handler per POST /api/v1/organizations/{organizationId}/messages
pub async fn create_message(
    Extension(state): Extension<Arc<AppState>>,
    Path(organization_id): Path<Uuid>,
    Json(req): Json<MessageRequest>,
) -> Response {
    // organizationId arriva sempre dal path, mai dal body
    let outcome = match state.messages.create(organization_id, req).await {
        Ok(outcome) => outcome,
        Err(e) => return storage_failure("create", e).into_response(),
    };
    match outcome {
        Outcome::Created(message) => {
            let location = message_location(message.organization_id, message.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(message),
            )
                .into_response()
        }
        Outcome::ValidationError(errors) => {
            (StatusCode::BAD_REQUEST, Json(errors)).into_response()
        }
        Outcome::Conflict(text) => (StatusCode::CONFLICT, text).into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Handler per PUT /api/v1/organizations/{organizationId}/messages/{id}
pub async fn update_message(
    Extension(state): Extension<Arc<AppState>>,
    Path((organization_id, id)): Path<(Uuid, Uuid)>,
    Json(req): Json<MessageRequest>,
) -> Response {
    let outcome = match state.messages.update(organization_id, id, req).await {
        Ok(outcome) => outcome,
        Err(e) => return storage_failure("update", e).into_response(),
    };
    match outcome {
        Outcome::Success => StatusCode::NO_CONTENT.into_response(),
        Outcome::NotFound => StatusCode::NOT_FOUND.into_response(),
        Outcome::ValidationError(errors) => {
            (StatusCode::BAD_REQUEST, Json(errors)).into_response()
        }
        Outcome::Conflict(text) => (StatusCode::CONFLICT, text).into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Handler per DELETE /api/v1/organizations/{organizationId}/messages/{id}
pub async fn delete_message(
    Extension(state): Extension<Arc<AppState>>,
    Path((organization_id, id)): Path<(Uuid, Uuid)>,
) -> Response {
    let outcome = match state.messages.delete(organization_id, id).await {
        Ok(outcome) => outcome,
        Err(e) => return storage_failure("delete", e).into_response(),
    };
    match outcome {
        Outcome::Success => StatusCode::NO_CONTENT.into_response(),
        Outcome::NotFound => StatusCode::NOT_FOUND.into_response(),
        Outcome::ValidationError(errors) => {
            (StatusCode::BAD_REQUEST, Json(errors)).into_response()
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
