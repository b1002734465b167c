//! Logica di business dei messaggi: validazione, unicità del titolo per
//! organizzazione e blocco dei messaggi inattivi.
//!
//! Le condizioni previste tornano come [`Outcome`]; solo i guasti dello storage
//! risalgono come `Err(RepositoryError)`.

use std::sync::Arc;

use orgboard_core::{
    new_message_id, now_utc,
    validation::{
        self, DELETE_INACTIVE_ERROR, IS_ACTIVE_FIELD, TITLE_CONFLICT, UPDATE_INACTIVE_ERROR,
    },
    Message, MessageRequest, Outcome, ValidationErrors,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::RepositoryResult;
use crate::repository::MessageRepository;

#[derive(Clone)]
pub struct MessageService {
    repo: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self, organization_id: Uuid) -> RepositoryResult<Vec<Message>> {
        self.repo.list_all(organization_id).await
    }

    pub async fn get_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> RepositoryResult<Option<Message>> {
        self.repo.get(organization_id, id).await
    }

    pub async fn create(
        &self,
        organization_id: Uuid,
        request: MessageRequest,
    ) -> RepositoryResult<Outcome<Message>> {
        let errors = validation::validate(&request);
        if !errors.is_empty() {
            debug!(%organization_id, fields = ?errors.fields().collect::<Vec<_>>(), "create rejected by validation");
            return Ok(Outcome::ValidationError(errors));
        }

        if self
            .repo
            .exists_title(organization_id, &request.title, None)
            .await?
        {
            debug!(%organization_id, title = %request.title, "create rejected: duplicate title");
            return Ok(Outcome::Conflict(TITLE_CONFLICT.to_string()));
        }

        let message = Message {
            id: new_message_id(),
            organization_id,
            title: request.title,
            content: request.content,
            is_active: request.is_active,
            created_at: now_utc(),
            updated_at: None,
        };
        self.repo.add(&message).await?;

        info!(%organization_id, message_id = %message.id, "message created");
        Ok(Outcome::Created(message))
    }

    pub async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        request: MessageRequest,
    ) -> RepositoryResult<Outcome<Message>> {
        let Some(existing) = self.repo.get(organization_id, id).await? else {
            return Ok(Outcome::NotFound);
        };

        // lo stato viene controllato prima dei campi: un messaggio inattivo è in sola lettura
        if !existing.is_active {
            debug!(%organization_id, message_id = %id, "update rejected: message inactive");
            return Ok(Outcome::ValidationError(ValidationErrors::single(
                IS_ACTIVE_FIELD,
                UPDATE_INACTIVE_ERROR,
            )));
        }

        let errors = validation::validate(&request);
        if !errors.is_empty() {
            debug!(%organization_id, message_id = %id, fields = ?errors.fields().collect::<Vec<_>>(), "update rejected by validation");
            return Ok(Outcome::ValidationError(errors));
        }

        if self
            .repo
            .exists_title(organization_id, &request.title, Some(id))
            .await?
        {
            debug!(%organization_id, message_id = %id, title = %request.title, "update rejected: duplicate title");
            return Ok(Outcome::Conflict(TITLE_CONFLICT.to_string()));
        }

        let message = Message {
            id,
            organization_id,
            title: request.title,
            content: request.content,
            is_active: request.is_active,
            created_at: existing.created_at,
            updated_at: Some(now_utc()),
        };
        self.repo.update(&message).await?;

        info!(%organization_id, message_id = %id, is_active = message.is_active, "message updated");
        Ok(Outcome::Success)
    }

    pub async fn delete(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> RepositoryResult<Outcome<Message>> {
        let Some(existing) = self.repo.get(organization_id, id).await? else {
            return Ok(Outcome::NotFound);
        };

        if !existing.is_active {
            debug!(%organization_id, message_id = %id, "delete rejected: message inactive");
            return Ok(Outcome::ValidationError(ValidationErrors::single(
                IS_ACTIVE_FIELD,
                DELETE_INACTIVE_ERROR,
            )));
        }

        if !self.repo.delete(organization_id, id).await? {
            warn!(%organization_id, message_id = %id, "message vanished before delete");
            return Ok(Outcome::NotFound);
        }

        info!(%organization_id, message_id = %id, "message deleted");
        Ok(Outcome::Success)
    }
}
