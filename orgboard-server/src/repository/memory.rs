use async_trait::async_trait;
use dashmap::DashMap;
use orgboard_core::{validation::titles_match, Message};
use uuid::Uuid;

use super::MessageRepository;
use crate::error::RepositoryResult;

/// Store in memoria: id -> messaggio. DashMap rende atomiche le operazioni sulla singola chiave.
#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    messages: DashMap<Uuid, Message>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn list_all(&self, organization_id: Uuid) -> RepositoryResult<Vec<Message>> {
        Ok(self
            .messages
            .iter()
            .filter(|entry| entry.organization_id == organization_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn get(&self, organization_id: Uuid, id: Uuid) -> RepositoryResult<Option<Message>> {
        Ok(self
            .messages
            .get(&id)
            .filter(|entry| entry.organization_id == organization_id)
            .map(|entry| entry.value().clone()))
    }

    async fn add(&self, message: &Message) -> RepositoryResult<()> {
        self.messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn update(&self, message: &Message) -> RepositoryResult<()> {
        self.messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> RepositoryResult<bool> {
        // controllo dell'organizzazione e rimozione avvengono sotto lo stesso lock dello shard
        let removed = self
            .messages
            .remove_if(&id, |_, message| message.organization_id == organization_id);
        Ok(removed.is_some())
    }

    async fn exists_title(
        &self,
        organization_id: Uuid,
        title: &str,
        exclude_id: Option<Uuid>,
    ) -> RepositoryResult<bool> {
        Ok(self.messages.iter().any(|entry| {
            entry.organization_id == organization_id
                && Some(entry.id) != exclude_id
                && titles_match(&entry.title, title)
        }))
    }
}
