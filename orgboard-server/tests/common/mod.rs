#![allow(dead_code)]

use async_trait::async_trait;
use orgboard_core::Message;
use orgboard_server::error::{RepositoryError, RepositoryResult};
use orgboard_server::repository::{InMemoryMessageRepository, MessageRepository};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

/// Repository in memoria che conta le scritture, per verificare che un esito
/// negativo non abbia toccato lo storage.
#[derive(Default)]
pub struct RecordingRepository {
    pub inner: InMemoryMessageRepository,
    pub adds: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
    /// Simula un record sparito tra la get e la delete.
    pub lose_on_delete: AtomicBool,
    /// Fa fallire ogni operazione come uno storage irraggiungibile.
    pub broken: AtomicBool,
}

impl RecordingRepository {
    pub fn mutations(&self) -> usize {
        self.adds.load(Ordering::SeqCst)
            + self.updates.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }

    fn check(&self) -> RepositoryResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for RecordingRepository {
    async fn list_all(&self, organization_id: Uuid) -> RepositoryResult<Vec<Message>> {
        self.check()?;
        self.inner.list_all(organization_id).await
    }

    async fn get(&self, organization_id: Uuid, id: Uuid) -> RepositoryResult<Option<Message>> {
        self.check()?;
        self.inner.get(organization_id, id).await
    }

    async fn add(&self, message: &Message) -> RepositoryResult<()> {
        self.check()?;
        self.adds.fetch_add(1, Ordering::SeqCst);
        self.inner.add(message).await
    }

    async fn update(&self, message: &Message) -> RepositoryResult<()> {
        self.check()?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(message).await
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> RepositoryResult<bool> {
        self.check()?;
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.lose_on_delete.load(Ordering::SeqCst) {
            self.inner.delete(organization_id, id).await?;
            return Ok(false);
        }
        self.inner.delete(organization_id, id).await
    }

    async fn exists_title(
        &self,
        organization_id: Uuid,
        title: &str,
        exclude_id: Option<Uuid>,
    ) -> RepositoryResult<bool> {
        self.check()?;
        self.inner.exists_title(organization_id, title, exclude_id).await
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.check()
    }
}
