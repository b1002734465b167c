//! Porta di persistenza dei messaggi.
//!
//! Il service conosce solo il trait [`MessageRepository`]; le implementazioni
//! sono [`InMemoryMessageRepository`] (DashMap) e [`SqliteMessageRepository`] (sqlx).

use async_trait::async_trait;
use orgboard_core::Message;
use uuid::Uuid;

use crate::error::RepositoryResult;

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryMessageRepository;
pub use sqlite::SqliteMessageRepository;

/// Operazioni di storage, tutte limitate a una organizzazione.
///
/// Ogni singola operazione deve essere atomica per chiave; non serve alcuna
/// garanzia transazionale tra chiamate diverse.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Tutti i messaggi dell'organizzazione, senza ordine garantito.
    async fn list_all(&self, organization_id: Uuid) -> RepositoryResult<Vec<Message>>;

    /// `Some` solo se il messaggio esiste e appartiene a `organization_id`.
    async fn get(&self, organization_id: Uuid, id: Uuid) -> RepositoryResult<Option<Message>>;

    /// Inserisce per `id`; se l'id esiste già il record viene sovrascritto.
    async fn add(&self, message: &Message) -> RepositoryResult<()>;

    /// Sostituisce per intero il record con lo stesso `id`.
    async fn update(&self, message: &Message) -> RepositoryResult<()>;

    /// Rimuove solo se il messaggio esiste e appartiene all'organizzazione.
    async fn delete(&self, organization_id: Uuid, id: Uuid) -> RepositoryResult<bool>;

    /// True if another message of the organization already uses `title`
    /// (case-insensitive). `exclude_id` lets an update ignore its own record.
    async fn exists_title(
        &self,
        organization_id: Uuid,
        title: &str,
        exclude_id: Option<Uuid>,
    ) -> RepositoryResult<bool>;

    /// Liveness probe used by `/health`.
    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
