//! Errori di infrastruttura dello storage.
//!
//! Non sono esiti di business (quelli sono `Outcome`): interrompono l'operazione
//! corrente e diventano un 500 nei controller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
