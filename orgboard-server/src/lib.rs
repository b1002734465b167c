use anyhow::Context;
use axum::http::StatusCode;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::config::StoreBackend;
use crate::repository::{InMemoryMessageRepository, MessageRepository, SqliteMessageRepository};
use crate::service::MessageService;

pub mod config;
pub mod controllers;
pub mod error;
pub mod logging;
pub mod repository;
pub mod routes;
pub mod service;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn MessageRepository>,
    pub messages: MessageService,
}

impl AppState {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        let messages = MessageService::new(repo.clone());
        Self { repo, messages }
    }
}

// Dato un percorso di file, restituisce un URL SQLite valido. Crea le directory genitrici se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    Ok(format!("sqlite:///{}", s.trim_start_matches('/')))
}

/// Normalizza il valore di DATABASE_URL in un URL SQLite utilizzabile.
/// "sqlite::memory:" passa invariato; altrimenti è un percorso di file, con o senza prefisso "sqlite://".
pub fn build_sqlite_url(raw: &str) -> anyhow::Result<String> {
    if raw == "sqlite::memory:" {
        return Ok(raw.to_string());
    }
    // "sqlite:///abs/path" -> "/abs/path": si toglie solo il prefisso, lo slash del percorso resta
    let path_part = raw
        .strip_prefix("sqlite://")
        .or_else(|| raw.strip_prefix("sqlite:"))
        .unwrap_or(raw);
    sqlite_url_for_path(&PathBuf::from(path_part))
}

/// True for URLs that open an in-memory SQLite database.
pub fn is_memory_url(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

/// Opzioni del pool per l'URL dato.
/// Un DB in memoria vive finché resta aperta almeno una connessione:
/// il pool ne tiene sempre una, senza idle timeout né max lifetime.
pub fn pool_options_for(db_url: &str) -> SqlitePoolOptions {
    let options = SqlitePoolOptions::new();
    if is_memory_url(db_url) {
        options
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        options
    }
}

// Connect to the database and return a connection pool.
pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = pool_options_for(db_url)
        .connect(db_url)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Esegue le migrazioni del database. Crea tabella e indici se non esistono.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id              TEXT PRIMARY KEY,
            organization_id TEXT NOT NULL,
            title           TEXT NOT NULL,
            content         TEXT NOT NULL,
            is_active       INTEGER NOT NULL DEFAULT 1,
            created_at      TEXT NOT NULL,
            updated_at      TEXT
        );"#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_messages_organization_id
            ON messages(organization_id);"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| {
                format!("apply migration: {}", &s[..s.len().min(40)].replace('\n', " "))
            })?;
    }
    Ok(())
}

/// Costruisce il repository richiesto dalla configurazione (per SQLite: URL, pool e migrazioni).
pub async fn build_repository(store: &StoreBackend) -> anyhow::Result<Arc<dyn MessageRepository>> {
    match store {
        StoreBackend::Memory => {
            info!("using in-memory message store");
            Ok(Arc::new(InMemoryMessageRepository::new()))
        }
        StoreBackend::Sqlite(raw) => {
            let db_url = build_sqlite_url(raw).context("build sqlite DATABASE_URL")?;
            info!(%db_url, "using sqlite message store");
            let pool = connect_pool(&db_url).await.context("connect to sqlite")?;
            run_migrations(&pool).await.context("run migrations")?;
            Ok(Arc::new(SqliteMessageRepository::new(pool)))
        }
    }
}

/// Controlla lo stato di salute dello storage.
pub async fn health_with_repository(repo: &dyn MessageRepository) -> StatusCode {
    match repo.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            error!(error = %e, "health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
