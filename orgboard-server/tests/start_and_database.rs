use anyhow::Result;
use orgboard_core::{now_utc, Message, MessageRequest};
use orgboard_server::repository::{MessageRepository, SqliteMessageRepository};
use orgboard_server::service::MessageService;
use orgboard_server::{
    build_repository, build_sqlite_url, config::StoreBackend, connect_pool, health_with_repository,
    is_memory_url, pool_options_for, run_migrations, sqlite_url_for_path,
};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

// Apre un DB su file dentro la directory temporanea e applica le migrazioni
async fn migrated_pool(dir: &Path) -> Result<SqlitePool> {
    let url = sqlite_url_for_path(&dir.join("orgboard.db"))?;
    let pool = connect_pool(&url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

fn message(organization_id: Uuid, title: &str) -> Message {
    Message {
        id: Uuid::new_v4(),
        organization_id,
        title: title.to_string(),
        content: "This is valid content".to_string(),
        is_active: true,
        created_at: now_utc(),
        updated_at: None,
    }
}

// Test che verifica che le migrazioni creino la tabella messages e siano ripetibili
#[tokio::test]
async fn run_migrations_creates_tables() -> Result<()> {
    let td = TempDir::new()?;
    let pool = migrated_pool(td.path()).await?;
    run_migrations(&pool).await?;

    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type IN ('table','index') AND name IN ('messages','idx_messages_organization_id')",
    )
    .fetch_all(&pool)
    .await?;

    for expected in ["messages", "idx_messages_organization_id"] {
        assert!(names.contains(&expected.to_string()), "missing {}", expected);
    }
    Ok(())
}

// Test che verifica che l'health check funzioni dopo le migrazioni
#[tokio::test]
async fn health_handler_works_after_migrations() -> Result<()> {
    let td = TempDir::new()?;
    let pool = migrated_pool(td.path()).await?;
    let repo = SqliteMessageRepository::new(pool.clone());

    assert!(health_with_repository(&repo).await.is_success(), "health should return 200 OK");

    pool.close().await;
    assert!(!health_with_repository(&repo).await.is_success(), "closed pool must be unhealthy");
    Ok(())
}

// Test che verifica che la creazione del file DB e delle directory genitrici sia idempotente
#[tokio::test]
async fn creating_db_file_and_parent_dirs_is_idempotent() -> Result<()> {
    let td = TempDir::new()?;
    let nested = td.path().join("a").join("b").join("orgboard.db");
    let parent = nested.parent().unwrap().to_path_buf();
    assert!(!parent.exists());

    let raw = format!("sqlite://{}", nested.display());
    let url = build_sqlite_url(&raw)?;
    assert_eq!(url, build_sqlite_url(&raw)?);
    let pool = connect_pool(&url).await?;
    run_migrations(&pool).await?;

    assert!(parent.exists(), "parent dir should have been created");
    assert!(nested.exists(), "db file should have been created");
    Ok(())
}

#[tokio::test]
async fn build_repository_for_sqlite_backend() -> Result<()> {
    let td = TempDir::new()?;
    let path = td.path().join("store").join("orgboard.db");
    let repo = build_repository(&StoreBackend::Sqlite(path.display().to_string())).await?;

    let org = Uuid::new_v4();
    let m = message(org, "Hello");
    repo.add(&m).await?;
    assert_eq!(repo.get(org, m.id).await?, Some(m));
    assert!(path.exists());
    Ok(())
}

#[tokio::test]
async fn sqlite_repository_round_trips_and_scopes() -> Result<()> {
    let td = TempDir::new()?;
    let repo = SqliteMessageRepository::new(migrated_pool(td.path()).await?);
    let (o1, o2) = (Uuid::new_v4(), Uuid::new_v4());

    let mut m = message(o1, "Hello");
    repo.add(&m).await?;
    repo.add(&message(o2, "Other")).await?;

    assert_eq!(repo.get(o1, m.id).await?, Some(m.clone()));
    assert_eq!(repo.get(o2, m.id).await?, None);
    assert_eq!(repo.list_all(o1).await?, vec![m.clone()]);

    m.content = "Replaced content body".to_string();
    m.is_active = false;
    m.updated_at = Some(now_utc());
    repo.update(&m).await?;
    assert_eq!(repo.get(o1, m.id).await?, Some(m.clone()));

    // add con lo stesso id sovrascrive
    m.title = "Overwritten".to_string();
    repo.add(&m).await?;
    assert_eq!(repo.list_all(o1).await?.len(), 1);
    assert_eq!(repo.get(o1, m.id).await?.unwrap().title, "Overwritten");
    Ok(())
}

#[tokio::test]
async fn sqlite_exists_title_is_case_insensitive() -> Result<()> {
    let td = TempDir::new()?;
    let repo = SqliteMessageRepository::new(migrated_pool(td.path()).await?);
    let org = Uuid::new_v4();
    let m = message(org, "École");
    repo.add(&m).await?;

    assert!(repo.exists_title(org, "éCOLE", None).await?);
    assert!(!repo.exists_title(org, "école", Some(m.id)).await?);
    assert!(!repo.exists_title(Uuid::new_v4(), "École", None).await?);
    Ok(())
}

#[tokio::test]
async fn sqlite_delete_checks_organization() -> Result<()> {
    let td = TempDir::new()?;
    let repo = SqliteMessageRepository::new(migrated_pool(td.path()).await?);
    let org = Uuid::new_v4();
    let m = message(org, "Hello");
    repo.add(&m).await?;

    assert!(!repo.delete(Uuid::new_v4(), m.id).await?);
    assert!(repo.delete(org, m.id).await?);
    assert!(!repo.delete(org, m.id).await?);
    Ok(())
}

// Il service funziona allo stesso modo sopra lo storage durevole
#[tokio::test]
async fn service_over_sqlite_keeps_created_at() -> Result<()> {
    let td = TempDir::new()?;
    let repo = Arc::new(SqliteMessageRepository::new(migrated_pool(td.path()).await?));
    let service = MessageService::new(repo);
    let org = Uuid::new_v4();

    let created = service
        .create(org, MessageRequest::new("Hello", "This is valid content"))
        .await?
        .into_created()
        .expect("created");
    assert!(service
        .create(org, MessageRequest::new("HELLO", "This is valid content"))
        .await?
        .is_conflict());

    assert!(service
        .update(org, created.id, MessageRequest::new("Hello", "Some other content"))
        .await?
        .is_success());
    let stored = service.get_by_id(org, created.id).await?.expect("stored");
    assert_eq!(stored.created_at, created.created_at);
    assert!(stored.updated_at.unwrap() >= created.created_at);

    assert!(service.delete(org, created.id).await?.is_success());
    assert!(service.delete(org, created.id).await?.is_not_found());
    Ok(())
}

// Un DB in memoria sparisce con l'ultima connessione: il pool deve tenerne una aperta per sempre
#[test]
fn memory_url_pool_never_drops_its_last_connection() {
    assert!(is_memory_url("sqlite::memory:"));
    assert!(is_memory_url("sqlite://file:orgboard?mode=memory&cache=shared"));
    assert!(!is_memory_url("sqlite:///var/lib/orgboard/orgboard.db"));

    let memory = pool_options_for("sqlite::memory:");
    assert_eq!(memory.get_min_connections(), 1);
    assert_eq!(memory.get_idle_timeout(), None);
    assert_eq!(memory.get_max_lifetime(), None);

    // i DB su file mantengono le impostazioni di default di sqlx
    let file = pool_options_for("sqlite:///var/lib/orgboard/orgboard.db");
    assert_eq!(file.get_min_connections(), 0);
    assert!(file.get_idle_timeout().is_some());
}

#[tokio::test]
async fn build_repository_for_in_memory_sqlite() -> Result<()> {
    let repo = build_repository(&StoreBackend::Sqlite("sqlite::memory:".to_string())).await?;
    assert!(health_with_repository(repo.as_ref()).await.is_success());

    let org = Uuid::new_v4();
    let m = message(org, "Hello");
    repo.add(&m).await?;
    assert_eq!(repo.list_all(org).await?, vec![m]);
    Ok(())
}
