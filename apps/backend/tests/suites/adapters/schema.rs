use portal_backend::infra::schema_guard::ensure_schema;
use portal_backend::{connect_db, DbKind};

#[tokio::test]
async fn schema_setup_is_idempotent() {
    let db = connect_db(&DbKind::SqliteMemory).await.unwrap();
    assert_eq!(migration::count_applied_migrations(&db).await.unwrap(), 0);

    ensure_schema(&db).await.unwrap();
    ensure_schema(&db).await.unwrap();

    assert_eq!(migration::count_applied_migrations(&db).await.unwrap(), 1);
    assert_eq!(
        migration::get_latest_migration_version(&db).await.unwrap().as_deref(),
        Some("m20251019_000001_init")
    );
}
