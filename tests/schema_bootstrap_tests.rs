use craftwiki::db::{SchemaReport, accessor, connect_options, ensure_schema};
use craftwiki_schema::Category;
use sqlx::{ConnectOptions, Connection};
use tokio::fs;

#[tokio::test]
async fn bootstrap_creates_every_table_once() {
    let dir = tempfile::tempdir().unwrap();
    // Nested directory that does not exist yet, like `instance/game.db`.
    let db_path = dir.path().join("instance").join("game.db");

    // 1. Fresh path -> file and all seven tables created, in declaration order.
    let report = ensure_schema(&db_path).await.unwrap();
    assert_eq!(
        report,
        SchemaReport::Created {
            tables: Category::ALL.to_vec()
        }
    );
    assert!(db_path.is_file());

    let mut conn = connect_options(&db_path).connect().await.unwrap();
    let tables = accessor::list_tables(&mut conn).await.unwrap();
    for category in Category::ALL {
        assert!(
            tables.iter().any(|t| t == category.table_name()),
            "missing table {category}: {tables:?}"
        );
    }
    conn.close().await.unwrap();

    // 2. Second run is a no-op.
    let report = ensure_schema(&db_path).await.unwrap();
    assert_eq!(report, SchemaReport::AlreadyExists);
}

#[tokio::test]
async fn bootstrap_leaves_an_existing_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("game.db");
    fs::write(&db_path, b"").await.unwrap();

    let report = ensure_schema(&db_path).await.unwrap();
    assert_eq!(report, SchemaReport::AlreadyExists);
    assert_eq!(fs::metadata(&db_path).await.unwrap().len(), 0);
}
