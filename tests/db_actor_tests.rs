use craftwiki::WikiError;
use craftwiki::db::{WriteSet, ensure_schema};
use craftwiki_schema::Category;
use serde_json::json;

#[tokio::test]
async fn test_db_actor_baseline() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let db_path = tmp_dir.path().join("test_craftwiki_db.sqlite");

    ensure_schema(&db_path).await.unwrap();
    let db = craftwiki::db::spawn(&db_path).await.unwrap();

    // 1. Every category table exists and starts empty.
    let tables = db.list_tables().await.unwrap();
    for category in Category::ALL {
        assert!(tables.iter().any(|t| t == category.table_name()));
        assert!(db.read_all(category).await.unwrap().is_empty());
    }

    // 2. Insert a food row.
    let write = WriteSet::new(
        Category::Food,
        &["name", "hunger_points", "description", "category"],
        vec![
            "Bread".to_string(),
            "5".to_string(),
            "Baked from wheat".to_string(),
            "food".to_string(),
        ],
    )
    .unwrap();
    let id = db.insert(write).await.unwrap();
    assert!(id > 0, "Expected a valid ID after creation");

    // 3. Update one column.
    let patch = WriteSet::from_pairs(
        Category::Food,
        vec![("hunger_points".to_string(), "6".to_string())],
    )
    .unwrap();
    assert_eq!(db.update(id, patch).await.unwrap(), 1);

    let row = db.read_one(Category::Food, id).await.unwrap();
    assert_eq!(
        row,
        vec![
            json!(id),
            json!("Bread"),
            json!(6),
            json!("Baked from wheat"),
            json!("food")
        ]
    );

    // 4. Delete it; a second delete affects nothing.
    assert_eq!(db.delete(Category::Food, id).await.unwrap(), 1);
    assert_eq!(db.delete(Category::Food, id).await.unwrap(), 0);
    assert!(matches!(
        db.read_one(Category::Food, id).await,
        Err(WikiError::NotFound { .. })
    ));

    // 5. Clones share the same actor.
    let other = db.clone();
    assert!(other.read_all(Category::Food).await.unwrap().is_empty());
}

#[tokio::test]
async fn db_actor_reports_a_missing_database_file() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let db_path = tmp_dir.path().join("missing.sqlite");

    let db = craftwiki::db::spawn(&db_path).await.unwrap();
    let err = db.read_all(Category::Items).await.unwrap_err();
    assert!(matches!(err, WikiError::DatabaseError(_)), "got {err:?}");
    assert!(!db_path.exists(), "the actor must not create the file");
}
