//! Schema bootstrap: creates the database file and the seven category tables.

use crate::db::connect_options;
use crate::error::WikiError;
use craftwiki_schema::Category;
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::{io, path::Path};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaReport {
    /// A file was already present at the path; nothing was touched.
    AlreadyExists,
    /// The file was created along with these tables, in creation order.
    Created { tables: Vec<Category> },
}

/// Ensure the database at `path` exists with every category table.
///
/// An existing file is left alone, whatever its contents. On a fresh path the
/// tables are created one by one; the first failure aborts the bootstrap and
/// removes the file again, so the next start retries from scratch.
pub async fn ensure_schema(path: &Path) -> Result<SchemaReport, WikiError> {
    let ddl = Category::ALL.map(|category| (category, category.create_table_sql()));
    bootstrap(path, &ddl).await
}

async fn bootstrap(path: &Path, ddl: &[(Category, String)]) -> Result<SchemaReport, WikiError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {
            info!(path = %path.display(), "Database already exists");
            return Ok(SchemaReport::AlreadyExists);
        }
        Ok(_) => {
            return Err(WikiError::IoError(io::Error::other(format!(
                "database path {} exists but is not a file",
                path.display()
            ))));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    info!(path = %path.display(), "Creating database");
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut conn = connect_options(path)
        .create_if_missing(true)
        .connect()
        .await?;

    let result = create_tables(&mut conn, ddl).await;

    if let Err(e) = conn.close().await {
        warn!(error = %e, "failed to close bootstrap connection");
    }

    if result.is_err() {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %e, "failed to remove partial database");
        }
    }

    let tables = result?;
    info!(tables = tables.len(), "Database tables created");
    Ok(SchemaReport::Created { tables })
}

async fn create_tables(
    conn: &mut SqliteConnection,
    ddl: &[(Category, String)],
) -> Result<Vec<Category>, WikiError> {
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;

    let mut created = Vec::with_capacity(ddl.len());
    for (category, sql) in ddl {
        sqlx::query(sql)
            .execute(&mut *conn)
            .await
            .map_err(|source| WikiError::Schema {
                table: category.table_name(),
                source,
            })?;
        debug!(table = %category, "table created");
        created.push(*category);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_table_aborts_and_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("instance").join("game.db");

        let ddl = vec![
            (Category::Armour, Category::Armour.create_table_sql()),
            (Category::Food, "CREATE TABLE food (".to_string()),
            (Category::Tools, Category::Tools.create_table_sql()),
        ];
        let err = bootstrap(&db_path, &ddl).await.unwrap_err();
        assert!(
            matches!(err, WikiError::Schema { table: "food", .. }),
            "got {err:?}"
        );
        assert!(!db_path.exists(), "partial database left behind");

        // The next start bootstraps cleanly instead of reporting an existing file.
        let report = ensure_schema(&db_path).await.unwrap();
        assert_eq!(
            report,
            SchemaReport::Created {
                tables: Category::ALL.to_vec()
            }
        );
    }

    #[tokio::test]
    async fn directory_at_database_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = ensure_schema(dir.path()).await.unwrap_err();
        assert!(matches!(err, WikiError::IoError(_)), "got {err:?}");
    }
}
