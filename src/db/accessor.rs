//! Generic table access over the category tables.
//!
//! Statements are assembled per call, but identifiers only ever come from
//! `Category` (table names) and `WriteSet` (column names resolved against the
//! category's column list). Every value, and every id, is a bound parameter.

use crate::error::WikiError;
use craftwiki_schema::{Category, TableRow};
use serde_json::Value;
use sqlx::{Row, SqliteConnection, TypeInfo, ValueRef, sqlite::SqliteRow};
use std::collections::HashSet;
use tracing::debug;

/// Validated, ordered columns and values for one insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSet {
    category: Category,
    columns: Vec<&'static str>,
    values: Vec<String>,
}

impl WriteSet {
    /// Pairs `columns[i]` with `values[i]`.
    ///
    /// Rejects an empty column list, mismatched lengths, duplicate columns,
    /// `id`, and any name the category does not define.
    pub fn new<S: AsRef<str>>(
        category: Category,
        columns: &[S],
        values: Vec<String>,
    ) -> Result<Self, WikiError> {
        if columns.len() != values.len() {
            return Err(WikiError::Validation(format!(
                "{} columns but {} values",
                columns.len(),
                values.len()
            )));
        }
        let columns = resolve_columns(category, columns.iter().map(AsRef::as_ref))?;
        Ok(Self {
            category,
            columns,
            values,
        })
    }

    /// Builds a write set from `(column, value)` pairs, as submitted in a form.
    pub fn from_pairs(category: Category, pairs: Vec<(String, String)>) -> Result<Self, WikiError> {
        let (columns, values): (Vec<String>, Vec<String>) = pairs.into_iter().unzip();
        Self::new(category, &columns, values)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }
}

fn resolve_columns<'a>(
    category: Category,
    names: impl Iterator<Item = &'a str>,
) -> Result<Vec<&'static str>, WikiError> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for name in names {
        let column = category.writable_column(name).ok_or_else(|| {
            WikiError::Validation(format!("{category} has no writable column {name:?}"))
        })?;
        if !seen.insert(column.name) {
            return Err(WikiError::Validation(format!(
                "column {name:?} given more than once"
            )));
        }
        resolved.push(column.name);
    }
    if resolved.is_empty() {
        return Err(WikiError::Validation("no columns given".to_string()));
    }
    Ok(resolved)
}

fn select_list(category: Category) -> String {
    category
        .columns()
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every row of the category's table, ordered by id.
pub async fn read_all(
    conn: &mut SqliteConnection,
    category: Category,
) -> Result<Vec<TableRow>, WikiError> {
    let sql = format!(
        "SELECT {} FROM {} ORDER BY id",
        select_list(category),
        category.table_name()
    );
    let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;
    debug!(table = %category, rows = rows.len(), "db read all");
    rows.iter().map(row_values).collect()
}

/// A single row by id, or `NotFound`.
pub async fn read_one(
    conn: &mut SqliteConnection,
    category: Category,
    id: i64,
) -> Result<TableRow, WikiError> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?",
        select_list(category),
        category.table_name()
    );
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    match row {
        Some(row) => row_values(&row),
        None => Err(WikiError::NotFound { category, id }),
    }
}

/// Inserts one row and returns its generated id.
pub async fn insert(conn: &mut SqliteConnection, write: WriteSet) -> Result<i64, WikiError> {
    let category = write.category;
    let placeholders = vec!["?"; write.columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        category.table_name(),
        write.columns.join(", "),
        placeholders
    );

    let mut query = sqlx::query(&sql);
    for value in write.values {
        query = query.bind(value);
    }
    let id = query.execute(&mut *conn).await?.last_insert_rowid();

    debug!(table = %category, id, "db row inserted");
    Ok(id)
}

/// Sets the write set's columns on row `id`; other columns are untouched.
/// Returns rows affected (0 when the id does not exist).
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    write: WriteSet,
) -> Result<u64, WikiError> {
    let category = write.category;
    let assignments: Vec<String> = write.columns.iter().map(|c| format!("{c} = ?")).collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?",
        category.table_name(),
        assignments.join(", ")
    );

    let mut query = sqlx::query(&sql);
    for value in write.values {
        query = query.bind(value);
    }
    let affected = query.bind(id).execute(&mut *conn).await?.rows_affected();

    debug!(table = %category, id, affected, columns = ?write.columns, "db row updated");
    Ok(affected)
}

/// Deletes row `id`. Returns rows affected (0 when the id does not exist).
pub async fn delete(
    conn: &mut SqliteConnection,
    category: Category,
    id: i64,
) -> Result<u64, WikiError> {
    let sql = format!("DELETE FROM {} WHERE id = ?", category.table_name());
    let affected = sqlx::query(&sql)
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    debug!(table = %category, id, affected, "db row deleted");
    Ok(affected)
}

/// Names of all tables in the database file, including SQLite's internal ones.
pub async fn list_tables(conn: &mut SqliteConnection) -> Result<Vec<String>, WikiError> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(names)
}

fn row_values(row: &SqliteRow) -> Result<TableRow, WikiError> {
    (0..row.len())
        .map(|index| column_value(row, index).map_err(WikiError::from))
        .collect()
}

/// Decodes by storage class; INTEGER-affinity columns may still hold text.
fn column_value(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let value = match raw.type_info().name() {
        "INTEGER" => Value::from(row.try_get::<i64, _>(index)?),
        "REAL" => Value::from(row.try_get::<f64, _>(index)?),
        "TEXT" => Value::from(row.try_get::<String, _>(index)?),
        _ => Value::Null,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn write_set_keeps_submission_order() {
        let write = WriteSet::new(
            Category::Mobs,
            &["hitpoints", "name"],
            strings(&["20", "Zombie"]),
        )
        .unwrap();
        assert_eq!(write.columns(), ["hitpoints", "name"]);
        assert_eq!(write.category(), Category::Mobs);
    }

    #[test]
    fn write_set_rejects_bad_columns() {
        let cases: [(&[&str], &[&str]); 5] = [
            (&[], &[]),
            (&["name"], &["a", "b"]),
            (&["id"], &["1"]),
            (&["name", "name"], &["a", "b"]),
            (&["name) VALUES ('x'); --"], &["a"]),
        ];
        for (columns, values) in cases {
            let err = WriteSet::new(Category::Items, columns, strings(values)).unwrap_err();
            assert!(
                matches!(err, WikiError::Validation(_)),
                "{columns:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn write_set_checks_columns_per_category() {
        assert!(WriteSet::from_pairs(
            Category::Items,
            vec![("durability".to_string(), "5".to_string())]
        )
        .is_err());
        assert!(WriteSet::from_pairs(
            Category::Tools,
            vec![("durability".to_string(), "5".to_string())]
        )
        .is_ok());
    }
}
