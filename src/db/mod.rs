//! Database module: schema bootstrap and generic table access for the wiki categories.
//!
//! Layout:
//! - `schema.rs`: creates the database file and category tables on first start
//! - `accessor.rs`: read/insert/update/delete over any category, SQL built per call
//! - `actor.rs`: ractor actor that runs accessor calls on a per-message connection

pub mod accessor;
pub mod actor;
pub mod schema;

pub use accessor::WriteSet;
pub use actor::{DbActorHandle, spawn};
pub use schema::{SchemaReport, ensure_schema};

use sqlx::sqlite::SqliteConnectOptions;
use std::{path::Path, time::Duration};

/// Connection options shared by the bootstrapper and the actor.
pub fn connect_options(path: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(path)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true)
}
