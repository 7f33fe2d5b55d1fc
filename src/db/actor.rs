use crate::db::accessor::{self, WriteSet};
use crate::db::connect_options;
use crate::error::WikiError;
use craftwiki_schema::{Category, TableRow};
use futures::future::BoxFuture;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug)]
pub enum DbActorMessage {
    /// All rows of a category table.
    ReadAll(Category, RpcReplyPort<Result<Vec<TableRow>, WikiError>>),

    /// One row by id.
    ReadOne(Category, i64, RpcReplyPort<Result<TableRow, WikiError>>),

    /// Insert a row and return its id.
    Insert(WriteSet, RpcReplyPort<Result<i64, WikiError>>),

    /// Update a row by id and return rows affected.
    Update(i64, WriteSet, RpcReplyPort<Result<u64, WikiError>>),

    /// Delete a row by id and return rows affected.
    Delete(Category, i64, RpcReplyPort<Result<u64, WikiError>>),

    /// Names of the tables present in the database file.
    ListTables(RpcReplyPort<Result<Vec<String>, WikiError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn read_all(&self, category: Category) -> Result<Vec<TableRow>, WikiError> {
        ractor::call!(self.actor, DbActorMessage::ReadAll, category)
            .map_err(|e| WikiError::RactorError(format!("DbActor ReadAll RPC failed: {e}")))?
    }

    pub async fn read_one(&self, category: Category, id: i64) -> Result<TableRow, WikiError> {
        ractor::call!(self.actor, DbActorMessage::ReadOne, category, id)
            .map_err(|e| WikiError::RactorError(format!("DbActor ReadOne RPC failed: {e}")))?
    }

    pub async fn insert(&self, write: WriteSet) -> Result<i64, WikiError> {
        ractor::call!(self.actor, DbActorMessage::Insert, write)
            .map_err(|e| WikiError::RactorError(format!("DbActor Insert RPC failed: {e}")))?
    }

    pub async fn update(&self, id: i64, write: WriteSet) -> Result<u64, WikiError> {
        ractor::call!(self.actor, DbActorMessage::Update, id, write)
            .map_err(|e| WikiError::RactorError(format!("DbActor Update RPC failed: {e}")))?
    }

    pub async fn delete(&self, category: Category, id: i64) -> Result<u64, WikiError> {
        ractor::call!(self.actor, DbActorMessage::Delete, category, id)
            .map_err(|e| WikiError::RactorError(format!("DbActor Delete RPC failed: {e}")))?
    }

    pub async fn list_tables(&self) -> Result<Vec<String>, WikiError> {
        ractor::call!(self.actor, DbActorMessage::ListTables)
            .map_err(|e| WikiError::RactorError(format!("DbActor ListTables RPC failed: {e}")))?
    }
}

struct DbActorState {
    options: SqliteConnectOptions,
}

impl DbActorState {
    /// Runs `op` on a fresh connection that is closed before returning,
    /// whether `op` succeeded or not.
    async fn scoped<T, F>(&self, op: F) -> Result<T, WikiError>
    where
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, WikiError>>,
    {
        let mut conn = self.options.connect().await?;
        let res = op(&mut conn).await;
        if let Err(e) = conn.close().await {
            warn!(error = %e, "failed to close sqlite connection");
        }
        res
    }
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = PathBuf;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_path: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        // The bootstrapper owns file creation; a missing file here is an error.
        let options = connect_options(&database_path).create_if_missing(false);

        info!(path = %database_path.display(), "DbActor initialized");
        Ok(DbActorState { options })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::ReadAll(category, reply) => {
                let res = state
                    .scoped(move |conn| Box::pin(accessor::read_all(conn, category)))
                    .await;
                let _ = reply.send(res);
            }
            DbActorMessage::ReadOne(category, id, reply) => {
                let res = state
                    .scoped(move |conn| Box::pin(accessor::read_one(conn, category, id)))
                    .await;
                let _ = reply.send(res);
            }
            DbActorMessage::Insert(write, reply) => {
                let res = state
                    .scoped(move |conn| Box::pin(accessor::insert(conn, write)))
                    .await;
                let _ = reply.send(res);
            }
            DbActorMessage::Update(id, write, reply) => {
                let res = state
                    .scoped(move |conn| Box::pin(accessor::update(conn, id, write)))
                    .await;
                let _ = reply.send(res);
            }
            DbActorMessage::Delete(category, id, reply) => {
                let res = state
                    .scoped(move |conn| Box::pin(accessor::delete(conn, category, id)))
                    .await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListTables(reply) => {
                let res = state
                    .scoped(|conn| Box::pin(accessor::list_tables(conn)))
                    .await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// The database file at `database_path` must already exist (see `ensure_schema`).
pub async fn spawn(database_path: &Path) -> Result<DbActorHandle, WikiError> {
    let (actor, _jh) = Actor::spawn(None, DbActor, database_path.to_path_buf())
        .await
        .map_err(|e| WikiError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}
