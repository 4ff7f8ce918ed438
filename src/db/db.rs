use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::{HoursError, Result};
use crate::libs::timestamp;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{Connection, Row, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DB_FILE_NAME: &str = "hours.db";

/// How long a writer waits for another connection's write transaction.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    color TEXT NOT NULL DEFAULT 'default'
);
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    color TEXT NOT NULL DEFAULT 'default'
);
CREATE TABLE IF NOT EXISTS task_groups (
    task_id INTEGER NOT NULL,
    group_id INTEGER NOT NULL,
    PRIMARY KEY (task_id, group_id),
    FOREIGN KEY (task_id) REFERENCES tasks(id) ON DELETE CASCADE,
    FOREIGN KEY (group_id) REFERENCES groups(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_task_groups_group_id ON task_groups(group_id);
CREATE TABLE IF NOT EXISTS settings (
    name TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id INTEGER NOT NULL,
    start TEXT NOT NULL,
    end TEXT NOT NULL,
    note TEXT,
    CHECK (start <= end)
);
CREATE INDEX IF NOT EXISTS idx_history_start ON history(start);
CREATE INDEX IF NOT EXISTS idx_history_task_id ON history(task_id);
";

/// Handle to the embedded record store.
///
/// One connection is shared behind a mutex, so every read and write
/// transaction issued through the same handle (or its clones) runs strictly
/// one after another. Write transactions additionally start with
/// `BEGIN IMMEDIATE`, which serializes them against other connections
/// opened on the same file.
#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
}

impl Db {
    /// Opens the database at the configured location, falling back to the
    /// platform data directory.
    pub fn new() -> anyhow::Result<Db> {
        let config = Config::read()?;
        let path = match config.database {
            Some(path) => path,
            None => DataStorage::new().get_path(DB_FILE_NAME)?,
        };
        Ok(Db::open(path)?)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        debug!(path = %path.as_ref().display(), "opening store");
        let conn = Connection::open(path)?;
        Db::init(conn)
    }

    pub fn open_in_memory() -> Result<Db> {
        Db::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Db> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        let db = Db { conn: Arc::new(Mutex::new(conn)) };
        db.write(|tx| crate::db::settings::seed(tx))?;
        Ok(db)
    }

    /// Runs `op` inside a read transaction. Nothing `op` does is committed.
    pub fn read<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Transaction) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;
        op(&tx)
    }

    /// Runs `op` inside a write transaction.
    ///
    /// The transaction commits only when `op` returns `Ok`; on error it is
    /// dropped, which rolls back every statement `op` executed.
    pub fn write<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Transaction) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        match op(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                debug!(error = %e, "rolling back");
                Err(e)
            }
        }
    }
}

/// Reads a stored timestamp column.
pub(crate) fn column_timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let value: String = row.get(idx)?;
    timestamp::parse(&value).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Converts a stored row id into the public id type.
pub(crate) fn column_id(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    let value: i64 = row.get(idx)?;
    u64::try_from(value).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

pub(crate) fn to_sql_id(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| HoursError::InvalidInput(format!("id {} is out of range", id)))
}
