//! Completed time spans.
//!
//! Entries are append-only. `task_id` is a plain identifier: the task it
//! names may have been deleted since, and readers must cope with that.

use super::db::{column_id, column_timestamp, to_sql_id, Db};
use crate::libs::error::{HoursError, Result};
use crate::libs::timestamp;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row, Transaction};
use serde::{Deserialize, Serialize};
use tracing::debug;

const INSERT_ENTRY: &str = "INSERT INTO history (task_id, start, end, note) VALUES (?1, ?2, ?3, ?4)";
const SELECT_ENTRY_BY_ID: &str = "SELECT id, task_id, start, end, note FROM history WHERE id = ?1";
const SELECT_ENTRIES: &str = "SELECT id, task_id, start, end, note FROM history ORDER BY start, id";
const SELECT_ENTRIES_BETWEEN: &str = "SELECT id, task_id, start, end, note FROM history WHERE start BETWEEN ?1 AND ?2 ORDER BY start, id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: u64,
    pub task_id: u64,
    #[serde(with = "timestamp::serde_utc")]
    pub start: DateTime<Utc>,
    #[serde(with = "timestamp::serde_utc")]
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl HistoryEntry {
    /// Length of the span in whole seconds.
    pub fn duration(&self) -> u64 {
        timestamp::seconds_between(&self.start, &self.end)
    }

    fn from_row(row: &Row) -> rusqlite::Result<HistoryEntry> {
        Ok(HistoryEntry {
            id: column_id(row, 0)?,
            task_id: column_id(row, 1)?,
            start: column_timestamp(row, 2)?,
            end: column_timestamp(row, 3)?,
            note: row.get(4)?,
        })
    }
}

/// Appends one entry. Rejects spans that end before they start and years
/// the `start` index cannot order.
pub fn append(tx: &Transaction, task_id: u64, start: DateTime<Utc>, end: DateTime<Utc>, note: Option<&str>) -> Result<HistoryEntry> {
    let start = timestamp::check(start)?;
    let end = timestamp::check(end)?;
    if end < start {
        return Err(HoursError::InvalidTimeRange {
            start: timestamp::format(&start),
            end: timestamp::format(&end),
        });
    }
    tx.execute(INSERT_ENTRY, params![to_sql_id(task_id)?, timestamp::format(&start), timestamp::format(&end), note])?;
    let id = tx.last_insert_rowid() as u64;
    debug!(id, task_id, start = %timestamp::format(&start), end = %timestamp::format(&end), "appended history entry");
    Ok(HistoryEntry {
        id,
        task_id,
        start,
        end,
        note: note.map(str::to_string),
    })
}

pub fn get(tx: &Transaction, id: u64) -> Result<Option<HistoryEntry>> {
    Ok(tx.query_row(SELECT_ENTRY_BY_ID, params![to_sql_id(id)?], HistoryEntry::from_row).optional()?)
}

pub fn list(tx: &Transaction) -> Result<Vec<HistoryEntry>> {
    let mut stmt = tx.prepare(SELECT_ENTRIES)?;
    let entries = stmt.query_map([], HistoryEntry::from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}

/// Entries whose start lies in `[from, to]`, in chronological order.
pub fn started_between(tx: &Transaction, from: &DateTime<Utc>, to: &DateTime<Utc>) -> Result<Vec<HistoryEntry>> {
    let mut stmt = tx.prepare(SELECT_ENTRIES_BETWEEN)?;
    let entries = stmt
        .query_map(params![timestamp::format(from), timestamp::format(to)], HistoryEntry::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}

/// Read access to the history log. Writes go through the active task
/// state machine.
pub struct History {
    db: Db,
}

impl History {
    pub fn new(db: &Db) -> Self {
        History { db: db.clone() }
    }

    pub fn get(&self, id: u64) -> Result<Option<HistoryEntry>> {
        self.db.read(|tx| get(tx, id))
    }

    pub fn list(&self) -> Result<Vec<HistoryEntry>> {
        self.db.read(list)
    }

    pub fn started_between(&self, from: &DateTime<Utc>, to: &DateTime<Utc>) -> Result<Vec<HistoryEntry>> {
        self.db.read(|tx| started_between(tx, from, to))
    }
}
