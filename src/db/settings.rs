//! Singleton settings: the active task and the previously started task.
//!
//! Each setting is one row in `settings`, keyed by name, holding a JSON
//! value. Rows are seeded when the store is opened and only ever updated
//! afterwards, so a setting always exists once `Db` is constructed.

use crate::libs::error::Result;
use crate::libs::timestamp;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Transaction};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const SELECT_SETTING: &str = "SELECT value FROM settings WHERE name = ?1";
const SEED_SETTING: &str = "INSERT OR IGNORE INTO settings (name, value) VALUES (?1, ?2)";
const UPDATE_SETTING: &str = "UPDATE settings SET value = ?2 WHERE name = ?1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    ActiveTask,
    PreviousTask,
}

impl Setting {
    pub fn name(&self) -> &'static str {
        match self {
            Setting::ActiveTask => "ActiveTask",
            Setting::PreviousTask => "PreviousTask",
        }
    }
}

/// The task currently accruing time.
///
/// `task_id == 0` means no task is running, and then `started` is always
/// `None`. The constructors are the only way to build a value, and
/// deserialization rejects stored values that break the pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredActiveTask")]
pub struct ActiveTask {
    task_id: u64,
    #[serde(with = "timestamp::serde_utc_opt")]
    started: Option<DateTime<Utc>>,
}

impl ActiveTask {
    pub fn idle() -> Self {
        ActiveTask { task_id: 0, started: None }
    }

    pub fn running(task_id: u64, started: DateTime<Utc>) -> Self {
        debug_assert!(task_id > 0);
        ActiveTask { task_id, started: Some(started) }
    }

    pub fn task_id(&self) -> u64 {
        self.task_id
    }

    pub fn started(&self) -> Option<DateTime<Utc>> {
        self.started
    }

    pub fn is_active(&self) -> bool {
        self.task_id != 0
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredActiveTask {
    task_id: u64,
    #[serde(default, with = "timestamp::serde_utc_opt")]
    started: Option<DateTime<Utc>>,
}

impl TryFrom<StoredActiveTask> for ActiveTask {
    type Error = String;

    fn try_from(value: StoredActiveTask) -> std::result::Result<Self, Self::Error> {
        match (value.task_id, value.started) {
            (0, None) => Ok(ActiveTask::idle()),
            (task_id, Some(started)) if task_id > 0 => Ok(ActiveTask::running(task_id, started)),
            (task_id, _) => Err(format!("active task {} has an inconsistent start time", task_id)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousTask {
    pub task_id: u64,
}

pub(crate) fn seed(tx: &Transaction) -> Result<()> {
    tx.execute(SEED_SETTING, params![Setting::ActiveTask.name(), serde_json::to_string(&ActiveTask::idle())?])?;
    tx.execute(SEED_SETTING, params![Setting::PreviousTask.name(), serde_json::to_string(&PreviousTask::default())?])?;
    Ok(())
}

fn get<T: DeserializeOwned>(tx: &Transaction, setting: Setting) -> Result<Option<T>> {
    let value: Option<String> = tx.query_row(SELECT_SETTING, params![setting.name()], |row| row.get(0)).optional()?;
    match value {
        Some(value) => Ok(Some(serde_json::from_str(&value)?)),
        None => Ok(None),
    }
}

fn put<T: Serialize>(tx: &Transaction, setting: Setting, value: &T) -> Result<()> {
    let affected = tx.execute(UPDATE_SETTING, params![setting.name(), serde_json::to_string(value)?])?;
    if affected == 0 {
        tx.execute(SEED_SETTING, params![setting.name(), serde_json::to_string(value)?])?;
    }
    Ok(())
}

pub fn active_task(tx: &Transaction) -> Result<ActiveTask> {
    Ok(get(tx, Setting::ActiveTask)?.unwrap_or_else(ActiveTask::idle))
}

pub fn set_active_task(tx: &Transaction, value: &ActiveTask) -> Result<()> {
    put(tx, Setting::ActiveTask, value)
}

pub fn previous_task(tx: &Transaction) -> Result<PreviousTask> {
    Ok(get(tx, Setting::PreviousTask)?.unwrap_or_default())
}

pub fn set_previous_task(tx: &Transaction, value: &PreviousTask) -> Result<()> {
    put(tx, Setting::PreviousTask, value)
}

