//! Task records and their group membership.

use super::db::{column_id, to_sql_id, Db};
use super::groups::{self, validate_name, DEFAULT_COLOR};
use crate::libs::error::{HoursError, Result};
use rusqlite::{params, params_from_iter, OptionalExtension, Row, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

const INSERT_TASK: &str = "INSERT INTO tasks (name, color) VALUES (?1, ?2)";
const UPDATE_TASK: &str = "UPDATE tasks SET name = ?2, color = ?3 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const SELECT_TASKS: &str = "SELECT id, name, color FROM tasks ORDER BY id";
const SELECT_TASK_BY_ID: &str = "SELECT id, name, color FROM tasks WHERE id = ?1";
const SELECT_TASK_GROUPS: &str = "SELECT group_id FROM task_groups WHERE task_id = ?1 ORDER BY group_id";
const INSERT_TASK_GROUP: &str = "INSERT OR IGNORE INTO task_groups (task_id, group_id) VALUES (?1, ?2)";
const DELETE_TASK_GROUPS: &str = "DELETE FROM task_groups WHERE task_id = ?1";
const SELECT_TASKS_IN_GROUPS: &str = "SELECT DISTINCT task_id FROM task_groups WHERE group_id IN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub groups: BTreeSet<u64>,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Task {
    pub fn new(name: &str, color: Option<&str>) -> Self {
        Task {
            id: None,
            name: name.to_string(),
            groups: BTreeSet::new(),
            color: color.unwrap_or(DEFAULT_COLOR).to_string(),
        }
    }

    pub fn with_groups<I: IntoIterator<Item = u64>>(mut self, groups: I) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }

    fn from_row(row: &Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: Some(column_id(row, 0)?),
            name: row.get(1)?,
            groups: BTreeSet::new(),
            color: row.get(2)?,
        })
    }
}

fn load_groups(tx: &Transaction, task: &mut Task) -> Result<()> {
    if let Some(id) = task.id {
        let mut stmt = tx.prepare_cached(SELECT_TASK_GROUPS)?;
        task.groups = stmt.query_map(params![to_sql_id(id)?], |row| column_id(row, 0))?.collect::<rusqlite::Result<_>>()?;
    }
    Ok(())
}

fn store_groups(tx: &Transaction, id: u64, groups: &BTreeSet<u64>) -> Result<()> {
    for &group_id in groups {
        if !groups::exists(tx, group_id)? {
            return Err(HoursError::group_not_found(group_id));
        }
    }
    let sql_id = to_sql_id(id)?;
    tx.execute(DELETE_TASK_GROUPS, params![sql_id])?;
    for &group_id in groups {
        tx.execute(INSERT_TASK_GROUP, params![sql_id, to_sql_id(group_id)?])?;
    }
    Ok(())
}

pub fn get(tx: &Transaction, id: u64) -> Result<Option<Task>> {
    let task = tx.query_row(SELECT_TASK_BY_ID, params![to_sql_id(id)?], Task::from_row).optional()?;
    match task {
        Some(mut task) => {
            load_groups(tx, &mut task)?;
            Ok(Some(task))
        }
        None => Ok(None),
    }
}

pub fn exists(tx: &Transaction, id: u64) -> Result<bool> {
    Ok(tx.query_row(SELECT_TASK_BY_ID, params![to_sql_id(id)?], |_| Ok(())).optional()?.is_some())
}

pub fn list(tx: &Transaction) -> Result<Vec<Task>> {
    let mut stmt = tx.prepare(SELECT_TASKS)?;
    let mut tasks = stmt.query_map([], Task::from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
    for task in tasks.iter_mut() {
        load_groups(tx, task)?;
    }
    Ok(tasks)
}

/// Distinct ids of the tasks that belong to at least one of `group_ids`.
pub fn ids_in_groups(tx: &Transaction, group_ids: &[u64]) -> Result<Vec<u64>> {
    if group_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql_ids = group_ids.iter().map(|&id| to_sql_id(id)).collect::<Result<Vec<_>>>()?;
    let query = format!("{} ({}) ORDER BY task_id", SELECT_TASKS_IN_GROUPS, vec!["?"; sql_ids.len()].join(", "));
    let mut stmt = tx.prepare(&query)?;
    let ids = stmt.query_map(params_from_iter(sql_ids.iter()), |row| column_id(row, 0))?.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(ids)
}

pub fn insert(tx: &Transaction, task: &Task) -> Result<Task> {
    let name = validate_name(&task.name)?;
    tx.execute(INSERT_TASK, params![name, task.color])?;
    let id = tx.last_insert_rowid() as u64;
    store_groups(tx, id, &task.groups)?;
    debug!(id, name = %name, groups = ?task.groups, "inserted task");
    Ok(Task {
        id: Some(id),
        name,
        groups: task.groups.clone(),
        color: task.color.clone(),
    })
}

pub fn update(tx: &Transaction, task: &Task) -> Result<Task> {
    let id = task.id.ok_or_else(|| HoursError::InvalidInput("task id is not set".to_string()))?;
    let name = validate_name(&task.name)?;
    let affected = tx.execute(UPDATE_TASK, params![to_sql_id(id)?, name, task.color])?;
    if affected == 0 {
        return Err(HoursError::task_not_found(id));
    }
    store_groups(tx, id, &task.groups)?;
    debug!(id, "updated task");
    get(tx, id)?.ok_or_else(|| HoursError::task_not_found(id))
}

/// Deletes a task. History entries that reference it are kept.
pub fn delete(tx: &Transaction, id: u64) -> Result<()> {
    let sql_id = to_sql_id(id)?;
    tx.execute(DELETE_TASK_GROUPS, params![sql_id])?;
    let affected = tx.execute(DELETE_TASK, params![sql_id])?;
    if affected == 0 {
        return Err(HoursError::task_not_found(id));
    }
    debug!(id, "deleted task");
    Ok(())
}

/// Task registry bound to a store handle. Each call is one transaction.
pub struct Tasks {
    db: Db,
}

impl Tasks {
    pub fn new(db: &Db) -> Self {
        Tasks { db: db.clone() }
    }

    pub fn insert(&self, task: &Task) -> Result<Task> {
        self.db.write(|tx| insert(tx, task))
    }

    pub fn update(&self, task: &Task) -> Result<Task> {
        self.db.write(|tx| update(tx, task))
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        self.db.write(|tx| delete(tx, id))
    }

    pub fn get(&self, id: u64) -> Result<Option<Task>> {
        self.db.read(|tx| get(tx, id))
    }

    pub fn list(&self) -> Result<Vec<Task>> {
        self.db.read(list)
    }

    pub fn ids_in_groups(&self, group_ids: &[u64]) -> Result<Vec<u64>> {
        self.db.read(|tx| ids_in_groups(tx, group_ids))
    }
}
