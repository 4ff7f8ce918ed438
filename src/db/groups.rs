//! Group records.
//!
//! A group is a named, colored bucket that tasks can belong to. Membership
//! lives on the task side (`task_groups`); deleting a group drops it from
//! every task in the same transaction.

use super::db::{column_id, to_sql_id, Db};
use crate::libs::error::{HoursError, Result};
use rusqlite::{params, OptionalExtension, Row, Transaction};
use serde::{Deserialize, Serialize};
use tracing::debug;

const INSERT_GROUP: &str = "INSERT INTO groups (name, color) VALUES (?1, ?2)";
const UPDATE_GROUP: &str = "UPDATE groups SET name = ?2, color = ?3 WHERE id = ?1";
const DELETE_GROUP: &str = "DELETE FROM groups WHERE id = ?1";
const DELETE_GROUP_MEMBERSHIP: &str = "DELETE FROM task_groups WHERE group_id = ?1";
const SELECT_GROUPS: &str = "SELECT id, name, color FROM groups ORDER BY id";
const SELECT_GROUP_BY_ID: &str = "SELECT id, name, color FROM groups WHERE id = ?1";

pub const DEFAULT_COLOR: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Group {
    pub fn new(name: &str, color: Option<&str>) -> Self {
        Group {
            id: None,
            name: name.to_string(),
            color: color.unwrap_or(DEFAULT_COLOR).to_string(),
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Group> {
        Ok(Group {
            id: Some(column_id(row, 0)?),
            name: row.get(1)?,
            color: row.get(2)?,
        })
    }
}

pub(crate) fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HoursError::InvalidInput("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

pub fn get(tx: &Transaction, id: u64) -> Result<Option<Group>> {
    Ok(tx.query_row(SELECT_GROUP_BY_ID, params![to_sql_id(id)?], Group::from_row).optional()?)
}

pub fn exists(tx: &Transaction, id: u64) -> Result<bool> {
    Ok(get(tx, id)?.is_some())
}

pub fn list(tx: &Transaction) -> Result<Vec<Group>> {
    let mut stmt = tx.prepare(SELECT_GROUPS)?;
    let groups = stmt.query_map([], Group::from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(groups)
}

pub fn insert(tx: &Transaction, group: &Group) -> Result<Group> {
    let name = validate_name(&group.name)?;
    tx.execute(INSERT_GROUP, params![name, group.color])?;
    let id = tx.last_insert_rowid() as u64;
    debug!(id, name = %name, "inserted group");
    Ok(Group {
        id: Some(id),
        name,
        color: group.color.clone(),
    })
}

pub fn update(tx: &Transaction, group: &Group) -> Result<Group> {
    let id = group.id.ok_or_else(|| HoursError::InvalidInput("group id is not set".to_string()))?;
    let name = validate_name(&group.name)?;
    let affected = tx.execute(UPDATE_GROUP, params![to_sql_id(id)?, name, group.color])?;
    if affected == 0 {
        return Err(HoursError::group_not_found(id));
    }
    debug!(id, "updated group");
    get(tx, id)?.ok_or_else(|| HoursError::group_not_found(id))
}

pub fn delete(tx: &Transaction, id: u64) -> Result<()> {
    let sql_id = to_sql_id(id)?;
    let released = tx.execute(DELETE_GROUP_MEMBERSHIP, params![sql_id])?;
    let affected = tx.execute(DELETE_GROUP, params![sql_id])?;
    if affected == 0 {
        return Err(HoursError::group_not_found(id));
    }
    debug!(id, released, "deleted group");
    Ok(())
}

/// Group registry bound to a store handle. Each call is one transaction.
pub struct Groups {
    db: Db,
}

impl Groups {
    pub fn new(db: &Db) -> Self {
        Groups { db: db.clone() }
    }

    pub fn insert(&self, group: &Group) -> Result<Group> {
        self.db.write(|tx| insert(tx, group))
    }

    pub fn update(&self, group: &Group) -> Result<Group> {
        self.db.write(|tx| update(tx, group))
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        self.db.write(|tx| delete(tx, id))
    }

    pub fn get(&self, id: u64) -> Result<Option<Group>> {
        self.db.read(|tx| get(tx, id))
    }

    pub fn list(&self) -> Result<Vec<Group>> {
        self.db.read(list)
    }
}
