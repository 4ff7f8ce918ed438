//! Record store for the hours application.
//!
//! An embedded SQLite database holding four record kinds: groups, tasks,
//! singleton settings and the history log. Each kind has a module exposing
//! free functions over a [`rusqlite::Transaction`], so higher layers can
//! compose several of them into one atomic unit, plus a small handle type
//! that runs a single operation per transaction.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hours::db::{db::Db, groups::{Group, Groups}, tasks::{Task, Tasks}};
//!
//! let db = Db::open_in_memory()?;
//! let group = Groups::new(&db).insert(&Group::new("Clients", Some("blue")))?;
//! let task = Tasks::new(&db).insert(&Task::new("Acme backend", None).with_groups(group.id))?;
//! # Ok::<(), hours::libs::error::HoursError>(())
//! ```

/// Connection handling and the read/write transaction helpers.
pub mod db;

/// Group records.
pub mod groups;

/// Append-only log of completed time spans.
pub mod history;

/// `ActiveTask` and `PreviousTask` singletons.
pub mod settings;

/// Task records and group membership.
pub mod tasks;
