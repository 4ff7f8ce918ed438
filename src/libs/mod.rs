//! Core library modules for the hours application.
//!
//! The two engines live here: [`active_task`] (the single active task state
//! machine) and [`report`] (aggregation of the history log). The remaining
//! modules are shared infrastructure: errors, timestamps, configuration,
//! user messages and presentation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hours::db::{db::Db, tasks::{Task, Tasks}};
//! use hours::libs::active_task::{ActiveTasks, StopOptions};
//!
//! let db = Db::open_in_memory()?;
//! let task = Tasks::new(&db).insert(&Task::new("Write docs", None))?;
//! let sessions = ActiveTasks::new(&db);
//! sessions.start(task.id.unwrap_or_default())?;
//! sessions.stop(&StopOptions::new().note("first draft"))?;
//! # Ok::<(), hours::libs::error::HoursError>(())
//! ```

pub mod active_task;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod report;
pub mod timestamp;
pub mod view;
