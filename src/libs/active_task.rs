//! The active task state machine.
//!
//! At most one task accrues time at any moment. The state is the
//! `ActiveTask` singleton in the store: `Idle` when its task id is 0,
//! `Active(task, started)` otherwise. Every transition reads and writes the
//! singleton inside a single write transaction, so two overlapping starts
//! can never both observe `Idle`, and a failed transition leaves no trace.
//!
//! ```text
//!            start(task)                 stop(options)
//!   Idle ───────────────▶ Active ───────────────────────▶ Idle
//!                           │                     + one history entry
//!                           └── start(_) ─▶ AlreadyActive
//!   Idle ── stop(_) ─▶ NotActive
//! ```

use crate::db::db::Db;
use crate::db::history::{self, HistoryEntry};
use crate::db::settings::{self, ActiveTask, PreviousTask};
use crate::db::tasks;
use crate::libs::error::{HoursError, Result};
use crate::libs::timestamp;
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::Transaction;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Parameters of a stop request. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopOptions {
    /// Task to book the session against, if it differs from the running one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,
    /// Overrides the recorded start of the session.
    #[serde(default, with = "timestamp::serde_utc_opt", skip_serializing_if = "Option::is_none")]
    pub started: Option<DateTime<Utc>>,
    /// Overrides the end of the session, which is otherwise "now".
    #[serde(default, with = "timestamp::serde_utc_opt", skip_serializing_if = "Option::is_none")]
    pub stopped: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl StopOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(mut self, task_id: u64) -> Self {
        self.task_id = Some(task_id);
        self
    }

    pub fn started(mut self, started: DateTime<Utc>) -> Self {
        self.started = Some(started);
        self
    }

    pub fn stopped(mut self, stopped: DateTime<Utc>) -> Self {
        self.stopped = Some(stopped);
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }
}

pub struct ActiveTasks {
    db: Db,
}

impl ActiveTasks {
    pub fn new(db: &Db) -> Self {
        ActiveTasks { db: db.clone() }
    }

    pub fn active(&self) -> Result<ActiveTask> {
        self.db.read(settings::active_task)
    }

    pub fn previous_task_id(&self) -> Result<u64> {
        Ok(self.db.read(settings::previous_task)?.task_id)
    }

    pub fn start(&self, task_id: u64) -> Result<ActiveTask> {
        self.start_at(task_id, timestamp::now())
    }

    /// Makes `task_id` the active task as of `now`.
    ///
    /// Fails with `NotFound` when the task does not exist (id 0 never does)
    /// and with `AlreadyActive` when another session is running; a running
    /// session is never stopped implicitly.
    pub fn start_at(&self, task_id: u64, now: DateTime<Utc>) -> Result<ActiveTask> {
        if task_id == 0 {
            return Err(HoursError::task_not_found(0));
        }
        let now = timestamp::check(now.trunc_subsecs(0))?;
        self.db.write(|tx| start_in(tx, task_id, now))
    }

    pub fn resume(&self) -> Result<ActiveTask> {
        self.resume_at(timestamp::now())
    }

    /// Starts the task that was started most recently.
    pub fn resume_at(&self, now: DateTime<Utc>) -> Result<ActiveTask> {
        let now = timestamp::check(now.trunc_subsecs(0))?;
        self.db.write(|tx| {
            let previous = settings::previous_task(tx)?;
            if previous.task_id == 0 {
                return Err(HoursError::task_not_found(0));
            }
            start_in(tx, previous.task_id, now)
        })
    }

    pub fn stop(&self, options: &StopOptions) -> Result<HistoryEntry> {
        self.stop_at(options, timestamp::now())
    }

    /// Ends the running session and appends it to the history log.
    ///
    /// The entry spans `options.started` (or the session start) to
    /// `options.stopped` (or `now`). When `options.task_id` names another
    /// existing task the entry is booked against that task instead.
    pub fn stop_at(&self, options: &StopOptions, now: DateTime<Utc>) -> Result<HistoryEntry> {
        let now = now.trunc_subsecs(0);
        self.db.write(|tx| {
            let current = settings::active_task(tx)?;
            let session_start = match current.started() {
                Some(started) if current.is_active() => started,
                _ => return Err(HoursError::NotActive),
            };

            let task_id = match options.task_id {
                Some(id) if id != 0 && id != current.task_id() => {
                    if !tasks::exists(tx, id)? {
                        return Err(HoursError::task_not_found(id));
                    }
                    debug!(running = current.task_id(), booked = id, "booking session against another task");
                    id
                }
                _ => current.task_id(),
            };

            let start = options.started.map(|ts| ts.trunc_subsecs(0)).unwrap_or(session_start);
            let end = options.stopped.map(|ts| ts.trunc_subsecs(0)).unwrap_or(now);
            let note = options.note.as_deref().filter(|note| !note.trim().is_empty());

            let entry = history::append(tx, task_id, start, end, note)?;
            settings::set_active_task(tx, &ActiveTask::idle())?;
            info!(task_id, seconds = entry.duration(), "stopped task");
            Ok(entry)
        })
    }
}

fn start_in(tx: &Transaction, task_id: u64, now: DateTime<Utc>) -> Result<ActiveTask> {
    if !tasks::exists(tx, task_id)? {
        return Err(HoursError::task_not_found(task_id));
    }
    let current = settings::active_task(tx)?;
    if current.is_active() {
        return Err(HoursError::AlreadyActive(current.task_id()));
    }
    settings::set_previous_task(tx, &PreviousTask { task_id })?;
    let next = ActiveTask::running(task_id, now);
    settings::set_active_task(tx, &next)?;
    info!(task_id, started = %timestamp::format(&now), "started task");
    Ok(next)
}
