//! Report aggregation over the history log.
//!
//! A report covers an inclusive range of UTC calendar days and sums the
//! history entries that started within it, per day and per task. Sessions
//! that cross midnight count entirely towards the day they started on.
//! Reports are derived on demand and never stored.

use crate::db::db::Db;
use crate::db::history::{self, HistoryEntry};
use crate::db::tasks;
use crate::libs::error::Result;
use crate::libs::timestamp;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Transaction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Only include tasks belonging to any of these groups.
    #[serde(default)]
    pub groups: Vec<u64>,
    /// Only include these tasks (added to the group selection, if any).
    #[serde(default)]
    pub tasks: Vec<u64>,
}

impl ReportOptions {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        ReportOptions {
            start,
            end,
            groups: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn groups<I: IntoIterator<Item = u64>>(mut self, groups: I) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }

    pub fn tasks<I: IntoIterator<Item = u64>>(mut self, tasks: I) -> Self {
        self.tasks = tasks.into_iter().collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDay {
    pub day: NaiveDate,
    /// Seconds per task id.
    pub tasks: BTreeMap<u64, u64>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTask {
    pub id: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportNote {
    pub task_id: u64,
    pub note: String,
    #[serde(with = "timestamp::serde_utc")]
    pub started: DateTime<Utc>,
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// One bucket per day of the range, ascending.
    pub days: Vec<ReportDay>,
    /// Per task totals, in the order tasks were first seen.
    pub tasks: Vec<ReportTask>,
    /// Notes in chronological order.
    pub notes: Vec<ReportNote>,
    pub total: u64,
}

impl Report {
    /// A report with zeroed buckets for every day in `[start, end]`.
    fn empty(start: NaiveDate, end: NaiveDate) -> Self {
        let days = start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|day| ReportDay {
                day,
                tasks: BTreeMap::new(),
                total: 0,
            })
            .collect();
        Report {
            days,
            tasks: Vec::new(),
            notes: Vec::new(),
            total: 0,
        }
    }

    pub fn task_total(&self, task_id: u64) -> u64 {
        self.tasks.iter().find(|t| t.id == task_id).map_or(0, |t| t.total)
    }
}

/// Accumulates entries into a report.
struct ReportBuilder {
    first_day: NaiveDate,
    report: Report,
    task_index: HashMap<u64, usize>,
}

impl ReportBuilder {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        ReportBuilder {
            first_day: start,
            report: Report::empty(start, end),
            task_index: HashMap::new(),
        }
    }

    fn add(&mut self, entry: &HistoryEntry) {
        let duration = entry.duration();
        let day = entry.start.date_naive();
        let offset = (day - self.first_day).num_days();
        let bucket = usize::try_from(offset).ok().and_then(|idx| self.report.days.get_mut(idx));
        let Some(bucket) = bucket else {
            debug!(entry = entry.id, %day, "entry outside of report range");
            return;
        };

        bucket.total += duration;
        *bucket.tasks.entry(entry.task_id).or_insert(0) += duration;

        let tasks = &mut self.report.tasks;
        let idx = *self.task_index.entry(entry.task_id).or_insert_with(|| {
            tasks.push(ReportTask { id: entry.task_id, total: 0 });
            tasks.len() - 1
        });
        tasks[idx].total += duration;
        self.report.total += duration;

        if let Some(note) = entry.note.as_deref().filter(|note| !note.is_empty()) {
            self.report.notes.push(ReportNote {
                task_id: entry.task_id,
                note: note.to_string(),
                started: entry.start,
                duration,
            });
        }
    }

    fn finish(self) -> Report {
        self.report
    }
}

/// Resolves the task filter. `None` means every task is included; an empty
/// set means nothing can match.
fn task_filter(tx: &Transaction, options: &ReportOptions) -> Result<Option<HashSet<u64>>> {
    if !options.groups.is_empty() {
        let mut filter: HashSet<u64> = tasks::ids_in_groups(tx, &options.groups)?.into_iter().collect();
        filter.extend(options.tasks.iter().copied());
        return Ok(Some(filter));
    }
    if options.tasks.is_empty() {
        return Ok(None);
    }
    Ok(Some(options.tasks.iter().copied().collect()))
}

pub fn create(tx: &Transaction, options: &ReportOptions) -> Result<Report> {
    timestamp::check_date(options.start)?;
    timestamp::check_date(options.end)?;
    let mut builder = ReportBuilder::new(options.start, options.end);
    if options.end < options.start {
        debug!(start = %options.start, end = %options.end, "empty report range");
        return Ok(builder.finish());
    }

    let filter = task_filter(tx, options)?;
    if filter.as_ref().is_some_and(HashSet::is_empty) {
        debug!(groups = ?options.groups, "no task matches the selected groups");
        return Ok(builder.finish());
    }

    let from = timestamp::start_of_day(options.start);
    let to = timestamp::end_of_day(options.end);
    let entries = history::started_between(tx, &from, &to)?;
    debug!(entries = entries.len(), filter = ?filter, "aggregating history");

    for entry in entries.iter().filter(|e| filter.as_ref().map_or(true, |f| f.contains(&e.task_id))) {
        builder.add(entry);
    }
    Ok(builder.finish())
}

/// Report generation bound to a store handle. Runs in a read transaction,
/// so it sees the state before or after a start/stop, never in between.
pub struct Reports {
    db: Db,
}

impl Reports {
    pub fn new(db: &Db) -> Self {
        Reports { db: db.clone() }
    }

    pub fn create(&self, options: &ReportOptions) -> Result<Report> {
        self.db.read(|tx| create(tx, options))
    }
}
