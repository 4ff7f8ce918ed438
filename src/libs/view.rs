use super::formatter::{format_duration, format_elapsed};
use super::report::Report;
use super::timestamp;
use crate::db::groups::Group;
use crate::db::settings::ActiveTask;
use crate::db::tasks::Task;
use anyhow::Result;
use chrono::{DateTime, Utc};
use prettytable::{row, Cell, Row, Table};
use std::collections::HashMap;

/// Resolves task ids to display names. History can outlive its tasks, so
/// unknown ids get a placeholder instead of an error.
pub struct TaskNames {
    names: HashMap<u64, String>,
}

impl TaskNames {
    pub fn new(tasks: &[Task]) -> Self {
        let names = tasks.iter().filter_map(|t| t.id.map(|id| (id, t.name.clone()))).collect();
        TaskNames { names }
    }

    pub fn label(&self, id: u64) -> String {
        match self.names.get(&id) {
            Some(name) => name.clone(),
            None => format!("<deleted #{}>", id),
        }
    }
}

pub struct View {}

impl View {
    pub fn groups(groups: &[Group]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", "NAME", "COLOR"]);
        for group in groups {
            table.add_row(row![group.id.unwrap_or(0), group.name, group.color]);
        }
        table.printstd();
        Ok(())
    }

    pub fn tasks(tasks: &[Task], groups: &[Group]) -> Result<()> {
        let group_names: HashMap<u64, &str> = groups.iter().filter_map(|g| g.id.map(|id| (id, g.name.as_str()))).collect();
        let mut table = Table::new();
        table.add_row(row!["ID", "NAME", "GROUPS", "COLOR"]);
        for task in tasks {
            let member_of = task
                .groups
                .iter()
                .map(|id| group_names.get(id).map_or_else(|| format!("#{}", id), |name| name.to_string()))
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(row![task.id.unwrap_or(0), task.name, member_of, task.color]);
        }
        table.printstd();
        Ok(())
    }

    pub fn active(active: &ActiveTask, names: &TaskNames, now: &DateTime<Utc>) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["TASK", "STARTED", "ELAPSED"]);
        if let Some(started) = active.started() {
            table.add_row(row![
                names.label(active.task_id()),
                timestamp::format(&started),
                format_elapsed(timestamp::seconds_between(&started, now))
            ]);
        }
        table.printstd();
        Ok(())
    }

    /// Prints the day-by-task matrix followed by per task totals and notes.
    pub fn report(report: &Report, names: &TaskNames) -> Result<()> {
        let mut table = Table::new();
        let mut header = vec![Cell::new("DAY")];
        header.extend(report.tasks.iter().map(|t| Cell::new(&names.label(t.id))));
        header.push(Cell::new("TOTAL"));
        table.add_row(Row::new(header));

        for day in &report.days {
            let mut cells = vec![Cell::new(&timestamp::format_date(&day.day))];
            cells.extend(
                report
                    .tasks
                    .iter()
                    .map(|t| Cell::new(&format_duration(day.tasks.get(&t.id).copied().unwrap_or(0)))),
            );
            cells.push(Cell::new(&format_duration(day.total)));
            table.add_row(Row::new(cells));
        }

        let mut totals = vec![Cell::new("TOTAL")];
        totals.extend(report.tasks.iter().map(|t| Cell::new(&format_duration(t.total))));
        totals.push(Cell::new(&format_duration(report.total)));
        table.add_row(Row::new(totals));
        table.printstd();

        if !report.notes.is_empty() {
            let mut notes = Table::new();
            notes.add_row(row!["STARTED", "TASK", "DURATION", "NOTE"]);
            for note in &report.notes {
                notes.add_row(row![
                    timestamp::format(&note.started),
                    names.label(note.task_id),
                    format_duration(note.duration),
                    note.note
                ]);
            }
            notes.printstd();
        }
        Ok(())
    }
}
