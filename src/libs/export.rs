//! Machine readable report output.
//!
//! JSON keeps the report structure as is (the same shape the request surface
//! returns). CSV flattens it into one row per day and task, which imports
//! cleanly into spreadsheets; notes are not part of the CSV output.

use super::formatter::format_hours;
use super::report::Report;
use super::timestamp;
use super::view::TaskNames;
use anyhow::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Terminal tables.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// One row per day and task.
    Csv,
}

pub fn write_json<W: Write>(report: &Report, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Writes `day,task_id,task,seconds,hours` rows. Days without any tracked
/// time produce no rows.
pub fn write_csv<W: Write>(report: &Report, names: &TaskNames, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["day", "task_id", "task", "seconds", "hours"])?;
    for day in &report.days {
        let date = timestamp::format_date(&day.day);
        for (task_id, seconds) in &day.tasks {
            wtr.write_record([
                date.clone(),
                task_id.to_string(),
                names.label(*task_id),
                seconds.to_string(),
                format_hours(*seconds),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
