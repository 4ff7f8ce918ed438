//! User facing text for every [`Message`].
//!
//! All wording lives here so commands only pick a variant and its
//! parameters.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // Groups
            Message::GroupCreated(name, id) => format!("Group '{}' created with id {}", name, id),
            Message::GroupUpdated(name) => format!("Group '{}' updated", name),
            Message::GroupDeleted(id) => format!("Group #{} deleted and removed from its tasks", id),
            Message::GroupListHeader => "Groups:".to_string(),
            Message::NoGroupsFound => "No groups yet. Create one with `hours group add <name>`".to_string(),
            Message::ConfirmDeleteGroup(name) => format!("Delete group '{}'?", name),

            // Tasks
            Message::TaskCreated(name, id) => format!("Task '{}' created with id {}", name, id),
            Message::TaskUpdated(name) => format!("Task '{}' updated", name),
            Message::TaskDeleted(id) => format!("Task #{} deleted, its history is kept", id),
            Message::TaskListHeader => "Tasks:".to_string(),
            Message::NoTasksFound => "No tasks yet. Create one with `hours task add <name>`".to_string(),
            Message::ConfirmDeleteTask(name) => format!("Delete task '{}'?", name),
            Message::NothingToUpdate => "Nothing to update".to_string(),

            // Active task
            Message::TaskStarted(task, started) => format!("Started '{}' at {}", task, started),
            Message::TaskStopped(task, duration) => format!("Stopped '{}' after {}", task, duration),
            Message::ActiveTaskHeader => "Active task:".to_string(),
            Message::NoActiveTask => "No task is running".to_string(),
            Message::NothingToResume => "No task was started before, nothing to resume".to_string(),

            // Reports
            Message::ReportHeader(from, to) => format!("Report for {} .. {}", from, to),
            Message::ReportEmpty => "No time tracked in this range".to_string(),
            Message::ReportTotal(total) => format!("Total: {}", total),
            Message::ReportRangeTooLong(days) => format!("A {} day report reaches past year 0000, lower report.default_days with `hours init`", days),

            // Configuration
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigDeleted => "Configuration removed, defaults will be used".to_string(),
            Message::ConfigModuleStorage => "Storage".to_string(),
            Message::ConfigModuleReport => "Reports".to_string(),

            // Prompts
            Message::PromptDatabasePath => "Database file (empty for the default location)".to_string(),
            Message::PromptReportDays => "Days covered by a report when no range is given".to_string(),

            // General
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
