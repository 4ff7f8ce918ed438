use crate::{
    db::{
        db::Db,
        groups::Groups,
        tasks::{Task, Tasks},
    },
    libs::{error::HoursError, messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: Option<TaskCommand>,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a new task
    Add {
        /// Task name
        name: String,
        #[arg(short, long)]
        color: Option<String>,
        /// Group id, may be repeated
        #[arg(short, long = "group")]
        groups: Vec<u64>,
    },
    /// List all tasks
    List,
    /// Change a task's name, color or groups
    Edit {
        id: u64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
        /// Replace the task's groups, may be repeated
        #[arg(short, long = "group")]
        groups: Option<Vec<u64>>,
    },
    /// Delete a task; its tracked history is kept
    Delete {
        id: u64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    let db = Db::new()?;
    let tasks = Tasks::new(&db);
    match args.command.unwrap_or(TaskCommand::List) {
        TaskCommand::Add { name, color, groups } => {
            let task = tasks.insert(&Task::new(&name, color.as_deref()).with_groups(groups))?;
            msg_success!(Message::TaskCreated(task.name, task.id.unwrap_or_default()));
        }
        TaskCommand::List => {
            let list = tasks.list()?;
            if list.is_empty() {
                msg_info!(Message::NoTasksFound);
                return Ok(());
            }
            msg_print!(Message::TaskListHeader, true);
            View::tasks(&list, &Groups::new(&db).list()?)?;
        }
        TaskCommand::Edit { id, name, color, groups } => {
            let mut task = tasks.get(id)?.ok_or_else(|| HoursError::task_not_found(id))?;
            if name.is_none() && color.is_none() && groups.is_none() {
                msg_info!(Message::NothingToUpdate);
                return Ok(());
            }
            if let Some(name) = name {
                task.name = name;
            }
            if let Some(color) = color {
                task.color = color;
            }
            if let Some(groups) = groups {
                task = task.with_groups(groups);
            }
            let task = tasks.update(&task)?;
            msg_success!(Message::TaskUpdated(task.name));
        }
        TaskCommand::Delete { id, yes } => {
            let task = tasks.get(id)?.ok_or_else(|| HoursError::task_not_found(id))?;
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteTask(task.name).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            tasks.delete(id)?;
            msg_success!(Message::TaskDeleted(id));
        }
    }
    Ok(())
}
