use crate::{
    db::{
        db::Db,
        groups::{Group, Groups},
    },
    libs::{error::HoursError, messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    command: Option<GroupCommand>,
}

#[derive(Debug, Subcommand)]
enum GroupCommand {
    /// Create a new group
    Add {
        /// Group name
        name: String,
        /// Group color
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List all groups
    List,
    /// Rename or recolor a group
    Edit {
        id: u64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a group and remove it from its tasks
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: GroupArgs) -> Result<()> {
    let db = Db::new()?;
    let groups = Groups::new(&db);
    match args.command.unwrap_or(GroupCommand::List) {
        GroupCommand::Add { name, color } => {
            let group = groups.insert(&Group::new(&name, color.as_deref()))?;
            msg_success!(Message::GroupCreated(group.name, group.id.unwrap_or_default()));
        }
        GroupCommand::List => {
            let list = groups.list()?;
            if list.is_empty() {
                msg_info!(Message::NoGroupsFound);
                return Ok(());
            }
            msg_print!(Message::GroupListHeader, true);
            View::groups(&list)?;
        }
        GroupCommand::Edit { id, name, color } => {
            let mut group = groups.get(id)?.ok_or_else(|| HoursError::group_not_found(id))?;
            if name.is_none() && color.is_none() {
                msg_info!(Message::NothingToUpdate);
                return Ok(());
            }
            if let Some(name) = name {
                group.name = name;
            }
            if let Some(color) = color {
                group.color = color;
            }
            let group = groups.update(&group)?;
            msg_success!(Message::GroupUpdated(group.name));
        }
        GroupCommand::Delete { id, yes } => {
            let group = groups.get(id)?.ok_or_else(|| HoursError::group_not_found(id))?;
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteGroup(group.name).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            groups.delete(id)?;
            msg_success!(Message::GroupDeleted(id));
        }
    }
    Ok(())
}
