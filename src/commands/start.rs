use crate::{
    api::Service,
    db::{db::Db, settings::ActiveTask, tasks::Tasks},
    libs::{active_task::ActiveTasks, error::HoursError, messages::Message, timestamp, view::TaskNames},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Id of the task to start
    task_id: u64,
}

pub async fn cmd(args: StartArgs) -> Result<()> {
    let db = Db::new()?;
    let active = Service::new(db.clone()).start_task(args.task_id).await?;
    announce(&db, &active)
}

/// Starts the task that was started most recently.
pub async fn resume() -> Result<()> {
    let db = Db::new()?;
    let worker = db.clone();
    let resumed = tokio::task::spawn_blocking(move || ActiveTasks::new(&worker).resume()).await?;
    match resumed {
        Ok(active) => announce(&db, &active),
        Err(HoursError::NotFound { id: 0, .. }) => {
            msg_info!(Message::NothingToResume);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn announce(db: &Db, active: &ActiveTask) -> Result<()> {
    let names = TaskNames::new(&Tasks::new(db).list()?);
    let started = active.started().map(|ts| timestamp::format(&ts)).unwrap_or_default();
    msg_success!(Message::TaskStarted(names.label(active.task_id()), started));
    Ok(())
}
