use crate::{
    db::{db::Db, tasks::Tasks},
    libs::{
        active_task::{ActiveTasks, StopOptions},
        formatter::format_duration,
        messages::Message,
        timestamp,
        view::TaskNames,
    },
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct StopArgs {
    /// Book the session against another task
    #[arg(short, long = "task")]
    task_id: Option<u64>,
    /// Override the session start (YYYY-MM-DDTHH:MM:SSZ)
    #[arg(long)]
    started: Option<String>,
    /// Override the session end, defaults to now
    #[arg(long)]
    stopped: Option<String>,
    /// Note attached to the history entry
    #[arg(short, long)]
    note: Option<String>,
}

impl StopArgs {
    fn options(&self) -> Result<StopOptions> {
        let mut options = StopOptions::new();
        if let Some(task_id) = self.task_id {
            options = options.task(task_id);
        }
        if let Some(started) = &self.started {
            options = options.started(timestamp::parse(started)?);
        }
        if let Some(stopped) = &self.stopped {
            options = options.stopped(timestamp::parse(stopped)?);
        }
        if let Some(note) = &self.note {
            options = options.note(note);
        }
        Ok(options)
    }
}

pub async fn cmd(args: StopArgs) -> Result<()> {
    let options = args.options()?;
    let db = Db::new()?;
    let worker = db.clone();
    let entry = tokio::task::spawn_blocking(move || ActiveTasks::new(&worker).stop(&options)).await??;

    let names = TaskNames::new(&Tasks::new(&db).list()?);
    msg_success!(Message::TaskStopped(names.label(entry.task_id), format_duration(entry.duration())));
    Ok(())
}
