use crate::{
    api::Service,
    db::{db::Db, tasks::Tasks},
    libs::{messages::Message, timestamp, view::{TaskNames, View}},
    msg_info, msg_print,
};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let db = Db::new()?;
    let active = Service::new(db.clone()).get_active_task().await?;
    if !active.is_active() {
        msg_info!(Message::NoActiveTask);
        return Ok(());
    }

    let names = TaskNames::new(&Tasks::new(&db).list()?);
    msg_print!(Message::ActiveTaskHeader, true);
    View::active(&active, &names, &timestamp::now())?;
    Ok(())
}
