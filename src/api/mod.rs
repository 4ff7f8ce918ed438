//! Request/response surface of the core.
//!
//! Outside callers talk to the store through [`Service`], either with the
//! typed async methods or by handing a serialized [`Request`] to
//! [`Service::handle`]. Every operation runs on tokio's blocking pool as one
//! store transaction. Dropping the returned future does not cancel the
//! transaction: it runs to commit or rollback regardless.
//!
//! ```rust,no_run
//! use hours::api::{Request, Response, Service};
//! use hours::db::db::Db;
//!
//! # async fn demo() -> Result<(), hours::libs::error::HoursError> {
//! let service = Service::new(Db::open_in_memory()?);
//! let request: Request = serde_json::from_str(r#"{"type":"active.task"}"#)?;
//! if let Response::ActiveTask(active) = service.handle(request).await? {
//!     println!("running: {}", active.task_id());
//! }
//! # Ok(())
//! # }
//! ```

use crate::db::db::Db;
use crate::db::groups::{self, Group};
use crate::db::settings::ActiveTask;
use crate::db::tasks::{self, Task};
use crate::libs::active_task::{ActiveTasks, StopOptions};
use crate::libs::error::{HoursError, Result};
use crate::libs::report::{Report, ReportOptions, Reports};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Request {
    #[serde(rename = "active.task")]
    ActiveTask,
    #[serde(rename = "start.task")]
    StartTask { task_id: u64 },
    #[serde(rename = "stop.task")]
    StopTask {
        #[serde(default)]
        options: StopOptions,
    },
    #[serde(rename = "create.report")]
    CreateReport { options: ReportOptions },

    #[serde(rename = "read.groups")]
    ReadGroups,
    #[serde(rename = "insert.group")]
    InsertGroup { group: Group },
    #[serde(rename = "update.group")]
    UpdateGroup { group: Group },
    #[serde(rename = "delete.group")]
    DeleteGroup { group_id: u64 },

    #[serde(rename = "read.tasks")]
    ReadTasks,
    #[serde(rename = "insert.task")]
    InsertTask { task: Task },
    #[serde(rename = "update.task")]
    UpdateTask { task: Task },
    #[serde(rename = "delete.task")]
    DeleteTask { task_id: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Response {
    ActiveTask(ActiveTask),
    Report(Report),
    Groups(Vec<Group>),
    Group(Group),
    Tasks(Vec<Task>),
    Task(Task),
    /// Success without a payload (stop, deletes).
    Done,
}

/// Serializable form of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: String,
    pub message: String,
}

impl From<&HoursError> for ApiError {
    fn from(error: &HoursError) -> Self {
        ApiError {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct Service {
    db: Db,
}

impl Service {
    pub fn new(db: Db) -> Self {
        Service { db }
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(Db) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || op(db)).await?
    }

    pub async fn get_active_task(&self) -> Result<ActiveTask> {
        self.run(|db| ActiveTasks::new(&db).active()).await
    }

    pub async fn start_task(&self, task_id: u64) -> Result<ActiveTask> {
        self.run(move |db| ActiveTasks::new(&db).start(task_id)).await
    }

    pub async fn stop_task(&self, options: StopOptions) -> Result<()> {
        self.run(move |db| ActiveTasks::new(&db).stop(&options).map(|_| ())).await
    }

    pub async fn create_report(&self, options: ReportOptions) -> Result<Report> {
        self.run(move |db| Reports::new(&db).create(&options)).await
    }

    pub async fn handle(&self, request: Request) -> Result<Response> {
        debug!(?request, "handling request");
        match request {
            Request::ActiveTask => self.get_active_task().await.map(Response::ActiveTask),
            Request::StartTask { task_id } => self.start_task(task_id).await.map(Response::ActiveTask),
            Request::StopTask { options } => self.stop_task(options).await.map(|_| Response::Done),
            Request::CreateReport { options } => self.create_report(options).await.map(Response::Report),

            Request::ReadGroups => self.run(|db| db.read(groups::list)).await.map(Response::Groups),
            Request::InsertGroup { group } => self.run(move |db| db.write(|tx| groups::insert(tx, &group))).await.map(Response::Group),
            Request::UpdateGroup { group } => self.run(move |db| db.write(|tx| groups::update(tx, &group))).await.map(Response::Group),
            Request::DeleteGroup { group_id } => self.run(move |db| db.write(|tx| groups::delete(tx, group_id))).await.map(|_| Response::Done),

            Request::ReadTasks => self.run(|db| db.read(tasks::list)).await.map(Response::Tasks),
            Request::InsertTask { task } => self.run(move |db| db.write(|tx| tasks::insert(tx, &task))).await.map(Response::Task),
            Request::UpdateTask { task } => self.run(move |db| db.write(|tx| tasks::update(tx, &task))).await.map(Response::Task),
            Request::DeleteTask { task_id } => self.run(move |db| db.write(|tx| tasks::delete(tx, task_id))).await.map(|_| Response::Done),
        }
    }
}
