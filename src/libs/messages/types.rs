#[derive(Debug, Clone)]
pub enum Message {
    // === GROUP MESSAGES ===
    GroupCreated(String, u64), // name, id
    GroupUpdated(String),
    GroupDeleted(u64),
    GroupListHeader,
    NoGroupsFound,
    ConfirmDeleteGroup(String),

    // === TASK MESSAGES ===
    TaskCreated(String, u64), // name, id
    TaskUpdated(String),
    TaskDeleted(u64),
    TaskListHeader,
    NoTasksFound,
    ConfirmDeleteTask(String),
    NothingToUpdate,

    // === ACTIVE TASK MESSAGES ===
    TaskStarted(String, String), // task, started
    TaskStopped(String, String), // task, duration
    ActiveTaskHeader,
    NoActiveTask,
    NothingToResume,

    // === REPORT MESSAGES ===
    ReportHeader(String, String), // from, to
    ReportEmpty,
    ReportTotal(String),
    ReportRangeTooLong(u32), // days

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleStorage,
    ConfigModuleReport,

    // === PROMPTS ===
    PromptDatabasePath,
    PromptReportDays,

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
