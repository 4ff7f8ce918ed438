pub mod group;
pub mod init;
pub mod report;
pub mod start;
pub mod status;
pub mod stop;
pub mod task;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage task groups")]
    Group(group::GroupArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Start tracking a task")]
    Start(start::StartArgs),
    #[command(about = "Start the most recently started task again")]
    Resume,
    #[command(about = "Show the running task")]
    Status,
    #[command(about = "Stop the running task and record the session")]
    Stop(stop::StopArgs),
    #[command(about = "Tracked time per day and task")]
    Report(report::ReportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Group(args) => group::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Start(args) => start::cmd(args).await,
            Commands::Resume => start::resume().await,
            Commands::Status => status::cmd().await,
            Commands::Stop(args) => stop::cmd(args).await,
            Commands::Report(args) => report::cmd(args).await,
        }
    }
}
