//! # Hours - single active task time tracking
//!
//! A command-line time tracker built around one rule: at most one task is
//! running at any moment. Finished sessions land in an append-only history
//! log that reports aggregate per day and per task.
//!
//! ## Features
//!
//! - **Active Task**: Start, stop and resume sessions, with back-dated stops
//! - **Groups and Tasks**: Organize tasks into any number of groups
//! - **Reports**: Day by task matrices, totals and session notes
//! - **Data Export**: Reports as terminal tables, JSON or CSV
//! - **Request Surface**: Serializable requests served by an async service
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hours::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
