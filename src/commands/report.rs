use crate::{
    api::Service,
    db::{db::Db, tasks::Tasks},
    libs::{
        config::Config,
        export::{self, ReportFormat},
        formatter::format_duration,
        messages::Message,
        report::ReportOptions,
        timestamp,
        view::{TaskNames, View},
    },
    msg_info, msg_print,
};
use anyhow::{anyhow, Result};
use chrono::{Days, NaiveDate};
use clap::Args;
use std::{fs::File, io, path::PathBuf};

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// First day of the report (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Last day of the report, inclusive; defaults to today
    #[arg(long)]
    to: Option<String>,
    /// Only tasks in this group, may be repeated
    #[arg(short, long = "group")]
    groups: Vec<u64>,
    /// Only this task, may be repeated
    #[arg(short, long = "task")]
    tasks: Vec<u64>,
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
    format: ReportFormat,
    /// Write json or csv output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ReportArgs {
    fn range(&self, default_days: u32) -> Result<(NaiveDate, NaiveDate)> {
        let end = match &self.to {
            Some(to) => timestamp::parse_date(to)?,
            None => timestamp::now().date_naive(),
        };
        let start = match &self.from {
            Some(from) => timestamp::parse_date(from)?,
            None => default_start(end, default_days)?,
        };
        Ok((start, end))
    }
}

/// First day of a report covering `days` days up to and including `end`.
pub fn default_start(end: NaiveDate, days: u32) -> Result<NaiveDate> {
    end.checked_sub_days(Days::new(u64::from(days.max(1)) - 1))
        .filter(|start| timestamp::check_date(*start).is_ok())
        .ok_or_else(|| anyhow!("{}", Message::ReportRangeTooLong(days)))
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    let config = Config::read()?;
    let (start, end) = args.range(config.report_days())?;
    let options = ReportOptions::new(start, end).groups(args.groups.clone()).tasks(args.tasks.clone());

    let db = Db::new()?;
    let report = Service::new(db.clone()).create_report(options).await?;
    let names = TaskNames::new(&Tasks::new(&db).list()?);

    match args.format {
        ReportFormat::Table => {
            msg_print!(
                Message::ReportHeader(timestamp::format_date(&start), timestamp::format_date(&end)),
                true
            );
            if report.total == 0 && report.notes.is_empty() {
                msg_info!(Message::ReportEmpty);
                return Ok(());
            }
            View::report(&report, &names)?;
            msg_print!(Message::ReportTotal(format_duration(report.total)));
        }
        ReportFormat::Json => match &args.output {
            Some(path) => export::write_json(&report, File::create(path)?)?,
            None => export::write_json(&report, io::stdout().lock())?,
        },
        ReportFormat::Csv => match &args.output {
            Some(path) => export::write_csv(&report, &names, File::create(path)?)?,
            None => export::write_csv(&report, &names, io::stdout().lock())?,
        },
    }
    Ok(())
}
