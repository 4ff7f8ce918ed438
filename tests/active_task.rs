#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, Utc};
    use hours::db::db::Db;
    use hours::db::history::History;
    use hours::db::tasks::{Task, Tasks};
    use hours::libs::active_task::{ActiveTasks, StopOptions};
    use hours::libs::error::HoursError;
    use hours::libs::timestamp;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ActiveTaskContext {
        temp_dir: TempDir,
        db: Db,
        coding: u64,
        review: u64,
    }

    impl TestContext for ActiveTaskContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("hours.db")).unwrap();
            let tasks = Tasks::new(&db);
            let coding = tasks.insert(&Task::new("coding", None)).unwrap().id.unwrap();
            let review = tasks.insert(&Task::new("review", None)).unwrap().id.unwrap();
            ActiveTaskContext { temp_dir, db, coding, review }
        }
    }

    fn ts(value: &str) -> DateTime<Utc> {
        timestamp::parse(value).unwrap()
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_fresh_store_is_idle(ctx: &mut ActiveTaskContext) {
        let active = ActiveTasks::new(&ctx.db).active().unwrap();
        assert!(!active.is_active());
        assert_eq!(active.task_id(), 0);
        assert_eq!(active.started(), None);
        assert_eq!(ActiveTasks::new(&ctx.db).previous_task_id().unwrap(), 0);
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_start_stop_round_trip(ctx: &mut ActiveTaskContext) {
        let active_tasks = ActiveTasks::new(&ctx.db);

        let started = active_tasks.start_at(ctx.coding, ts("2024-01-01T09:00:00Z")).unwrap();
        assert_eq!(started.task_id(), ctx.coding);
        assert_eq!(started.started(), Some(ts("2024-01-01T09:00:00Z")));
        assert_eq!(active_tasks.active().unwrap(), started);

        let entry = active_tasks
            .stop_at(&StopOptions::new().note("first pass"), ts("2024-01-01T10:30:00Z"))
            .unwrap();
        assert_eq!(entry.task_id, ctx.coding);
        assert_eq!(entry.start, ts("2024-01-01T09:00:00Z"));
        assert_eq!(entry.end, ts("2024-01-01T10:30:00Z"));
        assert_eq!(entry.duration(), 5400);
        assert_eq!(entry.note.as_deref(), Some("first pass"));

        let active = active_tasks.active().unwrap();
        assert!(!active.is_active());
        assert_eq!(active.started(), None);

        let history = History::new(&ctx.db).list().unwrap();
        assert_eq!(history, vec![entry]);
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_stop_when_idle_fails(ctx: &mut ActiveTaskContext) {
        let active_tasks = ActiveTasks::new(&ctx.db);
        let err = active_tasks.stop(&StopOptions::new()).unwrap_err();
        assert!(matches!(err, HoursError::NotActive));

        active_tasks.start_at(ctx.coding, ts("2024-01-01T09:00:00Z")).unwrap();
        active_tasks.stop_at(&StopOptions::new(), ts("2024-01-01T09:10:00Z")).unwrap();
        let err = active_tasks.stop_at(&StopOptions::new(), ts("2024-01-01T09:20:00Z")).unwrap_err();
        assert!(matches!(err, HoursError::NotActive));
        assert_eq!(History::new(&ctx.db).list().unwrap().len(), 1);
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_start_while_active_is_rejected(ctx: &mut ActiveTaskContext) {
        let active_tasks = ActiveTasks::new(&ctx.db);
        let running = active_tasks.start_at(ctx.coding, ts("2024-01-01T09:00:00Z")).unwrap();

        let err = active_tasks.start_at(ctx.review, ts("2024-01-01T09:05:00Z")).unwrap_err();
        assert!(matches!(err, HoursError::AlreadyActive(id) if id == ctx.coding));
        assert_eq!(err.kind(), "AlreadyActive");

        // Neither the running session nor the previous task moved.
        assert_eq!(active_tasks.active().unwrap(), running);
        assert_eq!(active_tasks.previous_task_id().unwrap(), ctx.coding);
        assert!(History::new(&ctx.db).list().unwrap().is_empty());
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_start_unknown_task(ctx: &mut ActiveTaskContext) {
        let active_tasks = ActiveTasks::new(&ctx.db);
        let err = active_tasks.start(999).unwrap_err();
        assert!(matches!(err, HoursError::NotFound { id: 999, .. }));
        assert_eq!(err.kind(), "NotFound");
        assert!(!active_tasks.active().unwrap().is_active());
        assert_eq!(active_tasks.previous_task_id().unwrap(), 0);

        let err = active_tasks.start(0).unwrap_err();
        assert!(matches!(err, HoursError::NotFound { id: 0, .. }));
        assert_eq!(err.kind(), "NotFound");
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_back_dated_stop(ctx: &mut ActiveTaskContext) {
        let active_tasks = ActiveTasks::new(&ctx.db);
        active_tasks.start_at(ctx.coding, ts("2024-01-01T09:00:00Z")).unwrap();

        let options = StopOptions::new()
            .started(ts("2024-01-01T09:15:00Z"))
            .stopped(ts("2024-01-01T09:45:00Z"));
        let entry = active_tasks.stop_at(&options, ts("2024-01-01T12:00:00Z")).unwrap();
        assert_eq!(entry.start, ts("2024-01-01T09:15:00Z"));
        assert_eq!(entry.end, ts("2024-01-01T09:45:00Z"));
        assert_eq!(entry.duration(), 1800);
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_inverted_range_leaves_state_untouched(ctx: &mut ActiveTaskContext) {
        let active_tasks = ActiveTasks::new(&ctx.db);
        let running = active_tasks.start_at(ctx.coding, ts("2024-01-01T09:00:00Z")).unwrap();

        let options = StopOptions::new().stopped(ts("2024-01-01T08:00:00Z"));
        let err = active_tasks.stop_at(&options, ts("2024-01-01T10:00:00Z")).unwrap_err();
        assert!(matches!(err, HoursError::InvalidTimeRange { .. }));
        assert_eq!(err.kind(), "InvalidTimeRange");

        assert_eq!(active_tasks.active().unwrap(), running);
        assert!(History::new(&ctx.db).list().unwrap().is_empty());
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_stop_books_against_other_task(ctx: &mut ActiveTaskContext) {
        let active_tasks = ActiveTasks::new(&ctx.db);
        active_tasks.start_at(ctx.coding, ts("2024-01-01T09:00:00Z")).unwrap();

        let err = active_tasks
            .stop_at(&StopOptions::new().task(404), ts("2024-01-01T10:00:00Z"))
            .unwrap_err();
        assert!(matches!(err, HoursError::NotFound { id: 404, .. }));
        assert!(active_tasks.active().unwrap().is_active());

        let entry = active_tasks
            .stop_at(&StopOptions::new().task(ctx.review), ts("2024-01-01T10:00:00Z"))
            .unwrap();
        assert_eq!(entry.task_id, ctx.review);
        assert_eq!(entry.duration(), 3600);
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_blank_note_is_dropped(ctx: &mut ActiveTaskContext) {
        let active_tasks = ActiveTasks::new(&ctx.db);
        active_tasks.start_at(ctx.coding, ts("2024-01-01T09:00:00Z")).unwrap();
        let entry = active_tasks
            .stop_at(&StopOptions::new().note("   "), ts("2024-01-01T09:01:00Z"))
            .unwrap();
        assert_eq!(entry.note, None);
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_note_is_stored_as_given(ctx: &mut ActiveTaskContext) {
        let active_tasks = ActiveTasks::new(&ctx.db);
        active_tasks.start_at(ctx.coding, ts("2024-01-01T09:00:00Z")).unwrap();
        let entry = active_tasks
            .stop_at(&StopOptions::new().note("  x "), ts("2024-01-01T09:01:00Z"))
            .unwrap();
        assert_eq!(entry.note.as_deref(), Some("  x "));
        let stored = History::new(&ctx.db).get(entry.id).unwrap().unwrap();
        assert_eq!(stored.note.as_deref(), Some("  x "));
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_unstorable_years_are_rejected(ctx: &mut ActiveTaskContext) {
        let far = timestamp::start_of_day(NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap());
        let active_tasks = ActiveTasks::new(&ctx.db);

        let err = active_tasks.start_at(ctx.coding, far).unwrap_err();
        assert!(matches!(err, HoursError::InvalidTimestamp(_)));
        assert!(!active_tasks.active().unwrap().is_active());

        let running = active_tasks.start_at(ctx.coding, ts("2024-01-01T09:00:00Z")).unwrap();
        let err = active_tasks.stop_at(&StopOptions::new().stopped(far), ts("2024-01-01T10:00:00Z")).unwrap_err();
        assert!(matches!(err, HoursError::InvalidTimestamp(_)));
        assert_eq!(active_tasks.active().unwrap(), running);
        assert!(History::new(&ctx.db).list().unwrap().is_empty());
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_resume_previous_task(ctx: &mut ActiveTaskContext) {
        let active_tasks = ActiveTasks::new(&ctx.db);
        let err = active_tasks.resume().unwrap_err();
        assert!(matches!(err, HoursError::NotFound { id: 0, .. }));

        active_tasks.start_at(ctx.review, ts("2024-01-01T09:00:00Z")).unwrap();
        active_tasks.stop_at(&StopOptions::new(), ts("2024-01-01T09:30:00Z")).unwrap();
        assert_eq!(active_tasks.previous_task_id().unwrap(), ctx.review);

        let resumed = active_tasks.resume_at(ts("2024-01-01T10:00:00Z")).unwrap();
        assert_eq!(resumed.task_id(), ctx.review);
        assert_eq!(resumed.started(), Some(ts("2024-01-01T10:00:00Z")));
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_state_survives_reopen(ctx: &mut ActiveTaskContext) {
        ActiveTasks::new(&ctx.db).start_at(ctx.coding, ts("2024-01-01T09:00:00Z")).unwrap();

        let reopened = Db::open(ctx.temp_dir.path().join("hours.db")).unwrap();
        let active = ActiveTasks::new(&reopened).active().unwrap();
        assert_eq!(active.task_id(), ctx.coding);
        assert_eq!(active.started(), Some(ts("2024-01-01T09:00:00Z")));
    }

    #[test_context(ActiveTaskContext)]
    #[test]
    fn test_concurrent_starts_admit_one(ctx: &mut ActiveTaskContext) {
        let path = ctx.temp_dir.path().join("hours.db");
        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = [ctx.coding, ctx.review]
            .into_iter()
            .map(|task_id| {
                let db = Db::open(&path).unwrap();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    ActiveTasks::new(&db).start(task_id)
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        let loser = results.iter().find_map(|r| r.as_ref().err()).unwrap();
        assert!(matches!(loser, HoursError::AlreadyActive(id) if *id == winners[0].task_id()));

        let active = ActiveTasks::new(&ctx.db).active().unwrap();
        assert_eq!(&active, winners[0]);
        assert_eq!(ActiveTasks::new(&ctx.db).previous_task_id().unwrap(), active.task_id());
    }
}
