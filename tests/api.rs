#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hours::api::{ApiError, Request, Response, Service};
    use hours::db::db::Db;
    use hours::db::groups::Group;
    use hours::db::tasks::Task;
    use hours::libs::active_task::StopOptions;
    use hours::libs::error::HoursError;
    use hours::libs::report::ReportOptions;
    use hours::libs::timestamp;
    use serde_json::json;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct ApiTestContext {
        _temp_dir: TempDir,
        service: Service,
    }

    impl AsyncTestContext for ApiTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("hours.db")).unwrap();
            ApiTestContext {
                _temp_dir: temp_dir,
                service: Service::new(db),
            }
        }
    }

    async fn insert_task(service: &Service, name: &str) -> u64 {
        match service.handle(Request::InsertTask { task: Task::new(name, None) }).await.unwrap() {
            Response::Task(task) => task.id.unwrap(),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_request_wire_format() {
        let request: Request = serde_json::from_value(json!({"type": "start.task", "taskId": 3})).unwrap();
        assert_eq!(request, Request::StartTask { task_id: 3 });

        let request: Request = serde_json::from_value(json!({"type": "stop.task"})).unwrap();
        assert_eq!(request, Request::StopTask { options: StopOptions::default() });

        let request: Request = serde_json::from_value(json!({
            "type": "stop.task",
            "options": {"taskId": 2, "stopped": "2024-01-01T10:00:00Z", "note": "done"}
        }))
        .unwrap();
        let expected = StopOptions::new()
            .task(2)
            .stopped(timestamp::parse("2024-01-01T10:00:00Z").unwrap())
            .note("done");
        assert_eq!(request, Request::StopTask { options: expected });

        let request: Request = serde_json::from_value(json!({
            "type": "create.report",
            "options": {"start": "2024-01-01", "end": "2024-01-07", "groups": [1]}
        }))
        .unwrap();
        let expected = ReportOptions::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        )
        .groups([1]);
        assert_eq!(request, Request::CreateReport { options: expected });

        assert!(serde_json::from_value::<Request>(json!({"type": "start.task"})).is_err());
        assert!(serde_json::from_value::<Request>(json!({"type": "launch.rocket"})).is_err());
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_start_stop_through_service(ctx: &mut ApiTestContext) {
        let service = &ctx.service;
        let task_id = insert_task(service, "coding").await;

        let active = service.start_task(task_id).await.unwrap();
        assert_eq!(active.task_id(), task_id);

        let response = service.handle(Request::ActiveTask).await.unwrap();
        assert_eq!(response, Response::ActiveTask(active));

        let response = service.handle(Request::StopTask { options: StopOptions::new() }).await.unwrap();
        assert_eq!(response, Response::Done);
        assert!(!service.get_active_task().await.unwrap().is_active());

        let err = service.stop_task(StopOptions::new()).await.unwrap_err();
        let api_error = ApiError::from(&err);
        assert_eq!(api_error.kind, "NotActive");
        assert_eq!(api_error.message, "no task is active");
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_concurrent_service_starts(ctx: &mut ApiTestContext) {
        let first = insert_task(&ctx.service, "first").await;
        let second = insert_task(&ctx.service, "second").await;

        let (a, b) = tokio::join!(ctx.service.start_task(first), ctx.service.start_task(second));
        let (winner, loser) = match (a, b) {
            (Ok(active), Err(err)) | (Err(err), Ok(active)) => (active, err),
            other => panic!("expected exactly one start to succeed, got {:?}", other),
        };
        assert!(matches!(loser, HoursError::AlreadyActive(id) if id == winner.task_id()));
        assert_eq!(ctx.service.get_active_task().await.unwrap(), winner);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_registry_requests(ctx: &mut ApiTestContext) {
        let service = &ctx.service;
        let group = match service.handle(Request::InsertGroup { group: Group::new("work", None) }).await.unwrap() {
            Response::Group(group) => group,
            other => panic!("unexpected response {:?}", other),
        };
        let group_id = group.id.unwrap();

        let task = Task::new("review", Some("red")).with_groups([group_id]);
        let response = service.handle(Request::InsertTask { task }).await.unwrap();
        let Response::Task(task) = response else {
            panic!("expected a task");
        };

        let response = service.handle(Request::ReadTasks).await.unwrap();
        assert_eq!(response, Response::Tasks(vec![task.clone()]));

        let response = service.handle(Request::DeleteGroup { group_id }).await.unwrap();
        assert_eq!(response, Response::Done);
        let response = service.handle(Request::ReadGroups).await.unwrap();
        assert_eq!(response, Response::Groups(Vec::new()));

        let err = service.handle(Request::DeleteTask { task_id: 999 }).await.unwrap_err();
        assert_eq!(err.kind(), "NotFound");

        let response = service.handle(Request::DeleteTask { task_id: task.id.unwrap() }).await.unwrap();
        assert_eq!(response, Response::Done);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_report_response_shape(ctx: &mut ApiTestContext) {
        let today = timestamp::now().date_naive();
        let options = ReportOptions::new(today, today);
        let response = ctx.service.handle(Request::CreateReport { options }).await.unwrap();

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "report");
        assert_eq!(value["data"]["total"], 0);
        assert_eq!(value["data"]["days"].as_array().unwrap().len(), 1);
    }
}
