
use database_test_utils::{new_task, TestDatabase};
use std::collections::HashSet;
use std::time::Duration;
use zendo_core::models::{NewTask, TaskChanges};
use zendo_core::traits::TaskRepository;
use zendo_core::ZendoError;

#[tokio::test]
async fn test_create_assigns_unique_ids_and_timestamps() {
    let db = TestDatabase::migrated().await;
    let repo = db.repository();

    let mut ids = HashSet::new();
    for i in 0..5 {
        let task = repo
            .create(&new_task(&format!("Task {i}"), "monday", "2024-01-07"))
            .await
            .unwrap();
        assert!(!task.completed);
        assert_eq!(task.created_at, task.updated_at);
        assert!(ids.insert(task.id));
    }
    assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn test_create_returns_stored_fields() {
    let db = TestDatabase::migrated().await;
    let repo = db.repository();

    let task = repo
        .create(&NewTask {
            title: "Buy milk".to_string(),
            day_of_week: "monday".to_string(),
            week_date: "2024-01-07".to_string(),
            tags: "errand, home".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.day_of_week, "monday");
    assert_eq!(task.week_date, "2024-01-07");
    assert_eq!(task.tags, "errand, home");
}

#[tokio::test]
async fn test_create_rejects_missing_fields() {
    let db = TestDatabase::migrated().await;
    let repo = db.repository();

    let result = repo.create(&new_task("", "monday", "2024-01-07")).await;
    assert!(matches!(result, Err(ZendoError::Validation(_))));

    let result = repo.create(&new_task("Buy milk", "monday", "")).await;
    assert!(matches!(result, Err(ZendoError::Validation(_))));

    assert_eq!(db.count_tasks().await, 0);
}

#[tokio::test]
async fn test_list_all_orders_by_day_then_creation() {
    let db = TestDatabase::migrated().await;
    let repo = db.repository();

    repo.create(&new_task("Tue first", "tuesday", "2024-01-07")).await.unwrap();
    repo.create(&new_task("Mon first", "monday", "2024-01-07")).await.unwrap();
    repo.create(&new_task("Tue second", "tuesday", "2024-01-14")).await.unwrap();
    repo.create(&new_task("Mon second", "monday", "2024-01-07")).await.unwrap();

    let titles: Vec<String> = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();

    // 星期名称按字母序，同一天内按创建顺序
    assert_eq!(
        titles,
        vec!["Mon first", "Mon second", "Tue first", "Tue second"]
    );
}

#[tokio::test]
async fn test_list_all_empty() {
    let db = TestDatabase::migrated().await;
    assert!(db.repository().list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_by_week_is_exact_match() {
    let db = TestDatabase::migrated().await;
    let repo = db.repository();

    repo.create(&new_task("In week", "friday", "2024-01-07")).await.unwrap();
    repo.create(&new_task("Prefix lookalike", "friday", "2024-01-070")).await.unwrap();
    repo.create(&new_task("Other week", "friday", "2024-01-14")).await.unwrap();

    let tasks = repo.list_by_week("2024-01-07").await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "In week");

    assert!(repo.list_by_week("2024-01").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_by_week_and_day() {
    let db = TestDatabase::migrated().await;
    let repo = db.repository();

    repo.create(&new_task("A", "wednesday", "2024-01-07")).await.unwrap();
    repo.create(&new_task("B", "thursday", "2024-01-07")).await.unwrap();
    repo.create(&new_task("C", "wednesday", "2024-01-07")).await.unwrap();
    repo.create(&new_task("D", "wednesday", "2024-01-14")).await.unwrap();

    let titles: Vec<String> = repo
        .list_by_week_and_day("2024-01-07", "wednesday")
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[tokio::test]
async fn test_update_overwrites_all_fields() {
    let db = TestDatabase::migrated().await;
    let repo = db.repository();

    let created = repo
        .create(&NewTask {
            title: "Buy milk".to_string(),
            day_of_week: "monday".to_string(),
            week_date: "2024-01-07".to_string(),
            tags: "errand".to_string(),
        })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;

    let updated = repo
        .update(
            created.id,
            &TaskChanges {
                title: "Buy oat milk".to_string(),
                completed: true,
                day_of_week: "tuesday".to_string(),
                week_date: "2024-01-14".to_string(),
                tags: String::new(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Buy oat milk");
    assert!(updated.completed);
    assert_eq!(updated.day_of_week, "tuesday");
    assert_eq!(updated.week_date, "2024-01-14");
    assert_eq!(updated.tags, "");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn test_update_missing_task_does_not_insert() {
    let db = TestDatabase::migrated().await;
    let repo = db.repository();

    let result = repo
        .update(
            99999,
            &TaskChanges {
                title: "Ghost".to_string(),
                day_of_week: "monday".to_string(),
                week_date: "2024-01-07".to_string(),
                ..TaskChanges::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ZendoError::TaskNotFound { id: 99999 })));
    assert_eq!(db.count_tasks().await, 0);
}

#[tokio::test]
async fn test_delete_twice() {
    let db = TestDatabase::migrated().await;
    let repo = db.repository();

    let task = repo.create(&new_task("Once", "sunday", "2024-01-07")).await.unwrap();

    repo.delete(task.id).await.unwrap();
    let second = repo.delete(task.id).await;
    assert!(matches!(second, Err(ZendoError::TaskNotFound { .. })));
    assert_eq!(db.count_tasks().await, 0);
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let db = TestDatabase::migrated().await;
    db.repository()
        .create(&new_task("Persisted", "saturday", "2024-01-07"))
        .await
        .unwrap();
    db.pool.close().await;

    let pool = zendo_infrastructure::create_sqlite_pool(&db.config).await.unwrap();
    let repo = zendo_infrastructure::SqliteTaskRepository::new(pool);
    let tasks = repo.list_by_week("2024-01-07").await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Persisted");
}

#[tokio::test]
async fn test_storage_failure_surfaces_database_error() {
    let db = TestDatabase::empty().await;

    // 没有建表
    let result = db.repository().list_all().await;
    match result {
        Err(ZendoError::Database(e)) => assert!(e.to_string().contains("no such table")),
        other => panic!("Expected database error, got {:?}", other),
    }
}
