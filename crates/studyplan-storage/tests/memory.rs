use studyplan_core::models::goal::{GoalUpdate, NewGoal};
use studyplan_core::models::learning::NewLearning;
use studyplan_storage::error::StorageError;
use studyplan_storage::{MemStorage, Storage};

fn new_goal(title: &str) -> NewGoal {
    NewGoal {
        title: title.to_string(),
        description: "desc".to_string(),
        target_date: "2026-12-01T00:00:00Z".parse().unwrap(),
        completed: false,
        specific: None,
        measurable: None,
        achievable: None,
        relevant: None,
    }
}

#[tokio::test]
async fn ids_are_shared_across_record_kinds() {
    let storage = MemStorage::new();
    let goal = storage.create_goal(1, new_goal("a")).await.unwrap();
    let learning = storage
        .create_learning(1, NewLearning { content: "x".to_string() })
        .await
        .unwrap();
    let schedule = storage.create_schedule(1, "{}".to_string()).await.unwrap();

    assert_eq!(goal.id, 1);
    assert_eq!(learning.id, 2);
    assert_eq!(schedule.id, 3);
}

#[tokio::test]
async fn goals_are_scoped_to_user() {
    let storage = MemStorage::new();
    storage.create_goal(1, new_goal("mine")).await.unwrap();
    storage.create_goal(2, new_goal("theirs")).await.unwrap();

    let goals = storage.get_goals(1).await.unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].title, "mine");
    assert_eq!(goals[0].user_id, 1);
}

#[tokio::test]
async fn update_goal_toggles_completion() {
    let storage = MemStorage::new();
    let goal = storage.create_goal(1, new_goal("a")).await.unwrap();

    let updated = storage
        .update_goal(
            goal.id,
            1,
            GoalUpdate {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.completed);
    assert!(storage.get_goals(1).await.unwrap()[0].completed);
}

#[tokio::test]
async fn update_goal_of_other_user_is_not_found() {
    let storage = MemStorage::new();
    let goal = storage.create_goal(1, new_goal("a")).await.unwrap();

    let err = storage
        .update_goal(goal.id, 2, GoalUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { kind: "goal", id } if id == goal.id));

    let err = storage.update_goal(99, 1, GoalUpdate::default()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn learnings_newest_first() {
    let storage = MemStorage::new();
    for content in ["first", "second", "third"] {
        storage
            .create_learning(5, NewLearning { content: content.to_string() })
            .await
            .unwrap();
    }

    let learnings = storage.get_learnings(5).await.unwrap();
    let contents: Vec<&str> = learnings.iter().map(|l| l.content.as_str()).collect();
    assert_eq!(contents, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn schedules_are_stored_verbatim() {
    let storage = MemStorage::new();
    let raw = r#"{"message":"Failed to generate schedule","schedule":{}}"#;
    storage.create_schedule(3, raw.to_string()).await.unwrap();
    storage.create_schedule(4, "{}".to_string()).await.unwrap();

    let schedules = storage.get_schedules(3).await.unwrap();
    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].schedule, raw);
}

#[tokio::test]
async fn schedules_newest_first() {
    let storage = MemStorage::new();
    for raw in [r#"{"08:00":"a"}"#, r#"{"08:00":"b"}"#, r#"{"08:00":"c"}"#] {
        storage.create_schedule(6, raw.to_string()).await.unwrap();
    }

    let schedules = storage.get_schedules(6).await.unwrap();
    let stored: Vec<&str> = schedules.iter().map(|s| s.schedule.as_str()).collect();
    assert_eq!(stored, vec![r#"{"08:00":"c"}"#, r#"{"08:00":"b"}"#, r#"{"08:00":"a"}"#]);
}
