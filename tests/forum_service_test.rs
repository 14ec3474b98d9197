use anyhow::Result;
use chrono::{TimeZone, Utc};
use qa_forum::domain::model::{NewAnswer, NewComment, NewQuestion, Parent, ProfileEdit, VoteType};
use qa_forum::domain::ports::{ForumRepository, QuestionSource, TagSource};
use qa_forum::{ForumError, ForumService, JsonFileStore, MemoryStore, QueryEngine};
use std::sync::Arc;
use tempfile::TempDir;

fn new_question(title: &str, tags: &[&str]) -> NewQuestion {
    NewQuestion {
        title: title.to_string(),
        text: format!("body of {}", title),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        asked_by: "ferris".to_string(),
        ask_date_time: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
    }
}

fn new_answer(text: &str, day: u32) -> NewAnswer {
    NewAnswer {
        text: text.to_string(),
        ans_by: "helper".to_string(),
        ans_date_time: Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_add_question_reuses_and_creates_tags() -> Result<()> {
    let store = MemoryStore::new();
    let service = ForumService::new(store.clone());

    let first = service.add_question(new_question("first", &["rust", "tokio"])).await?;
    let second = service.add_question(new_question("second", &["rust", "serde"])).await?;

    let tags = store.fetch_tags().await?;
    assert_eq!(tags.len(), 3);
    assert_eq!(first.tags[0].id, second.tags[0].id);
    assert_ne!(first.id, second.id);
    assert_eq!(first.views, 0);
    assert_eq!(first.vote_count, 0);
    assert!(first.answers.is_empty());
    assert_eq!(first.asked_by.as_deref(), Some("ferris"));
    Ok(())
}

#[tokio::test]
async fn test_add_question_rejects_invalid_body() {
    let service = ForumService::new(MemoryStore::new());

    let mut blank_title = new_question("x", &["rust"]);
    blank_title.title = "   ".to_string();
    assert!(matches!(
        service.add_question(blank_title).await,
        Err(ForumError::ValidationError { .. })
    ));

    let no_tags = new_question("x", &[]);
    assert!(matches!(
        service.add_question(no_tags).await,
        Err(ForumError::ValidationError { .. })
    ));

    let mut no_author = new_question("x", &["rust"]);
    no_author.asked_by = String::new();
    assert!(service.add_question(no_author).await.is_err());

    assert!(service.repository().fetch_questions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_view_increments_once_per_call() -> Result<()> {
    let service = ForumService::new(MemoryStore::new());
    let q = service.add_question(new_question("viewed", &["rust"])).await?;

    assert_eq!(service.question_by_id_with_view(&q.id).await?.views, 1);
    assert_eq!(service.question_by_id_with_view(&q.id).await?.views, 2);

    assert!(matches!(
        service.question_by_id_with_view("missing").await,
        Err(ForumError::NotFoundError { .. })
    ));
    assert!(matches!(
        service.question_by_id_with_view("").await,
        Err(ForumError::ValidationError { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_answers_feed_active_ordering() -> Result<()> {
    let store = MemoryStore::new();
    let service = ForumService::new(store.clone());

    let older = service.add_question(new_question("older", &["rust"])).await?;
    let mut newer_input = new_question("newer", &["rust"]);
    newer_input.ask_date_time = Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap();
    let newer = service.add_question(newer_input).await?;

    service.add_answer(&older.id, new_answer("late answer", 20)).await?;

    let engine = QueryEngine::new(store);
    let active = engine
        .questions(&qa_forum::QueryParams::sanitize(Some("active"), None))
        .await?;
    assert_eq!(active[0].id, older.id);
    assert_eq!(active[1].id, newer.id);

    let unanswered = engine
        .questions(&qa_forum::QueryParams::sanitize(Some("unanswered"), None))
        .await?;
    assert_eq!(unanswered.len(), 1);
    assert_eq!(unanswered[0].id, newer.id);

    assert!(matches!(
        service.add_answer("missing", new_answer("x", 3)).await,
        Err(ForumError::NotFoundError { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_comments_on_question_and_answer() -> Result<()> {
    let service = ForumService::new(MemoryStore::new());
    let q = service.add_question(new_question("commented", &["rust"])).await?;
    let a = service.add_answer(&q.id, new_answer("an answer", 5)).await?;

    let comment = |text: &str| NewComment {
        text: text.to_string(),
        commented_by: "reviewer".to_string(),
        post_date_time: Utc::now(),
    };

    service
        .add_comment(&Parent::Question(q.id.clone()), comment("on question"))
        .await?;
    service
        .add_comment(&Parent::Answer(a.id.clone()), comment("on answer"))
        .await?;

    let stored = service.repository().find_question(&q.id).await?.unwrap();
    assert_eq!(stored.comments.len(), 1);
    assert_eq!(stored.comments[0].text, "on question");
    assert_eq!(stored.answers[0].comments.len(), 1);
    assert_eq!(stored.answers[0].comments[0].text, "on answer");

    assert!(matches!(
        service
            .add_comment(&Parent::Answer("missing".to_string()), comment("x"))
            .await,
        Err(ForumError::NotFoundError { .. })
    ));
    assert!(service
        .add_comment(&Parent::Question(q.id.clone()), comment(" "))
        .await
        .is_err());
    Ok(())
}

#[tokio::test]
async fn test_votes_are_deduplicated_per_user() -> Result<()> {
    let service = ForumService::new(MemoryStore::new());
    let q = service.add_question(new_question("voted", &["rust"])).await?;
    let parent = Parent::Question(q.id.clone());

    assert_eq!(service.vote(&parent, "u1", VoteType::Up).await?, 1);
    assert_eq!(service.vote(&parent, "u2", VoteType::Up).await?, 2);
    assert_eq!(service.vote(&parent, "u3", VoteType::Down).await?, 1);

    let duplicate = service.vote(&parent, "u1", VoteType::Down).await;
    assert!(matches!(duplicate, Err(ForumError::DuplicateVoteError { .. })));

    let stored = service.repository().find_question(&q.id).await?.unwrap();
    assert_eq!(stored.vote_count, 1);
    assert_eq!(stored.upvotes_by, vec!["u1", "u2"]);
    assert_eq!(stored.downvotes_by, vec!["u3"]);
    Ok(())
}

#[tokio::test]
async fn test_answer_vote_changes_only_that_answer() -> Result<()> {
    let service = ForumService::new(MemoryStore::new());
    let q = service.add_question(new_question("two answers", &["rust"])).await?;
    let first = service.add_answer(&q.id, new_answer("first", 2)).await?;
    let second = service.add_answer(&q.id, new_answer("second", 3)).await?;

    let count = service
        .vote(&Parent::Answer(second.id.clone()), "u1", VoteType::Down)
        .await?;
    assert_eq!(count, -1);

    let stored = service.repository().find_question(&q.id).await?.unwrap();
    assert_eq!(stored.vote_count, 0);
    let by_id = |id: &str| stored.answers.iter().find(|a| a.id == id).unwrap();
    assert_eq!(by_id(&first.id).vote_count, 0);
    assert_eq!(by_id(&second.id).vote_count, -1);
    assert_eq!(by_id(&second.id).downvotes_by, vec!["u1"]);

    // a question vote by the same user is a separate parent
    service
        .vote(&Parent::Question(q.id.clone()), "u1", VoteType::Up)
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_service_over_json_file_store_persists() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("forum.json");

    let service = ForumService::new(JsonFileStore::new(&path));
    let q = service.add_question(new_question("persisted", &["rust"])).await?;
    service.add_answer(&q.id, new_answer("kept", 4)).await?;
    service
        .vote(&Parent::Question(q.id.clone()), "u9", VoteType::Up)
        .await?;

    let reopened = JsonFileStore::new(&path);
    let stored = reopened.find_question(&q.id).await?.unwrap();
    assert_eq!(stored.answers.len(), 1);
    assert_eq!(stored.vote_count, 1);
    assert_eq!(reopened.fetch_tags().await?.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_votes_and_views_are_all_counted() -> Result<()> {
    let service = Arc::new(ForumService::new(MemoryStore::new()));
    let q = service.add_question(new_question("busy", &["rust"])).await?;
    let parent = Parent::Question(q.id.clone());

    let mut handles = Vec::new();
    for i in 0..200 {
        let service = Arc::clone(&service);
        let parent = parent.clone();
        let qid = q.id.clone();
        handles.push(tokio::spawn(async move {
            service.vote(&parent, &format!("u{}", i), VoteType::Up).await?;
            service.question_by_id_with_view(&qid).await?;
            service.add_answer(&qid, new_answer("me too", 9)).await?;
            Ok::<_, ForumError>(())
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let stored = service.repository().find_question(&q.id).await?.unwrap();
    assert_eq!(stored.vote_count, 200);
    assert_eq!(stored.upvotes_by.len(), 200);
    assert_eq!(stored.views, 200);
    assert_eq!(stored.answers.len(), 200);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_votes_count_once() -> Result<()> {
    let service = Arc::new(ForumService::new(MemoryStore::new()));
    let q = service.add_question(new_question("contested", &["rust"])).await?;
    let parent = Parent::Question(q.id.clone());

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let service = Arc::clone(&service);
            let parent = parent.clone();
            tokio::spawn(async move { service.vote(&parent, "same-user", VoteType::Up).await })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => accepted += 1,
            Err(ForumError::DuplicateVoteError { .. }) => {}
            Err(other) => return Err(other.into()),
        }
    }

    assert_eq!(accepted, 1);
    let stored = service.repository().find_question(&q.id).await?.unwrap();
    assert_eq!(stored.vote_count, 1);
    Ok(())
}

#[tokio::test]
async fn test_voter_ids_are_trimmed() -> Result<()> {
    let service = ForumService::new(MemoryStore::new());
    let q = service.add_question(new_question("trimmed", &["rust"])).await?;
    let parent = Parent::Question(q.id.clone());

    service.vote(&parent, " u1 ", VoteType::Up).await?;
    let again = service.vote(&parent, "u1", VoteType::Down).await;
    assert!(matches!(again, Err(ForumError::DuplicateVoteError { .. })));

    let stored = service.repository().find_question(&q.id).await?.unwrap();
    assert_eq!(stored.upvotes_by, vec!["u1"]);
    Ok(())
}

#[tokio::test]
async fn test_failed_vote_leaves_question_unchanged() -> Result<()> {
    let service = ForumService::new(MemoryStore::new());
    let q = service.add_question(new_question("unchanged", &["rust"])).await?;
    service.add_answer(&q.id, new_answer("only", 2)).await?;

    assert!(matches!(
        service
            .vote(&Parent::Answer("missing".to_string()), "u1", VoteType::Up)
            .await,
        Err(ForumError::NotFoundError { .. })
    ));
    assert!(matches!(
        service
            .vote(&Parent::Question("missing".to_string()), "u1", VoteType::Up)
            .await,
        Err(ForumError::NotFoundError { .. })
    ));

    let stored = service.repository().find_question(&q.id).await?.unwrap();
    assert_eq!(stored.vote_count, 0);
    assert!(stored.upvotes_by.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_profile_saved_questions_resolve_in_order() -> Result<()> {
    let service = ForumService::new(MemoryStore::new());
    let first = service.add_question(new_question("first", &["rust"])).await?;
    let second = service.add_question(new_question("second", &["rust"])).await?;

    service.create_profile("ferris").await?;
    service.save_question("ferris", &second.id).await?;
    service.save_question("ferris", &first.id).await?;
    let saved = service.save_question("ferris", &second.id).await?;
    assert_eq!(saved.saved_questions, vec![second.id.clone(), first.id.clone()]);

    let view = service.profile("ferris").await?;
    let titles: Vec<&str> = view.saved_questions.iter().map(|q| q.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "first"]);
    assert_eq!(view.bio, "");

    let after = service.unsave_question("ferris", &second.id).await?;
    assert_eq!(after.saved_questions, vec![first.id.clone()]);

    assert!(matches!(
        service.save_question("ferris", "missing").await,
        Err(ForumError::NotFoundError { .. })
    ));
    assert!(matches!(
        service.profile("nobody").await,
        Err(ForumError::NotFoundError { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_edit_profile_checks_username() -> Result<()> {
    let service = ForumService::new(MemoryStore::new());
    service.create_profile("ferris").await?;
    service.create_profile("corro").await?;

    assert!(matches!(
        service.create_profile("ferris").await,
        Err(ForumError::UsernameTakenError { .. })
    ));
    assert!(matches!(
        service.create_profile("no").await,
        Err(ForumError::ValidationError { .. })
    ));

    let taken = service
        .edit_profile(
            "corro",
            ProfileEdit {
                new_username: "ferris".to_string(),
                bio: Some("crab".to_string()),
            },
        )
        .await;
    assert!(matches!(taken, Err(ForumError::UsernameTakenError { .. })));
    assert_eq!(service.profile("corro").await?.bio, "");

    let edited = service
        .edit_profile(
            "corro",
            ProfileEdit {
                new_username: "corro_the_crab".to_string(),
                bio: Some("  Unsafe $crab.  ".to_string()),
            },
        )
        .await?;
    assert_eq!(edited.username, "corro_the_crab");
    assert_eq!(edited.bio, "Unsafe crab");
    assert!(service.profile("corro").await.is_err());

    // keeping the same username only replaces the bio
    let kept = service
        .edit_profile(
            "ferris",
            ProfileEdit {
                new_username: "ferris".to_string(),
                bio: None,
            },
        )
        .await?;
    assert_eq!(kept.username, "ferris");
    Ok(())
}

#[tokio::test]
async fn test_profiles_persist_in_json_file_store() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("forum.json");

    let service = ForumService::new(JsonFileStore::new(&path));
    let q = service.add_question(new_question("kept", &["rust"])).await?;
    service.create_profile("ferris").await?;
    service.save_question("ferris", &q.id).await?;

    let reopened = ForumService::new(JsonFileStore::new(&path));
    let view = reopened.profile("ferris").await?;
    assert_eq!(view.saved_questions.len(), 1);
    assert_eq!(view.saved_questions[0].id, q.id);
    Ok(())
}
