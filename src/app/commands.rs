use crate::adapters::ForumStore;
use crate::app::render::{render_json, render_tag_counts_csv};
use crate::config::{Command, OutputFormat, ProfileAction};
use crate::core::{ForumService, QueryEngine};
use crate::domain::model::{NewAnswer, NewComment, NewQuestion, Parent, ProfileEdit, VoteType};
use crate::utils::error::Result;
use crate::utils::sanitize::QueryParams;
use chrono::Utc;

/// Runs one CLI command against the store and returns what to print.
///
/// `default_order` applies when `questions` is given no `--order`.
pub async fn run(command: Command, store: ForumStore, default_order: Option<&str>) -> Result<String> {
    match command {
        Command::Questions { order, search } => {
            let params =
                QueryParams::sanitize(order.as_deref().or(default_order), search.as_deref());
            let questions = QueryEngine::new(store).questions(&params).await?;
            render_json(&questions)
        }
        Command::Tags { format } => {
            let counts = QueryEngine::new(store).tag_counts().await?;
            match format {
                OutputFormat::Json => render_json(&counts),
                OutputFormat::Csv => render_tag_counts_csv(&counts),
            }
        }
        Command::Show { qid } => {
            let question = ForumService::new(store).question_by_id_with_view(&qid).await?;
            render_json(&question)
        }
        Command::Ask {
            title,
            text,
            tags,
            asked_by,
        } => {
            let question = ForumService::new(store)
                .add_question(NewQuestion {
                    title,
                    text,
                    tags,
                    asked_by,
                    ask_date_time: Utc::now(),
                })
                .await?;
            render_json(&question)
        }
        Command::Answer { qid, text, ans_by } => {
            let answer = ForumService::new(store)
                .add_answer(
                    &qid,
                    NewAnswer {
                        text,
                        ans_by,
                        ans_date_time: Utc::now(),
                    },
                )
                .await?;
            render_json(&answer)
        }
        Command::Comment {
            parent_type,
            parent_id,
            text,
            commented_by,
        } => {
            let parent = Parent::parse(&parent_type, &parent_id)?;
            let comment = ForumService::new(store)
                .add_comment(
                    &parent,
                    NewComment {
                        text,
                        commented_by,
                        post_date_time: Utc::now(),
                    },
                )
                .await?;
            render_json(&comment)
        }
        Command::Vote {
            parent_type,
            parent_id,
            vote_type,
            user_id,
        } => {
            let parent = Parent::parse(&parent_type, &parent_id)?;
            let vote: VoteType = vote_type.parse()?;
            let vote_count = ForumService::new(store).vote(&parent, &user_id, vote).await?;
            render_json(&serde_json::json!({
                "parent_type": parent.kind(),
                "parent_id": parent.id(),
                "vote_count": vote_count,
            }))
        }
        Command::Profile { action } => run_profile(action, ForumService::new(store)).await,
    }
}

async fn run_profile(action: ProfileAction, service: ForumService<ForumStore>) -> Result<String> {
    match action {
        ProfileAction::Show { username } => render_json(&service.profile(&username).await?),
        ProfileAction::Create { username } => {
            render_json(&service.create_profile(&username).await?)
        }
        ProfileAction::Edit {
            username,
            new_username,
            bio,
        } => {
            let edit = ProfileEdit { new_username, bio };
            render_json(&service.edit_profile(&username, edit).await?)
        }
        ProfileAction::Save { username, qid } => {
            render_json(&service.save_question(&username, &qid).await?)
        }
        ProfileAction::Unsave { username, qid } => {
            render_json(&service.unsave_question(&username, &qid).await?)
        }
    }
}
