use crate::domain::model::{
    Answer, Comment, NewAnswer, NewComment, NewQuestion, Parent, Profile, ProfileEdit,
    ProfileView, Question, Tag, VoteType,
};
use crate::domain::ports::ForumRepository;
use crate::utils::error::{ForumError, Result};
use crate::utils::sanitize::sanitize_profile_input;
use crate::utils::validation::{require_text, validate_username};
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn not_found(entity: &str, id: &str) -> ForumError {
    ForumError::NotFoundError {
        entity: entity.to_string(),
        id: id.to_string(),
    }
}

fn parent_not_found(parent: &Parent) -> ForumError {
    match parent {
        Parent::Question(qid) => not_found("Question", qid),
        Parent::Answer(aid) => not_found("Answer", aid),
    }
}

/// Records `user_id` as a voter and adjusts the count, once per user.
fn apply_vote(
    vote_count: &mut i64,
    upvotes_by: &mut Vec<String>,
    downvotes_by: &mut Vec<String>,
    user_id: &str,
    vote: VoteType,
    parent: &str,
) -> Result<()> {
    if upvotes_by.iter().any(|u| u == user_id) || downvotes_by.iter().any(|u| u == user_id) {
        return Err(ForumError::DuplicateVoteError {
            parent: parent.to_string(),
        });
    }

    *vote_count += vote.delta();
    match vote {
        VoteType::Up => upvotes_by.push(user_id.to_string()),
        VoteType::Down => downvotes_by.push(user_id.to_string()),
    }
    Ok(())
}

/// Write-side operations: asking, answering, commenting, voting, viewing
/// and profiles.
///
/// Every change to an existing document goes through the repository's
/// `update_*` methods, so a service can be shared across tasks.
pub struct ForumService<R> {
    repo: R,
}

impl<R: ForumRepository> ForumService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Looks up each tag by name, creating the ones that don't exist yet.
    pub async fn resolve_tags(&self, names: &[String]) -> Result<Vec<Tag>> {
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            let tag = match self.repo.find_tag_by_name(name).await? {
                Some(existing) => existing,
                None => {
                    tracing::debug!("Creating tag '{}'", name);
                    self.repo
                        .save_tag(Tag {
                            id: Some(new_id()),
                            name: name.clone(),
                        })
                        .await?
                }
            };
            resolved.push(tag);
        }
        Ok(resolved)
    }

    pub async fn add_question(&self, input: NewQuestion) -> Result<Question> {
        require_text("title", &input.title)?;
        require_text("text", &input.text)?;
        require_text("asked_by", &input.asked_by)?;
        if input.tags.is_empty() {
            return Err(ForumError::ValidationError {
                message: "A question needs at least one tag".to_string(),
            });
        }
        for name in &input.tags {
            require_text("tag", name)?;
        }

        let tags = self.resolve_tags(&input.tags).await?;
        let question = Question {
            id: new_id(),
            title: input.title,
            text: input.text,
            tags,
            answers: vec![],
            asked_by: Some(input.asked_by),
            ask_date_time: input.ask_date_time,
            views: 0,
            comments: vec![],
            vote_count: 0,
            upvotes_by: vec![],
            downvotes_by: vec![],
        };

        let saved = self.repo.save_question(question).await?;
        tracing::info!("Saved question {} ('{}')", saved.id, saved.title);
        Ok(saved)
    }

    /// Returns the question with its view count already incremented.
    pub async fn question_by_id_with_view(&self, qid: &str) -> Result<Question> {
        if qid.trim().is_empty() {
            return Err(ForumError::ValidationError {
                message: "Question id cannot be empty".to_string(),
            });
        }

        self.repo
            .update_question(&Parent::Question(qid.to_string()), |question| {
                question.views += 1;
                Ok(question.clone())
            })
            .await?
            .ok_or_else(|| not_found("Question", qid))
    }

    pub async fn add_answer(&self, qid: &str, input: NewAnswer) -> Result<Answer> {
        require_text("text", &input.text)?;
        require_text("ans_by", &input.ans_by)?;

        let answer = Answer {
            id: new_id(),
            text: input.text,
            ans_by: input.ans_by,
            ans_date_time: input.ans_date_time,
            comments: vec![],
            vote_count: 0,
            upvotes_by: vec![],
            downvotes_by: vec![],
        };

        let stored = answer.clone();
        self.repo
            .update_question(&Parent::Question(qid.to_string()), move |question| {
                question.answers.push(stored);
                Ok(())
            })
            .await?
            .ok_or_else(|| not_found("Question", qid))?;

        tracing::info!("Added answer {} to question {}", answer.id, qid);
        Ok(answer)
    }

    pub async fn add_comment(&self, parent: &Parent, input: NewComment) -> Result<Comment> {
        require_text("text", &input.text)?;
        require_text("commented_by", &input.commented_by)?;

        let comment = Comment {
            id: new_id(),
            text: input.text,
            commented_by: input.commented_by,
            post_date_time: input.post_date_time,
        };

        let stored = comment.clone();
        self.repo
            .update_question(parent, move |question| {
                match parent {
                    Parent::Question(_) => question.comments.push(stored),
                    Parent::Answer(aid) => answer_mut(question, aid)?.comments.push(stored),
                }
                Ok(())
            })
            .await?
            .ok_or_else(|| parent_not_found(parent))?;

        tracing::info!("Added comment {} to {} {}", comment.id, parent.kind(), parent.id());
        Ok(comment)
    }

    /// Casts one vote. A user who already voted either way on the parent is rejected.
    /// Returns the parent's new vote count.
    pub async fn vote(&self, parent: &Parent, user_id: &str, vote: VoteType) -> Result<i64> {
        let user_id = user_id.trim();
        require_text("user_id", user_id)?;

        let new_count = self
            .repo
            .update_question(parent, |question| match parent {
                Parent::Question(_) => {
                    apply_vote(
                        &mut question.vote_count,
                        &mut question.upvotes_by,
                        &mut question.downvotes_by,
                        user_id,
                        vote,
                        parent.kind(),
                    )?;
                    Ok(question.vote_count)
                }
                Parent::Answer(aid) => {
                    let answer = answer_mut(question, aid)?;
                    apply_vote(
                        &mut answer.vote_count,
                        &mut answer.upvotes_by,
                        &mut answer.downvotes_by,
                        user_id,
                        vote,
                        parent.kind(),
                    )?;
                    Ok(answer.vote_count)
                }
            })
            .await
            .inspect_err(|e| {
                if let ForumError::DuplicateVoteError { .. } = e {
                    tracing::warn!("Duplicate vote by {} on {} {}", user_id, parent.kind(), parent.id())
                }
            })?
            .ok_or_else(|| parent_not_found(parent))?;

        tracing::info!(
            "Vote {:?} by {} on {} {} (count now {})",
            vote,
            user_id,
            parent.kind(),
            parent.id(),
            new_count
        );
        Ok(new_count)
    }

    /// Creates an empty profile for a new user.
    pub async fn create_profile(&self, username: &str) -> Result<Profile> {
        let username = username.trim();
        validate_username("username", username)?;

        let profile = self
            .repo
            .insert_profile(Profile {
                id: new_id(),
                username: username.to_string(),
                bio: String::new(),
                saved_questions: vec![],
            })
            .await?;
        tracing::info!("Created profile for {}", profile.username);
        Ok(profile)
    }

    /// The profile with saved questions resolved. Saved ids whose question no
    /// longer exists are skipped.
    pub async fn profile(&self, username: &str) -> Result<ProfileView> {
        let profile = self
            .repo
            .find_profile(username.trim())
            .await?
            .ok_or_else(|| not_found("Profile", username))?;

        let mut saved_questions = Vec::with_capacity(profile.saved_questions.len());
        for qid in &profile.saved_questions {
            match self.repo.find_question(qid).await? {
                Some(question) => saved_questions.push(question),
                None => tracing::debug!("Saved question {} of {} is gone", qid, profile.username),
            }
        }

        Ok(ProfileView {
            username: profile.username,
            bio: profile.bio,
            saved_questions,
        })
    }

    /// Renames the profile and replaces its bio. The new username must not
    /// belong to another profile.
    pub async fn edit_profile(&self, username: &str, edit: ProfileEdit) -> Result<Profile> {
        let current = username.trim();
        validate_username("current username", current)?;
        let new_username = sanitize_profile_input(&edit.new_username);
        validate_username("new username", &new_username)?;
        let bio = edit.bio.as_deref().map(sanitize_profile_input).unwrap_or_default();

        let updated = self
            .repo
            .update_profile(current, move |profile| {
                profile.username = new_username;
                profile.bio = bio;
                Ok(profile.clone())
            })
            .await
            .inspect_err(|e| {
                if let ForumError::UsernameTakenError { username } = e {
                    tracing::warn!("Profile edit by {} rejected: {} is taken", current, username)
                }
            })?
            .ok_or_else(|| not_found("Profile", current))?;

        tracing::info!("Profile {} is now {}", current, updated.username);
        Ok(updated)
    }

    /// Adds a question to the profile's saved list. Saving twice is a no-op.
    pub async fn save_question(&self, username: &str, qid: &str) -> Result<Profile> {
        let username = username.trim();
        let qid = qid.trim();
        if self.repo.find_question(qid).await?.is_none() {
            return Err(not_found("Question", qid));
        }

        let profile = self
            .repo
            .update_profile(username, |profile| {
                if !profile.saved_questions.iter().any(|id| id == qid) {
                    profile.saved_questions.push(qid.to_string());
                }
                Ok(profile.clone())
            })
            .await?
            .ok_or_else(|| not_found("Profile", username))?;

        tracing::info!("{} saved question {}", username, qid);
        Ok(profile)
    }

    pub async fn unsave_question(&self, username: &str, qid: &str) -> Result<Profile> {
        let username = username.trim();
        let qid = qid.trim();

        let profile = self
            .repo
            .update_profile(username, |profile| {
                profile.saved_questions.retain(|id| id != qid);
                Ok(profile.clone())
            })
            .await?
            .ok_or_else(|| not_found("Profile", username))?;

        tracing::info!("{} unsaved question {}", username, qid);
        Ok(profile)
    }
}

fn answer_mut<'q>(question: &'q mut Question, aid: &str) -> Result<&'q mut Answer> {
    question
        .answers
        .iter_mut()
        .find(|a| a.id == aid)
        .ok_or_else(|| not_found("Answer", aid))
}
