use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::ForumError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub commented_by: String,
    pub post_date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub ans_by: String,
    pub ans_date_time: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub upvotes_by: Vec<String>,
    #[serde(default)]
    pub downvotes_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asked_by: Option<String>,
    pub ask_date_time: DateTime<Utc>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub upvotes_by: Vec<String>,
    #[serde(default)]
    pub downvotes_by: Vec<String>,
}

impl Question {
    /// Timestamp of the newest answer, or `None` when unanswered.
    pub fn activity_time(&self) -> Option<DateTime<Utc>> {
        self.answers.iter().map(|a| a.ans_date_time).max()
    }

    pub fn is_answered(&self) -> bool {
        !self.answers.is_empty()
    }
}

/// Number of questions referencing a tag, in the `{name, qcnt}` wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    #[serde(rename = "qcnt", alias = "questionCount")]
    pub question_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Active,
    Unanswered,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Active => "active",
            SortOrder::Unanswered => "unanswered",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ForumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOrder::Newest),
            "active" => Ok(SortOrder::Active),
            "unanswered" => Ok(SortOrder::Unanswered),
            other => Err(ForumError::ValidationError {
                message: format!("Invalid sort order: {}", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    pub fn delta(&self) -> i64 {
        match self {
            VoteType::Up => 1,
            VoteType::Down => -1,
        }
    }
}

impl FromStr for VoteType {
    type Err = ForumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "up" => Ok(VoteType::Up),
            "down" => Ok(VoteType::Down),
            other => Err(ForumError::ValidationError {
                message: format!("Invalid vote type: {}", other),
            }),
        }
    }
}

/// What a comment or vote is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    Question(String),
    Answer(String),
}

impl Parent {
    /// Builds a parent from the `parent_type`/`parent_id` pair used by the REST API.
    pub fn parse(parent_type: &str, parent_id: &str) -> Result<Self, ForumError> {
        let id = parent_id.trim();
        if id.is_empty() {
            return Err(ForumError::ValidationError {
                message: "Invalid parent ID provided.".to_string(),
            });
        }
        match parent_type.trim() {
            "question" => Ok(Parent::Question(id.to_string())),
            "answer" => Ok(Parent::Answer(id.to_string())),
            other => Err(ForumError::ValidationError {
                message: format!("Invalid parent type provided: {}", other),
            }),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Parent::Question(_) => "question",
            Parent::Answer(_) => "answer",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Parent::Question(id) | Parent::Answer(id) => id,
        }
    }
}

/// Input for a question that has not been stored yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    pub text: String,
    pub tags: Vec<String>,
    pub asked_by: String,
    pub ask_date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnswer {
    pub text: String,
    pub ans_by: String,
    pub ans_date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub text: String,
    pub commented_by: String,
    pub post_date_time: DateTime<Utc>,
}

/// A user's public profile. `username` is unique across profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub bio: String,
    /// Question ids, in the order they were saved.
    #[serde(default, rename = "savedQuestions")]
    pub saved_questions: Vec<String>,
}

/// A profile with its saved question ids resolved to the stored questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub username: String,
    pub bio: String,
    #[serde(rename = "savedQuestions")]
    pub saved_questions: Vec<Question>,
}

/// Requested changes to a profile. A missing bio clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEdit {
    pub new_username: String,
    pub bio: Option<String>,
}
