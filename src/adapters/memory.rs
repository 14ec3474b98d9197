use crate::domain::model::{Parent, Profile, Question, Tag};
use crate::domain::ports::{ForumRepository, QuestionSource, TagSource};
use crate::utils::error::{ForumError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Every document the forum stores: the layout of the JSON store file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForumSnapshot {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl ForumSnapshot {
    pub fn find_question(&self, qid: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == qid)
    }

    pub fn find_tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn find_profile(&self, username: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.username == username)
    }

    pub fn upsert_question(&mut self, question: Question) {
        match self.questions.iter_mut().find(|q| q.id == question.id) {
            Some(existing) => *existing = question,
            None => self.questions.push(question),
        }
    }

    /// Keeps an existing tag of the same name, otherwise stores `tag`.
    pub fn insert_tag(&mut self, tag: Tag) -> Tag {
        if let Some(existing) = self.find_tag_by_name(&tag.name) {
            return existing.clone();
        }
        self.tags.push(tag.clone());
        tag
    }

    fn question_index(&self, target: &Parent) -> Option<usize> {
        match target {
            Parent::Question(qid) => self.questions.iter().position(|q| q.id == *qid),
            Parent::Answer(aid) => self
                .questions
                .iter()
                .position(|q| q.answers.iter().any(|a| a.id == *aid)),
        }
    }

    /// Runs `apply` on a copy of the target's question and keeps the copy
    /// only when `apply` succeeds.
    pub fn update_question<T>(
        &mut self,
        target: &Parent,
        apply: impl FnOnce(&mut Question) -> Result<T>,
    ) -> Result<Option<T>> {
        let Some(idx) = self.question_index(target) else {
            return Ok(None);
        };
        let mut updated = self.questions[idx].clone();
        let outcome = apply(&mut updated)?;
        self.questions[idx] = updated;
        Ok(Some(outcome))
    }

    pub fn insert_profile(&mut self, profile: Profile) -> Result<Profile> {
        if self.find_profile(&profile.username).is_some() {
            return Err(ForumError::UsernameTakenError {
                username: profile.username,
            });
        }
        self.profiles.push(profile.clone());
        Ok(profile)
    }

    /// Like `update_question`, and additionally rejects a rename onto a
    /// username another profile holds.
    pub fn update_profile<T>(
        &mut self,
        username: &str,
        apply: impl FnOnce(&mut Profile) -> Result<T>,
    ) -> Result<Option<T>> {
        let Some(idx) = self.profiles.iter().position(|p| p.username == username) else {
            return Ok(None);
        };
        let mut updated = self.profiles[idx].clone();
        let outcome = apply(&mut updated)?;

        let taken = self
            .profiles
            .iter()
            .enumerate()
            .any(|(i, p)| i != idx && p.username == updated.username);
        if taken {
            return Err(ForumError::UsernameTakenError {
                username: updated.username,
            });
        }

        self.profiles[idx] = updated;
        Ok(Some(outcome))
    }
}

/// Shared in-process store. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<ForumSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: ForumSnapshot) -> Self {
        Self {
            data: Arc::new(RwLock::new(snapshot)),
        }
    }

    pub async fn snapshot(&self) -> ForumSnapshot {
        self.data.read().await.clone()
    }
}

impl QuestionSource for MemoryStore {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        Ok(self.data.read().await.questions.clone())
    }
}

impl TagSource for MemoryStore {
    async fn fetch_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.data.read().await.tags.clone())
    }
}

#[async_trait]
impl ForumRepository for MemoryStore {
    async fn find_question(&self, qid: &str) -> Result<Option<Question>> {
        Ok(self.data.read().await.find_question(qid).cloned())
    }

    async fn save_question(&self, question: Question) -> Result<Question> {
        self.data.write().await.upsert_question(question.clone());
        Ok(question)
    }

    async fn update_question<T, F>(&self, target: &Parent, apply: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&mut Question) -> Result<T> + Send,
    {
        self.data.write().await.update_question(target, apply)
    }

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        Ok(self.data.read().await.find_tag_by_name(name).cloned())
    }

    async fn save_tag(&self, tag: Tag) -> Result<Tag> {
        Ok(self.data.write().await.insert_tag(tag))
    }

    async fn find_profile(&self, username: &str) -> Result<Option<Profile>> {
        Ok(self.data.read().await.find_profile(username).cloned())
    }

    async fn insert_profile(&self, profile: Profile) -> Result<Profile> {
        self.data.write().await.insert_profile(profile)
    }

    async fn update_profile<T, F>(&self, username: &str, apply: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&mut Profile) -> Result<T> + Send,
    {
        self.data.write().await.update_profile(username, apply)
    }
}
