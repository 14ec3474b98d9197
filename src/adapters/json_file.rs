use crate::adapters::memory::ForumSnapshot;
use crate::domain::model::{Parent, Profile, Question, Tag};
use crate::domain::ports::{ForumRepository, QuestionSource, TagSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Store backed by a single JSON document on disk.
///
/// Every call re-reads the file, so edits made by other processes between
/// calls are picked up. A missing file reads as an empty forum and is created
/// on the first write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<ForumSnapshot> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(ForumSnapshot::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Store file {} not found, starting empty", self.path.display());
                Ok(ForumSnapshot::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, snapshot: &ForumSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec_pretty(snapshot)?;
        tracing::debug!("Writing {} bytes to {}", data.len(), self.path.display());
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }

    /// Read-modify-write of the whole file under the write lock. Nothing is
    /// written when `apply` fails.
    async fn update<R, F>(&self, apply: F) -> Result<R>
    where
        R: Send,
        F: FnOnce(&mut ForumSnapshot) -> Result<R> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.load().await?;
        let outcome = apply(&mut snapshot)?;
        self.persist(&snapshot).await?;
        Ok(outcome)
    }
}

impl QuestionSource for JsonFileStore {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        Ok(self.load().await?.questions)
    }
}

impl TagSource for JsonFileStore {
    async fn fetch_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.load().await?.tags)
    }
}

#[async_trait]
impl ForumRepository for JsonFileStore {
    async fn find_question(&self, qid: &str) -> Result<Option<Question>> {
        Ok(self.load().await?.find_question(qid).cloned())
    }

    async fn save_question(&self, question: Question) -> Result<Question> {
        let stored = question.clone();
        self.update(move |s| {
            s.upsert_question(stored);
            Ok(())
        })
        .await?;
        Ok(question)
    }

    async fn update_question<T, F>(&self, target: &Parent, apply: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&mut Question) -> Result<T> + Send,
    {
        self.update(|s| s.update_question(target, apply)).await
    }

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        Ok(self.load().await?.find_tag_by_name(name).cloned())
    }

    async fn save_tag(&self, tag: Tag) -> Result<Tag> {
        self.update(move |s| Ok(s.insert_tag(tag))).await
    }

    async fn find_profile(&self, username: &str) -> Result<Option<Profile>> {
        Ok(self.load().await?.find_profile(username).cloned())
    }

    async fn insert_profile(&self, profile: Profile) -> Result<Profile> {
        self.update(move |s| s.insert_profile(profile)).await
    }

    async fn update_profile<T, F>(&self, username: &str, apply: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&mut Profile) -> Result<T> + Send,
    {
        self.update(|s| s.update_profile(username, apply)).await
    }
}
