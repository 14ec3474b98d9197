use crate::domain::model::{Parent, Profile, Question, Tag};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the full question corpus for one request.
pub trait QuestionSource: Send + Sync {
    fn fetch_questions(&self) -> impl std::future::Future<Output = Result<Vec<Question>>> + Send;
}

/// Supplies every known tag.
pub trait TagSource: Send + Sync {
    fn fetch_tags(&self) -> impl std::future::Future<Output = Result<Vec<Tag>>> + Send;
}

/// Document-level reads and writes used by the write-side service.
///
/// The `update_*` methods run the closure while holding the store's write
/// lock, so concurrent updates of the same document never overwrite each
/// other. When the closure fails nothing is written.
#[async_trait]
pub trait ForumRepository: Send + Sync {
    async fn find_question(&self, qid: &str) -> Result<Option<Question>>;
    /// Inserts or replaces the question with the same id.
    async fn save_question(&self, question: Question) -> Result<Question>;

    /// Applies `apply` to the question `target` belongs to. `Ok(None)` when
    /// no stored question holds the target.
    async fn update_question<T, F>(&self, target: &Parent, apply: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&mut Question) -> Result<T> + Send;

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>>;
    /// Stores the tag unless one with the same name exists. Returns the stored tag.
    async fn save_tag(&self, tag: Tag) -> Result<Tag>;

    async fn find_profile(&self, username: &str) -> Result<Option<Profile>>;
    /// Fails with `UsernameTakenError` when the username is in use.
    async fn insert_profile(&self, profile: Profile) -> Result<Profile>;
    /// Applies `apply` to the profile of `username`. A rename onto another
    /// profile's username fails with `UsernameTakenError`.
    async fn update_profile<T, F>(&self, username: &str, apply: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&mut Profile) -> Result<T> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    File,
    Http,
}

pub trait StoreConfig: Send + Sync {
    fn store_kind(&self) -> StoreKind;
    fn store_path(&self) -> Option<&str>;
    fn endpoint(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
}
