// Adapters layer: concrete stores behind the domain ports.

pub mod http;
pub mod json_file;
pub mod memory;

use crate::domain::model::{Parent, Profile, Question, Tag};
use crate::domain::ports::{ForumRepository, QuestionSource, StoreConfig, StoreKind, TagSource};
use crate::utils::error::{ForumError, Result};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;

pub use http::HttpSource;
pub use json_file::JsonFileStore;
pub use memory::{ForumSnapshot, MemoryStore};

/// A store picked at runtime from configuration.
#[derive(Debug)]
pub enum ForumStore {
    Memory(MemoryStore),
    File(JsonFileStore),
    Http(HttpSource),
}

impl ForumStore {
    pub fn from_config<C: StoreConfig>(config: &C) -> Result<Self> {
        let store = match config.store_kind() {
            StoreKind::Memory => ForumStore::Memory(MemoryStore::new()),
            StoreKind::File => {
                let path = config.store_path().map(str::to_string);
                let path = validate_required_field("store.path", &path)?;
                ForumStore::File(JsonFileStore::new(path))
            }
            StoreKind::Http => {
                let endpoint = config.endpoint().map(str::to_string);
                let endpoint = validate_required_field("store.endpoint", &endpoint)?;
                ForumStore::Http(HttpSource::new(endpoint, config.timeout_seconds())?)
            }
        };
        tracing::debug!("Using {} store", store.kind_name());
        Ok(store)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ForumStore::Memory(_) => "memory",
            ForumStore::File(_) => "file",
            ForumStore::Http(_) => "http",
        }
    }

    fn read_only(&self) -> ForumError {
        ForumError::ReadOnlyStoreError {
            message: "the HTTP source only supports listing questions and tags".to_string(),
        }
    }
}

impl QuestionSource for ForumStore {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        match self {
            ForumStore::Memory(s) => s.fetch_questions().await,
            ForumStore::File(s) => s.fetch_questions().await,
            ForumStore::Http(s) => s.fetch_questions().await,
        }
    }
}

impl TagSource for ForumStore {
    async fn fetch_tags(&self) -> Result<Vec<Tag>> {
        match self {
            ForumStore::Memory(s) => s.fetch_tags().await,
            ForumStore::File(s) => s.fetch_tags().await,
            ForumStore::Http(s) => s.fetch_tags().await,
        }
    }
}

#[async_trait]
impl ForumRepository for ForumStore {
    async fn find_question(&self, qid: &str) -> Result<Option<Question>> {
        match self {
            ForumStore::Memory(s) => s.find_question(qid).await,
            ForumStore::File(s) => s.find_question(qid).await,
            ForumStore::Http(_) => Err(self.read_only()),
        }
    }

    async fn save_question(&self, question: Question) -> Result<Question> {
        match self {
            ForumStore::Memory(s) => s.save_question(question).await,
            ForumStore::File(s) => s.save_question(question).await,
            ForumStore::Http(_) => Err(self.read_only()),
        }
    }

    async fn update_question<T, F>(&self, target: &Parent, apply: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&mut Question) -> Result<T> + Send,
    {
        match self {
            ForumStore::Memory(s) => s.update_question(target, apply).await,
            ForumStore::File(s) => s.update_question(target, apply).await,
            ForumStore::Http(_) => Err(self.read_only()),
        }
    }

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        match self {
            ForumStore::Memory(s) => s.find_tag_by_name(name).await,
            ForumStore::File(s) => s.find_tag_by_name(name).await,
            ForumStore::Http(_) => Err(self.read_only()),
        }
    }

    async fn save_tag(&self, tag: Tag) -> Result<Tag> {
        match self {
            ForumStore::Memory(s) => s.save_tag(tag).await,
            ForumStore::File(s) => s.save_tag(tag).await,
            ForumStore::Http(_) => Err(self.read_only()),
        }
    }

    async fn find_profile(&self, username: &str) -> Result<Option<Profile>> {
        match self {
            ForumStore::Memory(s) => s.find_profile(username).await,
            ForumStore::File(s) => s.find_profile(username).await,
            ForumStore::Http(_) => Err(self.read_only()),
        }
    }

    async fn insert_profile(&self, profile: Profile) -> Result<Profile> {
        match self {
            ForumStore::Memory(s) => s.insert_profile(profile).await,
            ForumStore::File(s) => s.insert_profile(profile).await,
            ForumStore::Http(_) => Err(self.read_only()),
        }
    }

    async fn update_profile<T, F>(&self, username: &str, apply: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&mut Profile) -> Result<T> + Send,
    {
        match self {
            ForumStore::Memory(s) => s.update_profile(username, apply).await,
            ForumStore::File(s) => s.update_profile(username, apply).await,
            ForumStore::Http(_) => Err(self.read_only()),
        }
    }
}
