pub mod engine;
pub mod forum;
pub mod ordering;
pub mod search;
pub mod tags;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::QueryEngine;
pub use forum::ForumService;
pub use ordering::order;
pub use search::{filter, SearchQuery};
pub use tags::count_questions_per_tag;

pub use crate::domain::model::{Question, SortOrder, Tag, TagCount};
pub use crate::domain::ports::{ForumRepository, QuestionSource, TagSource};
pub use crate::utils::error::Result;
