pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{ForumStore, HttpSource, JsonFileStore, MemoryStore};
pub use core::{ForumService, QueryEngine};
pub use utils::error::{ForumError, Result};
pub use utils::sanitize::QueryParams;
