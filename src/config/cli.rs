use crate::config::toml_config::{TomlConfig, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::ports::{StoreConfig, StoreKind};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "qa-forum")]
#[command(about = "Query and update a Q&A forum store")]
pub struct CliConfig {
    /// JSON store file to read and write
    #[arg(long, global = true, conflicts_with = "endpoint")]
    pub store: Option<String>,

    /// Base URL of a running forum REST service (read-only)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// TOML configuration file; flags above override it
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// HTTP timeout; defaults to the config file value, then 30
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List questions, ordered and filtered
    Questions {
        /// newest, active or unanswered; anything else means newest
        #[arg(long)]
        order: Option<String>,
        /// Keywords and [tag] terms
        #[arg(long)]
        search: Option<String>,
    },
    /// Question count per tag
    Tags {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Show a question and count the view
    Show { qid: String },
    /// Ask a new question
    Ask {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(long)]
        asked_by: String,
    },
    /// Answer a question
    Answer {
        qid: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        ans_by: String,
    },
    /// Comment on a question or answer
    Comment {
        #[arg(value_parser = ["question", "answer"])]
        parent_type: String,
        parent_id: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        commented_by: String,
    },
    /// Vote a question or answer up or down
    Vote {
        #[arg(value_parser = ["question", "answer"])]
        parent_type: String,
        parent_id: String,
        #[arg(value_parser = ["up", "down"])]
        vote_type: String,
        #[arg(long)]
        user_id: String,
    },
    /// User profiles and saved questions
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProfileAction {
    /// Show a profile with its saved questions
    Show { username: String },
    Create { username: String },
    /// Change the username and bio
    Edit {
        username: String,
        #[arg(long)]
        new_username: String,
        /// Omit to clear the bio
        #[arg(long)]
        bio: Option<String>,
    },
    /// Save a question to the profile
    Save { username: String, qid: String },
    Unsave { username: String, qid: String },
}

impl StoreConfig for CliConfig {
    fn store_kind(&self) -> StoreKind {
        if self.endpoint.is_some() {
            StoreKind::Http
        } else if self.store.is_some() {
            StoreKind::File
        } else {
            StoreKind::Memory
        }
    }

    fn store_path(&self) -> Option<&str> {
        self.store.as_deref()
    }

    fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl CliConfig {
    /// Copies the store flags given on the command line over a loaded TOML config.
    pub fn override_toml(&self, config: &mut TomlConfig) {
        if let Some(store) = &self.store {
            config.store.r#type = "file".to_string();
            config.store.path = Some(store.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.store.r#type = "http".to_string();
            config.store.endpoint = Some(endpoint.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            config.store.timeout_seconds = Some(timeout);
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.store {
            validation::validate_path("--store", path)?;
            validation::validate_file_extension("--store", path, &["json"])?;
        }
        if let Some(endpoint) = &self.endpoint {
            validation::validate_url("--endpoint", endpoint)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("--timeout-seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}
