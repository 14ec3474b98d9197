use crate::domain::model::{Question, SortOrder, Tag, TagCount};
use crate::domain::ports::{QuestionSource, TagSource};
use crate::utils::error::{ForumError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Read-only source that pulls the corpus from a running forum REST service.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).query(query).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ForumError::UpstreamStatusError {
                status: response.status().as_u16(),
                url,
            });
        }

        Ok(response.json().await?)
    }
}

impl QuestionSource for HttpSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        // ordering and search run locally, so ask for the unfiltered listing
        self.get_json(
            "/question/getQuestion",
            &[("order", SortOrder::Newest.as_str())],
        )
        .await
    }
}

impl TagSource for HttpSource {
    async fn fetch_tags(&self) -> Result<Vec<Tag>> {
        let counts: Vec<TagCount> = self
            .get_json("/tag/getTagsWithQuestionNumber", &[])
            .await?;
        Ok(counts
            .into_iter()
            .map(|c| Tag {
                id: None,
                name: c.name,
            })
            .collect())
    }
}
