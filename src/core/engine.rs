use crate::core::{ordering, search, tags};
use crate::domain::model::{Question, TagCount};
use crate::domain::ports::{QuestionSource, TagSource};
use crate::utils::error::Result;
use crate::utils::sanitize::QueryParams;

/// Fetches the corpus from a source and runs the query functions over it.
pub struct QueryEngine<S> {
    source: S,
}

impl<S> QueryEngine<S>
where
    S: QuestionSource + TagSource,
{
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Ordered, then filtered, question listing.
    pub async fn questions(&self, params: &QueryParams) -> Result<Vec<Question>> {
        let corpus = self.source.fetch_questions().await?;
        tracing::debug!("Fetched {} questions", corpus.len());

        let ordered = ordering::order(&corpus, params.order);
        let filtered = search::filter(ordered, &params.search);

        tracing::info!(
            "Listing {} questions (order={}, search='{}')",
            filtered.len(),
            params.order,
            params.search
        );
        Ok(filtered.into_iter().cloned().collect())
    }

    /// Question count for every known tag. Either fetch failing fails the whole call.
    pub async fn tag_counts(&self) -> Result<Vec<TagCount>> {
        let all_tags = self.source.fetch_tags().await?;
        let all_questions = self.source.fetch_questions().await?;
        tracing::debug!(
            "Counting {} tags over {} questions",
            all_tags.len(),
            all_questions.len()
        );

        let counts = tags::count_questions_per_tag(&all_tags, &all_questions);
        Ok(tags::to_tag_counts(counts))
    }
}
