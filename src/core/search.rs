use crate::domain::model::Question;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static TAG_TOKEN: OnceLock<Regex> = OnceLock::new();
static KEYWORD_TOKEN: OnceLock<Regex> = OnceLock::new();

fn tag_token_re() -> &'static Regex {
    TAG_TOKEN.get_or_init(|| Regex::new(r"\[[^\[\]]+\]").expect("tag token pattern is valid"))
}

fn keyword_token_re() -> &'static Regex {
    // ASCII word characters and boundaries only
    KEYWORD_TOKEN.get_or_init(|| Regex::new(r"(?-u:\b\w+\b)").expect("keyword token pattern is valid"))
}

/// A search string split into bracketed tag names and bare keywords, both lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
}

impl SearchQuery {
    pub fn parse(search: &str) -> Self {
        let search = search.trim().to_lowercase();

        let tags = tag_token_re()
            .find_iter(&search)
            .map(|m| {
                let token = m.as_str();
                token[1..token.len() - 1].to_string()
            })
            .collect();

        let without_tags = tag_token_re().replace_all(&search, " ");
        let keywords = keyword_token_re()
            .find_iter(&without_tags)
            .map(|m| m.as_str().to_string())
            .collect();

        Self { tags, keywords }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.keywords.is_empty()
    }

    fn matches_tag(&self, question: &Question) -> bool {
        question
            .tags
            .iter()
            .any(|t| self.tags.contains(&t.name.to_lowercase()))
    }

    fn matches_keyword(&self, question: &Question) -> bool {
        let title = question.title.to_lowercase();
        let text = question.text.to_lowercase();
        self.keywords
            .iter()
            .any(|k| title.contains(k.as_str()) || text.contains(k.as_str()))
    }
}

/// Filters questions by a search string such as `"website [android]"`.
///
/// A blank search returns the input as-is. Otherwise questions matching a
/// bracketed tag come first, followed by questions whose title or text
/// contains a keyword and were not already matched by tag.
pub fn filter<'a, I>(questions: I, search: &str) -> Vec<&'a Question>
where
    I: IntoIterator<Item = &'a Question>,
{
    let questions: Vec<&'a Question> = questions.into_iter().collect();
    if search.trim().is_empty() {
        return questions;
    }

    let query = SearchQuery::parse(search);
    tracing::debug!(
        "Search '{}' parsed into {} tag(s) and {} keyword(s)",
        search,
        query.tags.len(),
        query.keywords.len()
    );

    let mut result: Vec<&'a Question> = Vec::new();
    let mut included: HashSet<&'a str> = HashSet::new();

    if !query.tags.is_empty() {
        for q in questions.iter().copied().filter(|q| query.matches_tag(q)) {
            included.insert(q.id.as_str());
            result.push(q);
        }
    }

    if !query.keywords.is_empty() {
        for q in questions.iter().copied().filter(|q| query.matches_keyword(q)) {
            if included.insert(q.id.as_str()) {
                result.push(q);
            }
        }
    }

    tracing::debug!("Search matched {} of {} questions", result.len(), questions.len());
    result
}
