use crate::domain::model::SortOrder;
use regex::Regex;
use std::sync::OnceLock;

static UNSAFE_SEARCH_CHARS: OnceLock<Regex> = OnceLock::new();
static UNSAFE_PROFILE_CHARS: OnceLock<Regex> = OnceLock::new();

/// Normalized `order`/`search` query parameters for a question listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub order: SortOrder,
    pub search: String,
}

impl QueryParams {
    /// Unknown or missing orders fall back to `newest`; a missing search is empty.
    pub fn sanitize(order: Option<&str>, search: Option<&str>) -> Self {
        let order = match order.and_then(|o| o.parse::<SortOrder>().ok()) {
            Some(order) => order,
            None => {
                if let Some(raw) = order {
                    tracing::warn!("Unknown order '{}', falling back to newest", raw);
                }
                SortOrder::Newest
            }
        };

        Self {
            order,
            search: search.map(sanitize_search_input).unwrap_or_default(),
        }
    }
}

/// Strips characters the backing store treats specially, then trims.
pub fn sanitize_search_input(input: &str) -> String {
    let re = UNSAFE_SEARCH_CHARS.get_or_init(|| {
        Regex::new(r#"[%_;'"\\]"#).expect("unsafe character pattern is valid")
    });
    re.replace_all(input, "").trim().to_string()
}

/// Trims profile text and drops `$` and `.`.
pub fn sanitize_profile_input(input: &str) -> String {
    let re = UNSAFE_PROFILE_CHARS
        .get_or_init(|| Regex::new(r"[$.]").expect("profile character pattern is valid"));
    re.replace_all(input.trim(), "").to_string()
}
