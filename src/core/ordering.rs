use crate::domain::model::{Question, SortOrder};
use std::cmp::Reverse;

/// Orders a borrowed question list without touching the records themselves.
///
/// `Active` is two stable passes, newest-first and then by activity time, so
/// questions with equal activity keep the newest-first order of the first pass.
/// Unanswered questions have no activity time and land after every answered one.
pub fn order<'a, I>(questions: I, policy: SortOrder) -> Vec<&'a Question>
where
    I: IntoIterator<Item = &'a Question>,
{
    let mut result: Vec<&'a Question> = match policy {
        SortOrder::Unanswered => questions.into_iter().filter(|q| !q.is_answered()).collect(),
        SortOrder::Newest | SortOrder::Active => questions.into_iter().collect(),
    };

    result.sort_by_key(|q| Reverse(q.ask_date_time));

    if policy == SortOrder::Active {
        result.sort_by_key(|q| Reverse(q.activity_time()));
    }

    tracing::debug!("Ordered {} questions by {}", result.len(), policy);
    result
}
