use crate::domain::model::{Question, Tag, TagCount};
use std::collections::HashMap;

/// Counts questions per known tag name.
///
/// Every tag in `tags` is present in the result, at zero if unused. Tags on
/// questions that are not in `tags` are ignored. A tag listed twice on one
/// question is counted twice.
pub fn count_questions_per_tag(tags: &[Tag], questions: &[Question]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> =
        tags.iter().map(|t| (t.name.clone(), 0)).collect();

    for tag in questions.iter().flat_map(|q| q.tags.iter()) {
        if let Some(count) = counts.get_mut(&tag.name) {
            *count += 1;
        }
    }

    counts
}

/// Flattens a count map into `{name, qcnt}` entries sorted by tag name.
pub fn to_tag_counts(counts: HashMap<String, usize>) -> Vec<TagCount> {
    let mut entries: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, question_count)| TagCount {
            name,
            question_count,
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
