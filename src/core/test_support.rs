use crate::domain::model::{Answer, Question, Tag};
use chrono::{DateTime, TimeZone, Utc};

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub fn tag(name: &str) -> Tag {
    Tag {
        id: Some(format!("t-{}", name)),
        name: name.to_string(),
    }
}

pub fn question(id: &str, title: &str, text: &str, tags: &[&str], asked: DateTime<Utc>) -> Question {
    Question {
        id: id.to_string(),
        title: title.to_string(),
        text: text.to_string(),
        tags: tags.iter().map(|t| tag(t)).collect(),
        answers: vec![],
        asked_by: Some("tester".to_string()),
        ask_date_time: asked,
        views: 0,
        comments: vec![],
        vote_count: 0,
        upvotes_by: vec![],
        downvotes_by: vec![],
    }
}

pub fn answer(id: &str, when: DateTime<Utc>) -> Answer {
    Answer {
        id: id.to_string(),
        text: format!("answer {}", id),
        ans_by: "helper".to_string(),
        ans_date_time: when,
        comments: vec![],
        vote_count: 0,
        upvotes_by: vec![],
        downvotes_by: vec![],
    }
}
