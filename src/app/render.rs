use crate::domain::model::TagCount;
use crate::utils::error::{ForumError, Result};
use serde::Serialize;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// `name,qcnt` rows with a header line.
pub fn render_tag_counts_csv(counts: &[TagCount]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for count in counts {
        writer.serialize(count)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ForumError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
