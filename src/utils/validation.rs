use crate::utils::error::{ForumError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

static USERNAME_PATTERN: OnceLock<Regex> = OnceLock::new();

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ForumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ForumError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ForumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ForumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ForumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension) => Ok(()),
        Some(extension) => Err(ForumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(ForumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ForumError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ForumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Rejects blank user input. Unlike the config checks this is an input error,
/// so callers get `ValidationError` rather than a configuration failure.
pub fn require_text(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ForumError::ValidationError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

/// Usernames are 3-30 ASCII letters, digits or underscores.
pub fn validate_username(field_name: &str, value: &str) -> Result<()> {
    let re = USERNAME_PATTERN
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]{3,30}$").expect("username pattern is valid"));
    if !re.is_match(value) {
        return Err(ForumError::ValidationError {
            message: format!("{} must be 3-30 characters long and alphanumeric", field_name),
        });
    }
    Ok(())
}
