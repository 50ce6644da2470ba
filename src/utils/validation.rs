use crate::utils::error::{ReleaseError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ReleaseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ReleaseError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ReleaseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReleaseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Secrets are never echoed back in error messages.
pub fn validate_token(field_name: &str, token: &str) -> Result<()> {
    if token.trim().is_empty() {
        return Err(ReleaseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "Token cannot be empty".to_string(),
        });
    }
    if token.chars().any(char::is_whitespace) {
        return Err(ReleaseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "<redacted>".to_string(),
            reason: "Token must not contain whitespace".to_string(),
        });
    }
    Ok(())
}

/// `owner/name`, as GitHub addresses repositories.
pub fn validate_repository_slug(field_name: &str, slug: &str) -> Result<()> {
    let mut parts = slug.split('/');
    let valid = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
    );

    if !valid {
        return Err(ReleaseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: slug.to_string(),
            reason: "Expected a repository of the form owner/name".to_string(),
        });
    }
    Ok(())
}
