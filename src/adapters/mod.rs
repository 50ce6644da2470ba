// Adapters layer: concrete release hosts over the hosted HTTP APIs.

pub mod github;
pub mod gitlab;

use crate::utils::error::{ReleaseError, Result};
use reqwest::header::HeaderValue;
use reqwest::Response;

pub(crate) const USER_AGENT: &str = concat!("changelog-release/", env!("CARGO_PKG_VERSION"));

/// Turns a non-2xx response into [`ReleaseError::HttpStatusError`], keeping
/// the body since both APIs explain validation failures there.
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    tracing::error!("{} responded with {}: {}", url, status, body);

    Err(ReleaseError::HttpStatusError {
        url,
        status: status.as_u16(),
        body,
    })
}

pub(crate) fn secret_header(field: &str, value: &str) -> Result<HeaderValue> {
    let mut header =
        HeaderValue::from_str(value).map_err(|_| ReleaseError::InvalidConfigValueError {
            field: field.to_string(),
            value: "<redacted>".to_string(),
            reason: "Token contains characters not allowed in an HTTP header".to_string(),
        })?;
    header.set_sensitive(true);
    Ok(header)
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
