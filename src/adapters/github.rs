use crate::adapters::{ensure_success, join_url, secret_header, USER_AGENT};
use crate::config::release_config::GithubSettings;
use crate::core::{
    AssetPlacement, PublishedRelease, ReleaseAsset, ReleaseDraft, ReleaseHost, UploadedAsset,
};
use crate::utils::error::{ReleaseError, Result};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct CreateReleaseBody<'a> {
    tag_name: &'a str,
    name: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    tag_name: String,
    name: Option<String>,
    html_url: Option<String>,
    upload_url: String,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct AssetResponse {
    name: String,
    browser_download_url: String,
}

pub struct GithubReleaseHost {
    client: Client,
    settings: GithubSettings,
}

impl GithubReleaseHost {
    pub fn new(settings: GithubSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            AUTHORIZATION,
            secret_header("github.token", &format!("Bearer {}", settings.token))?,
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, settings })
    }

    fn releases_url(&self) -> String {
        join_url(
            &self.settings.api_url,
            &format!("repos/{}/releases", self.settings.repository),
        )
    }
}

/// `upload_url` comes back as an RFC 6570 template, e.g.
/// `https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}`.
fn strip_uri_template(url: &str) -> &str {
    url.split('{').next().unwrap_or(url)
}

#[async_trait::async_trait]
impl ReleaseHost for GithubReleaseHost {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn asset_placement(&self) -> AssetPlacement {
        AssetPlacement::AttachedToRelease
    }

    async fn upload_asset(
        &self,
        asset: &ReleaseAsset,
        release: Option<&PublishedRelease>,
    ) -> Result<UploadedAsset> {
        let upload_url = release
            .and_then(|r| r.upload_url.as_deref())
            .ok_or_else(|| ReleaseError::ProcessingError {
                message: "GitHub assets can only be uploaded to an existing release".to_string(),
            })?;

        tracing::debug!(
            "Uploading {} ({} bytes) to {}",
            asset.file_name,
            asset.data.len(),
            upload_url
        );
        let response = self
            .client
            .post(upload_url)
            .query(&[("name", asset.file_name.as_str()), ("label", "")])
            .header(CONTENT_TYPE, asset.content_type.as_str())
            .body(asset.data.clone())
            .send()
            .await?;
        let uploaded: AssetResponse = ensure_success(response).await?.json().await?;

        Ok(UploadedAsset {
            name: uploaded.name,
            url: uploaded.browser_download_url,
            markdown: None,
        })
    }

    async fn create_release(&self, draft: &ReleaseDraft) -> Result<PublishedRelease> {
        let url = self.releases_url();
        tracing::debug!("Creating release {} via {}", draft.tag_name, url);

        let response = self
            .client
            .post(&url)
            .json(&CreateReleaseBody {
                tag_name: &draft.tag_name,
                name: &draft.name,
                body: &draft.description,
            })
            .send()
            .await?;
        let created: ReleaseResponse = ensure_success(response).await?.json().await?;

        Ok(PublishedRelease {
            tag_name: created.tag_name,
            name: created.name.unwrap_or_else(|| draft.name.clone()),
            url: created.html_url,
            upload_url: Some(strip_uri_template(&created.upload_url).to_string()),
            created_at: created.created_at,
            assets: Vec::new(),
        })
    }
}
