use crate::adapters::{ensure_success, join_url, secret_header, USER_AGENT};
use crate::config::release_config::GitlabSettings;
use crate::core::{
    AssetPlacement, PublishedRelease, ReleaseAsset, ReleaseDraft, ReleaseHost, UploadedAsset,
};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

const TOKEN_HEADER: &str = "private-token";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    alt: String,
    full_path: String,
    markdown: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    tag_name: String,
    name: Option<String>,
    created_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links")]
    links: Option<ReleaseLinks>,
    assets: Option<ReleaseAssets>,
}

#[derive(Debug, Deserialize)]
struct ReleaseLinks {
    #[serde(rename = "self")]
    self_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReleaseAssets {
    #[serde(default)]
    links: Vec<ReleaseAssetLink>,
}

#[derive(Debug, Deserialize)]
struct ReleaseAssetLink {
    name: String,
    url: String,
}

pub struct GitlabReleaseHost {
    client: Client,
    settings: GitlabSettings,
}

impl GitlabReleaseHost {
    pub fn new(settings: GitlabSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, secret_header("gitlab.token", &settings.token)?);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, settings })
    }

    fn project_url(&self, resource: &str) -> String {
        join_url(
            &self.settings.api_v4_url,
            &format!("projects/{}/{}", self.settings.project_id, resource),
        )
    }
}

#[async_trait::async_trait]
impl ReleaseHost for GitlabReleaseHost {
    fn name(&self) -> &'static str {
        "GitLab"
    }

    fn asset_placement(&self) -> AssetPlacement {
        AssetPlacement::LinkedFromRelease
    }

    async fn upload_asset(
        &self,
        asset: &ReleaseAsset,
        _release: Option<&PublishedRelease>,
    ) -> Result<UploadedAsset> {
        let url = self.project_url("uploads");
        tracing::debug!(
            "Uploading {} ({} bytes) to {}",
            asset.file_name,
            asset.data.len(),
            url
        );

        let part = Part::bytes(asset.data.clone())
            .file_name(asset.file_name.clone())
            .mime_str(&asset.content_type)?;
        let response = self
            .client
            .post(&url)
            .multipart(Form::new().part("file", part))
            .send()
            .await?;
        let uploaded: UploadResponse = ensure_success(response).await?.json().await?;
        tracing::debug!("Upload stored at {}", uploaded.full_path);

        Ok(UploadedAsset {
            name: uploaded.alt,
            url: format!(
                "{}{}",
                self.settings.server_url.trim_end_matches('/'),
                uploaded.full_path
            ),
            markdown: uploaded.markdown,
        })
    }

    async fn create_release(&self, draft: &ReleaseDraft) -> Result<PublishedRelease> {
        let url = self.project_url("releases");
        tracing::debug!("Creating release {} via {}", draft.tag_name, url);

        let payload = serde_json::json!({
            "name": draft.name,
            "tag_name": draft.tag_name,
            "description": draft.description,
            "assets": {
                "links": draft.asset_links,
            },
        });

        let response = self.client.post(&url).json(&payload).send().await?;
        let created: ReleaseResponse = ensure_success(response).await?.json().await?;

        let assets = created
            .assets
            .map(|assets| {
                assets
                    .links
                    .into_iter()
                    .map(|link| UploadedAsset {
                        name: link.name,
                        url: link.url,
                        markdown: None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(PublishedRelease {
            tag_name: created.tag_name,
            name: created.name.unwrap_or_else(|| draft.name.clone()),
            url: created.links.and_then(|links| links.self_url),
            upload_url: None,
            created_at: created.created_at,
            assets,
        })
    }
}
