use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLink {
    pub name: String,
    pub url: String,
    pub link_type: String,
}

/// What gets sent to the host when the release is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDraft {
    pub tag_name: String,
    pub name: String,
    pub description: String,
    pub asset_links: Vec<AssetLink>,
}

#[derive(Debug, Clone)]
pub struct ReleaseAsset {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub name: String,
    pub url: String,
    pub markdown: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedRelease {
    pub tag_name: String,
    pub name: String,
    pub url: Option<String>,
    /// GitHub only: where assets for this release are posted.
    pub upload_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub assets: Vec<UploadedAsset>,
}

#[derive(Debug, Clone)]
pub struct ReleaseRequest {
    pub tag: String,
    pub name: Option<String>,
    pub asset_path: PathBuf,
    /// Upload name template; `{tag}` and `{version}` are substituted.
    pub asset_name: Option<String>,
    pub changelog_path: String,
}
