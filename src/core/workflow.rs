use crate::core::changelog::{load_release_description, normalize_version};
use crate::core::{
    AssetLink, AssetPlacement, PublishedRelease, ReleaseAsset, ReleaseDraft, ReleaseHost,
    ReleaseRequest, Storage,
};
use crate::utils::archive::inspect_zip;
use crate::utils::error::{ReleaseError, Result};
use std::path::Path;

const ZIP_CONTENT_TYPE: &str = "application/zip";
const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, Default)]
pub struct WorkflowOptions {
    /// Publish even when the changelog has no notes for the version.
    pub allow_empty_notes: bool,
    /// Build the release but do not call the host.
    pub dry_run: bool,
}

pub struct ReleaseWorkflow<H: ReleaseHost, S: Storage> {
    host: H,
    storage: S,
    options: WorkflowOptions,
}

impl<H: ReleaseHost, S: Storage> ReleaseWorkflow<H, S> {
    pub fn new(host: H, storage: S, options: WorkflowOptions) -> Self {
        Self {
            host,
            storage,
            options,
        }
    }

    pub async fn run(&self, request: &ReleaseRequest) -> Result<PublishedRelease> {
        let version = normalize_version(&request.tag);
        tracing::info!(
            "Preparing {} release {} (version {})",
            self.host.name(),
            request.tag,
            version
        );

        // The extractor applies the `v` rule itself; pass the raw tag.
        let description =
            load_release_description(&self.storage, &request.changelog_path, &request.tag)
                .await?;
        if description.trim().is_empty() {
            if !self.options.allow_empty_notes {
                return Err(ReleaseError::MissingReleaseNotesError {
                    version: version.to_string(),
                    changelog: request.changelog_path.clone(),
                });
            }
            tracing::warn!(
                "No release notes for version {} in {}, publishing anyway",
                version,
                request.changelog_path
            );
        }

        let asset = self.read_asset(request, version).await?;

        let draft = ReleaseDraft {
            tag_name: request.tag.clone(),
            name: request
                .name
                .clone()
                .unwrap_or_else(|| format!("Version {}", version)),
            description,
            asset_links: Vec::new(),
        };

        if self.options.dry_run {
            tracing::info!(
                "Dry run: would publish '{}' for tag {} with asset {} ({} bytes)",
                draft.name,
                draft.tag_name,
                asset.file_name,
                asset.data.len()
            );
            tracing::debug!("Release description:\n{}", draft.description);
            return Ok(PublishedRelease {
                tag_name: draft.tag_name,
                name: draft.name,
                url: None,
                upload_url: None,
                created_at: None,
                assets: Vec::new(),
            });
        }

        let release = match self.host.asset_placement() {
            AssetPlacement::LinkedFromRelease => self.upload_then_create(draft, &asset).await?,
            AssetPlacement::AttachedToRelease => self.create_then_upload(&draft, &asset).await?,
        };

        tracing::info!(
            "Published release '{}' ({} asset(s)){}",
            release.name,
            release.assets.len(),
            release
                .url
                .as_deref()
                .map(|url| format!(" at {}", url))
                .unwrap_or_default()
        );
        Ok(release)
    }

    async fn upload_then_create(
        &self,
        mut draft: ReleaseDraft,
        asset: &ReleaseAsset,
    ) -> Result<PublishedRelease> {
        let uploaded = self.host.upload_asset(asset, None).await?;
        tracing::info!("Uploaded {} to {}", uploaded.name, uploaded.url);

        draft.asset_links.push(AssetLink {
            name: uploaded.name.clone(),
            url: uploaded.url.clone(),
            link_type: "other".to_string(),
        });

        let mut release = self.host.create_release(&draft).await?;
        if release.assets.is_empty() {
            release.assets.push(uploaded);
        }
        Ok(release)
    }

    async fn create_then_upload(
        &self,
        draft: &ReleaseDraft,
        asset: &ReleaseAsset,
    ) -> Result<PublishedRelease> {
        let mut release = self.host.create_release(draft).await?;
        tracing::info!("Created release '{}' for tag {}", release.name, release.tag_name);

        let uploaded = self.host.upload_asset(asset, Some(&release)).await?;
        tracing::info!("Attached {} ({})", uploaded.name, uploaded.url);

        release.assets.push(uploaded);
        Ok(release)
    }

    async fn read_asset(&self, request: &ReleaseRequest, version: &str) -> Result<ReleaseAsset> {
        let path = request.asset_path.to_string_lossy();
        let data = self.storage.read_file(&path).await?;

        let default_name = request
            .asset_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ReleaseError::ProcessingError {
                message: format!("Asset path {} has no file name", path),
            })?;
        let file_name = match &request.asset_name {
            Some(template) => render_asset_name(template, &request.tag, version),
            None => default_name,
        };

        let content_type = if is_zip(&request.asset_path) {
            let summary = inspect_zip(&data)?;
            tracing::info!(
                "Asset {}: {} entries, {} bytes uncompressed",
                path,
                summary.entries,
                summary.uncompressed_bytes
            );
            ZIP_CONTENT_TYPE
        } else {
            OCTET_STREAM
        };

        Ok(ReleaseAsset {
            file_name,
            content_type: content_type.to_string(),
            data,
        })
    }
}

pub fn render_asset_name(template: &str, tag: &str, version: &str) -> String {
    template.replace("{tag}", tag).replace("{version}", version)
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}
