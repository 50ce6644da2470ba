use crate::domain::model::{PublishedRelease, ReleaseAsset, ReleaseDraft, UploadedAsset};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Order in which a host expects the asset and the release to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPlacement {
    /// The file is uploaded to the project first and the release links to it.
    LinkedFromRelease,
    /// The release is created first and the file is attached to it.
    AttachedToRelease,
}

#[async_trait]
pub trait ReleaseHost: Send + Sync {
    fn name(&self) -> &'static str;

    fn asset_placement(&self) -> AssetPlacement;

    /// `release` is the freshly created release for hosts that attach assets,
    /// and `None` for hosts that upload before the release exists.
    async fn upload_asset(
        &self,
        asset: &ReleaseAsset,
        release: Option<&PublishedRelease>,
    ) -> Result<UploadedAsset>;

    async fn create_release(&self, draft: &ReleaseDraft) -> Result<PublishedRelease>;
}
