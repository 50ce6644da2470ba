pub mod changelog;
pub mod workflow;

pub use crate::domain::model::{
    AssetLink, PublishedRelease, ReleaseAsset, ReleaseDraft, ReleaseRequest, UploadedAsset,
};
pub use crate::domain::ports::{AssetPlacement, ReleaseHost, Storage};
pub use crate::utils::error::Result;
