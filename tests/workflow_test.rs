mod common;

use async_trait::async_trait;
use changelog_release::core::{
    AssetPlacement, PublishedRelease, ReleaseAsset, ReleaseDraft, ReleaseHost, ReleaseRequest,
    UploadedAsset,
};
use changelog_release::{LocalStorage, ReleaseError, ReleaseWorkflow, Result, WorkflowOptions};
use common::{build_zip, write_workspace, CHANGELOG};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Host double that records every call instead of talking to an API.
#[derive(Clone)]
struct RecordingHost {
    placement: AssetPlacement,
    calls: Arc<Mutex<Vec<String>>>,
    drafts: Arc<Mutex<Vec<ReleaseDraft>>>,
}

impl RecordingHost {
    fn new(placement: AssetPlacement) -> Self {
        Self {
            placement,
            calls: Arc::new(Mutex::new(Vec::new())),
            drafts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn drafts(&self) -> Vec<ReleaseDraft> {
        self.drafts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReleaseHost for RecordingHost {
    fn name(&self) -> &'static str {
        "Recording"
    }

    fn asset_placement(&self) -> AssetPlacement {
        self.placement
    }

    async fn upload_asset(
        &self,
        asset: &ReleaseAsset,
        release: Option<&PublishedRelease>,
    ) -> Result<UploadedAsset> {
        self.calls.lock().unwrap().push(format!(
            "upload:{}:{}:{}",
            asset.file_name,
            asset.content_type,
            release.is_some()
        ));
        Ok(UploadedAsset {
            name: asset.file_name.clone(),
            url: format!("https://files.example.com/{}", asset.file_name),
            markdown: None,
        })
    }

    async fn create_release(&self, draft: &ReleaseDraft) -> Result<PublishedRelease> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create:{}", draft.tag_name));
        self.drafts.lock().unwrap().push(draft.clone());
        Ok(PublishedRelease {
            tag_name: draft.tag_name.clone(),
            name: draft.name.clone(),
            url: Some(format!("https://example.com/releases/{}", draft.tag_name)),
            upload_url: Some("https://uploads.example.com/releases/1/assets".to_string()),
            created_at: None,
            assets: Vec::new(),
        })
    }
}

fn request(tag: &str) -> ReleaseRequest {
    ReleaseRequest {
        tag: tag.to_string(),
        name: None,
        asset_path: PathBuf::from("build/app.zip"),
        asset_name: None,
        changelog_path: "CHANGELOG.md".to_string(),
    }
}

fn workspace(changelog: &str) -> (TempDir, LocalStorage) {
    let temp_dir = TempDir::new().unwrap();
    write_workspace(
        temp_dir.path(),
        changelog,
        "app.zip",
        &build_zip(&[("app.exe", "MZ")]),
    );
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    (temp_dir, storage)
}

#[tokio::test]
async fn test_linked_host_uploads_before_creating_release() {
    let (_dir, storage) = workspace(CHANGELOG);
    let host = RecordingHost::new(AssetPlacement::LinkedFromRelease);

    let mut request = request("v1.2.0");
    request.asset_name = Some("VRtist_Win64_{tag}.zip".to_string());

    let workflow = ReleaseWorkflow::new(host.clone(), storage, WorkflowOptions::default());
    let release = workflow.run(&request).await.unwrap();

    assert_eq!(
        host.calls(),
        vec![
            "upload:VRtist_Win64_v1.2.0.zip:application/zip:false",
            "create:v1.2.0"
        ]
    );

    let drafts = host.drafts();
    assert_eq!(drafts[0].name, "Version 1.2.0");
    assert_eq!(drafts[0].description, "Line A\nLine B\n");
    assert_eq!(drafts[0].asset_links.len(), 1);
    assert_eq!(
        drafts[0].asset_links[0].url,
        "https://files.example.com/VRtist_Win64_v1.2.0.zip"
    );
    assert_eq!(drafts[0].asset_links[0].link_type, "other");

    assert_eq!(release.assets.len(), 1);
    assert_eq!(release.assets[0].name, "VRtist_Win64_v1.2.0.zip");
}

#[tokio::test]
async fn test_attached_host_creates_release_before_upload() {
    let (_dir, storage) = workspace(CHANGELOG);
    let host = RecordingHost::new(AssetPlacement::AttachedToRelease);

    let mut request = request("1.1.0");
    request.name = Some("VRtist 1.1.0".to_string());

    let workflow = ReleaseWorkflow::new(host.clone(), storage, WorkflowOptions::default());
    let release = workflow.run(&request).await.unwrap();

    assert_eq!(
        host.calls(),
        vec!["create:1.1.0", "upload:app.zip:application/zip:true"]
    );
    let drafts = host.drafts();
    assert_eq!(drafts[0].name, "VRtist 1.1.0");
    assert_eq!(drafts[0].description, "Line C\n");
    assert!(drafts[0].asset_links.is_empty());

    assert_eq!(release.assets.len(), 1);
    assert_eq!(release.assets[0].url, "https://files.example.com/app.zip");
}

#[tokio::test]
async fn test_tag_strips_exactly_one_leading_v() {
    let (_dir, storage) = workspace("# v1.0\nprefixed\n# 1.0\nplain\n");
    let host = RecordingHost::new(AssetPlacement::LinkedFromRelease);

    let workflow = ReleaseWorkflow::new(host.clone(), storage, WorkflowOptions::default());
    workflow.run(&request("vv1.0")).await.unwrap();

    let drafts = host.drafts();
    assert_eq!(drafts[0].description, "prefixed\n");
    assert_eq!(drafts[0].name, "Version v1.0");
    assert_eq!(drafts[0].tag_name, "vv1.0");
}

#[tokio::test]
async fn test_missing_notes_abort_before_any_host_call() {
    let (_dir, storage) = workspace(CHANGELOG);
    let host = RecordingHost::new(AssetPlacement::LinkedFromRelease);

    let workflow = ReleaseWorkflow::new(host.clone(), storage, WorkflowOptions::default());
    let result = workflow.run(&request("v9.9.9")).await;

    match result {
        Err(ReleaseError::MissingReleaseNotesError { version, changelog }) => {
            assert_eq!(version, "9.9.9");
            assert_eq!(changelog, "CHANGELOG.md");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_whitespace_only_notes_count_as_missing() {
    let (_dir, storage) = workspace("# 2.0\n\n   \n# 1.0\nold\n");
    let host = RecordingHost::new(AssetPlacement::LinkedFromRelease);

    let workflow = ReleaseWorkflow::new(host.clone(), storage, WorkflowOptions::default());
    let result = workflow.run(&request("v2.0")).await;

    assert!(matches!(
        result,
        Err(ReleaseError::MissingReleaseNotesError { .. })
    ));
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_allow_empty_notes_publishes_anyway() {
    let (_dir, storage) = workspace(CHANGELOG);
    let host = RecordingHost::new(AssetPlacement::LinkedFromRelease);
    let options = WorkflowOptions {
        allow_empty_notes: true,
        dry_run: false,
    };

    let workflow = ReleaseWorkflow::new(host.clone(), storage, options);
    workflow.run(&request("v9.9.9")).await.unwrap();

    assert_eq!(host.calls().len(), 2);
    assert_eq!(host.drafts()[0].description, "");
}

#[tokio::test]
async fn test_dry_run_never_calls_host() {
    let (_dir, storage) = workspace(CHANGELOG);
    let host = RecordingHost::new(AssetPlacement::AttachedToRelease);
    let options = WorkflowOptions {
        allow_empty_notes: false,
        dry_run: true,
    };

    let workflow = ReleaseWorkflow::new(host.clone(), storage, options);
    let release = workflow.run(&request("v1.2.0")).await.unwrap();

    assert!(host.calls().is_empty());
    assert_eq!(release.name, "Version 1.2.0");
    assert_eq!(release.tag_name, "v1.2.0");
    assert!(release.url.is_none());
}

#[tokio::test]
async fn test_corrupt_zip_is_rejected_before_upload() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace(temp_dir.path(), CHANGELOG, "app.zip", b"not a zip at all");
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let host = RecordingHost::new(AssetPlacement::LinkedFromRelease);

    let workflow = ReleaseWorkflow::new(host.clone(), storage, WorkflowOptions::default());
    let result = workflow.run(&request("v1.2.0")).await;

    assert!(matches!(result, Err(ReleaseError::ZipError(_))));
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_missing_changelog_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let host = RecordingHost::new(AssetPlacement::LinkedFromRelease);

    let workflow = ReleaseWorkflow::new(host.clone(), storage, WorkflowOptions::default());
    let result = workflow.run(&request("v1.2.0")).await;

    assert!(matches!(result, Err(ReleaseError::IoError(_))));
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_non_zip_asset_is_uploaded_as_octet_stream() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace(temp_dir.path(), CHANGELOG, "app.tar.gz", b"\x1f\x8b raw bytes");
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let host = RecordingHost::new(AssetPlacement::LinkedFromRelease);

    let mut request = request("v1.2.0");
    request.asset_path = PathBuf::from("build/app.tar.gz");

    let workflow = ReleaseWorkflow::new(host.clone(), storage, WorkflowOptions::default());
    workflow.run(&request).await.unwrap();

    assert_eq!(
        host.calls()[0],
        "upload:app.tar.gz:application/octet-stream:false"
    );
}
