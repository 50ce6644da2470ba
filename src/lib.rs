pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{GithubSettings, GitlabSettings, LocalStorage, ReleaseConfig};

pub use adapters::{github::GithubReleaseHost, gitlab::GitlabReleaseHost};
pub use crate::core::changelog::{
    extract_release_description, load_release_description, normalize_version,
};
pub use crate::core::workflow::{ReleaseWorkflow, WorkflowOptions};
pub use utils::error::{ReleaseError, Result};
