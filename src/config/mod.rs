#[cfg(feature = "cli")]
pub mod cli;
pub mod release_config;
pub mod storage;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, PublishArgs};
pub use release_config::{GithubSettings, GitlabSettings, ReleaseConfig};
pub use storage::LocalStorage;
