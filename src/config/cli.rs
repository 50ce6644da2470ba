use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "changelog-release")]
#[command(about = "Publish GitHub/GitLab releases with notes taken from CHANGELOG.md")]
#[command(version)]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(
        long,
        global = true,
        help = "Read settings from a TOML file instead of the environment"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Changelog to read release notes from [default: CHANGELOG.md]"
    )]
    pub changelog: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the release notes of a version
    Notes {
        /// Version number, with or without a leading `v`
        version: String,
    },

    /// Create a GitHub release and attach a zip archive to it
    Github {
        #[arg(long, short = 't', help = "Tag name")]
        tag: String,

        #[arg(long, short = 'n', help = "Release name")]
        name: String,

        #[arg(long, short = 'z', help = "Zip path to upload")]
        zip: PathBuf,

        #[command(flatten)]
        publish: PublishArgs,
    },

    /// Upload a zip archive and create a GitLab release linking to it
    Gitlab {
        /// Path to the zip file to upload
        zip_file: PathBuf,

        #[arg(long, help = "Tag name [default: $CI_COMMIT_REF_NAME]")]
        tag: Option<String>,

        #[arg(long, help = "Release name [default: \"Version <version>\"]")]
        name: Option<String>,

        #[command(flatten)]
        publish: PublishArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct PublishArgs {
    #[arg(long, help = "Uploaded file name; {tag} and {version} are substituted")]
    pub asset_name: Option<String>,

    #[arg(long, help = "Publish even if the changelog has no notes for this version")]
    pub allow_empty_notes: bool,

    #[arg(long, help = "Log what would be published without calling the API")]
    pub dry_run: bool,
}
