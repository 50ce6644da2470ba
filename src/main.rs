use changelog_release::config::release_config::GITLAB_REF_NAME_VAR;
use changelog_release::config::{CliConfig, Command, PublishArgs};
use changelog_release::core::{ReleaseHost, ReleaseRequest};
use changelog_release::utils::error::ErrorSeverity;
use changelog_release::utils::{logger, validation::Validate};
use changelog_release::{
    load_release_description, GithubReleaseHost, GithubSettings, GitlabReleaseHost,
    GitlabSettings, LocalStorage, ReleaseConfig, ReleaseError, ReleaseWorkflow, Result,
    WorkflowOptions,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Release failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: CliConfig) -> Result<()> {
    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("Loading settings from {}", path.display());
            Some(ReleaseConfig::from_file(path)?)
        }
        None => None,
    };

    let changelog =
        ReleaseConfig::resolve_changelog(config.changelog.as_deref(), file_config.as_ref());
    let storage = LocalStorage::current_dir();

    match config.command {
        Command::Notes { version } => {
            let notes = load_release_description(&storage, &changelog, &version).await?;
            if notes.is_empty() {
                tracing::warn!(
                    "No release description for version {} in {}",
                    version,
                    changelog
                );
            }
            print!("{}", notes);
        }
        Command::Github {
            tag,
            name,
            zip,
            publish,
        } => {
            let settings = match &file_config {
                Some(file) => file.github_settings()?,
                None => GithubSettings::from_env()?,
            };
            settings.validate()?;

            let request = ReleaseRequest {
                tag,
                name: Some(name),
                asset_path: zip,
                asset_name: publish.asset_name.clone(),
                changelog_path: changelog,
            };
            let host = GithubReleaseHost::new(settings)?;
            publish_release(host, storage, &request, &publish).await?;
        }
        Command::Gitlab {
            zip_file,
            tag,
            name,
            publish,
        } => {
            let settings = match &file_config {
                Some(file) => file.gitlab_settings()?,
                None => GitlabSettings::from_env()?,
            };
            settings.validate()?;

            let tag = tag.or_else(|| settings.ref_name.clone()).ok_or_else(|| {
                ReleaseError::MissingConfigError {
                    fields: vec![GITLAB_REF_NAME_VAR.to_string()],
                }
            })?;

            let request = ReleaseRequest {
                tag,
                name,
                asset_path: zip_file,
                asset_name: publish.asset_name.clone(),
                changelog_path: changelog,
            };
            let host = GitlabReleaseHost::new(settings)?;
            publish_release(host, storage, &request, &publish).await?;
        }
    }

    Ok(())
}

async fn publish_release<H: ReleaseHost>(
    host: H,
    storage: LocalStorage,
    request: &ReleaseRequest,
    publish: &PublishArgs,
) -> Result<()> {
    let options = WorkflowOptions {
        allow_empty_notes: publish.allow_empty_notes,
        dry_run: publish.dry_run,
    };
    let workflow = ReleaseWorkflow::new(host, storage, options);

    let release = workflow.run(request).await?;
    if publish.dry_run {
        println!(
            "📝 Dry run: release '{}' for tag {} was not published",
            release.name, release.tag_name
        );
    } else {
        println!(
            "✅ Release '{}' published for tag {}",
            release.name, release.tag_name
        );
    }
    println!("{}", serde_json::to_string_pretty(&release)?);
    Ok(())
}
