use crate::utils::error::{ReleaseError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_repository_slug, validate_token, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const GITHUB_TOKEN_VAR: &str = "K8S_SECRET_GITHUB_ACCESS_TOKEN";
pub const GITHUB_REPOSITORY_VAR: &str = "GITHUB_MIRROR";
pub const GITHUB_API_URL_VAR: &str = "GITHUB_API_URL";

pub const GITLAB_TOKEN_VAR: &str = "GITLAB_API_TOKEN";
pub const GITLAB_API_URL_VAR: &str = "CI_API_V4_URL";
pub const GITLAB_SERVER_URL_VAR: &str = "CI_SERVER_URL";
pub const GITLAB_PROJECT_ID_VAR: &str = "CI_PROJECT_ID";
pub const GITLAB_REF_NAME_VAR: &str = "CI_COMMIT_REF_NAME";

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_CHANGELOG: &str = "CHANGELOG.md";

fn default_github_api_url() -> String {
    DEFAULT_GITHUB_API_URL.to_string()
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GithubSettings {
    pub token: String,
    /// `owner/name` of the repository receiving the release.
    pub repository: String,
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitlabSettings {
    pub token: String,
    pub api_v4_url: String,
    pub server_url: String,
    pub project_id: String,
    /// Tag being released when none is given on the command line.
    pub ref_name: Option<String>,
}

// Hand-written so tokens never reach the logs through `{:?}`.
impl std::fmt::Debug for GithubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubSettings")
            .field("token", &"<redacted>")
            .field("repository", &self.repository)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl std::fmt::Debug for GitlabSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitlabSettings")
            .field("token", &"<redacted>")
            .field("api_v4_url", &self.api_v4_url)
            .field("server_url", &self.server_url)
            .field("project_id", &self.project_id)
            .field("ref_name", &self.ref_name)
            .finish()
    }
}

/// Collects every missing variable so they are reported in one error.
struct EnvReader<F> {
    lookup: F,
    missing: Vec<String>,
}

impl<F: Fn(&str) -> Option<String>> EnvReader<F> {
    fn new(lookup: F) -> Self {
        Self {
            lookup,
            missing: Vec::new(),
        }
    }

    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&mut self, name: &str) -> String {
        self.optional(name).unwrap_or_else(|| {
            self.missing.push(name.to_string());
            String::new()
        })
    }

    fn finish<T>(self, value: T) -> Result<T> {
        if self.missing.is_empty() {
            Ok(value)
        } else {
            Err(ReleaseError::MissingConfigError {
                fields: self.missing,
            })
        }
    }
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl GithubSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let mut env = EnvReader::new(lookup);
        let settings = Self {
            token: env.required(GITHUB_TOKEN_VAR),
            repository: env.required(GITHUB_REPOSITORY_VAR),
            api_url: env
                .optional(GITHUB_API_URL_VAR)
                .unwrap_or_else(default_github_api_url),
        };
        env.finish(settings)
    }
}

impl GitlabSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let mut env = EnvReader::new(lookup);
        let settings = Self {
            token: env.required(GITLAB_TOKEN_VAR),
            api_v4_url: env.required(GITLAB_API_URL_VAR),
            server_url: env.required(GITLAB_SERVER_URL_VAR),
            project_id: env.required(GITLAB_PROJECT_ID_VAR),
            ref_name: env.optional(GITLAB_REF_NAME_VAR),
        };
        env.finish(settings)
    }
}

impl Validate for GithubSettings {
    fn validate(&self) -> Result<()> {
        validate_token("github.token", &self.token)?;
        validate_repository_slug("github.repository", &self.repository)?;
        validate_url("github.api_url", &self.api_url)?;
        Ok(())
    }
}

impl Validate for GitlabSettings {
    fn validate(&self) -> Result<()> {
        validate_token("gitlab.token", &self.token)?;
        validate_url("gitlab.api_v4_url", &self.api_v4_url)?;
        validate_url("gitlab.server_url", &self.server_url)?;
        validate_non_empty_string("gitlab.project_id", &self.project_id)?;
        Ok(())
    }
}

/// Optional `release.toml`, an alternative to configuring through the CI
/// environment.
///
/// ```toml
/// changelog = "docs/CHANGELOG.md"
///
/// [gitlab]
/// token = "${GITLAB_API_TOKEN}"
/// api_v4_url = "https://gitlab.example.com/api/v4"
/// server_url = "https://gitlab.example.com"
/// project_id = "42"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseConfig {
    pub changelog: Option<String>,
    pub github: Option<GithubSettings>,
    pub gitlab: Option<GitlabSettings>,
}

impl ReleaseConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, process_env)
    }

    pub fn from_toml_str_with<F: Fn(&str) -> Option<String>>(
        content: &str,
        lookup: F,
    ) -> Result<Self> {
        let processed_content = substitute_env_vars(content, lookup)?;

        toml::from_str(&processed_content).map_err(|e| ReleaseError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn changelog_path(&self) -> &str {
        self.changelog.as_deref().unwrap_or(DEFAULT_CHANGELOG)
    }

    /// `--changelog` wins over the file's `changelog`, which wins over the default.
    pub fn resolve_changelog(cli_changelog: Option<&str>, file_config: Option<&Self>) -> String {
        match (cli_changelog, file_config) {
            (Some(path), _) => path.to_string(),
            (None, Some(config)) => config.changelog_path().to_string(),
            (None, None) => DEFAULT_CHANGELOG.to_string(),
        }
    }

    pub fn github_settings(&self) -> Result<GithubSettings> {
        self.github
            .clone()
            .ok_or_else(|| ReleaseError::MissingConfigError {
                fields: vec!["[github]".to_string()],
            })
    }

    pub fn gitlab_settings(&self) -> Result<GitlabSettings> {
        self.gitlab
            .clone()
            .ok_or_else(|| ReleaseError::MissingConfigError {
                fields: vec!["[gitlab]".to_string()],
            })
    }
}

/// Replaces `${VAR}` placeholders; unknown variables are left untouched.
fn substitute_env_vars<F: Fn(&str) -> Option<String>>(content: &str, lookup: F) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReleaseError::ConfigError {
        message: e.to_string(),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}
