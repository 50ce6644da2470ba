use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {}", fields.join(", "))]
    MissingConfigError { fields: Vec<String> },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{url} responded with HTTP {status}: {body}")]
    HttpStatusError {
        url: String,
        status: u16,
        body: String,
    },

    #[error("No release description found for version {version} in {changelog}")]
    MissingReleaseNotesError { version: String, changelog: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    FileSystem,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReleaseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ApiError(_) | Self::HttpStatusError { .. } => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::FileSystem,
            Self::ZipError(_)
            | Self::SerializationError(_)
            | Self::MissingReleaseNotesError { .. }
            | Self::ProcessingError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 5xx and transport failures may go away on a re-run of the job
            Self::ApiError(e) if e.is_timeout() || e.is_connect() => ErrorSeverity::Medium,
            Self::HttpStatusError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            Self::ApiError(_) | Self::HttpStatusError { .. } => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::MissingReleaseNotesError { .. }
            | Self::ZipError(_)
            | Self::SerializationError(_)
            | Self::ProcessingError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingConfigError { fields } => format!(
                "Export {} in the CI job, or provide them through --config",
                fields.join(", ")
            ),
            Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of {} and retry", field)
            }
            Self::ConfigError { .. } => "Check the syntax of the configuration file".to_string(),
            Self::HttpStatusError { status: 401, .. }
            | Self::HttpStatusError { status: 403, .. } => {
                "Check that the access token is valid and allowed to create releases".to_string()
            }
            Self::HttpStatusError { status: 409, .. }
            | Self::HttpStatusError { status: 422, .. } => {
                "A release for this tag may already exist; delete it or use another tag".to_string()
            }
            Self::HttpStatusError { .. } | Self::ApiError(_) => {
                "Check the API URL and network access, then re-run the job".to_string()
            }
            Self::MissingReleaseNotesError { version, .. } => format!(
                "Add a '# {}' section to the changelog, or pass --allow-empty-notes",
                version
            ),
            Self::ZipError(_) => "Rebuild the artifact; the zip archive is unreadable".to_string(),
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::SerializationError(_) | Self::ProcessingError { .. } => {
                "Re-run with --verbose and inspect the logs".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingConfigError { fields } => {
                format!("Missing required settings: {}", fields.join(", "))
            }
            Self::MissingReleaseNotesError { version, changelog } => format!(
                "No release notes for version {} in {}, refusing to publish an empty release",
                version, changelog
            ),
            Self::HttpStatusError { status, url, .. } => {
                format!("Release API rejected the request ({} from {})", status, url)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReleaseError>;
