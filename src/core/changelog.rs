//! Release notes extraction from a `CHANGELOG.md`.
//!
//! The changelog is split into sections by top-level headings of the form
//! `# <version>`. The notes of a version are the lines between its heading
//! and the next line starting with `# `, kept byte for byte.

use crate::core::Storage;
use crate::utils::error::{ReleaseError, Result};

const HEADING_PREFIX: &str = "# ";

/// Strips a single leading `v` from a tag such as `v1.2.0`.
pub fn normalize_version(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// Returns the notes of `version` found in `document`, or an empty string
/// when the changelog has no section for it.
pub fn extract_release_description(version: &str, document: &str) -> String {
    extract_from_lines(version, document.split_inclusive('\n'))
}

/// Same as [`extract_release_description`] over lines that still carry
/// their terminators.
pub fn extract_from_lines<'a, I>(version: &str, lines: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let heading = format!("{}{}", HEADING_PREFIX, normalize_version(version));

    let mut description = String::new();
    let mut in_section = false;

    for line in lines {
        if !in_section {
            // Only one false -> true transition: a duplicate heading later in
            // the file ends the section below instead of restarting it.
            in_section = line.trim() == heading;
        } else if line.starts_with(HEADING_PREFIX) {
            break;
        } else {
            description.push_str(line);
        }
    }

    description
}

/// Reads the changelog at `path` through `storage` and extracts the notes of
/// `version`. An empty result is returned as-is; whether that is fatal is up
/// to the caller.
pub async fn load_release_description<S: Storage>(
    storage: &S,
    path: &str,
    version: &str,
) -> Result<String> {
    let bytes = storage.read_file(path).await?;
    let document = String::from_utf8(bytes).map_err(|e| ReleaseError::ProcessingError {
        message: format!("{} is not valid UTF-8: {}", path, e),
    })?;

    tracing::debug!(
        "Scanning {} ({} lines) for version {}",
        path,
        document.lines().count(),
        normalize_version(version)
    );

    Ok(extract_release_description(version, &document))
}
