//! Filename and identifier validation.

use super::ALLOWED_EXTENSIONS;
use crate::{Result, VaultError};

/// Lowercased substring after the last `.` of `filename`, or an empty string.
pub fn extension_of(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Check a submitted filename against the allow-list.
///
/// Returns the lowercased extension on success. Empty names are
/// `InvalidInput`; names without a `.` or with a disallowed extension are
/// `InvalidFileType`.
pub fn validate_and_normalize(filename: &str) -> Result<String> {
    if filename.trim().is_empty() {
        return Err(VaultError::InvalidInput("no file selected".to_string()));
    }

    let Some((_, ext)) = filename.rsplit_once('.') else {
        return Err(VaultError::InvalidFileType(filename.to_string()));
    };

    let ext = ext.to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(VaultError::InvalidFileType(filename.to_string()));
    }

    Ok(ext)
}

/// Whether `identifier` names a single entry directly inside the storage
/// directory.
pub fn is_plain_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier != "."
        && identifier != ".."
        && !identifier.contains(['/', '\\', '\0'])
}
