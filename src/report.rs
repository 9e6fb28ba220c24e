// 🧾 Uploaded health report
// Only accepted and echoed back. The image content is never inspected.

use crate::error::{HealthError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedReport {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}

impl UploadedReport {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(HealthError::UnsupportedReport {
                path: path.to_path_buf(),
                reason: format!("expected one of {}", ACCEPTED_EXTENSIONS.join(", ")),
            });
        }

        let metadata = std::fs::metadata(path).map_err(|e| HealthError::UnsupportedReport {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if !metadata.is_file() {
            return Err(HealthError::UnsupportedReport {
                path: path.to_path_buf(),
                reason: "not a file".to_string(),
            });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!(file = %file_name, bytes = metadata.len(), "report accepted");

        Ok(UploadedReport {
            path: path.to_path_buf(),
            file_name,
            size_bytes: metadata.len(),
        })
    }

    pub fn caption(&self) -> String {
        format!("Uploaded Report: {} ({} bytes)", self.file_name, self.size_bytes)
    }
}
