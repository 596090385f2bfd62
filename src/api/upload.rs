use std::path::Path;

use reqwest::multipart::Part;

use crate::error::ApiError;

/// A file to send with the multipart profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl Upload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            mime: None,
        }
    }

    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Reads a file from disk, guessing the MIME type from the extension.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            ApiError::validation("file", format!("Failed to read {}: {err}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = guess_mime(&file_name).map(str::to_string);

        Ok(Self {
            file_name,
            bytes,
            mime,
        })
    }

    pub(crate) fn into_part(self) -> Result<Part, ApiError> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match self.mime {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|err| ApiError::validation("file", format!("invalid MIME type {mime}: {err}"))),
            None => Ok(part),
        }
    }
}

fn guess_mime(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn guess_mime_by_extension() {
        assert_eq!(guess_mime("results.PDF"), Some("application/pdf"));
        assert_eq!(guess_mime("chapter-1.jpeg"), Some("image/jpeg"));
        assert_eq!(guess_mime("notes.txt"), None);
        assert_eq!(guess_mime("noext"), None);
    }

    #[tokio::test]
    async fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let upload = Upload::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, "scan.png");
        assert_eq!(upload.mime.as_deref(), Some("image/png"));
        assert_eq!(upload.bytes.len(), 4);
    }

    #[tokio::test]
    async fn from_path_missing_file() {
        let err = Upload::from_path("/definitely/not/here.pdf").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "file", .. }));
    }
}
