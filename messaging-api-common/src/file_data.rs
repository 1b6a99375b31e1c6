// messaging-api-common/src/file_data.rs
use std::path::Path;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Binary upload content, passed to the transport as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: String,
}

impl FileData {
    /// Wrap raw bytes with the generic binary content type
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// Read a file, guessing the content type from its extension
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from);
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        Ok(Self {
            bytes,
            filename,
            content_type,
        })
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        if self.content_type == DEFAULT_CONTENT_TYPE {
            if let Some(guess) = mime_guess::from_path(&filename).first_raw() {
                self.content_type = guess.to_string();
            }
        }
        self.filename = Some(filename);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_defaults() {
        let data = FileData::from_bytes(b"hello".to_vec());
        assert_eq!(data.len(), 5);
        assert_eq!(data.content_type, "application/octet-stream");
        assert!(data.filename.is_none());
    }

    #[test]
    fn test_with_filename_guesses_content_type() {
        let data = FileData::from_bytes(vec![0u8; 4]).with_filename("cat.png");
        assert_eq!(data.filename.as_deref(), Some("cat.png"));
        assert_eq!(data.content_type, "image/png");
    }

    #[test]
    fn test_explicit_content_type_is_kept() {
        let data = FileData::from_bytes(vec![1, 2])
            .with_content_type("audio/mpeg")
            .with_filename("clip.png");
        assert_eq!(data.content_type, "audio/mpeg");
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let path = std::env::temp_dir().join("messaging-api-common-file-data.txt");
        tokio::fs::write(&path, b"payload").await.unwrap();

        let data = FileData::from_path(&path).await.unwrap();
        assert_eq!(data.bytes, b"payload");
        assert_eq!(
            data.filename.as_deref(),
            Some("messaging-api-common-file-data.txt")
        );
        assert_eq!(data.content_type, "text/plain");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let path = std::env::temp_dir().join("messaging-api-common-does-not-exist.bin");
        assert!(FileData::from_path(&path).await.is_err());
    }
}
