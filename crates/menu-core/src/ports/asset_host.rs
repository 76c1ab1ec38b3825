//! Asset host trait (port)

use async_trait::async_trait;

use crate::error::DomainError;

/// A binary asset on its way to the asset host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl AssetUpload {
    pub fn new(file_name: &str, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.map(str::to_string),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Stores a blob and returns its durable URL. Failures surface as
/// [`DomainError::UploadError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetHost: Send + Sync {
    async fn upload(&self, asset: AssetUpload) -> Result<String, DomainError>;
}
