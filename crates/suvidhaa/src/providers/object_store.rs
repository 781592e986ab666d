//! Object store provider trait for the original uploaded bytes

use async_trait::async_trait;

use crate::error::Result;

/// How the object store should treat the uploaded bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// Opaque file (documents)
    Raw,
    /// Let the store detect image/video/raw (evidence)
    Auto,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Auto => "auto",
        }
    }
}

/// Trait for remote blob storage
///
/// Implementations:
/// - `CloudinaryStore`: Cloudinary signed upload API
#[async_trait]
pub trait ObjectStoreProvider: Send + Sync {
    /// Store `data` under `key` and return a public retrieval URL
    async fn upload(&self, key: &str, data: &[u8], resource_type: ResourceType) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
