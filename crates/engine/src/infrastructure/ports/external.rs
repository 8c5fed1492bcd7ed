//! External service ports.

use async_trait::async_trait;
use traitmint_domain::CharacterMetadata;

use super::error::AssetPipelineError;

/// Renders artwork for a freshly minted character and returns its URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetPipelinePort: Send + Sync {
    async fn render(&self, record: &CharacterMetadata) -> Result<String, AssetPipelineError>;
}
