use async_trait::async_trait;
use tagsum_core::model::AiProcessingResult;

use crate::error::ExtractError;

/// A source of transaction metadata.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short identifier used in logs and CLI output.
    fn name(&self) -> &str;

    async fn extract(&self, description: &str) -> Result<AiProcessingResult, ExtractError>;
}
