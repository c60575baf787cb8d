//! Edit provider trait.

use crate::error::Result;
use crate::image::types::{EditProviderKind, EditRequest};
use async_trait::async_trait;

/// Trait for remote image editing services.
///
/// A provider is called once per submission and never retried by the session.
#[async_trait]
pub trait EditProvider: Send + Sync {
    /// Edits the image in `request` according to its prompt.
    ///
    /// Returns the edited image as base64, or `None` when the service answered
    /// successfully but produced no image.
    async fn edit(&self, request: &EditRequest) -> Result<Option<String>>;

    /// Returns the kind of this provider.
    fn kind(&self) -> EditProviderKind;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str {
        match self.kind() {
            EditProviderKind::Gemini => "Gemini (Google)",
            EditProviderKind::Custom => "custom",
        }
    }

    /// Checks if the provider is reachable and authenticated.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<P: EditProvider + ?Sized> EditProvider for std::sync::Arc<P> {
    async fn edit(&self, request: &EditRequest) -> Result<Option<String>> {
        (**self).edit(request).await
    }

    fn kind(&self) -> EditProviderKind {
        (**self).kind()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn health_check(&self) -> Result<()> {
        (**self).health_check().await
    }
}
