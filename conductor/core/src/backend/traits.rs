//! Classifier Backend Traits
//!
//! Trait definition for sentiment classifiers. The analysis controller only
//! talks to this trait, so the HTTP endpoint can be swapped for an in-process
//! mock in tests or for another provider.

use async_trait::async_trait;

use crate::analysis::AnalysisError;
use crate::sentiment::AnalysisResult;

/// Sentiment classifier trait
///
/// One call is one network attempt; implementations must not retry.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Backend name for logs (e.g., "HTTP")
    fn name(&self) -> &str;

    /// Classify a piece of text
    async fn classify(&self, text: &str) -> Result<AnalysisResult, AnalysisError>;
}

#[async_trait]
impl<C: Classifier + ?Sized> Classifier for std::sync::Arc<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn classify(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        (**self).classify(text).await
    }
}
