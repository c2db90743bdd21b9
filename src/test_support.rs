//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

/// A provider that always returns the same response text.
pub struct CannedProvider {
    response: String,
}

impl CannedProvider {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        Ok(self.response.clone())
    }
}

/// A provider that always fails with the error built by `make`.
pub struct FailingProvider {
    make: fn() -> ProviderError,
}

impl FailingProvider {
    pub fn new(make: fn() -> ProviderError) -> Self {
        Self { make }
    }
}

#[async_trait]
impl CompletionProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        Err((self.make)())
    }
}
