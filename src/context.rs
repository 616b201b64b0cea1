//! Browsing context supplied alongside the event text
//!
//! The event details body is the title and URL of whatever the user was
//! looking at when they created the event. Where that comes from is up to the
//! caller; providers here cover fixed values and environment variables.

use crate::error::{QuickCalError, Result};
use async_trait::async_trait;
use log::{debug, error};
use std::env;

pub const CONTEXT_TITLE_ENV: &str = "QUICKCAL_CONTEXT_TITLE";
pub const CONTEXT_URL_ENV: &str = "QUICKCAL_CONTEXT_URL";

/// Details body used when the context lookup fails
pub const CONTEXT_ERROR_MESSAGE: &str = "Error getting current tab info";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextInfo {
    pub title: String,
    pub url: String,
}

impl ContextInfo {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into() }
    }

    /// `<title>\n<url>` as placed in the event details
    pub fn to_details(&self) -> String {
        format!("{}\n{}", self.title, self.url)
    }
}

#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn active_context(&self) -> Result<ContextInfo>;
}

/// Context fixed up front, e.g. from CLI flags or the config file
#[derive(Debug, Clone, Default)]
pub struct StaticContextProvider {
    info: ContextInfo,
}

impl StaticContextProvider {
    pub fn new(info: ContextInfo) -> Self {
        Self { info }
    }
}

#[async_trait]
impl ContextProvider for StaticContextProvider {
    async fn active_context(&self) -> Result<ContextInfo> {
        Ok(self.info.clone())
    }
}

/// Reads `QUICKCAL_CONTEXT_TITLE` / `QUICKCAL_CONTEXT_URL`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvContextProvider;

#[async_trait]
impl ContextProvider for EnvContextProvider {
    async fn active_context(&self) -> Result<ContextInfo> {
        let title = env::var(CONTEXT_TITLE_ENV).ok();
        let url = env::var(CONTEXT_URL_ENV).ok();

        if title.is_none() && url.is_none() {
            return Err(QuickCalError::ContextUnavailable(format!(
                "neither {} nor {} is set",
                CONTEXT_TITLE_ENV, CONTEXT_URL_ENV
            )));
        }

        Ok(ContextInfo::new(title.unwrap_or_default(), url.unwrap_or_default()))
    }
}

/// Details body for the event, never failing
pub async fn details_message(provider: &dyn ContextProvider) -> String {
    match provider.active_context().await {
        Ok(info) => {
            debug!("Active context: {:?}", info);
            info.to_details()
        }
        Err(e) => {
            error!("Error getting current context: {}", e);
            CONTEXT_ERROR_MESSAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    #[async_trait]
    impl ContextProvider for FailingProvider {
        async fn active_context(&self) -> Result<ContextInfo> {
            Err(QuickCalError::ContextUnavailable("no active tab".to_string()))
        }
    }

    #[test]
    fn test_to_details() {
        let info = ContextInfo::new("Test Page", "https://example.com/test");
        assert_eq!(info.to_details(), "Test Page\nhttps://example.com/test");

        assert_eq!(ContextInfo::default().to_details(), "\n");
    }

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticContextProvider::new(ContextInfo::new("Docs", "https://docs.rs"));
        assert_eq!(details_message(&provider).await, "Docs\nhttps://docs.rs");
    }

    #[tokio::test]
    async fn test_failing_provider_falls_back() {
        assert_eq!(details_message(&FailingProvider).await, CONTEXT_ERROR_MESSAGE);
    }
}
