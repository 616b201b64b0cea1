use crate::calendar::create_google_calendar_url_for;
use crate::config::Config;
use crate::context::{ContextProvider, details_message};
use crate::error::{QuickCalError, Result};
use crate::opener::open_url;
use crate::parser::utils::{has_event_text, sanitize_user_input};
use crate::parser::{ExtractionResult, extract_date_time_with_duration};
use log::{debug, error, info};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use url::Url;

/// Everything produced for one event
#[derive(Debug, Clone)]
pub struct CreatedEvent {
    pub extraction: ExtractionResult,
    pub details: String,
    pub url: Url,
}

pub struct Application {
    config: Config,
    context: Box<dyn ContextProvider>,
}

impl Application {
    pub fn new(config: Config, context: Box<dyn ContextProvider>) -> Self {
        Self { config, context }
    }

    /// Extract the date, look up the context and build the calendar link
    pub async fn add_event(&self, text: &str) -> Result<CreatedEvent> {
        if !has_event_text(text) {
            return Err(QuickCalError::EmptyEventText);
        }

        debug!("Creating event from text: '{}'", text);
        let extraction =
            extract_date_time_with_duration(text, self.config.calendar.event_duration());
        debug!("Extracted: {:?}", extraction);

        let details = details_message(self.context.as_ref()).await;
        let url = create_google_calendar_url_for(&extraction, &details);
        info!("Calendar URL: {}", url);

        Ok(CreatedEvent { extraction, details, url })
    }

    /// [`Application::add_event`], then open the link if configured to
    pub async fn add_and_open(&self, text: &str, open: bool) -> Result<CreatedEvent> {
        let event = self.add_event(text).await?;
        if open && self.config.browser.open_after_create {
            open_url(&event.url, self.config.browser.open_command.as_deref())?;
        }
        Ok(event)
    }

    /// Prompt for event text until Ctrl-C / Ctrl-D
    pub async fn run_interactive(&self, open: bool) -> anyhow::Result<()> {
        info!("Starting QuickCal prompt");
        let mut rl = DefaultEditor::new()?;

        println!("Type an event, e.g. ミーティング 2025/03/10 14:30");
        let prompt = "📅 ";

        loop {
            match rl.readline(prompt) {
                Ok(line) => {
                    let line = sanitize_user_input(&line);
                    let _ = rl.add_history_entry(line.as_str());
                    match self.add_and_open(&line, open).await {
                        Ok(event) => println!("{}", event.url),
                        Err(QuickCalError::EmptyEventText) => {
                            println!("{}", QuickCalError::EmptyEventText)
                        }
                        Err(err) => error!("Failed to create event: {}", err),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::query_param;
    use crate::context::{CONTEXT_ERROR_MESSAGE, ContextInfo, StaticContextProvider};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider(Arc<AtomicUsize>);

    #[async_trait]
    impl ContextProvider for CountingProvider {
        async fn active_context(&self) -> Result<ContextInfo> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(QuickCalError::ContextUnavailable("no browser".to_string()))
        }
    }

    fn app_with_context(title: &str, url: &str) -> Application {
        let provider = StaticContextProvider::new(ContextInfo::new(title, url));
        Application::new(Config::default(), Box::new(provider))
    }

    #[tokio::test]
    async fn test_add_event_with_date() {
        let app = app_with_context("Test Page", "https://example.com/test");
        let event = app.add_event("テスト会議 2025/03/10 14:30").await.unwrap();

        assert_eq!(event.extraction.text_without_date, "テスト会議 ");
        assert_eq!(event.details, "Test Page\nhttps://example.com/test");
        assert_eq!(
            query_param(&event.url, "dates").as_deref(),
            Some("20250310T143000/20250310T153000")
        );
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_before_lookup() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = Application::new(Config::default(), Box::new(CountingProvider(calls.clone())));

        let err = app.add_event("   \n").await.unwrap_err();
        assert!(matches!(err, QuickCalError::EmptyEventText));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_context_failure_uses_fallback_details() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = Application::new(Config::default(), Box::new(CountingProvider(calls.clone())));

        let event = app.add_event("単純なタスク").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(event.details, CONTEXT_ERROR_MESSAGE);
        assert_eq!(query_param(&event.url, "dates"), None);
    }

    #[tokio::test]
    async fn test_configured_duration() {
        let mut config = Config::default();
        config.calendar.default_duration_minutes = 90;
        let app = Application::new(config, Box::new(StaticContextProvider::default()));

        let event = app.add_event("Review 2025/03/10 14:30").await.unwrap();
        assert_eq!(
            query_param(&event.url, "dates").as_deref(),
            Some("20250310T143000/20250310T160000")
        );
    }

    #[tokio::test]
    async fn test_oversized_configured_duration_uses_default() {
        let mut config = Config::default();
        config.calendar.default_duration_minutes = 1_000_000_000_000;
        let app = Application::new(config, Box::new(StaticContextProvider::default()));

        let event = app.add_event("Review 2025/03/10 14:30").await.unwrap();
        assert_eq!(event.extraction.text_without_date, "Review ");
        assert_eq!(
            query_param(&event.url, "dates").as_deref(),
            Some("20250310T143000/20250310T153000")
        );
    }

    #[tokio::test]
    async fn test_add_and_open_skips_opener_when_disabled() {
        let mut config = Config::default();
        config.browser.open_command = Some("quickcal-no-such-opener".to_string());
        let app = Application::new(config, Box::new(StaticContextProvider::default()));

        assert!(app.add_and_open("a 2025/03/10 14:30", false).await.is_ok());
        assert!(matches!(
            app.add_and_open("a 2025/03/10 14:30", true).await,
            Err(QuickCalError::OpenFailed { .. })
        ));
    }
}
