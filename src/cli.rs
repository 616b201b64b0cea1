use crate::config::Config;
use crate::context::{ContextInfo, ContextProvider, EnvContextProvider, StaticContextProvider};
use clap::Parser;
use std::path::PathBuf;

/// QuickCal - turn text with a date into a prefilled Google Calendar event
#[derive(Debug, Parser)]
#[command(name = "quickcal")]
#[command(about = "Turn text with a date into a Google Calendar event link", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Event text, e.g. `ミーティング 2025/03/10 14:30` (prompts when omitted)
    pub text: Vec<String>,

    /// Title of the page the event refers to
    #[arg(long, env = "QUICKCAL_CONTEXT_TITLE")]
    pub title: Option<String>,

    /// URL of the page the event refers to
    #[arg(long, env = "QUICKCAL_CONTEXT_URL")]
    pub url: Option<String>,

    /// Print the link without opening a browser
    #[arg(long = "no-open")]
    pub no_open: bool,

    /// Also print the extracted text and time range
    #[arg(long)]
    pub inspect: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// Flags first, then environment, then the config file
    pub fn context_provider(&self, config: &Config) -> Box<dyn ContextProvider> {
        let title = self.title.clone().or_else(|| config.context.title.clone());
        let url = self.url.clone().or_else(|| config.context.url.clone());

        if title.is_none() && url.is_none() {
            return Box::new(EnvContextProvider);
        }

        Box::new(StaticContextProvider::new(ContextInfo::new(
            title.unwrap_or_default(),
            url.unwrap_or_default(),
        )))
    }

    pub fn should_open(&self) -> bool {
        !self.no_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::details_message;

    #[test]
    fn test_parse_text_and_flags() {
        let cli = Cli::parse_from([
            "quickcal",
            "Standup",
            "2025/03/10",
            "09:00",
            "--title",
            "Board",
            "--no-open",
        ]);

        assert_eq!(cli.text, vec!["Standup", "2025/03/10", "09:00"]);
        assert_eq!(cli.title.as_deref(), Some("Board"));
        assert!(!cli.should_open());
        assert!(!cli.inspect);
    }

    #[tokio::test]
    async fn test_flags_override_config_context() {
        let cli = Cli::parse_from(["quickcal", "--url", "https://example.com"]);
        let mut config = Config::default();
        config.context.title = Some("Configured".to_string());
        config.context.url = Some("https://configured.example".to_string());

        let provider = cli.context_provider(&config);
        assert_eq!(details_message(provider.as_ref()).await, "Configured\nhttps://example.com");
    }
}
