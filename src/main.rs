use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use quickcal::app::Application;
use quickcal::calendar::{format_calendar_timestamp, parse_calendar_dates, query_param};
use quickcal::cli::Cli;
use quickcal::parser::utils::{join_words, sanitize_user_input};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with custom format
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {:?}", path);
    }

    let cli = Cli::parse();
    let config = cli.load_config().context("Failed to load configuration")?;
    let context = cli.context_provider(&config);
    let app = Application::new(config, context);

    if cli.text.is_empty() {
        return app.run_interactive(cli.should_open()).await;
    }

    let text = sanitize_user_input(&join_words(&cli.text));
    info!("Creating calendar event");
    let event = app.add_and_open(&text, cli.should_open()).await?;

    if cli.inspect {
        println!("text:    {:?}", event.extraction.text_without_date);
        println!("start:   {}", timestamp(event.extraction.start_date_time()));
        println!("end:     {}", timestamp(event.extraction.end_date_time()));
        println!("details: {:?}", event.details);
        let dates = query_param(&event.url, "dates");
        if let Some(range) = dates.as_deref().and_then(parse_calendar_dates) {
            println!("length:  {} min", range.duration().num_minutes());
        }
    }
    println!("{}", event.url);

    Ok(())
}

fn timestamp(instant: Option<DateTime<Local>>) -> String {
    instant.map_or_else(|| "-".to_string(), |instant| format_calendar_timestamp(&instant))
}
