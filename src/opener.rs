//! Hands a finished link to the desktop's browser.

use crate::error::{QuickCalError, Result};
use log::{debug, info};
use std::process::Command;
use url::Url;

const NO_ARGS: &[&str] = &[];
// Empty string is the window title `start` expects before the target
const WINDOWS_START_ARGS: &[&str] = &["/C", "start", ""];

/// Program and leading arguments of the platform URL opener
pub fn platform_open_command() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", NO_ARGS)
    } else if cfg!(target_os = "windows") {
        ("cmd", WINDOWS_START_ARGS)
    } else {
        ("xdg-open", NO_ARGS)
    }
}

/// Build the opener invocation without running it
pub fn open_command(url: &Url, command_override: Option<&str>) -> Command {
    let mut command = match command_override {
        Some(program) => Command::new(program),
        None => {
            let (program, args) = platform_open_command();
            let mut command = Command::new(program);
            command.args(args);
            command
        }
    };
    command.arg(url.as_str());
    command
}

/// Open `url` and wait for the opener to hand it off
pub fn open_url(url: &Url, command_override: Option<&str>) -> Result<()> {
    let mut command = open_command(url, command_override);
    let program = command.get_program().to_string_lossy().into_owned();
    debug!("Opening URL with '{}'", program);

    let open_failed = |reason: String| QuickCalError::OpenFailed {
        url: url.to_string(),
        command: program.clone(),
        reason,
    };

    let status = command.status().map_err(|e| open_failed(e.to_string()))?;
    if !status.success() {
        return Err(open_failed(format!("exited with {}", status)));
    }

    info!("Opened calendar page in browser");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_url() -> Url {
        Url::parse("https://calendar.google.com/calendar/r/eventedit?text=a").unwrap()
    }

    #[test]
    fn test_override_command_gets_url_as_only_argument() {
        let url = sample_url();
        let command = open_command(&url, Some("firefox"));

        assert_eq!(command.get_program(), "firefox");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec![url.as_str()]);
    }

    #[test]
    fn test_platform_command_ends_with_url() {
        let url = sample_url();
        let command = open_command(&url, None);
        let (program, _) = platform_open_command();

        assert_eq!(command.get_program(), program);
        assert_eq!(command.get_args().last().and_then(|a| a.to_str()), Some(url.as_str()));
    }

    #[test]
    fn test_missing_program_is_reported() {
        let url = sample_url();
        let err = open_url(&url, Some("quickcal-no-such-opener")).unwrap_err();

        match err {
            QuickCalError::OpenFailed { command, url: failed_url, .. } => {
                assert_eq!(command, "quickcal-no-such-opener");
                assert_eq!(failed_url, url.as_str());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
