//! Input helpers shared by the CLI and the interactive prompt

/// Strip control characters except newlines and tabs
pub fn sanitize_user_input(input: &str) -> String {
    input.chars().filter(|&c| !c.is_control() || c == '\n' || c == '\t').collect::<String>()
}

/// Whether the text has anything besides whitespace
pub fn has_event_text(input: &str) -> bool {
    !input.trim().is_empty()
}

/// Join positional CLI words back into one event string
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
