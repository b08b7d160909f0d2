//! Shared helper functions for CLI commands

use dialoguer::{theme::ColorfulTheme, Input, Password};
use miette::{IntoDiagnostic, Result};
use std::io::{self, IsTerminal};

/// Truncate a string to `max_len` characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render an optional value for display
pub fn display_opt(value: Option<&str>) -> String {
    value.unwrap_or("").to_string()
}

/// Shorten an ISO timestamp to "YYYY-MM-DD HH:MM"
pub fn short_timestamp(value: Option<&str>) -> String {
    value
        .unwrap_or("")
        .chars()
        .take(16)
        .map(|c| if c == 'T' { ' ' } else { c })
        .collect()
}

/// Whether prompts can be shown
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Use `value` if given, otherwise prompt for it when interactive
///
/// Returns an empty string when there is nothing to prompt on; callers
/// validate required fields themselves.
pub fn value_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if is_interactive() => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .interact_text()
            .into_diagnostic(),
        None => Ok(String::new()),
    }
}

/// Like [`value_or_prompt`] but hides what is typed
pub fn secret_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if is_interactive() => Password::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .interact()
            .into_diagnostic(),
        None => Ok(String::new()),
    }
}
