//! Shared UI primitives for contactdir
//!
//! Design principles:
//! - Minimal: Show only what's needed
//! - Clean: No decorative borders or lines
//! - Consistent: Same patterns everywhere
//!
//! Conventions:
//! - Prompts: lowercase with colon and space: `search: `
//! - Feedback: single word when possible: `Deleted.`

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use inquire::{ui::RenderConfig, Confirm, InquireError, Select, Text};
use std::io::{self, IsTerminal, Write};
use std::time::Instant;

use crate::models::Contact;
use crate::notice::{NoticeKind, NoticeQueue};

// ============================================================================
// Layout Primitives
// ============================================================================

/// Truncate a string to max_chars, adding ellipsis if needed.
/// Result will be at most max_chars characters (including ellipsis if truncated).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars - 1).collect();
    format!("{}…", kept)
}

/// Get terminal width, defaulting to 80 if unavailable
pub fn term_width() -> usize {
    crossterm::terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(80)
}

/// Get number of visible content lines for select prompts.
pub fn visible_lines() -> usize {
    let height = crossterm::terminal::size()
        .map(|(_, h)| h as usize)
        .unwrap_or(24);
    height.saturating_sub(4).max(5)
}

// ============================================================================
// Message Functions
// ============================================================================

/// Print a status message to stdout
#[inline]
pub fn status(msg: &str) {
    println!("{}", msg);
}

/// Print an error message to stderr
#[inline]
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}

/// Print a warning message to stderr
#[inline]
pub fn warning(msg: &str) {
    eprintln!("Warning: {}", msg);
}

/// Print notices that are still visible, colored by kind when stderr is a
/// terminal, then drop them.
pub fn flush_notices(notices: &mut NoticeQueue) {
    let now = Instant::now();
    let colored = io::stderr().is_terminal();
    let mut stderr = io::stderr();

    for notice in notices.active(now) {
        let (color, mark) = match notice.kind {
            NoticeKind::Success => (Color::Green, "✓"),
            NoticeKind::Error => (Color::Red, "!"),
        };
        if colored {
            let _ = stderr.execute(SetForegroundColor(color));
        }
        let _ = write!(stderr, "{} {}", mark, notice.message);
        if colored {
            let _ = stderr.execute(ResetColor);
        }
        let _ = writeln!(stderr);
    }

    notices.drain();
}

// ============================================================================
// Terminal Helpers
// ============================================================================

/// Clear the terminal screen and move cursor to top-left
pub fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

/// Display a selection menu and return the chosen index
pub fn select<T: ToString>(prompt: &str, options: &[T]) -> Result<Option<usize>> {
    if options.is_empty() {
        return Ok(None);
    }

    let items: Vec<String> = options.iter().map(|o| o.to_string()).collect();

    let result = Select::new(prompt, items.clone())
        .with_render_config(minimal_render_config())
        .with_page_size(visible_lines())
        .with_vim_mode(true)
        .prompt_skippable()?;

    Ok(result.and_then(|selected| items.iter().position(|o| *o == selected)))
}

/// Prompt for yes/no confirmation (default: no)
pub fn confirm(prompt: &str) -> Result<bool> {
    let result = Confirm::new(prompt)
        .with_render_config(minimal_render_config())
        .with_default(false)
        .prompt_skippable()?;
    Ok(result.unwrap_or(false))
}

/// Format a contact for selection display: "Name (email)"
pub fn format_contact_for_select(contact: &Contact) -> String {
    format!("{} ({})", contact.name, contact.email)
}

/// Display a contact selection menu. Returns the chosen contact's index.
pub fn select_contact(prompt: &str, contacts: &[&Contact]) -> Result<Option<usize>> {
    let options: Vec<String> = contacts
        .iter()
        .map(|c| format_contact_for_select(c))
        .collect();
    select(prompt, &options)
}

// ============================================================================
// Form Input Helpers
// ============================================================================

/// Result type for form inputs that can be cancelled
pub enum FormResult<T> {
    Value(T),
    Cancelled,
}

/// Prompt for a field with optional current value
/// Format: `field [current]: ` or `field: ` if no current value
/// Empty input returns the current value (or empty string if no current)
pub fn prompt_field(field: &str, current: Option<&str>) -> Result<FormResult<String>> {
    let has_value = current.map(|v| !v.is_empty()).unwrap_or(false);
    let prompt = match current {
        Some(val) if !val.is_empty() => format!("{} [{}]: ", field, truncate(val, 30)),
        _ => format!("{}: ", field),
    };

    let result = Text::new(&prompt)
        .with_render_config(minimal_render_config())
        .prompt();

    match result {
        Ok(input) => {
            let input = input.trim();
            if input == "-" && has_value {
                // Clear the field
                Ok(FormResult::Value(String::new()))
            } else if input.is_empty() {
                Ok(FormResult::Value(current.unwrap_or("").to_string()))
            } else {
                Ok(FormResult::Value(input.to_string()))
            }
        }
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// Prompt for a free-text value such as a search query.
pub fn text_input(prompt: &str, default: Option<&str>) -> Result<Option<String>> {
    let mut builder = Text::new(prompt).with_render_config(minimal_render_config());

    if let Some(d) = default {
        if !d.is_empty() {
            builder = builder.with_default(d);
        }
    }

    Ok(builder.prompt_skippable()?)
}
