//! Terminal rendering of [`RenderSpec`] values.
//!
//! This is the text "page" of the interactive front end: it draws the list
//! and detail views with colours when stdout is a terminal and `NO_COLOR`
//! is unset.

use owo_colors::{OwoColorize, Style};
use std::io::IsTerminal;

use crate::view::{DetailRecord, ListEntry, RenderSpec};

/// Get the current terminal width.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(100)
}

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Whether output should be coloured.
pub fn use_color() -> bool {
    is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Search => "🔍",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Error,
    Warning,
    Search,
}

/// Format a status line.
pub fn status_line(status: Status, msg: &str, color: bool) -> String {
    let style = match status {
        Status::Error => Style::new().red().bold(),
        Status::Warning => Style::new().yellow().bold(),
        Status::Search => Style::new().yellow(),
    };
    format!("{} {}", paint(status_icon(status), style, color), msg)
}

/// Welcome banner for the interactive shell.
pub fn banner(color: bool) -> String {
    let title = format!("📚 Book Finder v{}", env!("CARGO_PKG_VERSION"));
    format!(
        "{}\n{}\n",
        paint(&title, Style::new().bold().cyan(), color),
        paint(
            "Type 'help' for commands, e.g. search author Octavia Butler",
            Style::new().dimmed(),
            color
        )
    )
}

/// Render a view as text.
pub fn render(spec: &RenderSpec, color: bool, width: usize) -> String {
    match spec {
        RenderSpec::List { entries } => render_list(entries, color, width),
        RenderSpec::Detail { book } => render_detail(book, color, width),
    }
}

fn render_list(entries: &[ListEntry], color: bool, width: usize) -> String {
    let mut out = section(&format!("Results ({})", entries.len()), color);

    if entries.is_empty() {
        out.push_str(&paint("  No books to show.", Style::new().dimmed(), color));
        out.push('\n');
        return out;
    }

    let text_width = width.saturating_sub(8).max(20);
    for entry in entries {
        let number = format!("{:>3}.", entry.position);
        out.push_str(&format!(
            "{} {}\n",
            paint(&number, Style::new().dimmed(), color),
            paint(
                &truncate_with_ellipsis(&entry.title, text_width),
                Style::new().blue().bold(),
                color
            )
        ));
        out.push_str(&format!(
            "     Author: {}\n",
            truncate_with_ellipsis(&entry.author, text_width)
        ));
        out.push_str(&format!(
            "     Rating: {}  ·  eBook Access: {}\n",
            paint(&entry.rating, Style::new().yellow(), color),
            paint(&entry.ebook_access, access_style(&entry.ebook_access), color)
        ));
        if !entry.cover_url.is_empty() {
            out.push_str(&format!(
                "     Cover: {}\n",
                paint(
                    &truncate_with_ellipsis(&entry.cover_url, text_width),
                    Style::new().dimmed(),
                    color
                )
            ));
        }
    }
    out
}

fn render_detail(book: &DetailRecord, color: bool, width: usize) -> String {
    let mut out = section(&truncate_with_ellipsis(&book.title, width.saturating_sub(10).max(20)), color);

    let cover = if book.cover_url.is_empty() {
        "(none)"
    } else {
        book.cover_url.as_str()
    };

    let rows = [
        ("Author", book.author.as_str()),
        ("First Published", book.first_publish_year.as_str()),
        ("Cover", cover),
        ("ISBN", book.isbn.as_str()),
        ("eBook Access", book.ebook_access.as_str()),
        ("Rating", book.rating.as_str()),
    ];

    for (label, value) in rows {
        let label = format!("{:<16}", format!("{}:", label));
        out.push_str(&format!("  {} {}\n", paint(&label, Style::new().bold(), color), value));
    }
    out.push_str(&paint("  (type 'back' to return to the list)", Style::new().dimmed(), color));
    out.push('\n');
    out
}

fn section(title: &str, color: bool) -> String {
    format!(
        "\n{}\n",
        paint(&format!("━━━ {} ━━━", title), Style::new().bold().cyan(), color)
    )
}

fn access_style(label: &str) -> Style {
    if label == "Available" {
        Style::new().green()
    } else {
        Style::new().red()
    }
}

fn paint(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();

    if total_width <= max_width {
        return text.to_string();
    }

    // Find the longest prefix that fits
    let mut current_width = 0;
    let mut end_idx = 0;

    for (i, (_, w)) in char_widths.iter().enumerate() {
        if current_width + w > max_width - 3 {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}
