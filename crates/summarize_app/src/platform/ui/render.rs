use std::fmt::Write;

use chrono::Local;
use console::style;
use summarize_core::{AppViewModel, EntryRowView, Severity, SortDirection, SortField};

const NAME_WIDTH: usize = 40;

/// Render the whole screen: table, summary panel and status line.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}  {}",
        style("summarize").cyan().bold(),
        style(format!(
            "{} entries, {} with summary, {} selected",
            view.entry_count, view.eligible_count, view.selected_count
        ))
        .dim()
    );
    if !view.search_term.is_empty() {
        let _ = writeln!(out, "search: {}", style(&view.search_term).yellow());
    }
    let _ = writeln!(out);

    if view.is_loading {
        let _ = writeln!(out, "{}", style("Loading entries...").dim());
    } else if view.rows.is_empty() {
        let text = if view.entry_count == 0 {
            "No videos yet. Use 'add <url>'."
        } else {
            "No entries match the search."
        };
        let _ = writeln!(out, "{}", style(text).dim());
    } else {
        let _ = writeln!(
            out,
            "{:>4}  {:3}  {:<w$}  {:<14}  {}",
            "#",
            "",
            header("Name", SortField::Name, view),
            header("Status", SortField::Status, view),
            header("Added", SortField::InsertionDate, view),
            w = NAME_WIDTH
        );
        for row in &view.rows {
            let _ = writeln!(out, "{}", render_row(row));
        }
    }

    if !view.panel.is_empty() {
        let _ = writeln!(out, "\n{}", style("─".repeat(60)).dim());
        for card in &view.panel {
            let _ = writeln!(out, "{}", style(&card.name).bold());
            let _ = writeln!(out, "{}", style(&card.url).dim());
            let _ = writeln!(out, "{}\n", card.summary);
        }
    }

    let _ = writeln!(out);
    if let Some(error) = &view.poll_error {
        let _ = writeln!(out, "{} {}", style("Refresh failed:").red().bold(), error);
    }
    if let Some(status) = &view.status {
        let line = match status.severity {
            Severity::Info => style(status.text.as_str()).green(),
            Severity::Error => style(status.text.as_str()).red(),
        };
        let _ = writeln!(out, "{line}");
    }
    out
}

fn header(label: &str, field: SortField, view: &AppViewModel) -> String {
    if view.sort_field != field {
        return label.to_string();
    }
    let arrow = match view.sort_direction {
        SortDirection::Asc => "▲",
        SortDirection::Desc => "▼",
    };
    format!("{label} {arrow}")
}

fn render_row(row: &EntryRowView) -> String {
    let checkbox = match (row.selectable, row.selected) {
        (_, true) => "[x]",
        (true, false) => "[ ]",
        (false, false) => "[-]",
    };
    let added = row
        .insertion_date
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M");
    let mut status = row.status.to_string();
    if row.has_transcription {
        status.push_str(" +t");
    }
    let line = format!(
        "{:>4}  {}  {:<w$}  {:<14}  {}",
        row.index + 1,
        checkbox,
        truncate(display_name(row), NAME_WIDTH),
        status,
        added,
        w = NAME_WIDTH
    );
    let styled = if row.selected {
        style(line).cyan()
    } else if row.selectable {
        style(line)
    } else {
        style(line).dim()
    };
    styled.to_string()
}

fn display_name(row: &EntryRowView) -> &str {
    if row.name.trim().is_empty() {
        &row.url
    } else {
        &row.name
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
