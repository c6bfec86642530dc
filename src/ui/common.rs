//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::App;
use crate::data::Table;

/// Separator between tab titles.
const TAB_DIVIDER: &str = "|";

fn tab_title(table: Table) -> String {
    format!(" {}:{} ", table.index() + 1, table.label())
}

/// Render the header bar with the portal overview.
///
/// Displays: pending reviews, rows selected across tables, data source.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(
        " SERVICES PORTAL ",
        Style::default().add_modifier(Modifier::BOLD),
    );

    if app.data().is_none() {
        let line = Line::from(vec![title, Span::raw("| Loading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let pending = app.pending_reviews();
    let selected = app.total_selected();

    let line = Line::from(vec![
        title,
        Span::raw("│ "),
        if pending > 0 {
            Span::styled(
                pending.to_string(),
                Style::default().fg(app.theme.pending).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" pending review │ "),
        Span::styled(
            selected.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" selected │ "),
        Span::styled(
            app.source_description().to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing the portal tables.
///
/// Highlights the currently active table.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Table::ALL.into_iter().map(|t| Line::from(tab_title(t))).collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider(TAB_DIVIDER);

    frame.render_widget(tabs, area);
}

/// Tab under a clicked terminal column of the tab bar.
///
/// Mirrors the layout of [`Tabs`]: each title followed by the divider, with a
/// one-cell padding on both sides.
pub fn tab_at(column: u16) -> Option<Table> {
    let mut start = 0u16;
    for table in Table::ALL {
        let width = tab_title(table).chars().count() as u16 + 2;
        if column >= start && column < start + width {
            return Some(table);
        }
        start += width + TAB_DIVIDER.chars().count() as u16;
    }
    None
}

/// Render the status bar at the bottom.
///
/// Shows: time since last update and the controls of the current tab.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:reload", err)
    } else if app.data().is_some() {
        let updated = app
            .last_updated
            .map(|t| format!("Updated {:.1}s ago | ", t.elapsed().as_secs_f64()))
            .unwrap_or_default();

        let controls = if app.filter_active {
            "Type to search | Enter:apply Esc:cancel".to_string()
        } else {
            let hotkeys: String = app
                .view()
                .hotkeys()
                .iter()
                .map(|(key, label)| format!("{}:{} ", key, label))
                .collect();
            let select = if app.view().selectable() {
                "Space:select a:all "
            } else {
                ""
            };
            format!(
                "{}{}/:search s:sort ←→:column Enter:detail ?:help q:quit",
                hotkeys, select
            )
        };

        format!(" {}{}", updated, controls)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  Tab/1-4     Switch tables"),
        Line::from("  ↑/↓ j/k     Move cursor"),
        Line::from("  PgUp/PgDn   Previous/next page"),
        Line::from("  Home/End    First/last row"),
        Line::from("  ←/→ h/l     Focus column"),
        Line::from("  Enter       Row detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Grid"),
        Line::from("  s           Cycle sort on column"),
        Line::from("  v           Hide/show column"),
        Line::from("  Space       Select row"),
        Line::from("  a           Select all on page"),
        Line::from("  x           Clear selection"),
        Line::from("  /  c        Search, clear search"),
        Line::from("  y n d t     Row actions"),
        Line::from(""),
        section(" General"),
        Line::from("  r           Reload data"),
        Line::from("  e           Export selection"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let help_height = help_text.len() as u16 + 2;
    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = help_height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
