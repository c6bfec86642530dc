//! Detail overlay rendering.
//!
//! Displays a modal overlay with every field of the row under the cursor and
//! the actions it offers.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Render the row detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(detail) = app.detail() else {
        return;
    };

    // Width: 95% of screen, clamped to [MIN_OVERLAY_WIDTH, 100]
    let overlay_width = (area.width * 95 / 100).clamp(MIN_OVERLAY_WIDTH, 100);
    // Height: 90% of screen, clamped to [MIN_OVERLAY_HEIGHT, 50]
    let overlay_height = (area.height * 90 / 100).clamp(MIN_OVERLAY_HEIGHT, 50);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(4), // Id and selection
        Constraint::Min(6),    // Fields
        Constraint::Length(3), // Actions
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let (mark, mark_style) = if detail.selected {
        ("[x] selected", app.theme.checked)
    } else {
        ("[ ] not selected", Style::default().add_modifier(Modifier::DIM))
    };
    let header_lines = vec![
        Line::from(vec![Span::styled(
            format!(" {} ", detail.id),
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![Span::raw(" "), Span::styled(mark, mark_style)]),
    ];
    let header_block = Block::default()
        .title(format!(" {} Detail ", app.current_view.label()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));
    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // ===== FIELDS =====
    let label_width = detail
        .fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0) as u16;
    let rows: Vec<Row> = detail
        .fields
        .iter()
        .map(|(label, value)| {
            let value_style = app.theme.status_style(value);
            Row::new(vec![
                Cell::from(label.clone()).style(app.theme.header),
                Cell::from(value.clone()).style(value_style),
            ])
        })
        .collect();
    let fields = Table::new(rows, [Constraint::Length(label_width + 2), Constraint::Fill(1)]).block(
        Block::default()
            .title(format!(" Fields ({}) ", detail.fields.len()))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(fields, chunks[1]);

    // ===== ACTIONS =====
    let actions = if detail.actions.is_empty() {
        Line::from(Span::styled(
            " No actions available",
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        let hotkeys = app.view().hotkeys();
        let labels: Vec<String> = detail
            .actions
            .iter()
            .map(|label| {
                let lower = label.to_lowercase();
                match hotkeys
                    .iter()
                    .find(|(_, keyed)| keyed.split('/').any(|l| l == lower))
                {
                    Some((key, _)) => format!("{} ({})", label, key),
                    None => label.clone(),
                }
            })
            .collect();
        Line::from(format!(" {}", labels.join("  ")))
    };
    let actions_block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(actions).block(actions_block), chunks[2]);

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[3]);
}
