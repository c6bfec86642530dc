//! Table tab rendering.
//!
//! Draws the current tab's [`RenderedGrid`] as a ratatui table: one header
//! cell per visible column with its sort arrow, checkbox cells, an actions
//! column, and a centered message when nothing matches.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::grid::{ColumnWidth, GridBody, HeaderCell, RenderedCell, RenderedGrid};

/// Column whose text is colored by [`Theme::status_style`](super::Theme::status_style).
const STATUS_COLUMN: &str = "status";

/// Render the current tab.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(rendered) = app.rendered() else {
        let block = Block::default()
            .title(format!(" {} ", app.current_view.label()))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));
        frame.render_widget(Paragraph::new(" Loading...").block(block), area);
        return;
    };

    let block = Block::default()
        .title(title(app, &rendered))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let rows = match &rendered.body {
        GridBody::Empty { message } => {
            // Keep the header visible above the empty state.
            let inner = block.inner(area);
            frame.render_widget(block, area);
            if inner.height == 0 {
                return;
            }
            let header_area = Rect { height: 1, ..inner };
            frame.render_widget(
                Table::new(Vec::<Row>::new(), widths(&rendered.header)).header(header_row(app, &rendered)),
                header_area,
            );
            let body = Rect {
                y: inner.y + inner.height / 2,
                height: 1,
                ..inner
            };
            let paragraph = Paragraph::new(message.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(paragraph, body);
            return;
        }
        GridBody::Rows(rows) => rows,
    };

    let status_position = rendered.column_position(STATUS_COLUMN);
    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            let mut cells: Vec<Cell> = row
                .cells
                .iter()
                .enumerate()
                .map(|(i, cell)| match cell {
                    RenderedCell::Checkbox(checked) => {
                        let style = if *checked {
                            app.theme.checked
                        } else {
                            Style::default()
                        };
                        Cell::from(cell.text().to_string()).style(style)
                    }
                    RenderedCell::Text(text) if Some(i) == status_position => {
                        Cell::from(text.clone()).style(app.theme.status_style(text))
                    }
                    RenderedCell::Text(text) => Cell::from(text.clone()),
                })
                .collect();
            cells.push(Cell::from(action_labels(app, &row.actions)).style(Style::default().add_modifier(Modifier::DIM)));

            let row_style = if row.selected {
                app.theme.checked
            } else {
                Style::default()
            };
            Row::new(cells).style(row_style)
        })
        .collect();

    let table = Table::new(body, widths(&rendered.header))
        .header(header_row(app, &rendered))
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.view().nav().cursor.min(rows.len().saturating_sub(1))));

    frame.render_stateful_widget(table, area, &mut state);
}

fn header_row(app: &App, rendered: &RenderedGrid<String>) -> Row<'static> {
    let focused = app.view().focused_column().map(|c| c.id);
    let mut cells: Vec<Cell> = rendered
        .header
        .iter()
        .map(|h| {
            let style = if focused.as_deref() == Some(h.column_id.as_str()) {
                app.theme.focused_column
            } else {
                app.theme.header
            };
            Cell::from(header_text(h)).style(style)
        })
        .collect();
    cells.push(Cell::from("Actions").style(app.theme.header));
    Row::new(cells).height(1)
}

/// Header label with the sort arrow of the active column.
fn header_text(cell: &HeaderCell) -> String {
    match cell.direction {
        Some(direction) => format!("{} {}", cell.label, direction.arrow()),
        None => cell.label.clone(),
    }
}

fn widths(header: &[HeaderCell]) -> Vec<Constraint> {
    let mut widths: Vec<Constraint> = header
        .iter()
        .map(|h| match h.width {
            ColumnWidth::Fill(weight) => Constraint::Fill(weight),
            ColumnWidth::Length(n) => Constraint::Length(n),
            ColumnWidth::Min(n) => Constraint::Min(n),
        })
        .collect();
    widths.push(Constraint::Fill(2)); // Actions
    widths
}

fn action_labels(app: &App, actions: &[String]) -> String {
    actions
        .iter()
        .filter_map(|a| app.view().action_label(a))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Block title: counts, sort, page, selection, filter and focused column.
fn title(app: &App, rendered: &RenderedGrid<String>) -> String {
    let view = app.view();
    let total = app
        .data()
        .map(|d| view.render_all(d, "").total_rows)
        .unwrap_or(0);

    let sort_info = match (rendered.sort.column_id(), rendered.sort.direction()) {
        (Some(column), Some(direction)) => format!(" [sort {}{}]", column, direction.arrow()),
        _ => String::new(),
    };

    let page_info = match rendered.page {
        Some(page) if rendered.page_count > 1 => {
            format!(" [page {}/{}]", page.index + 1, rendered.page_count)
        }
        _ => String::new(),
    };

    let selected = view.selection().len();
    let selected_info = if selected > 0 {
        format!(" [{} selected]", selected)
    } else {
        String::new()
    };

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let focus_info = match view.focused_column() {
        Some(column) if column.hidden => format!(" [col: {} (hidden)]", column.label),
        Some(column) => format!(" [col: {}]", column.label),
        None => String::new(),
    };

    format!(
        " {} ({}/{}){}{}{}{}{} ",
        app.current_view.label(),
        rendered.total_rows,
        total,
        sort_info,
        page_info,
        selected_info,
        filter_info,
        focus_info,
    )
}
