use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

use portal_grid::data::Table;
use portal_grid::grid::SortState;
use portal_grid::logging::{self, LogTarget};
use portal_grid::source::{Origin, ReviewService};
use portal_grid::{events, ui, views, App, Settings};

#[derive(Parser, Debug)]
#[command(name = "portal-grid")]
#[command(about = "Sortable, selectable data grids for a municipal services portal")]
struct Args {
    /// Portal dataset (JSON). Defaults to the built-in sample data
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Settings file (TOML). PORTAL_GRID__* environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append logs to this file (the interactive UI logs nowhere else)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print one table (documents, roles, users, departments) and exit
    #[arg(short, long, value_name = "TABLE")]
    print: Option<Table>,

    /// Sort for --print, as `column`, `column:asc` or `column:desc`
    #[arg(short, long, requires = "print")]
    sort: Option<SortState>,

    /// Search text for --print
    #[arg(short, long, requires = "print")]
    filter: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref())?;
    let origin = match args.data {
        Some(path) => Origin::File(path),
        None => Origin::Sample,
    };

    // Handle print mode (non-interactive)
    if let Some(table) = args.print {
        logging::init(LogTarget::Stderr)?;
        let filter = args.filter.unwrap_or_default();
        return print_table(table, &origin, &settings, args.sort, &filter);
    }

    let target = match &args.log_file {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Off,
    };
    logging::init(target)?;

    run_with_service(origin, settings)
}

/// Print one table as aligned text.
fn print_table(
    table: Table,
    origin: &Origin,
    settings: &Settings,
    sort: Option<SortState>,
    filter: &str,
) -> Result<()> {
    let data = origin.load()?;
    let mut view = views::build_view(table, settings, None)?;

    if let Some(sort) = sort {
        if let Some(column) = sort.column_id() {
            let known = view
                .render_all(&data, "")
                .header
                .iter()
                .any(|h| h.column_id == column && h.sortable);
            if !known {
                bail!("{} has no sortable column '{}'", table.label(), column);
            }
        }
        view.set_sort_state(sort);
    }

    let rendered = view.render_all(&data, filter);
    print!("{}", ui::plain::render(&rendered));
    Ok(())
}

/// Run the TUI against the review service
fn run_with_service(origin: Origin, settings: Settings) -> Result<()> {
    // The service task runs on the runtime's worker threads while the TUI
    // owns the main thread.
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let (source, service, task) = ReviewService::spawn(origin, settings.action_latency())?;
    let app = App::new(Box::new(source), settings, Some(service))?;

    let result = run_tui(app);

    // Signal shutdown
    task.abort();

    result
}

/// Run the TUI with the given app
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Load initial data
    app.refresh();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Table
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);
            ui::grid::render(frame, app, chunks[2]);
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render detail overlay if active
            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Table header sits below header (1) + tabs (1) + border (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Pick up snapshots published by the service
        app.refresh();
    }

    Ok(())
}
