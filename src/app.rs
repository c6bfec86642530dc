//! Application state and navigation logic.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::data::{PortalData, Table};
use crate::grid::{HeaderCheckState, RenderedGrid};
use crate::settings::Settings;
use crate::source::{DataSource, PortalSnapshot, ServiceHandle};
use crate::ui::Theme;
use crate::views::{self, Navigation, PortalTable};

/// How long a status message stays in the status bar.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Everything the detail overlay shows about the row under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDetail {
    pub id: String,
    pub fields: Vec<(String, String)>,
    /// Labels of the actions offered for the row.
    pub actions: Vec<String>,
    pub selected: bool,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: Table,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    service: Option<ServiceHandle>,
    pub snapshot: Option<PortalSnapshot>,
    pub load_error: Option<String>,
    pub last_updated: Option<Instant>,

    // One view (and grid) per table, indexed by `Table::index`
    views: Vec<Box<dyn PortalTable>>,
    pub settings: Settings,

    // Search/filter, shared by all tables
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create an App over a data source.
    ///
    /// Row actions are forwarded to `service`; without one they are disabled.
    pub fn new(
        source: Box<dyn DataSource>,
        settings: Settings,
        service: Option<ServiceHandle>,
    ) -> Result<Self> {
        let views = views::build_views(&settings, service.as_ref())?;
        Ok(Self {
            running: true,
            current_view: Table::Documents,
            show_help: false,
            show_detail_overlay: false,
            source,
            service,
            snapshot: None,
            load_error: None,
            last_updated: None,
            views,
            theme: Theme::from_choice(settings.theme),
            settings,
            filter_text: String::new(),
            filter_active: false,
            status_message: None,
        })
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_TTL => Some(msg),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&PortalData> {
        self.snapshot.as_ref().map(|s| s.data.as_ref())
    }

    /// The view of the current tab.
    pub fn view(&self) -> &dyn PortalTable {
        self.view_for(self.current_view)
    }

    pub fn view_for(&self, table: Table) -> &dyn PortalTable {
        &*self.views[table.index()]
    }

    fn view_mut(&mut self) -> &mut dyn PortalTable {
        &mut *self.views[self.current_view.index()]
    }

    /// Render the current tab: filtered, sorted and paged.
    pub fn rendered(&self) -> Option<RenderedGrid<String>> {
        let data = self.data()?;
        Some(
            self.view()
                .render(data, &self.filter_text, self.settings.page_size),
        )
    }

    /// Number of selected rows across all tables.
    pub fn total_selected(&self) -> usize {
        self.views.iter().map(|v| v.selection().len()).sum()
    }

    pub fn pending_reviews(&self) -> usize {
        self.data().map(PortalData::pending_reviews).unwrap_or(0)
    }

    /// Poll the data source for a new snapshot.
    ///
    /// Returns true if one was applied.
    pub fn refresh(&mut self) -> bool {
        if let Some(snapshot) = self.source.poll() {
            self.apply_snapshot(snapshot);
            return true;
        }
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
        }
        false
    }

    /// Take a new snapshot. A replaced dataset clears every selection.
    pub fn apply_snapshot(&mut self, snapshot: PortalSnapshot) {
        if snapshot.replaces(self.snapshot.as_ref()) {
            for view in &mut self.views {
                view.clear_selection();
                let focus = view.nav().focus;
                *view.nav_mut() = Navigation {
                    focus,
                    ..Navigation::default()
                };
            }
            tracing::debug!(dataset = snapshot.dataset, "dataset replaced, selection cleared");
        }
        if let Some(notice) = &snapshot.notice {
            self.set_status_message(notice.clone());
        }
        self.snapshot = Some(snapshot);
        self.load_error = None;
        self.last_updated = Some(Instant::now());
        self.clamp_cursor();
    }

    /// Ask the backend to reload the dataset.
    pub fn request_reload(&mut self) {
        let message = match &self.service {
            Some(service) if service.reload() => "Reloading...",
            Some(_) => "Review service is not running",
            None => {
                self.refresh();
                "Nothing to reload"
            }
        };
        self.set_status_message(message.to_string());
    }

    /// Keep page and cursor inside the current tab's rows.
    fn clamp_cursor(&mut self) {
        let Some(rendered) = self.rendered() else {
            return;
        };
        let rows = rendered.rows().len();
        let page = rendered.page.map(|p| p.index).unwrap_or(0);
        let nav = self.view_mut().nav_mut();
        nav.page = page;
        nav.cursor = nav.cursor.min(rows.saturating_sub(1));
    }

    /// Switch to the next tab.
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous tab.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    pub fn set_view(&mut self, view: Table) {
        self.current_view = view;
        self.show_detail_overlay = false;
        self.clamp_cursor();
    }

    /// Move the cursor down, continuing onto the next page.
    pub fn select_next(&mut self) {
        let Some(rendered) = self.rendered() else {
            return;
        };
        let rows = rendered.rows().len();
        let nav = self.view_mut().nav_mut();
        if nav.cursor + 1 < rows {
            nav.cursor += 1;
        } else if nav.page + 1 < rendered.page_count {
            nav.page += 1;
            nav.cursor = 0;
        }
    }

    /// Move the cursor up, continuing onto the previous page.
    pub fn select_prev(&mut self) {
        let nav = self.view_mut().nav_mut();
        if nav.cursor > 0 {
            nav.cursor -= 1;
        } else if nav.page > 0 {
            nav.page -= 1;
            nav.cursor = usize::MAX;
            self.clamp_cursor();
        }
    }

    pub fn next_page(&mut self) {
        let Some(rendered) = self.rendered() else {
            return;
        };
        let nav = self.view_mut().nav_mut();
        if nav.page + 1 < rendered.page_count {
            nav.page += 1;
            self.clamp_cursor();
        }
    }

    pub fn prev_page(&mut self) {
        let nav = self.view_mut().nav_mut();
        nav.page = nav.page.saturating_sub(1);
        self.clamp_cursor();
    }

    /// Jump to the first row of the first page.
    pub fn select_first(&mut self) {
        let nav = self.view_mut().nav_mut();
        nav.page = 0;
        nav.cursor = 0;
    }

    /// Jump to the last row of the last page.
    pub fn select_last(&mut self) {
        let nav = self.view_mut().nav_mut();
        nav.page = usize::MAX;
        nav.cursor = usize::MAX;
        self.clamp_cursor();
    }

    /// Put the cursor on a row of the current page, if it exists.
    pub fn select_row(&mut self, position: usize) {
        let rows = self.rendered().map(|r| r.rows().len()).unwrap_or(0);
        if position < rows {
            self.view_mut().nav_mut().cursor = position;
        }
    }

    /// Id of the row under the cursor.
    pub fn cursor_row_id(&self) -> Option<String> {
        let rendered = self.rendered()?;
        rendered.row(self.view().nav().cursor).map(|r| r.id.clone())
    }

    fn ensure_selectable(&mut self) -> bool {
        if self.view().selectable() {
            return true;
        }
        let message = format!("{} rows cannot be selected", self.current_view.label());
        self.set_status_message(message);
        false
    }

    /// Tick or untick the row under the cursor.
    pub fn toggle_cursor_row(&mut self) {
        if !self.ensure_selectable() {
            return;
        }
        if let Some(id) = self.cursor_row_id() {
            self.view_mut().toggle_row(id);
        }
    }

    /// Select-all checkbox over the rows on screen.
    pub fn toggle_all_visible(&mut self) -> Option<HeaderCheckState> {
        if !self.ensure_selectable() {
            return None;
        }
        let visible = self.rendered()?.visible_ids();
        Some(self.view_mut().toggle_all_visible(&visible))
    }

    pub fn clear_selection(&mut self) {
        let count = self.view().selection().len();
        self.view_mut().clear_selection();
        if count > 0 {
            self.set_status_message(format!("Cleared {} selected", count));
        }
    }

    /// Advance the sort cycle of the focused column.
    pub fn toggle_sort(&mut self) {
        let Some(column) = self.view().focused_column() else {
            return;
        };
        let message = match self.view_mut().toggle_sort(&column.id) {
            Some(change) => match change.direction {
                Some(direction) => format!("Sorted by {} {}", column.label, direction.arrow()),
                None => "Sort cleared".to_string(),
            },
            None => format!("{} is not sortable", column.label),
        };
        self.set_status_message(message);
        self.clamp_cursor();
    }

    pub fn focus_next_column(&mut self) {
        self.view_mut().move_focus(1);
    }

    pub fn focus_prev_column(&mut self) {
        self.view_mut().move_focus(-1);
    }

    /// Hide or show the focused column.
    pub fn toggle_focused_column(&mut self) {
        let Some(column) = self.view().focused_column() else {
            return;
        };
        let message = match self.view_mut().toggle_column(&column.id) {
            Some(true) => format!("Hid {}", column.label),
            Some(false) => format!("Showing {}", column.label),
            None => format!("{} cannot be hidden", column.label),
        };
        self.set_status_message(message);
    }

    /// Whether `key` triggers a row action in the current tab.
    pub fn has_hotkey(&self, key: char) -> bool {
        self.view().hotkeys().iter().any(|(k, _)| *k == key)
    }

    /// Run the action bound to `key` on the selected rows of the current page,
    /// or on the cursor row when none of them is selected.
    pub fn run_hotkey(&mut self, key: char) {
        if self.service.is_none() {
            self.set_status_message("No backend attached, actions are disabled".to_string());
            return;
        }
        let (Some(data), Some(rendered)) = (self.data(), self.rendered()) else {
            return;
        };
        let view = self.view();
        let mut targets = view.selection().selected_in(&rendered.visible_ids());
        if targets.is_empty() {
            targets.extend(rendered.row(view.nav().cursor).map(|r| r.id.clone()));
        }

        let mut sent = 0;
        let mut skipped = 0;
        let mut label = None;
        for id in &targets {
            match view.action_for_key(data, key, id) {
                Some(action) if view.dispatch(&action, id) => {
                    sent += 1;
                    label = view.action_label(&action);
                }
                _ => skipped += 1,
            }
        }

        let message = match (sent, label) {
            (0, _) | (_, None) => "No selected row offers that action".to_string(),
            (1, Some(label)) if skipped == 0 => format!("{} requested", label),
            (n, Some(label)) if skipped == 0 => format!("{} requested for {} rows", label, n),
            (n, Some(label)) => format!("{} requested for {} rows ({} skipped)", label, n, skipped),
        };
        self.set_status_message(message);
    }

    /// Open the detail overlay for the row under the cursor.
    pub fn enter_detail(&mut self) {
        if self.cursor_row_id().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// The row shown by the detail overlay.
    pub fn detail(&self) -> Option<RowDetail> {
        let data = self.data()?;
        let rendered = self.rendered()?;
        let view = self.view();
        let row = rendered.row(view.nav().cursor)?;
        Some(RowDetail {
            id: row.id.clone(),
            fields: view.details(data, &row.id)?,
            actions: row
                .actions
                .iter()
                .filter_map(|a| view.action_label(a))
                .collect(),
            selected: row.selected,
        })
    }

    /// Navigate back: close the overlay first, then return to the first tab.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        if self.current_view != Table::Documents {
            self.set_view(Table::Documents);
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
        self.filter_changed();
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.filter_changed();
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
        self.filter_changed();
    }

    fn filter_changed(&mut self) {
        if self.settings.clear_selection_on_filter {
            self.view_mut().clear_selection();
        }
        let nav = self.view_mut().nav_mut();
        nav.page = 0;
        nav.cursor = 0;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Default export file for the current tab.
    pub fn export_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_selection.json", self.current_view.key()))
    }

    /// Export the current tab's selection to a file. Returns the number of
    /// selected ids written.
    pub fn export_selection(&self, path: &Path) -> Result<usize> {
        use std::io::Write;

        let Some(data) = self.data() else {
            anyhow::bail!("No data to export");
        };
        let view = self.view();
        let selected = views::sorted_selection(view);
        if selected.is_empty() {
            anyhow::bail!("Nothing selected in {}", self.current_view.label());
        }

        let rows: Vec<serde_json::Value> = selected
            .iter()
            .filter_map(|id| view.export_row(data, id))
            .collect();

        let mut export = serde_json::Map::new();
        export.insert(
            "table".to_string(),
            serde_json::json!(self.current_view.key()),
        );
        export.insert("selected".to_string(), serde_json::json!(selected));
        export.insert("rows".to_string(), serde_json::Value::Array(rows));

        let json = serde_json::to_string_pretty(&serde_json::Value::Object(export))?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(selected.len())
    }
}
