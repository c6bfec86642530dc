//! Per-table view state.
//!
//! Each portal table is a [`TableView`]: a [`Grid`] over one record type plus
//! the cursor, page and focused column of that tab. [`PortalTable`] erases the
//! record type so the application can hold all four views side by side.

use anyhow::Result;

use crate::data::{tables, Department, Document, PortalData, Role, Table, User};
use crate::grid::{
    Grid, HeaderCheckState, Page, RenderedGrid, SelectionController, SortChange, SortController,
    SortState, TracingObserver,
};
use crate::settings::Settings;
use crate::source::ServiceHandle;

/// Cursor position within one table tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigation {
    /// Row within the current page.
    pub cursor: usize,
    /// Zero-based page index.
    pub page: usize,
    /// Index into the table's data columns (the checkbox column is skipped).
    pub focus: usize,
}

/// The focused column of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedColumn {
    pub id: String,
    pub label: String,
    pub sortable: bool,
    pub hideable: bool,
    pub hidden: bool,
}

/// A table view with its record type erased.
pub trait PortalTable: Send {
    fn table(&self) -> Table;

    /// Filter, sort and page the view's rows.
    fn render(&self, data: &PortalData, filter: &str, page_size: usize) -> RenderedGrid<String>;

    /// Filter and sort without paging.
    fn render_all(&self, data: &PortalData, filter: &str) -> RenderedGrid<String>;

    fn nav(&self) -> &Navigation;
    fn nav_mut(&mut self) -> &mut Navigation;

    fn sort(&self) -> &SortController;
    fn selection(&self) -> &SelectionController<String>;
    /// Whether rows can be selected (the table has a checkbox column).
    fn selectable(&self) -> bool;

    fn toggle_sort(&mut self, column_id: &str) -> Option<SortChange>;
    fn set_sort_state(&mut self, state: SortState);
    fn toggle_row(&mut self, id: String) -> bool;
    fn toggle_all_visible(&mut self, visible: &[String]) -> HeaderCheckState;
    fn clear_selection(&mut self);
    fn toggle_column(&mut self, column_id: &str) -> Option<bool>;

    fn focused_column(&self) -> Option<FocusedColumn>;
    /// Move column focus left (negative) or right, wrapping around.
    fn move_focus(&mut self, delta: isize);

    /// Action hotkeys with their labels; keys shared by several actions are
    /// listed once with the labels joined by `/`.
    fn hotkeys(&self) -> Vec<(char, String)>;
    fn action_label(&self, name: &str) -> Option<String>;
    /// The action bound to `key` that is available for row `id`.
    fn action_for_key(&self, data: &PortalData, key: char, id: &str) -> Option<String>;
    fn dispatch(&self, action: &str, id: &String) -> bool;

    /// Label and rendered value of every data column for one row.
    fn details(&self, data: &PortalData, id: &str) -> Option<Vec<(String, String)>>;
    /// One row as a JSON object keyed by column id.
    fn export_row(&self, data: &PortalData, id: &str) -> Option<serde_json::Value>;
}

/// A [`Grid`] bound to one slice of the portal dataset.
pub struct TableView<R> {
    table: Table,
    grid: Grid<R, String>,
    rows: fn(&PortalData) -> &[R],
    nav: Navigation,
}

impl<R> TableView<R> {
    pub fn new(table: Table, grid: Grid<R, String>, rows: fn(&PortalData) -> &[R]) -> Self {
        Self {
            table,
            grid,
            rows,
            nav: Navigation::default(),
        }
    }

    pub fn grid(&self) -> &Grid<R, String> {
        &self.grid
    }

    fn filtered<'a>(&self, data: &'a PortalData, filter: &str) -> Vec<&'a R> {
        (self.rows)(data)
            .iter()
            .filter(|row| self.grid.model().matches(row, filter))
            .collect()
    }

    fn find<'a>(&self, data: &'a PortalData, id: &str) -> Option<&'a R> {
        (self.rows)(data).iter().find(|row| self.grid.row_id(row) == id)
    }

    fn data_columns(&self) -> Vec<&crate::grid::ColumnSpec<R>> {
        self.grid
            .model()
            .iter()
            .filter(|c| !c.is_selection_control())
            .collect()
    }
}

impl<R> PortalTable for TableView<R>
where
    TableView<R>: Send,
{
    fn table(&self) -> Table {
        self.table
    }

    fn render(&self, data: &PortalData, filter: &str, page_size: usize) -> RenderedGrid<String> {
        let rows = self.filtered(data, filter);
        self.grid.render_page(rows, Page::new(self.nav.page, page_size))
    }

    fn render_all(&self, data: &PortalData, filter: &str) -> RenderedGrid<String> {
        self.grid.render(self.filtered(data, filter))
    }

    fn nav(&self) -> &Navigation {
        &self.nav
    }

    fn nav_mut(&mut self) -> &mut Navigation {
        &mut self.nav
    }

    fn sort(&self) -> &SortController {
        self.grid.sort()
    }

    fn selection(&self) -> &SelectionController<String> {
        self.grid.selection()
    }

    fn selectable(&self) -> bool {
        self.grid.model().selection_column().is_some()
    }

    fn toggle_sort(&mut self, column_id: &str) -> Option<SortChange> {
        self.grid.toggle_sort(column_id)
    }

    fn set_sort_state(&mut self, state: SortState) {
        self.grid.set_sort_state(state);
    }

    fn toggle_row(&mut self, id: String) -> bool {
        self.grid.toggle_row(id)
    }

    fn toggle_all_visible(&mut self, visible: &[String]) -> HeaderCheckState {
        self.grid.toggle_all_visible(visible)
    }

    fn clear_selection(&mut self) {
        self.grid.clear_selection();
    }

    fn toggle_column(&mut self, column_id: &str) -> Option<bool> {
        self.grid.toggle_column(column_id)
    }

    fn focused_column(&self) -> Option<FocusedColumn> {
        let columns = self.data_columns();
        let column = columns.get(self.nav.focus.min(columns.len().saturating_sub(1)))?;
        Some(FocusedColumn {
            id: column.id().to_string(),
            label: column.header().text(None),
            sortable: column.is_sortable(),
            hideable: column.is_hideable(),
            hidden: self.grid.is_hidden(column.id()),
        })
    }

    fn move_focus(&mut self, delta: isize) {
        let count = self.data_columns().len();
        if count == 0 {
            return;
        }
        let current = self.nav.focus.min(count - 1) as isize;
        self.nav.focus = (current + delta).rem_euclid(count as isize) as usize;
    }

    fn hotkeys(&self) -> Vec<(char, String)> {
        let mut keys: Vec<(char, String)> = Vec::new();
        for action in self.grid.actions() {
            let Some(key) = action.key() else {
                continue;
            };
            let label = action.label().to_lowercase();
            match keys.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => {
                    existing.push('/');
                    existing.push_str(&label);
                }
                None => keys.push((key, label)),
            }
        }
        keys
    }

    fn action_label(&self, name: &str) -> Option<String> {
        self.grid
            .actions()
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.label().to_string())
    }

    fn action_for_key(&self, data: &PortalData, key: char, id: &str) -> Option<String> {
        let row = self.find(data, id)?;
        self.grid
            .actions()
            .iter()
            .find(|a| a.key() == Some(key) && a.is_available(row))
            .map(|a| a.name().to_string())
    }

    fn dispatch(&self, action: &str, id: &String) -> bool {
        self.grid.dispatch(action, id)
    }

    fn details(&self, data: &PortalData, id: &str) -> Option<Vec<(String, String)>> {
        let row = self.find(data, id)?;
        let mut fields = vec![("Id".to_string(), id.to_string())];
        fields.extend(
            self.data_columns()
                .into_iter()
                .map(|c| (c.header().text(None), c.render(row))),
        );
        Some(fields)
    }

    fn export_row(&self, data: &PortalData, id: &str) -> Option<serde_json::Value> {
        let row = self.find(data, id)?;
        let mut object = serde_json::Map::new();
        object.insert("id".to_string(), serde_json::json!(id));
        for column in self.data_columns() {
            object.insert(column.id().to_string(), serde_json::json!(column.render(row)));
        }
        Some(serde_json::Value::Object(object))
    }
}

fn documents(data: &PortalData) -> &[Document] {
    &data.documents
}

fn roles(data: &PortalData) -> &[Role] {
    &data.roles
}

fn users(data: &PortalData) -> &[User] {
    &data.users
}

fn departments(data: &PortalData) -> &[Department] {
    &data.departments
}

/// Apply the settings and backend wiring shared by every table.
fn configure<R>(
    grid: Grid<R, String>,
    table: Table,
    settings: &Settings,
    service: Option<&ServiceHandle>,
) -> Result<Grid<R, String>> {
    let mut initial = settings.initial_sort_for(table)?;
    let sortable = initial
        .column_id()
        .is_none_or(|id| grid.model().column(id).is_some_and(|c| c.is_sortable()));
    if !sortable {
        tracing::warn!(table = table.key(), sort = %initial, "ignoring initial sort on a non-sortable column");
        initial = SortState::unsorted();
    }

    let mut grid = grid
        .with_sort(SortController::uncontrolled().with_initial(initial))
        .with_observer(TracingObserver::new(table.key()))
        .empty_message(table.empty_message());
    if let Some(service) = service {
        grid = grid.with_handler(service.action_handler(table));
    }
    Ok(grid)
}

/// Build the view of one table.
pub fn build_view(
    table: Table,
    settings: &Settings,
    service: Option<&ServiceHandle>,
) -> Result<Box<dyn PortalTable>> {
    let view: Box<dyn PortalTable> = match table {
        Table::Documents => {
            let grid = Grid::new(tables::document_columns()?, tables::document_id)
                .with_actions(tables::document_actions());
            Box::new(TableView::new(table, configure(grid, table, settings, service)?, documents))
        }
        Table::Roles => {
            let grid = Grid::new(tables::role_columns()?, tables::role_id)
                .with_actions(tables::role_actions());
            Box::new(TableView::new(table, configure(grid, table, settings, service)?, roles))
        }
        Table::Users => {
            let grid = Grid::new(tables::user_columns()?, tables::user_id)
                .with_actions(tables::user_actions());
            Box::new(TableView::new(table, configure(grid, table, settings, service)?, users))
        }
        Table::Departments => {
            let grid = Grid::new(tables::department_columns()?, tables::department_id)
                .with_actions(tables::department_actions());
            Box::new(TableView::new(table, configure(grid, table, settings, service)?, departments))
        }
    };
    Ok(view)
}

/// Build the views of every table, in tab order.
pub fn build_views(
    settings: &Settings,
    service: Option<&ServiceHandle>,
) -> Result<Vec<Box<dyn PortalTable>>> {
    Table::ALL
        .into_iter()
        .map(|table| build_view(table, settings, service))
        .collect()
}

/// Selected ids of a view, sorted for stable output.
pub fn sorted_selection(view: &dyn PortalTable) -> Vec<String> {
    let mut ids: Vec<String> = view.selection().selected().iter().cloned().collect();
    ids.sort();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::action;
    use crate::grid::{GridBody, SortDirection};

    fn view(table: Table) -> Box<dyn PortalTable> {
        build_view(table, &Settings::default(), None).unwrap()
    }

    #[test]
    fn test_render_filters_and_pages() {
        let data = PortalData::sample();
        let view = view(Table::Documents);

        let page = view.render(&data, "", 5);
        assert_eq!(page.rows().len(), 5);
        assert_eq!(page.total_rows, data.documents.len());
        assert_eq!(page.page_count, data.documents.len().div_ceil(5));

        let filtered = view.render(&data, "permit", 50);
        assert!(filtered.total_rows > 0);
        assert!(filtered.total_rows < data.documents.len());

        let none = view.render(&data, "zzz-no-match", 5);
        assert!(matches!(none.body, GridBody::Empty { .. }));
    }

    #[test]
    fn test_initial_sort_from_settings() {
        let mut settings = Settings::default();
        settings.initial_sort.roles = Some("members:desc".to_string());
        settings.initial_sort.users = Some("email".to_string());
        let roles = build_view(Table::Roles, &settings, None).unwrap();
        let users = build_view(Table::Users, &settings, None).unwrap();

        assert_eq!(roles.sort().state(), &SortState::by("members", SortDirection::Descending));
        assert!(!users.sort().state().is_sorted());
    }

    #[test]
    fn test_focus_wraps_and_skips_checkbox() {
        let mut view = view(Table::Roles);
        assert_eq!(view.focused_column().unwrap().id, "name");
        view.move_focus(-1);
        assert_eq!(view.focused_column().unwrap().id, "created");
        view.move_focus(2);
        assert_eq!(view.focused_column().unwrap().id, "description");
        assert!(view.focused_column().unwrap().hideable);
    }

    #[test]
    fn test_hotkeys_merge_shared_keys() {
        let users = view(Table::Users);
        assert_eq!(users.hotkeys(), vec![('t', "activate/deactivate".to_string())]);
        assert!(view(Table::Departments).hotkeys().is_empty());
    }

    #[test]
    fn test_action_for_key_respects_availability() {
        let data = PortalData::sample();
        let docs = view(Table::Documents);
        let pending = data.documents.iter().find(|d| d.is_pending()).unwrap();
        let done = data.documents.iter().find(|d| !d.is_pending()).unwrap();

        assert_eq!(docs.action_for_key(&data, 'y', &pending.id).as_deref(), Some(action::APPROVE));
        assert_eq!(docs.action_for_key(&data, 'y', &done.id), None);
        assert_eq!(docs.action_for_key(&data, 'y', "missing"), None);
    }

    #[test]
    fn test_details_and_export() {
        let data = PortalData::sample();
        let users = view(Table::Users);
        let user = &data.users[0];

        let details = users.details(&data, &user.id).unwrap();
        assert_eq!(details[0], ("Id".to_string(), user.id.clone()));
        assert!(details.contains(&("Email".to_string(), user.email.clone())));

        let row = users.export_row(&data, &user.id).unwrap();
        assert_eq!(row["name"], serde_json::json!(user.name));
        assert!(row.get("select").is_none());
    }

    #[test]
    fn test_sorted_selection() {
        let mut roles = view(Table::Roles);
        roles.toggle_row("ROLE-TEMP".to_string());
        roles.toggle_row("ROLE-ADMIN".to_string());
        assert_eq!(sorted_selection(roles.as_ref()), vec!["ROLE-ADMIN", "ROLE-TEMP"]);
    }

    #[test]
    fn test_departments_are_not_selectable() {
        assert!(!view(Table::Departments).selectable());
        assert!(view(Table::Documents).selectable());
    }
}
