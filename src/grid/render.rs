//! Composition of the column model, sort and selection controllers into a
//! rendered table.
//!
//! [`GridRenderer`] is a stateless function over borrowed parts. [`Grid`] owns
//! the parts for one table instance and forwards interactions into them.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use super::action::{ActionHandler, GridObserver, RowAction};
use super::column::{ColumnModel, ColumnWidth};
use super::page::Page;
use super::selection::{HeaderCheckState, SelectionController};
use super::sort::{SortChange, SortController, SortDirection, SortState};

/// Message used when a grid has nothing to show.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No records found";

/// One rendered header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    /// Column id; feed it back to [`Grid::toggle_sort`] to request a sort.
    pub column_id: String,
    pub label: String,
    pub sortable: bool,
    pub direction: Option<SortDirection>,
    pub selection_control: bool,
    pub width: ColumnWidth,
}

/// One rendered body cell.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedCell {
    Text(String),
    Checkbox(bool),
}

impl RenderedCell {
    /// Plain-text form of the cell.
    pub fn text(&self) -> &str {
        match self {
            RenderedCell::Text(text) => text,
            RenderedCell::Checkbox(true) => HeaderCheckState::Checked.glyph(),
            RenderedCell::Checkbox(false) => HeaderCheckState::Unchecked.glyph(),
        }
    }
}

/// One rendered data row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow<Id> {
    pub id: Id,
    /// Position of the row in the sequence handed to the renderer.
    pub source_index: usize,
    pub selected: bool,
    pub cells: Vec<RenderedCell>,
    /// Names of the actions offered for this row.
    pub actions: Vec<String>,
}

/// Table body: either rows or the designated empty state.
#[derive(Debug, Clone, PartialEq)]
pub enum GridBody<Id> {
    Empty { message: String },
    Rows(Vec<RenderedRow<Id>>),
}

/// The full output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedGrid<Id> {
    pub header: Vec<HeaderCell>,
    /// Select-all state over the visible rows.
    pub select_all: HeaderCheckState,
    pub body: GridBody<Id>,
    /// Row count before paging.
    pub total_rows: usize,
    /// The page actually shown, after clamping.
    pub page: Option<Page>,
    pub page_count: usize,
    pub sort: SortState,
}

impl<Id: Clone> RenderedGrid<Id> {
    pub fn rows(&self) -> &[RenderedRow<Id>] {
        match &self.body {
            GridBody::Rows(rows) => rows,
            GridBody::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    /// Ids of the visible rows, in display order.
    pub fn visible_ids(&self) -> Vec<Id> {
        self.rows().iter().map(|r| r.id.clone()).collect()
    }

    pub fn row(&self, position: usize) -> Option<&RenderedRow<Id>> {
        self.rows().get(position)
    }

    /// Position of a column among the rendered (non-hidden) header cells.
    pub fn column_position(&self, column_id: &str) -> Option<usize> {
        self.header.iter().position(|h| h.column_id == column_id)
    }
}

/// Stateless renderer over borrowed grid parts.
pub struct GridRenderer<'a, R, Id> {
    pub model: &'a ColumnModel<R>,
    pub identity: &'a (dyn Fn(&R) -> Id + Send + Sync),
    pub actions: &'a [RowAction<R>],
    pub sort: &'a SortController,
    pub selection: &'a SelectionController<Id>,
    pub hidden: &'a HashSet<String>,
    pub empty_message: &'a str,
}

impl<R, Id: Eq + Hash + Clone> GridRenderer<'_, R, Id> {
    /// Sort, page and render `rows`.
    pub fn render(&self, rows: &[&R], page: Option<Page>) -> RenderedGrid<Id> {
        let order = self.sort.arrange(self.model, rows);
        let total_rows = order.len();

        let (window, page, page_count) = match page {
            Some(page) => {
                let page = page.clamped(total_rows);
                (page.range(total_rows), Some(page), Page::count(page.size, total_rows))
            }
            None => (0..total_rows, None, 1),
        };
        let visible = &order[window];

        let ids: Vec<Id> = visible.iter().map(|&i| (self.identity)(rows[i])).collect();
        let select_all = self.selection.header_state(&ids);

        let columns: Vec<_> = self
            .model
            .iter()
            .filter(|c| !self.hidden.contains(c.id()))
            .collect();

        let header = columns
            .iter()
            .map(|c| {
                let direction = self.sort.direction_of(c.id());
                let label = if c.is_selection_control() {
                    select_all.glyph().to_string()
                } else {
                    c.header().text(direction)
                };
                HeaderCell {
                    column_id: c.id().to_string(),
                    label,
                    sortable: c.is_sortable(),
                    direction,
                    selection_control: c.is_selection_control(),
                    width: c.layout_width(),
                }
            })
            .collect();

        let body = if visible.is_empty() {
            GridBody::Empty {
                message: self.empty_message.to_string(),
            }
        } else {
            let rendered = visible
                .iter()
                .zip(ids)
                .map(|(&index, id)| {
                    let row = rows[index];
                    let selected = self.selection.is_selected(&id);
                    let cells = columns
                        .iter()
                        .map(|c| {
                            if c.is_selection_control() {
                                RenderedCell::Checkbox(selected)
                            } else {
                                RenderedCell::Text(c.render(row))
                            }
                        })
                        .collect();
                    let actions = self
                        .actions
                        .iter()
                        .filter(|a| a.is_available(row))
                        .map(|a| a.name().to_string())
                        .collect();
                    RenderedRow {
                        id,
                        source_index: index,
                        selected,
                        cells,
                        actions,
                    }
                })
                .collect();
            GridBody::Rows(rendered)
        };

        RenderedGrid {
            header,
            select_all,
            body,
            total_rows,
            page,
            page_count,
            sort: self.sort.state().clone(),
        }
    }
}

/// One table instance: its definition plus its own sort and selection state.
///
/// # Example
///
/// ```
/// use portal_grid::grid::{ColumnModel, ColumnSpec, Grid, HeaderCheckState};
///
/// struct Role {
///     id: &'static str,
///     name: &'static str,
/// }
///
/// let model = ColumnModel::new(vec![
///     ColumnSpec::selection("select"),
///     ColumnSpec::new("name", "Name", |r: &Role| r.name.into()).sortable(),
/// ])
/// .unwrap();
/// let mut grid = Grid::new(model, |r: &Role| r.id.to_string());
///
/// let roles = vec![Role { id: "r1", name: "Clerk" }, Role { id: "r2", name: "Auditor" }];
/// grid.toggle_sort("name");
/// grid.toggle_row("r1".to_string());
///
/// let rendered = grid.render(&roles);
/// assert_eq!(rendered.visible_ids(), vec!["r2".to_string(), "r1".to_string()]);
/// assert_eq!(rendered.select_all, HeaderCheckState::Indeterminate);
/// ```
pub struct Grid<R, Id> {
    model: ColumnModel<R>,
    identity: Arc<dyn Fn(&R) -> Id + Send + Sync>,
    actions: Vec<RowAction<R>>,
    sort: SortController,
    selection: SelectionController<Id>,
    hidden: HashSet<String>,
    empty_message: String,
    handler: Option<Arc<dyn ActionHandler<Id>>>,
    observer: Option<Box<dyn GridObserver<Id>>>,
}

impl<R, Id: Eq + Hash + Clone + fmt::Debug> Grid<R, Id> {
    /// Create a grid with an uncontrolled sort and an empty selection.
    pub fn new<F>(model: ColumnModel<R>, identity: F) -> Self
    where
        F: Fn(&R) -> Id + Send + Sync + 'static,
    {
        Self {
            model,
            identity: Arc::new(identity),
            actions: Vec::new(),
            sort: SortController::uncontrolled(),
            selection: SelectionController::new(),
            hidden: HashSet::new(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            handler: None,
            observer: None,
        }
    }

    pub fn with_actions(mut self, actions: Vec<RowAction<R>>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_sort(mut self, sort: SortController) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_handler(mut self, handler: impl ActionHandler<Id> + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn with_observer(mut self, observer: impl GridObserver<Id> + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn model(&self) -> &ColumnModel<R> {
        &self.model
    }

    pub fn sort(&self) -> &SortController {
        &self.sort
    }

    pub fn selection(&self) -> &SelectionController<Id> {
        &self.selection
    }

    pub fn actions(&self) -> &[RowAction<R>] {
        &self.actions
    }

    /// The action bound to a hotkey, if any.
    pub fn action_for_key(&self, key: char) -> Option<&RowAction<R>> {
        self.actions.iter().find(|a| a.key() == Some(key))
    }

    pub fn row_id(&self, row: &R) -> Id {
        (self.identity)(row)
    }

    pub fn is_hidden(&self, column_id: &str) -> bool {
        self.hidden.contains(column_id)
    }

    fn renderer(&self) -> GridRenderer<'_, R, Id> {
        GridRenderer {
            model: &self.model,
            identity: self.identity.as_ref(),
            actions: &self.actions,
            sort: &self.sort,
            selection: &self.selection,
            hidden: &self.hidden,
            empty_message: &self.empty_message,
        }
    }

    /// Render all rows.
    pub fn render<'r, I>(&self, rows: I) -> RenderedGrid<Id>
    where
        I: IntoIterator<Item = &'r R>,
        R: 'r,
    {
        let rows: Vec<&R> = rows.into_iter().collect();
        self.renderer().render(&rows, None)
    }

    /// Render one page of the sorted rows.
    pub fn render_page<'r, I>(&self, rows: I, page: Page) -> RenderedGrid<Id>
    where
        I: IntoIterator<Item = &'r R>,
        R: 'r,
    {
        let rows: Vec<&R> = rows.into_iter().collect();
        self.renderer().render(&rows, Some(page))
    }

    /// Advance the sort cycle of a column. See [`SortController::toggle`].
    pub fn toggle_sort(&mut self, column_id: &str) -> Option<SortChange> {
        let change = self.sort.toggle(&self.model, column_id)?;
        if let Some(observer) = self.observer.as_mut() {
            observer.sort_changed(&change);
        }
        Some(change)
    }

    /// Replace the sort state, e.g. to acknowledge a controlled change.
    pub fn set_sort_state(&mut self, state: SortState) {
        self.sort.set_state(state);
    }

    pub fn toggle_row(&mut self, id: Id) -> bool {
        let selected = self.selection.toggle_row(id);
        self.notify_selection();
        selected
    }

    pub fn toggle_all_visible(&mut self, visible: &[Id]) -> HeaderCheckState {
        let state = self.selection.toggle_all_visible(visible);
        self.notify_selection();
        state
    }

    /// Forget the whole selection. Call when the dataset is replaced.
    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.notify_selection();
    }

    fn notify_selection(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.selection_changed(self.selection.selected());
        }
    }

    /// Hide or show a hideable column. Returns whether it is now hidden, or
    /// `None` if the column is unknown or not hideable.
    pub fn toggle_column(&mut self, column_id: &str) -> Option<bool> {
        let column = self.model.column(column_id)?;
        if !column.is_hideable() {
            return None;
        }
        if self.hidden.remove(column_id) {
            Some(false)
        } else {
            self.hidden.insert(column_id.to_string());
            Some(true)
        }
    }

    /// Hand an action to the handler without waiting for it.
    ///
    /// Returns false when the action is not defined for this grid or no
    /// handler is attached.
    pub fn dispatch(&self, action: &str, row_id: &Id) -> bool {
        if !self.actions.iter().any(|a| a.name() == action) {
            tracing::warn!(action, ?row_id, "ignoring unknown row action");
            return false;
        }
        match &self.handler {
            Some(handler) => {
                tracing::debug!(action, ?row_id, "dispatching row action");
                handler.handle(action, row_id);
                true
            }
            None => false,
        }
    }
}

impl<R, Id> fmt::Debug for Grid<R, Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("model", &self.model)
            .field("actions", &self.actions)
            .field("sort", &self.sort)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ColumnSpec;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct Doc {
        id: &'static str,
        title: &'static str,
        pending: bool,
    }

    fn docs() -> Vec<Doc> {
        vec![
            Doc { id: "r1", title: "Permit", pending: true },
            Doc { id: "r2", title: "Appeal", pending: false },
            Doc { id: "r3", title: "Census", pending: true },
        ]
    }

    fn grid() -> Grid<Doc, String> {
        let model = ColumnModel::new(vec![
            ColumnSpec::selection("select"),
            ColumnSpec::new("title", "Title", |d: &Doc| d.title.into()).sortable(),
            ColumnSpec::new("note", "Note", |_: &Doc| "-".into()).hideable(),
        ])
        .unwrap();
        Grid::new(model, |d: &Doc| d.id.to_string()).with_actions(vec![
            RowAction::new("view", "View"),
            RowAction::new("approve", "Approve").hotkey('y').when(|d: &Doc| d.pending),
        ])
    }

    fn id(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_render_header_and_rows() {
        let grid = grid();
        let data = docs();
        let rendered = grid.render(&data);

        let labels: Vec<&str> = rendered.header.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["[ ]", "Title", "Note"]);
        assert!(rendered.header[0].selection_control);
        assert!(rendered.header[1].sortable);

        let first = rendered.row(0).unwrap();
        assert_eq!(first.id, "r1");
        assert_eq!(
            first.cells,
            vec![
                RenderedCell::Checkbox(false),
                RenderedCell::Text("Permit".into()),
                RenderedCell::Text("-".into()),
            ]
        );
        assert_eq!(first.actions, vec!["view", "approve"]);
        assert_eq!(rendered.row(1).unwrap().actions, vec!["view"]);
    }

    #[test]
    fn test_empty_state() {
        let grid = grid().empty_message("Nothing to review");
        let rendered = grid.render(&Vec::<Doc>::new());
        assert_eq!(
            rendered.body,
            GridBody::Empty {
                message: "Nothing to review".into()
            }
        );
        assert_eq!(rendered.header.len(), 3);
        assert_eq!(rendered.select_all, HeaderCheckState::Unchecked);
    }

    #[test]
    fn test_selection_survives_resort() {
        let mut grid = grid();
        let data = docs();
        grid.toggle_row(id("r2"));

        grid.toggle_sort("title");
        grid.toggle_sort("title");
        let desc = grid.render(&data);
        assert_eq!(desc.visible_ids(), vec![id("r1"), id("r3"), id("r2")]);
        assert!(desc.row(2).unwrap().selected);

        grid.toggle_sort("title");
        grid.toggle_sort("title");
        let asc = grid.render(&data);
        assert_eq!(asc.visible_ids(), vec![id("r2"), id("r3"), id("r1")]);
        assert!(asc.row(0).unwrap().selected);
    }

    #[test]
    fn test_header_sort_direction() {
        let mut grid = grid();
        grid.toggle_sort("title");
        let rendered = grid.render(&docs());
        assert_eq!(rendered.header[1].direction, Some(SortDirection::Ascending));
        assert_eq!(rendered.header[2].direction, None);
        assert_eq!(rendered.sort, SortState::by("title", SortDirection::Ascending));
    }

    #[test]
    fn test_paging_scopes_header_state() {
        let mut grid = grid();
        let data = docs();

        let first = grid.render_page(&data, Page::new(0, 2));
        assert_eq!(first.page_count, 2);
        grid.toggle_all_visible(&first.visible_ids());

        let first = grid.render_page(&data, Page::new(0, 2));
        assert_eq!(first.select_all, HeaderCheckState::Checked);

        let second = grid.render_page(&data, Page::new(1, 2));
        assert_eq!(second.visible_ids(), vec![id("r3")]);
        assert_eq!(second.select_all, HeaderCheckState::Unchecked);

        let all = grid.render(&data);
        assert_eq!(all.select_all, HeaderCheckState::Indeterminate);
    }

    #[test]
    fn test_hidden_columns() {
        let mut grid = grid();
        assert_eq!(grid.toggle_column("title"), None);
        assert_eq!(grid.toggle_column("note"), Some(true));

        let rendered = grid.render(&docs());
        assert_eq!(rendered.header.len(), 2);
        assert_eq!(rendered.row(0).unwrap().cells.len(), 2);
        assert_eq!(rendered.column_position("note"), None);

        assert_eq!(grid.toggle_column("note"), Some(false));
        assert!(!grid.is_hidden("note"));
    }

    #[test]
    fn test_dispatch_reaches_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let grid = grid().with_handler(move |action: &str, id: &String| {
            sink.lock().unwrap().push((action.to_string(), id.clone()));
        });

        assert!(grid.dispatch("approve", &id("r3")));
        assert!(!grid.dispatch("shred", &id("r3")));
        assert_eq!(*seen.lock().unwrap(), vec![("approve".to_string(), id("r3"))]);
    }

    #[test]
    fn test_dispatch_without_handler() {
        assert!(!grid().dispatch("view", &id("r1")));
    }

    #[test]
    fn test_observer_sees_changes() {
        #[derive(Clone, Default)]
        struct Recorder(Arc<Mutex<Vec<String>>>);

        impl GridObserver<String> for Recorder {
            fn sort_changed(&mut self, change: &SortChange) {
                self.0.lock().unwrap().push(format!("sort {}", change.column_id));
            }
            fn selection_changed(&mut self, selected: &HashSet<String>) {
                self.0.lock().unwrap().push(format!("selected {}", selected.len()));
            }
        }

        let recorder = Recorder::default();
        let mut grid = grid().with_observer(recorder.clone());
        grid.toggle_sort("title");
        grid.toggle_sort("note");
        grid.toggle_row(id("r1"));
        grid.clear_selection();
        grid.clear_selection();

        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec!["sort title", "selected 1", "selected 0"]
        );
    }

    #[test]
    fn test_action_for_key() {
        let grid = grid();
        assert_eq!(grid.action_for_key('y').map(|a| a.name()), Some("approve"));
        assert!(grid.action_for_key('z').is_none());
    }
}
