//! Column definitions and the column model.
//!
//! A [`ColumnModel`] is the static description of a table: an ordered list of
//! [`ColumnSpec`]s, each binding a column id to an accessor over the row type.
//! The model is validated once at construction and never mutated afterwards.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::error::GridError;
use super::sort::SortDirection;
use super::value::CellValue;

type Accessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;
type CellRenderer<R> = Arc<dyn Fn(&CellValue, &R) -> String + Send + Sync>;
type HeaderRenderer = Arc<dyn Fn(Option<SortDirection>) -> String + Send + Sync>;

/// Layout hint for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Share of the remaining space, by weight.
    Fill(u16),
    /// Exactly this many terminal columns.
    Length(u16),
    /// At least this many terminal columns.
    Min(u16),
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Fill(1)
    }
}

/// How a column header is produced.
#[derive(Clone)]
pub enum Header {
    /// A fixed label.
    Label(String),
    /// A function of the column's current sort direction.
    Render(HeaderRenderer),
}

impl Header {
    /// Produce the header text for the given sort direction.
    pub fn text(&self, direction: Option<SortDirection>) -> String {
        match self {
            Header::Label(label) => label.clone(),
            Header::Render(render) => render(direction),
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Label(label) => f.debug_tuple("Label").field(label).finish(),
            Header::Render(_) => f.write_str("Render(..)"),
        }
    }
}

/// One column of a table over rows of type `R`.
///
/// # Example
///
/// ```
/// use portal_grid::grid::{ColumnSpec, ColumnWidth};
///
/// struct Role {
///     name: String,
///     members: u32,
/// }
///
/// let name = ColumnSpec::new("name", "Name", |r: &Role| r.name.as_str().into())
///     .sortable()
///     .width(ColumnWidth::Fill(2));
/// let members = ColumnSpec::new("members", "Members", |r: &Role| r.members.into())
///     .sortable()
///     .cell(|value, _| format!("{} people", value));
///
/// assert!(name.is_sortable());
/// assert_eq!(members.id(), "members");
/// ```
pub struct ColumnSpec<R> {
    id: String,
    header: Header,
    accessor: Accessor<R>,
    cell: Option<CellRenderer<R>>,
    sortable: bool,
    hideable: bool,
    selection_control: bool,
    width: ColumnWidth,
}

impl<R> ColumnSpec<R> {
    /// Create a data column with a static header label.
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: Header::Label(label.into()),
            accessor: Arc::new(accessor),
            cell: None,
            sortable: false,
            hideable: false,
            selection_control: false,
            width: ColumnWidth::default(),
        }
    }

    /// Create the checkbox column used for row selection.
    ///
    /// Its cells are rendered from the selection state rather than from the row.
    pub fn selection(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: Header::Label(String::new()),
            accessor: Arc::new(|_| CellValue::Empty),
            cell: None,
            sortable: false,
            hideable: false,
            selection_control: true,
            width: ColumnWidth::Length(3),
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Allow the column to be hidden at runtime.
    pub fn hideable(mut self) -> Self {
        self.hideable = true;
        self
    }

    /// Set the layout width hint.
    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    /// Render the header with a function of the current sort direction.
    pub fn header_with<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<SortDirection>) -> String + Send + Sync + 'static,
    {
        self.header = Header::Render(Arc::new(render));
        self
    }

    /// Render cells with a custom function instead of the value's display.
    pub fn cell<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellValue, &R) -> String + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(render));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_hideable(&self) -> bool {
        self.hideable
    }

    pub fn is_selection_control(&self) -> bool {
        self.selection_control
    }

    pub fn layout_width(&self) -> ColumnWidth {
        self.width
    }

    /// Extract the column value from a row.
    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }

    /// Render the display text of this column for a row.
    pub fn render(&self, row: &R) -> String {
        let value = self.value(row);
        match &self.cell {
            Some(render) => render(&value, row),
            None => value.to_string(),
        }
    }
}

impl<R> Clone for ColumnSpec<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: Arc::clone(&self.accessor),
            cell: self.cell.clone(),
            sortable: self.sortable,
            hideable: self.hideable,
            selection_control: self.selection_control,
            width: self.width,
        }
    }
}

impl<R> fmt::Debug for ColumnSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .field("selection_control", &self.selection_control)
            .field("width", &self.width)
            .finish()
    }
}

/// Validated, ordered set of columns for one table definition.
pub struct ColumnModel<R> {
    columns: Vec<ColumnSpec<R>>,
}

impl<R> ColumnModel<R> {
    /// Build a model, rejecting ambiguous definitions.
    ///
    /// Fails on an empty id, a duplicate id, or a second selection column.
    pub fn new(columns: Vec<ColumnSpec<R>>) -> Result<Self, GridError> {
        let mut seen = HashSet::with_capacity(columns.len());
        let mut has_selection = false;

        for column in &columns {
            if column.id.is_empty() {
                return Err(GridError::EmptyColumnId);
            }
            if !seen.insert(column.id.as_str()) {
                return Err(GridError::DuplicateColumn(column.id.clone()));
            }
            if column.selection_control {
                if has_selection {
                    return Err(GridError::MultipleSelectionColumns(column.id.clone()));
                }
                has_selection = true;
            }
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[ColumnSpec<R>] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnSpec<R>> {
        self.columns.iter()
    }

    /// Look up a column by id.
    pub fn column(&self, id: &str) -> Option<&ColumnSpec<R>> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Position of a column by id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// The checkbox column, if the model has one.
    pub fn selection_column(&self) -> Option<&ColumnSpec<R>> {
        self.columns.iter().find(|c| c.selection_control)
    }

    /// Render every cell of a row, in column order.
    pub fn render_row(&self, row: &R) -> Vec<String> {
        self.columns.iter().map(|c| c.render(row)).collect()
    }

    /// Case-insensitive substring match against the rendered data cells.
    pub fn matches(&self, row: &R, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.columns
            .iter()
            .filter(|c| !c.selection_control)
            .any(|c| c.render(row).to_lowercase().contains(&needle))
    }

    /// Order of `rows` sorted by a column.
    ///
    /// Returns indices into `rows`. The sort is stable: rows with equal keys keep
    /// their relative order in both directions. Empty values go last regardless
    /// of direction. An unknown column yields the natural order.
    pub fn sort_indices(&self, rows: &[&R], column_id: &str, direction: SortDirection) -> Vec<usize> {
        let mut order: Vec<usize> = (0..rows.len()).collect();
        let Some(column) = self.column(column_id) else {
            return order;
        };

        let keys: Vec<CellValue> = rows.iter().map(|row| column.value(row)).collect();
        order.sort_by(|&a, &b| {
            let (ka, kb) = (&keys[a], &keys[b]);
            match (ka.is_empty(), kb.is_empty()) {
                (true, true) => std::cmp::Ordering::Equal,
                (true, false) => std::cmp::Ordering::Greater,
                (false, true) => std::cmp::Ordering::Less,
                (false, false) => direction.apply(ka.natural_cmp(kb)),
            }
        });
        order
    }
}

impl<R> Clone for ColumnModel<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnModel<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}
