//! Headless data grid.
//!
//! A table is described once by a [`ColumnModel`] over a caller-defined row
//! type. Each table instance then owns a [`SortController`] and a
//! [`SelectionController`]; [`Grid`] bundles them and produces a
//! [`RenderedGrid`] that a front end turns into widgets.
//!
//! Nothing in here fetches, persists or validates rows. Row actions are handed
//! to an [`ActionHandler`] and their effects come back as new rows.

mod action;
mod column;
mod error;
mod page;
mod render;
mod selection;
mod sort;
mod value;

pub use action::{ActionHandler, GridObserver, RowAction, TracingObserver};
pub use column::{ColumnModel, ColumnSpec, ColumnWidth, Header};
pub use error::GridError;
pub use page::Page;
pub use render::{
    Grid, GridBody, GridRenderer, HeaderCell, RenderedCell, RenderedGrid, RenderedRow,
    DEFAULT_EMPTY_MESSAGE,
};
pub use selection::{HeaderCheckState, SelectionController};
pub use sort::{SortChange, SortController, SortDirection, SortMode, SortState};
pub use value::{CellValue, DATE_FORMAT};
