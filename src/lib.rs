//! # portal-grid
//!
//! Sortable, selectable, paged data grids for a municipal services portal,
//! with a terminal front end and a mock review backend.
//!
//! The core is a headless grid: a table is described once as a column model
//! over a record type, and each grid instance owns its sort and selection
//! state. The terminal UI renders four such grids (documents, roles, users,
//! departments) and forwards row actions to a background review service.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌─────────┐  │
//! │  │   app   │───▶│  views   │───▶│    ui    │───▶│Terminal │  │
//! │  │ (state) │    │ (tables) │    │(rendering)    │         │  │
//! │  └────┬────┘    └────┬─────┘    └──────────┘    └─────────┘  │
//! │       │              │                                       │
//! │       ▼              ▼                                       │
//! │  ┌─────────┐    ┌──────────┐                                 │
//! │  │ source  │    │   grid   │◀── ColumnModel + sort/selection │
//! │  │ (input) │    │(headless)│                                 │
//! │  └────┬────┘    └──────────┘                                 │
//! │       ▼                                                      │
//! │  ReviewService ◀── row actions                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`grid`]**: Column models, sort and selection controllers, paging and
//!   the [`Grid`] that renders rows into a front-end neutral [`RenderedGrid`]
//! - **[`data`]**: Portal records, the sample dataset and the table definitions
//! - **[`views`]**: One grid per table plus its cursor, page and column focus
//! - **[`source`]**: The [`DataSource`] trait and the mock [`ReviewService`]
//! - **[`app`]**: Application state and user interaction logic
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]** and **[`logging`]**: Layered configuration and tracing setup
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Interactive grids over the built-in sample data
//! portal-grid
//!
//! # Load a dataset and log to a file
//! portal-grid --data portal.json --log-file portal.log
//!
//! # Print a table and exit
//! portal-grid --print roles --sort members:desc
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use portal_grid::{App, ChannelSource, PortalData, PortalSnapshot, Settings};
//! use portal_grid::settings::ThemeChoice;
//!
//! # fn main() -> anyhow::Result<()> {
//! let (tx, source) = ChannelSource::create("in-memory");
//! tx.send(PortalSnapshot::new(1, PortalData::sample()))?;
//!
//! let settings = Settings {
//!     theme: ThemeChoice::Dark,
//!     ..Settings::default()
//! };
//! let mut app = App::new(Box::new(source), settings, None)?;
//! app.refresh();
//! assert_eq!(app.rendered().map(|g| g.total_rows), Some(18));
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod grid;
pub mod logging;
pub mod settings;
pub mod source;
pub mod ui;
pub mod views;

// Re-export main types for convenience
pub use app::App;
pub use data::{Department, Document, PortalData, ReviewStatus, Role, Table, User};
pub use grid::{ColumnModel, ColumnSpec, Grid, GridError, RenderedGrid, SortDirection, SortState};
pub use settings::Settings;
pub use source::{ChannelSource, DataSource, PortalSnapshot, ReviewService, ServiceHandle};
pub use views::PortalTable;
