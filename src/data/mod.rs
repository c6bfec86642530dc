//! Portal records and the table definitions built over them.
//!
//! ## Submodules
//!
//! - [`model`]: the records ([`Document`], [`Role`], [`User`], [`Department`])
//!   and the [`PortalData`] dataset with JSON loading
//! - [`sample`]: the built-in mock dataset ([`PortalData::sample`])
//! - [`tables`]: column models and row actions for each [`Table`]
//!
//! ## Data Flow
//!
//! ```text
//! portal.json / PortalData::sample()
//!        │
//!        ▼
//! ReviewService ──▶ PortalSnapshot ──▶ App
//!                                        │
//!                                        └──▶ TableView (Grid per table)
//! ```

pub mod model;
pub mod sample;
pub mod tables;

pub use model::{Department, Document, PortalData, ReviewStatus, Role, User};
pub use tables::{action, Table, SELECT_COLUMN};
