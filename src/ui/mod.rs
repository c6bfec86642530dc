//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`grid`]: The table of the current tab, with checkboxes, sort arrows and
//!   row actions
//! - [`detail`]: Modal overlay with every field of the row under the cursor
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`plain`]: Aligned plain-text output for non-interactive use
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Table (grid::render)                 │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod detail;
pub mod grid;
pub mod plain;
pub mod theme;

pub use theme::Theme;
