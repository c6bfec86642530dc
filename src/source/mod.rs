//! Data source abstraction for receiving portal snapshots.
//!
//! The TUI only ever sees a [`DataSource`]. In interactive mode that is a
//! [`ChannelSource`] fed by the [`ReviewService`] task, which also receives
//! the row actions dispatched by the grids.

mod channel;
mod service;
mod snapshot;

pub use channel::ChannelSource;
pub use service::{Origin, ReviewService, ServiceCommand, ServiceHandle};
pub use snapshot::PortalSnapshot;

use std::fmt::Debug;

/// Trait for receiving portal data from various sources.
///
/// # Example
///
/// ```
/// use portal_grid::source::{ChannelSource, DataSource};
///
/// let (_tx, mut source) = ChannelSource::create("in-memory");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} documents", snapshot.data.documents.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<PortalSnapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header bar.
    fn description(&self) -> &str;

    /// Returns the error message if the source can no longer deliver data.
    fn error(&self) -> Option<&str>;
}
