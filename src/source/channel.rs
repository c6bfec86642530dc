//! Channel-based data source.
//!
//! Receives portal snapshots via a tokio watch channel. The review service
//! publishes into the sender; the TUI polls the receiver once per tick.

use tokio::sync::watch;

use super::{DataSource, PortalSnapshot};

/// A data source that receives portal snapshots via a channel.
///
/// # Example
///
/// ```
/// use portal_grid::source::{ChannelSource, DataSource};
///
/// let (tx, mut source) = ChannelSource::create("in-memory");
/// assert!(source.poll().is_some());
/// assert!(source.poll().is_none());
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<PortalSnapshot>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// `source_description` names where snapshots come from (e.g. the data
    /// file) and is shown in the header bar.
    pub fn new(receiver: watch::Receiver<PortalSnapshot>, source_description: &str) -> Self {
        Self {
            receiver,
            description: source_description.to_string(),
            initial_returned: false,
        }
    }

    /// Create a channel pair seeded with an empty snapshot.
    pub fn create(source_description: &str) -> (watch::Sender<PortalSnapshot>, Self) {
        let (tx, rx) = watch::channel(PortalSnapshot::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<PortalSnapshot> {
        // Return the initial value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            return Some(self.receiver.borrow_and_update().clone());
        }

        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        if self.receiver.has_changed().is_err() {
            Some("review service stopped")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PortalData;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // Initially returns the default (empty) snapshot
        let snapshot = source.poll().unwrap();
        assert!(snapshot.data.documents.is_empty());

        // No change, so poll returns None
        assert!(source.poll().is_none());

        tx.send(PortalSnapshot::new(1, PortalData::sample())).unwrap();

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.dataset, 1);
        assert!(!snapshot.data.documents.is_empty());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_closed_channel_reports_error() {
        let (tx, mut source) = ChannelSource::create("test");
        source.poll();
        drop(tx);

        assert!(source.poll().is_none());
        assert_eq!(source.error(), Some("review service stopped"));
    }
}
