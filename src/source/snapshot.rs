//! The unit of data handed from a source to the application.

use std::sync::Arc;

use crate::data::PortalData;

/// One published state of the portal dataset.
///
/// `dataset` changes only when the data is replaced wholesale (initial load,
/// reload). `revision` changes on every publication, including edits made by
/// row actions. Consumers clear row selection when `dataset` changes and keep
/// it otherwise.
#[derive(Debug, Clone, Default)]
pub struct PortalSnapshot {
    pub dataset: u64,
    pub revision: u64,
    pub data: Arc<PortalData>,
    /// Outcome of the command that produced this snapshot, for the status bar.
    pub notice: Option<String>,
}

impl PortalSnapshot {
    /// First snapshot of a freshly loaded dataset.
    pub fn new(dataset: u64, data: PortalData) -> Self {
        Self {
            dataset,
            revision: 0,
            data: Arc::new(data),
            notice: None,
        }
    }

    /// Whether this snapshot replaces the dataset of `previous`.
    pub fn replaces(&self, previous: Option<&PortalSnapshot>) -> bool {
        previous.is_none_or(|p| p.dataset != self.dataset)
    }
}
