//! Row actions and the collaborator traits the grid talks to.

use std::collections::HashSet;
use std::fmt;
use std::fmt::Debug;
use std::sync::Arc;

use super::sort::SortChange;

type Availability<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// A per-row action offered by a table (view, approve, reject, ...).
pub struct RowAction<R> {
    name: String,
    label: String,
    hotkey: Option<char>,
    available: Option<Availability<R>>,
}

impl<R> RowAction<R> {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            hotkey: None,
            available: None,
        }
    }

    /// Keyboard shortcut shown next to the label.
    pub fn hotkey(mut self, key: char) -> Self {
        self.hotkey = Some(key);
        self
    }

    /// Only offer the action for rows matching the predicate.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.available = Some(Arc::new(predicate));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> Option<char> {
        self.hotkey
    }

    /// Whether the action is offered for `row`.
    pub fn is_available(&self, row: &R) -> bool {
        self.available.as_ref().is_none_or(|p| p(row))
    }
}

impl<R> Clone for RowAction<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            label: self.label.clone(),
            hotkey: self.hotkey,
            available: self.available.clone(),
        }
    }
}

impl<R> fmt::Debug for RowAction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("hotkey", &self.hotkey)
            .finish()
    }
}

/// Receives row actions. Fire-and-forget: the grid never waits on or reads
/// anything back from the handler. Work that takes time should be handed off
/// (for example to a channel) and its outcome fed back as new rows.
pub trait ActionHandler<Id>: Send + Sync {
    fn handle(&self, action: &str, row_id: &Id);
}

impl<Id, F> ActionHandler<Id> for F
where
    F: Fn(&str, &Id) + Send + Sync,
{
    fn handle(&self, action: &str, row_id: &Id) {
        self(action, row_id)
    }
}

/// Notified after sort and selection state changes.
pub trait GridObserver<Id>: Send {
    fn sort_changed(&mut self, _change: &SortChange) {}

    fn selection_changed(&mut self, _selected: &HashSet<Id>) {}
}

/// Observer that reports changes through `tracing`.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    table: String,
}

impl TracingObserver {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

impl<Id: Debug> GridObserver<Id> for TracingObserver {
    fn sort_changed(&mut self, change: &SortChange) {
        tracing::debug!(
            table = %self.table,
            column = %change.column_id,
            direction = ?change.direction,
            "sort changed"
        );
    }

    fn selection_changed(&mut self, selected: &HashSet<Id>) {
        tracing::debug!(table = %self.table, selected = selected.len(), "selection changed");
    }
}
