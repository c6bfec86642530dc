//! Error types for grid construction.

use thiserror::Error;

/// Errors raised while building a grid definition.
///
/// Only misconfiguration is fatal. Everything that can go wrong while rendering
/// (missing fields, unknown ids, unknown columns) degrades to a no-op or an empty
/// cell instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Two column specs share the same id.
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),

    /// A column spec was given an empty id.
    #[error("column id must not be empty")]
    EmptyColumnId,

    /// More than one column is marked as the selection checkbox column.
    #[error("only one selection column is allowed, found a second one: {0}")]
    MultipleSelectionColumns(String),

    /// A textual sort spec could not be parsed.
    #[error("invalid sort spec '{0}', expected <column>[:asc|desc]")]
    InvalidSortSpec(String),
}
