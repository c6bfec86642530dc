//! Single-column sort state and the tri-state toggle cycle.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::column::ColumnModel;
use super::error::GridError;

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Apply this direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Arrow glyph used in headers.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// The active sort of one table: a column and a direction, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(String, SortDirection)>,
}

impl SortState {
    /// Unsorted state (insertion order).
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort by `column_id` in `direction`.
    pub fn by(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            active: Some((column_id.into(), direction)),
        }
    }

    pub fn column_id(&self) -> Option<&str> {
        self.active.as_ref().map(|(id, _)| id.as_str())
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.as_ref().map(|(_, dir)| *dir)
    }

    pub fn is_sorted(&self) -> bool {
        self.active.is_some()
    }

    /// Current direction of a given column, `None` if it is not the sorted one.
    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        match &self.active {
            Some((id, dir)) if id == column_id => Some(*dir),
            _ => None,
        }
    }

    /// The state after one toggle of `column_id`.
    ///
    /// The sorted column cycles `asc -> desc -> none`; any other column starts
    /// at `asc` and replaces the previous one.
    pub fn toggled(&self, column_id: &str) -> SortState {
        match self.direction_of(column_id) {
            None => SortState::by(column_id, SortDirection::Ascending),
            Some(SortDirection::Ascending) => SortState::by(column_id, SortDirection::Descending),
            Some(SortDirection::Descending) => SortState::unsorted(),
        }
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.active {
            Some((id, dir)) => write!(f, "{}:{}", id, dir.as_str()),
            None => f.write_str("none"),
        }
    }
}

impl FromStr for SortState {
    type Err = GridError;

    /// Parses `column`, `column:asc` or `column:desc`. `none` and the empty
    /// string mean unsorted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(SortState::unsorted());
        }

        let (column, direction) = match s.split_once(':') {
            Some((column, dir)) => {
                let direction = match dir.trim().to_ascii_lowercase().as_str() {
                    "asc" | "ascending" => SortDirection::Ascending,
                    "desc" | "descending" => SortDirection::Descending,
                    _ => return Err(GridError::InvalidSortSpec(s.to_string())),
                };
                (column.trim(), direction)
            }
            None => (s, SortDirection::Ascending),
        };

        if column.is_empty() {
            return Err(GridError::InvalidSortSpec(s.to_string()));
        }
        Ok(SortState::by(column, direction))
    }
}

/// Emitted when a toggle changes (or requests to change) the sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortChange {
    /// The column that was toggled.
    pub column_id: String,
    /// Its new direction; `None` when the cycle returned to unsorted.
    pub direction: Option<SortDirection>,
}

/// Who owns the sort state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// The controller owns the state and sorts rows itself.
    #[default]
    Uncontrolled,
    /// The caller owns the state and supplies rows already sorted. Toggles
    /// only produce change requests; the caller acknowledges with
    /// [`SortController::set_state`].
    Controlled,
}

/// Owns the sort state of one table instance.
#[derive(Debug, Clone, Default)]
pub struct SortController {
    mode: SortMode,
    state: SortState,
}

impl SortController {
    pub fn new(mode: SortMode) -> Self {
        Self {
            mode,
            state: SortState::unsorted(),
        }
    }

    pub fn uncontrolled() -> Self {
        Self::new(SortMode::Uncontrolled)
    }

    pub fn controlled() -> Self {
        Self::new(SortMode::Controlled)
    }

    /// Start from a given state instead of unsorted.
    pub fn with_initial(mut self, state: SortState) -> Self {
        self.state = state;
        self
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn state(&self) -> &SortState {
        &self.state
    }

    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        self.state.direction_of(column_id)
    }

    /// Replace the current state. In controlled mode this is how the caller
    /// acknowledges a change request.
    pub fn set_state(&mut self, state: SortState) {
        self.state = state;
    }

    /// Back to unsorted.
    pub fn reset(&mut self) {
        self.state = SortState::unsorted();
    }

    /// Advance the toggle cycle for `column_id`.
    ///
    /// Unknown and non-sortable columns are ignored and return `None`.
    /// Uncontrolled controllers commit the new state; controlled ones leave
    /// their state untouched and only report the requested change.
    pub fn toggle<R>(&mut self, model: &ColumnModel<R>, column_id: &str) -> Option<SortChange> {
        let column = model.column(column_id)?;
        if !column.is_sortable() {
            return None;
        }

        let next = self.state.toggled(column_id);
        let change = SortChange {
            column_id: column_id.to_string(),
            direction: next.direction(),
        };
        if self.mode == SortMode::Uncontrolled {
            self.state = next;
        }
        Some(change)
    }

    /// Display order for `rows` as indices into the slice.
    ///
    /// Uncontrolled controllers sort by the active column; controlled ones keep
    /// the order the caller supplied.
    pub fn arrange<R>(&self, model: &ColumnModel<R>, rows: &[&R]) -> Vec<usize> {
        match (self.mode, &self.state.active) {
            (SortMode::Uncontrolled, Some((column_id, direction))) => {
                model.sort_indices(rows, column_id, *direction)
            }
            _ => (0..rows.len()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ColumnSpec;

    struct Row {
        name: &'static str,
        rank: u32,
    }

    fn model() -> ColumnModel<Row> {
        ColumnModel::new(vec![
            ColumnSpec::new("name", "Name", |r: &Row| r.name.into()).sortable(),
            ColumnSpec::new("rank", "Rank", |r: &Row| r.rank.into()).sortable(),
            ColumnSpec::new("note", "Note", |_: &Row| "".into()),
        ])
        .unwrap()
    }

    #[test]
    fn test_toggle_cycles_through_three_states() {
        let model = model();
        let mut sort = SortController::uncontrolled();

        let change = sort.toggle(&model, "name").unwrap();
        assert_eq!(change.direction, Some(SortDirection::Ascending));
        assert_eq!(sort.direction_of("name"), Some(SortDirection::Ascending));

        let change = sort.toggle(&model, "name").unwrap();
        assert_eq!(change.direction, Some(SortDirection::Descending));

        let change = sort.toggle(&model, "name").unwrap();
        assert_eq!(change.direction, None);
        assert!(!sort.state().is_sorted());

        sort.toggle(&model, "name");
        assert_eq!(sort.direction_of("name"), Some(SortDirection::Ascending));
    }

    #[test]
    fn test_other_column_resets_previous() {
        let model = model();
        let mut sort = SortController::uncontrolled();
        sort.toggle(&model, "name");
        sort.toggle(&model, "name");

        let change = sort.toggle(&model, "rank").unwrap();
        assert_eq!(change.column_id, "rank");
        assert_eq!(change.direction, Some(SortDirection::Ascending));
        assert_eq!(sort.direction_of("name"), None);
    }

    #[test]
    fn test_non_sortable_and_unknown_are_noops() {
        let model = model();
        let mut sort = SortController::uncontrolled().with_initial(SortState::by(
            "rank",
            SortDirection::Descending,
        ));
        assert!(sort.toggle(&model, "note").is_none());
        assert!(sort.toggle(&model, "missing").is_none());
        assert_eq!(sort.state(), &SortState::by("rank", SortDirection::Descending));
    }

    #[test]
    fn test_controlled_only_requests() {
        let model = model();
        let mut sort = SortController::controlled();

        let change = sort.toggle(&model, "rank").unwrap();
        assert_eq!(change.direction, Some(SortDirection::Ascending));
        assert!(!sort.state().is_sorted());

        sort.set_state(SortState::by("rank", SortDirection::Ascending));
        let change = sort.toggle(&model, "rank").unwrap();
        assert_eq!(change.direction, Some(SortDirection::Descending));
    }

    #[test]
    fn test_arrange_controlled_keeps_caller_order() {
        let model = model();
        let data = [Row { name: "b", rank: 2 }, Row { name: "a", rank: 1 }];
        let rows: Vec<&Row> = data.iter().collect();

        let sort = SortController::controlled()
            .with_initial(SortState::by("name", SortDirection::Ascending));
        assert_eq!(sort.arrange(&model, &rows), vec![0, 1]);

        let sort = SortController::uncontrolled()
            .with_initial(SortState::by("name", SortDirection::Ascending));
        assert_eq!(sort.arrange(&model, &rows), vec![1, 0]);
    }

    #[test]
    fn test_parse_sort_spec() {
        assert_eq!(
            "submitted:desc".parse::<SortState>().unwrap(),
            SortState::by("submitted", SortDirection::Descending)
        );
        assert_eq!(
            "title".parse::<SortState>().unwrap(),
            SortState::by("title", SortDirection::Ascending)
        );
        assert_eq!("none".parse::<SortState>().unwrap(), SortState::unsorted());
        assert!(matches!(
            "title:sideways".parse::<SortState>(),
            Err(GridError::InvalidSortSpec(_))
        ));
        assert!(":asc".parse::<SortState>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let state = SortState::by("members", SortDirection::Descending);
        assert_eq!(state.to_string(), "members:desc");
        assert_eq!(SortState::unsorted().to_string(), "none");
    }
}
