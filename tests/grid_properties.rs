use std::cmp::Ordering;
use std::collections::HashSet;

use portal_grid::grid::{
    ColumnModel, ColumnSpec, HeaderCheckState, SelectionController, SortController,
    SortDirection,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Item {
    key: Option<i8>,
}

fn model() -> ColumnModel<Item> {
    ColumnModel::new(vec![
        ColumnSpec::new("key", "Key", |i: &Item| i.key.map(i64::from).into()).sortable(),
        ColumnSpec::new("other", "Other", |i: &Item| i.key.map(i64::from).into()).sortable(),
        ColumnSpec::new("note", "Note", |_: &Item| "".into()),
    ])
    .unwrap()
}

/// Stable reference ordering: keys in `direction`, missing keys last.
fn reference(items: &[Item], direction: SortDirection) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    indices.sort_by(|&a, &b| match (items[a].key, items[b].key) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => direction.apply(x.cmp(&y)),
    });
    indices
}

/// Reverse the order of tie groups, keeping each group's internal order and
/// leaving the trailing group of missing keys in place.
fn reverse_groups(items: &[Item], ascending: &[usize]) -> Vec<usize> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for &i in ascending {
        match groups.last_mut() {
            Some(group) if items[group[0]].key == items[i].key => group.push(i),
            _ => groups.push(vec![i]),
        }
    }
    let empty = match groups.last() {
        Some(group) if items[group[0]].key.is_none() => groups.pop(),
        _ => None,
    };
    groups.reverse();
    groups.into_iter().chain(empty).flatten().collect()
}

fn items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(
        prop::option::weighted(0.8, -4i8..4).prop_map(|key| Item { key }),
        0..40,
    )
}

proptest! {
    #[test]
    fn descending_is_ascending_with_tie_groups_reversed(items in items()) {
        let model = model();
        let refs: Vec<&Item> = items.iter().collect();

        let ascending = model.sort_indices(&refs, "key", SortDirection::Ascending);
        let descending = model.sort_indices(&refs, "key", SortDirection::Descending);

        prop_assert_eq!(&ascending, &reference(&items, SortDirection::Ascending));
        prop_assert_eq!(&descending, &reference(&items, SortDirection::Descending));
        prop_assert_eq!(descending, reverse_groups(&items, &ascending));
    }

    #[test]
    fn missing_keys_sort_last_in_both_directions(items in items()) {
        let model = model();
        let refs: Vec<&Item> = items.iter().collect();
        let missing = items.iter().filter(|i| i.key.is_none()).count();

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let order = model.sort_indices(&refs, "key", direction);
            let tail = &order[order.len() - missing..];
            prop_assert!(tail.iter().all(|&i| items[i].key.is_none()));
            // Missing keys keep their original relative order.
            prop_assert!(tail.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn toggle_sequences_follow_the_cycle(toggles in prop::collection::vec(0usize..3, 0..30)) {
        let model = model();
        let columns = ["key", "other", "note"];
        let mut sort = SortController::uncontrolled();
        let mut expected: Option<(&str, SortDirection)> = None;

        for t in toggles {
            let column = columns[t];
            let change = sort.toggle(&model, column);

            if column == "note" {
                prop_assert!(change.is_none());
            } else {
                expected = match expected {
                    Some((current, SortDirection::Ascending)) if current == column => {
                        Some((column, SortDirection::Descending))
                    }
                    Some((current, SortDirection::Descending)) if current == column => None,
                    _ => Some((column, SortDirection::Ascending)),
                };
                let change = change.unwrap();
                prop_assert_eq!(change.column_id.as_str(), column);
                prop_assert_eq!(change.direction, expected.map(|(_, d)| d));
            }

            prop_assert_eq!(sort.state().column_id(), expected.map(|(c, _)| c));
            prop_assert_eq!(sort.state().direction(), expected.map(|(_, d)| d));
            for other in columns {
                if expected.map(|(c, _)| c) != Some(other) {
                    prop_assert_eq!(sort.direction_of(other), None);
                }
            }
        }
    }

    #[test]
    fn header_state_matches_visible_subset(
        visible in prop::collection::hash_set(0u8..20, 0..10),
        toggles in prop::collection::vec(0u8..25, 0..40),
        select_all in prop::collection::vec(any::<bool>(), 0..5),
    ) {
        let visible: Vec<u8> = visible.into_iter().collect();
        let mut selection = SelectionController::new();
        for id in toggles {
            selection.toggle_row(id);
        }
        for _ in select_all.into_iter().filter(|b| *b) {
            selection.toggle_all_visible(&visible);
        }

        let selected: HashSet<u8> = visible
            .iter()
            .copied()
            .filter(|id| selection.is_selected(id))
            .collect();
        let expected = if !visible.is_empty() && selected.len() == visible.len() {
            HeaderCheckState::Checked
        } else if selected.is_empty() {
            HeaderCheckState::Unchecked
        } else {
            HeaderCheckState::Indeterminate
        };
        prop_assert_eq!(selection.header_state(&visible), expected);
    }

    #[test]
    fn toggle_all_twice_toggles(
        visible in prop::collection::hash_set(0u8..20, 1..10),
        preselected in prop::collection::vec(0u8..20, 0..10),
    ) {
        let visible: Vec<u8> = visible.into_iter().collect();
        let mut selection = SelectionController::new();
        for id in preselected {
            selection.toggle_row(id);
        }

        let first = selection.toggle_all_visible(&visible);
        let second = selection.toggle_all_visible(&visible);
        prop_assert_ne!(first, second);
        prop_assert!(matches!(
            (first, second),
            (HeaderCheckState::Checked, HeaderCheckState::Unchecked)
                | (HeaderCheckState::Unchecked, HeaderCheckState::Checked)
        ));
    }
}
