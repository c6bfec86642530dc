use std::sync::{Arc, Mutex};
use std::time::Duration;

use portal_grid::data::{action, PortalData, ReviewStatus, Table};
use portal_grid::grid::{
    ColumnModel, ColumnSpec, Grid, GridBody, GridError, HeaderCheckState, SortController,
    SortDirection, SortState,
};
use portal_grid::source::{DataSource, Origin, ReviewService};

#[derive(Debug, Clone)]
struct Request {
    id: &'static str,
    title: &'static str,
    status: &'static str,
}

fn requests() -> Vec<Request> {
    vec![
        Request {
            id: "r1",
            title: "Parking permit",
            status: "Pending",
        },
        Request {
            id: "r2",
            title: "Building permit",
            status: "Approved",
        },
        Request {
            id: "r3",
            title: "Noise complaint",
            status: "Pending",
        },
    ]
}

fn columns() -> ColumnModel<Request> {
    ColumnModel::new(vec![
        ColumnSpec::selection("select"),
        ColumnSpec::new("title", "Title", |r: &Request| r.title.into()).sortable(),
        ColumnSpec::new("status", "Status", |r: &Request| r.status.into()).sortable(),
    ])
    .unwrap()
}

fn grid() -> Grid<Request, String> {
    Grid::new(columns(), |r: &Request| r.id.to_string())
}

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn select_two_then_toggle_all_twice() {
    let mut grid = grid();
    let data = requests();

    grid.toggle_row("r1".to_string());
    grid.toggle_row("r3".to_string());
    let rendered = grid.render(&data);
    assert_eq!(rendered.select_all, HeaderCheckState::Indeterminate);

    let visible = rendered.visible_ids();
    assert_eq!(grid.toggle_all_visible(&visible), HeaderCheckState::Checked);
    assert_eq!(grid.selection().len(), 3);

    assert_eq!(grid.toggle_all_visible(&visible), HeaderCheckState::Unchecked);
    assert!(grid.selection().is_empty());
    assert_eq!(grid.render(&data).select_all, HeaderCheckState::Unchecked);
}

#[test]
fn duplicate_column_id_is_rejected() {
    let result = ColumnModel::new(vec![
        ColumnSpec::new("status", "Status", |r: &Request| r.status.into()),
        ColumnSpec::new("title", "Title", |r: &Request| r.title.into()),
        ColumnSpec::new("status", "State", |r: &Request| r.status.into()),
    ]);
    assert_eq!(result.err(), Some(GridError::DuplicateColumn("status".to_string())));
}

#[test]
fn selection_survives_resorting() {
    let mut grid = grid();
    let data = requests();
    grid.toggle_row("r2".to_string());

    // none -> asc -> desc
    grid.toggle_sort("title");
    grid.toggle_sort("title");
    let desc = grid.render(&data);
    assert_eq!(desc.visible_ids(), ids(&["r1", "r3", "r2"]));
    assert!(desc.row(2).unwrap().selected);

    // desc -> none -> asc
    grid.toggle_sort("title");
    grid.toggle_sort("title");
    let asc = grid.render(&data);
    assert_eq!(asc.visible_ids(), ids(&["r2", "r3", "r1"]));
    assert!(asc.row(0).unwrap().selected);
    assert_eq!(grid.selection().len(), 1);
}

#[test]
fn filtering_keeps_hidden_selection() {
    let mut grid = grid();
    let data = requests();
    grid.toggle_row("r2".to_string());

    let pending: Vec<&Request> = data.iter().filter(|r| r.status == "Pending").collect();
    let filtered = grid.render(pending.iter().copied());
    assert_eq!(filtered.select_all, HeaderCheckState::Unchecked);

    let visible = filtered.visible_ids();
    assert_eq!(grid.toggle_all_visible(&visible), HeaderCheckState::Checked);
    assert_eq!(grid.selection().len(), 3);
    assert!(grid.selection().is_selected(&"r2".to_string()));
}

#[test]
fn controlled_grid_keeps_caller_order() {
    let mut grid = grid().with_sort(SortController::controlled());
    let data = requests();

    let change = grid.toggle_sort("status").unwrap();
    assert_eq!(change.direction, Some(SortDirection::Ascending));

    // Nothing was committed, rows stay in caller order.
    let rendered = grid.render(&data);
    assert_eq!(rendered.visible_ids(), ids(&["r1", "r2", "r3"]));
    assert_eq!(rendered.header[2].direction, None);

    // The caller acknowledges and supplies sorted rows.
    grid.set_sort_state(SortState::by("status", SortDirection::Ascending));
    let mut sorted = data.clone();
    sorted.sort_by_key(|r| r.status);
    let rendered = grid.render(&sorted);
    assert_eq!(rendered.visible_ids(), ids(&["r2", "r1", "r3"]));
    assert_eq!(rendered.header[2].direction, Some(SortDirection::Ascending));
}

#[test]
fn empty_rows_render_the_empty_state() {
    let grid = grid().empty_message("No requests");
    let rendered = grid.render(std::iter::empty::<&Request>());
    assert!(matches!(rendered.body, GridBody::Empty { ref message } if message == "No requests"));
    assert_eq!(rendered.header.len(), 3);
}

#[test]
fn dispatch_is_fire_and_forget() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let grid = grid()
        .with_actions(vec![portal_grid::grid::RowAction::new("approve", "Approve")])
        .with_handler(move |action: &str, id: &String| {
            sink.lock().unwrap().push(format!("{}:{}", action, id));
        });

    assert!(grid.dispatch("approve", &"r1".to_string()));
    assert!(!grid.dispatch("archive", &"r1".to_string()));
    assert_eq!(*calls.lock().unwrap(), vec!["approve:r1".to_string()]);
}

async fn next_snapshot(
    source: &mut impl DataSource,
) -> portal_grid::source::PortalSnapshot {
    for _ in 0..100 {
        if let Some(snapshot) = source.poll() {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no snapshot published");
}

#[tokio::test]
async fn service_applies_actions_and_reloads() {
    let (mut source, handle, task) = ReviewService::spawn(Origin::Sample, Duration::ZERO).unwrap();

    let initial = next_snapshot(&mut source).await;
    let pending = initial
        .data
        .documents
        .iter()
        .find(|d| d.is_pending())
        .unwrap()
        .id
        .clone();

    assert!(handle.send_action(Table::Documents, action::APPROVE, &pending));
    let updated = next_snapshot(&mut source).await;
    assert_eq!(updated.dataset, initial.dataset);
    assert!(updated.revision > initial.revision);
    let doc = updated.data.documents.iter().find(|d| d.id == pending).unwrap();
    assert_eq!(doc.status, ReviewStatus::Approved);
    assert!(updated.notice.is_some());

    assert!(handle.reload());
    let reloaded = next_snapshot(&mut source).await;
    assert!(reloaded.replaces(Some(&updated)));
    assert_eq!(reloaded.data.pending_reviews(), PortalData::sample().pending_reviews());

    drop(handle);
    task.await.unwrap();
}
