//! Picker lookups against the in-memory directories.

use std::time::Duration;

use board_grid::cells::CellInput;
use board_grid::lookup::Directories;
use board_grid::{BoardGrid, GridConfig, GridEvent, ScrollSpeed, SpeedSignal};
use board_lib::fixtures;
use board_lib::model::CellValue;
use tokio::sync::watch;

fn grid() -> (BoardGrid, watch::Sender<ScrollSpeed>) {
    let (tx, rx) = watch::channel(ScrollSpeed::Normal);
    let grid = BoardGrid::new(GridConfig::default(), SpeedSignal::from_receiver(rx))
        .with_directories(Directories::in_memory());
    (grid, tx)
}

#[tokio::test(start_paused = true)]
async fn test_people_search_fills_picker() {
    let board = fixtures::sample_board();
    let (mut grid, _speed) = grid();
    grid.render(&board.groups, &board.columns, 0..8);

    grid.focus("i2", "col_owners");
    grid.input("i2", "col_owners", CellInput::Edit("ali".into()));

    assert!(grid.next_lookup().await);

    let frame = grid.render(&board.groups, &board.columns, 0..8);
    let owners = frame.row("i2").unwrap().cell("col_owners").unwrap();
    let result = owners.find_class("result-option").unwrap();
    assert!(result.plain_text().contains("Alice"));
}

#[tokio::test(start_paused = true)]
async fn test_reply_after_scroll_out_is_discarded() {
    let board = fixtures::sample_board();
    let (mut grid, _speed) = grid();
    grid.render(&board.groups, &board.columns, 0..8);

    grid.focus("i1", "col_owners");
    grid.render(&board.groups, &board.columns, 4..8);
    assert!(grid.slot("i1", "col_owners").is_none());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(grid.poll_lookups(), 0);
    assert!(grid.drain_events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_reply_after_tier_switch_is_discarded() {
    let board = fixtures::sample_board();
    let (mut grid, speed) = grid();
    grid.render(&board.groups, &board.columns, 0..8);

    grid.focus("i1", "col_tags");
    grid.input("i1", "col_tags", CellInput::Edit("urg".into()));

    speed.send_replace(ScrollSpeed::Fast);
    grid.render(&board.groups, &board.columns, 0..8);
    speed.send_replace(ScrollSpeed::Normal);
    let frame = grid.render(&board.groups, &board.columns, 0..8);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(grid.poll_lookups(), 0);

    let after = grid.render(&board.groups, &board.columns, 0..8);
    assert_eq!(frame.rows, after.rows);
}

#[tokio::test(start_paused = true)]
async fn test_create_tag_adds_it_to_item() {
    let board = fixtures::sample_board();
    let (mut grid, _speed) = grid();
    grid.render(&board.groups, &board.columns, 0..8);

    grid.focus("i3", "col_tags");
    grid.input("i3", "col_tags", CellInput::Edit("Research".into()));
    grid.input("i3", "col_tags", CellInput::Commit);

    // The debounced search and the create both reply.
    let mut created = None;
    for _ in 0..2 {
        assert!(grid.next_lookup().await);
        for event in grid.drain_events() {
            if let GridEvent::CellValueChanged { item_id, value, .. } = event {
                assert_eq!(item_id, "i3");
                created = Some(value);
            }
        }
    }

    let value = created.expect("tag added");
    let CellValue::Refs(tags) = value else {
        panic!("expected references, got {value:?}");
    };
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].label, "Research");
}
