use board_lib::BoardError;
use board_lib::fixtures;
use board_lib::model::CellValue;
use board_lib::model::StatusLabel;
use board_lib::store::BoardStore;
use board_lib::store::InMemoryBoard;

#[test]
fn test_toggle_group_flips_flag() {
    let mut store = InMemoryBoard::new(fixtures::sample_board());

    assert!(store.toggle_group_collapsed("g1").unwrap());
    assert!(!store.toggle_group_collapsed("g1").unwrap());
    assert!(!store.groups()[1].is_collapsed);
}

#[test]
fn test_update_cell_touches_only_target_item() {
    let mut store = InMemoryBoard::new(fixtures::sample_board());

    store
        .update_cell("i1", "col_status", CellValue::from("Pending"))
        .unwrap();

    let board = store.board();
    assert_eq!(board.item("i1").unwrap().value("col_status"), &CellValue::from("Pending"));
    assert_eq!(board.item("i2").unwrap().value("col_status"), &CellValue::from("Stuck"));
    assert_eq!(board.item("i3").unwrap().value("col_status"), &CellValue::from("Working"));
}

#[test]
fn test_update_cell_unknown_ids() {
    let mut store = InMemoryBoard::new(fixtures::sample_board());

    assert_eq!(
        store.update_cell("nope", "col_status", CellValue::Null),
        Err(BoardError::item_not_found("nope"))
    );
    assert_eq!(
        store.update_cell("i1", "col_nope", CellValue::Null),
        Err(BoardError::column_not_found("col_nope"))
    );
}

#[test]
fn test_update_column_settings() {
    let mut store = InMemoryBoard::new(fixtures::sample_board());
    let settings = fixtures::status_settings().with_label("blocked", StatusLabel::new("Blocked", "#ff5f56"));

    store.update_column_settings("col_status", settings).unwrap();

    let column = store.board().column("col_status").unwrap();
    assert_eq!(column.settings.label("blocked").unwrap().text, "Blocked");
}

#[test]
fn test_add_item_appends_empty_item() {
    let mut store = InMemoryBoard::new(fixtures::sample_board());

    let id = store.add_item("g2").unwrap();

    let group = &store.groups()[1];
    assert_eq!(group.items.len(), 3);
    let item = group.items.last().unwrap();
    assert_eq!(item.id, id);
    assert_eq!(item.name, "New Item");
    assert_eq!(item.group_id, "g2");
    assert!(item.values.is_empty());
    assert!(store.add_item("missing").is_err());
}

#[test]
fn test_add_group_prepends() {
    let mut store = InMemoryBoard::new(fixtures::sample_board());

    let id = store.add_group();

    assert_eq!(store.groups()[0].id, id);
    assert_eq!(store.groups()[0].title, "New Group");
    assert_eq!(store.groups().len(), 3);
}

#[test]
fn test_move_item_leaves_board_untouched() {
    let mut store = InMemoryBoard::new(fixtures::sample_board());
    let before = store.board().clone();

    store.move_item(1, 5);

    assert_eq!(store.board(), &before);
}
