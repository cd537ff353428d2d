//! Row projection: groups to a flat, windowable row sequence.
//!
//! Every group contributes a header row. Expanded groups also contribute one
//! task row per item and a footer row. Row ids are derived from group and
//! item ids only, so they stay stable across projections and can be used as
//! reuse keys by the render layer.

use std::fmt;

use board_lib::model::Group;
use board_lib::model::Item;

/// What a display row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowRole {
    GroupHeader,
    TaskRow,
    GroupFooter,
}

/// Stable identity of a display row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(String);

impl RowId {
    pub fn header(group_id: &str) -> Self {
        Self(format!("{group_id}_header"))
    }

    pub fn footer(group_id: &str) -> Self {
        Self(format!("{group_id}_footer"))
    }

    pub fn item(item_id: &str) -> Self {
        Self(item_id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The board data a row refers to.
#[derive(Debug, Clone, Copy)]
pub enum RowData<'a> {
    Group(&'a Group),
    Item(&'a Item),
}

/// One projected row. Borrows the board data it was projected from.
#[derive(Debug, Clone)]
pub struct DisplayRow<'a> {
    pub id: RowId,
    pub role: RowRole,
    pub group_id: &'a str,
    pub data: RowData<'a>,
}

impl<'a> DisplayRow<'a> {
    pub fn group(&self) -> Option<&'a Group> {
        match self.data {
            RowData::Group(group) => Some(group),
            RowData::Item(_) => None,
        }
    }

    pub fn item(&self) -> Option<&'a Item> {
        match self.data {
            RowData::Item(item) => Some(item),
            RowData::Group(_) => None,
        }
    }
}

/// Projects groups into display rows.
///
/// Pure and deterministic; cheap enough to call on every store change.
pub fn project(groups: &[Group]) -> Vec<DisplayRow<'_>> {
    let capacity = groups
        .iter()
        .map(|g| if g.is_collapsed { 1 } else { g.items.len() + 2 })
        .sum();
    let mut rows = Vec::with_capacity(capacity);

    for group in groups {
        rows.push(DisplayRow {
            id: RowId::header(&group.id),
            role: RowRole::GroupHeader,
            group_id: &group.id,
            data: RowData::Group(group),
        });

        if group.is_collapsed {
            continue;
        }

        for item in &group.items {
            rows.push(DisplayRow {
                id: RowId::item(&item.id),
                role: RowRole::TaskRow,
                group_id: &group.id,
                data: RowData::Item(item),
            });
        }

        rows.push(DisplayRow {
            id: RowId::footer(&group.id),
            role: RowRole::GroupFooter,
            group_id: &group.id,
            data: RowData::Group(group),
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_lib::fixtures;

    fn ids(rows: &[DisplayRow<'_>]) -> Vec<String> {
        rows.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_expanded_groups() {
        let board = fixtures::sample_board();
        let rows = project(&board.groups);

        assert_eq!(
            ids(&rows),
            vec!["g1_header", "i1", "i2", "g1_footer", "g2_header", "i3", "i4", "g2_footer"]
        );
        assert_eq!(rows[1].role, RowRole::TaskRow);
        assert_eq!(rows[1].group_id, "g1");
        assert_eq!(rows[3].role, RowRole::GroupFooter);
    }

    #[test]
    fn test_collapsed_group_keeps_only_header() {
        let mut board = fixtures::sample_board();
        board.groups[0].is_collapsed = true;

        let rows = project(&board.groups);

        assert_eq!(
            ids(&rows),
            vec!["g1_header", "g2_header", "i3", "i4", "g2_footer"]
        );
    }

    #[test]
    fn test_empty_group_has_header_and_footer() {
        let groups = vec![Group::new("g9", "Empty", "#000000")];
        let rows = project(&groups);
        assert_eq!(ids(&rows), vec!["g9_header", "g9_footer"]);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let board = fixtures::generated_board(4, 6);
        assert_eq!(ids(&project(&board.groups)), ids(&project(&board.groups)));
    }

    #[test]
    fn test_row_data_accessors() {
        let board = fixtures::sample_board();
        let rows = project(&board.groups);

        assert_eq!(rows[0].group().unwrap().title, "This Week");
        assert!(rows[0].item().is_none());
        assert_eq!(rows[2].item().unwrap().name, "Fix API Bug");
    }
}
