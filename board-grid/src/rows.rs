//! Fragments for the non-cell parts of a row.

use board_lib::model::Group;
use board_lib::model::Item;

use crate::fragment::Fragment;

/// Collapse arrow, title in the group color and item count.
pub fn group_header(group: &Group) -> Fragment {
    let arrow = if group.is_collapsed { "▶" } else { "▼" };
    Fragment::row()
        .class("group-header")
        .child(Fragment::text(arrow).class("collapse-icon").fg(group.color.clone()))
        .child(
            Fragment::text(group.title.clone())
                .class("group-title")
                .fg(group.color.clone())
                .bold(),
        )
        .child(Fragment::text(format!("{} items", group.items.len())).class("group-count").muted())
}

pub fn group_footer(_group: &Group) -> Fragment {
    Fragment::row()
        .class("group-footer")
        .child(Fragment::text("+ Add Item").class("add-item").muted())
}

/// The pinned name cell at the start of a task row.
pub fn item_name(item: &Item) -> Fragment {
    Fragment::text(item.name.clone()).class("item-name")
}
