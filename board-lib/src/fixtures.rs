//! Sample board data
//!
//! Used by the CLI session, documentation examples and tests. The generated
//! board scales the same column set up to arbitrary group and item counts.

use crate::model::Board;
use crate::model::CellType;
use crate::model::CellValue;
use crate::model::ColumnDef;
use crate::model::ColumnSettings;
use crate::model::Group;
use crate::model::Item;
use crate::model::Reference;
use crate::model::StatusLabel;

const BOARD_ID: &str = "b1";

const STATUSES: [&str; 4] = ["Done", "Stuck", "Working", "Pending"];

const GROUP_COLORS: [&str; 5] = ["#579bfc", "#00c875", "#fdab3d", "#e2445c", "#a25ddc"];

/// Sample people directory entries.
pub fn people() -> Vec<Reference> {
    [
        ("1", "Alice Malice", "#FF5733"),
        ("2", "Bob Builder", "#33FF57"),
        ("3", "Charlie Chaplin", "#3357FF"),
        ("4", "David Bowie", "#FF33A8"),
        ("5", "Eve Polastri", "#33FFF5"),
        ("6", "Frank Sinatra", "#F5FF33"),
        ("7", "Grace Hopper", "#FF8C33"),
        ("8", "Harry Potter", "#8C33FF"),
        ("9", "Iris West", "#33FF8C"),
        ("10", "Jack Sparrow", "#FF3333"),
    ]
    .into_iter()
    .map(|(id, label, color)| Reference::new(id, label).with_color(color))
    .collect()
}

/// Sample tag directory entries.
pub fn tags() -> Vec<Reference> {
    [
        ("1", "Urgent", "#e2445c"),
        ("2", "High Priority", "#ff5722"),
        ("3", "Medium", "#ff9800"),
        ("4", "Low", "#00c875"),
        ("5", "Bug", "#e2445c"),
        ("6", "Feature", "#579bfc"),
        ("7", "Design", "#a25ddc"),
        ("8", "Dev", "#0086c0"),
    ]
    .into_iter()
    .map(|(id, label, color)| Reference::new(id, label).with_color(color))
    .collect()
}

/// Settings for the sample STATUS column.
pub fn status_settings() -> ColumnSettings {
    ColumnSettings::new()
        .with_label("Done", StatusLabel::new("Done", "#00c875"))
        .with_label("Stuck", StatusLabel::new("Stuck", "#e2445c"))
        .with_label("Working", StatusLabel::new("Working", "#fdab3d"))
        .with_label("Pending", StatusLabel::new("Pending", "#579bfc"))
        .with_label("", StatusLabel::new("", "#c4c4c4"))
}

/// The sample column set.
pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("col_status", CellType::Status, "Status", 140).with_settings(status_settings()),
        ColumnDef::new("col_date", CellType::Date, "Date", 120)
            .with_settings(ColumnSettings::new().with_mode("date")),
        ColumnDef::new("col_deadline", CellType::Date, "Deadline", 160)
            .with_settings(ColumnSettings::new().with_mode("datetime")),
        ColumnDef::new("col_quarter", CellType::Date, "Quarter", 100)
            .with_settings(ColumnSettings::new().with_mode("quarter")),
        ColumnDef::new("col_person", CellType::Text, "Person", 100),
        ColumnDef::new("col_owners", CellType::People, "Owners", 120),
        ColumnDef::new("col_tags", CellType::Tags, "Tags", 160),
        ColumnDef::new("col_budget", CellType::Number, "Budget", 100),
        ColumnDef::new("col_done", CellType::Checkbox, "Done?", 80),
    ]
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    group_id: &str,
    name: &str,
    status: &str,
    date: &str,
    deadline: &str,
    person: &str,
    budget: i64,
    done: bool,
) -> Item {
    let mut item = Item::new(id, group_id, name)
        .set("col_status", status)
        .set("col_date", date)
        .set("col_deadline", deadline)
        .set("col_quarter", "Q4")
        .set("col_person", person)
        .set("col_budget", budget)
        .set("col_done", done);
    item.board_id = BOARD_ID.to_string();
    item
}

/// A two-group, four-item board.
pub fn sample_board() -> Board {
    let people = people();
    let tags = tags();

    let mut i1 = item("i1", "g1", "Design Login Page", "Done", "2023-10-01", "2023-10-01T14:30", "Alice", 500, true);
    i1.values.insert(
        "col_owners".into(),
        CellValue::Refs(vec![people[0].clone(), people[1].clone()]),
    );
    i1.values.insert("col_tags".into(), CellValue::Refs(vec![tags[6].clone()]));

    let mut i2 = item("i2", "g1", "Fix API Bug", "Stuck", "2023-10-02", "2023-10-02T09:00", "Bob", 0, false);
    i2.values.insert(
        "col_tags".into(),
        CellValue::Refs(vec![tags[0].clone(), tags[4].clone(), tags[7].clone()]),
    );

    let i3 = item("i3", "g2", "Write Documentation", "Working", "2023-10-05", "2023-10-05T17:00", "Charlie", 100, false);
    let i4 = item("i4", "g2", "Deploy to Prod", "Pending", "2023-10-10", "2023-10-10T12:00", "Dave", 1000, false);

    Board {
        id: BOARD_ID.to_string(),
        name: "Sample Board".to_string(),
        columns: columns(),
        groups: vec![
            Group::new("g1", "This Week", "#579bfc").with_item(i1).with_item(i2),
            Group::new("g2", "Next Week", "#00c875").with_item(i3).with_item(i4),
        ],
    }
}

/// A board with `group_count` groups of `items_per_group` items each.
///
/// Values cycle deterministically so repeated runs produce identical boards.
pub fn generated_board(group_count: usize, items_per_group: usize) -> Board {
    let people = people();
    let tags = tags();

    let groups = (0..group_count)
        .map(|g| {
            let group_id = format!("g{}", g + 1);
            let mut group = Group::new(
                group_id.clone(),
                format!("Group {}", g + 1),
                GROUP_COLORS[g % GROUP_COLORS.len()],
            );
            for n in 0..items_per_group {
                let seq = g * items_per_group + n;
                let day = seq % 28 + 1;
                let mut item = item(
                    &format!("i{}_{}", g + 1, n + 1),
                    &group_id,
                    &format!("Task {}", seq + 1),
                    STATUSES[seq % STATUSES.len()],
                    &format!("2023-10-{day:02}"),
                    &format!("2023-10-{day:02}T{:02}:00", seq % 24),
                    &people[seq % people.len()].label,
                    (seq as i64 % 10) * 100,
                    seq % 3 == 0,
                );
                item.values.insert(
                    "col_owners".into(),
                    CellValue::Refs(people.iter().cycle().skip(seq).take(seq % 5).cloned().collect()),
                );
                item.values.insert(
                    "col_tags".into(),
                    CellValue::Refs(tags.iter().cycle().skip(seq).take(seq % 4).cloned().collect()),
                );
                group.items.push(item);
            }
            group
        })
        .collect();

    Board {
        id: BOARD_ID.to_string(),
        name: "Generated Board".to_string(),
        columns: columns(),
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_board_shape() {
        let board = sample_board();
        assert_eq!(board.groups.len(), 2);
        assert_eq!(board.item_count(), 4);
        assert_eq!(board.item("i1").unwrap().value("col_status"), &CellValue::from("Done"));
    }

    #[test]
    fn test_generated_board_is_deterministic() {
        let a = generated_board(3, 5);
        let b = generated_board(3, 5);
        assert_eq!(a, b);
        assert_eq!(a.item_count(), 15);
        assert_eq!(a.groups[2].items[4].id, "i3_5");
    }
}
