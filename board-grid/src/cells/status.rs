use std::collections::HashSet;

use board_lib::model::CellType;
use board_lib::model::CellValue;
use board_lib::model::ColumnSettings;
use board_lib::model::StatusLabel;
use rand::seq::IndexedRandom;

use super::{CellInput, CellOutbox, InteractiveCell};
use crate::fragment::Fragment;

/// Background for values with no matching label.
const DEFAULT_COLOR: &str = "#c4c4c4";

/// Colors offered to labels created from the picker.
pub const STATUS_PALETTE: [&str; 15] = [
    "#ff5f56", "#ffbd2e", "#27c93f", "#007aff", "#5856d6", "#ff2d55", "#5ac8fa", "#ffcc00",
    "#8e8e93", "#ff9500", "#af52de", "#34c759", "#00c7be", "#32ade6", "#a2845e",
];

/// Colored status label with a picker.
///
/// Adding a label from the picker changes the column's settings, not just
/// this item: the new label is emitted as a config change before the value
/// change that selects it.
#[derive(Debug)]
pub struct StatusCell {
    value: CellValue,
    config: ColumnSettings,
    picker_open: bool,
    new_option: String,
}

impl StatusCell {
    pub fn mount(value: &CellValue, config: &ColumnSettings) -> Box<dyn InteractiveCell> {
        Box::new(Self {
            value: value.clone(),
            config: config.clone(),
            picker_open: false,
            new_option: String::new(),
        })
    }

    fn current_label(&self) -> Option<&StatusLabel> {
        self.value.as_str().and_then(|id| self.config.label(id))
    }

    fn current_text(&self) -> String {
        match self.current_label() {
            Some(label) => label.text.clone(),
            None => self.value.display_text(),
        }
    }

    fn current_color(&self) -> &str {
        self.current_label()
            .map(|label| label.color.as_str())
            .unwrap_or(DEFAULT_COLOR)
    }

    fn close_picker(&mut self) {
        self.picker_open = false;
        self.new_option.clear();
    }

    fn select(&mut self, id: String, out: &mut CellOutbox) {
        let value = CellValue::Text(id);
        if value != self.value {
            self.value = value.clone();
            out.value(value);
        }
        self.close_picker();
    }

    fn add_option(&mut self, out: &mut CellOutbox) {
        let text = self.new_option.trim().to_string();
        if text.is_empty() {
            return;
        }

        let id = label_id(&text);
        let color = pick_color(&self.config);
        let config = self
            .config
            .clone()
            .with_label(id.clone(), StatusLabel::new(text, color));

        self.config = config.clone();
        out.config(config);
        self.select(id, out);
    }
}

/// Label id for new option text: lower-cased, whitespace runs become `_`.
fn label_id(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Random palette color not used by any existing label, or any palette color
/// once all are taken.
fn pick_color(config: &ColumnSettings) -> String {
    let used: HashSet<&str> = config
        .labels
        .iter()
        .flat_map(|labels| labels.values())
        .map(|label| label.color.as_str())
        .collect();
    let available: Vec<&str> = STATUS_PALETTE
        .iter()
        .copied()
        .filter(|color| !used.contains(color))
        .collect();

    let mut rng = rand::rng();
    let pool: &[&str] = if available.is_empty() {
        &STATUS_PALETTE
    } else {
        &available
    };
    pool.choose(&mut rng)
        .copied()
        .unwrap_or(STATUS_PALETTE[0])
        .to_string()
}

impl InteractiveCell for StatusCell {
    fn cell_type(&self) -> CellType {
        CellType::Status
    }

    fn set_value(&mut self, value: &CellValue) {
        self.value = value.clone();
    }

    fn set_config(&mut self, config: &ColumnSettings) {
        self.config = config.clone();
    }

    fn view(&self) -> Fragment {
        let mut cell = Fragment::row().class("status-cell").child(
            Fragment::text(self.current_text())
                .class("cell-value")
                .bg(self.current_color()),
        );

        if self.picker_open {
            let options = self.config.labels.iter().flatten().map(|(id, label)| {
                let option = Fragment::text(label.text.clone())
                    .class("status-option")
                    .bg(label.color.clone());
                if self.value.as_str() == Some(id.as_str()) {
                    option.bold()
                } else {
                    option
                }
            });
            cell = cell.child(
                Fragment::row()
                    .class("status-picker")
                    .children(options)
                    .child(Fragment::text(self.new_option.clone()).class("new-option")),
            );
        }

        cell
    }

    fn focus(&mut self, out: &mut CellOutbox) {
        self.handle(CellInput::Toggle, out);
    }

    fn handle(&mut self, input: CellInput, out: &mut CellOutbox) {
        match input {
            CellInput::Toggle => {
                if self.picker_open {
                    self.close_picker();
                } else {
                    self.picker_open = true;
                }
            }
            CellInput::Select(id) => self.select(id, out),
            CellInput::Edit(text) => self.new_option = text,
            CellInput::Commit => self.add_option(out),
            CellInput::Cancel => self.close_picker(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::CellEmit;
    use board_lib::fixtures;

    #[test]
    fn test_label_text_and_color() {
        let cell = StatusCell::mount(&CellValue::from("Done"), &fixtures::status_settings());
        let value = cell.view();
        let value = value.find_class("cell-value").unwrap();

        assert_eq!(value.plain_text(), "Done");
        assert_eq!(value.style.bg.as_ref().unwrap().as_str(), "#00c875");
    }

    #[test]
    fn test_unknown_value_falls_back_to_gray() {
        let cell = StatusCell::mount(&CellValue::from("Mystery"), &fixtures::status_settings());
        let view = cell.view();
        let value = view.find_class("cell-value").unwrap();

        assert_eq!(value.plain_text(), "Mystery");
        assert_eq!(value.style.bg.as_ref().unwrap().as_str(), DEFAULT_COLOR);
    }

    #[test]
    fn test_select_closes_picker() {
        let mut cell = StatusCell::mount(&CellValue::from("Done"), &fixtures::status_settings());
        let mut out = CellOutbox::new();

        cell.focus(&mut out);
        assert!(cell.view().find_class("status-picker").is_some());
        cell.handle(CellInput::Select("Stuck".into()), &mut out);

        assert_eq!(out.drain().collect::<Vec<_>>(), vec![CellEmit::Value(CellValue::from("Stuck"))]);
        assert!(cell.view().find_class("status-picker").is_none());
    }

    #[test]
    fn test_add_option_emits_config_then_value() {
        let mut cell = StatusCell::mount(&CellValue::from("Done"), &fixtures::status_settings());
        let mut out = CellOutbox::new();

        cell.handle(CellInput::Toggle, &mut out);
        cell.handle(CellInput::Edit("  In   Review ".into()), &mut out);
        cell.handle(CellInput::Commit, &mut out);

        let emits: Vec<_> = out.drain().collect();
        assert_eq!(emits.len(), 2);
        let CellEmit::Config(config) = &emits[0] else {
            panic!("expected config change first, got {:?}", emits[0]);
        };
        let label = config.label("in_review").unwrap();
        assert_eq!(label.text, "In   Review");
        assert!(STATUS_PALETTE.contains(&label.color.as_str()));
        assert!(config.label("Stuck").is_some());
        assert_eq!(emits[1], CellEmit::Value(CellValue::from("in_review")));
        assert_eq!(cell.view().plain_text(), "In   Review");
    }

    #[test]
    fn test_blank_option_is_ignored() {
        let mut cell = StatusCell::mount(&CellValue::from("Done"), &fixtures::status_settings());
        let mut out = CellOutbox::new();

        cell.handle(CellInput::Edit("   ".into()), &mut out);
        cell.handle(CellInput::Commit, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn test_pick_color_prefers_unused() {
        let mut settings = ColumnSettings::new();
        for (i, color) in STATUS_PALETTE.iter().enumerate().skip(1) {
            settings = settings.with_label(format!("l{i}"), StatusLabel::new("x", *color));
        }
        assert_eq!(pick_color(&settings), STATUS_PALETTE[0]);
    }
}
