use board_lib::model::CellType;
use board_lib::model::CellValue;
use board_lib::model::ColumnSettings;

use super::{CellInput, CellOutbox, InteractiveCell};
use crate::fragment::Fragment;

/// Boolean toggle. Non-boolean values read as unchecked.
#[derive(Debug)]
pub struct CheckboxCell {
    checked: bool,
}

impl CheckboxCell {
    pub fn mount(value: &CellValue, _config: &ColumnSettings) -> Box<dyn InteractiveCell> {
        Box::new(Self {
            checked: value.as_bool().unwrap_or(false),
        })
    }
}

impl InteractiveCell for CheckboxCell {
    fn cell_type(&self) -> CellType {
        CellType::Checkbox
    }

    fn set_value(&mut self, value: &CellValue) {
        self.checked = value.as_bool().unwrap_or(false);
    }

    fn set_config(&mut self, _config: &ColumnSettings) {}

    fn view(&self) -> Fragment {
        let mark = if self.checked { "☑" } else { "☐" };
        Fragment::row()
            .class("checkbox-cell")
            .child(Fragment::text(mark).class("cell-value"))
    }

    fn focus(&mut self, _out: &mut CellOutbox) {}

    fn handle(&mut self, input: CellInput, out: &mut CellOutbox) {
        if input == CellInput::Toggle {
            self.checked = !self.checked;
            out.value(CellValue::Bool(self.checked));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::CellEmit;

    #[test]
    fn test_toggle_emits_negation() {
        let mut cell = CheckboxCell::mount(&CellValue::Bool(true), &ColumnSettings::new());
        let mut out = CellOutbox::new();

        cell.handle(CellInput::Toggle, &mut out);

        assert_eq!(out.drain().collect::<Vec<_>>(), vec![CellEmit::Value(CellValue::Bool(false))]);
        assert_eq!(cell.view().plain_text(), "☐");
    }

    #[test]
    fn test_non_bool_reads_unchecked() {
        let cell = CheckboxCell::mount(&CellValue::from("yes"), &ColumnSettings::new());
        assert_eq!(cell.view().plain_text(), "☐");
    }
}
