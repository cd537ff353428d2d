use board_lib::model::CellType;
use board_lib::model::CellValue;
use board_lib::model::ColumnSettings;

use super::{CellInput, CellOutbox, InteractiveCell};
use crate::fragment::Fragment;

/// Free text editor.
#[derive(Debug)]
pub struct TextCell {
    value: CellValue,
    draft: Option<String>,
}

impl TextCell {
    pub fn mount(value: &CellValue, _config: &ColumnSettings) -> Box<dyn InteractiveCell> {
        Box::new(Self {
            value: value.clone(),
            draft: None,
        })
    }

    fn staged(&self) -> Option<CellValue> {
        let draft = self.draft.as_ref()?;
        let staged = CellValue::Text(draft.clone());
        (staged != self.value && !(draft.is_empty() && self.value.is_empty())).then_some(staged)
    }
}

impl InteractiveCell for TextCell {
    fn cell_type(&self) -> CellType {
        CellType::Text
    }

    fn set_value(&mut self, value: &CellValue) {
        self.value = value.clone();
    }

    fn set_config(&mut self, _config: &ColumnSettings) {}

    fn view(&self) -> Fragment {
        let inner = match &self.draft {
            Some(draft) => Fragment::text(draft.clone()).class("cell-input"),
            None => Fragment::text(self.value.display_text()).class("cell-value"),
        };
        Fragment::row().class("text-cell").child(inner)
    }

    fn focus(&mut self, _out: &mut CellOutbox) {
        if self.draft.is_none() {
            self.draft = Some(self.value.display_text());
        }
    }

    fn handle(&mut self, input: CellInput, out: &mut CellOutbox) {
        match input {
            CellInput::Edit(text) => self.draft = Some(text),
            CellInput::Commit => {
                if let Some(value) = self.staged() {
                    self.value = value.clone();
                    out.value(value);
                }
                self.draft = None;
            }
            CellInput::Cancel => self.draft = None,
            _ => {}
        }
    }

    fn take_staged(&mut self) -> Option<CellValue> {
        let staged = self.staged();
        self.draft = None;
        staged
    }
}
