use board_lib::model::CellType;
use board_lib::model::CellValue;
use board_lib::model::ColumnSettings;
use log::debug;

use super::{CellInput, CellOutbox, InteractiveCell};
use crate::fragment::Fragment;

/// Numeric editor. Values that are not numbers are shown verbatim.
#[derive(Debug)]
pub struct NumberCell {
    value: CellValue,
    draft: Option<String>,
}

impl NumberCell {
    pub fn mount(value: &CellValue, _config: &ColumnSettings) -> Box<dyn InteractiveCell> {
        Box::new(Self {
            value: value.clone(),
            draft: None,
        })
    }

    /// Lightweight view: a shimmer bar for any non-null value.
    pub fn lightweight(value: &CellValue, _config: &ColumnSettings) -> Fragment {
        let cell = Fragment::row().class("number-cell-light");
        if value.is_null() {
            cell
        } else {
            cell.child(Fragment::text("▬▬▬").class("shimmer").fg("#f0f0f0"))
        }
    }

    fn staged(&self) -> Option<CellValue> {
        let draft = self.draft.as_ref()?.trim();
        let parsed = if draft.is_empty() {
            CellValue::Null
        } else {
            match draft.parse::<f64>() {
                Ok(n) if n.is_finite() => CellValue::Number(n),
                _ => {
                    debug!("Ignoring non-numeric draft {draft:?}");
                    return None;
                }
            }
        };
        (parsed != self.value).then_some(parsed)
    }
}

impl InteractiveCell for NumberCell {
    fn cell_type(&self) -> CellType {
        CellType::Number
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
        Fragment::row().class("number-cell").child(inner)
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
