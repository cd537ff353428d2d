use board_lib::model::CellType;
use board_lib::model::CellValue;
use board_lib::model::ColumnSettings;
use board_lib::model::DateMode;
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

use super::{CellInput, CellOutbox, InteractiveCell};
use crate::fragment::Fragment;

const QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];
const EMPTY_LABEL: &str = "Set Date";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Whether `text` is a well-formed value for `mode`.
fn conforms(mode: DateMode, text: &str) -> bool {
    match mode {
        DateMode::Date => parse_date(text).is_some(),
        DateMode::DateTime => parse_datetime(text).is_some(),
        DateMode::Quarter => QUARTERS.contains(&text),
    }
}

/// Display text for a value, or `None` when it has no well-formed shape.
fn display(mode: DateMode, value: &CellValue) -> Option<String> {
    let text = value.as_str().filter(|text| !text.is_empty())?;
    match mode {
        DateMode::Date | DateMode::Quarter => conforms(mode, text).then(|| text.to_string()),
        DateMode::DateTime => {
            parse_datetime(text).map(|at| at.format("%b %-d, %Y, %I:%M %p").to_string())
        }
    }
}

/// Date, date-time or quarter picker, depending on the column's mode.
#[derive(Debug)]
pub struct DateCell {
    value: CellValue,
    mode: DateMode,
    open: bool,
    draft: String,
}

impl DateCell {
    pub fn mount(value: &CellValue, config: &ColumnSettings) -> Box<dyn InteractiveCell> {
        Box::new(Self {
            value: value.clone(),
            mode: config.date_mode(),
            open: false,
            draft: String::new(),
        })
    }

    /// Lightweight view: calendar glyph and a short date.
    ///
    /// Parseable dates render as `MM/DD/YYYY`, anything else as raw text.
    pub fn lightweight(value: &CellValue, _config: &ColumnSettings) -> Fragment {
        let cell = Fragment::row().class("date-cell-light").fg("#666");
        if value.is_empty() {
            return cell;
        }

        let raw = value.display_text();
        let text = parse_date(&raw)
            .or_else(|| parse_datetime(&raw).map(|at| at.date()))
            .map(|date| date.format("%m/%d/%Y").to_string())
            .unwrap_or(raw);

        cell.child(Fragment::text("📅")).child(Fragment::text(text))
    }

    fn close(&mut self) {
        self.open = false;
        self.draft.clear();
    }

    fn choose(&mut self, text: String, out: &mut CellOutbox) {
        if !conforms(self.mode, &text) {
            debug!("Ignoring {text:?}: not a valid {:?} value", self.mode);
            return;
        }
        let value = CellValue::Text(text);
        if value != self.value {
            self.value = value.clone();
            out.value(value);
        }
        self.close();
    }
}

impl InteractiveCell for DateCell {
    fn cell_type(&self) -> CellType {
        CellType::Date
    }

    fn set_value(&mut self, value: &CellValue) {
        self.value = value.clone();
    }

    fn set_config(&mut self, config: &ColumnSettings) {
        self.mode = config.date_mode();
    }

    fn view(&self) -> Fragment {
        let current = match display(self.mode, &self.value) {
            Some(text) => Fragment::text(text).class("cell-value"),
            None => Fragment::text(EMPTY_LABEL).class("cell-value").muted(),
        };
        let cell = Fragment::row().class("date-cell").child(current);

        match (self.open, self.mode) {
            (false, _) => cell,
            (true, DateMode::Quarter) => cell.child(
                Fragment::row()
                    .class("quarter-picker")
                    .children(QUARTERS.iter().map(|q| Fragment::text(*q).class("quarter-option"))),
            ),
            (true, _) => cell.child(Fragment::text(self.draft.clone()).class("date-input")),
        }
    }

    fn focus(&mut self, _out: &mut CellOutbox) {
        self.open = true;
        self.draft = self.value.as_str().unwrap_or_default().to_string();
    }

    fn handle(&mut self, input: CellInput, out: &mut CellOutbox) {
        match input {
            CellInput::Toggle if self.open => self.close(),
            CellInput::Toggle => self.focus(out),
            CellInput::Select(text) => self.choose(text, out),
            CellInput::Edit(text) => self.draft = text,
            CellInput::Commit => {
                let draft = self.draft.trim().to_string();
                self.choose(draft, out);
            }
            CellInput::Cancel => self.close(),
            _ => {}
        }
    }

    fn take_staged(&mut self) -> Option<CellValue> {
        if !self.open {
            return None;
        }
        let draft = self.draft.trim().to_string();
        self.close();
        if !conforms(self.mode, &draft) {
            return None;
        }
        let value = CellValue::Text(draft);
        (value != self.value).then_some(value)
    }
}
