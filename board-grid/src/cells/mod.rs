//! Cell renderers.
//!
//! Every cell type offers an interactive renderer (a stateful editor that
//! emits value and config changes) and may offer a lightweight renderer (a
//! pure function producing an approximation of the interactive look, used
//! while the viewport scrolls fast).
//!
//! Interactive renderers are always constructed from a value and config, so a
//! freshly mounted renderer can never show a default of its own.

mod checkbox;
mod date;
mod number;
mod people;
mod picker;
mod status;
mod tags;
mod text;

pub use checkbox::CheckboxCell;
pub use date::DateCell;
pub use number::NumberCell;
pub use people::PeopleCell;
pub use status::{STATUS_PALETTE, StatusCell};
pub use tags::TagsCell;
pub use text::TextCell;

use board_lib::model::CellType;
use board_lib::model::CellValue;
use board_lib::model::ColumnSettings;
use board_lib::model::Reference;

use crate::fragment::Fragment;
use crate::lookup::{LookupRequest, LookupResult};

/// Builds an interactive renderer seeded with a value and config.
pub type InteractiveFactory = fn(&CellValue, &ColumnSettings) -> Box<dyn InteractiveCell>;

/// Renders a cheap static approximation of a cell.
pub type LightweightFn = fn(&CellValue, &ColumnSettings) -> Fragment;

/// User intents routed to a mounted interactive renderer.
///
/// Renderers ignore inputs that mean nothing to them.
#[derive(Debug, Clone, PartialEq)]
pub enum CellInput {
    /// Replace the staged text: an editor draft, a new STATUS option, or a
    /// picker search query.
    Edit(String),
    /// Commit the staged text.
    Commit,
    /// Discard staged text and close any picker.
    Cancel,
    /// Flip a checkbox, or open/close a picker.
    Toggle,
    /// Choose an option: a STATUS label id, a date, or a quarter.
    Select(String),
    /// Add a person or tag.
    Add(Reference),
    /// Remove a person or tag by id.
    Remove(String),
}

/// Something a renderer wants the host to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum CellEmit {
    Value(CellValue),
    Config(ColumnSettings),
    Lookup(LookupRequest),
}

/// Collects a renderer's emissions during one call.
#[derive(Debug, Default)]
pub struct CellOutbox {
    emits: Vec<CellEmit>,
}

impl CellOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&mut self, value: CellValue) {
        self.emits.push(CellEmit::Value(value));
    }

    pub fn config(&mut self, config: ColumnSettings) {
        self.emits.push(CellEmit::Config(config));
    }

    pub fn lookup(&mut self, request: LookupRequest) {
        self.emits.push(CellEmit::Lookup(request));
    }

    pub fn is_empty(&self) -> bool {
        self.emits.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, CellEmit> {
        self.emits.drain(..)
    }
}

/// An interactive, editable cell renderer.
pub trait InteractiveCell: Send {
    /// The type this renderer was registered for.
    fn cell_type(&self) -> CellType;

    /// Replaces the value input.
    fn set_value(&mut self, value: &CellValue);

    /// Replaces the config input.
    fn set_config(&mut self, config: &ColumnSettings);

    fn view(&self) -> Fragment;

    /// Keyboard activation (Enter on a focused cell).
    fn focus(&mut self, out: &mut CellOutbox);

    fn handle(&mut self, input: CellInput, out: &mut CellOutbox);

    /// Receives the result of a lookup this renderer requested.
    fn on_lookup(&mut self, _result: LookupResult, _out: &mut CellOutbox) {}

    /// Takes a staged value the user entered but has not committed yet.
    ///
    /// Called before the renderer is unmounted so the edit is not lost.
    fn take_staged(&mut self) -> Option<CellValue> {
        None
    }
}

/// Generic lightweight fragment: the raw value as text.
pub fn placeholder(value: &CellValue, _config: &ColumnSettings) -> Fragment {
    Fragment::text(value.display_text()).class("placeholder")
}
