//! Cell type registry.
//!
//! Maps each known [`CellType`] to its renderers. The table is filled once at
//! construction and is read-only afterwards, so a single registry is shared by
//! every slot of every grid behind an `Arc`.

use board_lib::model::CellType;
use board_lib::model::CellValue;
use board_lib::model::ColumnSettings;
use log::debug;

use crate::cells::{
    self, CheckboxCell, DateCell, InteractiveFactory, LightweightFn, NumberCell, PeopleCell,
    StatusCell, TagsCell, TextCell,
};
use crate::fragment::Fragment;

/// The renderers registered for one cell type.
#[derive(Debug, Clone, Copy)]
pub struct CellRenderers {
    pub interactive: InteractiveFactory,
    pub lightweight: Option<LightweightFn>,
}

impl CellRenderers {
    pub fn new(interactive: InteractiveFactory) -> Self {
        Self {
            interactive,
            lightweight: None,
        }
    }

    pub fn with_lightweight(mut self, lightweight: LightweightFn) -> Self {
        self.lightweight = Some(lightweight);
        self
    }
}

/// The outcome of resolving a cell type.
///
/// `cell_type` is the type the renderers belong to, which is TEXT when the
/// requested type fell back.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub cell_type: CellType,
    pub interactive: InteractiveFactory,
    pub lightweight: Option<LightweightFn>,
}

impl Resolution {
    /// The lightweight renderer, or the generic placeholder.
    pub fn lightweight_or_placeholder(&self) -> LightweightFn {
        self.lightweight.unwrap_or(cells::placeholder)
    }

    /// Renders the lightweight view of a value.
    pub fn render_lightweight(&self, value: &CellValue, config: &ColumnSettings) -> Fragment {
        (self.lightweight_or_placeholder())(value, config)
    }
}

/// Read-only table of renderers, indexed by [`CellType::index`].
#[derive(Debug, Clone)]
pub struct CellRegistry {
    table: [Option<CellRenderers>; CellType::COUNT],
}

impl Default for CellRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl CellRegistry {
    pub fn builder() -> CellRegistryBuilder {
        CellRegistryBuilder::default()
    }

    /// Registry with the built-in renderers for all seven cell types.
    pub fn standard() -> Self {
        Self::builder()
            .register(CellType::Text, CellRenderers::new(TextCell::mount))
            .register(
                CellType::Number,
                CellRenderers::new(NumberCell::mount).with_lightweight(NumberCell::lightweight),
            )
            .register(CellType::Checkbox, CellRenderers::new(CheckboxCell::mount))
            .register(CellType::Status, CellRenderers::new(StatusCell::mount))
            .register(
                CellType::Date,
                CellRenderers::new(DateCell::mount).with_lightweight(DateCell::lightweight),
            )
            .register(
                CellType::People,
                CellRenderers::new(PeopleCell::mount).with_lightweight(PeopleCell::lightweight),
            )
            .register(
                CellType::Tags,
                CellRenderers::new(TagsCell::mount).with_lightweight(TagsCell::lightweight),
            )
            .build()
    }

    pub fn get(&self, cell_type: &CellType) -> Option<&CellRenderers> {
        cell_type.index().and_then(|index| self.table[index].as_ref())
    }

    /// Resolves the renderers for a cell type.
    ///
    /// Never fails: unknown or unregistered types resolve to the TEXT editor
    /// with no lightweight renderer.
    pub fn resolve(&self, cell_type: &CellType) -> Resolution {
        match self.get(cell_type) {
            Some(renderers) => Resolution {
                cell_type: cell_type.clone(),
                interactive: renderers.interactive,
                lightweight: renderers.lightweight,
            },
            None => {
                debug!("No renderer registered for {cell_type}, using TEXT");
                Resolution {
                    cell_type: CellType::Text,
                    interactive: TextCell::mount,
                    lightweight: None,
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct CellRegistryBuilder {
    table: [Option<CellRenderers>; CellType::COUNT],
}

impl CellRegistryBuilder {
    /// Registers renderers for a known type. Unknown types are ignored.
    pub fn register(mut self, cell_type: CellType, renderers: CellRenderers) -> Self {
        match cell_type.index() {
            Some(index) => self.table[index] = Some(renderers),
            None => debug!("Cannot register renderers for unknown type {cell_type}"),
        }
        self
    }

    pub fn build(self) -> CellRegistry {
        CellRegistry { table: self.table }
    }
}
