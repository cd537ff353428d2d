//! Adaptive cell host.
//!
//! A [`CellHost`] owns the render state of one visible (item, column) slot.
//! Inputs (tier, type, value, config) are staged by setters and resolved
//! together by [`CellHost::flush`]: a tier or type change replaces the mounted
//! renderer, anything else updates it in place.
//!
//! The host keeps its own copy of the value and config it last showed. A new
//! renderer is always seeded from that copy, which is what keeps the display
//! stable across remounts. Edits made through a renderer update the copy
//! immediately and are reported upward as [`HostEvent`]s.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use board_lib::model::CellType;
use board_lib::model::CellValue;
use board_lib::model::ColumnSettings;
use log::debug;
use tokio_util::sync::CancellationToken;

use crate::cells::{CellEmit, CellInput, CellOutbox, InteractiveCell, LightweightFn};
use crate::fragment::Fragment;
use crate::lookup::{LookupReply, LookupRequest};
use crate::registry::CellRegistry;
use crate::velocity::ScrollSpeed;

// =============================================================================
// Identifiers
// =============================================================================

/// Which renderer tier a slot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tier {
    #[default]
    Interactive,
    Lightweight,
}

impl Tier {
    pub fn for_speed(speed: ScrollSpeed) -> Self {
        match speed {
            ScrollSpeed::Normal => Tier::Interactive,
            ScrollSpeed::Fast => Tier::Lightweight,
        }
    }
}

/// Address of a cell slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub item_id: String,
    pub column_id: String,
}

impl SlotKey {
    pub fn new(item_id: impl Into<String>, column_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            column_id: column_id.into(),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.item_id, self.column_id)
    }
}

/// Identity of one mounted renderer. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(u64);

impl MountId {
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount#{}", self.0)
    }
}

/// The renderer a mount was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererId {
    /// Resolved type, TEXT for fallbacks.
    pub cell_type: CellType,
    pub tier: Tier,
}

impl fmt::Display for RendererId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.cell_type, self.tier)
    }
}

// =============================================================================
// Events
// =============================================================================

/// A change made through a slot's renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// New value for this slot's item.
    Value(CellValue),
    /// New settings for this slot's whole column.
    Config(ColumnSettings),
}

/// A lookup a renderer asked for, waiting to be dispatched.
#[derive(Debug, Clone)]
pub struct LookupTask {
    pub mount: MountId,
    pub request: LookupRequest,
    pub cancel: CancellationToken,
}

// =============================================================================
// Mount
// =============================================================================

enum MountView {
    Interactive(Box<dyn InteractiveCell>),
    Lightweight {
        render: LightweightFn,
        fragment: Fragment,
    },
}

struct Mount {
    id: MountId,
    renderer: RendererId,
    view: MountView,
    /// Cancelled when the mount goes away; parent of all its lookups.
    cancel: CancellationToken,
    /// The in-flight search, superseded by the next one.
    search: Option<CancellationToken>,
}

impl Mount {
    fn set_value(&mut self, value: &CellValue, config: &ColumnSettings) {
        match &mut self.view {
            MountView::Interactive(cell) => cell.set_value(value),
            MountView::Lightweight { render, fragment } => *fragment = render(value, config),
        }
    }

    fn set_config(&mut self, value: &CellValue, config: &ColumnSettings) {
        match &mut self.view {
            MountView::Interactive(cell) => cell.set_config(config),
            MountView::Lightweight { render, fragment } => *fragment = render(value, config),
        }
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl fmt::Debug for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mount")
            .field("id", &self.id)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// CellHost
// =============================================================================

/// Render state for one cell slot.
#[derive(Debug)]
pub struct CellHost {
    key: SlotKey,
    registry: Arc<CellRegistry>,

    tier: Tier,
    cell_type: CellType,
    /// What the slot shows. Updated by upstream changes and by edits.
    value: CellValue,
    config: ColumnSettings,

    /// Last inputs received from upstream, to tell real changes from repeats.
    input_value: Option<CellValue>,
    input_config: Option<ColumnSettings>,

    pending_tier: Option<Tier>,
    pending_type: Option<CellType>,
    pending_value: Option<CellValue>,
    pending_config: Option<ColumnSettings>,

    mount: Option<Mount>,
    events: Vec<HostEvent>,
    lookups: Vec<LookupTask>,
}

impl CellHost {
    /// Creates an unmounted host. Nothing is shown until the first flush.
    pub fn new(key: SlotKey, registry: Arc<CellRegistry>) -> Self {
        Self {
            key,
            registry,
            tier: Tier::default(),
            cell_type: CellType::Text,
            value: CellValue::Null,
            config: ColumnSettings::default(),
            input_value: None,
            input_config: None,
            pending_tier: None,
            pending_type: None,
            pending_value: None,
            pending_config: None,
            mount: None,
            events: Vec::new(),
            lookups: Vec::new(),
        }
    }

    pub fn key(&self) -> &SlotKey {
        &self.key
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn cell_type(&self) -> &CellType {
        &self.cell_type
    }

    /// The value the slot currently shows.
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    pub fn config(&self) -> &ColumnSettings {
        &self.config
    }

    pub fn mount_id(&self) -> Option<MountId> {
        self.mount.as_ref().map(|mount| mount.id)
    }

    pub fn renderer(&self) -> Option<&RendererId> {
        self.mount.as_ref().map(|mount| &mount.renderer)
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    pub fn set_tier(&mut self, tier: Tier) {
        self.pending_tier = Some(tier);
    }

    pub fn set_type(&mut self, cell_type: CellType) {
        self.pending_type = Some(cell_type);
    }

    /// Stages an upstream value. Repeating the previous upstream value is not
    /// a change, so a store that has not caught up with an edit yet cannot
    /// overwrite it.
    pub fn set_value(&mut self, value: &CellValue) {
        if self.input_value.as_ref() == Some(value) {
            return;
        }
        self.input_value = Some(value.clone());
        self.pending_value = Some(value.clone());
    }

    pub fn set_config(&mut self, config: &ColumnSettings) {
        if self.input_config.as_ref() == Some(config) {
            return;
        }
        self.input_config = Some(config.clone());
        self.pending_config = Some(config.clone());
    }

    /// Applies a column-level config change made through a sibling slot.
    pub fn apply_column_config(&mut self, config: &ColumnSettings) {
        if &self.config == config {
            return;
        }
        self.config = config.clone();
        if let Some(mount) = &mut self.mount {
            mount.set_config(&self.value, &self.config);
        }
    }

    /// Resolves all staged inputs into a single render decision.
    pub fn flush(&mut self) {
        let tier = self.pending_tier.take().unwrap_or(self.tier);
        let cell_type = self.pending_type.take().unwrap_or_else(|| self.cell_type.clone());

        if self.mount.is_none() || tier != self.tier || cell_type != self.cell_type {
            self.unmount();
            self.tier = tier;
            self.cell_type = cell_type;
            if let Some(value) = self.pending_value.take() {
                self.value = value;
            }
            if let Some(config) = self.pending_config.take() {
                self.config = config;
            }
            self.mount = Some(self.build_mount());
            return;
        }

        let Some(mount) = &mut self.mount else {
            return;
        };
        if let Some(config) = self.pending_config.take()
            && config != self.config
        {
            self.config = config;
            mount.set_config(&self.value, &self.config);
        }
        if let Some(value) = self.pending_value.take()
            && value != self.value
        {
            self.value = value;
            mount.set_value(&self.value, &self.config);
        }
    }

    /// Releases the mounted renderer, keeping any staged edit.
    ///
    /// Pending lookups of the mount are cancelled before this returns.
    pub fn teardown(&mut self) {
        self.unmount();
        self.lookups.clear();
    }

    fn build_mount(&self) -> Mount {
        let resolution = self.registry.resolve(&self.cell_type);
        let renderer = RendererId {
            cell_type: resolution.cell_type.clone(),
            tier: self.tier,
        };
        let view = match self.tier {
            Tier::Interactive => {
                MountView::Interactive((resolution.interactive)(&self.value, &self.config))
            }
            Tier::Lightweight => {
                let render = resolution.lightweight_or_placeholder();
                MountView::Lightweight {
                    render,
                    fragment: render(&self.value, &self.config),
                }
            }
        };

        let id = MountId::next();
        debug!("Mounted {renderer} for {} ({id})", self.key);
        Mount {
            id,
            renderer,
            view,
            cancel: CancellationToken::new(),
            search: None,
        }
    }

    fn unmount(&mut self) {
        let Some(mut mount) = self.mount.take() else {
            return;
        };

        if let MountView::Interactive(cell) = &mut mount.view
            && let Some(staged) = cell.take_staged()
            && staged != self.value
        {
            debug!("Committing staged edit of {} before unmount", self.key);
            self.value = staged.clone();
            self.events.push(HostEvent::Value(staged));
        }

        debug!("Unmounted {} for {} ({})", mount.renderer, self.key, mount.id);
        self.lookups.retain(|task| task.mount != mount.id);
        drop(mount);
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Routes a user input to the mounted interactive renderer.
    ///
    /// Returns `false` when nothing interactive is mounted.
    pub fn handle(&mut self, input: CellInput) -> bool {
        self.with_interactive(|cell, out| cell.handle(input, out))
    }

    /// Keyboard activation of the mounted interactive renderer.
    pub fn focus(&mut self) -> bool {
        self.with_interactive(|cell, out| cell.focus(out))
    }

    /// Delivers a finished lookup. Replies for any other mount are dropped.
    pub fn deliver(&mut self, reply: LookupReply) -> bool {
        let current = self.mount_id();
        if current != Some(reply.mount) {
            debug!(
                "Discarding lookup reply for {} from {}, current mount {:?}",
                self.key, reply.mount, current
            );
            return false;
        }
        self.with_interactive(|cell, out| cell.on_lookup(reply.result, out))
    }

    fn with_interactive(
        &mut self,
        f: impl FnOnce(&mut dyn InteractiveCell, &mut CellOutbox),
    ) -> bool {
        let Some(Mount {
            view: MountView::Interactive(cell),
            ..
        }) = &mut self.mount
        else {
            debug!("Ignoring interaction with {}: no interactive renderer", self.key);
            return false;
        };

        let mut out = CellOutbox::new();
        f(cell.as_mut(), &mut out);
        let emits: Vec<CellEmit> = out.drain().collect();
        for emit in emits {
            self.process(emit);
        }
        true
    }

    fn process(&mut self, emit: CellEmit) {
        match emit {
            CellEmit::Value(value) => {
                self.value = value.clone();
                self.events.push(HostEvent::Value(value));
            }
            CellEmit::Config(config) => {
                self.config = config.clone();
                self.events.push(HostEvent::Config(config));
            }
            CellEmit::Lookup(request) => {
                let Some(mount) = &mut self.mount else {
                    return;
                };
                let cancel = mount.cancel.child_token();
                if request.is_search()
                    && let Some(previous) = mount.search.replace(cancel.clone())
                {
                    previous.cancel();
                }
                self.lookups.push(LookupTask {
                    mount: mount.id,
                    request,
                    cancel,
                });
            }
        }
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    pub fn view(&self) -> Fragment {
        match &self.mount {
            Some(Mount {
                view: MountView::Interactive(cell),
                ..
            }) => cell.view(),
            Some(Mount {
                view: MountView::Lightweight { fragment, .. },
                ..
            }) => fragment.clone(),
            None => Fragment::empty(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drain_lookups(&mut self) -> Vec<LookupTask> {
        std::mem::take(&mut self.lookups)
    }
}
