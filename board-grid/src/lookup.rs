//! Asynchronous directory lookups for picker renderers.
//!
//! Renderers ask for a search or a create through their outbox; the host
//! hands the request to the [`LookupDispatcher`], which runs it as a task on
//! the current tokio runtime. Each task carries the slot's cancellation token
//! and the identity of the mount that asked, so a reply that arrives after the
//! slot was torn down or remounted is either never produced or is discarded
//! when delivered.

use std::sync::Arc;
use std::time::Duration;

use board_lib::directory::{Directory, InMemoryDirectory};
use board_lib::model::Reference;
use log::{debug, warn};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::GridConfig;
use crate::host::{MountId, SlotKey};

/// Which directory a lookup goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    People,
    Tags,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupRequest {
    /// Searches the directory, after the kind's debounce delay.
    Search { kind: LookupKind, query: String },
    /// Creates a new entry, immediately.
    Create { kind: LookupKind, label: String },
}

impl LookupRequest {
    pub fn kind(&self) -> LookupKind {
        match self {
            LookupRequest::Search { kind, .. } | LookupRequest::Create { kind, .. } => *kind,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, LookupRequest::Search { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Matches(Vec<Reference>),
    Created(Reference),
}

/// A finished lookup, addressed to the mount that requested it.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupReply {
    pub slot: SlotKey,
    pub mount: MountId,
    pub result: LookupResult,
}

/// The people and tag directories.
#[derive(Clone)]
pub struct Directories {
    pub people: Arc<dyn Directory>,
    pub tags: Arc<dyn Directory>,
}

impl Directories {
    pub fn new(people: Arc<dyn Directory>, tags: Arc<dyn Directory>) -> Self {
        Self { people, tags }
    }

    /// In-memory directories seeded with the sample people and tags.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryDirectory::people()),
            Arc::new(InMemoryDirectory::tags()),
        )
    }

    fn get(&self, kind: LookupKind) -> &Arc<dyn Directory> {
        match kind {
            LookupKind::People => &self.people,
            LookupKind::Tags => &self.tags,
        }
    }
}

impl std::fmt::Debug for Directories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directories").finish_non_exhaustive()
    }
}

/// Runs lookups as tasks and collects their replies.
#[derive(Debug)]
pub struct LookupDispatcher {
    directories: Option<Directories>,
    people_debounce: Duration,
    tag_debounce: Duration,
    tx: mpsc::UnboundedSender<LookupReply>,
    rx: mpsc::UnboundedReceiver<LookupReply>,
}

impl LookupDispatcher {
    pub fn new(directories: Option<Directories>, config: &GridConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            directories,
            people_debounce: config.people_debounce(),
            tag_debounce: config.tag_debounce(),
            tx,
            rx,
        }
    }

    fn delay(&self, request: &LookupRequest) -> Duration {
        match request {
            LookupRequest::Search {
                kind: LookupKind::People,
                ..
            } => self.people_debounce,
            LookupRequest::Search {
                kind: LookupKind::Tags,
                ..
            } => self.tag_debounce,
            LookupRequest::Create { .. } => Duration::ZERO,
        }
    }

    /// Starts a lookup that stops early if `cancel` fires.
    ///
    /// Without directories or outside a tokio runtime the request is dropped.
    pub fn dispatch(
        &self,
        slot: SlotKey,
        mount: MountId,
        request: LookupRequest,
        cancel: CancellationToken,
    ) {
        let Some(directories) = &self.directories else {
            debug!("No directories configured, dropping {request:?}");
            return;
        };
        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime, dropping lookup {request:?} for {slot}");
            return;
        };

        let directory = Arc::clone(directories.get(request.kind()));
        let delay = self.delay(&request);
        let tx = self.tx.clone();

        runtime.spawn(async move {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Lookup for {slot} ({mount}) cancelled");
                    return;
                }
                result = run(directory, request, delay) => result,
            };
            if let Some(result) = result {
                // The receiver only closes when the grid is dropped.
                let _ = tx.send(LookupReply {
                    slot,
                    mount,
                    result,
                });
            }
        });
    }

    /// Takes the next finished lookup, if any.
    pub fn try_recv(&mut self) -> Option<LookupReply> {
        self.rx.try_recv().ok()
    }

    /// Waits for the next finished lookup.
    pub async fn recv(&mut self) -> Option<LookupReply> {
        self.rx.recv().await
    }
}

async fn run(
    directory: Arc<dyn Directory>,
    request: LookupRequest,
    delay: Duration,
) -> Option<LookupResult> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match request {
        LookupRequest::Search { kind, query } => match directory.search(&query).await {
            Ok(matches) => Some(LookupResult::Matches(matches)),
            Err(e) => {
                warn!("{kind:?} search for {query:?} failed: {e}");
                Some(LookupResult::Matches(Vec::new()))
            }
        },
        LookupRequest::Create { kind, label } => match directory.create(&label).await {
            Ok(created) => Some(LookupResult::Created(created)),
            Err(e) => {
                warn!("Creating {kind:?} entry {label:?} failed: {e}");
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> SlotKey {
        SlotKey::new("i1", "col_tags")
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_waits_for_debounce() {
        let mut dispatcher = LookupDispatcher::new(Some(Directories::in_memory()), &GridConfig::default());
        let mount = MountId::next();
        let request = LookupRequest::Search {
            kind: LookupKind::Tags,
            query: "urg".into(),
        };

        dispatcher.dispatch(slot(), mount, request, CancellationToken::new());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(dispatcher.try_recv().is_none());

        let reply = dispatcher.recv().await.unwrap();
        assert_eq!(reply.mount, mount);
        let LookupResult::Matches(matches) = reply.result else {
            panic!("expected matches");
        };
        assert!(matches.iter().any(|tag| tag.label == "Urgent"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_lookup_never_replies() {
        let mut dispatcher = LookupDispatcher::new(Some(Directories::in_memory()), &GridConfig::default());
        let cancel = CancellationToken::new();
        let request = LookupRequest::Search {
            kind: LookupKind::People,
            query: String::new(),
        };

        dispatcher.dispatch(slot(), MountId::next(), request, cancel.clone());
        cancel.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(dispatcher.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_create_is_immediate() {
        let mut dispatcher = LookupDispatcher::new(Some(Directories::in_memory()), &GridConfig::default());
        let request = LookupRequest::Create {
            kind: LookupKind::Tags,
            label: "Research".into(),
        };

        dispatcher.dispatch(slot(), MountId::next(), request, CancellationToken::new());

        let reply = dispatcher.recv().await.unwrap();
        assert!(matches!(reply.result, LookupResult::Created(tag) if tag.label == "Research"));
    }

    #[test]
    fn test_without_runtime_drops_request() {
        let mut dispatcher = LookupDispatcher::new(Some(Directories::in_memory()), &GridConfig::default());
        let request = LookupRequest::Create {
            kind: LookupKind::Tags,
            label: "Research".into(),
        };

        dispatcher.dispatch(slot(), MountId::next(), request, CancellationToken::new());
        assert!(dispatcher.try_recv().is_none());
    }
}
