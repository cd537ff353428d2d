//! Search-and-pick state shared by the PEOPLE and TAGS renderers.

use board_lib::model::CellValue;
use board_lib::model::Reference;

use super::CellOutbox;
use crate::fragment::Fragment;
use crate::lookup::{LookupKind, LookupRequest};

/// Open/closed popover with a search query and the latest matches.
#[derive(Debug)]
pub(super) struct RefPicker {
    kind: LookupKind,
    /// Whether an empty query is sent to the directory or just clears results.
    search_empty: bool,
    open: bool,
    query: String,
    results: Vec<Reference>,
    searched: Option<String>,
}

impl RefPicker {
    pub fn new(kind: LookupKind, search_empty: bool) -> Self {
        Self {
            kind,
            search_empty,
            open: false,
            query: String::new(),
            results: Vec::new(),
            searched: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Reference] {
        &self.results
    }

    /// Opens with a fresh query, or closes.
    pub fn toggle(&mut self, out: &mut CellOutbox) {
        if self.open {
            self.close();
        } else {
            self.open = true;
            self.searched = None;
            self.set_query(String::new(), out);
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.results.clear();
        self.searched = None;
    }

    /// Updates the query and requests a search unless it did not change.
    pub fn set_query(&mut self, query: String, out: &mut CellOutbox) {
        if self.searched.as_deref() == Some(query.as_str()) {
            self.query = query;
            return;
        }
        self.searched = Some(query.clone());
        self.query = query.clone();

        if query.is_empty() && !self.search_empty {
            self.results.clear();
            return;
        }
        out.lookup(LookupRequest::Search {
            kind: self.kind,
            query,
        });
    }

    pub fn set_results(&mut self, results: Vec<Reference>) {
        self.results = results;
    }

    /// Whether a result's label equals the query, ignoring case.
    pub fn has_exact_match(&self) -> bool {
        let query = self.query.to_lowercase();
        self.results
            .iter()
            .any(|reference| reference.label.to_lowercase() == query)
    }

    pub fn view(&self, selected: &[Reference]) -> Fragment {
        let selected = selected.iter().map(|reference| {
            Fragment::row()
                .class("selected-option")
                .child(Fragment::text("●").fg(reference.color.clone().unwrap_or_else(|| "#ccc".into())))
                .child(Fragment::text(reference.label.clone()))
                .child(Fragment::text("×").class("remove").muted())
        });
        let results = self.results.iter().map(|reference| {
            Fragment::row()
                .class("result-option")
                .child(Fragment::text("●").fg(reference.color.clone().unwrap_or_else(|| "#ccc".into())))
                .child(Fragment::text(reference.label.clone()))
        });

        Fragment::row()
            .class("picker")
            .child(Fragment::text(self.query.clone()).class("search-box"))
            .children(selected)
            .children(results)
    }
}

/// `current` plus `reference`, or `None` when it is already present.
pub(super) fn with_reference(current: &[Reference], reference: Reference) -> Option<CellValue> {
    if current.iter().any(|r| r.id == reference.id) {
        return None;
    }
    let mut refs = current.to_vec();
    refs.push(reference);
    Some(CellValue::Refs(refs))
}

/// `current` without `id`, or `None` when it is absent.
pub(super) fn without_reference(current: &[Reference], id: &str) -> Option<CellValue> {
    if !current.iter().any(|r| r.id == id) {
        return None;
    }
    let refs = current.iter().filter(|r| r.id != id).cloned().collect::<Vec<_>>();
    Some(CellValue::Refs(refs))
}

/// Up to `limit` items plus a `+N` count of the rest.
pub(super) fn overflow<T>(items: &[T], limit: usize) -> (&[T], usize) {
    let shown = items.len().min(limit);
    (&items[..shown], items.len() - shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::CellEmit;

    #[test]
    fn test_distinct_queries_only() {
        let mut picker = RefPicker::new(LookupKind::People, true);
        let mut out = CellOutbox::new();

        picker.toggle(&mut out);
        picker.set_query("an".into(), &mut out);
        picker.set_query("an".into(), &mut out);

        let queries: Vec<_> = out
            .drain()
            .map(|emit| match emit {
                CellEmit::Lookup(LookupRequest::Search { query, .. }) => query,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(queries, vec!["".to_string(), "an".to_string()]);
    }

    #[test]
    fn test_empty_query_without_search() {
        let mut picker = RefPicker::new(LookupKind::Tags, false);
        let mut out = CellOutbox::new();

        picker.toggle(&mut out);
        picker.set_results(vec![Reference::new("t1", "Urgent")]);
        picker.set_query("x".into(), &mut out);
        picker.set_query(String::new(), &mut out);

        assert_eq!(out.drain().count(), 1);
        assert!(picker.results().is_empty());
    }

    #[test]
    fn test_reference_helpers() {
        let refs = vec![Reference::new("a", "A"), Reference::new("b", "B")];

        assert!(with_reference(&refs, Reference::new("a", "A")).is_none());
        assert_eq!(with_reference(&refs, Reference::new("c", "C")).unwrap().as_refs().len(), 3);
        assert!(without_reference(&refs, "z").is_none());
        assert_eq!(without_reference(&refs, "a").unwrap().as_refs(), &[Reference::new("b", "B")]);
        assert_eq!(overflow(&refs, 1), (&refs[..1], 1));
        assert_eq!(overflow(&refs, 3), (&refs[..], 0));
    }
}
