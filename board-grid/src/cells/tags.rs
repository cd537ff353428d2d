use board_lib::model::CellType;
use board_lib::model::CellValue;
use board_lib::model::ColumnSettings;
use board_lib::model::Reference;

use super::picker::{self, RefPicker};
use super::{CellInput, CellOutbox, InteractiveCell};
use crate::fragment::Fragment;
use crate::lookup::{LookupKind, LookupRequest, LookupResult};

const VISIBLE_TAGS: usize = 2;

/// Tag pills with a search-or-create picker.
#[derive(Debug)]
pub struct TagsCell {
    value: CellValue,
    picker: RefPicker,
}

impl TagsCell {
    pub fn mount(value: &CellValue, _config: &ColumnSettings) -> Box<dyn InteractiveCell> {
        Box::new(Self {
            value: value.clone(),
            picker: RefPicker::new(LookupKind::Tags, false),
        })
    }

    /// Lightweight view: neutral pills with the tag labels.
    pub fn lightweight(value: &CellValue, _config: &ColumnSettings) -> Fragment {
        let (shown, _) = picker::overflow(value.as_refs(), VISIBLE_TAGS);
        Fragment::row().class("tags-cell-light").children(
            shown
                .iter()
                .map(|tag| Fragment::text(tag.label.clone()).bg("#f0f0f0").fg("#666")),
        )
    }

    fn pill(tag: &Reference) -> Fragment {
        let pill = Fragment::text(tag.label.clone()).class("tag");
        match &tag.color {
            Some(color) => pill.bg(color.clone()),
            None => pill,
        }
    }

    fn add(&mut self, tag: Reference, out: &mut CellOutbox) {
        if let Some(value) = picker::with_reference(self.value.as_refs(), tag) {
            self.value = value.clone();
            out.value(value);
        }
        self.picker.set_query(String::new(), out);
    }

    fn create(&mut self, out: &mut CellOutbox) {
        let label = self.picker.query().trim().to_string();
        if label.is_empty() {
            return;
        }
        out.lookup(LookupRequest::Create {
            kind: LookupKind::Tags,
            label,
        });
    }
}

impl InteractiveCell for TagsCell {
    fn cell_type(&self) -> CellType {
        CellType::Tags
    }

    fn set_value(&mut self, value: &CellValue) {
        self.value = value.clone();
    }

    fn set_config(&mut self, _config: &ColumnSettings) {}

    fn view(&self) -> Fragment {
        let tags = self.value.as_refs();
        let (shown, hidden) = picker::overflow(tags, VISIBLE_TAGS);

        let mut cell = Fragment::row()
            .class("tags-cell")
            .children(shown.iter().map(Self::pill));
        if hidden > 0 {
            cell = cell.child(Fragment::text(format!("+{hidden}")).class("tag-overflow"));
        }
        if tags.is_empty() {
            cell = cell.child(Fragment::text("+").class("add-button").muted());
        }

        if self.picker.is_open() {
            let mut popover = self.picker.view(tags);
            let query = self.picker.query();
            if !query.is_empty() && !self.picker.has_exact_match() {
                popover = popover.child(Fragment::text(format!("Create \"{query}\"")).class("create-option"));
            }
            if query.is_empty() && self.picker.results().is_empty() {
                popover = popover.child(Fragment::text("Type to search").class("empty-state").muted());
            }
            cell = cell.child(popover);
        }
        cell
    }

    fn focus(&mut self, out: &mut CellOutbox) {
        self.picker.toggle(out);
    }

    fn handle(&mut self, input: CellInput, out: &mut CellOutbox) {
        match input {
            CellInput::Toggle => self.picker.toggle(out),
            CellInput::Edit(query) => self.picker.set_query(query, out),
            CellInput::Commit => self.create(out),
            CellInput::Add(tag) => self.add(tag, out),
            CellInput::Remove(id) => {
                if let Some(value) = picker::without_reference(self.value.as_refs(), &id) {
                    self.value = value.clone();
                    out.value(value);
                }
            }
            CellInput::Cancel => self.picker.close(),
            _ => {}
        }
    }

    fn on_lookup(&mut self, result: LookupResult, out: &mut CellOutbox) {
        match result {
            LookupResult::Matches(tags) => self.picker.set_results(tags),
            LookupResult::Created(tag) => self.add(tag, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::CellEmit;

    fn tags() -> CellValue {
        CellValue::Refs(vec![
            Reference::new("t1", "Frontend").with_color("#579bfc"),
            Reference::new("t2", "Urgent").with_color("#e2445c"),
            Reference::new("t3", "Backend"),
        ])
    }

    #[test]
    fn test_pills_overflow() {
        let cell = TagsCell::mount(&tags(), &ColumnSettings::new());
        assert_eq!(cell.view().plain_text(), "Frontend Urgent +1");
    }

    #[test]
    fn test_empty_query_skips_lookup() {
        let mut cell = TagsCell::mount(&tags(), &ColumnSettings::new());
        let mut out = CellOutbox::new();

        cell.focus(&mut out);
        assert!(out.is_empty());
        assert!(cell.view().find_class("empty-state").is_some());

        cell.handle(CellInput::Edit("urg".into()), &mut out);
        assert_eq!(
            out.drain().collect::<Vec<_>>(),
            vec![CellEmit::Lookup(LookupRequest::Search {
                kind: LookupKind::Tags,
                query: "urg".into(),
            })]
        );
    }

    #[test]
    fn test_create_option_hidden_on_exact_match() {
        let mut cell = TagsCell::mount(&CellValue::Null, &ColumnSettings::new());
        let mut out = CellOutbox::new();

        cell.focus(&mut out);
        cell.handle(CellInput::Edit("urgent".into()), &mut out);
        assert!(cell.view().find_class("create-option").is_some());

        cell.on_lookup(LookupResult::Matches(vec![Reference::new("t2", "Urgent")]), &mut out);
        assert!(cell.view().find_class("create-option").is_none());
    }

    #[test]
    fn test_create_then_add() {
        let mut cell = TagsCell::mount(&CellValue::Null, &ColumnSettings::new());
        let mut out = CellOutbox::new();

        cell.focus(&mut out);
        cell.handle(CellInput::Edit("Research".into()), &mut out);
        out.drain().for_each(drop);

        cell.handle(CellInput::Commit, &mut out);
        assert_eq!(
            out.drain().collect::<Vec<_>>(),
            vec![CellEmit::Lookup(LookupRequest::Create {
                kind: LookupKind::Tags,
                label: "Research".into(),
            })]
        );

        let created = Reference::new("t9", "Research").with_color("#00c875");
        cell.on_lookup(LookupResult::Created(created.clone()), &mut out);
        assert_eq!(
            out.drain().collect::<Vec<_>>(),
            vec![CellEmit::Value(CellValue::Refs(vec![created]))]
        );
    }

    #[test]
    fn test_lightweight_pills() {
        let fragment = TagsCell::lightweight(&tags(), &ColumnSettings::new());
        assert_eq!(fragment.plain_text(), "Frontend Urgent");
        assert_eq!(TagsCell::lightweight(&CellValue::from(3.0), &ColumnSettings::new()).plain_text(), "");
    }
}
