use board_lib::model::CellType;
use board_lib::model::CellValue;
use board_lib::model::ColumnSettings;
use board_lib::model::Reference;

use super::picker::{self, RefPicker};
use super::{CellInput, CellOutbox, InteractiveCell};
use crate::fragment::Fragment;
use crate::lookup::{LookupKind, LookupResult};

const VISIBLE_AVATARS: usize = 3;
const DEFAULT_AVATAR_COLOR: &str = "#ccc";

/// Avatar stack with a people picker.
///
/// Opening the picker searches the whole directory; typing narrows the search.
#[derive(Debug)]
pub struct PeopleCell {
    value: CellValue,
    picker: RefPicker,
}

impl PeopleCell {
    pub fn mount(value: &CellValue, _config: &ColumnSettings) -> Box<dyn InteractiveCell> {
        Box::new(Self {
            value: value.clone(),
            picker: RefPicker::new(LookupKind::People, true),
        })
    }

    /// Lightweight view: plain grey discs, one per person up to the limit.
    pub fn lightweight(value: &CellValue, _config: &ColumnSettings) -> Fragment {
        let (shown, _) = picker::overflow(value.as_refs(), VISIBLE_AVATARS);
        Fragment::row()
            .class("people-cell-light")
            .children(shown.iter().map(|_| Fragment::text("●").fg("#e0e0e0")))
    }

    fn avatar(person: &Reference) -> Fragment {
        Fragment::text(person.initials())
            .class("avatar")
            .bg(person.color.clone().unwrap_or_else(|| DEFAULT_AVATAR_COLOR.into()))
    }

    fn emit(&mut self, value: Option<CellValue>, out: &mut CellOutbox) {
        if let Some(value) = value {
            self.value = value.clone();
            out.value(value);
        }
    }
}

impl InteractiveCell for PeopleCell {
    fn cell_type(&self) -> CellType {
        CellType::People
    }

    fn set_value(&mut self, value: &CellValue) {
        self.value = value.clone();
    }

    fn set_config(&mut self, _config: &ColumnSettings) {}

    fn view(&self) -> Fragment {
        let people = self.value.as_refs();
        let (shown, hidden) = picker::overflow(people, VISIBLE_AVATARS);

        let mut cell = Fragment::row()
            .class("people-cell")
            .children(shown.iter().map(Self::avatar));
        if hidden > 0 {
            cell = cell.child(Fragment::text(format!("+{hidden}")).class("avatar-overflow"));
        }
        if people.is_empty() {
            cell = cell.child(Fragment::text("+").class("add-button").muted());
        }
        if self.picker.is_open() {
            cell = cell.child(self.picker.view(people));
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
            CellInput::Add(person) => {
                let added = picker::with_reference(self.value.as_refs(), person);
                self.emit(added, out);
                self.picker.set_query(String::new(), out);
            }
            CellInput::Remove(id) => {
                let removed = picker::without_reference(self.value.as_refs(), &id);
                self.emit(removed, out);
            }
            CellInput::Cancel => self.picker.close(),
            _ => {}
        }
    }

    fn on_lookup(&mut self, result: LookupResult, _out: &mut CellOutbox) {
        if let LookupResult::Matches(people) = result {
            self.picker.set_results(people);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::CellEmit;
    use crate::lookup::LookupRequest;

    fn people(n: usize) -> CellValue {
        let names = ["Ann Lee", "Bob Stone", "Cat Moss", "Dan Ray", "Eve Oak"];
        CellValue::Refs(
            names
                .iter()
                .take(n)
                .enumerate()
                .map(|(i, name)| Reference::new(format!("p{i}"), *name))
                .collect(),
        )
    }

    #[test]
    fn test_avatar_stack_overflow() {
        let cell = PeopleCell::mount(&people(5), &ColumnSettings::new());
        assert_eq!(cell.view().plain_text(), "AL BS CM +2");
    }

    #[test]
    fn test_avatar_default_color() {
        let cell = PeopleCell::mount(&people(1), &ColumnSettings::new());
        let view = cell.view();
        let avatar = view.find_class("avatar").unwrap();
        assert_eq!(avatar.style.bg.as_ref().unwrap().as_str(), DEFAULT_AVATAR_COLOR);
    }

    #[test]
    fn test_non_array_value_renders_empty() {
        let cell = PeopleCell::mount(&CellValue::from("Ann"), &ColumnSettings::new());
        let view = cell.view();
        assert!(view.find_class("avatar").is_none());
        assert!(view.find_class("add-button").is_some());
    }

    #[test]
    fn test_open_searches_everyone() {
        let mut cell = PeopleCell::mount(&people(0), &ColumnSettings::new());
        let mut out = CellOutbox::new();

        cell.focus(&mut out);

        assert_eq!(
            out.drain().collect::<Vec<_>>(),
            vec![CellEmit::Lookup(LookupRequest::Search {
                kind: LookupKind::People,
                query: String::new(),
            })]
        );
    }

    #[test]
    fn test_add_and_remove() {
        let mut cell = PeopleCell::mount(&people(1), &ColumnSettings::new());
        let mut out = CellOutbox::new();

        cell.handle(CellInput::Add(Reference::new("p0", "Ann Lee")), &mut out);
        assert!(out.is_empty());

        cell.handle(CellInput::Add(Reference::new("p9", "Zed Zane")), &mut out);
        cell.handle(CellInput::Remove("p0".into()), &mut out);

        let values: Vec<_> = out
            .drain()
            .filter_map(|emit| match emit {
                CellEmit::Value(value) => Some(value),
                _ => None,
            })
            .collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].as_refs().len(), 2);
        assert_eq!(values[1].as_refs(), &[Reference::new("p9", "Zed Zane")]);
    }

    #[test]
    fn test_results_shown_in_picker() {
        let mut cell = PeopleCell::mount(&people(0), &ColumnSettings::new());
        let mut out = CellOutbox::new();

        cell.focus(&mut out);
        cell.on_lookup(LookupResult::Matches(vec![Reference::new("p3", "Dan Ray")]), &mut out);

        let view = cell.view();
        assert_eq!(view.find_class("result-option").unwrap().plain_text(), "● Dan Ray");
    }

    #[test]
    fn test_lightweight_discs() {
        let config = ColumnSettings::new();
        assert_eq!(PeopleCell::lightweight(&people(5), &config).plain_text(), "● ● ●");
        assert_eq!(PeopleCell::lightweight(&CellValue::Bool(true), &config).plain_text(), "");
    }
}
