//! Renderable fragments.
//!
//! A fragment is the output of every renderer: a small styled tree that a
//! front end turns into widgets, DOM nodes or terminal cells.

use unicode_width::UnicodeWidthChar;

/// A CSS-style hex color such as `#00c875`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    pub fn hex(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub muted: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<Fragment>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    /// Semantic class, e.g. `status-cell` or `placeholder`.
    pub class: &'static str,
    pub content: Content,
    pub style: Style,
}

impl Fragment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn row() -> Self {
        Self {
            content: Content::Children(Vec::new()),
            ..Default::default()
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = class;
        self
    }

    pub fn fg(mut self, color: impl Into<String>) -> Self {
        self.style.fg = Some(Color::hex(color));
        self
    }

    pub fn bg(mut self, color: impl Into<String>) -> Self {
        self.style.bg = Some(Color::hex(color));
        self
    }

    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    pub fn muted(mut self) -> Self {
        self.style.muted = true;
        self
    }

    /// Appends a child, turning text or empty content into a child list.
    pub fn child(mut self, child: Fragment) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            Content::Text(text) => {
                let existing = Fragment::text(std::mem::take(text));
                self.content = Content::Children(vec![existing, child]);
            }
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Fragment>) -> Self {
        for child in children {
            self = self.child(child);
        }
        self
    }

    /// Finds the first fragment (depth first, self included) with a class.
    pub fn find_class(&self, class: &str) -> Option<&Fragment> {
        if self.class == class {
            return Some(self);
        }
        if let Content::Children(children) = &self.content {
            for child in children {
                if let Some(found) = child.find_class(class) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Text content flattened depth first, with children separated by a space.
    pub fn plain_text(&self) -> String {
        match &self.content {
            Content::None => String::new(),
            Content::Text(text) => text.clone(),
            Content::Children(children) => children
                .iter()
                .map(Fragment::plain_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Plain text truncated or padded to exactly `width` terminal columns.
    pub fn fit(&self, width: usize) -> String {
        let text = self.plain_text();
        let mut out = String::new();
        let mut used = 0;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            out.push(ch);
            used += w;
        }
        out.extend(std::iter::repeat_n(' ', width - used));
        out
    }
}
