//! Data structures describing the logical content of a material document.
//!
//! The content model is deliberately independent from `printpdf`: a routine describes *what* goes
//! into the document (heading, introduction, grouped entries) and the [`crate::builder::Canvas`]
//! decides where it lands on the page.

/// Vertical space reserved per entry when a routine does not pick its own budget.
pub const DEFAULT_ENTRY_HEIGHT_MM: f64 = 18.0;

/// A single exercise, game or drill listed in a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Short title printed in bold.
    pub title: &'static str,
    /// One-line explanation printed under the title.
    pub description: &'static str,
}

impl Entry {
    /// Creates a new entry.
    pub const fn new(title: &'static str, description: &'static str) -> Self {
        Self { title, description }
    }
}

/// A run of entries that share an optional group title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryGroup {
    title: Option<&'static str>,
    entries: &'static [Entry],
}

impl EntryGroup {
    /// Creates an untitled group.
    pub const fn new(entries: &'static [Entry]) -> Self {
        Self {
            title: None,
            entries,
        }
    }

    /// Creates a group printed under its own title.
    pub const fn titled(title: &'static str, entries: &'static [Entry]) -> Self {
        Self {
            title: Some(title),
            entries,
        }
    }

    /// Returns the group title, if any.
    pub fn title(&self) -> Option<&'static str> {
        self.title
    }

    /// Returns the entries of the group.
    pub fn entries(&self) -> &'static [Entry] {
        self.entries
    }
}

/// Everything a rendering routine puts on the page, in drawing order.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialContent {
    heading: &'static str,
    subheading: &'static str,
    intro: Vec<&'static str>,
    groups: Vec<EntryGroup>,
    entry_height_mm: f64,
}

impl MaterialContent {
    /// Creates content with the given heading and subheading and no entries.
    pub fn new(heading: &'static str, subheading: &'static str) -> Self {
        Self {
            heading,
            subheading,
            intro: Vec::new(),
            groups: Vec::new(),
            entry_height_mm: DEFAULT_ENTRY_HEIGHT_MM,
        }
    }

    /// Returns the document heading.
    pub fn heading(&self) -> &'static str {
        self.heading
    }

    /// Returns the subheading drawn under the heading.
    pub fn subheading(&self) -> &'static str {
        self.subheading
    }

    /// Returns the introduction lines drawn before the first group.
    pub fn intro(&self) -> &[&'static str] {
        &self.intro
    }

    /// Returns the entry groups.
    pub fn groups(&self) -> &[EntryGroup] {
        &self.groups
    }

    /// Returns the vertical budget reserved for each entry, in millimetres.
    pub fn entry_height_mm(&self) -> f64 {
        self.entry_height_mm
    }

    /// Total number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries().len()).sum()
    }

    /// Appends an introduction line and returns the updated content.
    pub fn with_intro_line(mut self, line: &'static str) -> Self {
        self.intro.push(line);
        self
    }

    /// Appends a group and returns the updated content.
    pub fn with_group(mut self, group: EntryGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Appends an untitled group holding `entries` and returns the updated content.
    pub fn with_entries(self, entries: &'static [Entry]) -> Self {
        self.with_group(EntryGroup::new(entries))
    }

    /// Overrides the per-entry height budget and returns the updated content.
    pub fn with_entry_height_mm(mut self, height: f64) -> Self {
        self.entry_height_mm = height;
        self
    }
}
