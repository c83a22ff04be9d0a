//! Dropdown state for backend-provided option lists

use super::models::{ConfigResponse, OptionItem};

/// One entry as rendered in a dropdown: `value` is empty for the placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectEntry<'a> {
    pub value: &'a str,
    pub label: &'a str,
}

/// A dropdown populated from the backend configuration
///
/// An unloaded list has no entries at all. Once populated it starts with a
/// placeholder entry (index 0) followed by the items in backend order.
#[derive(Debug, Clone)]
pub struct SelectList {
    placeholder: String,
    items: Vec<OptionItem>,
    loaded: bool,
    /// 0 is the placeholder, `n` is `items[n - 1]`
    selected: usize,
}

impl SelectList {
    pub fn new(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            items: Vec::new(),
            loaded: false,
            selected: 0,
        }
    }

    /// Replace the options and reset the selection to the placeholder
    pub fn populate(&mut self, items: Vec<OptionItem>) {
        self.items = items;
        self.loaded = true;
        self.selected = 0;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn items(&self) -> &[OptionItem] {
        &self.items
    }

    /// All rendered entries, placeholder first; empty until populated
    pub fn entries(&self) -> Vec<SelectEntry<'_>> {
        if !self.loaded {
            return Vec::new();
        }
        std::iter::once(SelectEntry {
            value: "",
            label: &self.placeholder,
        })
        .chain(self.items.iter().map(|item| SelectEntry {
            value: &item.id,
            label: &item.name,
        }))
        .collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Select by entry index (0 = placeholder); out-of-range indexes are clamped
    #[cfg(test)]
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.items.len());
    }

    /// Select the entry whose id matches, if any
    #[cfg(test)]
    pub fn select_id(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(pos) => {
                self.selected = pos + 1;
                true
            }
            None => false,
        }
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % (self.items.len() + 1);
    }

    pub fn prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.items.len();
        } else {
            self.selected -= 1;
        }
    }

    /// Back to the placeholder, keeping the options
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// The selected option id for the payload (`None` serializes as null)
    pub fn selected_id(&self) -> Option<String> {
        self.selected_entry()
            .map(|entry| entry.value)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Label shown in the collapsed dropdown
    pub fn display_label(&self) -> &str {
        self.selected_entry()
            .map(|entry| entry.label)
            .unwrap_or(&self.placeholder)
    }

    fn selected_entry(&self) -> Option<SelectEntry<'_>> {
        self.entries().into_iter().nth(self.selected)
    }
}

/// Which backend list a dropdown is sourced from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Status,
    Building,
    Shelf,
    ToteBox,
    CheckedOutBy,
    Condition,
}

impl OptionKind {
    pub const ALL: [OptionKind; 6] = [
        OptionKind::Status,
        OptionKind::Building,
        OptionKind::Shelf,
        OptionKind::ToteBox,
        OptionKind::CheckedOutBy,
        OptionKind::Condition,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Building => "Building",
            Self::Shelf => "Shelf",
            Self::ToteBox => "Tote/Box",
            Self::CheckedOutBy => "Checked Out By",
            Self::Condition => "Condition",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Status => "— Status —",
            Self::Building => "— Building —",
            Self::Shelf => "— Shelf —",
            Self::ToteBox => "— Tote/Box —",
            Self::CheckedOutBy => "— Employee —",
            Self::Condition => "— Condition —",
        }
    }
}

/// The six dropdowns fed by `GET /config`
#[derive(Debug, Clone)]
pub struct OptionLists {
    pub status: SelectList,
    pub building: SelectList,
    pub shelf: SelectList,
    pub tote_box: SelectList,
    pub checked_out_by: SelectList,
    pub condition: SelectList,
}

impl OptionLists {
    pub fn new() -> Self {
        Self {
            status: SelectList::new(OptionKind::Status.placeholder()),
            building: SelectList::new(OptionKind::Building.placeholder()),
            shelf: SelectList::new(OptionKind::Shelf.placeholder()),
            tote_box: SelectList::new(OptionKind::ToteBox.placeholder()),
            checked_out_by: SelectList::new(OptionKind::CheckedOutBy.placeholder()),
            condition: SelectList::new(OptionKind::Condition.placeholder()),
        }
    }

    /// Populate every list from a config response
    pub fn apply_config(&mut self, config: ConfigResponse) {
        self.status.populate(config.status_options);
        self.building.populate(config.building_options);
        self.shelf.populate(config.shelf_options);
        self.tote_box.populate(config.tote_box_options);
        self.checked_out_by.populate(config.checked_out_by_options);
        self.condition.populate(config.condition_options);
    }

    pub fn get(&self, kind: OptionKind) -> &SelectList {
        match kind {
            OptionKind::Status => &self.status,
            OptionKind::Building => &self.building,
            OptionKind::Shelf => &self.shelf,
            OptionKind::ToteBox => &self.tote_box,
            OptionKind::CheckedOutBy => &self.checked_out_by,
            OptionKind::Condition => &self.condition,
        }
    }

    pub fn get_mut(&mut self, kind: OptionKind) -> &mut SelectList {
        match kind {
            OptionKind::Status => &mut self.status,
            OptionKind::Building => &mut self.building,
            OptionKind::Shelf => &mut self.shelf,
            OptionKind::ToteBox => &mut self.tote_box,
            OptionKind::CheckedOutBy => &mut self.checked_out_by,
            OptionKind::Condition => &mut self.condition,
        }
    }

    /// Reset all selections to their placeholders
    pub fn reset_selections(&mut self) {
        for kind in OptionKind::ALL {
            self.get_mut(kind).reset();
        }
    }

    /// True when no list has been populated
    pub fn is_empty(&self) -> bool {
        OptionKind::ALL
            .iter()
            .all(|kind| self.get(*kind).entries().is_empty())
    }
}

impl Default for OptionLists {
    fn default() -> Self {
        Self::new()
    }
}
