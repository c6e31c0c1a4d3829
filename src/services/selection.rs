use std::{collections::HashSet, fmt::Display, sync::Arc};

use crate::models::{Catalog, Item, ItemId, SubmissionPayload};

/// Label shown for the empty choice in every slot
pub const EMPTY_OPTION_LABEL: &str = "-- Select a movie --";

/// One of the three fixed pick positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotIndex {
    First,
    Second,
    Third,
}

impl SlotIndex {
    /// All slots in submission order
    pub const ALL: [SlotIndex; 3] = [SlotIndex::First, SlotIndex::Second, SlotIndex::Third];

    /// Zero-based position
    pub fn position(self) -> usize {
        match self {
            SlotIndex::First => 0,
            SlotIndex::Second => 1,
            SlotIndex::Third => 2,
        }
    }

    /// One-based slot number as shown to the user
    pub fn number(self) -> usize {
        self.position() + 1
    }

    pub fn from_number(number: usize) -> Option<Self> {
        match number {
            1 => Some(SlotIndex::First),
            2 => Some(SlotIndex::Second),
            3 => Some(SlotIndex::Third),
            _ => None,
        }
    }
}

impl Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot {}", self.number())
    }
}

/// Per-slot picks; `None` is an empty slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    slots: [Option<ItemId>; 3],
}

impl SelectionSet {
    pub fn get(&self, slot: SlotIndex) -> Option<ItemId> {
        self.slots[slot.position()]
    }

    fn set(&mut self, slot: SlotIndex, value: Option<ItemId>) -> Option<ItemId> {
        std::mem::replace(&mut self.slots[slot.position()], value)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Non-empty picks in slot order; duplicates are passed through
    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.slots.iter().flatten().copied().collect()
    }

    /// Whether `id` currently occupies a slot other than `slot`
    pub fn is_taken_elsewhere(&self, slot: SlotIndex, id: ItemId) -> bool {
        SlotIndex::ALL
            .iter()
            .filter(|other| **other != slot)
            .any(|other| self.get(*other) == Some(id))
    }

    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::new();
        self.slots.iter().flatten().any(|id| !seen.insert(*id))
    }
}

/// One entry in a slot's option list
///
/// `item` is `None` for the empty choice, which is never disabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotOption<'a> {
    pub item: Option<&'a Item>,
    pub disabled: bool,
    pub selected: bool,
}

impl SlotOption<'_> {
    pub fn value(&self) -> Option<ItemId> {
        self.item.map(|item| item.id)
    }

    pub fn label(&self) -> &str {
        self.item
            .map(|item| item.title.as_str())
            .unwrap_or(EMPTY_OPTION_LABEL)
    }
}

/// Owns the three-slot selection for a loaded catalog
///
/// Exclusivity across slots is not enforced by rejecting writes. Instead every
/// slot's option list is derived from the whole selection, so an item picked in
/// one slot shows up disabled in the other two. Because the lists are computed
/// on demand, any change to one slot is reflected in all three.
#[derive(Debug, Clone)]
pub struct SelectionCoordinator {
    catalog: Arc<Catalog>,
    selection: SelectionSet,
}

impl SelectionCoordinator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            selection: SelectionSet::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Assigns a slot unconditionally and returns its previous value
    pub fn set_slot(&mut self, slot: SlotIndex, item: Option<ItemId>) -> Option<ItemId> {
        if let Some(id) = item {
            if !self.catalog.contains(id) {
                tracing::warn!(%slot, item_id = %id, "Selected id is not in the catalog");
            }
        }

        let previous = self.selection.set(slot, item);
        if self.selection.has_duplicates() {
            tracing::warn!(%slot, item_id = ?item, "Selected id already occupies another slot");
        }
        tracing::debug!(%slot, previous = ?previous, current = ?item, "Slot updated");
        previous
    }

    /// Option list for `slot`: the empty choice followed by every catalog item
    pub fn available_options_for(&self, slot: SlotIndex) -> Vec<SlotOption<'_>> {
        let current = self.selection.get(slot);

        let mut options = Vec::with_capacity(self.catalog.len() + 1);
        options.push(SlotOption {
            item: None,
            disabled: false,
            selected: current.is_none(),
        });

        options.extend(self.catalog.items().iter().map(|item| SlotOption {
            item: Some(item),
            disabled: current != Some(item.id)
                && self.selection.is_taken_elsewhere(slot, item.id),
            selected: current == Some(item.id),
        }));

        options
    }

    /// Option lists for all slots, in slot order
    pub fn all_options(&self) -> [Vec<SlotOption<'_>>; 3] {
        SlotIndex::ALL.map(|slot| self.available_options_for(slot))
    }

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.selection.selected_ids()
    }

    pub fn submission_payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            selected_movies: self.selected_ids(),
        }
    }

    pub fn reset(&mut self) {
        self.selection = SelectionSet::default();
    }
}
