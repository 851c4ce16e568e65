//! Stack frame slots for variables.

use std::collections::HashMap;

/// Offset of the first slot, relative to `$sp`.
pub const FIRST_SLOT_OFFSET: i32 = -4;

/// Size of one slot in bytes. Every variable is a single word.
pub const WORD_SIZE: i32 = 4;

/// Mapping from variable names into frame-relative offsets.
///
/// Slots are handed out in first-seen order. The first name gets [FIRST_SLOT_OFFSET] and every
/// following name gets an offset [WORD_SIZE] bytes further down the stack, so offsets are unique
/// and only ever decrease. A table lives for a single translation run.
#[derive(Debug, Clone, Default)]
pub struct SlotTable {
    offsets: HashMap<String, i32>,
    order: Vec<String>,
}

impl SlotTable {
    pub fn new() -> SlotTable {
        SlotTable::default()
    }

    /// Returns the offset of `name`, allocating a new slot if the name has not been seen yet.
    pub fn allocate(&mut self, name: &str) -> i32 {
        if let Some(offset) = self.offsets.get(name) {
            return *offset;
        }

        let offset = FIRST_SLOT_OFFSET - WORD_SIZE * self.order.len() as i32;

        self.offsets.insert(name.to_string(), offset);
        self.order.push(name.to_string());

        offset
    }

    /// Returns the offset of `name` if it has a slot.
    pub fn get<S: AsRef<str>>(&self, name: S) -> Option<i32> {
        self.offsets.get(name.as_ref()).copied()
    }

    pub fn contains<S: AsRef<str>>(&self, name: S) -> bool {
        self.offsets.contains_key(name.as_ref())
    }

    /// Iterates over the slots in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.order.iter()
            .map(move |name| (name.as_str(), self.offsets[name]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of bytes the allocated slots occupy below `$sp`.
    pub fn frame_size(&self) -> i32 {
        WORD_SIZE * self.order.len() as i32
    }
}

#[test]
fn test_allocation_order() {
    let mut slots = SlotTable::new();

    assert_eq!(slots.allocate("a"), -4);
    assert_eq!(slots.allocate("b"), -8);
    assert_eq!(slots.allocate("a"), -4);
    assert_eq!(slots.allocate("c"), -12);

    assert_eq!(slots.iter().collect::<Vec<_>>(), vec![("a", -4), ("b", -8), ("c", -12)]);
    assert_eq!(slots.frame_size(), 12);
}

#[test]
fn test_names_are_case_sensitive() {
    let mut slots = SlotTable::new();

    slots.allocate("x");
    slots.allocate("X");

    assert_eq!(slots.get("x"), Some(-4));
    assert_eq!(slots.get("X"), Some(-8));
    assert!(!slots.contains("y"));
    assert_eq!(slots.len(), 2);
}
