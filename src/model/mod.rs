//! Keyed list models
//!
//! A [`KeyedModel`] is an ordered list of rows with a key index kept in
//! lockstep: every row has exactly one index entry and every index entry
//! points at a live row. Rows are addressed by [`RowHandle`]s that stay valid
//! until the row is removed; a handle to a removed row is rejected instead of
//! silently reaching another row.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

pub mod appfolders;
pub mod applications;

pub use appfolders::{AppFolderInfo, AppFolderRow};
pub use applications::{ApplicationInfo, ApplicationRow};

/// A row type stored in a [`KeyedModel`]
pub trait ModelRow {
    /// Unique logical key of the row
    fn key(&self) -> &str;

    /// Visibility used when no filter has been applied
    fn default_visible(&self) -> bool {
        true
    }
}

/// Opaque reference to a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowHandle {
    slot: usize,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The row was removed, or the handle came from another model
    #[error("row handle does not refer to a live row")]
    StaleHandle,
}

#[derive(Debug)]
struct Slot<R> {
    generation: u64,
    entry: Option<Entry<R>>,
}

#[derive(Debug)]
struct Entry<R> {
    row: R,
    visible: bool,
}

/// Ordered rows with O(1) lookup by key
#[derive(Debug)]
pub struct KeyedModel<R> {
    slots: Vec<Slot<R>>,
    free: Vec<usize>,
    order: Vec<usize>,
    rows: HashMap<String, RowHandle>,
    next_generation: u64,
}

impl<R> Default for KeyedModel<R> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            rows: HashMap::new(),
            next_generation: 0,
        }
    }
}

impl<R: ModelRow> KeyedModel<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn entry(&self, handle: RowHandle) -> Option<&Entry<R>> {
        self.slots
            .get(handle.slot)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    fn handle_of(&self, slot: usize) -> RowHandle {
        RowHandle {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    /// Append a row unless its key is already present.
    ///
    /// Returns the new handle, or `None` when a row with the same key exists
    /// (that row is left untouched).
    pub fn add_data(&mut self, item: R) -> Option<RowHandle> {
        if self.rows.contains_key(item.key()) {
            return None;
        }

        let key = item.key().to_string();
        let visible = item.default_visible();
        self.next_generation += 1;
        let generation = self.next_generation;
        let entry = Entry { row: item, visible };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Slot {
                    generation,
                    entry: Some(entry),
                };
                slot
            }
            None => {
                self.slots.push(Slot {
                    generation,
                    entry: Some(entry),
                });
                self.slots.len() - 1
            }
        };

        let handle = RowHandle { slot, generation };
        self.order.push(slot);
        self.rows.insert(key, handle);
        Some(handle)
    }

    pub fn get(&self, handle: RowHandle) -> Option<&R> {
        self.entry(handle).map(|entry| &entry.row)
    }

    /// Key of the row behind `handle`
    pub fn get_key(&self, handle: RowHandle) -> Option<&str> {
        self.get(handle).map(ModelRow::key)
    }

    /// Handle of the row with `key`, if any
    pub fn get_iter(&self, key: &str) -> Option<RowHandle> {
        self.rows.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    pub fn is_visible(&self, handle: RowHandle) -> bool {
        self.entry(handle).is_some_and(|entry| entry.visible)
    }

    /// Remove a row and its index entry.
    ///
    /// Removing the same handle twice fails with [`ModelError::StaleHandle`].
    pub fn remove(&mut self, handle: RowHandle) -> Result<R, ModelError> {
        if self.entry(handle).is_none() {
            return Err(ModelError::StaleHandle);
        }
        let entry = self.slots[handle.slot].entry.take().ok_or(ModelError::StaleHandle)?;
        self.rows.remove(entry.row.key());
        self.order.retain(|&slot| slot != handle.slot);
        self.free.push(handle.slot);
        Ok(entry.row)
    }

    /// Remove every row
    pub fn clear(&mut self) {
        // Reused slots get a fresh generation, so old handles stay dead
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                self.free.push(index);
            }
        }
        self.order.clear();
        self.rows.clear();
    }

    /// Recompute the visible flag of every row
    pub fn set_all_rows_visibility(&mut self, predicate: impl Fn(&R) -> bool) {
        for slot in &mut self.slots {
            if let Some(entry) = slot.entry.as_mut() {
                entry.visible = predicate(&entry.row);
            }
        }
    }

    /// Position of the row in display order
    pub fn get_path(&self, handle: RowHandle) -> Option<usize> {
        self.entry(handle)?;
        self.order.iter().position(|&slot| slot == handle.slot)
    }

    pub fn handle_at(&self, path: usize) -> Option<RowHandle> {
        self.order.get(path).map(|&slot| self.handle_of(slot))
    }

    /// Rows in display order
    pub fn iter(&self) -> impl Iterator<Item = (RowHandle, &R)> + '_ {
        self.order.iter().filter_map(move |&slot| {
            let entry = self.slots[slot].entry.as_ref()?;
            Some((self.handle_of(slot), &entry.row))
        })
    }

    /// Visible rows in display order
    pub fn iter_visible(&self) -> impl Iterator<Item = (RowHandle, &R)> + '_ {
        self.iter().filter(move |(handle, _)| self.is_visible(*handle))
    }

    /// Keys in display order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(_, row)| row.key())
    }

    /// Reorder the rows; handles stay valid
    pub fn sort_by(&mut self, mut compare: impl FnMut(&R, &R) -> Ordering) {
        let slots = &self.slots;
        self.order.sort_by(|&a, &b| match (&slots[a].entry, &slots[b].entry) {
            (Some(a), Some(b)) => compare(&a.row, &b.row),
            _ => Ordering::Equal,
        });
    }

    /// Copy of every row keyed by its key
    pub fn dump(&self) -> BTreeMap<String, R>
    where
        R: Clone,
    {
        self.iter()
            .map(|(_, row)| (row.key().to_string(), row.clone()))
            .collect()
    }

    /// Add every item in key order; existing keys are skipped
    pub fn load(&mut self, items: BTreeMap<String, R>) {
        for (_, item) in items {
            self.add_data(item);
        }
    }

    /// Index and rows agree with each other
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let live = self.slots.iter().filter(|slot| slot.entry.is_some()).count();
        live == self.rows.len()
            && live == self.order.len()
            && self
                .rows
                .iter()
                .all(|(key, handle)| self.get_key(*handle) == Some(key.as_str()))
    }
}
