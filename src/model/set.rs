//! Equipment Sets and Collections

use serde::{Deserialize, Serialize};

use super::ordered::OrderedMap;
use super::slot::Slot;
use super::value::EquipmentValue;

/// Slot key to value, in first-insertion order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentSet {
    slots: OrderedMap<EquipmentValue>,
}

impl EquipmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot: &str) -> Option<&EquipmentValue> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: &str) -> Option<&mut EquipmentValue> {
        self.slots.get_mut(slot)
    }

    /// Value for a canonical slot
    pub fn slot(&self, slot: Slot) -> Option<&EquipmentValue> {
        self.slots.get(slot.as_str())
    }

    /// Value for a slot unless it is absent, empty or a sentinel
    pub fn equipped(&self, slot: &str) -> Option<&EquipmentValue> {
        self.slots.get(slot).filter(|value| !value.is_unequipped())
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    pub fn insert(
        &mut self,
        slot: impl Into<String>,
        value: impl Into<EquipmentValue>,
    ) -> Option<EquipmentValue> {
        self.slots.insert(slot, value.into())
    }

    pub fn remove(&mut self, slot: &str) -> Option<EquipmentValue> {
        self.slots.remove(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EquipmentValue)> {
        self.slots.iter()
    }

    /// Copy of this set without empty or sentinel slots
    pub fn without_unequipped(&self) -> EquipmentSet {
        self.iter()
            .filter(|(_, value)| !value.is_unequipped())
            .map(|(slot, value)| (slot, value.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<EquipmentValue>> FromIterator<(K, V)> for EquipmentSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = EquipmentSet::new();
        for (slot, value) in iter {
            set.insert(slot, value);
        }
        set
    }
}

/// Set path (e.g. `idle.Regen`) to set, in first-insertion order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetCollection {
    sets: OrderedMap<EquipmentSet>,
}

impl SetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&EquipmentSet> {
        self.sets.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut EquipmentSet> {
        self.sets.get_mut(path)
    }

    /// The set at `path`, created empty if missing
    pub fn entry(&mut self, path: &str) -> &mut EquipmentSet {
        self.sets.get_or_insert_with(path, EquipmentSet::new)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.sets.contains_key(path)
    }

    /// Insert or replace; a replaced set keeps its position
    pub fn insert(&mut self, path: impl Into<String>, set: EquipmentSet) -> Option<EquipmentSet> {
        self.sets.insert(path, set)
    }

    pub fn remove(&mut self, path: &str) -> Option<EquipmentSet> {
        self.sets.remove(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.sets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EquipmentSet)> {
        self.sets.iter()
    }

    /// Sets at `base` or any variant of it (`base.*`), in collection order
    pub fn view(&self, base: &str) -> SetCollection {
        let prefix = format!("{}.", base);
        self.iter()
            .filter(|(path, _)| *path == base || path.starts_with(&prefix))
            .map(|(path, set)| (path, set.clone()))
            .collect()
    }

    /// Copy of this collection with every set stripped of unequipped slots
    pub fn without_unequipped(&self) -> SetCollection {
        self.iter()
            .map(|(path, set)| (path, set.without_unequipped()))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, EquipmentSet)> for SetCollection {
    fn from_iter<I: IntoIterator<Item = (K, EquipmentSet)>>(iter: I) -> Self {
        Self {
            sets: iter.into_iter().collect(),
        }
    }
}

/// Split a set path into its base set and variant segments
pub fn split_set_path(path: &str) -> (&str, Vec<&str>) {
    let mut segments = path.split('.');
    let base = segments.next().unwrap_or_default();
    (base, segments.collect())
}
