//! Gear Store
//!
//! Editable application state around the codec: the set collection, the
//! set currently in view, the macro source it came from and the selected
//! state modes. Every change goes through a named operation.

use crate::decoder::{decode, detect_modes};
use crate::diagnostics::Diagnostic;
use crate::encoder::Encoder;
use crate::model::{EquipmentSet, EquipmentValue, ItemPatch, OrderedMap, SetCollection};

/// Sets every fresh store starts with
pub const DEFAULT_SETS: [&str; 2] = ["idle", "engaged"];

const SET_PREFIX: &str = "sets.";

#[derive(Debug, Clone)]
pub struct GearStore {
    sets: SetCollection,
    active: String,
    source: String,
    modes: OrderedMap<String>,
    character_name: String,
    job_name: String,
}

impl Default for GearStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GearStore {
    pub fn new() -> Self {
        Self {
            sets: default_sets(),
            active: DEFAULT_SETS[0].to_string(),
            source: String::new(),
            modes: OrderedMap::new(),
            character_name: String::new(),
            job_name: String::new(),
        }
    }

    pub fn sets(&self) -> &SetCollection {
        &self.sets
    }

    /// Path of the set currently in view
    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn modes(&self) -> &OrderedMap<String> {
        &self.modes
    }

    pub fn character_name(&self) -> &str {
        &self.character_name
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn set_character_info(&mut self, name: impl Into<String>, job: impl Into<String>) {
        self.character_name = name.into();
        self.job_name = job.into();
    }

    /// Switch the view; `false` if no such set exists
    pub fn set_active(&mut self, path: &str) -> bool {
        if self.sets.contains(path) {
            self.active = path.to_string();
            true
        } else {
            false
        }
    }

    pub fn set_mode(&mut self, mode: impl Into<String>, option: impl Into<String>) {
        self.modes.insert(mode, option.into());
    }

    /// Keep the macro source and reset the modes to the defaults it declares
    pub fn load_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.modes = detect_modes(&self.source);
    }

    /// Decode macro source, replace all sets with the result and keep the source.
    ///
    /// When nothing could be decoded the current sets are left alone.
    pub fn import_source(&mut self, source: impl Into<String>) -> Vec<Diagnostic> {
        let source = source.into();
        let result = decode(&source);
        if !result.sets.is_empty() {
            self.import_sets(result.sets);
        }
        self.load_source(source);
        result.diagnostics
    }

    /// Replace every set; the view moves to `idle`, else the first set
    pub fn import_sets(&mut self, sets: SetCollection) {
        self.active = if sets.contains(DEFAULT_SETS[0]) {
            DEFAULT_SETS[0].to_string()
        } else {
            sets.paths().next().unwrap_or(DEFAULT_SETS[0]).to_string()
        };
        self.sets = sets;
    }

    /// Create an empty set (an existing one is kept) and bring it into view.
    ///
    /// Accepts `name` or `sets.name`; returns the stored path.
    pub fn add_set(&mut self, name: &str) -> String {
        let path = name.strip_prefix(SET_PREFIX).unwrap_or(name).to_string();
        self.sets.entry(&path);
        self.active = path.clone();
        path
    }

    /// Remove a set; `false` if it did not exist.
    ///
    /// Removing the last set restores the defaults. Removing the set in view
    /// moves the view to the first remaining set.
    pub fn remove_set(&mut self, path: &str) -> bool {
        if self.sets.remove(path).is_none() {
            return false;
        }

        if self.sets.is_empty() {
            self.sets = default_sets();
            self.active = DEFAULT_SETS[0].to_string();
        } else if self.active == path {
            self.active = self.sets.paths().next().unwrap_or(DEFAULT_SETS[0]).to_string();
        }
        true
    }

    /// Empty a set, creating it if needed
    pub fn clear_set(&mut self, path: &str) {
        self.sets.insert(path, EquipmentSet::new());
    }

    /// Back to a fresh store
    pub fn clear_sets(&mut self) {
        *self = Self::new();
    }

    /// Put a value into a slot, creating the set if needed.
    ///
    /// An item with an empty name is rejected and `false` is returned.
    pub fn update_slot(
        &mut self,
        path: &str,
        slot: &str,
        value: impl Into<EquipmentValue>,
    ) -> bool {
        let value = value.into();
        if let EquipmentValue::Item(item) = &value
            && item.name.is_empty()
        {
            log::warn!("Refusing item without a name for '{}' in set '{}'", slot, path);
            return false;
        }
        self.sets.entry(path).insert(slot, value);
        true
    }

    /// Merge item attributes into an equipped slot.
    ///
    /// A bare name is promoted to an item first. Returns `false` when the set
    /// or the slot does not exist or the slot holds an empty name, so no
    /// nameless item is ever created.
    pub fn update_item(&mut self, path: &str, slot: &str, patch: ItemPatch) -> bool {
        let Some(set) = self.sets.get_mut(path) else {
            return false;
        };
        let Some(current) = set.get_mut(slot).filter(|value| !value.name().is_empty()) else {
            return false;
        };

        let mut item = std::mem::replace(current, EquipmentValue::Name(String::new())).into_item();
        item.apply(patch);
        *current = EquipmentValue::Item(item);
        true
    }

    /// Sets in the current view: the active set and its variants
    pub fn visible_sets(&self) -> SetCollection {
        self.sets.view(&self.active)
    }

    /// Rendered source for the current view
    pub fn preview(&self, encoder: &Encoder) -> String {
        encoder.encode(&self.visible_sets())
    }
}

fn default_sets() -> SetCollection {
    DEFAULT_SETS
        .into_iter()
        .map(|path| (path, EquipmentSet::new()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EquippedItem;

    #[test]
    fn test_new_store_has_defaults() {
        let store = GearStore::new();
        assert_eq!(store.sets().paths().collect::<Vec<_>>(), vec!["idle", "engaged"]);
        assert_eq!(store.active(), "idle");
    }

    #[test]
    fn test_add_set_strips_prefix_and_activates() {
        let mut store = GearStore::new();
        assert_eq!(store.add_set("sets.idle.Regen"), "idle.Regen");
        assert_eq!(store.active(), "idle.Regen");
        assert!(store.sets().contains("idle.Regen"));
    }

    #[test]
    fn test_add_existing_set_keeps_contents() {
        let mut store = GearStore::new();
        store.update_slot("idle", "main", "Excalibur");
        store.add_set("idle");
        assert_eq!(store.sets().get("idle").map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_update_slot_preserves_slot_position() {
        let mut store = GearStore::new();
        store.update_slot("idle", "main", "Excalibur");
        store.update_slot("idle", "sub", "Shield");
        assert!(store.update_item(
            "idle",
            "main",
            ItemPatch {
                rank: Some(3),
                ..Default::default()
            }
        ));

        let idle = store.sets().get("idle").expect("idle");
        assert_eq!(idle.iter().map(|(slot, _)| slot).collect::<Vec<_>>(), vec!["main", "sub"]);
        assert_eq!(
            idle.get("main"),
            Some(&EquipmentValue::Item(EquippedItem::new("Excalibur").with_rank(3)))
        );
    }

    #[test]
    fn test_update_item_on_missing_slot_is_rejected() {
        let mut store = GearStore::new();
        assert!(!store.update_item("idle", "head", ItemPatch::default()));
        assert!(!store.update_item("nope", "head", ItemPatch::default()));
        assert!(store.sets().get("idle").is_some_and(|s| s.is_empty()));
    }

    #[test]
    fn test_remove_active_set_moves_view() {
        let mut store = GearStore::new();
        assert!(store.remove_set("idle"));
        assert_eq!(store.active(), "engaged");
        assert!(!store.remove_set("idle"));
    }

    #[test]
    fn test_remove_last_set_restores_defaults() {
        let mut store = GearStore::new();
        store.remove_set("idle");
        store.remove_set("engaged");
        assert_eq!(store.sets().len(), 2);
        assert_eq!(store.active(), "idle");
    }

    #[test]
    fn test_visible_sets_follow_base() {
        let mut store = GearStore::new();
        store.add_set("idle.Regen");
        assert_eq!(store.visible_sets().paths().collect::<Vec<_>>(), vec!["idle.Regen"]);

        assert!(store.set_active("idle"));
        let visible = store.visible_sets();
        assert_eq!(visible.paths().collect::<Vec<_>>(), vec!["idle", "idle.Regen"]);
        assert!(!store.set_active("missing"));
    }
}
