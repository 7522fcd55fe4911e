//! Slot Values
//!
//! What a slot holds: a bare item name, or an item with extra attributes.

use serde::{Deserialize, Serialize};

use super::slot::is_unequipped;

/// An item carrying attributes beyond its name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquippedItem {
    /// Item name, never empty once decoded
    pub name: String,
    /// Augment strings; `Some(vec![])` records an empty augment table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augments: Option<Vec<String>>,
    /// Augment path (e.g. "A", "D")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Augment rank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl EquippedItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_augments<I, S>(mut self, augments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.augments = Some(augments.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Overwrite the attributes set in `patch`, leaving the rest untouched
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(augments) = patch.augments {
            self.augments = Some(augments);
        }
        if let Some(path) = patch.path {
            self.path = Some(path);
        }
        if let Some(rank) = patch.rank {
            self.rank = Some(rank);
        }
    }
}

/// Partial update of an item's attributes
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ItemPatch {
    pub augments: Option<Vec<String>>,
    pub path: Option<String>,
    pub rank: Option<u32>,
}

/// The value recorded for one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EquipmentValue {
    /// A bare item name
    Name(String),
    /// An item with augments, path or rank
    Item(EquippedItem),
}

impl EquipmentValue {
    pub fn name(&self) -> &str {
        match self {
            EquipmentValue::Name(name) => name,
            EquipmentValue::Item(item) => &item.name,
        }
    }

    /// Empty or a "nothing equipped" sentinel
    pub fn is_unequipped(&self) -> bool {
        is_unequipped(self.name())
    }

    /// Promote to an item, keeping existing attributes
    pub fn into_item(self) -> EquippedItem {
        match self {
            EquipmentValue::Name(name) => EquippedItem::new(name),
            EquipmentValue::Item(item) => item,
        }
    }
}

impl From<&str> for EquipmentValue {
    fn from(name: &str) -> Self {
        EquipmentValue::Name(name.to_string())
    }
}

impl From<String> for EquipmentValue {
    fn from(name: String) -> Self {
        EquipmentValue::Name(name)
    }
}

impl From<EquippedItem> for EquipmentValue {
    fn from(item: EquippedItem) -> Self {
        EquipmentValue::Item(item)
    }
}
