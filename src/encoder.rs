//! Macro Source Encoder
//!
//! Renders sets back into normalized `sets.<path> = { ... }` source. Slots
//! come out in canonical order, item fields in the order
//! `name, augments, path, rank`. Strings are written between double quotes
//! without escaping.

use std::fmt;

use serde::Deserialize;

use crate::model::{
    is_canonical_slot, split_set_path, EquipmentSet, EquipmentValue, EquippedItem, SetCollection,
    Slot,
};

/// Rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Spaces per nesting level
    pub indent: usize,
    /// Also render non-canonical slots, after the canonical ones
    pub include_unknown_slots: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            include_unknown_slots: false,
        }
    }
}

/// Encode every set with default options
pub fn encode(sets: &SetCollection) -> String {
    Encoder::default().encode(sets)
}

#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Encode sets in collection order, separated by blank lines.
    ///
    /// Sets whose path has no header form are left out with a warning.
    pub fn encode(&self, sets: &SetCollection) -> String {
        sets.iter()
            .filter_map(|(path, set)| {
                let encoded = self.encode_set(path, set);
                if encoded.is_none() {
                    log::warn!("Set '{}' has no valid header form; not encoded", path);
                }
                encoded
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Encode a single set declaration; `None` when `set_header` rejects the path
    pub fn encode_set(&self, path: &str, set: &EquipmentSet) -> Option<String> {
        let header = set_header(path)?;
        Some(
            RenderedSet {
                header,
                set,
                options: &self.options,
            }
            .to_string(),
        )
    }
}

struct RenderedSet<'a> {
    header: String,
    set: &'a EquipmentSet,
    options: &'a EncodeOptions,
}

impl RenderedSet<'_> {
    /// Slots to render, in order, without unequipped values
    fn slots(&self) -> Vec<(&str, &EquipmentValue)> {
        let canonical = Slot::ALL
            .into_iter()
            .filter_map(|slot| self.set.equipped(slot.as_str()).map(|v| (slot.as_str(), v)));

        let mut slots: Vec<_> = canonical.collect();
        if self.options.include_unknown_slots {
            slots.extend(
                self.set
                    .iter()
                    .filter(|(slot, value)| !is_canonical_slot(slot) && !value.is_unequipped()),
            );
        }
        slots
    }

    fn write_item(
        &self,
        f: &mut fmt::Formatter<'_>,
        slot: &str,
        item: &EquippedItem,
    ) -> fmt::Result {
        let pad = " ".repeat(self.options.indent);
        let field_pad = " ".repeat(self.options.indent * 2);

        writeln!(f, "{}{} = {{ name = \"{}\",", pad, slot, item.name)?;
        if let Some(augments) = &item.augments {
            let list: String = augments.iter().map(|a| format!("\"{}\",", a)).collect();
            let gap = if list.is_empty() { "" } else { " " };
            writeln!(f, "{}augments = {{ {}{}}},", field_pad, list, gap)?;
        }
        if let Some(path) = &item.path {
            writeln!(f, "{}path = \"{}\",", field_pad, path)?;
        }
        if let Some(rank) = item.rank {
            writeln!(f, "{}rank = {},", field_pad, rank)?;
        }
        writeln!(f, "{}}},", pad)
    }
}

impl fmt::Display for RenderedSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} = {{", self.header)?;

        let pad = " ".repeat(self.options.indent);
        for (slot, value) in self.slots() {
            match value {
                EquipmentValue::Name(name) => writeln!(f, "{}{} = \"{}\",", pad, slot, name)?,
                EquipmentValue::Item(item) => self.write_item(f, slot, item)?,
            }
        }

        writeln!(f, "}}")
    }
}

/// `sets.<base>.<variant>...`, bracketing segments that are not identifiers.
///
/// Returns `None` for a path that would not decode back to itself: an empty
/// or padded segment, a line break, a comment marker, or both quote
/// characters in one segment.
pub fn set_header(path: &str) -> Option<String> {
    let (base, variants) = split_set_path(path);
    let mut header = String::from("sets");
    for segment in std::iter::once(base).chain(variants) {
        let unquotable = segment.contains('"') && segment.contains('\'');
        if segment.trim().is_empty()
            || segment.trim() != segment
            || segment.contains(['\r', '\n'])
            || segment.contains("--")
            || unquotable
        {
            return None;
        }

        if is_identifier(segment) {
            header.push('.');
            header.push_str(segment);
        } else if segment.contains('"') {
            header.push_str(&format!("['{}']", segment));
        } else {
            header.push_str(&format!("[\"{}\"]", segment));
        }
    }
    Some(header)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
