//! Slot Tables
//!
//! Canonical equipment slots, legacy aliases, reserved item fields and the
//! "nothing equipped" sentinels shared by the decoder and the encoder.

use std::fmt;
use std::str::FromStr;

/// A canonical equipment slot
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Slot {
    Main,
    Sub,
    Range,
    Ammo,
    Head,
    Neck,
    Ear1,
    Ear2,
    Body,
    Hands,
    Ring1,
    Ring2,
    Back,
    Waist,
    Legs,
    Feet,
}

impl Slot {
    /// Every canonical slot, in render order
    pub const ALL: [Slot; 16] = [
        Slot::Main,
        Slot::Sub,
        Slot::Range,
        Slot::Ammo,
        Slot::Head,
        Slot::Neck,
        Slot::Ear1,
        Slot::Ear2,
        Slot::Body,
        Slot::Hands,
        Slot::Ring1,
        Slot::Ring2,
        Slot::Back,
        Slot::Waist,
        Slot::Legs,
        Slot::Feet,
    ];

    /// The slot key as written in macro source
    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Main => "main",
            Slot::Sub => "sub",
            Slot::Range => "range",
            Slot::Ammo => "ammo",
            Slot::Head => "head",
            Slot::Neck => "neck",
            Slot::Ear1 => "ear1",
            Slot::Ear2 => "ear2",
            Slot::Body => "body",
            Slot::Hands => "hands",
            Slot::Ring1 => "ring1",
            Slot::Ring2 => "ring2",
            Slot::Back => "back",
            Slot::Waist => "waist",
            Slot::Legs => "legs",
            Slot::Feet => "feet",
        }
    }

    /// Look up a slot by key, accepting legacy aliases (case-insensitive)
    pub fn from_key(key: &str) -> Option<Slot> {
        let resolved = resolve_slot_key(key);
        Slot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == resolved)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::from_key(s).ok_or_else(|| format!("Unknown equipment slot '{}'", s))
    }
}

/// Legacy slot names and the canonical slot they stand for
pub const SLOT_ALIASES: [(&str, Slot); 4] = [
    ("left_ear", Slot::Ear1),
    ("right_ear", Slot::Ear2),
    ("left_ring", Slot::Ring1),
    ("right_ring", Slot::Ring2),
];

/// Field names of an item table; never slot keys
pub const RESERVED_FIELDS: [&str; 4] = ["name", "augments", "path", "rank"];

/// Values that mean "nothing equipped" besides the empty string
pub const EMPTY_SENTINELS: [&str; 2] = ["None", "empty"];

/// Lower-case a raw slot identifier and map legacy aliases onto canonical keys.
///
/// Unknown identifiers come back lower-cased but otherwise untouched.
pub fn resolve_slot_key(raw: &str) -> String {
    let lower = raw.to_lowercase();
    SLOT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, slot)| slot.as_str().to_string())
        .unwrap_or(lower)
}

/// Whether an identifier names a field of an item table
pub fn is_reserved_field(ident: &str) -> bool {
    let lower = ident.to_lowercase();
    RESERVED_FIELDS.contains(&lower.as_str())
}

/// Whether a slot key belongs to the canonical render order
pub fn is_canonical_slot(key: &str) -> bool {
    Slot::ALL.iter().any(|slot| slot.as_str() == key)
}

/// Whether a value string means "nothing equipped". Case-sensitive.
pub fn is_unequipped(value: &str) -> bool {
    value.is_empty() || EMPTY_SENTINELS.contains(&value)
}
