//! Equipment Set Model
//!
//! Plain data shared by the decoder and the encoder. No parsing or
//! rendering logic lives here.

mod ordered;
pub mod set;
pub mod slot;
pub mod value;

pub use ordered::OrderedMap;
pub use set::{split_set_path, EquipmentSet, SetCollection};
pub use slot::{
    is_canonical_slot, is_reserved_field, is_unequipped, resolve_slot_key, Slot, EMPTY_SENTINELS,
    RESERVED_FIELDS, SLOT_ALIASES,
};
pub use value::{EquipmentValue, EquippedItem, ItemPatch};
