//! Gearset Codec
//!
//! Decoding and encoding of equipment sets written as `sets.<name> = { ... }`
//! tables in macro source.
//!
//! This library provides:
//! - A tolerant decoder reporting what it could not understand
//! - A deterministic encoder rendering normalized source
//! - An editable gear store with named operations
//! - Configuration and command-line front end for the `gearset` binary

pub mod cli;
pub mod config;
pub mod decoder;
pub mod diagnostics;
pub mod encoder;
pub mod model;
pub mod store;

// Re-exports for clean public API
pub use config::Config;
pub use decoder::decode;
pub use diagnostics::{DecodeResult, Diagnostic, Severity};
pub use encoder::{encode, EncodeOptions, Encoder};
pub use model::{EquipmentSet, EquipmentValue, EquippedItem, SetCollection, Slot};
pub use store::GearStore;
