//! Macro Source Decoder
//!
//! Tolerant extraction of equipment sets from free-form macro source.
//! Malformed input never aborts decoding; whatever could not be understood
//! is reported as a diagnostic next to the sets that were recovered.

pub mod braces;
pub mod declarations;
pub mod gear_block;
pub mod modes;
pub mod source;

pub use declarations::{find_declarations, Declaration, DeclarationBody};
pub use gear_block::{parse_gear_block, ExtractionRule, EXTRACTION_RULES};
pub use modes::detect_modes;
pub use source::strip_comments;

use crate::diagnostics::DecodeResult;

/// Decode macro source into sets plus diagnostics.
///
/// A source without any set declaration yields an empty collection and a
/// single error diagnostic. A declaration whose table cannot be read is
/// skipped with a warning; the others are still decoded.
pub fn decode(source: &str) -> DecodeResult {
    let clean = strip_comments(source);
    let mut result = DecodeResult::new();

    let declarations = find_declarations(&clean);
    if declarations.is_empty() {
        log::debug!("No set declarations in {} byte(s) of source", source.len());
        result.add_error(
            None,
            "No set declarations found (expected `sets.<name> = { ... }`)".to_string(),
        );
        return result;
    }

    for declaration in declarations {
        let path = declaration.path;
        match declaration.body {
            DeclarationBody::Table(body) => {
                let set = parse_gear_block(body);
                log::debug!("Decoded set '{}' with {} slot(s)", path, set.len());

                let message = format!("Imported {} slot(s)", set.len());
                if result.sets.insert(path.clone(), set).is_some() {
                    result.add_warning(
                        Some(path.clone()),
                        "Set declared more than once; the later declaration wins".to_string(),
                    );
                }
                result.add_success(Some(path), message);
            }
            DeclarationBody::NotATable => {
                log::warn!("Set '{}' is not assigned a table literal", path);
                result.add_warning(
                    Some(path),
                    "No opening brace after assignment; set skipped".to_string(),
                );
            }
            DeclarationBody::Unterminated => {
                log::warn!("Table for set '{}' is never closed", path);
                result.add_warning(
                    Some(path),
                    "Unbalanced braces: table is never closed; set skipped".to_string(),
                );
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::model::{EquipmentValue, EquippedItem};

    #[test]
    fn test_decode_end_to_end_example() {
        let result = decode(
            r#"sets.idle = { main="Excalibur", ear1={ name="Brutal Earring", augments={"Attack+10","Crit+5"}, rank=2 } }"#,
        );

        assert!(result.is_valid());
        assert_eq!(result.sets.len(), 1);
        let idle = result.sets.get("idle").expect("idle set");
        assert_eq!(idle.get("main"), Some(&EquipmentValue::from("Excalibur")));
        assert_eq!(
            idle.get("ear1"),
            Some(&EquipmentValue::Item(
                EquippedItem::new("Brutal Earring")
                    .with_augments(["Attack+10", "Crit+5"])
                    .with_rank(2)
            ))
        );
    }

    #[test]
    fn test_decode_zero_matches() {
        let result = decode("-- empty file\n");
        assert!(result.sets.is_empty());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn test_decode_skips_unreadable_declarations() {
        let result = decode(
            "sets.engaged = set_combine(sets.idle, {})\nsets.idle = { main = \"Club\" }\nsets.tp = { main = \"Axe\"",
        );

        assert!(result.is_valid());
        assert_eq!(result.sets.paths().collect::<Vec<_>>(), vec!["idle"]);
        let warned: Vec<_> = result
            .warnings()
            .filter_map(|d| d.path.as_deref())
            .collect();
        assert_eq!(warned, vec!["engaged", "tp"]);
    }

    #[test]
    fn test_duplicate_declaration_keeps_position() {
        let result = decode(
            "sets.idle = { main = \"A\" }\nsets.tp = {}\nsets.idle = { main = \"B\" }",
        );
        assert_eq!(result.sets.paths().collect::<Vec<_>>(), vec!["idle", "tp"]);
        assert_eq!(
            result.sets.get("idle").and_then(|s| s.get("main")),
            Some(&EquipmentValue::from("B"))
        );
        assert_eq!(result.warnings().count(), 1);
    }

    #[test]
    fn test_commented_declaration_is_ignored() {
        let result = decode("-- sets.old = { main = \"Club\" }\nsets.new = { main = \"Sword\" }");
        assert_eq!(result.sets.paths().collect::<Vec<_>>(), vec!["new"]);
    }
}
