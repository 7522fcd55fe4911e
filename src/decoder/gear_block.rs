//! Set Table Bodies
//!
//! Turns the text between a set's braces into an `EquipmentSet` by running
//! an ordered list of extraction rules over the same input. Earlier rules
//! take precedence: a slot filled by a structured item table is never
//! overwritten by a later plain-string match, which is what keeps an item's
//! own `name = "..."` field from being mistaken for a slot.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::braces::scan_table;
use crate::model::{is_reserved_field, resolve_slot_key, EquipmentSet, EquipmentValue, EquippedItem};

/// Item tables may hold one level of inner tables (augment lists)
const MAX_ITEM_NESTING: usize = 1;

static TABLE_ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*=\s*\{").expect("table pattern is valid"));

static STRING_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)\s*=\s*(?:"([^"\n]*)"|'([^'\n]*)')"#).expect("string pattern is valid")
});

static NAME_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bname\s*=\s*(?:"([^"\n]*)"|'([^'\n]*)')"#).expect("name pattern is valid")
});

static PATH_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bpath\s*=\s*(?:"([^"\n]*)"|'([^'\n]*)')"#).expect("path pattern is valid")
});

static RANK_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\brank\s*=\s*(\d+)").expect("rank pattern is valid"));

/// One pass over a set body
pub trait ExtractionRule {
    fn name(&self) -> &'static str;
    fn extract(&self, body: &str, set: &mut EquipmentSet);
}

/// `slot = { name = "...", augments = {...}, path = "...", rank = N }`
#[derive(Debug, Clone, Copy)]
pub struct ItemTables;

/// `slot = "Item Name"`
#[derive(Debug, Clone, Copy)]
pub struct PlainNames;

/// Rules in precedence order
pub const EXTRACTION_RULES: [&dyn ExtractionRule; 2] = [&ItemTables, &PlainNames];

/// Parse a set body into an equipment set
pub fn parse_gear_block(body: &str) -> EquipmentSet {
    let mut set = EquipmentSet::new();
    for rule in EXTRACTION_RULES {
        rule.extract(body, &mut set);
        log::trace!("After {} pass: {} slot(s)", rule.name(), set.len());
    }
    set
}

impl ExtractionRule for ItemTables {
    fn name(&self) -> &'static str {
        "item table"
    }

    fn extract(&self, body: &str, set: &mut EquipmentSet) {
        let mut pos = 0;

        while let Some(caps) = TABLE_ASSIGNMENT.captures_at(body, pos) {
            let (Some(whole), Some(ident)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let open = whole.end() - 1;

            let span = match scan_table(body, open) {
                Some(span) if span.inner_depth <= MAX_ITEM_NESTING => span,
                // Too deep or unclosed: not an item table, look inside it instead
                _ => {
                    pos = open + 1;
                    continue;
                }
            };
            pos = span.end();

            let ident = ident.as_str();
            if is_reserved_field(ident) {
                continue;
            }

            let slot = resolve_slot_key(ident);
            match parse_item(span.body(body)) {
                Some(item) => {
                    log::trace!("{} = {:?}", slot, item);
                    set.insert(slot, item);
                }
                None => log::trace!("Dropping '{}' table without a name", slot),
            }
        }
    }
}

impl ExtractionRule for PlainNames {
    fn name(&self) -> &'static str {
        "plain name"
    }

    fn extract(&self, body: &str, set: &mut EquipmentSet) {
        for caps in STRING_ASSIGNMENT.captures_iter(body) {
            let Some(ident) = caps.get(1) else { continue };
            if is_reserved_field(ident.as_str()) {
                continue;
            }

            let slot = resolve_slot_key(ident.as_str());
            let populated = set
                .get(&slot)
                .is_some_and(|value| !value.name().is_empty());
            if populated {
                continue;
            }

            let value = quoted(&caps, 2).unwrap_or_default().trim();
            log::trace!("{} = {:?}", slot, value);
            set.insert(slot, EquipmentValue::Name(value.to_string()));
        }
    }
}

/// Build an item from the inside of a slot table; `None` without a usable name
pub fn parse_item(content: &str) -> Option<EquippedItem> {
    let name = quoted_field(&NAME_FIELD, content)?.trim();
    if name.is_empty() {
        return None;
    }

    Some(EquippedItem {
        name: name.to_string(),
        augments: parse_augments(content),
        path: quoted_field(&PATH_FIELD, content).map(str::to_string),
        rank: RANK_FIELD
            .captures(content)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok()),
    })
}

/// Split the first `{ ... }` after the `augments` keyword on commas.
///
/// Does not track nesting: the list ends at the first `}`.
pub fn parse_augments(content: &str) -> Option<Vec<String>> {
    let keyword = content.find("augments")?;
    let start = keyword + content[keyword..].find('{')?;
    let end = start + content[start..].find('}')?;

    Some(
        content[start + 1..end]
            .split(',')
            .map(|piece| piece.replace(['\'', '"', '\r', '\n', '\t'], "").trim().to_string())
            .filter(|augment| !augment.is_empty())
            .collect(),
    )
}

fn quoted_field<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    let caps = pattern.captures(text)?;
    quoted(&caps, 1)
}

/// The string captured by a `"..."` / `'...'` alternation starting at `group`
fn quoted<'a>(caps: &Captures<'a>, group: usize) -> Option<&'a str> {
    caps.get(group)
        .or_else(|| caps.get(group + 1))
        .map(|m| m.as_str())
}
