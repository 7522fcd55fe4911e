//! Set Declarations
//!
//! Locates `sets.<a>.<b> = { ... }` style assignments. Accessors may be
//! dotted (`.idle`) or bracketed (`['Savage Blade']`, `["idle"]`) and may be
//! mixed within one declaration.

use std::sync::LazyLock;

use regex::Regex;

use super::braces::scan_table;

/// `sets` followed by one or more accessors and a single `=`
static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\bsets((?:\s*(?:\.\s*[\w\-+]+|\[\s*(?:"[^"\n]*"|'[^'\n]*'|[\w\-+]+)\s*\]))+)\s*="#,
    )
    .expect("declaration pattern is valid")
});

/// One accessor segment; exactly one capture group participates
static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\.\s*([\w\-+]+)|\[\s*(?:"([^"\n]*)"|'([^'\n]*)'|([\w\-+]+))\s*\]"#)
        .expect("segment pattern is valid")
});

/// What follows the assignment operator of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationBody<'a> {
    /// Text between the braces of the assigned table
    Table(&'a str),
    /// The right-hand side is not a table literal
    NotATable,
    /// A table was opened but never closed
    Unterminated,
}

/// A located set declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Accessor segments joined with `.`
    pub path: String,
    /// Byte offset of the declaration in the scanned text
    pub offset: usize,
    pub body: DeclarationBody<'a>,
}

/// Find every set declaration in comment-free source text, in order.
///
/// Scanning resumes right after each assignment operator, so a declaration
/// nested inside another set's table is found as well.
pub fn find_declarations(text: &str) -> Vec<Declaration<'_>> {
    let mut declarations = Vec::new();

    for caps in DECLARATION.captures_iter(text) {
        let (Some(whole), Some(accessors)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let rest = &text[whole.end()..];

        // `sets.x == y` is a comparison, not an assignment
        if rest.starts_with('=') {
            continue;
        }

        let path = set_path(accessors.as_str());
        if path.is_empty() {
            log::warn!("Ignoring set declaration with an empty name at byte {}", whole.start());
            continue;
        }

        let value_start = text.len() - rest.trim_start().len();
        let body = match scan_table(text, value_start) {
            Some(span) => DeclarationBody::Table(span.body(text)),
            None if rest.trim_start().starts_with('{') => DeclarationBody::Unterminated,
            None => DeclarationBody::NotATable,
        };

        log::debug!("Found set declaration '{}' at byte {}", path, whole.start());
        declarations.push(Declaration {
            path,
            offset: whole.start(),
            body,
        });
    }

    declarations
}

/// Join accessor segments with `.`, stripping dots, brackets and quotes
pub fn set_path(accessors: &str) -> String {
    SEGMENT
        .captures_iter(accessors)
        .filter_map(|caps| {
            (1..=4)
                .find_map(|group| caps.get(group))
                .map(|m| m.as_str().trim())
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(text: &str) -> Vec<String> {
        find_declarations(text)
            .into_iter()
            .map(|d| d.path)
            .collect()
    }

    #[test]
    fn test_dotted_paths() {
        assert_eq!(
            paths("sets.idle = {}\nsets.idle.Regen = {}"),
            vec!["idle", "idle.Regen"]
        );
    }

    #[test]
    fn test_bracket_and_mixed_paths() {
        let text = r#"
sets["engaged"] = {}
sets.precast.WS['Savage Blade'] = {}
sets.midcast["Cure"].Self = {}
"#;
        assert_eq!(
            paths(text),
            vec!["engaged", "precast.WS.Savage Blade", "midcast.Cure.Self"]
        );
    }

    #[test]
    fn test_table_body_is_depth_aware() {
        let text = r#"sets.idle = { ear1 = { name = "E", augments = {"a"} } } trailing"#;
        let decls = find_declarations(text);
        assert_eq!(decls.len(), 1);
        assert_eq!(
            decls[0].body,
            DeclarationBody::Table(r#" ear1 = { name = "E", augments = {"a"} } "#)
        );
    }

    #[test]
    fn test_non_table_assignment() {
        let decls = find_declarations("sets.engaged = set_combine(sets.idle, {})");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].body, DeclarationBody::NotATable);
    }

    #[test]
    fn test_unterminated_table() {
        let decls = find_declarations("sets.idle = { main = \"Club\"");
        assert_eq!(decls[0].body, DeclarationBody::Unterminated);
    }

    #[test]
    fn test_comparison_is_not_a_declaration() {
        assert!(find_declarations("if sets.idle == nil then end").is_empty());
    }

    #[test]
    fn test_identifier_must_start_with_sets() {
        assert!(find_declarations("mysets.idle = {}").is_empty());
        assert!(find_declarations("local sets = {}").is_empty());
    }

    #[test]
    fn test_offsets_are_recorded() {
        let decls = find_declarations("x\nsets.idle = {}");
        assert_eq!(decls[0].offset, 2);
    }
}
