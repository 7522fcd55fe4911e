//! Brace-Depth Scanning
//!
//! Linear scan with a depth counter to find where a `{ ... }` table ends.
//! Braces inside string literals are counted like any other brace.

/// A balanced `{ ... }` table located in some text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpan {
    /// Byte offset of the opening brace
    pub open: usize,
    /// Byte offset of the matching closing brace
    pub close: usize,
    /// Deepest table nesting inside this one (0 = no inner tables)
    pub inner_depth: usize,
}

impl TableSpan {
    /// Text between the braces
    pub fn body<'a>(&self, text: &'a str) -> &'a str {
        &text[self.open + 1..self.close]
    }

    /// Offset just past the closing brace
    pub fn end(&self) -> usize {
        self.close + 1
    }
}

/// Scan the table opening at byte `open`.
///
/// Returns `None` when `open` is not a `{` or the table is never closed.
pub fn scan_table(text: &str, open: usize) -> Option<TableSpan> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut max_depth = 0usize;

    for (idx, &byte) in bytes.iter().enumerate().skip(open) {
        match byte {
            b'{' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(TableSpan {
                        open,
                        close: idx,
                        inner_depth: max_depth - 1,
                    });
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_table() {
        let text = "x = { a = 1 } y";
        let span = scan_table(text, 4).expect("closed table");
        assert_eq!(span.body(text), " a = 1 ");
        assert_eq!(span.inner_depth, 0);
        assert_eq!(&text[span.end()..], " y");
    }

    #[test]
    fn test_nested_table_is_not_cut_at_first_close() {
        let text = r#"{ ear1 = { name = "E", augments = {"a","b"} }, main = "M" }"#;
        let span = scan_table(text, 0).expect("closed table");
        assert_eq!(span.close, text.len() - 1);
        assert_eq!(span.inner_depth, 2);
    }

    #[test]
    fn test_unterminated_table() {
        assert_eq!(scan_table("{ a = { b }", 0), None);
    }

    #[test]
    fn test_not_a_table() {
        assert_eq!(scan_table("x = 1", 0), None);
        assert_eq!(scan_table("{}", 5), None);
    }

    #[test]
    fn test_braces_in_strings_are_structural() {
        // Known limitation: the quoted "}" closes the table early.
        let text = r#"{ main = "}" }"#;
        let span = scan_table(text, 0).expect("closed table");
        assert_eq!(span.body(text), r#" main = ""#);
    }
}
