//! Source Preprocessing
//!
//! Comment removal ahead of any structural scan, so commented-out
//! declarations are never seen. Comment markers inside string literals are
//! not special-cased.

const COMMENT_MARKER: &str = "--";

/// Remove line comments and long (`--[[ ... ]]`) comments.
///
/// A line comment runs to the end of its line; the line break itself is
/// kept. A long comment is replaced by a single space. An unterminated long
/// comment swallows the rest of the text.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(COMMENT_MARKER) {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + COMMENT_MARKER.len()..];

        rest = match long_bracket_level(after) {
            Some(level) => {
                let open_len = level + 2;
                let close = format!("]{}]", "=".repeat(level));
                out.push(' ');
                match after[open_len..].find(&close) {
                    Some(end) => &after[open_len + end + close.len()..],
                    None => "",
                }
            }
            None => match after.find(['\r', '\n']) {
                Some(eol) => &after[eol..],
                None => "",
            },
        };
    }

    out.push_str(rest);
    out
}

/// Level of a long bracket opener (`[[` is 0, `[==[` is 2) at the start of `text`
fn long_bracket_level(text: &str) -> Option<usize> {
    let inner = text.strip_prefix('[')?;
    let level = inner.bytes().take_while(|&b| b == b'=').count();
    inner[level..].starts_with('[').then_some(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_comment_keeps_newline() {
        let text = "sets.idle = {} -- idle set\nsets.tp = {}";
        assert_eq!(strip_comments(text), "sets.idle = {} \nsets.tp = {}");
    }

    #[test]
    fn test_strip_commented_declaration() {
        let text = "-- sets.old = { main = \"Club\" }\n";
        assert_eq!(strip_comments(text), "\n");
    }

    #[test]
    fn test_strip_crlf_line_comment() {
        assert_eq!(strip_comments("a -- note\r\nb"), "a \r\nb");
    }

    #[test]
    fn test_strip_long_comment() {
        let text = "a --[[ sets.x = {\n main = \"Club\" }\n]] b";
        assert_eq!(strip_comments(text), "a   b");
    }

    #[test]
    fn test_strip_leveled_long_comment() {
        let text = "a --[==[ has ]] inside ]==]b";
        assert_eq!(strip_comments(text), "a  b");
    }

    #[test]
    fn test_unterminated_long_comment() {
        assert_eq!(strip_comments("a --[[ never closed"), "a  ");
    }

    #[test]
    fn test_long_bracket_level() {
        assert_eq!(long_bracket_level("[[x"), Some(0));
        assert_eq!(long_bracket_level("[==[x"), Some(2));
        assert_eq!(long_bracket_level("[=x"), None);
        assert_eq!(long_bracket_level(" [["), None);
    }

    #[test]
    fn test_no_comments() {
        let text = "sets.idle = { main = \"Excalibur\" }";
        assert_eq!(strip_comments(text), text);
    }
}
