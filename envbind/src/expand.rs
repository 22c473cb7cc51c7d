//! `${NAME}` and `$NAME` substitution.

use crate::source::Source;

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replace variable references in `raw` with values from `source`.
///
/// Unknown names expand to the empty string. Substituted text is not
/// expanded again. A `$` that does not start a reference, and an unterminated
/// `${`, are kept as written.
pub(crate) fn expand(raw: &str, source: &dyn Source) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => {
                    out.push_str(&source.lookup(&braced[..end]).unwrap_or_default());
                    rest = &braced[end + 1..];
                }
                None => {
                    out.push_str(&rest[pos..]);
                    rest = "";
                }
            }
            continue;
        }

        let name_len = after.find(|c: char| !is_name_char(c)).unwrap_or(after.len());
        if name_len == 0 {
            out.push('$');
        } else {
            out.push_str(&source.lookup(&after[..name_len]).unwrap_or_default());
        }
        rest = &after[name_len..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Map;

    fn source() -> Map {
        Map::from([("HOST", "localhost"), ("PORT", "8080"), ("LOOP", "$LOOP")])
    }

    #[test]
    fn test_expand_braced() {
        assert_eq!(expand("localhost:${PORT}", &source()), "localhost:8080");
    }

    #[test]
    fn test_expand_bare() {
        assert_eq!(expand("$HOST:$PORT/db", &source()), "localhost:8080/db");
    }

    #[test]
    fn test_expand_unknown_is_empty() {
        assert_eq!(expand("a${MISSING}b$MISSING", &source()), "ab");
    }

    #[test]
    fn test_expand_single_pass() {
        assert_eq!(expand("${LOOP}", &source()), "$LOOP");
    }

    #[test]
    fn test_expand_keeps_literal_dollars() {
        assert_eq!(expand("$", &source()), "$");
        assert_eq!(expand("a $ b", &source()), "a $ b");
        assert_eq!(expand("${PORT", &source()), "${PORT");
    }

    #[test]
    fn test_expand_digit_names() {
        assert_eq!(expand("cost: $5.00", &source()), "cost: .00");
    }

    #[test]
    fn test_expand_without_references() {
        assert_eq!(expand("plain text", &source()), "plain text");
    }
}
