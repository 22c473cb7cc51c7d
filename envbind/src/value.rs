//! Conversion of raw environment text into typed field values

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// A type that can be bound from the text of an environment variable.
///
/// Implemented for the integer and floating point primitives, `bool`,
/// `String`, `char`, `PathBuf`, the `std::net` address types, `Duration`,
/// `Vec<T>` and `Option<T>`.
///
/// Types that already implement `FromStr` can skip this trait and use the
/// `parse` field attribute instead.
pub trait Value: Sized {
    /// Convert `raw` into a value.
    ///
    /// `separator` is the sequence separator of the current binding pass;
    /// scalar types ignore it.
    fn parse_env(raw: &str, separator: &str) -> Result<Self, String>;

    /// Label shown in usage output and parse errors
    fn type_label() -> String {
        short_type_name::<Self>()
    }
}

macro_rules! impl_value_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Value for $ty {
                fn parse_env(raw: &str, _separator: &str) -> Result<Self, String> {
                    raw.parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

impl_value_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, String,
    PathBuf, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr,
);

impl Value for bool {
    fn parse_env(raw: &str, _separator: &str) -> Result<Self, String> {
        match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err("expected one of 1, t, true, 0, f, false".to_string()),
        }
    }
}

impl Value for Duration {
    fn parse_env(raw: &str, _separator: &str) -> Result<Self, String> {
        crate::duration::parse(raw)
    }
}

impl<T: Value> Value for Vec<T> {
    fn parse_env(raw: &str, separator: &str) -> Result<Self, String> {
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        let parts: Vec<&str> = if separator.is_empty() {
            raw.char_indices()
                .map(|(start, c)| &raw[start..start + c.len_utf8()])
                .collect()
        } else {
            raw.split(separator).collect()
        };
        parts
            .into_iter()
            .enumerate()
            .map(|(index, part)| {
                T::parse_env(part, separator)
                    .map_err(|e| format!("element {index} ({part:?}): {e}"))
            })
            .collect()
    }

    fn type_label() -> String {
        format!("Vec<{}>", T::type_label())
    }
}

impl<T: Value> Value for Option<T> {
    fn parse_env(raw: &str, separator: &str) -> Result<Self, String> {
        T::parse_env(raw, separator).map(Some)
    }

    fn type_label() -> String {
        T::type_label()
    }
}

/// Label of a field converted outside [`Value`], with an outer `Option` removed
/// so it matches [`Value::type_label`] of the same field type.
pub(crate) fn field_type_label<T: ?Sized>() -> String {
    let name = short_type_name::<T>();
    match name.strip_prefix("Option<").and_then(|inner| inner.strip_suffix('>')) {
        Some(inner) => inner.to_string(),
        None => name,
    }
}

/// `std::any::type_name` with module paths stripped.
///
/// `alloc::vec::Vec<core::time::Duration>` becomes `Vec<Duration>`.
pub fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.truncate(segment_start);
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' => {
                out.push(c);
                segment_start = out.len();
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integers() {
        assert_eq!(i32::parse_env("-42", " ").unwrap(), -42);
        assert_eq!(u16::parse_env("8080", " ").unwrap(), 8080);
        assert!(u8::parse_env("256", " ").is_err());
        assert!(u32::parse_env("-1", " ").is_err());
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(f64::parse_env("0.25", " ").unwrap(), 0.25);
        assert!(f32::parse_env("abc", " ").is_err());
    }

    #[test]
    fn test_parse_bool_literals() {
        for raw in ["1", "t", "T", "true", "TRUE", "True"] {
            assert!(bool::parse_env(raw, " ").unwrap(), "{raw}");
        }
        for raw in ["0", "f", "F", "false", "FALSE", "False"] {
            assert!(!bool::parse_env(raw, " ").unwrap(), "{raw}");
        }
        assert!(bool::parse_env("yes", " ").is_err());
        assert!(bool::parse_env("", " ").is_err());
    }

    #[test]
    fn test_parse_string_passthrough() {
        let value = String::parse_env("hello world", " ").unwrap();
        assert_eq!(value, "hello world");
    }

    #[test]
    fn test_parse_sequence_with_separator() {
        let ports = Vec::<u16>::parse_env("8080;8081;8082", ";").unwrap();
        assert_eq!(ports, vec![8080, 8081, 8082]);
    }

    #[test]
    fn test_parse_empty_sequence() {
        let ports = Vec::<u16>::parse_env("", " ").unwrap();
        assert!(ports.is_empty());
    }

    #[test]
    fn test_parse_sequence_reports_element() {
        let err = Vec::<u16>::parse_env("1 two 3", " ").unwrap_err();
        assert!(err.starts_with("element 1 (\"two\")"), "{err}");
    }

    #[test]
    fn test_parse_sequence_empty_separator_splits_chars() {
        let digits = Vec::<u8>::parse_env("123", "").unwrap();
        assert_eq!(digits, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_sequence_of_durations() {
        let values = Vec::<Duration>::parse_env("1s,250ms", ",").unwrap();
        assert_eq!(
            values,
            vec![Duration::from_secs(1), Duration::from_millis(250)]
        );
    }

    #[test]
    fn test_parse_option() {
        assert_eq!(Option::<u8>::parse_env("7", " ").unwrap(), Some(7));
        assert!(Option::<u8>::parse_env("x", " ").is_err());
    }

    #[test]
    fn test_parse_socket_addr() {
        let addr = SocketAddr::parse_env("127.0.0.1:8080", " ").unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(u32::type_label(), "u32");
        assert_eq!(String::type_label(), "String");
        assert_eq!(Duration::type_label(), "Duration");
        assert_eq!(Vec::<String>::type_label(), "Vec<String>");
        assert_eq!(Option::<Vec<u8>>::type_label(), "Vec<u8>");
    }

    #[test]
    fn test_field_type_label_matches_value_label() {
        assert_eq!(field_type_label::<Option<u8>>(), Option::<u8>::type_label());
        assert_eq!(
            field_type_label::<Option<Vec<u8>>>(),
            Option::<Vec<u8>>::type_label()
        );
        assert_eq!(field_type_label::<Option<IpAddr>>(), "IpAddr");
        assert_eq!(field_type_label::<Vec<Option<u8>>>(), "Vec<Option<u8>>");
        assert_eq!(field_type_label::<u16>(), "u16");
    }

    #[test]
    fn test_short_type_name_nested_generics() {
        assert_eq!(
            short_type_name::<std::collections::HashMap<String, Vec<u8>>>(),
            "HashMap<String, Vec<u8>>"
        );
    }
}
