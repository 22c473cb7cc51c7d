//! Parsing of field annotations in the `KEY[,OPTION]*` format.

use std::fmt;

/// Option attached to a key after the first comma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOption {
    /// The variable must resolve to a value (from the source or a default)
    Required,
    /// Substitute `${NAME}` and `$NAME` references before conversion
    Expand,
    /// Unrecognized option, kept but ignored
    Other(String),
}

impl TagOption {
    fn parse(raw: &str) -> Self {
        match raw {
            "required" => Self::Required,
            "expand" => Self::Expand,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TagOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Expand => f.write_str("expand"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

/// A parsed field annotation.
///
/// ```rust
/// use envbind::{Tag, TagOption};
///
/// let tag = Tag::parse("DATABASE_URL,required,expand");
/// assert_eq!(tag.key, "DATABASE_URL");
/// assert_eq!(tag.options, [TagOption::Required, TagOption::Expand]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Variable name, before any prefix is applied
    pub key: String,
    /// Options in declaration order
    pub options: Vec<TagOption>,
}

impl Tag {
    /// Split `raw` on commas into a key and its options.
    ///
    /// There is no escaping; an empty string yields an empty key.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(',');
        let key = parts.next().unwrap_or_default().to_string();
        let options = parts.map(TagOption::parse).collect();
        Self { key, options }
    }

    /// Whether the `required` option is present
    pub fn is_required(&self) -> bool {
        self.options.contains(&TagOption::Required)
    }

    /// Whether the `expand` option is present
    pub fn is_expand(&self) -> bool {
        self.options.contains(&TagOption::Expand)
    }
}
