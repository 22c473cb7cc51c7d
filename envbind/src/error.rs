//! Error types for binding environment variables

/// A present value could not be converted into the field's type.
///
/// Carries the effective variable name (prefix included), the raw text after
/// expansion, and the label of the type the conversion targeted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to parse environment variable '{name}' ({value:?}) as {type_name}: {message}")]
pub struct ParseError {
    /// Name of the environment variable being parsed
    pub name: String,
    /// Raw text that failed to convert
    pub value: String,
    /// Label of the type that parsing was attempted for
    pub type_name: String,
    /// Error message from the parser
    pub message: String,
}

impl ParseError {
    /// Create a parse error for an explicit type label
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        type_name: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            type_name: type_name.into(),
            message: message.to_string(),
        }
    }
}

/// One or more required environment variables are not set.
///
/// Names are listed in traversal order and include the configured prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe_missing(.names))]
pub struct NotSetError {
    /// Names of the missing environment variables
    pub names: Vec<String>,
}

fn describe_missing(names: &[String]) -> String {
    let quoted = names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() == 1 {
        format!("Environment variable {quoted} is required but not set")
    } else {
        format!("Environment variables {quoted} are required but not set")
    }
}

/// Every failure collected during one binding pass.
///
/// A pass never stops at the first problem: all missing variables and all
/// conversion failures are reported together.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe(.not_set, .parse_errors))]
pub struct Error {
    not_set: Option<NotSetError>,
    parse_errors: Vec<ParseError>,
}

fn describe(not_set: &Option<NotSetError>, parse_errors: &[ParseError]) -> String {
    not_set
        .iter()
        .map(ToString::to_string)
        .chain(parse_errors.iter().map(ToString::to_string))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Build the composite error, or `None` when nothing failed
    pub(crate) fn collect(missing: Vec<String>, parse_errors: Vec<ParseError>) -> Option<Self> {
        if missing.is_empty() && parse_errors.is_empty() {
            return None;
        }
        let not_set = (!missing.is_empty()).then_some(NotSetError { names: missing });
        Some(Self {
            not_set,
            parse_errors,
        })
    }

    /// Names of required variables that were not set, in traversal order
    pub fn not_set(&self) -> &[String] {
        self.not_set
            .as_ref()
            .map(|e| e.names.as_slice())
            .unwrap_or_default()
    }

    /// The missing-variable part of this error, if any
    pub fn not_set_error(&self) -> Option<&NotSetError> {
        self.not_set.as_ref()
    }

    /// Conversion failures, in traversal order
    pub fn parse_errors(&self) -> &[ParseError] {
        &self.parse_errors
    }
}
