//! Record traversal and per-field resolution

use std::fmt::Display;

use crate::error::{Error, ParseError};
use crate::expand::expand;
use crate::options::Options;
use crate::source::Source;
use crate::tag::Tag;
use crate::value::{field_type_label, Value};

/// A configuration record whose fields can be bound from a [`Source`].
///
/// Usually implemented with `#[derive(EnvBind)]`. A manual implementation
/// hands every bound field to the walker in declaration order:
///
/// ```rust
/// use envbind::{EnvBind, FieldSpec, Map, Options, Walker};
///
/// #[derive(Default)]
/// struct Server {
///     port: u16,
///     hosts: Vec<String>,
/// }
///
/// impl EnvBind for Server {
///     fn visit(&mut self, walker: &mut Walker<'_>) {
///         walker.field(&mut self.port, &FieldSpec::new("PORT").with_default("8080"));
///         walker.field(&mut self.hosts, &FieldSpec::new("HOSTS,required"));
///     }
/// }
///
/// let mut server = Server::default();
/// let env = Map::from([("HOSTS", "a b")]);
/// envbind::bind_from(&env, &mut server, Options::new()).unwrap();
/// assert_eq!(server.port, 8080);
/// assert_eq!(server.hosts, ["a", "b"]);
/// ```
pub trait EnvBind {
    /// Hand each bound field, and each nested record, to `walker`.
    fn visit(&mut self, walker: &mut Walker<'_>);
}

/// Declarative metadata of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Annotation in `KEY[,OPTION]*` form
    pub tag: &'static str,
    /// Literal used when the variable is not set
    pub default: Option<&'static str>,
    /// Description shown in usage output
    pub usage: Option<&'static str>,
}

impl FieldSpec {
    /// Metadata with only an annotation
    pub const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            default: None,
            usage: None,
        }
    }

    /// Set the default literal
    pub const fn with_default(self, default: &'static str) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    /// Set the usage description
    pub const fn with_usage(self, usage: &'static str) -> Self {
        Self {
            usage: Some(usage),
            ..self
        }
    }
}

/// A field discovered during traversal, as shown in usage output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldInfo {
    pub key: String,
    pub type_label: String,
    pub required: bool,
    pub default: Option<String>,
    pub usage: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Resolve and write values
    Bind,
    /// Only collect field descriptions
    Describe,
}

/// Traversal state of one binding pass.
///
/// Created by [`bind`](crate::bind), [`bind_from`](crate::bind_from) and
/// [`usage`](crate::usage); records receive it in [`EnvBind::visit`].
pub struct Walker<'a> {
    source: &'a dyn Source,
    prefix: String,
    separator: &'a str,
    strict: bool,
    mode: Mode,
    missing: Vec<String>,
    parse_errors: Vec<ParseError>,
    fields: Vec<FieldInfo>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(source: &'a dyn Source, options: &'a Options<'_>, mode: Mode) -> Self {
        Self {
            source,
            prefix: options.prefix().to_string(),
            separator: options.slice_separator(),
            strict: options.is_strict(),
            mode,
            missing: Vec::new(),
            parse_errors: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Bind a field whose type implements [`Value`].
    pub fn field<T: Value>(&mut self, target: &mut T, spec: &FieldSpec) {
        self.resolve(target, spec, T::type_label(), T::parse_env);
    }

    /// Bind a field through a custom parse function.
    ///
    /// Used for `FromStr` types and custom deserializers; the sequence
    /// separator does not apply.
    pub fn field_with<T, E, F>(&mut self, target: &mut T, spec: &FieldSpec, parse: F)
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: Display,
    {
        self.resolve(target, spec, field_type_label::<T>(), |raw, _| {
            parse(raw).map_err(|e| e.to_string())
        });
    }

    /// Descend into a nested record.
    pub fn nested<T: EnvBind + ?Sized>(&mut self, target: &mut T) {
        target.visit(self);
    }

    /// Run `f` with `prefix` appended to the current prefix.
    pub fn scoped(&mut self, prefix: &str, f: impl FnOnce(&mut Self)) {
        let len = self.prefix.len();
        self.prefix.push_str(prefix);
        f(self);
        self.prefix.truncate(len);
    }

    fn resolve<T>(
        &mut self,
        target: &mut T,
        spec: &FieldSpec,
        type_label: String,
        convert: impl FnOnce(&str, &str) -> Result<T, String>,
    ) {
        let tag = Tag::parse(spec.tag);
        let key = format!("{}{}", self.prefix, tag.key);
        // A default always satisfies `required`.
        let required = spec.default.is_none() && (tag.is_required() || self.strict);

        self.fields.push(FieldInfo {
            key: key.clone(),
            type_label: type_label.clone(),
            required,
            default: spec.default.map(str::to_string),
            usage: spec.usage.map(str::to_string),
        });
        if self.mode == Mode::Describe {
            return;
        }

        let (raw, origin) = match (self.source.lookup(&key), spec.default) {
            (Some(value), _) => (value, "source"),
            (None, Some(default)) => (default.to_string(), "default"),
            (None, None) if required => {
                tracing::debug!(key = %key, "required environment variable is not set");
                self.missing.push(key);
                return;
            }
            (None, None) => {
                tracing::trace!(key = %key, "environment variable not set, keeping current value");
                return;
            }
        };

        let raw = if tag.is_expand() {
            expand(&raw, self.source)
        } else {
            raw
        };

        match convert(&raw, self.separator) {
            Ok(value) => {
                *target = value;
                tracing::debug!(key = %key, origin, "bound environment variable");
            }
            Err(message) => {
                tracing::debug!(key = %key, origin, "failed to convert environment variable");
                self.parse_errors
                    .push(ParseError::new(key, raw, type_label, message));
            }
        }
    }

    /// Consume the walker, returning the aggregated error and the fields seen
    pub(crate) fn finish(self) -> (Option<Error>, Vec<FieldInfo>) {
        (Error::collect(self.missing, self.parse_errors), self.fields)
    }
}
