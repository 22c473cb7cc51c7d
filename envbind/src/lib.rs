//! Bind environment variables into typed configuration structs
//!
//! `envbind` fills the fields of an existing configuration struct from
//! environment variables (or any other key/value [`Source`]). Each field names
//! its variable in a `KEY[,OPTION]*` annotation; one pass reports every
//! missing or malformed variable at once.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(EnvBind)]` with per-field annotations
//! - **Aggregated errors**: all missing and invalid variables in one [`Error`]
//! - **Defaults and strict mode**: defaults are literals converted like any value
//! - **Expansion**: `${NAME}` / `$NAME` references resolved from the same source
//! - **Sequences**: `Vec<T>` fields split on a configurable separator
//! - **Usage output**: an aligned field table written when binding fails
//!
//! # Value Parsing
//!
//! - Strings: `DATABASE_URL=postgres://localhost/db`
//! - Numbers: `MAX_CONNECTIONS=42`, `RATIO=0.75`
//! - Booleans: `1`, `t`, `true`, `TRUE`, `True` and their `0`/`f`/`false` counterparts
//! - Durations: `300ms`, `1.5h`, `1h2m3s`
//! - Sequences: `PORTS=8080 8081` into `Vec<u16>`; an empty value is an empty `Vec`
//! - Anything implementing `FromStr` with `#[env("KEY", parse)]`
//!
//! # Example
//!
//! ```rust
//! use envbind::{EnvBind, Map, Options};
//!
//! #[derive(Debug, Default, EnvBind)]
//! struct Config {
//!     #[env("DATABASE_URL,required,expand")]
//!     pub database_url: String,
//!
//!     #[env("PORT", default = "8080", usage = "listen port")]
//!     pub port: u16,
//!
//!     #[env("ALLOWED_HOSTS")]
//!     pub allowed_hosts: Vec<String>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let env = Map::from([
//!     ("DB_HOST", "localhost"),
//!     ("DATABASE_URL", "postgres://${DB_HOST}/app"),
//!     ("ALLOWED_HOSTS", "a.example b.example"),
//! ]);
//! let mut config = Config::default();
//! envbind::bind_from(&env, &mut config, Options::new())?;
//! assert_eq!(config.database_url, "postgres://localhost/app");
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.allowed_hosts, ["a.example", "b.example"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env("KEY[,required][,expand]")]`
//!
//! Names the variable. `required` fails the pass when the variable is not
//! set and no default exists; `expand` substitutes `${NAME}` and `$NAME`
//! before conversion. Unknown options are ignored. A bare `#[env]` uses the
//! field name in upper case as the key.
//!
//! Fields without an `#[env]` attribute, and fields that are not `pub`, are
//! left alone.
//!
//! ## `#[env(default = "value")]` and `#[env(usage = "text")]`
//!
//! The default literal is used when the variable is not set; it goes through
//! expansion and conversion like a real value and always satisfies
//! `required`. The usage text is shown in the usage table; without it the
//! field's doc comment is used.
//!
//! ## `#[env(nested)]`
//!
//! Descends into a field whose type also derives `EnvBind`. With
//! `#[env(nested, prefix = "DB_")]` the prefix is added for that subtree.
//! A struct-level `#[env(prefix = "APP_")]` does the same for the whole struct.
//!
//! ```rust
//! use envbind::{EnvBind, Map, Options};
//!
//! #[derive(Default, EnvBind)]
//! struct Http {
//!     #[env("HTTP_PORT")]
//!     pub port: u16,
//! }
//!
//! #[derive(Default, EnvBind)]
//! struct Config {
//!     #[env(nested)]
//!     pub http: Http,
//! }
//!
//! let mut config = Config::default();
//! envbind::bind_from(&Map::from([("HTTP_PORT", "80")]), &mut config, Options::new()).unwrap();
//! assert_eq!(config.http.port, 80);
//! ```
//!
//! ## `#[env("KEY", parse)]` and `#[env("KEY", deserializer = "path")]`
//!
//! `parse` converts with the field type's `FromStr`. `deserializer` calls any
//! `fn(&str) -> Result<T, E>` where `E: Display`, such as
//! `serde_json::from_str`.
//!
//! # Options
//!
//! [`Options`] controls one call: [`Options::with_prefix`],
//! [`Options::with_slice_separator`], [`Options::with_strict_mode`] and
//! [`Options::with_usage_on_error`].

mod duration;
mod error;
mod expand;
mod options;
mod source;
mod tag;
mod usage;
mod value;
mod walker;

use std::io::{self, Write};

pub use envbind_derive::EnvBind;
pub use error::{Error, NotSetError, ParseError};
pub use options::Options;
pub use source::{Map, OsEnv, Source};
pub use tag::{Tag, TagOption};
pub use value::{short_type_name, Value};
pub use walker::{EnvBind, FieldSpec, Walker};

use walker::Mode;

/// Bind `config` from the process environment.
///
/// # Errors
///
/// Returns every required variable that is not set and every value that
/// failed to convert. Fields that did bind keep their new values.
pub fn bind<T: EnvBind + ?Sized>(config: &mut T, options: Options<'_>) -> Result<(), Error> {
    bind_from(&OsEnv, config, options)
}

/// Bind `config` from `source`.
///
/// # Errors
///
/// See [`bind`]. When [`Options::with_usage_on_error`] was given, the usage
/// table is written to the sink before the error is returned.
pub fn bind_from<S, T>(source: &S, config: &mut T, mut options: Options<'_>) -> Result<(), Error>
where
    S: Source,
    T: EnvBind + ?Sized,
{
    let _span = tracing::debug_span!("bind", prefix = options.prefix()).entered();

    let mut walker = Walker::new(source, &options, Mode::Bind);
    config.visit(&mut walker);
    let (error, fields) = walker.finish();

    let Some(error) = error else {
        return Ok(());
    };
    if let Some(sink) = options.take_usage_sink() {
        if let Err(e) = usage::render(&fields, sink) {
            tracing::warn!(error = %e, "failed to write usage");
        }
    }
    Err(error)
}

/// Write the usage table of `config` to `out` without binding anything.
///
/// Only the prefix and strict mode of `options` affect the output.
///
/// `config` is borrowed mutably only because [`EnvBind::visit`] takes
/// `&mut self`. No variable is read and no field is written, so the record
/// is left exactly as it was.
///
/// # Errors
///
/// Returns the I/O error of `out`.
pub fn usage<T: EnvBind + ?Sized>(
    config: &mut T,
    out: &mut dyn Write,
    options: &Options<'_>,
) -> io::Result<()> {
    let mut walker = Walker::new(&OsEnv, options, Mode::Describe);
    config.visit(&mut walker);
    let (_, fields) = walker.finish();
    usage::render(&fields, out)
}
