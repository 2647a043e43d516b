//! # date-walker
//!
//! Semantic date/time resolution for parsed natural-language expressions.
//!
//! A grammar-driven parser turns text such as "next Friday at 3pm" or "two
//! weeks from the 1st Tuesday of June" into a [`DateExpression`] tree. This
//! crate walks that tree against a caller-supplied reference instant and
//! returns the concrete date/times it denotes, plus whether the expression
//! describes a repeating schedule. No clock is read and no text is parsed:
//! the same tree and reference always produce the same [`Resolution`].
//!
//! ## Modules
//!
//! - [`ast`]: The closed tree of node kinds the walker understands
//! - [`walker`]: Tree traversal and the [`resolve`] entry points
//! - [`state`]: The per-walk accumulator and its [`Resolution`]
//! - [`calendar`]: Span arithmetic and weekday searches
//! - [`holidays`]: Holiday and season dates per year
//! - [`zone`]: Timezones and DST-aware local time
//! - [`error`]: Error types

pub mod ast;
pub mod calendar;
pub mod error;
pub mod holidays;
pub mod state;
pub mod walker;
pub mod zone;

pub use ast::DateExpression;
pub use calendar::{Direction, SpanUnit, WeekStartDay};
pub use error::ResolveError;
pub use holidays::{Hemisphere, Holiday, Season};
pub use state::{Resolution, ResolverState};
pub use walker::{resolve, resolve_with_options, ResolveOptions};
pub use zone::{Zone, ZonedDateTime};
