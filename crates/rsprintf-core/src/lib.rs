//! # rsprintf-core
//!
//! Safe Rust implementation of a printf/snprintf-style formatted output
//! engine. No `unsafe` code is permitted at the crate level.
//!
//! The entry points are [`snprintf`] (capacity-bounded formatting into a
//! caller buffer, returning the logical length), [`printf`]/[`fprintf`]
//! (stream wrappers), and [`check_template`] (non-rendering diagnostics
//! for a template/argument pairing). Arguments are passed as a slice of
//! tagged [`FormatArg`] values in place of C varargs; the `%n` count
//! directive writes through a caller-supplied `Cell` instead of a raw
//! pointer.
//!
//! The directive grammar is
//! `%[flags][width][.precision][length]conversion` with flags `+`
//! (force sign), space (blank sign), `-` (left justify), `0` (zero pad),
//! `#` (alternate form); width and precision given as digits or `*`;
//! length modifiers `hh h l ll j z t L`; and conversions
//! `d i u x X o c s p n f F e E g G a A %`. Unknown conversion letters
//! echo through as literal text rather than failing the call.

#![deny(unsafe_code)]

pub mod args;
pub mod convert;
pub mod engine;
pub mod parse;
pub mod scratch;
pub mod sink;
pub mod spec;
pub mod stdio;

pub use args::{ArgCursor, FormatArg};
pub use convert::MAX_PRECISION;
pub use engine::{check_template, snprintf, TemplateIssue};
pub use spec::{FormatFlags, FormatSpec, LengthMod, Precision, Width};
pub use stdio::{fprintf, printf, OUTPUT_BUFFER_SIZE};
