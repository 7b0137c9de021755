//! Conversion of Prometheus remote write requests from the legacy, string-labelled representation into the
//! symbol-referenced representation.
//!
//! In the symbol-referenced representation, every string in a request (label names and values, help text, units) is
//! stored once in a shared symbol list, and series refer to strings by their index in that list. Metric family metadata,
//! carried separately from series in legacy requests, is folded into synthetic series that hold only the metric name
//! label.
//!
//! Conversion is driven by [`RequestConverter`], which draws every buffer it needs from a set of bounded object pools
//! and borrows sample data from the input request rather than copying it.
#![deny(missing_docs)]

pub mod config;
pub use self::config::ConversionConfiguration;

pub mod convert;

mod converter;
pub use self::converter::{ConversionError, RequestConverter};

pub mod model;

pub use rwconv_symbols::CommonSymbols;

mod pools;
pub use self::pools::ConversionPools;
