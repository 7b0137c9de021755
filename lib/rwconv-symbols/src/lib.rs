//! Symbol tables for symbol-referenced write requests.
//!
//! A symbol table assigns each distinct string a stable integer reference for the duration of a single conversion, and
//! then materializes the ordered list of strings that those references index into. A shared [`CommonSymbols`]
//! dictionary can be pre-seeded at a fixed offset, so that frequently used strings always receive the same reference.
#![deny(missing_docs)]

mod common;
pub use self::common::CommonSymbols;

mod table;
pub use self::table::{SymbolTable, SymbolTableStorage};

/// A string symbolizer.
///
/// Symbolizers hand out integer references for strings. The same string always gets the same reference from the same
/// symbolizer.
pub trait Symbolizer<'a> {
    /// Returns the reference for the given string, assigning a new one if the string has not been seen before.
    fn symbolize(&mut self, s: &'a str) -> u32;
}

impl<'a, T> Symbolizer<'a> for &mut T
where
    T: Symbolizer<'a>,
{
    fn symbolize(&mut self, s: &'a str) -> u32 {
        (**self).symbolize(s)
    }
}
