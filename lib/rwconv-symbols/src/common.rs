use std::fmt;

use foldhash::quality::RandomState;
use hashbrown::HashMap;

/// A shared dictionary of frequently used symbols.
///
/// The dictionary is built once, typically by a process-wide catalog, and then shared read-only across any number of
/// concurrent conversions. When a symbol table is configured with the dictionary at some offset, every string in the
/// dictionary has a fixed reference of `offset + position`, which never has to be interned again.
///
/// If a string appears in the dictionary more than once, its first position is used.
#[derive(Clone)]
pub struct CommonSymbols {
    symbols: Vec<String>,
    positions: HashMap<String, u32, RandomState>,
}

impl CommonSymbols {
    /// Creates a new `CommonSymbols` from the given strings, in order.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols = symbols.into_iter().map(Into::into).collect::<Vec<String>>();

        let mut positions = HashMap::with_capacity_and_hasher(symbols.len(), RandomState::default());
        for (position, symbol) in symbols.iter().enumerate() {
            positions.entry(symbol.clone()).or_insert(position as u32);
        }

        Self { symbols, positions }
    }

    /// Returns the position of the given string in the dictionary, if present.
    pub fn get(&self, s: &str) -> Option<u32> {
        self.positions.get(s).copied()
    }

    /// Returns the number of symbols in the dictionary.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the dictionary holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns an iterator over the symbols in the dictionary, in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

impl fmt::Debug for CommonSymbols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_follow_input_order() {
        let common = CommonSymbols::new(["__name__", "job", "instance"]);

        assert_eq!(common.len(), 3);
        assert_eq!(common.get("__name__"), Some(0));
        assert_eq!(common.get("job"), Some(1));
        assert_eq!(common.get("instance"), Some(2));
        assert_eq!(common.get("le"), None);
        assert_eq!(common.iter().collect::<Vec<_>>(), vec!["__name__", "job", "instance"]);
    }

    #[test]
    fn duplicates_keep_first_position() {
        let common = CommonSymbols::new(vec!["a".to_string(), "b".to_string(), "a".to_string()]);

        assert_eq!(common.len(), 3);
        assert_eq!(common.get("a"), Some(0));
        assert_eq!(common.get("b"), Some(1));
    }

    #[test]
    fn empty() {
        let common = CommonSymbols::new(Vec::<String>::new());
        assert!(common.is_empty());
        assert_eq!(common.get(""), None);
    }
}
