use std::hash::BuildHasher as _;

use foldhash::quality::RandomState;
use hashbrown::HashTable;
use rwconv_pooling::{recycle_vec, Clearable, Poolable};

use crate::{CommonSymbols, Symbolizer};

/// Lifetime-free storage backing a [`SymbolTable`].
///
/// Symbol tables borrow the strings they intern, which means they cannot outlive the request being converted. The
/// allocations behind a table are worth keeping around between requests, though, so the table can be turned back into
/// its storage once a conversion is done, and the storage can live in an object pool.
pub struct SymbolTableStorage {
    index: HashTable<u32>,
    strings: Vec<&'static str>,
    hasher: RandomState,
}

impl Default for SymbolTableStorage {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl Clearable for SymbolTableStorage {
    fn clear(&mut self) {
        self.index.clear();
        self.strings.clear();
    }
}

impl Poolable for SymbolTableStorage {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashTable::with_capacity(capacity),
            strings: Vec::with_capacity(capacity),
            hasher: RandomState::default(),
        }
    }

    fn capacity(&self) -> usize {
        self.strings.capacity().max(self.index.capacity())
    }
}

/// A symbol table scoped to a single conversion.
///
/// Strings are assigned references in the order they are first symbolized. When a [`CommonSymbols`] dictionary is
/// configured at offset `k`, the dictionary owns the references `[k, k + len)`: symbolizing any of its strings returns
/// the pre-assigned reference, and dynamically interned strings skip over the region.
///
/// The table borrows every string it is given, so it never copies string data.
pub struct SymbolTable<'a> {
    index: HashTable<u32>,
    strings: Vec<&'a str>,
    hasher: RandomState,
    common: Option<&'a CommonSymbols>,
    offset: u32,
}

impl<'a> SymbolTable<'a> {
    /// Creates a new, empty `SymbolTable`.
    pub fn new() -> Self {
        Self::from_storage(SymbolTableStorage::default())
    }

    /// Creates a `SymbolTable` backed by the given storage.
    ///
    /// Any strings left over in the storage are discarded.
    pub fn from_storage(storage: SymbolTableStorage) -> Self {
        let SymbolTableStorage {
            mut index,
            mut strings,
            hasher,
        } = storage;
        index.clear();
        strings.clear();

        Self {
            index,
            strings,
            hasher,
            common: None,
            offset: 0,
        }
    }

    /// Consumes the table and returns its storage, cleared and ready for reuse.
    pub fn into_storage(self) -> SymbolTableStorage {
        let mut index = self.index;
        index.clear();

        SymbolTableStorage {
            index,
            strings: recycle_vec(self.strings),
            hasher: self.hasher,
        }
    }

    /// Pre-seeds the table with a dictionary of common symbols, starting at the given offset.
    ///
    /// This must be called at most once, and before any strings are symbolized.
    ///
    /// The dictionary region `[offset, offset + len)` must fit within `u32`. Larger offsets are clamped down to
    /// `u32::MAX - len`. Exporting allocates at least `offset` slots, so the offset should stay small in practice.
    pub fn configure_common_symbols(&mut self, offset: u32, common: &'a CommonSymbols) {
        debug_assert!(self.common.is_none(), "common symbols may only be configured once");
        debug_assert!(
            self.strings.is_empty(),
            "common symbols must be configured before symbolizing"
        );

        let max_offset = u32::try_from(common.len()).map_or(0, |len| u32::MAX - len);
        self.offset = offset.min(max_offset);
        self.common = Some(common);
    }

    /// Returns the number of dynamically interned strings.
    ///
    /// Strings from the common symbols dictionary are not counted.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns `true` if no strings have been dynamically interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Returns the number of entries in the exported symbol list.
    pub fn symbols_len(&self) -> usize {
        match self.common_len() {
            0 => self.strings.len(),
            common_len => self.strings.len().max(self.offset as usize) + common_len as usize,
        }
    }

    /// Exports the ordered symbol list into the given buffer.
    ///
    /// The buffer is cleared first. Every reference handed out by the table is a valid index into the returned list.
    /// Slots below the common symbols offset that were never assigned are filled with the empty string, and are never
    /// referenced.
    pub fn export_into(&self, mut buf: Vec<&'a str>) -> Vec<&'a str> {
        buf.clear();
        buf.reserve_exact(self.symbols_len());

        match self.common {
            Some(common) if !common.is_empty() => {
                let offset = self.offset as usize;
                let split = self.strings.len().min(offset);

                buf.extend_from_slice(&self.strings[..split]);
                buf.resize(offset, "");
                buf.extend(common.iter());
                buf.extend_from_slice(&self.strings[split..]);
            }
            _ => buf.extend_from_slice(&self.strings),
        }

        buf
    }

    /// Exports the ordered symbol list into a newly allocated buffer.
    pub fn export(&self) -> Vec<&'a str> {
        self.export_into(Vec::new())
    }

    fn common_len(&self) -> u32 {
        self.common.map_or(0, |common| common.len() as u32)
    }

    fn reference_for(&self, position: u32) -> u32 {
        if position < self.offset {
            position
        } else {
            position + self.common_len()
        }
    }
}

impl Default for SymbolTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Symbolizer<'a> for SymbolTable<'a> {
    fn symbolize(&mut self, s: &'a str) -> u32 {
        if let Some(position) = self.common.and_then(|common| common.get(s)) {
            return self.offset + position;
        }

        let hash = self.hasher.hash_one(s);
        let strings = &self.strings;
        if let Some(&position) = self.index.find(hash, |&p| strings[p as usize] == s) {
            return self.reference_for(position);
        }

        let position = self.strings.len() as u32;
        self.strings.push(s);

        let (strings, hasher) = (&self.strings, &self.hasher);
        self.index
            .insert_unique(hash, position, |&p| hasher.hash_one(strings[p as usize]));

        self.reference_for(position)
    }
}
