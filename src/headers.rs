//! Ordered, case-insensitive header storage.
//!
//! Grounded on the teacher's `Table<T>` (`table.rs`): a `Vec` of `(name,
//! value)` pairs searched case-insensitively, rather than a `HashMap`, so
//! that insertion order is preserved for consumers that want to look at
//! headers in wire order. Unlike `Table<T>`, which keeps every occurrence of
//! a duplicate name, `HeaderSet` folds repeats into the first slot
//! (last-write-wins on the value, first-write-wins on position) — this
//! crate doesn't need to expose raw duplicate-header history.

use bstr::BStr;

/// A single stored header field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

impl HeaderField {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name_str(&self) -> &BStr {
        BStr::new(&self.name)
    }

    pub fn value_str(&self) -> &BStr {
        BStr::new(&self.value)
    }
}

/// Ordered collection of header fields with case-insensitive lookup.
#[derive(Debug, Clone, Default)]
pub struct HeaderSet {
    fields: Vec<HeaderField>,
    /// Index into `fields` of the header field most recently inserted or
    /// folded into by `upsert`, independent of its storage position.
    /// Continuation lines append here, matching the original's
    /// `__last_header_field` (reassigned on every processed header field,
    /// not derived from collection order).
    last_touched: Option<usize>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            last_touched: None,
        }
    }

    /// Number of distinct header names stored.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Inserts a header, or folds into an existing one of the same name
    /// (case-insensitive): the stored value becomes `value`, replacing
    /// whatever was there, and the field keeps its original position. Either
    /// way, the field becomes the continuation cursor (`last_touched`).
    pub fn upsert(&mut self, name: &[u8], value: Vec<u8>) {
        let index = match self.find_index(name) {
            Some(i) => {
                self.fields[i].value = value;
                i
            }
            None => {
                self.fields.push(HeaderField::new(name.to_vec(), value));
                self.fields.len() - 1
            }
        };
        self.last_touched = Some(index);
    }

    /// Appends `extra` to the value of the most recently touched header
    /// (by processing order, not storage position), used for obsolete line
    /// folding continuations. Panics if called with no headers stored yet;
    /// callers must check `is_empty()` first and report
    /// `ParseErrorKind::ContinuationWithoutHeader` instead.
    pub fn append_to_last(&mut self, extra: &[u8]) {
        let index = self
            .last_touched
            .expect("append_to_last called with no headers stored");
        self.fields[index].value.extend_from_slice(extra);
    }

    pub fn find(&self, name: &[u8]) -> Option<&HeaderField> {
        self.fields.iter().find(|h| eq_nocase(&h.name, name))
    }

    fn find_index(&self, name: &[u8]) -> Option<usize> {
        self.fields.iter().position(|h| eq_nocase(&h.name, name))
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.find(name.as_bytes()).map(|h| h.value.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderField> {
        self.fields.iter()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.last_touched = None;
    }
}

fn eq_nocase(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_ascii_lowercase() == y.to_ascii_lowercase())
}
