//! Character-indexed access to a string.
use std::iter;

/// A view over a string addressed by character positions instead of byte offsets.
///
/// Entity offsets count characters, so every slice and search of the pipeline goes
/// through this type and never lands inside a multi-byte character.
#[derive(Debug, Clone)]
pub struct CharIndexed<'a> {
    text: &'a str,
    // Byte offset of every character, followed by the length of the text.
    offsets: Vec<usize>,
}

impl<'a> CharIndexed<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let offsets = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(iter::once(text.len()))
            .collect();
        Self { text, offsets }
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Characters `[left, right)`, or `None` if the range is reversed or out of bounds.
    #[must_use]
    pub fn slice(&self, left: usize, right: usize) -> Option<&'a str> {
        if left > right {
            return None;
        }
        let left = *self.offsets.get(left)?;
        let right = *self.offsets.get(right)?;
        self.text.get(left..right)
    }

    /// Characters `[left, right)` with both ends clamped to the text.
    #[must_use]
    pub fn slice_clamped(&self, left: usize, right: usize) -> &'a str {
        let left = left.min(self.len());
        let right = right.clamp(left, self.len());
        self.slice(left, right).unwrap_or_default()
    }

    /// Character position of the first occurrence of `needle` at or after `start`.
    #[must_use]
    pub fn find_from(&self, needle: &str, start: usize) -> Option<usize> {
        let from = *self.offsets.get(start)?;
        let found = from + self.text.get(from..)?.find(needle)?;
        self.offsets.binary_search(&found).ok()
    }

    /// Character position of the first occurrence of `needle`.
    #[must_use]
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.find_from(needle, 0)
    }

    /// Like [`CharIndexed::find_from`], ignoring ASCII case.
    #[must_use]
    pub fn find_from_ignore_ascii_case(&self, needle: &str, start: usize) -> Option<usize> {
        let from = *self.offsets.get(start)?;
        // ASCII case folding keeps byte offsets.
        let haystack = self.text.get(from..)?.to_ascii_lowercase();
        let found = from + haystack.find(&needle.to_ascii_lowercase())?;
        self.offsets.binary_search(&found).ok()
    }
}
