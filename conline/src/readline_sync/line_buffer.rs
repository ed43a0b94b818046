// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The editable line. Offsets are in character units. Offset preconditions are
//! programming errors and panic; running out of capacity is a normal outcome and is
//! reported as [`CapacityExceeded`] without touching the buffer.

use std::fmt::{Display, Formatter};

use crate::{CapacityExceeded, ok};

/// A fixed capacity sequence of character units plus the logical cursor.
///
/// The last `reserved_tail` units of the capacity are only reachable through
/// [`LineBuffer::append`], which is how the line terminator is added after editing.
///
/// Invariant: `cursor <= len <= capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
    capacity: usize,
    reserved_tail: usize,
}

impl LineBuffer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity),
            cursor: 0,
            capacity,
            reserved_tail: 0,
        }
    }

    /// Keep the last `reserved` units of the capacity for [`LineBuffer::append`].
    #[must_use]
    pub fn with_reserved_tail(mut self, reserved: usize) -> Self {
        self.reserved_tail = reserved.min(self.capacity);
        self
    }

    /// Seed the buffer with `text` and put the cursor at `cursor` (clamped to the
    /// seeded length).
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] if `text` doesn't fit.
    pub fn with_seed(
        capacity: usize,
        text: &str,
        cursor: usize,
    ) -> Result<Self, CapacityExceeded> {
        let mut it = Self::new(capacity);
        it.replace_all(text)?;
        it.cursor = cursor.min(it.len());
        Ok(it)
    }

    #[must_use]
    pub fn chars(&self) -> &[char] { &self.chars }

    #[must_use]
    pub fn len(&self) -> usize { self.chars.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.chars.is_empty() }

    #[must_use]
    pub fn capacity(&self) -> usize { self.capacity }

    #[must_use]
    pub fn reserved_tail(&self) -> usize { self.reserved_tail }

    /// The most units edits can fill, `capacity - reserved_tail`.
    #[must_use]
    pub fn edit_limit(&self) -> usize { self.capacity - self.reserved_tail }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    /// # Panics
    ///
    /// Panics if `cursor > len`.
    pub fn set_cursor(&mut self, cursor: usize) {
        assert!(cursor <= self.len(), "cursor {cursor} past end {}", self.len());
        self.cursor = cursor;
    }

    fn check_fits(requested: usize, limit: usize) -> Result<(), CapacityExceeded> {
        if requested > limit {
            return Err(CapacityExceeded {
                capacity: limit,
                requested,
            });
        }
        ok!()
    }

    /// Keep the cursor inside the (possibly shrunk) buffer.
    fn clamp_cursor(&mut self) { self.cursor = self.cursor.min(self.len()); }

    /// Remove `length` units starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + length > len`.
    pub fn erase(&mut self, offset: usize, length: usize) {
        assert!(
            offset + length <= self.len(),
            "erase {offset}+{length} past end {}",
            self.len()
        );
        self.chars.drain(offset..offset + length);
        self.clamp_cursor();
    }

    /// Insert `text` at `offset`, shifting the tail right.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] if the result wouldn't fit.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len`.
    pub fn insert(&mut self, offset: usize, text: &[char]) -> Result<(), CapacityExceeded> {
        assert!(offset <= self.len(), "insert at {offset} past end {}", self.len());
        Self::check_fits(self.len() + text.len(), self.edit_limit())?;
        self.chars.splice(offset..offset, text.iter().copied());
        ok!()
    }

    /// Replace the unit at `offset`, or append it when `offset == len`.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] if appending to a full buffer.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len`.
    pub fn overwrite(&mut self, offset: usize, unit: char) -> Result<(), CapacityExceeded> {
        assert!(offset <= self.len(), "overwrite at {offset} past end {}", self.len());
        if offset == self.len() {
            Self::check_fits(self.len() + 1, self.edit_limit())?;
            self.chars.push(unit);
        } else {
            self.chars[offset] = unit;
        }
        ok!()
    }

    /// Write `text` at the end. This may use the reserved tail.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] if the result wouldn't fit the full capacity.
    pub fn append(&mut self, text: &[char]) -> Result<(), CapacityExceeded> {
        Self::check_fits(self.len() + text.len(), self.capacity)?;
        self.chars.extend_from_slice(text);
        ok!()
    }

    /// Replace the whole content. The cursor is clamped to the new length.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] if `text` doesn't fit.
    pub fn replace_all(&mut self, text: &str) -> Result<(), CapacityExceeded> {
        let text: Vec<char> = text.chars().collect();
        Self::check_fits(text.len(), self.edit_limit())?;
        self.chars = text;
        self.clamp_cursor();
        ok!()
    }

    /// Scan left from `offset` for the start of the previous word.
    ///
    /// Spaces next to `offset` are skipped first. Then, if the unit to the left is in
    /// `breakset`, the whole run of `breakset` units is skipped, otherwise the run of
    /// units that are neither spaces nor in `breakset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset == 0` or `offset > len`.
    #[must_use]
    pub fn find_prev_boundary(&self, offset: usize, breakset: &str) -> usize {
        assert!(offset > 0, "no word before offset 0");
        assert!(offset <= self.len(), "offset {offset} past end {}", self.len());

        let chars = &self.chars;
        let mut offset = offset;
        while offset > 0 && chars[offset - 1] == ' ' {
            offset -= 1;
        }

        if offset > 0 && breakset.contains(chars[offset - 1]) {
            while offset > 0 && breakset.contains(chars[offset - 1]) {
                offset -= 1;
            }
        } else {
            while offset > 0 && is_word_unit(chars[offset - 1], breakset) {
                offset -= 1;
            }
        }
        offset
    }

    /// Scan right from `offset` for the start of the next word. Mirror image of
    /// [`LineBuffer::find_prev_boundary`], except the spaces after the matched run are
    /// also skipped. Returns `len` unchanged when `offset == len`.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len`.
    #[must_use]
    pub fn find_next_boundary(&self, offset: usize, breakset: &str) -> usize {
        assert!(offset <= self.len(), "offset {offset} past end {}", self.len());

        let chars = &self.chars;
        let len = chars.len();
        let mut offset = offset;
        while offset < len && chars[offset] == ' ' {
            offset += 1;
        }

        if offset < len && breakset.contains(chars[offset]) {
            while offset < len && breakset.contains(chars[offset]) {
                offset += 1;
            }
        } else {
            while offset < len && is_word_unit(chars[offset], breakset) {
                offset += 1;
            }
        }

        while offset < len && chars[offset] == ' ' {
            offset += 1;
        }
        offset
    }
}

fn is_word_unit(unit: char, breakset: &str) -> bool {
    unit != ' ' && !breakset.contains(unit)
}

impl Display for LineBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.chars.iter().try_for_each(|ch| write!(f, "{ch}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;
    use test_case::test_case;

    const BREAKS: &str = "/\\=[]{}()";

    fn buffer(text: &str) -> LineBuffer {
        LineBuffer::with_seed(64, text, text.chars().count()).unwrap()
    }

    fn chars(text: &str) -> Vec<char> { text.chars().collect() }

    #[test]
    fn test_insert_then_erase_restores() {
        let mut it = buffer("hello");
        it.insert(2, &chars("ab")).unwrap();
        assert_eq2!(it.to_string(), "heabllo");
        it.erase(2, 2);
        assert_eq2!(it.to_string(), "hello");
        assert_eq2!(it.len(), 5);
    }

    #[test]
    fn test_insert_rejects_overflow_without_mutating() {
        let mut it = LineBuffer::with_seed(10, "abcdefghij", 10).unwrap();
        let err = it.insert(10, &chars("k")).unwrap_err();
        assert_eq2!(
            err,
            CapacityExceeded {
                capacity: 10,
                requested: 11
            }
        );
        assert_eq2!(it.to_string(), "abcdefghij");
        assert_eq2!(it.cursor(), 10);
    }

    #[test]
    fn test_overwrite_replaces_or_appends() {
        let mut it = LineBuffer::with_seed(4, "abc", 0).unwrap();
        it.overwrite(1, 'X').unwrap();
        assert_eq2!(it.to_string(), "aXc");
        it.overwrite(3, 'd').unwrap();
        assert_eq2!(it.to_string(), "aXcd");
        assert!(it.overwrite(4, 'e').is_err());
        it.overwrite(3, 'D').unwrap();
        assert_eq2!(it.to_string(), "aXcD");
    }

    #[test]
    fn test_replace_all_clamps_cursor() {
        let mut it = buffer("hello world");
        it.replace_all("hi").unwrap();
        assert_eq2!(it.cursor(), 2);
        assert!(it.replace_all(&"x".repeat(65)).is_err());
        assert_eq2!(it.to_string(), "hi");
    }

    #[test]
    fn test_append_and_erase_clamp_cursor() {
        let mut it = buffer("abc");
        it.append(&chars("de")).unwrap();
        assert_eq2!(it.to_string(), "abcde");
        assert_eq2!(it.cursor(), 3);
        it.erase(1, 4);
        assert_eq2!(it.cursor(), 1);
    }

    #[test]
    fn test_reserved_tail_is_only_reachable_by_append() {
        let mut it = LineBuffer::new(5).with_reserved_tail(2);
        assert_eq2!(it.edit_limit(), 3);
        it.replace_all("abc").unwrap();
        assert_eq2!(
            it.insert(3, &chars("d")).unwrap_err(),
            CapacityExceeded {
                capacity: 3,
                requested: 4
            }
        );
        assert!(it.overwrite(3, 'd').is_err());
        assert!(it.replace_all("abcd").is_err());

        it.append(&chars("\r\n")).unwrap();
        assert_eq2!(it.len(), 5);
        assert!(it.append(&chars("!")).is_err());
        assert_eq2!(it.to_string(), "abc\r\n");
    }

    #[test]
    fn test_reserved_tail_is_clamped_to_capacity() {
        let it = LineBuffer::new(1).with_reserved_tail(2);
        assert_eq2!(it.reserved_tail(), 1);
        assert_eq2!(it.edit_limit(), 0);
    }

    #[test]
    #[should_panic(expected = "past end")]
    fn test_erase_out_of_bounds_panics() {
        let mut it = buffer("abc");
        it.erase(2, 2);
    }

    #[test_case("hello world", 11, 6 ; "word")]
    #[test_case("hello world", 6, 0 ; "skips spaces then word")]
    #[test_case("cd /usr/bin", 11, 8 ; "stops after slash")]
    #[test_case("cd /usr/bin", 8, 7 ; "slash run is its own word")]
    #[test_case("a == b", 4, 2 ; "breakset run after spaces")]
    #[test_case("   ", 3, 0 ; "only spaces")]
    fn test_find_prev_boundary(text: &str, offset: usize, expected: usize) {
        assert_eq2!(buffer(text).find_prev_boundary(offset, BREAKS), expected);
    }

    #[test_case("hello world", 0, 6 ; "word then trailing spaces")]
    #[test_case("hello world", 6, 11 ; "last word")]
    #[test_case("hello world", 11, 11 ; "at end")]
    #[test_case("cd /usr/bin", 3, 4 ; "slash run")]
    #[test_case("cd /usr/bin", 4, 7 ; "word stops at slash")]
    #[test_case("x  ((y", 0, 3 ; "skips spaces after word")]
    fn test_find_next_boundary(text: &str, offset: usize, expected: usize) {
        assert_eq2!(buffer(text).find_next_boundary(offset, BREAKS), expected);
    }

    #[test]
    #[should_panic(expected = "no word before offset 0")]
    fn test_find_prev_boundary_at_zero_panics() {
        let _ = buffer("abc").find_prev_boundary(0, BREAKS);
    }
}
