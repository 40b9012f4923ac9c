use crate::error::{Result, TabulaError};

/// An ordered, deduplicated set of row indices: the result of every filter
/// evaluation. Indices are always iterated in ascending order regardless of
/// the order operands were built in.
///
/// Set operations are pure: they return a new `Selection` and leave both
/// operands untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    // sorted ascending, no duplicates
    indices: Vec<u32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection covering `[0, end_exclusive)`.
    pub fn with_range(end_exclusive: u32) -> Self {
        Self {
            indices: (0..end_exclusive).collect(),
        }
    }

    pub fn add(&mut self, index: u32) {
        match self.indices.binary_search(&index) {
            Ok(_) => {}
            Err(pos) => self.indices.insert(pos, index),
        }
    }

    /// Inserts `[start, end_exclusive)`. The common case during evaluation is
    /// appending past the current maximum, which stays O(n).
    pub fn add_range(&mut self, start: u32, end_exclusive: u32) {
        if start >= end_exclusive {
            return;
        }
        if self.indices.last().is_some_and(|&last| start <= last) {
            for index in start..end_exclusive {
                self.add(index);
            }
        } else {
            self.indices.extend(start..end_exclusive);
        }
    }

    /// Appends an index known to be greater than the current maximum.
    /// Used by column evaluation, which visits rows in ascending order.
    pub(crate) fn push(&mut self, index: u32) {
        debug_assert!(self.indices.last().is_none_or(|&last| last < index));
        self.indices.push(index);
    }

    pub fn size(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: u32) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().copied()
    }

    /// Intersection.
    pub fn and(&self, other: &Selection) -> Selection {
        let mut result = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    result.push(self.indices[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        Selection { indices: result }
    }

    /// Union.
    pub fn or(&self, other: &Selection) -> Selection {
        let mut result = Vec::with_capacity(self.indices.len().max(other.indices.len()));
        let (mut i, mut j) = (0, 0);
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => {
                    result.push(self.indices[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    result.push(other.indices[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    result.push(self.indices[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        result.extend_from_slice(&self.indices[i..]);
        result.extend_from_slice(&other.indices[j..]);
        Selection { indices: result }
    }

    /// Set difference: indices in `self` but not in `other`.
    pub fn and_not(&self, other: &Selection) -> Selection {
        let mut result = Vec::new();
        let mut j = 0;
        for &index in &self.indices {
            while j < other.indices.len() && other.indices[j] < index {
                j += 1;
            }
            if j >= other.indices.len() || other.indices[j] != index {
                result.push(index);
            }
        }
        Selection { indices: result }
    }

    /// Complement relative to `[0, universe)`. A universe smaller than the
    /// selection's maximum index, or too large for u32 row indices, is a
    /// precondition violation.
    pub fn not(&self, universe: usize) -> Result<Selection> {
        let end = u32::try_from(universe).map_err(|_| TabulaError::UniverseTooLarge(universe))?;
        if let Some(&max_index) = self.indices.last() {
            if max_index >= end {
                return Err(TabulaError::UniverseTooSmall {
                    universe,
                    max_index,
                });
            }
        }
        Ok(Selection::with_range(end).and_not(self))
    }
}

impl FromIterator<u32> for Selection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for index in iter {
            selection.add(index);
        }
        selection
    }
}
