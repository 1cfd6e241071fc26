//! Bucket nodes of the unrolled list.

use crate::Key;

/// A node in the unrolled list: a bounded run of values plus links.
///
/// While linked into a list a bucket holds between `1` and `max_elements`
/// values. The value vector is allocated once at full capacity, so splits,
/// merges and steals never reallocate.
#[derive(Debug, Clone)]
pub(crate) struct Bucket<T, K: Key> {
    pub(crate) values: Vec<T>,
    pub(crate) prev: K,
    pub(crate) next: K,
}

impl<T, K: Key> Bucket<T, K> {
    /// Creates an empty, unlinked bucket.
    #[inline]
    pub(crate) fn with_capacity(max_elements: usize) -> Self {
        Self {
            values: Vec::with_capacity(max_elements),
            prev: K::NONE,
            next: K::NONE,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
