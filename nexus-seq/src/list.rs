//! Unrolled linked list.
//!
//! A doubly linked chain of bucket nodes, each holding a bounded run of
//! values. Buckets keep the cache behaviour of an array while insertion
//! and removal only ever shift values within one bucket.
//!
//! # Bucket Invariant
//!
//! Every bucket linked into the list holds between `1` and `max_elements`
//! values. Insertion splits a full bucket; removal drops an emptied bucket
//! and, for capacities above 3, refills an under-half bucket from its
//! successor by merging it whole or stealing two values.
//!
//! # Storage
//!
//! Buckets live in a [`slab::Slab`] owned by the list and link to each
//! other through [`Key`]s. Unlinking a bucket returns its slot to the slab
//! for reuse by the next split.
//!
//! # Example
//!
//! ```
//! use nexus_seq::UnrolledList;
//!
//! let mut list: UnrolledList<u64> = UnrolledList::new(4);
//!
//! for i in 0..8 {
//!     list.push(i);
//! }
//! assert_eq!(list.len(), 8);
//!
//! // Random access resolves an index to (bucket, offset)
//! assert_eq!(list.get(5), Ok(&5));
//!
//! // Mid-bucket insertion splits the bucket
//! list.insert_at(3, 100).unwrap();
//! assert_eq!(list.to_vec(), vec![0, 1, 2, 100, 3, 4, 5, 6, 7]);
//!
//! assert_eq!(list.remove_at(0), Ok(0));
//! assert_eq!(list.pop(), Some(7));
//! assert_eq!(list.shift(), Some(1));
//! ```

use core::fmt;

use slab::Slab;

use crate::bucket::Bucket;
use crate::cursor::{Cursor, CursorMut};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::{InvalidCapacity, Key, OutOfBounds};

/// Bucket capacity used by [`UnrolledList::default`].
pub const DEFAULT_MAX_ELEMENTS: usize = 16;

/// A sequence stored as a doubly linked chain of bounded buckets.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `K`: Bucket key type (default `u32`), bounds the number of live buckets
///
/// # Example
///
/// ```
/// use nexus_seq::UnrolledList;
///
/// let mut list: UnrolledList<&str> = UnrolledList::new(2);
/// list.push("b");
/// list.unshift("a");
/// list.push("c");
///
/// assert_eq!(list.first(), Some(&"a"));
/// assert_eq!(list.last(), Some(&"c"));
/// assert_eq!(list.index_of(&"c"), Some(2));
/// ```
pub struct UnrolledList<T, K: Key = u32> {
    pub(crate) nodes: Slab<Bucket<T, K>>,
    pub(crate) head: K,
    pub(crate) tail: K,
    pub(crate) len: usize,
    max_elements: usize,
}

impl<T, K: Key> UnrolledList<T, K> {
    /// Creates an empty list whose buckets hold up to `max_elements` values.
    ///
    /// # Panics
    ///
    /// Panics if `max_elements` is 0.
    pub fn new(max_elements: usize) -> Self {
        match Self::try_new(max_elements) {
            Ok(list) => list,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an empty list, rejecting a zero bucket capacity.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] if `max_elements` is 0.
    pub fn try_new(max_elements: usize) -> Result<Self, InvalidCapacity> {
        if max_elements < 1 {
            return Err(InvalidCapacity(max_elements));
        }

        log::debug!("unrolled list created with max_elements={max_elements}");

        Ok(Self {
            nodes: Slab::new(),
            head: K::NONE,
            tail: K::NONE,
            len: 0,
            max_elements,
        })
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bucket capacity this list was created with.
    #[inline]
    pub const fn max_elements(&self) -> usize {
        self.max_elements
    }

    /// Returns the number of buckets currently linked.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the occupancy of each bucket, front to back.
    ///
    /// ```
    /// use nexus_seq::UnrolledList;
    ///
    /// let mut list: UnrolledList<u32> = UnrolledList::new(2);
    /// list.extend(0..5);
    /// assert_eq!(list.bucket_sizes().collect::<Vec<_>>(), vec![2, 2, 1]);
    /// ```
    pub fn bucket_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets().map(Bucket::len)
    }

    /// Removes all elements and drops every bucket.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = K::NONE;
        self.tail = K::NONE;
        self.len = 0;
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the first element.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        if self.head.is_none() {
            return None;
        }
        self.node(self.head).values.first()
    }

    /// Returns a reference to the last element.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        if self.tail.is_none() {
            return None;
        }
        self.node(self.tail).values.last()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T, OutOfBounds> {
        let (key, offset) = self.locate(index).ok_or(self.out_of_bounds(index))?;
        Ok(&self.node(key).values[offset])
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfBounds> {
        let (key, offset) = self.locate(index).ok_or(self.out_of_bounds(index))?;
        Ok(&mut self.node_mut(key).values[offset])
    }

    /// Replaces the element at `index`, returning the old value.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index >= len`. `value` is dropped.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, OutOfBounds> {
        Ok(core::mem::replace(self.get_mut(index)?, value))
    }

    /// Returns the first element, front to back, matching `pred`.
    pub fn get_by<F>(&self, mut pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|value| pred(value))
    }

    /// Replaces the first element matching `pred`, returning the old value.
    ///
    /// Returns `None` if nothing matched; `value` is dropped.
    pub fn set_by<F>(&mut self, mut pred: F, value: T) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter_mut()
            .find(|slot| pred(slot))
            .map(|slot| core::mem::replace(slot, value))
    }

    /// Swaps the elements at `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] for the first invalid index. The list is
    /// not modified.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), OutOfBounds> {
        let (key_a, off_a) = self.locate(a).ok_or(self.out_of_bounds(a))?;
        let (key_b, off_b) = self.locate(b).ok_or(self.out_of_bounds(b))?;

        if key_a == key_b {
            self.node_mut(key_a).values.swap(off_a, off_b);
        } else {
            let (node_a, node_b) = self.node_pair_mut(key_a, key_b);
            core::mem::swap(&mut node_a.values[off_a], &mut node_b.values[off_b]);
        }
        Ok(())
    }

    // ========================================================================
    // Insert / remove
    // ========================================================================

    /// Inserts `value` so that it ends up at `index`.
    ///
    /// `index == len` appends.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index > len`. `value` is dropped.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<(), OutOfBounds> {
        if index > self.len {
            return Err(self.out_of_bounds(index));
        }

        if index == self.len {
            self.push(value);
        } else {
            let (key, offset) = self.position(index);
            self.insert_element(value, key, offset);
        }
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, OutOfBounds> {
        let (key, offset) = self.locate(index).ok_or(self.out_of_bounds(index))?;
        Ok(self.remove_element(key, offset))
    }

    /// Removes the first element equal to `value`.
    ///
    /// Returns `true` if an element was removed.
    pub fn remove_first_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut key = self.head;
        while key.is_some() {
            let node = self.node(key);
            let next = node.next;
            if let Some(offset) = node.values.iter().position(|v| v == value) {
                self.remove_element(key, offset);
                return true;
            }
            key = next;
        }
        false
    }

    /// Removes the last element equal to `value`.
    ///
    /// Returns `true` if an element was removed.
    pub fn remove_last_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut key = self.tail;
        while key.is_some() {
            let node = self.node(key);
            let prev = node.prev;
            if let Some(offset) = node.values.iter().rposition(|v| v == value) {
                self.remove_element(key, offset);
                return true;
            }
            key = prev;
        }
        false
    }

    /// Appends `value` to the back of the list.
    #[inline]
    pub fn push(&mut self, value: T) {
        let tail = self.tail;
        if tail.is_none() {
            self.insert_element(value, K::NONE, 0);
        } else {
            let offset = self.node(tail).len();
            self.insert_element(value, tail, offset);
        }
    }

    /// Prepends `value` to the front of the list.
    #[inline]
    pub fn unshift(&mut self, value: T) {
        self.insert_element(value, self.head, 0);
    }

    /// Removes and returns the last element.
    ///
    /// Returns `None` if the list is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        let tail = self.tail;
        if tail.is_none() {
            return None;
        }
        let offset = self.node(tail).len() - 1;
        Some(self.remove_element(tail, offset))
    }

    /// Removes and returns the first element.
    ///
    /// Returns `None` if the list is empty.
    #[inline]
    pub fn shift(&mut self) -> Option<T> {
        let head = self.head;
        if head.is_none() {
            return None;
        }
        Some(self.remove_element(head, 0))
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Returns `true` if an element equal to `value` exists.
    #[inline]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Returns the index of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    /// Returns the index of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().rposition(|v| v == value)
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, K> {
        Iter::new(self)
    }

    /// Returns an iterator over references to elements, back to front.
    #[inline]
    pub fn iter_back(&self) -> core::iter::Rev<Iter<'_, T, K>> {
        self.iter().rev()
    }

    /// Returns an iterator over mutable references to elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, K> {
        IterMut::new(self)
    }

    /// Returns a cursor at the first element, or `None` if the list is empty.
    #[inline]
    pub fn cursor_front(&self) -> Option<Cursor<'_, T, K>> {
        Cursor::front(self)
    }

    /// Returns a cursor at the last element, or `None` if the list is empty.
    #[inline]
    pub fn cursor_back(&self) -> Option<Cursor<'_, T, K>> {
        Cursor::back(self)
    }

    /// Returns a mutable cursor at the first element, or `None` if empty.
    #[inline]
    pub fn cursor_front_mut(&mut self) -> Option<CursorMut<'_, T, K>> {
        CursorMut::front(self)
    }

    /// Returns a mutable cursor at the last element, or `None` if empty.
    #[inline]
    pub fn cursor_back_mut(&mut self) -> Option<CursorMut<'_, T, K>> {
        CursorMut::back(self)
    }

    /// Copies every element into a new `Vec`, front to back.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len);
        for bucket in self.buckets() {
            out.extend_from_slice(&bucket.values);
        }
        out
    }

    // ========================================================================
    // Index locator
    // ========================================================================

    /// Resolves a global index to `(bucket, offset)`.
    ///
    /// Walks from whichever end is nearer. Returns `None` if
    /// `index >= len`.
    pub(crate) fn locate(&self, index: usize) -> Option<(K, usize)> {
        if index >= self.len {
            return None;
        }

        if index < self.len / 2 {
            let mut rest = index;
            let mut key = self.head;
            while key.is_some() {
                let node = self.node(key);
                if rest < node.len() {
                    return Some((key, rest));
                }
                rest -= node.len();
                key = node.next;
            }
        } else {
            // Count of elements behind `index`
            let mut rest = self.len - 1 - index;
            let mut key = self.tail;
            while key.is_some() {
                let node = self.node(key);
                if rest < node.len() {
                    return Some((key, node.len() - 1 - rest));
                }
                rest -= node.len();
                key = node.prev;
            }
        }

        None
    }

    /// Resolves an index already known to be in range.
    ///
    /// # Panics
    ///
    /// Panics if bucket occupancies disagree with `len`.
    #[inline]
    fn position(&self, index: usize) -> (K, usize) {
        self.locate(index)
            .expect("bucket occupancies disagree with list length")
    }

    #[inline]
    fn out_of_bounds(&self, index: usize) -> OutOfBounds {
        OutOfBounds {
            index,
            len: self.len,
        }
    }

    // ========================================================================
    // Mutation engine
    // ========================================================================

    /// Inserts `value` before position `offset` of bucket `key`.
    ///
    /// `key` may be `NONE` only when the list is empty.
    fn insert_element(&mut self, value: T, key: K, offset: usize) {
        if key.is_none() || offset == 0 || self.node(key).is_empty() {
            // Begin of bucket: the value gets a bucket of its own
            let fresh = self.link_before(key);
            self.node_mut(fresh).values.push(value);
        } else if offset == self.node(key).len() {
            let mut target = key;
            if self.node(key).len() == self.max_elements {
                target = self.link_after(key);

                if self.max_elements > 3 {
                    let split = self.max_elements.div_ceil(2);
                    let (full, fresh) = self.node_pair_mut(key, target);
                    fresh.values.extend(full.values.drain(split..));
                    log::trace!(
                        "split bucket {key:?} at {split}, moved {} values to {target:?}",
                        fresh.len()
                    );
                }
            }
            self.node_mut(target).values.push(value);
        } else {
            let fresh = self.link_after(key);
            let (left, right) = self.node_pair_mut(key, fresh);
            right.values.extend(left.values.drain(offset..));
            left.values.push(value);
            log::trace!(
                "split bucket {key:?} at {offset}, moved {} values to {fresh:?}",
                right.len()
            );
        }

        self.len += 1;
    }

    /// Removes the value at `offset` of bucket `key` and rebalances.
    pub(crate) fn remove_element(&mut self, key: K, offset: usize) -> T {
        let max_elements = self.max_elements;
        let node = self.node_mut(key);
        let value = node.values.remove(offset);
        let remaining = node.len();
        let next = node.next;
        self.len -= 1;

        if remaining == 0 {
            self.unlink(key);
            log::trace!("unlinked empty bucket {key:?}");
        } else if max_elements > 3 && next.is_some() && remaining < max_elements / 2 {
            let threshold = max_elements / 2;
            let (node, next_node) = self.node_pair_mut(key, next);

            if next_node.len() < threshold + 2 {
                node.values.append(&mut next_node.values);
                self.unlink(next);
                log::trace!("merged bucket {next:?} into {key:?}");
            } else {
                node.values.extend(next_node.values.drain(..2));
                log::trace!("bucket {key:?} stole 2 values from {next:?}");
            }
        }

        value
    }

    // ========================================================================
    // Bucket chain
    // ========================================================================

    #[inline]
    pub(crate) fn node(&self, key: K) -> &Bucket<T, K> {
        &self.nodes[key.as_usize()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, key: K) -> &mut Bucket<T, K> {
        &mut self.nodes[key.as_usize()]
    }

    #[inline]
    fn node_pair_mut(&mut self, a: K, b: K) -> (&mut Bucket<T, K>, &mut Bucket<T, K>) {
        self.nodes
            .get2_mut(a.as_usize(), b.as_usize())
            .expect("bucket chain references a vacant slot")
    }

    /// Walks the linked buckets front to back.
    pub(crate) fn buckets(&self) -> impl Iterator<Item = &Bucket<T, K>> + '_ {
        let mut key = self.head;
        core::iter::from_fn(move || {
            if key.is_none() {
                return None;
            }
            let node = self.node(key);
            key = node.next;
            Some(node)
        })
    }

    fn alloc_node(&mut self) -> K {
        let index = self.nodes.insert(Bucket::with_capacity(self.max_elements));
        assert!(
            index < K::NONE.as_usize(),
            "bucket count exceeds key type maximum"
        );
        K::from_usize(index)
    }

    /// Links a fresh bucket before `before`, or as the only bucket if
    /// `before` is `NONE`.
    fn link_before(&mut self, before: K) -> K {
        let key = self.alloc_node();

        if before.is_none() {
            debug_assert!(self.head.is_none(), "NONE anchor on a non-empty list");
            self.head = key;
            self.tail = key;
            return key;
        }

        let prev = self.node(before).prev;
        let node = self.node_mut(key);
        node.prev = prev;
        node.next = before;

        self.node_mut(before).prev = key;
        if prev.is_some() {
            self.node_mut(prev).next = key;
        } else {
            self.head = key;
        }

        key
    }

    /// Links a fresh bucket after `after`.
    fn link_after(&mut self, after: K) -> K {
        let key = self.alloc_node();

        let next = self.node(after).next;
        let node = self.node_mut(key);
        node.prev = after;
        node.next = next;

        self.node_mut(after).next = key;
        if next.is_some() {
            self.node_mut(next).prev = key;
        } else {
            self.tail = key;
        }

        key
    }

    /// Unlinks bucket `key` and returns its slot to the slab.
    fn unlink(&mut self, key: K) -> Bucket<T, K> {
        let node = self.nodes.remove(key.as_usize());

        if node.prev.is_some() {
            self.node_mut(node.prev).next = node.next;
        } else {
            self.head = node.next;
        }

        if node.next.is_some() {
            self.node_mut(node.next).prev = node.prev;
        } else {
            self.tail = node.prev;
        }

        node
    }

    /// Asserts the bucket invariant and link consistency.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut total = 0;
        let mut count = 0;
        let mut prev = K::NONE;
        let mut key = self.head;

        while key.is_some() {
            let node = self.node(key);
            assert!(
                (1..=self.max_elements).contains(&node.len()),
                "bucket {key:?} holds {} values (max {})",
                node.len(),
                self.max_elements
            );
            assert_eq!(node.prev, prev, "broken back link at {key:?}");
            total += node.len();
            count += 1;
            prev = key;
            key = node.next;
        }

        assert_eq!(self.tail, prev, "tail is not the last bucket");
        assert_eq!(self.len, total, "len disagrees with bucket occupancies");
        assert_eq!(self.nodes.len(), count, "unlinked bucket left in slab");
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T, K: Key> Default for UnrolledList<T, K> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ELEMENTS)
    }
}

impl<T: Clone, K: Key> Clone for UnrolledList<T, K> {
    fn clone(&self) -> Self {
        let mut copy = Self::new(self.max_elements);
        copy.extend(self.iter().cloned());
        copy
    }
}

impl<T: fmt::Debug, K: Key> fmt::Debug for UnrolledList<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, K: Key> PartialEq for UnrolledList<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, K: Key> Eq for UnrolledList<T, K> {}

impl<T, K: Key> Extend<T> for UnrolledList<T, K> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a, K: Key> Extend<&'a T> for UnrolledList<T, K> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, K: Key> IntoIterator for UnrolledList<T, K> {
    type Item = T;
    type IntoIter = IntoIter<T, K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, K: Key> IntoIterator for &'a UnrolledList<T, K> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, K: Key> IntoIterator for &'a mut UnrolledList<T, K> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
