//! Iterators over an [`UnrolledList`].
//!
//! Borrowing iterators hold the list for their whole lifetime, so the list
//! cannot be restructured while one is live.

use core::iter::FusedIterator;

use slab::Slab;

use crate::bucket::Bucket;
use crate::{Key, UnrolledList};

/// Iterator over references to list elements.
///
/// Created by [`UnrolledList::iter`]. Walks buckets front to back; the
/// reverse direction is available through [`DoubleEndedIterator`].
pub struct Iter<'a, T, K: Key = u32> {
    nodes: &'a Slab<Bucket<T, K>>,
    front: K,
    front_offset: usize,
    back: K,
    back_offset: usize,
    remaining: usize,
}

impl<'a, T, K: Key> Iter<'a, T, K> {
    pub(crate) fn new(list: &'a UnrolledList<T, K>) -> Self {
        let back_offset = if list.tail.is_some() {
            list.node(list.tail).len() - 1
        } else {
            0
        };

        Self {
            nodes: &list.nodes,
            front: list.head,
            front_offset: 0,
            back: list.tail,
            back_offset,
            remaining: list.len,
        }
    }
}

impl<T, K: Key> Clone for Iter<'_, T, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            front_offset: self.front_offset,
            back: self.back,
            back_offset: self.back_offset,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, K: Key> Iterator for Iter<'a, T, K> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes;
        let node = &nodes[self.front.as_usize()];
        let value = &node.values[self.front_offset];

        self.remaining -= 1;
        self.front_offset += 1;
        if self.front_offset == node.len() {
            self.front = node.next;
            self.front_offset = 0;
        }

        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, K: Key> DoubleEndedIterator for Iter<'_, T, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes;
        let node = &nodes[self.back.as_usize()];
        let value = &node.values[self.back_offset];

        self.remaining -= 1;
        if self.back_offset == 0 {
            self.back = node.prev;
            if self.back.is_some() {
                self.back_offset = nodes[self.back.as_usize()].len() - 1;
            }
        } else {
            self.back_offset -= 1;
        }

        Some(value)
    }
}

impl<T, K: Key> ExactSizeIterator for Iter<'_, T, K> {}

impl<T, K: Key> FusedIterator for Iter<'_, T, K> {}

/// Iterator over mutable references to list elements.
///
/// Created by [`UnrolledList::iter_mut`]. Values can be modified in place;
/// the bucket structure cannot.
pub struct IterMut<'a, T, K: Key = u32> {
    nodes: &'a mut Slab<Bucket<T, K>>,
    front: K,
    front_offset: usize,
    back: K,
    back_offset: usize,
    remaining: usize,
}

impl<'a, T, K: Key> IterMut<'a, T, K> {
    pub(crate) fn new(list: &'a mut UnrolledList<T, K>) -> Self {
        let back_offset = if list.tail.is_some() {
            list.node(list.tail).len() - 1
        } else {
            0
        };

        Self {
            front: list.head,
            front_offset: 0,
            back: list.tail,
            back_offset,
            remaining: list.len,
            nodes: &mut list.nodes,
        }
    }
}

impl<'a, T, K: Key> Iterator for IterMut<'a, T, K> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let offset = self.front_offset;
        let node = &mut self.nodes[self.front.as_usize()];
        debug_assert!(offset < node.len());

        // Safety: offset is in bounds, and as_mut_ptr does not reborrow the
        // buffer, so references handed out earlier stay valid. Each position
        // is yielded once because `remaining` bounds both ends.
        let value = unsafe { &mut *node.values.as_mut_ptr().add(offset) };

        self.remaining -= 1;
        self.front_offset += 1;
        if self.front_offset == node.len() {
            self.front = node.next;
            self.front_offset = 0;
        }

        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, K: Key> DoubleEndedIterator for IterMut<'_, T, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let offset = self.back_offset;
        let node = &mut self.nodes[self.back.as_usize()];
        debug_assert!(offset < node.len());

        // Safety: see `next`
        let value = unsafe { &mut *node.values.as_mut_ptr().add(offset) };
        let prev = node.prev;

        self.remaining -= 1;
        if offset == 0 {
            self.back = prev;
            if prev.is_some() {
                self.back_offset = self.nodes[prev.as_usize()].len() - 1;
            }
        } else {
            self.back_offset -= 1;
        }

        Some(value)
    }
}

impl<T, K: Key> ExactSizeIterator for IterMut<'_, T, K> {}

impl<T, K: Key> FusedIterator for IterMut<'_, T, K> {}

/// Owning iterator over list elements.
///
/// Created by [`UnrolledList::into_iter`]. Takes values off either end, so
/// the remaining buckets stay balanced as it drains.
pub struct IntoIter<T, K: Key = u32> {
    list: UnrolledList<T, K>,
}

impl<T, K: Key> IntoIter<T, K> {
    pub(crate) fn new(list: UnrolledList<T, K>) -> Self {
        Self { list }
    }
}

impl<T, K: Key> Iterator for IntoIter<T, K> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.shift()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, K: Key> DoubleEndedIterator for IntoIter<T, K> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop()
    }
}

impl<T, K: Key> ExactSizeIterator for IntoIter<T, K> {}

impl<T, K: Key> FusedIterator for IntoIter<T, K> {}
