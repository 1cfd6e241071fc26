//! Stateful cursors over an [`UnrolledList`].
//!
//! A cursor sits on one element and steps one position at a time in either
//! direction. Stepping past either end exhausts it; an exhausted cursor
//! stays exhausted.
//!
//! ```
//! use nexus_seq::UnrolledList;
//!
//! let mut list: UnrolledList<u32> = UnrolledList::new(2);
//! list.extend([1, 2, 3]);
//!
//! let mut seen = Vec::new();
//! let mut cursor = list.cursor_back().unwrap();
//! loop {
//!     seen.push(*cursor.current().unwrap());
//!     if !cursor.move_prev() {
//!         break;
//!     }
//! }
//! assert_eq!(seen, vec![3, 2, 1]);
//! ```

use crate::{Key, UnrolledList};

/// Cursor position: the bucket, the offset inside it, and the global index.
#[derive(Debug, Clone, Copy)]
struct Position<K: Key> {
    key: K,
    offset: usize,
    index: usize,
}

impl<K: Key> Position<K> {
    fn front<T>(list: &UnrolledList<T, K>) -> Option<Self> {
        if list.is_empty() {
            return None;
        }
        Some(Self {
            key: list.head,
            offset: 0,
            index: 0,
        })
    }

    fn back<T>(list: &UnrolledList<T, K>) -> Option<Self> {
        if list.is_empty() {
            return None;
        }
        Some(Self {
            key: list.tail,
            offset: list.node(list.tail).len() - 1,
            index: list.len() - 1,
        })
    }

    fn advance<T>(&mut self, list: &UnrolledList<T, K>) -> bool {
        if self.key.is_none() {
            return false;
        }

        let node = list.node(self.key);
        if self.offset + 1 < node.len() {
            self.offset += 1;
        } else {
            self.key = node.next;
            self.offset = 0;
        }
        self.index += 1;

        self.key.is_some()
    }

    fn retreat<T>(&mut self, list: &UnrolledList<T, K>) -> bool {
        if self.key.is_none() {
            return false;
        }

        if self.offset > 0 {
            self.offset -= 1;
            self.index -= 1;
            return true;
        }

        let prev = list.node(self.key).prev;
        self.key = prev;
        if prev.is_some() {
            self.offset = list.node(prev).len() - 1;
            self.index -= 1;
            true
        } else {
            false
        }
    }

    fn index(&self) -> Option<usize> {
        if self.key.is_none() {
            None
        } else {
            Some(self.index)
        }
    }
}

/// Read-only cursor over list elements.
///
/// Created by [`UnrolledList::cursor_front`] or
/// [`UnrolledList::cursor_back`]. The list cannot be modified while the
/// cursor is live.
pub struct Cursor<'a, T, K: Key = u32> {
    list: &'a UnrolledList<T, K>,
    pos: Position<K>,
}

impl<'a, T, K: Key> Cursor<'a, T, K> {
    pub(crate) fn front(list: &'a UnrolledList<T, K>) -> Option<Self> {
        Position::front(list).map(|pos| Self { list, pos })
    }

    pub(crate) fn back(list: &'a UnrolledList<T, K>) -> Option<Self> {
        Position::back(list).map(|pos| Self { list, pos })
    }

    /// Returns the current element.
    ///
    /// Returns `None` if the cursor is exhausted.
    #[inline]
    pub fn current(&self) -> Option<&'a T> {
        if self.pos.key.is_none() {
            return None;
        }
        let list = self.list;
        Some(&list.node(self.pos.key).values[self.pos.offset])
    }

    /// Returns the index of the current element.
    ///
    /// Returns `None` if the cursor is exhausted.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.pos.index()
    }

    /// Advances to the next element.
    ///
    /// Returns `false` once the cursor has stepped past the back.
    #[inline]
    pub fn move_next(&mut self) -> bool {
        self.pos.advance(self.list)
    }

    /// Moves to the previous element.
    ///
    /// Returns `false` once the cursor has stepped past the front.
    #[inline]
    pub fn move_prev(&mut self) -> bool {
        self.pos.retreat(self.list)
    }

    /// Peeks at the next element without advancing.
    pub fn peek_next(&self) -> Option<&'a T> {
        let mut pos = self.pos;
        if pos.advance(self.list) {
            let list = self.list;
            Some(&list.node(pos.key).values[pos.offset])
        } else {
            None
        }
    }

    /// Returns `true` if the cursor is exhausted (no current element).
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos.key.is_none()
    }
}

/// Cursor with in-place mutation and removal.
///
/// Created by [`UnrolledList::cursor_front_mut`] or
/// [`UnrolledList::cursor_back_mut`].
///
/// ```
/// use nexus_seq::UnrolledList;
///
/// let mut list: UnrolledList<u32> = UnrolledList::new(4);
/// list.extend(0..10);
///
/// // Drop the odd values, double the rest
/// let mut cursor = list.cursor_front_mut().unwrap();
/// while let Some(value) = cursor.current_mut() {
///     if *value % 2 == 1 {
///         cursor.remove_current();
///     } else {
///         *value *= 2;
///         cursor.move_next();
///     }
/// }
/// assert_eq!(list.to_vec(), vec![0, 4, 8, 12, 16]);
/// ```
pub struct CursorMut<'a, T, K: Key = u32> {
    list: &'a mut UnrolledList<T, K>,
    pos: Position<K>,
}

impl<'a, T, K: Key> CursorMut<'a, T, K> {
    pub(crate) fn front(list: &'a mut UnrolledList<T, K>) -> Option<Self> {
        Position::front(list).map(|pos| Self { list, pos })
    }

    pub(crate) fn back(list: &'a mut UnrolledList<T, K>) -> Option<Self> {
        Position::back(list).map(|pos| Self { list, pos })
    }

    /// Returns the current element.
    ///
    /// Returns `None` if the cursor is exhausted.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        if self.pos.key.is_none() {
            return None;
        }
        Some(&self.list.node(self.pos.key).values[self.pos.offset])
    }

    /// Returns a mutable reference to the current element.
    ///
    /// Returns `None` if the cursor is exhausted.
    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut T> {
        if self.pos.key.is_none() {
            return None;
        }
        Some(&mut self.list.node_mut(self.pos.key).values[self.pos.offset])
    }

    /// Replaces the current element, returning the old value.
    ///
    /// # Errors
    ///
    /// Returns `value` back if the cursor is exhausted.
    pub fn set(&mut self, value: T) -> Result<T, T> {
        match self.current_mut() {
            Some(slot) => Ok(core::mem::replace(slot, value)),
            None => Err(value),
        }
    }

    /// Returns the index of the current element.
    ///
    /// Returns `None` if the cursor is exhausted.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.pos.index()
    }

    /// Advances to the next element.
    ///
    /// Returns `false` once the cursor has stepped past the back.
    #[inline]
    pub fn move_next(&mut self) -> bool {
        self.pos.advance(self.list)
    }

    /// Moves to the previous element.
    ///
    /// Returns `false` once the cursor has stepped past the front.
    #[inline]
    pub fn move_prev(&mut self) -> bool {
        self.pos.retreat(self.list)
    }

    /// Removes the current element and moves to the one that followed it.
    ///
    /// Returns the removed value, or `None` if the cursor is exhausted.
    /// Removing the last element exhausts the cursor.
    pub fn remove_current(&mut self) -> Option<T> {
        let index = self.pos.index()?;
        let value = self.list.remove_element(self.pos.key, self.pos.offset);

        // Rebalancing may have moved values between buckets
        match self.list.locate(index) {
            Some((key, offset)) => {
                self.pos.key = key;
                self.pos.offset = offset;
            }
            None => self.pos.key = K::NONE,
        }

        Some(value)
    }

    /// Returns `true` if the cursor is exhausted (no current element).
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos.key.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(max_elements: usize, n: u64) -> UnrolledList<u64> {
        let mut list = UnrolledList::new(max_elements);
        list.extend(0..n);
        list
    }

    #[test]
    fn empty_list_has_no_cursor() {
        let mut list: UnrolledList<u64> = UnrolledList::new(4);
        assert!(list.cursor_front().is_none());
        assert!(list.cursor_back().is_none());
        assert!(list.cursor_front_mut().is_none());
        assert!(list.cursor_back_mut().is_none());
    }

    #[test]
    fn forward_walk_visits_every_element() {
        for max in [1, 2, 4, 5] {
            let list = filled(max, 9);
            let mut cursor = list.cursor_front().unwrap();
            let mut seen = vec![*cursor.current().unwrap()];
            while cursor.move_next() {
                assert_eq!(cursor.index(), Some(seen.len()));
                seen.push(*cursor.current().unwrap());
            }
            assert_eq!(seen, (0..9).collect::<Vec<_>>());
            assert!(cursor.is_exhausted());
        }
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let list = filled(2, 3);
        let mut cursor = list.cursor_back().unwrap();
        assert_eq!(cursor.index(), Some(2));
        assert!(!cursor.move_next());
        assert!(cursor.current().is_none());
        assert!(cursor.index().is_none());
        assert!(!cursor.move_prev());
        assert!(!cursor.move_next());
        assert!(cursor.peek_next().is_none());
    }

    #[test]
    fn backward_walk_crosses_buckets() {
        let list = filled(3, 7);
        let mut cursor = list.cursor_back().unwrap();
        let mut seen = vec![*cursor.current().unwrap()];
        while cursor.move_prev() {
            seen.push(*cursor.current().unwrap());
        }
        assert_eq!(seen, vec![6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn peek_next_does_not_move() {
        let list = filled(2, 3);
        let cursor = list.cursor_front().unwrap();
        assert_eq!(cursor.peek_next(), Some(&1));
        assert_eq!(cursor.current(), Some(&0));
    }

    #[test]
    fn set_through_cursor() {
        let mut list = filled(2, 4);
        let mut cursor = list.cursor_front_mut().unwrap();
        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor.set(20), Ok(2));
        assert!(cursor.move_next());
        assert!(!cursor.move_next());
        assert_eq!(cursor.set(99), Err(99));

        assert_eq!(list.to_vec(), vec![0, 1, 20, 3]);
    }

    #[test]
    fn remove_current_follows_rebalancing() {
        // Capacity 7 triggers steal and merge while removing
        let mut list = filled(7, 10);
        let mut cursor = list.cursor_front_mut().unwrap();
        cursor.move_next();
        cursor.move_next();

        for expected in 2..6 {
            assert_eq!(cursor.remove_current(), Some(expected));
            assert_eq!(cursor.current(), Some(&(expected + 1)));
            assert_eq!(cursor.index(), Some(2));
        }

        assert_eq!(list.to_vec(), vec![0, 1, 6, 7, 8, 9]);
        list.check_invariants();
    }

    #[test]
    fn remove_current_at_bucket_edges() {
        // Capacity 2: [0, 1] [2, 3] [4, 5]
        let mut list = filled(2, 6);
        let mut cursor = list.cursor_front_mut().unwrap();
        cursor.move_next();

        // Last value of a bucket, then a bucket emptied and unlinked
        assert_eq!(cursor.remove_current(), Some(1));
        assert_eq!(cursor.current(), Some(&2));
        cursor.move_next();
        assert_eq!(cursor.remove_current(), Some(3));
        assert_eq!(cursor.current(), Some(&4));
        cursor.move_prev();
        assert_eq!(cursor.remove_current(), Some(2));
        assert_eq!(cursor.current(), Some(&4));
        assert_eq!(cursor.index(), Some(1));

        assert_eq!(list.to_vec(), vec![0, 4, 5]);
        assert_eq!(list.bucket_count(), 2);
        list.check_invariants();
    }

    #[test]
    fn remove_last_exhausts() {
        let mut list = filled(4, 3);
        let mut cursor = list.cursor_back_mut().unwrap();
        assert_eq!(cursor.remove_current(), Some(2));
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.remove_current(), None);
        assert_eq!(list.to_vec(), vec![0, 1]);
    }
}
