//! The `Sequence` contract shared by ordered, index-addressable collections.
//!
//! Implementors provide the primitive operations: positional access,
//! insertion and removal at an index, and both-ends push/pop. Everything
//! else (search, relocation, bulk append) has a default written in terms
//! of those primitives, which an implementation may override with a
//! faster path.

use crate::iter::Iter;
use crate::{Key, OutOfBounds, UnrolledList};

/// An ordered collection addressed by zero-based index.
///
/// All index-taking operations return [`OutOfBounds`] for an invalid index
/// and leave the sequence unmodified.
///
/// # Example
///
/// ```
/// use nexus_seq::{Sequence, UnrolledList};
///
/// fn rotate_left<S: Sequence<u32>>(seq: &mut S) {
///     if !seq.is_empty() {
///         seq.move_to_back(0).unwrap();
///     }
/// }
///
/// let mut list: UnrolledList<u32> = UnrolledList::new(4);
/// list.extend([1, 2, 3]);
/// rotate_left(&mut list);
/// assert_eq!(list.to_vec(), vec![2, 3, 1]);
/// ```
pub trait Sequence<T> {
    /// Front-to-back iterator over element references.
    type Iter<'a>: DoubleEndedIterator<Item = &'a T> + ExactSizeIterator
    where
        Self: 'a,
        T: 'a;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Removes every element.
    fn clear(&mut self);

    /// Returns a reference to the element at `index`.
    fn get(&self, index: usize) -> Result<&T, OutOfBounds>;

    /// Returns a mutable reference to the element at `index`.
    fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfBounds>;

    /// Inserts `value` so that it ends up at `index`; `index == len` appends.
    fn insert_at(&mut self, index: usize, value: T) -> Result<(), OutOfBounds>;

    /// Removes and returns the element at `index`.
    fn remove_at(&mut self, index: usize) -> Result<T, OutOfBounds>;

    /// Appends `value` to the back.
    fn push(&mut self, value: T);

    /// Prepends `value` to the front.
    fn unshift(&mut self, value: T);

    /// Removes and returns the last element.
    fn pop(&mut self) -> Option<T>;

    /// Removes and returns the first element.
    fn shift(&mut self) -> Option<T>;

    /// Returns an iterator over the elements, front to back.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns an independent sequence holding clones of every element.
    fn copy(&self) -> Self
    where
        Self: Sized,
        T: Clone;

    /// Returns `true` if there are no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the elements, back to front.
    #[inline]
    fn iter_back(&self) -> core::iter::Rev<Self::Iter<'_>> {
        self.iter().rev()
    }

    /// Returns the first element.
    #[inline]
    fn first(&self) -> Option<&T> {
        self.iter().next()
    }

    /// Returns the last element.
    #[inline]
    fn last(&self) -> Option<&T> {
        self.iter().next_back()
    }

    /// Replaces the element at `index`, returning the old value.
    fn set(&mut self, index: usize, value: T) -> Result<T, OutOfBounds> {
        Ok(core::mem::replace(self.get_mut(index)?, value))
    }

    /// Returns the first element matching `pred`.
    fn get_by<F>(&self, mut pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|value| pred(value))
    }

    /// Replaces the first element matching `pred`, returning the old value.
    fn set_by<F>(&mut self, mut pred: F, value: T) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let index = self.iter().position(|v| pred(v))?;
        self.set(index, value).ok()
    }

    /// Swaps the elements at `a` and `b`.
    fn swap(&mut self, a: usize, b: usize) -> Result<(), OutOfBounds> {
        check_index(self.len(), a)?;
        check_index(self.len(), b)?;
        if a == b {
            return Ok(());
        }

        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let high_value = self.remove_at(high)?;
        let low_value = self.set(low, high_value)?;
        self.insert_at(high, low_value)
    }

    /// Copies every element into a `Vec`, front to back.
    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Removes the first element equal to `value`.
    ///
    /// Returns `true` if an element was removed.
    fn remove_first_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }

    /// Removes the last element equal to `value`.
    ///
    /// Returns `true` if an element was removed.
    fn remove_last_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.last_index_of(value) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }

    /// Appends clones of every element of `other`, keeping their order.
    fn push_list<S>(&mut self, other: &S)
    where
        S: Sequence<T> + ?Sized,
        T: Clone,
    {
        for value in other.iter() {
            self.push(value.clone());
        }
    }

    /// Prepends clones of every element of `other`, keeping their order.
    ///
    /// ```
    /// use nexus_seq::{Sequence, UnrolledList};
    ///
    /// let mut list: UnrolledList<u32> = UnrolledList::new(4);
    /// list.extend([3, 4]);
    /// let mut other: UnrolledList<u32> = UnrolledList::new(4);
    /// other.extend([1, 2]);
    ///
    /// list.unshift_list(&other);
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
    /// ```
    fn unshift_list<S>(&mut self, other: &S)
    where
        S: Sequence<T> + ?Sized,
        T: Clone,
    {
        for value in other.iter().rev() {
            self.unshift(value.clone());
        }
    }

    /// Returns `true` if an element equal to `value` exists.
    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Returns the index of the first element equal to `value`.
    fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    /// Returns the index of the last element equal to `value`.
    fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().rposition(|v| v == value)
    }

    /// Moves the element at `index` to directly after the element at `mark`.
    ///
    /// A no-op when `index == mark` or the element already follows `mark`.
    fn move_after(&mut self, index: usize, mark: usize) -> Result<(), OutOfBounds> {
        check_index(self.len(), index)?;
        check_index(self.len(), mark)?;
        if index == mark || index == mark + 1 {
            return Ok(());
        }

        let value = self.remove_at(index)?;
        let mark = if index < mark { mark - 1 } else { mark };
        self.insert_at(mark + 1, value)
    }

    /// Moves the element at `index` to directly before the element at `mark`.
    ///
    /// A no-op when `index == mark` or the element already precedes `mark`.
    fn move_before(&mut self, index: usize, mark: usize) -> Result<(), OutOfBounds> {
        check_index(self.len(), index)?;
        check_index(self.len(), mark)?;
        if index == mark || index + 1 == mark {
            return Ok(());
        }

        let value = self.remove_at(index)?;
        let mark = if index < mark { mark - 1 } else { mark };
        self.insert_at(mark, value)
    }

    /// Moves the element at `index` to the back.
    fn move_to_back(&mut self, index: usize) -> Result<(), OutOfBounds> {
        let last = self.len().saturating_sub(1);
        self.move_after(index, last)
    }

    /// Moves the element at `index` to the front.
    fn move_to_front(&mut self, index: usize) -> Result<(), OutOfBounds> {
        self.move_before(index, 0)
    }
}

#[inline]
fn check_index(len: usize, index: usize) -> Result<(), OutOfBounds> {
    if index < len {
        Ok(())
    } else {
        Err(OutOfBounds { index, len })
    }
}

impl<T, K: Key> Sequence<T> for UnrolledList<T, K> {
    type Iter<'a>
        = Iter<'a, T, K>
    where
        Self: 'a,
        T: 'a;

    #[inline]
    fn len(&self) -> usize {
        UnrolledList::len(self)
    }

    #[inline]
    fn clear(&mut self) {
        UnrolledList::clear(self);
    }

    #[inline]
    fn get(&self, index: usize) -> Result<&T, OutOfBounds> {
        UnrolledList::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfBounds> {
        UnrolledList::get_mut(self, index)
    }

    #[inline]
    fn insert_at(&mut self, index: usize, value: T) -> Result<(), OutOfBounds> {
        UnrolledList::insert_at(self, index, value)
    }

    #[inline]
    fn remove_at(&mut self, index: usize) -> Result<T, OutOfBounds> {
        UnrolledList::remove_at(self, index)
    }

    #[inline]
    fn push(&mut self, value: T) {
        UnrolledList::push(self, value);
    }

    #[inline]
    fn unshift(&mut self, value: T) {
        UnrolledList::unshift(self, value);
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        UnrolledList::pop(self)
    }

    #[inline]
    fn shift(&mut self) -> Option<T> {
        UnrolledList::shift(self)
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        UnrolledList::iter(self)
    }

    fn copy(&self) -> Self
    where
        T: Clone,
    {
        self.clone()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        UnrolledList::is_empty(self)
    }

    #[inline]
    fn first(&self) -> Option<&T> {
        UnrolledList::first(self)
    }

    #[inline]
    fn last(&self) -> Option<&T> {
        UnrolledList::last(self)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) -> Result<(), OutOfBounds> {
        UnrolledList::swap(self, a, b)
    }

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        UnrolledList::to_vec(self)
    }

    fn remove_first_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        UnrolledList::remove_first_occurrence(self, value)
    }

    fn remove_last_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        UnrolledList::remove_last_occurrence(self, value)
    }
}
