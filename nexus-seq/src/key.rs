//! Key trait for bucket node handles.
//!
//! Bucket nodes live in a slab owned by the list and link to each other
//! through keys rather than pointers. A key is a compact integer with a
//! reserved sentinel (`NONE`) standing in for a null link.

/// Integer handle naming a bucket node, with a sentinel "no node" value.
///
/// The key type bounds how many buckets can be live at once: a list keyed
/// by `u16` can hold at most `u16::MAX` buckets. `u32` is the default.
///
/// # Example
///
/// ```
/// use nexus_seq::Key;
///
/// let key: u32 = 7;
/// assert!(key.is_some());
/// assert!(u32::NONE.is_none());
/// assert_eq!(u32::from_usize(7), key);
/// ```
pub trait Key: Copy + Eq + core::fmt::Debug {
    /// Sentinel value representing "no node".
    const NONE: Self;

    /// Creates a key from a slab index.
    fn from_usize(val: usize) -> Self;

    /// Returns the key as a slab index.
    fn as_usize(self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as Self
                }

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u16, u32, u64, usize);
