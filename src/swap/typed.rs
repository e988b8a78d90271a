// src/swap/typed.rs
//! Fixed-width wrappers that take the byte count from the type.

use super::{byte_swap, byte_swap_in_place};

/// Values whose byte order can be reversed.
///
/// # Example
///
/// ```
/// use bxswap::ByteSwap;
///
/// assert_eq!(0x1234_5678u32.byte_swapped(), 0x7856_3412);
///
/// let mut word = [0xDEu8, 0xAD];
/// word.byte_swap_mut();
/// assert_eq!(word, [0xAD, 0xDE]);
/// ```
pub trait ByteSwap: Sized {
    /// Return the value with its bytes reversed.
    fn byte_swapped(self) -> Self;

    /// Reverse the bytes of the value where it lies.
    fn byte_swap_mut(&mut self);
}

macro_rules! impl_byte_swap {
    ($($t:ty)*) => {
        $(
            impl ByteSwap for $t {
                #[inline]
                fn byte_swapped(self) -> Self {
                    let mut bytes = self.to_ne_bytes();
                    byte_swap_in_place(&mut bytes);
                    <$t>::from_ne_bytes(bytes)
                }

                #[inline]
                fn byte_swap_mut(&mut self) {
                    *self = self.byte_swapped();
                }
            }
        )*
    };
}

impl_byte_swap! { u8 i8 u16 i16 u32 i32 u64 i64 u128 i128 f32 f64 }

impl<const N: usize> ByteSwap for [u8; N] {
    #[inline]
    fn byte_swapped(mut self) -> Self {
        byte_swap_in_place(&mut self);
        self
    }

    #[inline]
    fn byte_swap_mut(&mut self) {
        byte_swap_in_place(self);
    }
}

/// Reverse the bytes of any plain-old-data value, `size_of::<T>()` wide.
///
/// For a struct this reverses the whole representation, so field order is
/// mirrored too.
#[inline]
pub fn swap_value<T: bytemuck::Pod>(value: &mut T) {
    byte_swap_in_place(bytemuck::bytes_of_mut(value));
}

/// Copying variant for fixed-width byte arrays.
#[inline]
pub fn swapped_copy<const N: usize>(src: &[u8; N]) -> [u8; N] {
    let mut dst = [0u8; N];
    byte_swap(&mut dst, src);
    dst
}
