// src/swap/mod.rs
//! Byte-order reversal for values of any width.
//!
//! Both entry points share one algorithm and differ only in aliasing:
//!
//! - [`byte_swap`] writes the reversed bytes of `src` into a separate `dst`
//! - [`byte_swap_in_place`] reverses a single buffer where it lies
//!
//! Whether a swap is needed at all (source and target byte order differ) is
//! always the caller's decision. Nothing here inspects the host's endianness.
//!
//! ```
//! use bxswap::swap::{byte_swap, byte_swap_in_place};
//!
//! let src = [0x01, 0x02, 0x03, 0x04];
//! let mut dst = [0u8; 4];
//! byte_swap(&mut dst, &src);
//! assert_eq!(dst, [0x04, 0x03, 0x02, 0x01]);
//!
//! let mut buf = [0xAA, 0xBB, 0xCC];
//! byte_swap_in_place(&mut buf);
//! assert_eq!(buf, [0xCC, 0xBB, 0xAA]);
//! ```

mod typed;

pub use typed::{swap_value, swapped_copy, ByteSwap};

use crate::error::{Result, SwapError};

/// Copy `src` into `dst` with the byte order reversed.
///
/// After the call `dst[i] == src[len - 1 - i]` for every `i`, where `len` is
/// the common length of the two slices. `src` is left untouched and nothing
/// is allocated.
///
/// Taking `dst` as `&mut` next to a shared `src` means the two can never
/// overlap, so the copy runs front to back without read-after-write hazards.
///
/// # Panics
///
/// Panics if the slices differ in length, like `<[u8]>::copy_from_slice`.
/// Use [`try_byte_swap`] to get an error instead.
#[inline]
pub fn byte_swap(dst: &mut [u8], src: &[u8]) {
    assert_eq!(
        dst.len(),
        src.len(),
        "byte_swap: destination and source lengths differ"
    );

    for (d, s) in dst.iter_mut().zip(src.iter().rev()) {
        *d = *s;
    }
}

/// Checked form of [`byte_swap`].
///
/// Returns [`SwapError::LengthMismatch`] and leaves `dst` unmodified when the
/// lengths differ.
pub fn try_byte_swap(dst: &mut [u8], src: &[u8]) -> Result<()> {
    if dst.len() != src.len() {
        return Err(SwapError::LengthMismatch {
            dst: dst.len(),
            src: src.len(),
        });
    }

    byte_swap(dst, src);
    Ok(())
}

/// Reverse the byte order of `buf` in place.
///
/// Pairs are exchanged from both ends inward, `len / 2` exchanges in total.
/// The middle byte of an odd-length buffer is its own mirror and stays put.
/// Buffers of zero or one byte are left as they are.
#[inline]
pub fn byte_swap_in_place(buf: &mut [u8]) {
    let len = buf.len();
    for i in 0..len / 2 {
        buf.swap(i, len - 1 - i);
    }
}

/// [`byte_swap`] over raw buffer views.
///
/// Overlap is only checked in debug builds.
///
/// # Safety
///
/// - `src` must be valid for reads of `len` bytes
/// - `dst` must be valid for writes of `len` bytes
/// - the two regions must not overlap
///
/// When `len` is zero neither pointer is dereferenced.
pub unsafe fn byte_swap_raw(dst: *mut u8, src: *const u8, len: usize) {
    if len == 0 {
        return;
    }

    debug_assert!(
        !regions_overlap(dst as *const u8, src, len),
        "byte_swap_raw: source and destination overlap"
    );

    let dst = std::slice::from_raw_parts_mut(dst, len);
    let src = std::slice::from_raw_parts(src, len);
    byte_swap(dst, src);
}

/// [`byte_swap_in_place`] over a raw buffer view.
///
/// # Safety
///
/// `buf` must be valid for reads and writes of `len` bytes and must not be
/// accessed through any other path for the duration of the call. When `len`
/// is zero the pointer is not dereferenced and may be null.
pub unsafe fn byte_swap_in_place_raw(buf: *mut u8, len: usize) {
    if len == 0 {
        return;
    }

    byte_swap_in_place(std::slice::from_raw_parts_mut(buf, len));
}

fn regions_overlap(a: *const u8, b: *const u8, len: usize) -> bool {
    let (a, b) = (a as usize, b as usize);
    a < b.wrapping_add(len) && b < a.wrapping_add(len)
}
