// src/lib.rs
//! # bxswap
//!
//! Byte-order reversal for binary values of any width, plus the reversible
//! obfuscation passes that a relay runs its traffic through.
//!
//! ## Features
//!
//! - 🔁 **Width Agnostic**: One routine serves 2, 4, 8 or N byte values
//! - 🔒 **Aliasing Safe**: Non-overlap of source and destination is enforced by the borrow checker
//! - ⚡ **Allocation Free**: Both swap variants work on caller-owned memory only
//! - 🎯 **Typed Wrappers**: `u16`..`u128`, floats, byte arrays and any `bytemuck::Pod` value
//! - 🧩 **Pass Pipelines**: Composable encode/decode passes over segmented buffers (`passes` feature)
//!
//! ## Quick Start
//!
//! ### Swapping Bytes
//!
//! ```rust
//! use bxswap::*;
//!
//! let src = [0x01, 0x02, 0x03, 0x04];
//! let mut dst = [0u8; 4];
//! byte_swap(&mut dst, &src);
//! assert_eq!(dst, [0x04, 0x03, 0x02, 0x01]);
//!
//! let mut buf = [0xAA, 0xBB, 0xCC];
//! byte_swap_in_place(&mut buf);
//! assert_eq!(buf, [0xCC, 0xBB, 0xAA]);
//!
//! assert_eq!(0xBEEFu16.byte_swapped(), 0xEFBE);
//! ```
//!
//! ### Running Passes
//!
//! ```rust
//! # #[cfg(feature = "passes")]
//! # fn main() -> bxswap::Result<()> {
//! use bxswap::pass::*;
//!
//! let mut builder = PackUnpackBuilder::new();
//! builder.add_paired_passes(ObfsEncoder::new(), ObfsDecoder::new());
//! builder.add_paired_passes(TailPaddingEncoder::new(), TailPaddingDecoder::new());
//!
//! let mut pack = builder.build_pack();
//! let mut unpack = builder.build_unpack();
//!
//! let mut msg = IoVec::from(b"hello".to_vec());
//! pack.run(&mut msg)?;
//! unpack.run(&mut msg)?;
//! assert_eq!(&msg.consume()[..], b"hello");
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "passes"))]
//! # fn main() {}
//! ```

// Modules
pub mod error;
pub mod swap;

#[cfg(feature = "passes")]
pub mod pass;

pub use error::{Result, SwapError};

pub use swap::{
    byte_swap,
    byte_swap_in_place,
    byte_swap_in_place_raw,
    byte_swap_raw,
    swap_value,
    swapped_copy,
    try_byte_swap,
    ByteSwap,
};

#[cfg(feature = "passes")]
pub use pass::{IoVec, Pass, PassManager};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use bxswap::prelude::*;
    //! ```

    pub use crate::error::{Result, SwapError};
    pub use crate::swap::{byte_swap, byte_swap_in_place, ByteSwap};

    #[cfg(feature = "passes")]
    pub use crate::pass::{IoVec, Pass, PassManager, PackUnpackBuilder};
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
