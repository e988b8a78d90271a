// src/pass/padding.rs
use byteorder::{BigEndian, ByteOrder};
use bytes::BytesMut;
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::error::Result;
use super::{IoVec, Pass};

/// Upper bound on the random bytes appended by [`TailPaddingEncoder`]
pub const MAX_TAIL_PADDING: usize = 60;

/// Appends a random trailer so payload sizes stop matching message sizes.
///
/// The trailer is `l` random bytes (`l` a multiple of 4, at most
/// [`MAX_TAIL_PADDING`]) followed by one byte holding `l`.
#[derive(Debug)]
pub struct TailPaddingEncoder {
    rng: StdRng,
}

impl TailPaddingEncoder {
    pub fn new() -> Self {
        TailPaddingEncoder {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic padding, for tests and reproducible captures
    pub fn with_seed(seed: u64) -> Self {
        TailPaddingEncoder {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn padding_len(&mut self) -> usize {
        (self.rng.random::<u32>() % 64) as usize & !3
    }
}

impl Default for TailPaddingEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for TailPaddingEncoder {
    fn run(&mut self, b: &mut IoVec) -> Result<()> {
        let len = self.padding_len();
        let mut trailer = BytesMut::zeroed(len + 1);

        for word in trailer[..len].chunks_exact_mut(4) {
            BigEndian::write_u32(word, self.rng.random());
        }
        trailer[len] = len as u8;

        trace!("tail padding: {} bytes", len);
        b.take(trailer);
        Ok(())
    }
}

/// Strips the trailer written by [`TailPaddingEncoder`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TailPaddingDecoder;

impl TailPaddingDecoder {
    pub fn new() -> Self {
        TailPaddingDecoder
    }
}

impl Pass for TailPaddingDecoder {
    fn run(&mut self, b: &mut IoVec) -> Result<()> {
        let len = b.last_byte()? as usize;
        b.drop_tail(1 + len)
    }
}
