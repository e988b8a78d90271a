// src/pass/random.rs
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::error::{Result, SwapError};
use super::{IoVec, Pass, PassManager};

/// Runs one of several pipelines per message, chosen at random.
///
/// The chosen selector byte `s` is appended after the pipeline output; the
/// pipeline used is `s % k` for `k` registered managers. Pair with a
/// [`RandomDecoder`] holding the matching decode pipelines in the same order.
#[derive(Debug)]
pub struct RandomEncoder {
    pms: Vec<PassManager>,
    rng: StdRng,
}

impl RandomEncoder {
    pub fn new() -> Self {
        RandomEncoder {
            pms: Vec::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomEncoder {
            pms: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn add_pm(&mut self, pm: PassManager) -> &mut Self {
        self.pms.push(pm);
        self
    }

    pub fn len(&self) -> usize {
        self.pms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pms.is_empty()
    }
}

impl Default for RandomEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for RandomEncoder {
    fn run(&mut self, b: &mut IoVec) -> Result<()> {
        if self.pms.is_empty() {
            return Err(SwapError::NoPipelines);
        }

        let selector: u8 = self.rng.random();
        let index = selector as usize % self.pms.len();
        trace!("random encoder: pipeline {} of {}", index, self.pms.len());

        self.pms[index].run(b)?;

        b.take_slice(&[selector]);
        Ok(())
    }
}

/// Reads the selector byte left by [`RandomEncoder`] and runs the matching
/// decode pipeline.
///
/// # Errors
///
/// Returns [`SwapError::NoPipelines`] when no managers are registered and
/// [`SwapError::EmptyBuffer`] when there is no selector byte; the buffer is
/// untouched in both cases. Any error from the selected pipeline is passed
/// through, and by then the selector byte has already been dropped: the
/// buffer is not restored.
#[derive(Debug, Default)]
pub struct RandomDecoder {
    pms: Vec<PassManager>,
}

impl RandomDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pm(&mut self, pm: PassManager) -> &mut Self {
        self.pms.push(pm);
        self
    }

    pub fn len(&self) -> usize {
        self.pms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pms.is_empty()
    }
}

impl Pass for RandomDecoder {
    fn run(&mut self, b: &mut IoVec) -> Result<()> {
        if self.pms.is_empty() {
            return Err(SwapError::NoPipelines);
        }

        let selector = b.last_byte()?;
        b.drop_tail(1)?;

        let index = selector as usize % self.pms.len();
        trace!("random decoder: pipeline {} of {}", index, self.pms.len());
        self.pms[index].run(b)
    }
}
