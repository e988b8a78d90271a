// src/pass/mod.rs
//! Reversible byte-stream passes built on the swap engine.
//!
//! A [`Pass`] transforms an [`IoVec`] in place. Passes are chained into a
//! [`PassManager`]; a pack pipeline and its mirror-image unpack pipeline are
//! assembled together with a [`PackUnpackBuilder`].
//!
//! - [`ObfsEncoder`] / [`ObfsDecoder`] - reverse the whole payload
//! - [`TailPaddingEncoder`] / [`TailPaddingDecoder`] - random length trailer
//! - [`RandomEncoder`] / [`RandomDecoder`] - pick one of several pipelines per message
//!
//! # Example
//!
//! ```
//! use bxswap::pass::*;
//!
//! let mut builder = PackUnpackBuilder::new();
//! builder.add_paired_passes(TailPaddingEncoder::new(), TailPaddingDecoder::new());
//! builder.add_paired_passes(ObfsEncoder::new(), ObfsDecoder::new());
//!
//! let mut pack = builder.build_pack();
//! let mut unpack = builder.build_unpack();
//!
//! let mut v = IoVec::from(b"payload".to_vec());
//! pack.run(&mut v).unwrap();
//! unpack.run(&mut v).unwrap();
//! assert_eq!(&v.consume()[..], b"payload");
//! ```

mod iovec;
mod obfs;
mod padding;
mod random;

pub use iovec::IoVec;
pub use obfs::{FastObfs, ObfsDecoder, ObfsEncoder};
pub use padding::{TailPaddingDecoder, TailPaddingEncoder, MAX_TAIL_PADDING};
pub use random::{RandomDecoder, RandomEncoder};

use std::sync::Arc;
use log::{debug, trace};
use parking_lot::Mutex;
use crate::error::Result;

/// A transformation applied to an [`IoVec`].
pub trait Pass: Send {
    fn run(&mut self, b: &mut IoVec) -> Result<()>;

    /// Name used in log output
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<P: Pass + ?Sized> Pass for Box<P> {
    fn run(&mut self, b: &mut IoVec) -> Result<()> {
        (**self).run(b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Adapter turning a closure into a [`Pass`].
///
/// ```
/// use bxswap::pass::{pass_fn, IoVec, Pass};
///
/// let mut append = pass_fn(|b: &mut IoVec| {
///     b.take_slice(b"!");
///     Ok(())
/// });
///
/// let mut v = IoVec::from(b"hi".to_vec());
/// append.run(&mut v).unwrap();
/// assert_eq!(&v.consume()[..], b"hi!");
/// ```
pub struct FnPass<F>(F);

pub fn pass_fn<F>(f: F) -> FnPass<F>
where
    F: FnMut(&mut IoVec) -> Result<()> + Send,
{
    FnPass(f)
}

impl<F> Pass for FnPass<F>
where
    F: FnMut(&mut IoVec) -> Result<()> + Send,
{
    fn run(&mut self, b: &mut IoVec) -> Result<()> {
        (self.0)(b)
    }
}

/// Ordered sequence of passes.
///
/// [`run`](PassManager::run) applies the passes in insertion order and stops
/// at the first failure.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_passes(passes: Vec<Box<dyn Pass>>) -> Self {
        PassManager { passes }
    }

    pub fn add_pass(&mut self, pass: impl Pass + 'static) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn run(&mut self, b: &mut IoVec) -> Result<()> {
        let total = self.passes.len();
        for (i, pass) in self.passes.iter_mut().enumerate() {
            trace!("pass {}/{} ({}) on {} bytes", i + 1, total, pass.name(), b.len());
            if let Err(err) = pass.run(b) {
                debug!("pass {} failed: {}", pass.name(), err);
                return Err(err);
            }
        }
        Ok(())
    }
}

impl Pass for PassManager {
    fn run(&mut self, b: &mut IoVec) -> Result<()> {
        PassManager::run(self, b)
    }
}

impl std::fmt::Debug for PassManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.passes.iter().map(|p| p.name()))
            .finish()
    }
}

/// Collects encode/decode pairs and builds matching pipelines.
///
/// The unpack pipeline runs the decoders in reverse registration order, so
/// it undoes the pack pipeline step by step. Each `build_*` call moves the
/// collected passes out of the builder.
#[derive(Default)]
pub struct PackUnpackBuilder {
    pack: Vec<Box<dyn Pass>>,
    unpack: Vec<Box<dyn Pass>>,
}

impl PackUnpackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_paired_passes(
        &mut self,
        pack: impl Pass + 'static,
        unpack: impl Pass + 'static,
    ) -> &mut Self {
        self.pack.push(Box::new(pack));
        self.unpack.push(Box::new(unpack));
        self
    }

    pub fn build_pack(&mut self) -> PassManager {
        PassManager::from_passes(std::mem::take(&mut self.pack))
    }

    pub fn build_unpack(&mut self) -> PassManager {
        let mut passes = std::mem::take(&mut self.unpack);
        passes.reverse();
        PassManager::from_passes(passes)
    }
}

/// A pass shared between owners, runs serialised by a mutex.
pub struct SyncPass<P> {
    inner: Arc<Mutex<P>>,
}

impl<P: Pass> SyncPass<P> {
    pub fn new(pass: P) -> Self {
        SyncPass {
            inner: Arc::new(Mutex::new(pass)),
        }
    }

    pub fn from_shared(inner: Arc<Mutex<P>>) -> Self {
        SyncPass { inner }
    }
}

impl<P> Clone for SyncPass<P> {
    fn clone(&self) -> Self {
        SyncPass {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Pass> Pass for SyncPass<P> {
    fn run(&mut self, b: &mut IoVec) -> Result<()> {
        self.inner.lock().run(b)
    }

    fn name(&self) -> &'static str {
        self.inner.lock().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwapError;

    fn append(byte: u8) -> impl Pass {
        pass_fn(move |b: &mut IoVec| {
            b.take_slice(&[byte]);
            Ok(())
        })
    }

    fn strip(expected: u8) -> impl Pass {
        pass_fn(move |b: &mut IoVec| {
            let last = b.last_byte()?;
            if last != expected {
                return Err(SwapError::Pass(format!(
                    "expected trailer {}, found {}",
                    expected, last
                )));
            }
            b.drop_tail(1)
        })
    }

    #[test]
    fn test_manager_runs_in_order() {
        let mut pm = PassManager::new();
        pm.add_pass(append(1)).add_pass(append(2)).add_pass(append(3));
        assert_eq!(pm.len(), 3);

        let mut v = IoVec::new();
        pm.run(&mut v).unwrap();
        assert_eq!(&v.consume()[..], &[1, 2, 3]);
    }

    #[test]
    fn test_manager_stops_at_first_error() {
        let mut pm = PassManager::new();
        pm.add_pass(append(1))
            .add_pass(strip(9))
            .add_pass(append(2));

        let mut v = IoVec::new();
        let result = pm.run(&mut v);

        assert!(matches!(result, Err(SwapError::Pass(_))));
        assert_eq!(&v.consume()[..], &[1]);
    }

    #[test]
    fn test_empty_manager_is_identity() {
        let mut pm = PassManager::new();
        assert!(pm.is_empty());

        let mut v = IoVec::from(vec![5u8, 6]);
        pm.run(&mut v).unwrap();
        assert_eq!(&v.consume()[..], &[5, 6]);
    }

    #[test]
    fn test_builder_reverses_unpack_order() {
        let mut builder = PackUnpackBuilder::new();
        builder
            .add_paired_passes(append(1), strip(1))
            .add_paired_passes(append(2), strip(2))
            .add_paired_passes(append(3), strip(3));

        let mut pack = builder.build_pack();
        let mut unpack = builder.build_unpack();

        let mut v = IoVec::from(vec![0xAAu8]);
        pack.run(&mut v).unwrap();
        assert_eq!(v.len(), 4);

        unpack.run(&mut v).unwrap();
        assert_eq!(&v.consume()[..], &[0xAA]);
    }

    #[test]
    fn test_builder_drains() {
        let mut builder = PackUnpackBuilder::new();
        builder.add_paired_passes(append(1), strip(1));

        assert_eq!(builder.build_pack().len(), 1);
        assert!(builder.build_pack().is_empty());
    }

    #[test]
    fn test_nested_manager() {
        let mut inner = PassManager::new();
        inner.add_pass(append(7));

        let mut outer = PassManager::new();
        outer.add_pass(inner).add_pass(append(8));

        let mut v = IoVec::new();
        outer.run(&mut v).unwrap();
        assert_eq!(&v.consume()[..], &[7, 8]);
    }

    #[test]
    fn test_sync_pass_shared_across_threads() {
        let counter = SyncPass::new(append(1));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mut pass = counter.clone();
                std::thread::spawn(move || {
                    let mut v = IoVec::new();
                    for _ in 0..10 {
                        pass.run(&mut v).unwrap();
                    }
                    v.len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 10);
        }
    }

    #[test]
    fn test_debug_lists_pass_names() {
        let mut pm = PassManager::new();
        pm.add_pass(ObfsEncoder::new());

        let debug_str = format!("{:?}", pm);
        assert!(debug_str.contains("ObfsEncoder"));
    }
}
