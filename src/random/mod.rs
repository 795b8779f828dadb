//! # Random Number Generation
//!
//! [`RandomSource`] bundles the generators used for parameter sampling:
//!
//! - a shared stream (`uniform`, `normal`) driven by a single seedable engine,
//! - a separate fast single-precision generator (`fast_uniform`),
//! - seed-selected array fills that never touch either of the above.
//!
//! Every thread has one lazily created default instance reachable through
//! [`with_instance`]. It is seeded from system entropy on first use unless
//! [`set_seed`] is called first. Independent instances can be created freely
//! with [`RandomSource::new`] or [`RandomSource::from_seed`].
//!
//! ```
//! use fitmin_rs::random::{AlignedBuffer, RandomSource};
//!
//! let mut rng = RandomSource::from_seed(7);
//! let u = rng.uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! let mut a = AlignedBuffer::<f64>::zeroed(16).unwrap();
//! let mut b = AlignedBuffer::<f64>::zeroed(16).unwrap();
//! RandomSource::fill_array_uniform(&mut a, 16, 99).unwrap();
//! rng.normal();
//! RandomSource::fill_array_uniform(&mut b, 16, 99).unwrap();
//! assert_eq!(&a[..], &b[..]);
//! ```

mod aligned;

pub use aligned::{allocate_aligned_array, AlignedBuffer, AlignedElement, ARRAY_ALIGNMENT};

use std::cell::RefCell;

use rand::distributions::Standard;
use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::error::{FitMinError, Result};

/// Mixed into the seed of the fast generator so that it never mirrors the
/// shared stream for the same user seed.
const FAST_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// A source of uniform and Gaussian pseudo-random numbers.
///
/// Not synchronized: an instance must not be shared between threads without
/// external locking.
#[derive(Debug, Clone)]
pub struct RandomSource {
    generator: StdRng,
    fast: SmallRng,
}

impl RandomSource {
    /// Creates a source seeded from system entropy.
    pub fn new() -> Self {
        Self {
            generator: StdRng::from_entropy(),
            fast: SmallRng::from_entropy(),
        }
    }

    /// Creates a source whose draws are a deterministic function of `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            generator: StdRng::seed_from_u64(seed),
            fast: SmallRng::seed_from_u64(seed ^ FAST_SEED_MIX),
        }
    }

    /// Reinitializes both engines from `seed`.
    pub fn set_seed(&mut self, seed: u64) {
        log::trace!("reseeding random source with {}", seed);
        *self = Self::from_seed(seed);
    }

    /// Returns a double-precision value uniformly sampled from [0,1).
    pub fn uniform(&mut self) -> f64 {
        self.generator.sample(Standard)
    }

    /// Returns a double-precision value with mean 0 and RMS 1.
    pub fn normal(&mut self) -> f64 {
        self.generator.sample(StandardNormal)
    }

    /// Returns a single-precision value uniformly sampled from [0,1) using the
    /// fast generator, which is independent of the `uniform`/`normal` stream.
    pub fn fast_uniform(&mut self) -> f32 {
        self.fast.sample(Standard)
    }

    /// The engine behind `uniform` and `normal`, for use with other
    /// distributions.
    pub fn generator(&mut self) -> &mut StdRng {
        &mut self.generator
    }

    /// Fills the first `size` elements of `array` with values uniformly
    /// sampled from [0,1) using a stream selected by `seed` alone.
    ///
    /// Identical `seed` and `size` always give identical contents, whatever
    /// else has been drawn from any `RandomSource`. Elements past `size` are
    /// left untouched; a `size` beyond the buffer is an error.
    pub fn fill_array_uniform(array: &mut AlignedBuffer<f64>, size: usize, seed: u64) -> Result<()> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for x in fill_prefix(array, size)? {
            *x = rng.sample(Standard);
        }
        Ok(())
    }

    /// Fills the first `size` elements of `array` with normal values of mean
    /// 0 and RMS 1 using a stream selected by `seed` alone.
    pub fn fill_array_normal(array: &mut AlignedBuffer<f32>, size: usize, seed: u64) -> Result<()> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for x in fill_prefix(array, size)? {
            *x = rng.sample(StandardNormal);
        }
        Ok(())
    }
}

fn fill_prefix<T: AlignedElement>(array: &mut AlignedBuffer<T>, size: usize) -> Result<&mut [T]> {
    if size > array.len() {
        return Err(FitMinError::DimensionMismatch(format!(
            "cannot fill {} elements of a buffer of {}",
            size,
            array.len()
        )));
    }
    Ok(&mut array[..size])
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static INSTANCE: RefCell<RandomSource> = RefCell::new(RandomSource::new());
}

/// Runs `f` with this thread's shared [`RandomSource`].
///
/// Each thread has its own shared instance: [`set_seed`] on one thread does
/// not reseed, or otherwise affect, the instance seen by any other thread.
///
/// # Panics
///
/// Panics if called re-entrantly from inside `f`.
pub fn with_instance<F, R>(f: F) -> R
where
    F: FnOnce(&mut RandomSource) -> R,
{
    INSTANCE.with(|cell| f(&mut cell.borrow_mut()))
}

/// Reseeds the shared instance.
pub fn set_seed(seed: u64) {
    with_instance(|rng| rng.set_seed(seed));
}

/// Draws a uniform value from the shared instance.
pub fn uniform() -> f64 {
    with_instance(|rng| rng.uniform())
}

/// Draws a standard normal value from the shared instance.
pub fn normal() -> f64 {
    with_instance(|rng| rng.normal())
}
