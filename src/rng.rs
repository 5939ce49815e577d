// The generator core is based on https://github.com/rust-random/rand/blob/master/rand_pcg/src/pcg64.rs, which is
//
// Copyright 2018 Developers of the Rand project.
// Copyright 2017 Paul Dicker.
// Copyright 2014-2017 Melissa O'Neill and PCG Project contributors
//
// and licensed under the MIT license.

use core::fmt;
use libm::ldexp;
use rand_core::{impls, Error, RngCore, SeedableRng};

// This is the default multiplier used by PCG for 64-bit state.
const MULTIPLIER: u64 = 0x5851f42d4c957f2d;
const INCREMENT: u64 = 0xb47c73972972b7b7;
const INITIAL_OFFSET: u64 = 0x3d657cc62bc341e;

/// The draws the generator needs from its randomness.
///
/// Any [`RngCore`] is a `RandomSource`, so callers can pass
/// `rand::thread_rng()` for throwaway logs or a [`PcgSource`] when the
/// log has to be reproducible.
pub trait RandomSource {
    /// A real number in `[min, max)`.
    fn uniform(&mut self, min: f64, max: f64) -> f64;

    /// An integer in `[min, max]`, both ends inclusive.
    fn integer_uniform(&mut self, min: i64, max: i64) -> i64;

    /// One element of `items`, or `None` when it is empty.
    fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let index = self.integer_uniform(0, items.len() as i64 - 1);
        items.get(index as usize)
    }
}

impl<R: RngCore> RandomSource for R {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        unit_interval(self) * (max - min) + min
    }

    fn integer_uniform(&mut self, min: i64, max: i64) -> i64 {
        if max > min {
            let bound = (max as u64).wrapping_sub(min as u64).wrapping_add(1);
            min.wrapping_add(bounded(self, bound) as i64)
        } else {
            min
        }
    }
}

/// Uniform in `[0, 1)` from the top 32 bits of output.
fn unit_interval<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    ldexp(rng.next_u32() as f64, -32)
}

// Rejection sampling so every value below `bound` is equally likely.
fn bounded<R: RngCore + ?Sized>(rng: &mut R, bound: u64) -> u64 {
    if bound == 0 {
        return rng.next_u64();
    }
    let threshold = bound.wrapping_neg() % bound;

    loop {
        let r = rng.next_u64();
        if r >= threshold {
            return r % bound;
        }
    }
}

/// A PCG random number generator (XSH RR 64/32 (LCG) variant).
///
/// 64 bits of state with a fixed stream increment. The same seed always
/// yields the same sequence on every platform, which is what makes a
/// purchase log replayable from its seed alone.
#[derive(Clone, PartialEq, Eq)]
pub struct PcgSource {
    state: u64,
}

impl PcgSource {
    pub fn new(seed: u64) -> Self {
        PcgSource {
            state: seed.wrapping_mul(MULTIPLIER).wrapping_sub(INITIAL_OFFSET),
        }
    }

    #[inline]
    fn step(&mut self) {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
    }
}

// Custom Debug implementation that does not expose the internal state
impl fmt::Debug for PcgSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PcgSource {{}}")
    }
}

impl RngCore for PcgSource {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let state = self.state;
        self.step();

        // Output function XSH RR: xorshift high (bits), followed by a random rotate
        const ROTATE: u32 = 59; // 64 - 5
        const XSHIFT: u32 = 18; // (5 + 32) / 2
        const SPARE: u32 = 27; // 64 - 32 - 5

        let rot = (state >> ROTATE) as u32;
        let xsh = (((state >> XSHIFT) ^ state) >> SPARE) as u32;
        xsh.rotate_right(rot)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for PcgSource {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        PcgSource::new(u64::from_le_bytes(seed))
    }

    // Skip rand_core's seed expansion so `--seed N` maps straight onto the state.
    fn seed_from_u64(state: u64) -> Self {
        PcgSource::new(state)
    }
}

/// Replays fixed draws so tests can pin down every random decision.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    fractions: Vec<f64>,
    integers: Vec<i64>,
    next_fraction: usize,
    next_integer: usize,
}

#[cfg(test)]
impl ScriptedSource {
    /// `fractions` are positions in `[0, 1)` within each uniform range;
    /// `integers` are clamped into each integer range. Both cycle.
    pub(crate) fn new(fractions: Vec<f64>, integers: Vec<i64>) -> Self {
        ScriptedSource {
            fractions,
            integers,
            next_fraction: 0,
            next_integer: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        let fraction = self.fractions[self.next_fraction % self.fractions.len()];
        self.next_fraction += 1;
        min + fraction * (max - min)
    }

    fn integer_uniform(&mut self, min: i64, max: i64) -> i64 {
        let value = self.integers[self.next_integer % self.integers.len()];
        self.next_integer += 1;
        value.clamp(min, max)
    }
}
