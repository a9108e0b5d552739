//! Injectable randomness: every draw in the simulation (arrivals, tie-breaks, unload
//! counts, destinations, pauses) goes through [`RandomSource`].

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform integer in `low..=high`. Callers guarantee `low <= high`.
    fn uniform(&mut self, low: u32, high: u32) -> u32;

    /// Uniform index into a non-empty slice of length `len`.
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on empty candidate list");
        let high = u32::try_from(len.saturating_sub(1)).unwrap_or(u32::MAX);
        self.uniform(0, high) as usize
    }
}

/// Random source shared by all agents of one run.
pub type SharedRandom = Rc<RefCell<dyn RandomSource>>;

/// `StdRng`-backed source. Seeded runs are reproducible under tokio's paused clock.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn shared(seed: Option<u64>) -> SharedRandom {
        Rc::new(RefCell::new(Self::new(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}
