use rand::{Rng, SeedableRng, distr::uniform::SampleUniform, rngs::StdRng};

/// The single source of randomness shared by every generator.
///
/// Seeded once per process and carried from run to run, so a fixed seed
/// replays the same sequence of mazes.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Get a random source, optionally seeded for reproducibility.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        RandomSource { rng }
    }

    /// Uniform draw from the inclusive range `[min, max]`.
    /// A degenerate range returns `min` without touching the generator.
    pub fn irand<T>(&mut self, min: T, max: T) -> T
    where
        T: SampleUniform + PartialOrd + Copy,
    {
        if min == max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.irand(0u8, 1) == 1
    }

    /// Fisher-Yates shuffle driven by [`RandomSource::irand`].
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.irand(0, i);
            items.swap(i, j);
        }
    }
}
