//! Seedable random source for combat rolls.
//!
//! Every stochastic decision in a fire tick (face roll, crit roll, multicast
//! chain) draws from a [`DiceRng`]. Hosts inject the implementation, which
//! keeps simulations replayable and lets tests script exact outcomes.

/// Random source consumed by the fire resolution pipeline.
pub trait DiceRng: Send {
    /// Generate the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform float in `[0, 1)`.
    ///
    /// Uses the top 24 bits so every value is exactly representable.
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Roll a die with N sides (1-N inclusive), every face equally likely.
    ///
    /// Raw values below `2^32 mod sides` are redrawn so the modulo is unbiased.
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides <= 1 {
            return 1;
        }
        let threshold = sides.wrapping_neg() % sides;
        loop {
            let raw = self.next_u32();
            if raw >= threshold {
                return raw % sides + 1;
            }
        }
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output. Same seed, same
/// sequence.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        // One warm-up step so that nearby seeds diverge immediately.
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.step();
        rng
    }

    /// Advance the LCG state: `state' = state × multiplier + increment (mod 2^64)`.
    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for PcgRng {
    fn default() -> Self {
        Self::seeded(0)
    }
}

impl DiceRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }
}
