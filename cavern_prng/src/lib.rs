// Seedable pseudo-random number generator for cave generation.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding.
// Every random decision the cave generator makes (trunk heading, graft
// selection, control-point scatter) draws from a `CaveRng` that the caller
// owns and passes down explicitly. There is no global generator: two
// generations fed the same seed and the same config produce the same map.
//
// The integer core is bit-exact on every platform. The geometric helpers at
// the bottom (`unit_direction`, `inside_unit_circle`) go through `f32` trig
// and are reproducible on a given platform/toolchain, which is all the map
// generator needs.
//
// See also: `cavern_gen::bezier_map` (the main consumer), `cavern_gen::cave`
// which threads the generator through a full generation.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ PRNG: the generator's sole source of randomness.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaveRng {
    s: [u64; 4],
}

impl CaveRng {
    /// Create a new PRNG seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform `f32` in [0, 1), built from the upper 24 bits.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform `f64` in [0, 1), built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[low, high)`. Panics if `low >= high`.
    pub fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        assert!(low < high, "range_f32: low must be less than high");
        low + self.next_f32() * (high - low)
    }

    /// Uniform integer in `[low, high)`.
    ///
    /// Rejection sampling keeps the result free of modulo bias.
    /// Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }

    /// Uniform `usize` in `[low, high)`. Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    /// A unit vector `[x, y]` with a uniformly distributed heading.
    pub fn unit_direction(&mut self) -> [f32; 2] {
        let angle = self.range_f32(0.0, std::f32::consts::TAU);
        [angle.cos(), angle.sin()]
    }

    /// A point `[x, y]` uniformly distributed inside the unit disk.
    ///
    /// Rejection-samples the enclosing square; the acceptance rate is π/4, so
    /// the expected number of draws per call is below 1.3.
    pub fn inside_unit_circle(&mut self) -> [f32; 2] {
        loop {
            let x = self.range_f32(-1.0, 1.0);
            let y = self.range_f32(-1.0, 1.0);
            if x * x + y * y <= 1.0 {
                return [x, y];
            }
        }
    }
}

/// SplitMix64: used only for seeding xoshiro256++ from a single `u64`.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
