//! Random sampling helpers and the per-entity seeded generator

use rand::Rng;

/// Uniform float in `[a, b)`
///
/// Unlike `Rng::random_range`, a degenerate range (`a == b`) returns `a`.
#[inline]
pub fn range<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    a + rng.random::<f32>() * (b - a)
}

/// Uniform integer in `[a, b]` (inclusive)
#[inline]
pub fn range_int<R: Rng + ?Sized>(rng: &mut R, a: i32, b: i32) -> i32 {
    if b <= a {
        return a;
    }
    rng.random_range(a..=b)
}

/// Bernoulli draw with probability `p`
#[inline]
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.random_bool(p.clamp(0.0, 1.0))
}

/// Small xorshift generator keyed by an entity seed
///
/// Gives each platform its own stable sub-variation (outline jitter and the
/// like) without touching the world RNG stream.
#[derive(Debug, Clone)]
pub struct SeedRng {
    state: u32,
}

impl SeedRng {
    pub fn new(seed: u32) -> Self {
        // Xorshift has a fixed point at zero
        let state = seed.wrapping_mul(2_654_435_761).max(1);
        Self { state }
    }

    /// Next value in `[0, 1]`
    pub fn next_f32(&mut self) -> f32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        (s as f64 / u32::MAX as f64) as f32
    }
}
