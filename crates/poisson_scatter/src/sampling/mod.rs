//! Poisson-disk sampling and the random helpers it draws from.
//!
//! All randomness flows through a caller-provided [`RngCore`], so a run is a pure
//! function of its seed.
use rand::RngCore;

pub mod poisson;

pub use poisson::{generate, PoissonSampler, SampleRun};

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    // 24 bits keep the quotient strictly below 1.0 after rounding to f32.
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

/// Generate a random index in the range [0, len). `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rng.next_u32() as u64 * len as u64) >> 32) as usize
}

/// Compute the next smaller representable float value.
///
/// Returns a value that is strictly less than the input, useful for
/// ensuring bounds are strictly inside a domain.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() || val == f32::NEG_INFINITY {
        return val;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::from_bits(1);
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits - 1)
    } else {
        f32::from_bits(bits + 1)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed sequence of raw `u32` draws, cycling when exhausted.
    pub(crate) struct SequenceRng {
        values: Vec<u32>,
        pos: usize,
    }

    impl SequenceRng {
        pub(crate) fn new(values: Vec<u32>) -> Self {
            Self { values, pos: 0 }
        }

        /// Raw draw that makes [`rand01`] return approximately `u`.
        pub(crate) fn unit(u: f32) -> u32 {
            ((u.clamp(0.0, 1.0) * (1u32 << 24) as f32) as u32).min((1 << 24) - 1) << 8
        }
    }

    impl RngCore for SequenceRng {
        fn next_u32(&mut self) -> u32 {
            let v = self.values[self.pos % self.values.len()];
            self.pos += 1;
            v
        }

        fn next_u64(&mut self) -> u64 {
            self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    #[test]
    fn rand01_stays_below_one() {
        for value in [0, 1, 255, 256, u32::MAX / 2, u32::MAX - 1, u32::MAX] {
            let mut rng = SequenceRng::new(vec![value]);
            let result = rand01(&mut rng);
            assert!(
                (0.0..1.0).contains(&result),
                "rand01({value}) = {result} is out of range [0,1)"
            );
        }
    }

    #[test]
    fn rand01_hits_requested_unit_values() {
        let mut rng = SequenceRng::new(vec![SequenceRng::unit(0.25), SequenceRng::unit(0.5)]);
        assert!((rand01(&mut rng) - 0.25).abs() < 1e-6);
        assert!((rand01(&mut rng) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rand_index_covers_range() {
        let mut rng = SequenceRng::new(vec![0, u32::MAX / 2, u32::MAX]);
        assert_eq!(rand_index(&mut rng, 10), 0);
        assert_eq!(rand_index(&mut rng, 10), 4);
        assert_eq!(rand_index(&mut rng, 10), 9);

        let mut rng = SequenceRng::new(vec![u32::MAX]);
        assert_eq!(rand_index(&mut rng, 1), 0);
    }

    #[test]
    fn next_down_handles_edge_cases() {
        assert!(next_down(1.0) < 1.0);
        assert!(next_down(100.0) < 100.0);
        assert!(next_down(0.0) < 0.0);
        assert!(next_down(-1.0) < -1.0);
        assert_eq!(next_down(f32::INFINITY), f32::MAX);
        assert_eq!(next_down(f32::NEG_INFINITY), f32::NEG_INFINITY);
        assert!(next_down(f32::NAN).is_nan());
    }
}
