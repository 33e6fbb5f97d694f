use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Decorative randomness (phase offsets, confetti colours, earned-date copy).
/// Not for anything security related.
#[derive(Clone, Debug)]
pub struct PhaseRng {
    inner: SmallRng,
}

impl PhaseRng {
    pub fn seeded(seed: u64) -> Self {
        Self { inner: SmallRng::seed_from_u64(seed) }
    }

    /// Seed from the browser RNG when the `rng` feature is on, else from the clock.
    pub fn from_entropy() -> Self {
        #[cfg(feature = "rng")]
        {
            let mut buf = [0u8; 8];
            if getrandom::getrandom(&mut buf).is_ok() {
                return Self::seeded(u64::from_le_bytes(buf));
            }
            log::warn!("getrandom unavailable, seeding from the clock");
        }
        Self::seeded((crate::performance_now() * 1000.0) as u64)
    }
}

impl RngCore for PhaseRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.inner.fill_bytes(dst)
    }
}
