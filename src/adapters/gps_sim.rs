//! Simulated GPS: a fixed reference point plus small random jitter.
//!
//! Each reading adds `(r % 1000) / 100_000` degrees to both axes, so fixes
//! land in `[ref, ref + 0.00999]` on a 0.00001° grid.  The generator is a
//! seeded xorshift32, deterministic for a given seed.

use log::debug;

use crate::app::model::Coordinates;
use crate::app::ports::LocationPort;

/// Jitter steps per axis.
const JITTER_STEPS: u32 = 1_000;
/// Degrees per jitter step.
const JITTER_SCALE: f64 = 100_000.0;

/// Any non-zero value works; zero would lock xorshift at zero.
const FALLBACK_SEED: u32 = 0x9E37_79B9;

pub struct SimulatedGps {
    reference: Coordinates,
    state: u32,
}

impl SimulatedGps {
    pub fn new(reference: Coordinates, seed: u32) -> Self {
        Self {
            reference,
            state: if seed == 0 { FALLBACK_SEED } else { seed },
        }
    }

    fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    fn jitter(&mut self) -> f64 {
        f64::from(self.next() % JITTER_STEPS) / JITTER_SCALE
    }
}

impl LocationPort for SimulatedGps {
    fn read(&mut self) -> Coordinates {
        let latitude = self.reference.latitude + self.jitter();
        let longitude = self.reference.longitude + self.jitter();
        let fix = Coordinates::new(latitude, longitude);
        debug!("GPS | fix {}", fix);
        fix
    }
}
