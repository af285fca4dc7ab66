//! The exponential inter-arrival/execution time generator (§4.1, C1).

use rand::Rng;
use std::time::Duration;

/// One workload intensity. Determines the service rate `mu` used for execution-time
/// draws; the request-rate `lambda` is fixed at 1 (§4.1).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SimLoad {
    Low,
    Med,
    High,
}

const LAMBDA: f64 = 1.0;

impl SimLoad {
    /// `mu` for a tree of `n` nodes (§4.1): `floor(n * lambda / divisor)`.
    pub fn mu(self, n: u32) -> f64 {
        let divisor = match self {
            SimLoad::Low => 0.1,
            SimLoad::Med => 0.5,
            SimLoad::High => 0.8,
        };
        (n as f64 * LAMBDA / divisor).floor()
    }

    pub fn label(self) -> &'static str {
        match self {
            SimLoad::Low => "LOW",
            SimLoad::Med => "MED",
            SimLoad::High => "HIGH",
        }
    }
}

impl std::fmt::Display for SimLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Draws one exponential duration via the inverse-transform method: `100 * (-1/rate) *
/// ln(U)`, redrawing whenever the rounded result is zero (§4.1).
fn exponential_ms(rng: &mut impl Rng, rate: f64) -> u64 {
    loop {
        // `gen_range` keeps U strictly inside (0, 1), so `ln(U)` never diverges.
        let u: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
        let ms = (100.0 * (-1.0 / rate) * u.ln()).round();
        if ms > 0.0 {
            return ms as u64;
        }
    }
}

/// Precomputes `k` (inter_arrival, execution) pairs for one node (§3's `times` field).
pub fn generate_times(rng: &mut impl Rng, mu: f64, k: usize) -> Vec<(Duration, Duration)> {
    (0..k)
        .map(|_| {
            let iat = exponential_ms(rng, LAMBDA);
            let et = exponential_ms(rng, mu);
            (Duration::from_millis(iat), Duration::from_millis(et))
        })
        .collect()
}
