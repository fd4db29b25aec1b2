//! Pluggable baseline policy for priority scoring.
//!
//! Scoring starts from a baseline in [0, 100) and adds keyword and
//! deadline bonuses on top. The original product drew that baseline from
//! an unseeded uniform distribution, which makes repeated
//! reprioritization of an unchanged task set produce different absolute
//! scores each run. That behavior is preserved as [`BaselinePolicy::Random`]
//! (the default), with deterministic alternatives for reproducible runs
//! and tests.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Strategy for the priority-score baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum BaselinePolicy {
    /// Unseeded uniform draw in [0, 100) per scored task.
    Random,
    /// A constant baseline; scores become a pure function of task content
    /// and deadline.
    Fixed(f64),
    /// Seeded uniform draws: jittered like `Random`, but reproducible for
    /// a given seed.
    Seeded(u64),
}

impl Default for BaselinePolicy {
    fn default() -> Self {
        BaselinePolicy::Random
    }
}

impl std::fmt::Display for BaselinePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaselinePolicy::Random => write!(f, "random"),
            BaselinePolicy::Fixed(value) => write!(f, "fixed:{}", value),
            BaselinePolicy::Seeded(seed) => write!(f, "seeded:{}", seed),
        }
    }
}

impl std::str::FromStr for BaselinePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        if lower == "random" {
            return Ok(BaselinePolicy::Random);
        }
        if let Some(value) = lower.strip_prefix("fixed:") {
            let value: f64 = value
                .parse()
                .map_err(|_| format!("Invalid fixed baseline value: {}", value))?;
            if !(0.0..100.0).contains(&value) {
                return Err(format!("Fixed baseline out of range [0, 100): {}", value));
            }
            return Ok(BaselinePolicy::Fixed(value));
        }
        if let Some(seed) = lower.strip_prefix("seeded:") {
            let seed: u64 = seed
                .parse()
                .map_err(|_| format!("Invalid baseline seed: {}", seed))?;
            return Ok(BaselinePolicy::Seeded(seed));
        }
        Err(format!(
            "Unknown baseline policy: {} (expected random, fixed:<value>, or seeded:<seed>)",
            s
        ))
    }
}

impl BaselinePolicy {
    /// Build the sampler backing this policy.
    pub(crate) fn sampler(&self) -> BaselineSampler {
        match self {
            BaselinePolicy::Random => BaselineSampler::Random,
            BaselinePolicy::Fixed(value) => BaselineSampler::Fixed(*value),
            BaselinePolicy::Seeded(seed) => {
                BaselineSampler::Seeded(Mutex::new(StdRng::seed_from_u64(*seed)))
            }
        }
    }
}

/// Stateful sampler constructed once per engine.
pub(crate) enum BaselineSampler {
    Random,
    Fixed(f64),
    Seeded(Mutex<StdRng>),
}

impl BaselineSampler {
    /// Draw the next baseline value in [0, 100).
    pub(crate) fn sample(&self) -> f64 {
        match self {
            BaselineSampler::Random => rand::thread_rng().gen_range(0.0..100.0),
            BaselineSampler::Fixed(value) => *value,
            BaselineSampler::Seeded(rng) => match rng.lock() {
                Ok(mut rng) => rng.gen_range(0.0..100.0),
                // A poisoned lock means a panic mid-sample; fall back to
                // an unseeded draw rather than propagating the panic.
                Err(_) => rand::thread_rng().gen_range(0.0..100.0),
            },
        }
    }
}
