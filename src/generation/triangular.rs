use anyhow::{Result, anyhow};
use rand::Rng;
use std::fmt::Display;

/// A triangular distribution over `[min, max]` peaking at `mode`, used to draw bounded counts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangularRange {
    pub min: f64,
    pub mode: f64,
    pub max: f64,
}

impl TriangularRange {
    pub fn new(min: f64, mode: f64, max: f64) -> Self {
        Self { min, mode, max }
    }

    pub fn fixed(value: f64) -> Self {
        Self::new(value, value, value)
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.mode.is_finite() || !self.max.is_finite() {
            return Err(anyhow!("{} must have finite bounds, found {}", name, self));
        }
        if self.min < 0.0 {
            return Err(anyhow!("{} must not be negative, found {}", name, self));
        }
        if self.min > self.max {
            return Err(anyhow!(
                "{} has a minimum larger than its maximum: {}",
                name,
                self
            ));
        }
        if self.mode < self.min || self.mode > self.max {
            return Err(anyhow!(
                "{} has a mode outside of [minimum, maximum]: {}",
                name,
                self
            ));
        }
        if self.min.ceil() > self.max.floor() {
            return Err(anyhow!(
                "{} does not contain a whole number: {}",
                name,
                self
            ));
        }
        Ok(())
    }

    /// Lowers the maximum to `cap`, pulling the mode and minimum along where they would exceed it.
    pub fn capped_at(&self, cap: f64) -> Self {
        let max = self.max.min(cap);
        Self {
            min: self.min.min(max),
            mode: self.mode.min(max),
            max,
        }
    }

    /// Draws a real value by inverting the cumulative distribution function.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let mut u: f64 = rng.r#gen();
        if self.max == self.min {
            return self.min;
        }
        let (mut low, mut high) = (self.min, self.max);
        let mut c = (self.mode - self.min) / (self.max - self.min);
        if u > c {
            u = 1.0 - u;
            c = 1.0 - c;
            std::mem::swap(&mut low, &mut high);
        }
        low + (high - low) * (u * c).sqrt()
    }

    /// Draws a value and rounds it to the nearest count within `[min, max]`.
    pub fn sample_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let value = self
            .sample(rng)
            .round()
            .max(self.min.ceil())
            .min(self.max.floor());
        if value <= 0.0 { 0 } else { value as usize }
    }
}

impl Display for TriangularRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "triangular(min {}, mode {}, max {})",
            self.min, self.mode, self.max
        )
    }
}
