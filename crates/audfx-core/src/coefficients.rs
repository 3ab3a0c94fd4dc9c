//! Recursive filter coefficients.
//!
//! A [`CoefficientSet`] holds the transfer function
//!
//! ```text
//!         b[0] + b[1]·z⁻¹ + … + b[M]·z⁻ᴹ
//! H(z) = ─────────────────────────────────
//!          1   + a[1]·z⁻¹ + … + a[N]·z⁻ᴺ
//! ```
//!
//! together with the sample rate it was designed for. The leading feedback
//! coefficient is always exactly 1.

use core::f64::consts::TAU;

use libm::{cos, sin, sqrt};

use crate::error::{Error, Result};

/// Feed-forward and feedback coefficients for one sample rate.
///
/// # Invariants
///
/// - `feedforward` and `feedback` are non-empty
/// - `feedback[0] == 1.0`
/// - every coefficient is finite
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientSet {
    feedforward: Vec<f64>,
    feedback: Vec<f64>,
    sample_rate: f64,
}

impl CoefficientSet {
    /// Build a coefficient set, normalizing every coefficient by `feedback[0]`.
    pub fn new(feedforward: Vec<f64>, feedback: Vec<f64>, sample_rate: f64) -> Result<Self> {
        if feedforward.is_empty() {
            return Err(Error::invalid_parameter("feedforward", "must not be empty"));
        }
        let Some(&a0) = feedback.first() else {
            return Err(Error::invalid_parameter("feedback", "must not be empty"));
        };
        if a0 == 0.0 || !a0.is_finite() {
            return Err(Error::invalid_parameter(
                "feedback",
                format!("leading coefficient must be finite and non-zero, got {a0}"),
            ));
        }
        if feedforward.iter().chain(&feedback).any(|c| !c.is_finite()) {
            return Err(Error::invalid_parameter("coefficients", "must all be finite"));
        }

        let a0_inv = 1.0 / a0;
        let feedforward: Vec<f64> = feedforward.into_iter().map(|b| b * a0_inv).collect();
        let mut feedback: Vec<f64> = feedback.into_iter().map(|a| a * a0_inv).collect();
        feedback[0] = 1.0;
        if feedforward.iter().chain(&feedback).any(|c| !c.is_finite()) {
            return Err(Error::invalid_parameter(
                "coefficients",
                format!("overflow after normalizing by {a0}"),
            ));
        }

        Ok(Self {
            feedforward,
            feedback,
            sample_rate,
        })
    }

    /// Coefficients applied to the current and past inputs, `b[0]` first.
    pub fn feedforward(&self) -> &[f64] {
        &self.feedforward
    }

    /// Coefficients applied to past outputs, `a[0] == 1` first.
    pub fn feedback(&self) -> &[f64] {
        &self.feedback
    }

    /// Sample rate in Hz these coefficients were designed for.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Filter order: the longest lag referenced by either sequence.
    pub fn order(&self) -> usize {
        self.feedforward.len().max(self.feedback.len()) - 1
    }

    /// Copy of this set tagged with another sample rate.
    pub(crate) fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Magnitude response |H(e^jω)| at `frequency` Hz.
    pub fn magnitude_at(&self, frequency: f64) -> f64 {
        let w = TAU * frequency / self.sample_rate;
        let (num_re, num_im) = evaluate(&self.feedforward, w);
        let (den_re, den_im) = evaluate(&self.feedback, w);
        sqrt(num_re * num_re + num_im * num_im) / sqrt(den_re * den_re + den_im * den_im)
    }
}

/// Evaluate Σ c[k]·e^(−jωk).
fn evaluate(coeffs: &[f64], w: f64) -> (f64, f64) {
    coeffs
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(re, im), (k, &c)| {
            let phase = w * k as f64;
            (re + c * cos(phase), im - c * sin(phase))
        })
}
