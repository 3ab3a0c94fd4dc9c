//! Biquad (bi-quadratic) coefficient design.
//!
//! Second-order sections designed with the RBJ Audio EQ Cookbook formulas:
//! the analog prototype is mapped to the z-plane with the bilinear transform,
//! pre-warped so the design frequency lands exactly where requested.
//!
//! The resulting difference equation (Direct Form I) is
//!
//! ```text
//! y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
//!                - a1*y[n-1] - a2*y[n-2]
//! ```
//!
//! Coefficient functions return the raw `(b0, b1, b2, a0, a1, a2)` tuple;
//! [`CoefficientSet::new`] normalizes by `a0`.

use core::f64::consts::PI;
use libm::{cos, sin};

use crate::calculator::{CoefficientCalculator, FilterSpec};
use crate::coefficients::CoefficientSet;
use crate::error::Result;

/// Highest design frequency as a fraction of the sample rate.
///
/// Requests at or above this are clamped down to it.
pub const MAX_FREQUENCY_RATIO: f64 = 0.49;

/// Biquad filter family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterFamily {
    /// 12 dB/oct lowpass.
    Lowpass,
    /// 12 dB/oct highpass.
    Highpass,
    /// Bandpass with constant 0 dB peak gain.
    Bandpass,
    /// Band-reject.
    Notch,
}

impl FilterFamily {
    /// All families, in display order.
    pub const ALL: [FilterFamily; 4] = [
        FilterFamily::Lowpass,
        FilterFamily::Highpass,
        FilterFamily::Bandpass,
        FilterFamily::Notch,
    ];

    /// Lowercase identifier ("lowpass", "highpass", ...).
    pub fn name(self) -> &'static str {
        match self {
            FilterFamily::Lowpass => "lowpass",
            FilterFamily::Highpass => "highpass",
            FilterFamily::Bandpass => "bandpass",
            FilterFamily::Notch => "notch",
        }
    }

    /// Look up a family by its identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|family| family.name() == name)
    }

    /// Raw `(b0, b1, b2, a0, a1, a2)` coefficients for this family.
    pub fn coefficients(
        self,
        frequency: f64,
        q: f64,
        sample_rate: f64,
    ) -> (f64, f64, f64, f64, f64, f64) {
        match self {
            FilterFamily::Lowpass => lowpass_coefficients(frequency, q, sample_rate),
            FilterFamily::Highpass => highpass_coefficients(frequency, q, sample_rate),
            FilterFamily::Bandpass => bandpass_coefficients(frequency, q, sample_rate),
            FilterFamily::Notch => notch_coefficients(frequency, q, sample_rate),
        }
    }
}

/// Calculator for one biquad family driven by a [`FilterSpec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCalculator {
    family: FilterFamily,
    spec: FilterSpec,
}

impl BiquadCalculator {
    /// Create a calculator for `family` with the given design parameters.
    pub fn new(family: FilterFamily, spec: FilterSpec) -> Self {
        Self { family, spec }
    }

    /// Lowpass calculator.
    pub fn lowpass(spec: FilterSpec) -> Self {
        Self::new(FilterFamily::Lowpass, spec)
    }

    /// Highpass calculator.
    pub fn highpass(spec: FilterSpec) -> Self {
        Self::new(FilterFamily::Highpass, spec)
    }

    /// The filter family.
    pub fn family(&self) -> FilterFamily {
        self.family
    }

    /// Design frequency actually used at `sample_rate`, after clamping below Nyquist.
    pub fn effective_frequency(&self, sample_rate: f64) -> f64 {
        self.spec.frequency().min(sample_rate * MAX_FREQUENCY_RATIO)
    }
}

impl CoefficientCalculator for BiquadCalculator {
    fn calculate(&self, sample_rate: f64) -> Result<CoefficientSet> {
        let frequency = self.effective_frequency(sample_rate);
        #[cfg(feature = "tracing")]
        if frequency < self.spec.frequency() {
            tracing::warn!(
                filter = self.family.name(),
                requested = self.spec.frequency(),
                clamped = frequency,
                sample_rate,
                "filter frequency above Nyquist limit, clamping"
            );
        }

        let (b0, b1, b2, a0, a1, a2) = self.family.coefficients(frequency, self.spec.q(), sample_rate);
        CoefficientSet::new(vec![b0, b1, b2], vec![a0, a1, a2], sample_rate)
    }

    fn name(&self) -> &'static str {
        self.family.name()
    }

    fn spec(&self) -> Option<FilterSpec> {
        Some(self.spec)
    }
}

/// Angular frequency and `alpha` shared by every cookbook design.
#[inline]
fn prewarp(frequency: f64, q: f64, sample_rate: f64) -> (f64, f64) {
    let omega = 2.0 * PI * frequency / sample_rate;
    (cos(omega), sin(omega) / (2.0 * q))
}

/// Calculates low-pass filter coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (typically 0.707 for Butterworth response)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn lowpass_coefficients(
    frequency: f64,
    q: f64,
    sample_rate: f64,
) -> (f64, f64, f64, f64, f64, f64) {
    let (cos_omega, alpha) = prewarp(frequency, q, sample_rate);

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates high-pass filter coefficients using the RBJ cookbook formula.
///
/// Same arguments and return layout as [`lowpass_coefficients`].
pub fn highpass_coefficients(
    frequency: f64,
    q: f64,
    sample_rate: f64,
) -> (f64, f64, f64, f64, f64, f64) {
    let (cos_omega, alpha) = prewarp(frequency, q, sample_rate);

    let b0 = (1.0 + cos_omega) / 2.0;
    let b1 = -(1.0 + cos_omega);
    let b2 = (1.0 + cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates band-pass filter coefficients using the RBJ cookbook formula.
///
/// This version has constant 0dB peak gain; bandwidth is `frequency / q`.
pub fn bandpass_coefficients(
    frequency: f64,
    q: f64,
    sample_rate: f64,
) -> (f64, f64, f64, f64, f64, f64) {
    let (cos_omega, alpha) = prewarp(frequency, q, sample_rate);

    let b0 = alpha;
    let b1 = 0.0;
    let b2 = -alpha;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates notch (band-reject) filter coefficients using the RBJ cookbook formula.
pub fn notch_coefficients(
    frequency: f64,
    q: f64,
    sample_rate: f64,
) -> (f64, f64, f64, f64, f64, f64) {
    let (cos_omega, alpha) = prewarp(frequency, q, sample_rate);

    let b0 = 1.0;
    let b1 = -2.0 * cos_omega;
    let b2 = 1.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}
