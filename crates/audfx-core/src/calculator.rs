//! Coefficient calculators and the per-reader coefficient cache.
//!
//! A [`CoefficientCalculator`] turns design parameters into a
//! [`CoefficientSet`] for a given sample rate. Calculators are immutable and
//! shared between every reader of a factory; each reader wraps the shared
//! calculator in its own [`CoefficientCache`], keyed by sample rate.

use core::f64::consts::FRAC_1_SQRT_2;
use std::sync::Arc;

use crate::coefficients::CoefficientSet;
use crate::error::{Error, Result};

/// Frequency-domain design parameters of a second-order filter.
///
/// # Invariants
///
/// - `frequency` is finite and > 0
/// - `q` is finite and > 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    frequency: f64,
    q: f64,
}

impl FilterSpec {
    /// Validate and create a filter specification.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Cutoff or center frequency in Hz
    /// * `q` - Quality factor (0.707 gives a Butterworth lowpass/highpass)
    pub fn new(frequency: f64, q: f64) -> Result<Self> {
        if !(frequency.is_finite() && frequency > 0.0) {
            return Err(Error::invalid_parameter(
                "frequency",
                format!("must be a positive finite number of Hz, got {frequency}"),
            ));
        }
        if !(q.is_finite() && q > 0.0) {
            return Err(Error::invalid_parameter(
                "q",
                format!("must be a positive finite number, got {q}"),
            ));
        }
        Ok(Self { frequency, q })
    }

    /// Maximally flat specification (Q = 1/√2).
    pub fn butterworth(frequency: f64) -> Result<Self> {
        Self::new(frequency, FRAC_1_SQRT_2)
    }

    /// Cutoff or center frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Quality factor.
    pub fn q(&self) -> f64 {
        self.q
    }
}

/// Designs filter coefficients for a sample rate.
///
/// Implementations must be deterministic: the same sample rate always yields
/// bit-identical coefficients.
pub trait CoefficientCalculator: Send + Sync {
    /// Compute coefficients for `sample_rate` Hz.
    ///
    /// The sample rate passed in is always positive and finite.
    fn calculate(&self, sample_rate: f64) -> Result<CoefficientSet>;

    /// Short name of the filter family, used in logs.
    fn name(&self) -> &'static str;

    /// Design parameters, for calculators built from a [`FilterSpec`].
    fn spec(&self) -> Option<FilterSpec> {
        None
    }
}

/// Coefficients that do not depend on the sample rate.
///
/// Lets hand-designed or externally computed filters run through the same
/// reader as the parametric families.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCoefficients {
    coefficients: CoefficientSet,
}

impl StaticCoefficients {
    /// Validate and normalize a fixed transfer function.
    pub fn new(feedforward: Vec<f64>, feedback: Vec<f64>) -> Result<Self> {
        // Tagged with 0 Hz until a reader asks for a concrete rate.
        let coefficients = CoefficientSet::new(feedforward, feedback, 0.0)?;
        Ok(Self { coefficients })
    }
}

impl CoefficientCalculator for StaticCoefficients {
    fn calculate(&self, sample_rate: f64) -> Result<CoefficientSet> {
        Ok(self.coefficients.clone().with_sample_rate(sample_rate))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Cached coefficients keyed by the sample rate they were computed for.
///
/// Owned by exactly one reader. Asking for the cached rate again returns the
/// stored set without calling the calculator.
pub struct CoefficientCache {
    calculator: Arc<dyn CoefficientCalculator>,
    cached: Option<CoefficientSet>,
}

impl CoefficientCache {
    /// Create an empty cache around a shared calculator.
    pub fn new(calculator: Arc<dyn CoefficientCalculator>) -> Self {
        Self {
            calculator,
            cached: None,
        }
    }

    /// Coefficients for `sample_rate`, recomputed only when the rate changed.
    ///
    /// On failure the previously cached set is kept.
    pub fn recalculate(&mut self, sample_rate: f64) -> Result<&CoefficientSet> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(Error::InvalidSampleRate(sample_rate));
        }

        match self.cached.take() {
            Some(set) if set.sample_rate() == sample_rate => Ok(&*self.cached.insert(set)),
            previous => match self.calculator.calculate(sample_rate) {
                Ok(set) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        filter = self.calculator.name(),
                        sample_rate,
                        previous_rate = previous.as_ref().map(CoefficientSet::sample_rate),
                        "filter coefficients recalculated"
                    );
                    Ok(&*self.cached.insert(set))
                }
                Err(err) => {
                    self.cached = previous;
                    Err(err)
                }
            },
        }
    }

    /// The most recently computed coefficients, if any.
    pub fn current(&self) -> Option<&CoefficientSet> {
        self.cached.as_ref()
    }
}
