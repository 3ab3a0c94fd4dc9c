//! Filter factory.

use std::sync::Arc;

use crate::biquad::{BiquadCalculator, FilterFamily};
use crate::calculator::{CoefficientCache, CoefficientCalculator, FilterSpec, StaticCoefficients};
use crate::error::{Error, Result};
use crate::reader::{Factory, Reader};

use super::reader::IirFilterReader;

/// Factory producing [`IirFilterReader`]s over a wrapped upstream factory.
///
/// Immutable after construction; share it freely across threads.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use audfx_core::{Factory, IirFilterFactory, SineFactory, Specs, render};
///
/// let tone = Arc::new(SineFactory::new(5000.0, Specs::new(48000.0, 1), 4800));
/// let lowpass = IirFilterFactory::lowpass(tone, 1000.0, 0.707).unwrap();
///
/// let mut voice_a = lowpass.create_reader().unwrap();
/// let mut voice_b = lowpass.create_reader().unwrap();
/// assert_eq!(render(voice_a.as_mut(), 256).unwrap(), render(voice_b.as_mut(), 256).unwrap());
/// ```
#[derive(Clone)]
pub struct IirFilterFactory {
    upstream: Arc<dyn Factory>,
    calculator: Arc<dyn CoefficientCalculator>,
}

impl IirFilterFactory {
    /// Wrap `upstream` with a filter designed by `calculator`.
    pub fn new(upstream: Arc<dyn Factory>, calculator: Arc<dyn CoefficientCalculator>) -> Self {
        Self {
            upstream,
            calculator,
        }
    }

    /// Wrap `upstream` with an RBJ biquad of the given family.
    ///
    /// Fails with [`Error::InvalidParameter`] for a non-positive frequency or Q.
    pub fn biquad(
        upstream: Arc<dyn Factory>,
        family: FilterFamily,
        frequency: f64,
        q: f64,
    ) -> Result<Self> {
        let spec = FilterSpec::new(frequency, q)?;
        Ok(Self::new(upstream, Arc::new(BiquadCalculator::new(family, spec))))
    }

    /// Lowpass filter at `frequency` Hz with quality factor `q`.
    pub fn lowpass(upstream: Arc<dyn Factory>, frequency: f64, q: f64) -> Result<Self> {
        Self::biquad(upstream, FilterFamily::Lowpass, frequency, q)
    }

    /// Highpass filter at `frequency` Hz with quality factor `q`.
    pub fn highpass(upstream: Arc<dyn Factory>, frequency: f64, q: f64) -> Result<Self> {
        Self::biquad(upstream, FilterFamily::Highpass, frequency, q)
    }

    /// Bandpass filter centered on `frequency` Hz.
    pub fn bandpass(upstream: Arc<dyn Factory>, frequency: f64, q: f64) -> Result<Self> {
        Self::biquad(upstream, FilterFamily::Bandpass, frequency, q)
    }

    /// Notch filter centered on `frequency` Hz.
    pub fn notch(upstream: Arc<dyn Factory>, frequency: f64, q: f64) -> Result<Self> {
        Self::biquad(upstream, FilterFamily::Notch, frequency, q)
    }

    /// Filter with fixed coefficients, independent of the sample rate.
    pub fn with_coefficients(
        upstream: Arc<dyn Factory>,
        feedforward: Vec<f64>,
        feedback: Vec<f64>,
    ) -> Result<Self> {
        let calculator = StaticCoefficients::new(feedforward, feedback)?;
        Ok(Self::new(upstream, Arc::new(calculator)))
    }

    /// Design parameters, when the calculator is parametric.
    pub fn spec(&self) -> Option<FilterSpec> {
        self.calculator.spec()
    }

    /// The shared coefficient calculator.
    pub fn calculator(&self) -> &Arc<dyn CoefficientCalculator> {
        &self.calculator
    }

    /// The wrapped factory.
    pub fn upstream(&self) -> &Arc<dyn Factory> {
        &self.upstream
    }

    /// Open a new reader, keeping its concrete type.
    ///
    /// Fails with [`Error::UpstreamUnavailable`] when the upstream factory
    /// cannot produce a reader.
    pub fn create_filter_reader(&self) -> Result<IirFilterReader> {
        let upstream = self
            .upstream
            .create_reader()
            .map_err(Error::into_upstream_unavailable)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(filter = self.calculator.name(), "filter reader created");

        Ok(IirFilterReader::new(
            upstream,
            CoefficientCache::new(Arc::clone(&self.calculator)),
        ))
    }
}

impl Factory for IirFilterFactory {
    fn create_reader(&self) -> Result<Box<dyn Reader>> {
        Ok(Box::new(self.create_filter_reader()?))
    }
}
