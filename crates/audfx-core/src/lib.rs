//! audfx Core - streaming IIR filters for pull-based audio readers
//!
//! This crate applies recursive (IIR) filters to audio as it is read. Filter
//! coefficients are designed from high-level parameters (frequency and Q) and
//! recomputed whenever the stream's sample rate changes.
//!
//! # Core Abstractions
//!
//! ## Readers and Factories
//!
//! - [`Reader`] - One playback instance, filling interleaved `f32` blocks
//! - [`Factory`] - A sound that can be opened any number of times
//! - [`FactoryExt`] - Fluent filter wrapping (`source.lowpass(1000.0, 0.707)?`)
//!
//! ## Coefficient Design
//!
//! - [`FilterSpec`] - Validated frequency and Q
//! - [`CoefficientCalculator`] - Designs a [`CoefficientSet`] for a sample rate
//! - [`BiquadCalculator`] - RBJ cookbook lowpass, highpass, bandpass and notch
//! - [`StaticCoefficients`] - Fixed, hand-designed transfer functions
//! - [`CoefficientCache`] - Per-reader cache keyed by sample rate
//!
//! ## Filtering
//!
//! - [`IirFilterFactory`] - Wraps an upstream factory with a calculator
//! - [`IirFilterReader`] - Applies the recursion in place, per channel
//! - [`HistoryArena`] - Fixed-size input/output rings, one per channel
//!
//! ## Sources
//!
//! - [`BufferFactory`] - In-memory interleaved samples
//! - [`SineFactory`] - Sine tone
//!
//! # Example
//!
//! ```rust
//! use audfx_core::{FactoryExt, Factory, SineFactory, Specs, render};
//!
//! // 10 kHz tone through a 1 kHz lowpass, then a 50 Hz highpass
//! let chain = SineFactory::new(10000.0, Specs::new(44100.0, 2), 4410)
//!     .lowpass(1000.0, 0.707)?
//!     .highpass(50.0, 0.707)?;
//!
//! // Every reader is an independent playback with its own filter state
//! let mut reader = chain.create_reader()?;
//! let samples = render(reader.as_mut(), 512)?;
//! assert_eq!(samples.len(), 4410 * 2);
//! # Ok::<(), audfx_core::Error>(())
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe reads**: no allocation in a read unless the stream
//!   format changes
//! - **Decoration over inheritance**: filters are factories wrapping factories
//! - **Family-agnostic recursion**: filter families only differ in their calculator
//! - **Failures are terminal**: a failed reader keeps returning its error

pub mod biquad;
pub mod calculator;
pub mod coefficients;
pub mod error;
pub mod filter;
pub mod history;
pub mod reader;
pub mod sources;
pub mod specs;

// Re-export main types at crate root
pub use biquad::{
    BiquadCalculator, FilterFamily, MAX_FREQUENCY_RATIO, bandpass_coefficients,
    highpass_coefficients, lowpass_coefficients, notch_coefficients,
};
pub use calculator::{CoefficientCache, CoefficientCalculator, FilterSpec, StaticCoefficients};
pub use coefficients::CoefficientSet;
pub use error::{Error, Result};
pub use filter::{IirFilterFactory, IirFilterReader, ReaderState};
pub use history::{ChannelHistory, HistoryArena};
pub use reader::{Factory, FactoryExt, ReadStatus, Reader, render};
pub use sources::{BufferFactory, SineFactory};
pub use specs::Specs;
