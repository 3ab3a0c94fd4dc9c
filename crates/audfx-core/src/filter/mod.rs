//! IIR filter factories and readers.
//!
//! An [`IirFilterFactory`] decorates an upstream [`Factory`](crate::Factory)
//! with a [`CoefficientCalculator`](crate::CoefficientCalculator). Each
//! reader it creates owns a private coefficient cache and history, so any
//! number of playbacks of the same filtered sound run independently.

mod factory;
mod reader;

pub use crate::biquad::FilterFamily;
pub use factory::IirFilterFactory;
pub use reader::{IirFilterReader, ReaderState};
