//! Pull-based reader and factory traits.
//!
//! A [`Factory`] describes a sound; every call to
//! [`create_reader`](Factory::create_reader) opens an independent playback
//! instance as a [`Reader`]. Filters are themselves factories wrapping an
//! upstream factory, so chains of any length compose by decoration.
//!
//! ## Design Decisions
//!
//! - **Interleaved `f32` blocks**: the consumer owns the buffer, readers fill
//!   it in place. No allocation happens in a read.
//!
//! - **Object-safe**: factories are shared as `Arc<dyn Factory>` and readers
//!   are handed out as `Box<dyn Reader>`, so a filter can wrap any upstream.
//!
//! - **Format reported after the pull**: [`Reader::specs`] describes the data
//!   produced by the most recent read. A stream may renegotiate between reads.

use std::sync::Arc;

use crate::calculator::CoefficientCalculator;
use crate::error::Result;
use crate::filter::{FilterFamily, IirFilterFactory};
use crate::specs::Specs;

/// Outcome of a single [`Reader::read`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadStatus {
    /// Frames written to the front of the buffer.
    pub frames: usize,
    /// The stream has no more data after this block.
    pub end_of_stream: bool,
}

impl ReadStatus {
    /// A block of `frames` frames with more data to follow.
    pub const fn frames(frames: usize) -> Self {
        Self {
            frames,
            end_of_stream: false,
        }
    }

    /// The final block of a stream, possibly empty.
    pub const fn end(frames: usize) -> Self {
        Self {
            frames,
            end_of_stream: true,
        }
    }
}

/// A single playback instance producing interleaved samples.
///
/// # Example
///
/// ```rust
/// use audfx_core::{ReadStatus, Reader, Result, Specs};
///
/// struct Dc {
///     remaining: usize,
/// }
///
/// impl Reader for Dc {
///     fn specs(&self) -> Specs {
///         Specs::new(48000.0, 1)
///     }
///
///     fn read(&mut self, buffer: &mut [f32]) -> Result<ReadStatus> {
///         let frames = buffer.len().min(self.remaining);
///         buffer[..frames].fill(1.0);
///         self.remaining -= frames;
///         Ok(ReadStatus { frames, end_of_stream: self.remaining == 0 })
///     }
/// }
/// ```
pub trait Reader: Send {
    /// Format of the samples delivered by the most recent read.
    fn specs(&self) -> Specs;

    /// Fill the front of `buffer` with up to `buffer.len() / channels` frames.
    ///
    /// Returns the number of frames written. Fewer frames than requested
    /// signal back-pressure or the end of the stream; samples past
    /// `frames * channels` are left untouched.
    fn read(&mut self, buffer: &mut [f32]) -> Result<ReadStatus>;
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    fn specs(&self) -> Specs {
        (**self).specs()
    }

    fn read(&mut self, buffer: &mut [f32]) -> Result<ReadStatus> {
        (**self).read(buffer)
    }
}

/// A sound that can be opened any number of times.
///
/// Implementations are immutable after construction so they can be shared
/// across threads without locking.
pub trait Factory: Send + Sync {
    /// Open a new, independent reader.
    fn create_reader(&self) -> Result<Box<dyn Reader>>;
}

impl<F: Factory + ?Sized> Factory for Arc<F> {
    fn create_reader(&self) -> Result<Box<dyn Reader>> {
        (**self).create_reader()
    }
}

/// Extension trait for wrapping a factory in filters.
///
/// ```rust
/// use audfx_core::{FactoryExt, SineFactory, Specs};
///
/// let tone = SineFactory::new(440.0, Specs::new(48000.0, 1), 4800);
/// let filtered = tone.lowpass(1000.0, 0.707).unwrap().highpass(80.0, 0.707).unwrap();
/// # let _ = filtered;
/// ```
pub trait FactoryExt: Factory + Sized + 'static {
    /// Wrap this factory in a filter driven by `calculator`.
    fn filter(self, calculator: impl CoefficientCalculator + 'static) -> IirFilterFactory {
        IirFilterFactory::new(Arc::new(self), Arc::new(calculator))
    }

    /// Wrap this factory in an RBJ biquad of the given family.
    fn biquad(self, family: FilterFamily, frequency: f64, q: f64) -> Result<IirFilterFactory> {
        IirFilterFactory::biquad(Arc::new(self), family, frequency, q)
    }

    /// Wrap this factory in a lowpass filter.
    fn lowpass(self, frequency: f64, q: f64) -> Result<IirFilterFactory> {
        self.biquad(FilterFamily::Lowpass, frequency, q)
    }

    /// Wrap this factory in a highpass filter.
    fn highpass(self, frequency: f64, q: f64) -> Result<IirFilterFactory> {
        self.biquad(FilterFamily::Highpass, frequency, q)
    }

    /// Wrap this factory in a bandpass filter.
    fn bandpass(self, frequency: f64, q: f64) -> Result<IirFilterFactory> {
        self.biquad(FilterFamily::Bandpass, frequency, q)
    }

    /// Wrap this factory in a notch filter.
    fn notch(self, frequency: f64, q: f64) -> Result<IirFilterFactory> {
        self.biquad(FilterFamily::Notch, frequency, q)
    }
}

impl<T: Factory + 'static> FactoryExt for T {}

/// Drain a reader into an interleaved sample vector.
///
/// Reads blocks of `block_frames` frames until the reader signals the end of
/// the stream. Zero-frame reads that are not the end of the stream are
/// retried, so this must only be used with readers that eventually finish.
pub fn render(reader: &mut dyn Reader, block_frames: usize) -> Result<Vec<f32>> {
    let block_frames = block_frames.max(1);
    let mut out = Vec::new();
    let mut block = Vec::new();
    loop {
        let channels = reader.specs().channels.max(1);
        block.resize(block_frames * channels, 0.0);
        let status = reader.read(&mut block)?;
        let len = status
            .frames
            .saturating_mul(reader.specs().channels)
            .min(block.len());
        out.extend_from_slice(&block[..len]);
        if status.end_of_stream {
            return Ok(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::BufferFactory;

    #[test]
    fn boxed_reader_delegates() {
        let factory = BufferFactory::new(vec![1.0, 2.0, 3.0], Specs::new(48000.0, 1));
        let mut reader: Box<dyn Reader> = factory.create_reader().unwrap();
        let mut buffer = [0.0; 2];
        assert_eq!(reader.read(&mut buffer).unwrap(), ReadStatus::frames(2));
        assert_eq!(buffer, [1.0, 2.0]);
        assert_eq!(reader.specs(), Specs::new(48000.0, 1));
    }

    #[test]
    fn arc_factory_delegates() {
        let factory: Arc<dyn Factory> =
            Arc::new(BufferFactory::new(vec![0.5; 4], Specs::new(44100.0, 2)));
        let reader = factory.create_reader().unwrap();
        assert_eq!(reader.specs().channels, 2);
    }

    #[test]
    fn render_collects_whole_stream() {
        let samples: Vec<f32> = (0..10).map(|i| i as f32).collect();
        let factory = BufferFactory::new(samples.clone(), Specs::new(48000.0, 2));
        let mut reader = factory.create_reader().unwrap();
        let out = render(reader.as_mut(), 3).unwrap();
        assert_eq!(out, samples);
    }

    #[test]
    fn render_caps_oversized_frame_count() {
        struct Overclaim;
        impl Reader for Overclaim {
            fn specs(&self) -> Specs {
                Specs::new(48000.0, 2)
            }
            fn read(&mut self, buffer: &mut [f32]) -> Result<ReadStatus> {
                buffer.fill(0.5);
                Ok(ReadStatus::end(usize::MAX))
            }
        }
        let out = render(&mut Overclaim, 3).unwrap();
        assert_eq!(out, vec![0.5; 6]);
    }

    #[test]
    fn fluent_chain_builds_nested_factories() {
        let source = BufferFactory::new(vec![0.0; 8], Specs::new(48000.0, 1));
        let chain = source.lowpass(1000.0, 0.707).unwrap().highpass(50.0, 0.707).unwrap();
        let mut reader = chain.create_reader().unwrap();
        let out = render(reader.as_mut(), 4).unwrap();
        assert_eq!(out, vec![0.0; 8]);
    }
}
