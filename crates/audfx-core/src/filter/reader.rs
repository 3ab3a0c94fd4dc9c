//! Streaming filter reader.

use crate::calculator::CoefficientCache;
use crate::coefficients::CoefficientSet;
use crate::error::{Error, Result};
use crate::history::HistoryArena;
use crate::reader::{ReadStatus, Reader};
use crate::specs::Specs;

/// Lifecycle of an [`IirFilterReader`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReaderState {
    /// No data has been filtered yet.
    Uninitialized,
    /// Data is flowing and coefficients are current.
    Streaming,
    /// Upstream reported the end of the stream. Terminal.
    Exhausted,
    /// A read failed. Terminal; the error is returned on every later read.
    Failed(Error),
}

/// Applies a recursive filter to the samples of an upstream reader, in place.
///
/// Coefficients are recomputed whenever the upstream sample rate changes;
/// filter history survives such a change as long as the coefficient layout
/// and channel count stay the same.
pub struct IirFilterReader {
    upstream: Box<dyn Reader>,
    coefficients: CoefficientCache,
    history: HistoryArena,
    state: ReaderState,
}

impl IirFilterReader {
    /// Filter `upstream` with coefficients from `coefficients`.
    pub fn new(upstream: Box<dyn Reader>, coefficients: CoefficientCache) -> Self {
        Self {
            upstream,
            coefficients,
            history: HistoryArena::new(),
            state: ReaderState::Uninitialized,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &ReaderState {
        &self.state
    }

    /// Coefficients used for the most recent block, if any.
    pub fn coefficients(&self) -> Option<&CoefficientSet> {
        self.coefficients.current()
    }

    /// Per-channel filter state.
    pub fn history(&self) -> &HistoryArena {
        &self.history
    }

    /// Pull one block from upstream and filter it.
    fn pull(&mut self, buffer: &mut [f32]) -> Result<ReadStatus> {
        let status = self.upstream.read(buffer)?;

        if status.frames > 0 {
            let specs = self.upstream.specs();
            if !specs.is_valid() {
                return Err(Error::InvalidSpecs(specs));
            }
            let Some(len) = status
                .frames
                .checked_mul(specs.channels)
                .filter(|&len| len <= buffer.len())
            else {
                return Err(Error::UpstreamReadFailure(format!(
                    "upstream reported {} frames of {} channels for a buffer of {} samples",
                    status.frames,
                    specs.channels,
                    buffer.len()
                )));
            };

            let coefficients = self.coefficients.recalculate(specs.rate)?;
            if self.history.prepare(specs.channels, coefficients) {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    channels = specs.channels,
                    order = coefficients.order(),
                    "filter history reset"
                );
            }
            filter_block(&mut buffer[..len], specs, coefficients, &mut self.history)?;

            if self.state == ReaderState::Uninitialized {
                self.state = ReaderState::Streaming;
            }
        }

        if status.end_of_stream {
            #[cfg(feature = "tracing")]
            tracing::debug!("filter reader exhausted");
            self.state = ReaderState::Exhausted;
        }

        Ok(status)
    }
}

/// Run every channel of an interleaved block through its own history.
fn filter_block(
    samples: &mut [f32],
    specs: Specs,
    coefficients: &CoefficientSet,
    history: &mut HistoryArena,
) -> Result<()> {
    for channel in 0..specs.channels {
        let Some(state) = history.channel_mut(channel) else {
            continue;
        };
        let mut finite = true;
        for sample in samples.iter_mut().skip(channel).step_by(specs.channels) {
            let out = state.process(f64::from(*sample), coefficients) as f32;
            finite &= out.is_finite();
            *sample = out;
        }
        if !finite {
            return Err(Error::NumericInstability { channel });
        }
    }
    Ok(())
}

impl Reader for IirFilterReader {
    fn specs(&self) -> Specs {
        self.upstream.specs()
    }

    fn read(&mut self, buffer: &mut [f32]) -> Result<ReadStatus> {
        match &self.state {
            ReaderState::Failed(err) => return Err(err.clone()),
            ReaderState::Exhausted => return Ok(ReadStatus::end(0)),
            ReaderState::Uninitialized | ReaderState::Streaming => {}
        }

        self.pull(buffer).inspect_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %err, "filter reader failed");
            self.state = ReaderState::Failed(err.clone());
        })
    }
}
