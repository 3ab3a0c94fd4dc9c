//! Per-channel filter state.
//!
//! Each channel keeps two fixed-size rings: the last `b.len()` inputs
//! (including the current sample) and the last `a.len() - 1` outputs. The
//! rings are allocated when the coefficient layout or channel count changes
//! and never during a read.

use crate::coefficients::CoefficientSet;

/// Input and output history of one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelHistory {
    inputs: Box<[f64]>,
    outputs: Box<[f64]>,
    /// Slot the next input is written to.
    input_pos: usize,
    /// Slot the next output is written to.
    output_pos: usize,
}

impl ChannelHistory {
    /// Zeroed history sized for `coefficients`.
    pub fn new(coefficients: &CoefficientSet) -> Self {
        Self {
            inputs: vec![0.0; coefficients.feedforward().len()].into_boxed_slice(),
            outputs: vec![0.0; coefficients.feedback().len() - 1].into_boxed_slice(),
            input_pos: 0,
            output_pos: 0,
        }
    }

    /// Returns true when this history has the layout `coefficients` needs.
    pub fn fits(&self, coefficients: &CoefficientSet) -> bool {
        self.inputs.len() == coefficients.feedforward().len()
            && self.outputs.len() + 1 == coefficients.feedback().len()
    }

    /// Run one sample through the recursion.
    ///
    /// The new input overwrites the oldest input slot first, then
    /// `y = Σ b[i]·x[n-i] − Σ a[j]·y[n-j]` (j ≥ 1) is evaluated and
    /// written over the oldest output slot.
    ///
    /// `coefficients` must have the layout this history was built for
    /// (see [`fits`](Self::fits)); [`HistoryArena::prepare`] guarantees that.
    ///
    /// # Panics
    ///
    /// Debug builds panic when the layout does not fit.
    #[inline]
    pub fn process(&mut self, input: f64, coefficients: &CoefficientSet) -> f64 {
        debug_assert!(
            self.fits(coefficients),
            "history layout does not match coefficients of order {}",
            coefficients.order()
        );
        let n_in = self.inputs.len();
        self.inputs[self.input_pos] = input;

        let mut acc = 0.0;
        for (lag, b) in coefficients.feedforward().iter().enumerate() {
            acc += b * self.inputs[(self.input_pos + n_in - lag) % n_in];
        }
        self.input_pos = (self.input_pos + 1) % n_in;

        let n_out = self.outputs.len();
        if n_out > 0 {
            for (lag, a) in coefficients.feedback().iter().enumerate().skip(1) {
                acc -= a * self.outputs[(self.output_pos + n_out - lag) % n_out];
            }
            self.outputs[self.output_pos] = acc;
            self.output_pos = (self.output_pos + 1) % n_out;
        }

        acc
    }

    /// Input `lag` samples ago (0 is the most recent).
    pub fn input(&self, lag: usize) -> f64 {
        let n = self.inputs.len();
        self.inputs[(self.input_pos + n - 1 - lag % n) % n]
    }

    /// Output `lag + 1` samples ago (0 is the most recent output).
    ///
    /// Returns 0 for filters without feedback.
    pub fn output(&self, lag: usize) -> f64 {
        let n = self.outputs.len();
        if n == 0 {
            return 0.0;
        }
        self.outputs[(self.output_pos + n - 1 - lag % n) % n]
    }

}

/// One [`ChannelHistory`] per channel, indexed by channel number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryArena {
    channels: Vec<ChannelHistory>,
}

impl HistoryArena {
    /// Empty arena; sized on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure there are `channels` histories laid out for `coefficients`.
    ///
    /// Rebuilds (zeroed) when the channel count or coefficient layout
    /// changed and returns true in that case. Otherwise existing state is
    /// kept untouched.
    pub fn prepare(&mut self, channels: usize, coefficients: &CoefficientSet) -> bool {
        let fits = self.channels.len() == channels
            && self.channels.iter().all(|history| history.fits(coefficients));
        if fits {
            return false;
        }
        self.channels = vec![ChannelHistory::new(coefficients); channels];
        true
    }

    /// Number of channels currently tracked.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns true when no channel is tracked yet.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// History of one channel.
    pub fn channel(&self, index: usize) -> Option<&ChannelHistory> {
        self.channels.get(index)
    }

    /// Mutable history of one channel.
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut ChannelHistory> {
        self.channels.get_mut(index)
    }
}
