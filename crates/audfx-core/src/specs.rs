//! Stream format description.

use core::fmt;

/// Sample rate and channel layout of an interleaved `f32` stream.
///
/// Readers report their specs after every pull; a stream may renegotiate
/// its format between two reads (for example after upstream resampling).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Specs {
    /// Sample rate in Hz.
    pub rate: f64,
    /// Number of interleaved channels.
    pub channels: usize,
}

impl Specs {
    /// Create a new stream description.
    pub const fn new(rate: f64, channels: usize) -> Self {
        Self { rate, channels }
    }

    /// Returns true when the sample rate is a positive finite number and
    /// there is at least one channel.
    pub fn is_valid(&self) -> bool {
        self.rate.is_finite() && self.rate > 0.0 && self.channels > 0
    }

    /// Half the sample rate, the highest representable frequency.
    pub fn nyquist(&self) -> f64 {
        self.rate * 0.5
    }

    /// Number of whole frames that fit into an interleaved buffer of `len` samples.
    ///
    /// Returns 0 for a zero-channel layout.
    pub fn frames_in(&self, len: usize) -> usize {
        if self.channels == 0 {
            0
        } else {
            len / self.channels
        }
    }
}

impl fmt::Display for Specs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz, {} channels", self.rate, self.channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity() {
        assert!(Specs::new(44100.0, 2).is_valid());
        assert!(!Specs::new(0.0, 2).is_valid());
        assert!(!Specs::new(-48000.0, 1).is_valid());
        assert!(!Specs::new(f64::NAN, 1).is_valid());
        assert!(!Specs::new(48000.0, 0).is_valid());
    }

    #[test]
    fn frames_in_rounds_down() {
        let specs = Specs::new(48000.0, 2);
        assert_eq!(specs.frames_in(9), 4);
        assert_eq!(Specs::new(48000.0, 0).frames_in(9), 0);
    }
}
