//! Simple upstream sources.
//!
//! Minimal factories for feeding filters without a decoder: an in-memory
//! sample buffer and a sine tone. Every reader they create has its own
//! cursor, so playbacks never interfere.

use core::f64::consts::TAU;
use std::sync::Arc;

use libm::sin;

use crate::error::Result;
use crate::reader::{Factory, ReadStatus, Reader};
use crate::specs::Specs;

/// Factory over a shared, immutable block of interleaved samples.
#[derive(Debug, Clone)]
pub struct BufferFactory {
    samples: Arc<[f32]>,
    specs: Specs,
}

impl BufferFactory {
    /// Wrap interleaved `samples` described by `specs`.
    ///
    /// A trailing partial frame is never played.
    pub fn new(samples: impl Into<Arc<[f32]>>, specs: Specs) -> Self {
        Self {
            samples: samples.into(),
            specs,
        }
    }

    /// Stream format.
    pub fn specs(&self) -> Specs {
        self.specs
    }

    /// Total number of whole frames.
    pub fn frames(&self) -> usize {
        self.specs.frames_in(self.samples.len())
    }
}

impl Factory for BufferFactory {
    fn create_reader(&self) -> Result<Box<dyn Reader>> {
        Ok(Box::new(BufferReader {
            samples: Arc::clone(&self.samples),
            specs: self.specs,
            frame: 0,
            frames: self.frames(),
        }))
    }
}

struct BufferReader {
    samples: Arc<[f32]>,
    specs: Specs,
    frame: usize,
    frames: usize,
}

impl Reader for BufferReader {
    fn specs(&self) -> Specs {
        self.specs
    }

    fn read(&mut self, buffer: &mut [f32]) -> Result<ReadStatus> {
        let channels = self.specs.channels;
        let frames = self.specs.frames_in(buffer.len()).min(self.frames - self.frame);
        let start = self.frame * channels;
        let len = frames * channels;
        buffer[..len].copy_from_slice(&self.samples[start..start + len]);
        self.frame += frames;
        Ok(ReadStatus {
            frames,
            end_of_stream: self.frame == self.frames,
        })
    }
}

/// Factory for a fixed-length sine tone, identical on every channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineFactory {
    frequency: f64,
    amplitude: f32,
    specs: Specs,
    frames: usize,
}

impl SineFactory {
    /// Full-scale sine at `frequency` Hz lasting `frames` frames.
    pub fn new(frequency: f64, specs: Specs, frames: usize) -> Self {
        Self {
            frequency,
            amplitude: 1.0,
            specs,
            frames,
        }
    }

    /// Set the peak amplitude.
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Tone frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl Factory for SineFactory {
    fn create_reader(&self) -> Result<Box<dyn Reader>> {
        Ok(Box::new(SineReader {
            tone: *self,
            frame: 0,
        }))
    }
}

struct SineReader {
    tone: SineFactory,
    frame: usize,
}

impl Reader for SineReader {
    fn specs(&self) -> Specs {
        self.tone.specs
    }

    fn read(&mut self, buffer: &mut [f32]) -> Result<ReadStatus> {
        let specs = self.tone.specs;
        let frames = specs
            .frames_in(buffer.len())
            .min(self.tone.frames - self.frame);
        let step = TAU * self.tone.frequency / specs.rate;

        for (i, frame) in buffer[..frames * specs.channels]
            .chunks_exact_mut(specs.channels.max(1))
            .enumerate()
        {
            let value = self.tone.amplitude * sin(step * (self.frame + i) as f64) as f32;
            frame.fill(value);
        }
        self.frame += frames;

        Ok(ReadStatus {
            frames,
            end_of_stream: self.frame == self.tone.frames,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_reads_in_blocks() {
        let factory = BufferFactory::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], Specs::new(48000.0, 2));
        assert_eq!(factory.frames(), 2);
        let mut reader = factory.create_reader().unwrap();

        let mut buffer = [0.0; 2];
        assert_eq!(reader.read(&mut buffer).unwrap(), ReadStatus::frames(1));
        assert_eq!(buffer, [1.0, 2.0]);

        let mut buffer = [0.0; 6];
        assert_eq!(reader.read(&mut buffer).unwrap(), ReadStatus::end(1));
        assert_eq!(buffer, [3.0, 4.0, 0.0, 0.0, 0.0, 0.0]);

        assert_eq!(reader.read(&mut buffer).unwrap(), ReadStatus::end(0));
    }

    #[test]
    fn buffer_readers_are_independent() {
        let factory = BufferFactory::new(vec![1.0, 2.0, 3.0], Specs::new(48000.0, 1));
        let mut a = factory.create_reader().unwrap();
        let mut b = factory.create_reader().unwrap();
        let mut buffer = [0.0; 2];
        a.read(&mut buffer).unwrap();
        a.read(&mut buffer).unwrap();
        b.read(&mut buffer).unwrap();
        assert_eq!(buffer, [1.0, 2.0]);
    }

    #[test]
    fn sine_starts_at_zero_and_repeats_per_channel() {
        let factory = SineFactory::new(12000.0, Specs::new(48000.0, 2), 4).with_amplitude(0.5);
        let mut reader = factory.create_reader().unwrap();
        let mut buffer = [0.0; 8];
        assert_eq!(reader.read(&mut buffer).unwrap(), ReadStatus::end(4));
        // Quarter-rate sine: 0, 0.5, 0, -0.5
        let expected = [0.0, 0.0, 0.5, 0.5, 0.0, 0.0, -0.5, -0.5];
        for (got, want) in buffer.iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
        }
    }

    #[test]
    fn sine_continues_phase_across_reads() {
        let factory = SineFactory::new(1000.0, Specs::new(48000.0, 1), 64);
        let mut whole = [0.0; 64];
        factory.create_reader().unwrap().read(&mut whole).unwrap();

        let mut reader = factory.create_reader().unwrap();
        let mut first = [0.0; 20];
        let mut second = [0.0; 44];
        reader.read(&mut first).unwrap();
        reader.read(&mut second).unwrap();
        assert_eq!(&whole[..20], &first);
        assert_eq!(&whole[20..], &second);
    }
}
