//! Audio output streaming
//!
//! Binds a [`PlaybackEngine`](crate::PlaybackEngine) to the system audio device.
//! The device pulls samples from an engine-backed source, which renders one
//! fixed-size block at a time.

pub mod audio_device;

pub use audio_device::AudioDevice;

use crate::track::TrackFormat;
use crate::{Result, WavSwitchError, DEFAULT_FRAMES_PER_BUFFER};

/// Largest accepted render block, in frames.
pub const MAX_FRAMES_PER_BUFFER: usize = 16384;

/// Configuration for streaming playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of interleaved audio channels
    pub channels: u16,

    /// Frames rendered per engine invocation.
    /// Smaller blocks react faster to selection changes but wake the renderer more often.
    pub frames_per_buffer: usize,
}

impl StreamConfig {
    /// Create a configuration for a session format and block size.
    ///
    /// # Errors
    ///
    /// Returns [`WavSwitchError::Config`] if `frames_per_buffer` is 0 or larger
    /// than [`MAX_FRAMES_PER_BUFFER`].
    pub fn new(format: TrackFormat, frames_per_buffer: usize) -> Result<Self> {
        if frames_per_buffer == 0 || frames_per_buffer > MAX_FRAMES_PER_BUFFER {
            return Err(WavSwitchError::Config(format!(
                "frames per buffer must be between 1 and {MAX_FRAMES_PER_BUFFER}, got {frames_per_buffer}"
            )));
        }
        Ok(StreamConfig {
            sample_rate: format.sample_rate,
            channels: format.channels,
            frames_per_buffer,
        })
    }

    /// Configuration with the default block size of
    /// [`DEFAULT_FRAMES_PER_BUFFER`] frames (≈23ms @ 44.1kHz).
    pub fn with_default_buffer(format: TrackFormat) -> Self {
        StreamConfig {
            sample_rate: format.sample_rate,
            channels: format.channels,
            frames_per_buffer: DEFAULT_FRAMES_PER_BUFFER,
        }
    }

    /// Samples in one render block (frames × channels).
    pub fn samples_per_buffer(&self) -> usize {
        self.frames_per_buffer * self.channels as usize
    }

    /// Get block latency in milliseconds
    pub fn latency_ms(&self) -> f32 {
        ((self.frames_per_buffer as f32) / (self.sample_rate as f32)) * 1000.0
    }
}
