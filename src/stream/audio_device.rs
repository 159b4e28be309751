//! Audio device integration using rodio
//!
//! The output callback pulls samples through [`EngineSource`], which calls the
//! engine once per block into a buffer allocated up front. The engine (and every
//! track buffer it owns) lives inside the sink, so it can only be dropped after
//! the device has stopped asking for samples.

use super::StreamConfig;
use crate::engine::PlaybackEngine;
use crate::{Result, WavSwitchError};
use rodio::{OutputStream, Sink, Source};
use std::time::Duration;

/// Audio source that renders from the playback engine
struct EngineSource {
    engine: PlaybackEngine,
    /// Current render block
    block: Box<[f32]>,
    /// Next sample to hand out from `block`
    pos: usize,
    frames_per_buffer: usize,
}

impl EngineSource {
    fn new(engine: PlaybackEngine, config: StreamConfig) -> Self {
        let len = config.samples_per_buffer();
        EngineSource {
            engine,
            block: vec![0.0f32; len].into_boxed_slice(),
            pos: len, // Render on first pull
            frames_per_buffer: config.frames_per_buffer,
        }
    }
}

impl Source for EngineSource {
    fn current_frame_len(&self) -> Option<usize> {
        // Format never changes
        None
    }

    fn channels(&self) -> u16 {
        self.engine.channels() as u16
    }

    fn sample_rate(&self) -> u32 {
        self.engine.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        // Loops until stopped
        None
    }
}

impl Iterator for EngineSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.pos >= self.block.len() {
            self.engine.render(&mut self.block, self.frames_per_buffer);
            self.pos = 0;
        }

        let sample = self.block[self.pos];
        self.pos += 1;
        Some(sample)
    }
}

/// Audio playback device using rodio
pub struct AudioDevice {
    stream: OutputStream,
    sink: Sink,
    config: StreamConfig,
}

impl AudioDevice {
    /// Open the default output device and start rendering from `engine`.
    ///
    /// # Errors
    ///
    /// Returns [`WavSwitchError::Config`] if `config` does not match the engine's
    /// format, or [`WavSwitchError::AudioDevice`] if no output stream can be opened.
    pub fn start(engine: PlaybackEngine, config: StreamConfig) -> Result<Self> {
        if config.channels as usize != engine.channels() || config.sample_rate != engine.sample_rate()
        {
            return Err(WavSwitchError::Config(format!(
                "stream format {} ch @ {} Hz does not match tracks ({} ch @ {} Hz)",
                config.channels,
                config.sample_rate,
                engine.channels(),
                engine.sample_rate()
            )));
        }

        // Create output stream
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| WavSwitchError::AudioDevice(format!("Failed to create audio stream: {e}")))?;

        // Create sink for playback
        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| WavSwitchError::AudioDevice(format!("Failed to create audio sink: {e}")))?;

        sink.append(EngineSource::new(engine, config));

        log::info!(
            "Audio stream started: {} ch @ {} Hz, {} frames per block ({:.1}ms)",
            config.channels,
            config.sample_rate,
            config.frames_per_buffer,
            config.latency_ms()
        );

        Ok(AudioDevice {
            stream,
            sink,
            config,
        })
    }

    /// Configuration the stream was started with.
    pub fn config(&self) -> StreamConfig {
        self.config
    }

    /// Stop rendering, then close the output stream.
    pub fn shutdown(self) {
        let AudioDevice { stream, sink, .. } = self;
        sink.stop();
        drop(sink);
        drop(stream);
        log::info!("Audio stream stopped");
    }
}
