//! Live track switcher for pre-loaded WAV loops
//!
//! Loads a small, fixed set of WAV files into memory and plays one of them in a
//! seamless loop through the system audio device. An operator switches the active
//! track (or mutes output) at any time from a line-oriented command loop.
//!
//! # Architecture
//! - [`track`]: decoded sample buffers, per-track loop cursors and session loading
//! - [`selection`]: the single atomic word shared between control and audio threads
//! - [`engine`]: the real-time renderer (allocation-free, lock-free, bounded)
//! - [`controller`]: operator command parsing and the control loop
//! - [`status`]: the text status screen
//! - [`stream`] (feature `streaming`): rodio output stream wiring
//!
//! # Crate feature flags
//! - `streaming` (default): real-time audio output (enables the `rodio` dependency)
//!
//! # Quick start
//! ```no_run
//! use std::sync::Arc;
//! use wavswitch::{read_track_list, PlaybackEngine, Selection, SelectionSignal, Session, WavDecoder};
//!
//! let paths = read_track_list("tracks.txt").unwrap();
//! let session = Session::load(&WavDecoder, &paths).unwrap();
//! let first = session.store().id(0).unwrap();
//!
//! let signal = Arc::new(SelectionSignal::new());
//! let mut engine = PlaybackEngine::new(session, Arc::clone(&signal));
//!
//! signal.set(Selection::Track(first));
//! let mut block = vec![0.0f32; 1024 * engine.channels()];
//! engine.render(&mut block, 1024);
//! ```

#![warn(missing_docs)]

pub mod controller;
pub mod engine;
pub mod selection;
pub mod status;
#[cfg(feature = "streaming")]
pub mod stream;
pub mod track;

use std::fmt;
use std::path::PathBuf;

/// Maximum number of tracks held by one session.
pub const MAX_TRACKS: usize = 8;

/// Maximum number of interleaved channels per track.
pub const MAX_CHANNELS: u16 = 2;

/// Default render block size in frames.
pub const DEFAULT_FRAMES_PER_BUFFER: usize = 1024;

/// Format property that differs between two tracks of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatField {
    /// Number of interleaved channels
    Channels,
    /// Sample rate in Hz
    SampleRate,
}

impl fmt::Display for FormatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatField::Channels => f.write_str("channels"),
            FormatField::SampleRate => f.write_str("sample rate"),
        }
    }
}

/// Error types for session loading and audio output.
///
/// All of these surface before the real-time path is armed; rendering itself
/// has no failure mode.
#[derive(thiserror::Error, Debug)]
pub enum WavSwitchError {
    /// Track list file is missing or unreadable
    #[error("Cannot open track list {}: {source}", .path.display())]
    TrackList {
        /// Path of the list file
        path: PathBuf,
        /// Underlying IO failure
        source: std::io::Error,
    },

    /// Track list file names no tracks
    #[error("Track list {} contains no tracks", .0.display())]
    EmptyTrackList(PathBuf),

    /// More tracks requested than a session can hold
    #[error("Too many tracks: {found} listed, at most {max} supported")]
    TooManyTracks {
        /// Number of tracks requested
        found: usize,
        /// Supported maximum
        max: usize,
    },

    /// Audio file is unreadable, malformed or unusable
    #[error("Cannot load {}: {reason}", .path.display())]
    Load {
        /// Offending audio file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Audio file format does not match the session's first track
    #[error(
        "Incompatible track {}: {field} is {found}, expected {expected}",
        .path.display()
    )]
    Compatibility {
        /// Offending audio file
        path: PathBuf,
        /// Which format property differs
        field: FormatField,
        /// Value established by the first track
        expected: u32,
        /// Value found in this file
        found: u32,
    },

    /// Sample buffer allocation failed
    #[error("Cannot allocate {samples} samples for {}", .path.display())]
    Resource {
        /// Audio file being loaded
        path: PathBuf,
        /// Requested buffer length in samples
        samples: usize,
    },

    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDevice(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for session and stream operations
pub type Result<T> = std::result::Result<T, WavSwitchError>;

// Public API exports
pub use controller::{Command, Controller};
pub use engine::PlaybackEngine;
pub use selection::{Selection, SelectionSignal};
pub use status::StatusScreen;
#[cfg(feature = "streaming")]
pub use stream::{AudioDevice, StreamConfig};
pub use track::decoder::{ClipDecoder, DecodedClip, WavDecoder};
pub use track::session::{read_track_list, Session, SessionBuilder};
pub use track::{Track, TrackFormat, TrackId, TrackStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_error_names_field() {
        let err = WavSwitchError::Compatibility {
            path: PathBuf::from("b.wav"),
            field: FormatField::SampleRate,
            expected: 44100,
            found: 48000,
        };
        let msg = err.to_string();
        assert!(msg.contains("sample rate"), "{msg}");
        assert!(msg.contains("48000") && msg.contains("44100"), "{msg}");
    }

    #[test]
    fn test_too_many_tracks_message() {
        let err = WavSwitchError::TooManyTracks {
            found: 9,
            max: MAX_TRACKS,
        };
        assert_eq!(err.to_string(), "Too many tracks: 9 listed, at most 8 supported");
    }
}
