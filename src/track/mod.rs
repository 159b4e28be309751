//! Decoded tracks and the fixed-size track arena
//!
//! A [`Track`] holds one clip's interleaved samples together with its loop cursor.
//! Tracks are created once at startup through [`session::SessionBuilder`] and live
//! in a [`TrackStore`] addressed by bounds-checked [`TrackId`]s.

pub mod decoder;
pub mod session;

use crate::MAX_TRACKS;

/// Audio format shared by every track of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackFormat {
    /// Number of interleaved channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

/// Index of a track inside a [`TrackStore`].
///
/// Only obtainable through [`TrackStore::id`] (or a session built from one), so a
/// `TrackId` always refers to a track that was loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub(crate) usize);

impl TrackId {
    /// Zero-based position of the track in load order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One decoded audio clip plus its playback cursor.
#[derive(Debug)]
pub struct Track {
    label: String,
    samples: Box<[f32]>,
    format: TrackFormat,
    /// Next sample to emit; may rest at `samples.len()` until the next fill wraps it
    cursor: usize,
}

impl Track {
    /// Wrap already validated sample data. `samples` must be non-empty.
    pub(crate) fn new(label: String, samples: Box<[f32]>, format: TrackFormat) -> Self {
        debug_assert!(!samples.is_empty());
        Track {
            label,
            samples,
            format,
            cursor: 0,
        }
    }

    /// Path (or other label) the track was loaded from.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Interleaved sample data.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.format.channels as usize
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.format.channels
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    /// Index of the next sample to be emitted.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Copy the next `out.len()` samples into `out`, wrapping to the start of the
    /// clip whenever the cursor reaches the end.
    ///
    /// Runs on the audio thread: no allocation, bounded by `out.len()`.
    pub fn fill(&mut self, out: &mut [f32]) {
        let len = self.samples.len();
        let mut cursor = self.cursor;
        let mut written = 0;

        while written < out.len() {
            if cursor >= len {
                cursor = 0;
            }
            let run = (len - cursor).min(out.len() - written);
            out[written..written + run].copy_from_slice(&self.samples[cursor..cursor + run]);
            cursor += run;
            written += run;
        }

        self.cursor = cursor;
    }
}

/// Fixed-capacity arena of tracks.
#[derive(Debug)]
pub struct TrackStore {
    tracks: Vec<Track>,
}

impl TrackStore {
    pub(crate) fn new() -> Self {
        TrackStore {
            tracks: Vec::with_capacity(MAX_TRACKS),
        }
    }

    /// Append a track. Capacity is checked by the session builder.
    pub(crate) fn push(&mut self, track: Track) -> TrackId {
        debug_assert!(self.tracks.len() < MAX_TRACKS);
        self.tracks.push(track);
        TrackId(self.tracks.len() - 1)
    }

    /// Number of loaded tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether no track is loaded.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Bounds-checked id for the track at `index`.
    pub fn id(&self, index: usize) -> Option<TrackId> {
        (index < self.tracks.len()).then_some(TrackId(index))
    }

    /// Shared access to a track.
    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(id.0)
    }

    /// Exclusive access to a track (used by the renderer to advance its cursor).
    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.get_mut(id.0)
    }

    /// Iterate over tracks in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }
}
