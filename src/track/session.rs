//! Track list parsing and session construction
//!
//! A session is built once at startup: every listed file is decoded, checked
//! against the format of the first track and moved into the [`TrackStore`].
//! Any failure aborts the whole session, so a partially loaded set of tracks
//! never reaches the renderer.

use super::decoder::{ClipDecoder, DecodedClip};
use super::{Track, TrackFormat, TrackId, TrackStore};
use crate::{FormatField, Result, WavSwitchError, MAX_CHANNELS, MAX_TRACKS};
use std::fs;
use std::path::{Path, PathBuf};

/// Read a track list: one audio file path per line.
///
/// Surrounding whitespace is trimmed; blank lines and lines starting with `#` are
/// skipped. Paths are returned as written.
pub fn read_track_list<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| WavSwitchError::TrackList {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: Vec<PathBuf> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect();

    if entries.is_empty() {
        return Err(WavSwitchError::EmptyTrackList(path.to_path_buf()));
    }
    if entries.len() > MAX_TRACKS {
        return Err(WavSwitchError::TooManyTracks {
            found: entries.len(),
            max: MAX_TRACKS,
        });
    }

    Ok(entries)
}

/// The loaded set of tracks and their shared format.
#[derive(Debug)]
pub struct Session {
    format: TrackFormat,
    store: TrackStore,
}

impl Session {
    /// Start an empty builder.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Decode every path with `decoder` and build a session from the results.
    ///
    /// The track count is checked before any file is opened.
    pub fn load<D: ClipDecoder>(decoder: &D, paths: &[PathBuf]) -> Result<Self> {
        if paths.len() > MAX_TRACKS {
            return Err(WavSwitchError::TooManyTracks {
                found: paths.len(),
                max: MAX_TRACKS,
            });
        }

        let mut builder = Session::builder();
        for path in paths {
            builder.load(decoder, path)?;
        }
        builder.build()
    }

    /// Format shared by all tracks.
    pub fn format(&self) -> TrackFormat {
        self.format
    }

    /// The loaded tracks.
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// Number of loaded tracks.
    pub fn track_count(&self) -> usize {
        self.store.len()
    }

    /// Track labels in load order, for display.
    pub fn labels(&self) -> Vec<String> {
        self.store.iter().map(|t| t.label().to_string()).collect()
    }

    /// Split into the shared format and the track arena.
    pub fn into_parts(self) -> (TrackFormat, TrackStore) {
        (self.format, self.store)
    }
}

/// Incremental session construction with format validation.
#[derive(Debug)]
pub struct SessionBuilder {
    format: Option<TrackFormat>,
    store: TrackStore,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        SessionBuilder {
            format: None,
            store: TrackStore::new(),
        }
    }
}

impl SessionBuilder {
    /// Decode `path` and add it as the next track.
    pub fn load<D: ClipDecoder>(&mut self, decoder: &D, path: &Path) -> Result<TrackId> {
        if self.store.len() >= MAX_TRACKS {
            return Err(WavSwitchError::TooManyTracks {
                found: self.store.len() + 1,
                max: MAX_TRACKS,
            });
        }
        let clip = decoder.decode(path)?;
        self.add_clip(path, clip)
    }

    /// Validate an already decoded clip and add it as the next track.
    ///
    /// The first clip fixes the session format; later clips must match it exactly.
    pub fn add_clip(&mut self, path: &Path, clip: DecodedClip) -> Result<TrackId> {
        if self.store.len() >= MAX_TRACKS {
            return Err(WavSwitchError::TooManyTracks {
                found: self.store.len() + 1,
                max: MAX_TRACKS,
            });
        }

        if clip.channels == 0 || clip.channels > MAX_CHANNELS {
            return Err(WavSwitchError::Load {
                path: path.to_path_buf(),
                reason: format!(
                    "{} channels not supported (expected 1 to {MAX_CHANNELS})",
                    clip.channels
                ),
            });
        }
        if clip.frames() == 0 {
            return Err(WavSwitchError::Load {
                path: path.to_path_buf(),
                reason: "file contains no audio frames".into(),
            });
        }
        if clip.samples.len() % clip.channels as usize != 0 {
            return Err(WavSwitchError::Load {
                path: path.to_path_buf(),
                reason: "sample count is not a whole number of frames".into(),
            });
        }

        let format = TrackFormat {
            channels: clip.channels,
            sample_rate: clip.sample_rate,
        };
        if let Some(expected) = self.format {
            check_compatible(path, expected, format)?;
        }

        let frames = clip.frames();
        let track = Track::new(
            path.display().to_string(),
            clip.samples.into_boxed_slice(),
            format,
        );
        let id = self.store.push(track);
        self.format.get_or_insert(format);

        log::info!(
            "Loaded track {} ({} frames, {} ch @ {} Hz): {}",
            id.index(),
            frames,
            format.channels,
            format.sample_rate,
            path.display()
        );

        Ok(id)
    }

    /// Finish the session. At least one track must have been added.
    pub fn build(self) -> Result<Session> {
        let format = self
            .format
            .ok_or_else(|| WavSwitchError::Config("session has no tracks".into()))?;
        Ok(Session {
            format,
            store: self.store,
        })
    }
}

fn check_compatible(path: &Path, expected: TrackFormat, found: TrackFormat) -> Result<()> {
    let mismatch = |field, expected: u32, found: u32| WavSwitchError::Compatibility {
        path: path.to_path_buf(),
        field,
        expected,
        found,
    };

    if found.channels != expected.channels {
        return Err(mismatch(
            FormatField::Channels,
            expected.channels.into(),
            found.channels.into(),
        ));
    }
    if found.sample_rate != expected.sample_rate {
        return Err(mismatch(
            FormatField::SampleRate,
            expected.sample_rate,
            found.sample_rate,
        ));
    }
    Ok(())
}
