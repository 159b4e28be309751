//! Real-time renderer
//!
//! [`PlaybackEngine::render`] is called from the audio thread once per output
//! block. It reads the selection once, then either writes silence or copies the
//! selected track's samples from its cursor, wrapping at the end of the clip.
//!
//! The engine owns every track outright. The only thing it shares with the
//! control thread is the [`SelectionSignal`], so rendering never allocates,
//! never locks and finishes in time proportional to the block size.

use crate::selection::{Selection, SelectionSignal};
use crate::track::session::Session;
use crate::track::{TrackFormat, TrackStore};
use std::sync::Arc;

/// Loop player for a fixed set of tracks.
#[derive(Debug)]
pub struct PlaybackEngine {
    store: TrackStore,
    format: TrackFormat,
    signal: Arc<SelectionSignal>,
}

impl PlaybackEngine {
    /// Take ownership of a loaded session and listen to `signal`.
    pub fn new(session: Session, signal: Arc<SelectionSignal>) -> Self {
        let (format, store) = session.into_parts();
        PlaybackEngine {
            store,
            format,
            signal,
        }
    }

    /// Interleaved channel count of the output.
    pub fn channels(&self) -> usize {
        self.format.channels as usize
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    /// Tracks (with their current cursors).
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// Fill `output` with `frame_count` frames of interleaved audio.
    ///
    /// Writes `frame_count * channels` samples, or all of `output` if it is
    /// shorter. Every written slot gets a value regardless of the selection.
    pub fn render(&mut self, output: &mut [f32], frame_count: usize) {
        let wanted = frame_count.saturating_mul(self.channels());
        let len = wanted.min(output.len());
        let out = &mut output[..len];

        // One snapshot per block: a concurrent change applies from the next block.
        match self.signal.get() {
            Selection::Silence => out.fill(0.0),
            Selection::Track(id) => match self.store.get_mut(id) {
                Some(track) => track.fill(out),
                None => out.fill(0.0),
            },
        }
    }

    /// Render as many whole frames as fit in `output`.
    pub fn render_block(&mut self, output: &mut [f32]) {
        let frames = output.len() / self.channels();
        self.render(output, frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::decoder::DecodedClip;
    use crate::track::TrackId;
    use std::path::Path;

    fn engine(clips: &[(&[f32], u16)]) -> (PlaybackEngine, Arc<SelectionSignal>) {
        let mut builder = Session::builder();
        for (i, (samples, channels)) in clips.iter().enumerate() {
            builder
                .add_clip(
                    Path::new(&format!("track{i}.wav")),
                    DecodedClip {
                        samples: samples.to_vec(),
                        channels: *channels,
                        sample_rate: 44100,
                    },
                )
                .unwrap();
        }
        let signal = Arc::new(SelectionSignal::new());
        let engine = PlaybackEngine::new(builder.build().unwrap(), Arc::clone(&signal));
        (engine, signal)
    }

    fn select(engine: &PlaybackEngine, signal: &SelectionSignal, index: usize) -> TrackId {
        let id = engine.store().id(index).unwrap();
        signal.set(Selection::Track(id));
        id
    }

    #[test]
    fn test_silence_writes_zeros() {
        let (mut engine, _signal) = engine(&[(&[1.0, 2.0, 3.0], 1)]);
        for frames in [0, 1, 7, 512] {
            let mut out = vec![9.0; frames];
            engine.render(&mut out, frames);
            assert!(out.iter().all(|&s| s == 0.0), "frames={frames}");
        }
    }

    #[test]
    fn test_silence_leaves_cursors_alone() {
        let (mut engine, signal) = engine(&[(&[1.0, 2.0, 3.0], 1), (&[4.0, 5.0], 1)]);
        let a = select(&engine, &signal, 0);
        let mut out = [0.0; 2];
        engine.render(&mut out, 2);

        signal.set(Selection::Silence);
        for _ in 0..5 {
            engine.render(&mut out, 2);
        }
        assert_eq!(engine.store().get(a).unwrap().cursor(), 2);
        assert_eq!(engine.store().id(1).and_then(|b| engine.store().get(b)).unwrap().cursor(), 0);
    }

    #[test]
    fn test_loop_fidelity_across_blocks() {
        let samples: Vec<f32> = (0..5).map(|i| i as f32).collect();
        let (mut engine, signal) = engine(&[(&samples, 1)]);
        select(&engine, &signal, 0);

        let mut rendered = Vec::new();
        for frames in [3, 4, 1, 9, 2] {
            let mut out = vec![0.0; frames];
            engine.render(&mut out, frames);
            rendered.extend_from_slice(&out);
        }

        let expected: Vec<f32> = samples.iter().copied().cycle().take(rendered.len()).collect();
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_stereo_interleaving_preserved() {
        let (mut engine, signal) = engine(&[(&[0.1, -0.1, 0.2, -0.2, 0.3, -0.3], 2)]);
        select(&engine, &signal, 0);

        let mut out = [0.0; 8];
        engine.render(&mut out, 4);
        assert_eq!(out, [0.1, -0.1, 0.2, -0.2, 0.3, -0.3, 0.1, -0.1]);
    }

    #[test]
    fn test_switching_does_not_rewind_or_touch_others() {
        let (mut engine, signal) = engine(&[(&[1.0, 2.0, 3.0, 4.0], 1), (&[10.0, 20.0, 30.0], 1)]);
        let a = select(&engine, &signal, 0);
        let mut out = [0.0; 3];
        engine.render(&mut out, 3);

        let b = select(&engine, &signal, 1);
        engine.render(&mut out, 2);
        assert_eq!(&out[..2], &[10.0, 20.0]);
        assert_eq!(engine.store().get(a).unwrap().cursor(), 3);

        signal.set(Selection::Track(a));
        engine.render(&mut out, 3);
        assert_eq!(out, [4.0, 1.0, 2.0]);
        assert_eq!(engine.store().get(b).unwrap().cursor(), 2);
        assert_eq!(engine.store().get(a).unwrap().samples(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_short_output_is_filled_without_panic() {
        let (mut engine, signal) = engine(&[(&[1.0, 2.0], 1)]);
        select(&engine, &signal, 0);
        let mut out = [0.0; 3];
        engine.render(&mut out, 100);
        assert_eq!(out, [1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_unknown_track_renders_silence() {
        let (mut engine, signal) = engine(&[(&[1.0], 1)]);
        signal.set(Selection::Track(TrackId(5)));
        let mut out = [7.0; 4];
        engine.render(&mut out, 4);
        assert_eq!(out, [0.0; 4]);
    }

    #[test]
    fn test_render_block_uses_whole_frames() {
        let (mut engine, signal) = engine(&[(&[0.5, 0.6], 2)]);
        select(&engine, &signal, 0);
        let mut out = [9.0; 5];
        engine.render_block(&mut out);
        assert_eq!(out, [0.5, 0.6, 0.5, 0.6, 9.0]);
    }
}
