//! Cross-thread track selection
//!
//! The control thread and the audio thread share exactly one value: which track
//! is playing, or silence. It is stored in a single atomic word so the audio
//! thread can read it without ever waiting on the control thread.

use crate::track::TrackId;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Word value encoding [`Selection::Silence`].
const SILENCE: usize = usize::MAX;

/// What the renderer should play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Output zeros
    Silence,
    /// Loop the given track
    Track(TrackId),
}

impl Selection {
    fn to_word(self) -> usize {
        match self {
            Selection::Silence => SILENCE,
            Selection::Track(id) => id.index(),
        }
    }

    fn from_word(word: usize) -> Self {
        match word {
            SILENCE => Selection::Silence,
            // Only words produced by `to_word` are ever stored.
            index => Selection::Track(TrackId(index)),
        }
    }
}

/// Single-writer, single-reader selection word.
///
/// A change becomes visible to the renderer on its next invocation (or the one
/// after); there is no stronger ordering.
#[derive(Debug)]
pub struct SelectionSignal {
    word: AtomicUsize,
}

impl SelectionSignal {
    /// New signal, initially [`Selection::Silence`].
    pub fn new() -> Self {
        SelectionSignal {
            word: AtomicUsize::new(SILENCE),
        }
    }

    /// Publish a new selection (control thread).
    pub fn set(&self, selection: Selection) {
        self.word.store(selection.to_word(), Ordering::Release);
    }

    /// Read the current selection (audio thread). Never blocks.
    pub fn get(&self) -> Selection {
        Selection::from_word(self.word.load(Ordering::Acquire))
    }
}

impl Default for SelectionSignal {
    fn default() -> Self {
        Self::new()
    }
}
