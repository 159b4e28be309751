//! Text status screen for the control loop

use crate::selection::Selection;
use std::io::{self, Write};

/// ANSI sequence: clear screen and home the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// Menu of loaded tracks plus the current selection.
#[derive(Debug, Clone)]
pub struct StatusScreen {
    labels: Vec<String>,
    clear: bool,
}

impl StatusScreen {
    /// Screen listing `labels` in track order; `clear` enables ANSI screen clearing.
    pub fn new(labels: Vec<String>, clear: bool) -> Self {
        StatusScreen { labels, clear }
    }

    /// Number of selectable tracks.
    pub fn track_count(&self) -> usize {
        self.labels.len()
    }

    /// Redraw the whole screen.
    pub fn draw<W: Write>(&self, out: &mut W, selection: Selection) -> io::Result<()> {
        if self.clear {
            out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        writeln!(out, "Select track by number:")?;
        for (i, label) in self.labels.iter().enumerate() {
            writeln!(out, "{i:2} {label}")?;
        }
        writeln!(out, "M to mute, Q to quit")?;
        match selection {
            Selection::Silence => write!(out, "Playing: muted, New selection: ")?,
            Selection::Track(id) => write!(out, "Playing: {:2}, New selection: ", id.index())?,
        }
        out.flush()
    }
}
