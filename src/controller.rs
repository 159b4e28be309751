//! Operator command loop
//!
//! Runs on the control thread at human speed. Each input line is reduced to a
//! [`Command`]; selections are validated against the track count here, before
//! they reach the [`SelectionSignal`], because the renderer trusts the signal.

use crate::selection::{Selection, SelectionSignal};
use crate::status::StatusScreen;
use crate::track::TrackId;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::sync::Arc;

/// A recognised operator command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play the given track
    Select(TrackId),
    /// Switch to silence
    Mute,
    /// Leave the control loop
    Quit,
}

impl Command {
    /// Parse one input line. Only the first character counts (case-insensitive):
    /// a digit below `track_count` selects that track, `m` mutes, `q` quits.
    /// Anything else yields `None`.
    pub fn parse(line: &str, track_count: usize) -> Option<Self> {
        let first = line.trim_start().chars().next()?.to_ascii_lowercase();
        match first {
            'm' => Some(Command::Mute),
            'q' => Some(Command::Quit),
            c => {
                let index = c.to_digit(10)? as usize;
                (index < track_count).then_some(Command::Select(TrackId(index)))
            }
        }
    }
}

/// Writes operator selections into the shared signal.
#[derive(Debug)]
pub struct Controller {
    signal: Arc<SelectionSignal>,
    screen: StatusScreen,
}

impl Controller {
    /// Controller driving `signal`; the screen's track list bounds valid selections.
    pub fn new(signal: Arc<SelectionSignal>, screen: StatusScreen) -> Self {
        Controller { signal, screen }
    }

    /// Current selection as last published.
    pub fn selection(&self) -> Selection {
        self.signal.get()
    }

    /// Apply one command. Returns `Break` on quit.
    pub fn apply(&self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Select(id) => {
                log::debug!("Selecting track {}", id.index());
                self.signal.set(Selection::Track(id));
            }
            Command::Mute => {
                log::debug!("Muting output");
                self.signal.set(Selection::Silence);
            }
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Read commands line by line until quit or end of input, redrawing the
    /// status screen after every line.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        self.screen.draw(&mut output, self.selection())?;

        for line in input.lines() {
            let line = line?;
            match Command::parse(&line, self.screen.track_count()) {
                Some(command) => {
                    if self.apply(command).is_break() {
                        return Ok(());
                    }
                }
                None => log::debug!("Ignoring input {line:?}"),
            }
            self.screen.draw(&mut output, self.selection())?;
        }

        log::debug!("Input closed, leaving control loop");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn controller(tracks: usize) -> (Controller, Arc<SelectionSignal>) {
        let signal = Arc::new(SelectionSignal::new());
        let labels = (0..tracks).map(|i| format!("t{i}.wav")).collect();
        let controller = Controller::new(Arc::clone(&signal), StatusScreen::new(labels, false));
        (controller, signal)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("2", 3), Some(Command::Select(TrackId(2))));
        assert_eq!(Command::parse("0 extra", 3), Some(Command::Select(TrackId(0))));
        assert_eq!(Command::parse("M", 3), Some(Command::Mute));
        assert_eq!(Command::parse("mute", 3), Some(Command::Mute));
        assert_eq!(Command::parse("Q", 3), Some(Command::Quit));
        assert_eq!(Command::parse("  q", 3), Some(Command::Quit));
    }

    #[test]
    fn test_parse_rejects_out_of_range_and_noise() {
        assert_eq!(Command::parse("3", 3), None);
        assert_eq!(Command::parse("9", 8), None);
        assert_eq!(Command::parse("", 3), None);
        assert_eq!(Command::parse("x", 3), None);
        assert_eq!(Command::parse("-1", 3), None);
    }

    #[test]
    fn test_run_applies_commands_until_quit() {
        let (controller, signal) = controller(3);
        let input = Cursor::new("1\nm\n2\nq\n0\n");
        let mut output = Vec::new();

        controller.run(input, &mut output).unwrap();

        // "0" after quit is never read.
        assert_eq!(signal.get(), Selection::Track(TrackId(2)));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Playing: muted"), "{text}");
        assert!(text.contains("Playing:  1"), "{text}");
    }

    #[test]
    fn test_run_ignores_invalid_selection() {
        let (controller, signal) = controller(2);
        controller.run(Cursor::new("1\n5\nhello\n"), io::sink()).unwrap();
        assert_eq!(signal.get(), Selection::Track(TrackId(1)));
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let (controller, signal) = controller(1);
        controller.run(Cursor::new(""), io::sink()).unwrap();
        assert_eq!(signal.get(), Selection::Silence);
    }

    #[test]
    fn test_apply_quit_breaks() {
        let (controller, _signal) = controller(1);
        assert!(controller.apply(Command::Quit).is_break());
        assert!(controller.apply(Command::Mute).is_continue());
    }
}
