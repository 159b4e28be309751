//! Command-line argument parsing for the wavswitch CLI.
//!
//! This module handles parsing and validation of CLI arguments including:
//! - Track list path
//! - Render block size
//! - Plain (no ANSI) status output

use std::env;
use std::path::PathBuf;
use wavswitch::DEFAULT_FRAMES_PER_BUFFER;

/// Parsed command-line arguments.
#[derive(Debug, PartialEq, Eq)]
pub struct CliArgs {
    /// Track list file
    pub list_path: Option<PathBuf>,
    /// Frames rendered per audio block
    pub frames_per_buffer: usize,
    /// Disable screen clearing in the status display
    pub plain: bool,
    /// Whether help was requested (or arguments were invalid)
    pub show_help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            list_path: None,
            frames_per_buffer: DEFAULT_FRAMES_PER_BUFFER,
            plain: false,
            show_help: false,
        }
    }
}

impl CliArgs {
    /// Parse arguments from command line.
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse arguments from an iterator (program name already skipped).
    pub fn parse_from<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut args = Self::default();
        let mut iter = iter.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--plain" => {
                    args.plain = true;
                }
                "--help" | "-h" => {
                    args.show_help = true;
                }
                "--frames-per-buffer" => {
                    if let Some(value) = iter.next() {
                        args.set_frames(&value);
                    } else {
                        eprintln!("--frames-per-buffer requires an argument");
                        args.show_help = true;
                    }
                }
                _ if arg.starts_with("--frames-per-buffer=") => {
                    let value = &arg["--frames-per-buffer=".len()..];
                    args.set_frames(value);
                }
                _ if arg.starts_with('-') => {
                    eprintln!("Unknown flag: {}", arg);
                    args.show_help = true;
                }
                _ => {
                    if args.list_path.is_some() {
                        eprintln!("Unexpected extra argument: {}", arg);
                        args.show_help = true;
                    } else {
                        args.list_path = Some(PathBuf::from(arg));
                    }
                }
            }
        }

        args
    }

    fn set_frames(&mut self, value: &str) {
        match value.parse::<usize>() {
            Ok(frames) => self.frames_per_buffer = frames,
            Err(_) => {
                eprintln!("Invalid frame count: {}", value);
                self.show_help = true;
            }
        }
    }

    /// Print help text to stderr.
    pub fn print_help() {
        eprintln!(
            "Usage:\n  wavswitch [--frames-per-buffer <N>] [--plain] <track_list>\n\n\
             Flags:\n\
             \x20 --frames-per-buffer <N>  Frames rendered per audio block (default {DEFAULT_FRAMES_PER_BUFFER})\n\
             \x20 --plain                  Do not clear the screen between status updates\n\
             \x20 -h, --help               Show this help\n\n\
             Track list:\n\
             \x20 Plain text, one WAV path per line. Blank lines and lines starting\n\
             \x20 with '#' are ignored. All tracks must share channel count and sample rate.\n\n\
             Commands while playing:\n\
             \x20 <digit>  Play that track\n\
             \x20 m        Mute\n\
             \x20 q        Quit\n\n\
             Set RUST_LOG=info (or debug) for diagnostic logging.\n"
        );
    }
}
