//! wavswitch: live switching between looping WAV tracks
//!
//! Loads every file named in a track list, opens the default audio device and
//! plays the operator's selection until `q` is entered.

#[cfg(not(feature = "streaming"))]
fn main() {
    eprintln!(
        "The wavswitch CLI requires the \"streaming\" feature. Rebuild with `--features streaming` to enable playback."
    );
}

#[cfg(feature = "streaming")]
mod args;

#[cfg(feature = "streaming")]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use std::io;
    use std::sync::Arc;

    use args::CliArgs;
    use wavswitch::{
        read_track_list, AudioDevice, Controller, PlaybackEngine, SelectionSignal, Session,
        StatusScreen, StreamConfig, WavDecoder,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    if args.show_help || args.list_path.is_none() {
        CliArgs::print_help();
        return if args.show_help && args.list_path.is_none() {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Invalid arguments"))
        };
    }
    let list_path = args.list_path.context("missing track list")?;

    // Load everything before the audio device is touched
    let paths = read_track_list(&list_path)
        .with_context(|| format!("Failed to read track list {}", list_path.display()))?;
    let session = Session::load(&WavDecoder, &paths).context("Failed to load tracks")?;

    println!("Track Information:");
    for (i, track) in session.store().iter().enumerate() {
        println!(
            "{} Frames: {}, Channels: {}, Sample Rate: {} {}",
            i,
            track.frames(),
            track.channels(),
            track.sample_rate(),
            track.label()
        );
    }

    let config = StreamConfig::new(session.format(), args.frames_per_buffer)
        .context("Invalid stream configuration")?;
    println!("\nStreaming Configuration:");
    println!("  Sample rate: {} Hz", config.sample_rate);
    println!("  Channels:    {}", config.channels);
    println!(
        "  Block size:  {} frames ({:.1}ms latency)\n",
        config.frames_per_buffer,
        config.latency_ms()
    );

    let screen = StatusScreen::new(session.labels(), !args.plain);
    let signal = Arc::new(SelectionSignal::new());
    let engine = PlaybackEngine::new(session, Arc::clone(&signal));

    let device = AudioDevice::start(engine, config).context("Failed to start audio output")?;

    let controller = Controller::new(signal, screen);
    let result = controller.run(io::stdin().lock(), io::stdout().lock());

    // Stop the stream even if the control loop failed
    device.shutdown();
    result.context("Control loop failed")?;

    println!("\nPlayback stopped.");
    Ok(())
}
