//! Terminal simulator for the read-aloud engine.
//!
//! Loads a text file, replays a gesture script against simulated speech
//! engines and prints the highlighted text after every step.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use env_logger::Env;
use log::info;
use readaloud_core::{
    app::{ReadAloudApp, ReadAloudConfig},
    input::ScriptedGestures,
    scrub::DEFAULT_SCROLL_UNIT,
    speech::SpeechParams,
};
use readaloud_sim::{LogHaptics, SimulatedSpeech, StyledBuffer};

use driver::Driver;

#[path = "main/driver.rs"]
mod driver;
#[path = "main/script.rs"]
mod script;

#[derive(Debug, Parser)]
#[command(name = "readaloud", about = "Read a text file aloud with drag scrubbing")]
struct Cli {
    /// Text file to read.
    path: PathBuf,

    /// Gesture script, e.g. `tap,wait:4,pan:25,pan:45,end,tap`.
    #[arg(long, default_value = "tap")]
    script: String,

    /// Speech rounds delivered after each gesture.
    #[arg(long, default_value_t = 1)]
    steps_per_event: usize,

    /// Lines shown around the highlighted word.
    #[arg(long, default_value_t = 1)]
    context: usize,

    /// Main speech rate.
    #[arg(long, default_value_t = SpeechParams::NORMAL.rate)]
    rate: f32,

    /// Scrub preview speech rate.
    #[arg(long, default_value_t = SpeechParams::PREVIEW.rate)]
    preview_rate: f32,

    /// Silence before each main utterance, in milliseconds.
    #[arg(long, default_value_t = 0)]
    pre_delay_ms: u32,

    /// Silence after each main utterance, in milliseconds.
    #[arg(long, default_value_t = 0)]
    post_delay_ms: u32,

    /// Drag distance in points per word step.
    #[arg(long, default_value_t = DEFAULT_SCROLL_UNIT)]
    scroll_unit: f32,

    /// Simulate a pressure-capable haptic engine.
    #[arg(long)]
    pressure: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    ensure!(
        cli.scroll_unit > 0.0,
        "scroll unit must be positive, got {}",
        cli.scroll_unit
    );

    let text = fs::read_to_string(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    let steps = script::parse(&cli.script).context("failed to parse gesture script")?;

    let config = ReadAloudConfig::default()
        .with_speech(
            SpeechParams::NORMAL
                .with_rate(cli.rate)
                .with_delays(cli.pre_delay_ms, cli.post_delay_ms),
        )
        .with_preview(SpeechParams::PREVIEW.with_rate(cli.preview_rate))
        .with_scroll_unit(cli.scroll_unit);
    info!(
        "readaloud: {} chars, {} steps, config={:?}",
        text.chars().count(),
        steps.len(),
        config
    );

    let mut app = ReadAloudApp::new(
        SimulatedSpeech::new("main"),
        SimulatedSpeech::new("preview"),
        StyledBuffer::new(&text),
        LogHaptics::new(cli.pressure),
        ScriptedGestures::new(&[]),
        config,
    );
    Driver::new(cli.steps_per_event, cli.context).run(&mut app, &steps);

    Ok(())
}
