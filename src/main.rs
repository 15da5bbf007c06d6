#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::env;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use distortus::{app::App, constants::LOOP_TIME, platform};

/// Command line options for the headless runner.
#[derive(Debug, Default)]
struct Options {
    seed: Option<u64>,
    frames: Option<u64>,
}

impl Options {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = Options::default();
        let mut args = args.skip(1);
        while let Some(arg) = args.next() {
            let mut value = |name: &str| args.next().ok_or_else(|| anyhow!("{name} needs a value"));
            match arg.as_str() {
                "--seed" => options.seed = Some(value("--seed")?.parse().context("--seed must be an integer")?),
                "--frames" => options.frames = Some(value("--frames")?.parse().context("--frames must be an integer")?),
                other => return Err(anyhow!("Unknown argument: {other}")),
            }
        }
        Ok(options)
    }
}

/// Runs one round with the autopilot at the keyboard until it is decided or
/// the frame cap is hit.
pub fn main() -> Result<()> {
    platform::init_console()?;

    let options = Options::parse(env::args())?;
    let mut app = App::new(options.seed);

    info!(loop_time = ?LOOP_TIME, ?options, "Starting game loop");

    let mut frames = 0u64;
    while app.run() {
        frames += 1;
        if options.frames.is_some_and(|cap| frames >= cap) {
            info!(frames, "Frame cap reached");
            break;
        }
    }

    let hud = app.game.hud();
    match &hud.end_screen {
        Some(screen) => info!(title = screen.title, stats = %screen.stats, "Round over"),
        None => info!(time = %hud.time_text(), eaten = %hud.counter_text(), "Round unfinished"),
    }

    Ok(())
}
