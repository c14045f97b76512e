//! Maze Chomp entry point
//!
//! Parses the command line, loads settings and runs the game loop against
//! either the terminal or the headless presenter.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use maze_chomp::app::ExitReason;
use maze_chomp::audio::{AudioManager, AudioSink, TerminalBell};
use maze_chomp::renderer::{HeadlessPresenter, Presenter, TerminalPresenter};
use maze_chomp::sim::{GameSession, Outcome};
use maze_chomp::{GameLoop, Settings};

#[derive(Parser)]
#[command(name = "maze-chomp")]
#[command(version, about = "Eat every pellet, dodge the wandering ghosts")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Seed for the ghost RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Silence all sound cues
    #[arg(long)]
    mute: bool,

    /// Let the agent play itself
    #[arg(long)]
    demo: bool,

    /// Run without a screen and print the final state as JSON
    #[arg(long)]
    headless: bool,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.settings.as_deref())?;
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    settings.muted |= cli.mute;
    settings.demo |= cli.demo;

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Maze Chomp starting (seed {})", seed);

    let sink: Option<Box<dyn AudioSink>> = if cli.headless {
        None
    } else {
        Some(Box::new(TerminalBell))
    };
    let audio = AudioManager::from_settings(&settings, sink);
    let mut game = GameLoop::new(GameSession::new(seed), audio, &settings).with_max_ticks(cli.max_ticks);

    if cli.headless {
        let mut presenter = HeadlessPresenter::new();
        let reason = run(&mut game, &mut presenter)?;
        let json = serde_json::to_string_pretty(&game.session().snapshot())
            .context("Failed to serialize final state")?;
        println!("{json}");
        log::info!("Headless run ended: {:?}", reason);
        return Ok(());
    }

    let mut presenter = TerminalPresenter::new()?;
    let result = run(&mut game, &mut presenter);
    presenter.restore()?;

    let session = game.session();
    match result? {
        ExitReason::Finished(Outcome::Won) => println!("You Win! Final score: {}", session.score),
        ExitReason::Finished(Outcome::Lost) => println!("Game Over! Final score: {}", session.score),
        ExitReason::Quit | ExitReason::TickLimit => println!("Final score: {}", session.score),
    }
    Ok(())
}

fn run(game: &mut GameLoop, presenter: &mut dyn Presenter) -> Result<ExitReason> {
    game.run(presenter).context("Game loop failed")
}
