mod config;
mod error;
mod game;
mod snake;
mod term;

use std::fs::File;
use std::process::exit;

use anyhow::Context;
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

use crate::game::SnakeGame;
use crate::term::TermManager;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

fn main() -> anyhow::Result<()> {
    // stdout belongs to the game, so logs go to a file
    let logging = init_logging();
    info!("starting snake");

    let mut game = SnakeGame::new(TermManager::new(), rand::thread_rng());
    let outcome = game.run().context("snake stopped unexpectedly")?;

    if let Err(err) = logging {
        eprintln!("warning: logging disabled: {:#}", err);
    }

    for line in outcome.report() {
        println!("{}", line);
    }

    info!("exiting with status {}", outcome.exit_code());
    exit(outcome.exit_code())
}

fn init_logging() -> anyhow::Result<()> {
    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    let file = File::create(config::LOG_FILE)
        .with_context(|| format!("cannot create {}", config::LOG_FILE))?;
    WriteLogger::init(level, Config::default(), file).context("logger already set")?;
    Ok(())
}
