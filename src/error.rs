use thiserror::Error;

use crate::snake::Direction;

#[derive(Error, Debug)]
pub enum GameError {
    /// A direction outside the movement set was applied to a point.
    #[error("unrecognized direction: {0:?}")]
    UnrecognizedDirection(Direction),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
