use crate::config::{AREA_X, AREA_Z, INITIAL_BODY};
use crate::error::GameError;
use crate::snake::{Direction, MoveResult, Point, Snake};
use crate::term::Terminal;
use crate::TermInt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info, warn};
use rand::Rng;

const SNAKE_CHAR: char = '@';
const APPLE_CHAR: char = 'A';
const BOTTOM_BORDER_CHAR: char = '-';
const SIDE_BORDER_CHAR: char = '|';
const CORNER_CHAR: char = '+';

/// Columns and rows needed to show the board with its borders.
const BOARD_WIDTH: TermInt = AREA_X as TermInt + 2;
const BOARD_HEIGHT: TermInt = AREA_Z as TermInt + 2;

/// How a game ended.
#[derive(Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Quit { score: usize },
    GameOver { score: usize },
    /// The terminal was too small for the board.
    SizeError,
}

impl GameOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            GameOutcome::SizeError => 1,
            _ => 0,
        }
    }

    /// Lines shown to the player once the game screen is gone.
    pub fn report(&self) -> Vec<String> {
        match self {
            GameOutcome::Quit { score } => vec![format!("Score: {}", score)],
            GameOutcome::GameOver { score } => vec!["GAME OVER!!!".to_string(), format!("Score: {}", score)],
            GameOutcome::SizeError => vec!["size error".to_string()],
        }
    }
}

pub struct SnakeGame<T: Terminal, R: Rng> {
    term: T,
    rng: R,
    snake: Snake,
    apple: Point,
}

impl<T: Terminal, R: Rng> SnakeGame<T, R> {
    pub fn new(term: T, mut rng: R) -> Self {
        let snake = Snake::new(INITIAL_BODY.iter().map(|&(x, z)| Point::new(x, z)).collect());
        let apple = spawn_apple(&mut rng);
        SnakeGame { term, rng, snake, apple }
    }

    /// Prepares the terminal, plays until the game ends, and always hands the
    /// terminal back in its original mode.
    pub fn run(&mut self) -> Result<GameOutcome, GameError> {
        self.term.setup()?;
        let outcome = self.play();
        self.term.restore()?;
        outcome
    }

    pub fn play(&mut self) -> Result<GameOutcome, GameError> {
        info!("new game, snake at {}, apple at {}", self.snake.head(), self.apple);

        loop {
            let (width, height) = self.term.size()?;
            if !fits_board(width, height) {
                warn!("terminal is {}x{}, need {}x{}", width, height, BOARD_WIDTH, BOARD_HEIGHT);
                self.term.clear()?;
                return Ok(GameOutcome::SizeError);
            }

            self.render()?;

            let key = self.term.read_key_blocking()?;
            let direction = convert_key(&key);
            debug!("key {:?} -> {:?}", key.code, direction);

            if let Some(outcome) = self.advance(direction)? {
                info!("game ended: {:?}", outcome);
                self.term.clear()?;
                return Ok(outcome);
            }
        }
    }

    /// Applies one input to the game state. Returns the outcome once the game is over.
    pub fn advance(&mut self, direction: Direction) -> Result<Option<GameOutcome>, GameError> {
        if direction == Direction::Quit {
            return Ok(Some(GameOutcome::Quit { score: self.snake.len() }));
        }

        match self.snake.step(direction, self.apple)? {
            MoveResult::Crashed => {
                info!("snake left the board at {}", self.snake.head());
                Ok(Some(GameOutcome::GameOver { score: self.snake.len() }))
            }
            MoveResult::Moved { grew } => {
                if grew {
                    info!("apple eaten at {}, length {}", self.apple, self.snake.len());
                    self.apple = spawn_apple(&mut self.rng);
                }
                Ok(None)
            }
        }
    }

    fn render(&mut self) -> Result<(), GameError> {
        self.term.clear()?;

        for pos in self.snake.body().iter().filter_map(|p| p.to_coords()) {
            self.term.print_at(pos, SNAKE_CHAR)?;
        }

        if let Some(pos) = self.apple.to_coords() {
            self.term.print_at(pos, APPLE_CHAR)?;
        }

        let (border_x, border_z) = (BOARD_WIDTH - 1, BOARD_HEIGHT - 1);
        let bottom: String = std::iter::repeat(BOTTOM_BORDER_CHAR).take(border_x as usize).collect();
        self.term.print_str_at((0, border_z), &bottom)?;

        for row in 0..border_z {
            self.term.print_at((border_x, row), SIDE_BORDER_CHAR)?;
        }
        self.term.print_at((border_x, border_z), CORNER_CHAR)?;

        self.term.flush()?;
        Ok(())
    }
}

/// Maps a key press to a direction. Unbound keys give `Direction::None`.
pub fn convert_key(key: &KeyEvent) -> Direction {
    if is_ctrl_c(key) {
        return Direction::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Direction::Up,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Direction::Left,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Direction::Down,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Direction::Right,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Direction::Quit,
        _ => Direction::None,
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn fits_board(width: TermInt, height: TermInt) -> bool {
    width >= BOARD_WIDTH && height >= BOARD_HEIGHT
}

// The outermost column and row are never picked.
fn spawn_apple<R: Rng>(rng: &mut R) -> Point {
    let apple = Point::new(rng.gen_range(0..AREA_X), rng.gen_range(0..AREA_Z));
    debug!("apple spawned at {}", apple);
    apple
}
