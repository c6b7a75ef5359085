use std::fmt;
use std::ops::{Add, Mul, Rem, Sub};

use crate::config::{AREA_X, AREA_Z};
use crate::error::GameError;
use crate::{Coords, TermInt};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
    /// No recognized input this tick.
    None,
    Quit,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            other => other,
        }
    }
}

/// A cell on the board. `z` grows downwards, like terminal rows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub z: i32,
}

impl Point {
    pub const fn new(x: i32, z: i32) -> Self {
        Point { x, z }
    }

    /// The neighbouring cell one step towards `direction`. `None` stays put.
    pub fn apply(self, direction: Direction) -> Result<Point, GameError> {
        match direction {
            Direction::Up => Ok(self - Point::new(0, 1)),
            Direction::Left => Ok(self - Point::new(1, 0)),
            Direction::Down => Ok(self + Point::new(0, 1)),
            Direction::Right => Ok(self + Point::new(1, 0)),
            Direction::None => Ok(self),
            Direction::Quit => Err(GameError::UnrecognizedDirection(direction)),
        }
    }

    pub fn is_valid(&self) -> bool {
        (0..=AREA_X).contains(&self.x) && (0..=AREA_Z).contains(&self.z)
    }

    /// Screen position of the cell, if it lies on the board.
    pub fn to_coords(self) -> Option<Coords> {
        if self.is_valid() {
            Some((self.x as TermInt, self.z as TermInt))
        } else {
            None
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.z + other.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.z - other.z)
    }
}

impl Mul for Point {
    type Output = Point;

    fn mul(self, other: Point) -> Point {
        Point::new(self.x * other.x, self.z * other.z)
    }
}

impl Rem for Point {
    type Output = Point;

    fn rem(self, other: Point) -> Point {
        Point::new(self.x % other.x, self.z % other.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { grew: bool },
    /// The head left the board. It stays in the body so it counts towards the score.
    Crashed,
}

pub struct Snake {
    body: Vec<Point>,
}

impl Snake {
    /// Builds a snake from its cells, tail first. `body` must not be empty.
    pub fn new(body: Vec<Point>) -> Self {
        debug_assert!(!body.is_empty());
        Snake { body }
    }

    pub fn body(&self) -> &[Point] {
        &self.body
    }

    pub fn head(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Advances one tick. A movement direction pushes a new head and drops the
    /// tail; `Direction::None` leaves the body alone. Afterwards, if the head sits
    /// on `apple`, a segment is added at the tail end, one step behind the head.
    pub fn step(&mut self, direction: Direction, apple: Point) -> Result<MoveResult, GameError> {
        if direction != Direction::None {
            let new_head = self.head().apply(direction)?;
            self.body.push(new_head);

            if !new_head.is_valid() {
                return Ok(MoveResult::Crashed);
            }

            self.body.remove(0);
        }

        let head = self.head();
        let grew = head == apple;
        if grew {
            let tail = head.apply(direction.reverse())?;
            self.body.insert(0, tail);
        }

        Ok(MoveResult::Moved { grew })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVES: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    fn initial_snake() -> Snake {
        Snake::new(vec![Point::new(2, 2), Point::new(3, 2), Point::new(4, 2), Point::new(5, 2)])
    }

    fn points(cells: &[(i32, i32)]) -> Vec<Point> {
        cells.iter().map(|&(x, z)| Point::new(x, z)).collect()
    }

    #[test]
    fn validity_matches_inclusive_bounds() {
        for x in -2..=AREA_X + 2 {
            for z in -2..=AREA_Z + 2 {
                let expected = 0 <= x && x <= AREA_X && 0 <= z && z <= AREA_Z;
                assert_eq!(Point::new(x, z).is_valid(), expected, "({}, {})", x, z);
            }
        }
    }

    #[test]
    fn apply_moves_one_cell() {
        let p = Point::new(4, 7);
        assert_eq!(p.apply(Direction::Up).unwrap(), Point::new(4, 6));
        assert_eq!(p.apply(Direction::Down).unwrap(), Point::new(4, 8));
        assert_eq!(p.apply(Direction::Left).unwrap(), Point::new(3, 7));
        assert_eq!(p.apply(Direction::Right).unwrap(), Point::new(5, 7));
        assert_eq!(p.apply(Direction::None).unwrap(), p);
    }

    #[test]
    fn apply_rejects_quit() {
        let err = Point::new(1, 1).apply(Direction::Quit).unwrap_err();
        assert!(matches!(err, GameError::UnrecognizedDirection(Direction::Quit)));
    }

    #[test]
    fn reverse_undoes_a_move() {
        for &d in MOVES.iter() {
            for &p in &[Point::new(0, 0), Point::new(AREA_X, AREA_Z), Point::new(-3, 9)] {
                let there = p.apply(d).unwrap();
                assert_eq!(there.apply(d.reverse()).unwrap(), p);
            }
            assert_eq!(d.reverse().reverse(), d);
        }
        assert_eq!(Direction::None.reverse(), Direction::None);
        assert_eq!(Direction::Quit.reverse(), Direction::Quit);
    }

    #[test]
    fn point_arithmetic_is_elementwise() {
        let a = Point::new(7, 5);
        let b = Point::new(2, 3);
        assert_eq!(a + b, Point::new(9, 8));
        assert_eq!(a - b, Point::new(5, 2));
        assert_eq!(a * b, Point::new(14, 15));
        assert_eq!(a % b, Point::new(1, 2));
    }

    #[test]
    fn only_board_cells_have_coords() {
        assert_eq!(Point::new(AREA_X, AREA_Z).to_coords(), Some((AREA_X as u16, AREA_Z as u16)));
        assert_eq!(Point::new(-1, 0).to_coords(), None);
        assert_eq!(Point::new(0, AREA_Z + 1).to_coords(), None);
        assert_eq!(Point::new(3, -4).to_string(), "(3, -4)");
    }

    #[test]
    fn moving_keeps_length() {
        let mut snake = initial_snake();
        let apple = Point::new(0, 14);

        assert_eq!(snake.step(Direction::Right, apple).unwrap(), MoveResult::Moved { grew: false });
        assert_eq!(snake.body(), &points(&[(3, 2), (4, 2), (5, 2), (6, 2)])[..]);

        for _ in 0..5 {
            snake.step(Direction::Right, apple).unwrap();
            assert_eq!(snake.len(), 4);
        }
        assert_eq!(snake.head(), Point::new(11, 2));
    }

    #[test]
    fn idle_tick_leaves_body_alone() {
        let mut snake = initial_snake();
        assert_eq!(snake.step(Direction::None, Point::new(0, 14)).unwrap(), MoveResult::Moved { grew: false });
        assert_eq!(snake.body(), &points(&[(2, 2), (3, 2), (4, 2), (5, 2)])[..]);
    }

    #[test]
    fn leaving_the_board_crashes_with_head_kept() {
        let mut snake = Snake::new(points(&[(27, 2), (28, 2), (29, 2), (30, 2)]));
        assert_eq!(snake.step(Direction::Right, Point::new(0, 14)).unwrap(), MoveResult::Crashed);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), Point::new(31, 2));

        let mut snake = Snake::new(points(&[(0, 3), (0, 2), (0, 1), (0, 0)]));
        assert_eq!(snake.step(Direction::Up, Point::new(5, 5)).unwrap(), MoveResult::Crashed);
    }

    #[test]
    fn eating_adds_a_segment_behind_the_head() {
        let mut snake = initial_snake();
        assert_eq!(snake.step(Direction::Right, Point::new(6, 2)).unwrap(), MoveResult::Moved { grew: true });
        assert_eq!(snake.body(), &points(&[(5, 2), (3, 2), (4, 2), (5, 2), (6, 2)])[..]);
    }

    #[test]
    fn idle_tick_on_apple_duplicates_head() {
        let mut snake = initial_snake();
        assert_eq!(snake.step(Direction::None, Point::new(5, 2)).unwrap(), MoveResult::Moved { grew: true });
        assert_eq!(snake.body(), &points(&[(5, 2), (2, 2), (3, 2), (4, 2), (5, 2)])[..]);
    }

    #[test]
    fn quit_is_not_a_move() {
        let mut snake = initial_snake();
        assert!(snake.step(Direction::Quit, Point::new(0, 14)).is_err());
        assert_eq!(snake.len(), 4);
    }
}
