// Grid geometry helpers for immediate-neighbor safety
//
// Walls are modelled as sentinel coordinates one cell outside the board so
// that board edges and snake bodies are checked the same way.

use serde::Serialize;
use std::collections::HashSet;

use crate::types::{Battlesnake, Board, Coord, Direction};

/// Cells that are unsafe to move into this turn
pub type BlockedSet = HashSet<Coord>;

/// Returns the direction leading from `source` to `target` when the two
/// coordinates are orthogonal neighbors, or `None` otherwise (including
/// when they are the same cell).
pub fn neighbor_direction(source: Coord, target: Coord) -> Option<Direction> {
    // Widened so coordinates at opposite ends of the i32 range cannot wrap
    let dx = i64::from(source.x) - i64::from(target.x);
    let dy = i64::from(source.y) - i64::from(target.y);

    match (dx, dy) {
        (-1, 0) => Some(Direction::Right),
        (1, 0) => Some(Direction::Left),
        (0, -1) => Some(Direction::Up),
        (0, 1) => Some(Direction::Down),
        _ => None,
    }
}

/// Builds the blocked set for one turn
///
/// # Arguments
/// * `board` - Board whose dimensions produce the wall sentinels
/// * `snakes` - Every snake on the board, the deciding snake included
/// * `you` - The deciding snake; its head is never part of the result
pub fn compute_blocked(board: &Board, snakes: &[Battlesnake], you: &Battlesnake) -> BlockedSet {
    let mut blocked = BlockedSet::new();

    blocked.extend(you.body.iter().skip(1).copied());

    for snake in snakes {
        blocked.extend(snake.body.iter().copied());
    }

    for y in 0..board.height {
        blocked.insert(Coord { x: -1, y });
        blocked.insert(Coord { x: board.width, y });
    }
    for x in 0..board.width {
        blocked.insert(Coord { x, y: -1 });
        blocked.insert(Coord { x, y: board.height });
    }

    if let Some(head) = you.body.first() {
        blocked.remove(head);
    }

    blocked
}

/// Open/closed flag for each of the four directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpenDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl OpenDirections {
    pub fn all_open() -> Self {
        OpenDirections {
            up: true,
            down: true,
            left: true,
            right: true,
        }
    }

    pub fn is_open(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn close(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.up = false,
            Direction::Down => self.down = false,
            Direction::Left => self.left = false,
            Direction::Right => self.right = false,
        }
    }

    /// All four entries in `Direction::all()` order
    pub fn entries(&self) -> [(Direction, bool); 4] {
        Direction::all().map(|dir| (dir, self.is_open(dir)))
    }

    /// Open directions in `Direction::all()` order
    pub fn open(&self) -> Vec<Direction> {
        Direction::all()
            .into_iter()
            .filter(|&dir| self.is_open(dir))
            .collect()
    }
}

impl Default for OpenDirections {
    fn default() -> Self {
        Self::all_open()
    }
}

/// Marks every direction whose neighbor cell is blocked as closed.
/// Coordinates that are not adjacent to `head` are ignored.
pub fn open_directions<'a, I>(head: Coord, blocked: I) -> OpenDirections
where
    I: IntoIterator<Item = &'a Coord>,
{
    let mut dirs = OpenDirections::all_open();

    for &block in blocked {
        if let Some(dir) = neighbor_direction(head, block) {
            dirs.close(dir);
        }
    }

    dirs
}
