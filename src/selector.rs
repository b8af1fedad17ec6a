// Move selection for a single turn
//
// Picks uniformly at random among the directions whose neighbor cell is not
// blocked. The randomness source is supplied by the caller, and diagnostics
// are handed to observers instead of being logged here.

use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::geometry::{compute_blocked, open_directions, BlockedSet, OpenDirections};
use crate::types::{Coord, Direction, GameState};

/// Move returned when every direction is blocked
pub const FALLBACK_DIRECTION: Direction = Direction::Down;

/// Largest accepted board width or height; wall sentinels grow with the perimeter
pub const MAX_BOARD_DIMENSION: i32 = 1024;

/// Game states that cannot be decided on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecisionError {
    #[error("snake '{0}' has an empty body")]
    EmptyBody(String),
    #[error("board has no snakes")]
    NoSnakes,
    #[error("board size {width}x{height} outside 1..={max}", max = MAX_BOARD_DIMENSION)]
    InvalidBoard { width: i32, height: i32 },
}

/// Everything computed on the way to a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub head: Coord,
    pub board_width: i32,
    pub board_height: i32,
    pub blocked: BlockedSet,
    pub open: OpenDirections,
    pub safe_moves: Vec<Direction>,
}

impl Diagnostics {
    /// Blocked coordinates in a stable order, for logs and reports
    pub fn sorted_blocked(&self) -> Vec<Coord> {
        let mut blocked: Vec<Coord> = self.blocked.iter().copied().collect();
        blocked.sort();
        blocked
    }

    /// True when the fallback had to be used
    pub fn is_trapped(&self) -> bool {
        self.safe_moves.is_empty()
    }
}

/// The chosen move plus the diagnostics behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub chosen: Direction,
    pub diagnostics: Diagnostics,
}

/// Side channel that receives every decision after it is made
pub trait DecisionObserver: Send + Sync {
    fn observe(&self, state: &GameState, decision: &Decision);
}

/// Reports decisions through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl DecisionObserver for LogObserver {
    fn observe(&self, state: &GameState, decision: &Decision) {
        let diag = &decision.diagnostics;

        debug!("head: {}", diag.head);
        debug!("board dims: {}x{}", diag.board_width, diag.board_height);
        debug!("blocked: {:?}", diag.sorted_blocked());
        debug!(
            "safe moves: {:?}",
            diag.safe_moves.iter().map(|d| d.as_str()).collect::<Vec<_>>()
        );

        if diag.is_trapped() {
            warn!(
                "{} MOVE {}: No safe moves detected! Moving {}",
                state.game.id, state.turn, decision.chosen
            );
        } else {
            info!("{} MOVE {}: {}", state.game.id, state.turn, decision.chosen);
        }
    }
}

/// Decides the move for `state.you` using `rng` to break ties
///
/// # Returns
/// * `Ok(Decision)` - Always a valid direction; `FALLBACK_DIRECTION` when trapped
/// * `Err(DecisionError)` - The state has no snakes, `you` has no body, or the
///   board size is non-positive or larger than `MAX_BOARD_DIMENSION`
pub fn decide_move<R: Rng>(state: &GameState, rng: &mut R) -> Result<Decision, DecisionError> {
    let you = &state.you;
    let board = &state.board;

    let head = *you
        .body
        .first()
        .ok_or_else(|| DecisionError::EmptyBody(you.id.clone()))?;
    if board.snakes.is_empty() {
        return Err(DecisionError::NoSnakes);
    }
    let valid_dimension = |d: i32| (1..=MAX_BOARD_DIMENSION).contains(&d);
    if !valid_dimension(board.width) || !valid_dimension(board.height) {
        return Err(DecisionError::InvalidBoard {
            width: board.width,
            height: board.height,
        });
    }

    let blocked = compute_blocked(board, &board.snakes, you);
    let open = open_directions(head, &blocked);
    let safe_moves = open.open();

    let chosen = if safe_moves.is_empty() {
        FALLBACK_DIRECTION
    } else {
        safe_moves[rng.random_range(0..safe_moves.len())]
    };

    Ok(Decision {
        chosen,
        diagnostics: Diagnostics {
            head,
            board_width: board.width,
            board_height: board.height,
            blocked,
            open,
            safe_moves,
        },
    })
}

/// Same as `decide_move`, keeping only the direction
pub fn select_move<R: Rng>(state: &GameState, rng: &mut R) -> Result<Direction, DecisionError> {
    decide_move(state, rng).map(|decision| decision.chosen)
}
