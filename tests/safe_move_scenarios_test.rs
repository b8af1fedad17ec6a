//! Safe Move Scenario Tests
//!
//! End-to-end checks of blocked-set construction and move selection on
//! small hand-built boards.

use rand::rngs::StdRng;
use rand::SeedableRng;

use safe_move_snake::geometry::{compute_blocked, open_directions};
use safe_move_snake::selector::{decide_move, select_move, FALLBACK_DIRECTION};
use safe_move_snake::types::{Battlesnake, Board, Coord, Direction, Game, GameState};

fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord { x, y }).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 100,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

fn game_state(you: Battlesnake, others: Vec<Battlesnake>) -> GameState {
    let mut snakes = vec![you.clone()];
    snakes.extend(others);
    GameState {
        game: Game {
            id: "scenario".to_string(),
            ..Default::default()
        },
        turn: 10,
        board: Board {
            height: 11,
            width: 11,
            food: vec![Coord { x: 8, y: 8 }],
            snakes,
            hazards: vec![],
        },
        you,
    }
}

#[test]
fn test_neck_below_head_on_open_board() {
    let state = game_state(snake("you", &[(5, 5), (5, 4)]), vec![]);

    let blocked = compute_blocked(&state.board, &state.board.snakes, &state.you);
    assert!(blocked.contains(&Coord { x: 5, y: 4 }));
    assert!(!blocked.contains(&Coord { x: 5, y: 5 }));
    // Body cell plus 4 * 11 wall sentinels
    assert_eq!(blocked.len(), 1 + 44);

    let open = open_directions(Coord { x: 5, y: 5 }, &blocked);
    assert!(open.up && open.left && open.right);
    assert!(!open.down);

    for seed in 0..25 {
        let mv = select_move(&state, &mut StdRng::seed_from_u64(seed)).unwrap();
        assert_ne!(mv, Direction::Down);
    }
}

#[test]
fn test_corner_head_walls_close_left_and_down() {
    let state = game_state(snake("you", &[(0, 0)]), vec![]);

    let decision = decide_move(&state, &mut StdRng::seed_from_u64(0)).unwrap();
    let open = decision.diagnostics.open;

    assert!(decision.diagnostics.blocked.contains(&Coord { x: -1, y: 0 }));
    assert!(decision.diagnostics.blocked.contains(&Coord { x: 0, y: -1 }));
    assert!(!open.left);
    assert!(!open.down);
    assert_eq!(
        decision.diagnostics.safe_moves,
        vec![Direction::Up, Direction::Right]
    );
}

#[test]
fn test_surrounded_head_returns_fallback() {
    let you = snake("you", &[(5, 5), (5, 6), (4, 6), (4, 5), (4, 4)]);
    let other = snake("other", &[(6, 5), (6, 4), (5, 4)]);
    let state = game_state(you, vec![other]);

    let decision = decide_move(&state, &mut StdRng::seed_from_u64(123)).unwrap();

    assert_eq!(decision.chosen, FALLBACK_DIRECTION);
    assert_eq!(decision.chosen, Direction::Down);
    assert!(decision.diagnostics.safe_moves.is_empty());
}

#[test]
fn test_own_head_never_blocked_with_two_snakes() {
    let you = snake("you", &[(3, 3), (3, 2), (3, 1)]);
    let other = snake("other", &[(7, 7), (7, 6), (7, 5)]);
    let state = game_state(you, vec![other]);

    let decision = decide_move(&state, &mut StdRng::seed_from_u64(5)).unwrap();
    let blocked = &decision.diagnostics.blocked;

    assert!(!blocked.contains(&Coord { x: 3, y: 3 }));
    assert!(blocked.contains(&Coord { x: 3, y: 2 }));
    assert!(blocked.contains(&Coord { x: 7, y: 7 }));
}

#[test]
fn test_unblocked_head_is_reproducible_with_seed() {
    let state = game_state(snake("you", &[(5, 5)]), vec![]);

    let run = |seed: u64| -> Vec<Direction> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..16).map(|_| select_move(&state, &mut rng).unwrap()).collect()
    };

    let first = run(2026);
    assert_eq!(first, run(2026));
    assert!(first.iter().all(|d| Direction::all().contains(d)));
}

#[test]
fn test_opponent_head_adjacent_is_blocked() {
    let you = snake("you", &[(5, 5), (5, 4)]);
    let other = snake("other", &[(5, 6), (5, 7), (5, 8)]);
    let state = game_state(you, vec![other]);

    let decision = decide_move(&state, &mut StdRng::seed_from_u64(9)).unwrap();

    assert_eq!(
        decision.diagnostics.safe_moves,
        vec![Direction::Left, Direction::Right]
    );
}
