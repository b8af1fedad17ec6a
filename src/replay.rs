// Replay module for checking logged decisions against the current move logic
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Recompute each turn's safe moves from the logged board
// 3. Check that the logged move was safe (or the fallback when trapped)
// 4. Generate a summary report

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::debug_logger::DebugLogEntry;
use crate::selector::{decide_move, FALLBACK_DIRECTION};
use crate::types::{Direction, Game, GameState};

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_safe_moves: Vec<Direction>,
    /// The logged move is among the recomputed safe moves
    pub original_was_safe: bool,
    /// The logged safe moves equal the recomputed ones
    pub safe_moves_match: bool,
}

impl ReplayResult {
    /// Safe move sets agree and the logged move was safe, or was the
    /// fallback on a turn with no safe move
    pub fn is_consistent(&self) -> bool {
        let trapped_fallback =
            self.replayed_safe_moves.is_empty() && self.original_move == FALLBACK_DIRECTION;
        self.safe_moves_match && (self.original_was_safe || trapped_fallback)
    }
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub consistent: usize,
    pub inconsistent: usize,
    pub consistency_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    verbose: bool,
}

impl ReplayEngine {
    pub fn new(verbose: bool) -> Self {
        ReplayEngine { verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DebugLogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DebugLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Rebuilds the game state a log entry was decided on
    fn state_for_entry(entry: &DebugLogEntry) -> Result<GameState, String> {
        let you = entry
            .board
            .snakes
            .iter()
            .find(|s| s.id == entry.you_id)
            .ok_or_else(|| format!("Snake with id '{}' not found in board state", entry.you_id))?
            .clone();

        Ok(GameState {
            game: Game {
                id: entry.game_id.clone(),
                ..Default::default()
            },
            turn: entry.turn,
            board: entry.board.clone(),
            you,
        })
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &DebugLogEntry) -> Result<ReplayResult, String> {
        let state = Self::state_for_entry(entry)?;

        // Only the safe move set is compared, so the seed does not matter
        let mut rng = StdRng::seed_from_u64(entry.turn as u64);
        let decision = decide_move(&state, &mut rng)
            .map_err(|e| format!("Turn {}: {}", entry.turn, e))?;

        let replayed: HashSet<Direction> =
            decision.diagnostics.safe_moves.iter().copied().collect();
        let logged: HashSet<Direction> = entry.safe_moves.iter().copied().collect();

        let result = ReplayResult {
            turn: entry.turn,
            original_move: entry.chosen_move,
            original_was_safe: replayed.contains(&entry.chosen_move),
            safe_moves_match: replayed == logged,
            replayed_safe_moves: decision.diagnostics.safe_moves,
        };

        if self.verbose {
            if result.is_consistent() {
                info!(
                    "Turn {}: ✓ {} (safe: {:?})",
                    result.turn, result.original_move, result.replayed_safe_moves
                );
            } else {
                warn!(
                    "Turn {}: ✗ {} (logged safe: {:?}, replayed safe: {:?})",
                    result.turn, result.original_move, entry.safe_moves, result.replayed_safe_moves
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[DebugLogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => warn!("Failed to replay turn {}: {}", entry.turn, e),
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[DebugLogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => warn!("Failed to replay turn {}: {}", turn_num, e),
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let consistent = results.iter().filter(|r| r.is_consistent()).count();
        let inconsistent = total_turns - consistent;
        let consistency_rate = if total_turns > 0 {
            (consistent as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            consistent,
            inconsistent,
            consistency_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Consistent:     {} ({:.1}%)", stats.consistent, stats.consistency_rate);
        println!("Inconsistent:   {}", stats.inconsistent);
        println!(
            "Trapped Turns:  {}",
            results.iter().filter(|r| r.replayed_safe_moves.is_empty()).count()
        );
        println!("═══════════════════════════════════════════════════════════\n");

        let inconsistent: Vec<_> = results.iter().filter(|r| !r.is_consistent()).collect();
        if !inconsistent.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  INCONSISTENT TURNS");
            println!("═══════════════════════════════════════════════════════════");

            for result in inconsistent {
                println!(
                    "Turn {}: logged {} (safe now: {:?}, safe set matches: {})",
                    result.turn,
                    result.original_move,
                    result
                        .replayed_safe_moves
                        .iter()
                        .map(|d| d.as_str())
                        .collect::<Vec<_>>(),
                    result.safe_moves_match
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[DebugLogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    entry.chosen_move
                ));
            }
        }

        Ok(())
    }
}
