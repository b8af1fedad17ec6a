// Debug logging module for asynchronous decision logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each turn's decision is written as one
// line of a JSONL file by a single writer task.

use log::{error, warn};
use serde::{Deserialize, Serialize};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::selector::{Decision, DecisionObserver};
use crate::types::{Board, Coord, Direction, GameState};

/// Represents a single debug log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DebugLogEntry {
    pub game_id: String,
    pub turn: i32,
    pub you_id: String,
    pub chosen_move: Direction,
    pub head: Coord,
    pub blocked: Vec<Coord>,
    pub safe_moves: Vec<Direction>,
    pub board: Board,
    pub timestamp: String,
}

impl DebugLogEntry {
    pub fn from_decision(state: &GameState, decision: &Decision) -> Self {
        DebugLogEntry {
            game_id: state.game.id.clone(),
            turn: state.turn,
            you_id: state.you.id.clone(),
            chosen_move: decision.chosen,
            head: decision.diagnostics.head,
            blocked: decision.diagnostics.sorted_blocked(),
            safe_moves: decision.diagnostics.safe_moves.clone(),
            board: state.board.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Handle to the debug log writer
/// Entries go through an unbounded channel to a single writer task that owns
/// the file, so lines land in the order decisions were logged.
#[derive(Clone)]
pub struct DebugLogger {
    sender: Option<UnboundedSender<DebugLogEntry>>,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    /// and spawns the writer task on the current tokio runtime
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                let (sender, receiver) = mpsc::unbounded_channel();
                tokio::spawn(Self::run_writer(file, receiver));
                DebugLogger {
                    sender: Some(sender),
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger { sender: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Queues a decision for the writer task (fire-and-forget)
    pub fn log_decision(&self, state: &GameState, decision: &Decision) {
        let Some(sender) = &self.sender else {
            return;
        };

        if sender
            .send(DebugLogEntry::from_decision(state, decision))
            .is_err()
        {
            warn!("Debug log writer stopped; dropping entry for turn {}", state.turn);
        }
    }

    /// Writes queued entries until every sender is dropped
    async fn run_writer(mut file: File, mut receiver: UnboundedReceiver<DebugLogEntry>) {
        while let Some(entry) = receiver.recv().await {
            Self::write_entry(&mut file, &entry).await;
        }
    }

    async fn write_entry(file: &mut File, entry: &DebugLogEntry) {
        match serde_json::to_string(entry) {
            Ok(json_line) => {
                let line_with_newline = format!("{}\n", json_line);
                if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                    error!("Failed to write debug log entry: {}", e);
                } else if let Err(e) = file.flush().await {
                    error!("Failed to flush debug log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}

impl DecisionObserver for DebugLogger {
    fn observe(&self, state: &GameState, decision: &Decision) {
        self.log_decision(state, decision);
    }
}
