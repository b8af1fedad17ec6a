// Library exports for Battlesnake bot
// This allows the replay tool and the server binary to share the core move logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod geometry;
pub mod replay;
pub mod selector;
pub mod types;
