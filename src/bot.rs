// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The Bot ties configuration, the move RNG and decision observers to the
// four Battlesnake API endpoints. For more info see docs.battlesnake.com

use log::{error, info};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

use crate::config::Config;
use crate::selector::{decide_move, Decision, DecisionError, DecisionObserver, LogObserver};
use crate::types::GameState;

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    rng: Mutex<StdRng>,
    observers: Vec<Box<dyn DecisionObserver>>,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// The move RNG is seeded once here, from `selection.seed` when set and
    /// from OS entropy otherwise. Decisions are reported to a `LogObserver`.
    pub fn new(config: Config) -> Self {
        let rng = match config.selection.seed {
            Some(seed) => {
                info!("Seeding move selection with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        Bot {
            config,
            rng: Mutex::new(rng),
            observers: vec![Box::new(LogObserver)],
        }
    }

    /// Adds another observer that will see every decision
    pub fn with_observer<O: DecisionObserver + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, state: &GameState) {
        info!("{} START", state.game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, state: &GameState) {
        info!("{} END (turn {})", state.game.id, state.turn);
    }

    /// Decides this turn's move and notifies every observer
    pub fn decide(&self, state: &GameState) -> Result<Decision, DecisionError> {
        let decision = {
            let mut rng = self.rng.lock();
            decide_move(state, &mut *rng)
        };

        match decision {
            Ok(decision) => {
                for observer in &self.observers {
                    observer.observe(state, &decision);
                }
                Ok(decision)
            }
            Err(e) => {
                error!("{} MOVE {}: rejected game state: {}", state.game.id, state.turn, e);
                Err(e)
            }
        }
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Returns
    /// * `Ok(Value)` - JSON response containing the chosen move direction
    /// * `Err(DecisionError)` - The state cannot be decided on
    pub fn get_move(&self, state: &GameState) -> Result<Value, DecisionError> {
        let decision = self.decide(state)?;
        Ok(json!({ "move": decision.chosen.as_str() }))
    }
}
