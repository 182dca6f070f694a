use serde::{Deserialize, Serialize};

use crate::*;

/// Result of one player move, ready to render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn<O> {
    pub outcome: O,
    pub status: GameStatus,
    pub snapshot: BoardSnapshot,
}

/// Entry point for a presentation layer: one game at a time, replaced
/// wholesale on [`Game::restart`].
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    config: GameConfig,
    engine: BoardEngine,
}

impl Game {
    pub fn initialize(width: Coord, height: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        Self::with_config(GameConfig::new(width, height, mines)?, seed)
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomLayoutGenerator::new(seed))
    }

    pub fn with_generator(config: GameConfig, generator: impl LayoutGenerator) -> Result<Self> {
        let engine = BoardEngine::initialize(&config, generator)?;
        log::debug!(
            "New game: {}x{} with {} mines, {:?}",
            config.width,
            config.height,
            config.mines,
            config.win_rule
        );
        Ok(Self { config, engine })
    }

    /// Throws away the current board and deals a new one with the same config.
    pub fn restart(&mut self, seed: u64) -> Result<BoardSnapshot> {
        *self = Self::with_config(self.config, seed)?;
        Ok(self.snapshot())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_engine(&self.engine)
    }

    pub fn reveal(&mut self, pos: Coord2) -> Result<Turn<RevealOutcome>> {
        let outcome = self.engine.reveal(pos)?;
        if !outcome.has_update() {
            log::trace!("Reveal at {:?} left the board unchanged", pos);
        }
        Ok(self.turn(outcome))
    }

    pub fn toggle_flag(&mut self, pos: Coord2) -> Result<Turn<FlagOutcome>> {
        let outcome = self.engine.toggle_flag(pos)?;
        if !outcome.has_update() {
            log::trace!("Flag toggle at {:?} left the board unchanged", pos);
        }
        Ok(self.turn(outcome))
    }

    fn turn<O>(&self, outcome: O) -> Turn<O> {
        Turn {
            outcome,
            status: self.status(),
            snapshot: self.snapshot(),
        }
    }
}
