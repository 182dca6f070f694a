use crate::*;
pub use random::*;

mod random;

/// Produces the mine registry for a new game.
pub trait LayoutGenerator {
    fn generate(self, config: &GameConfig) -> Result<MineLayout>;
}

/// Replays a known layout, for fixed puzzles and tests.
impl LayoutGenerator for MineLayout {
    fn generate(self, config: &GameConfig) -> Result<MineLayout> {
        if self.size() != config.size() || self.mine_count() != config.mines {
            return Err(GameError::LayoutMismatch);
        }
        Ok(self)
    }
}
