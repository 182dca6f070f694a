//! Minesweeper game-state engine: mine layout generation, reveal with flood
//! fill, flagging, and win/loss tracking. Rendering is left to the caller,
//! which drives a [`Game`] and draws the [`BoardSnapshot`] it hands back.

#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod game;
mod generator;
mod snapshot;
mod tile;
mod types;

/// Rule deciding when a game counts as won.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// Won once exactly the mine tiles are flagged, nothing more and nothing less.
    #[default]
    AllMinesFlagged,
    /// Classic rule: won once every safe tile is revealed, flags are ignored.
    AllSafeRevealed,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    #[serde(default)]
    pub win_rule: WinRule,
}

impl GameConfig {
    /// 12 wide, 10 high, 20 mines.
    pub const CLASSIC: Self = Self::new_unchecked(12, 10, 20);

    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
            win_rule: WinRule::AllMinesFlagged,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, mines);
        config.validate()?;
        Ok(config)
    }

    pub const fn with_win_rule(mut self, win_rule: WinRule) -> Self {
        self.win_rule = win_rule;
        self
    }

    /// Board shape as `(rows, cols)`.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mines >= self.total_tiles() {
            Err(GameError::TooManyMines)
        } else {
            Ok(())
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Registry of mine positions for one game.
///
/// Fixed once built: the engine reads from it but never changes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout with mines at exactly `mine_coords`; duplicates collapse.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &pos in mine_coords {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::InvalidPosition);
            }
            mine_mask[pos.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        if layout.mine_count >= layout.total_tiles() {
            return Err(GameError::TooManyMines);
        }
        Ok(layout)
    }

    pub fn validate_coords(&self, pos: Coord2) -> Result<Coord2> {
        let size = self.size();
        if pos.0 < size.0 && pos.1 < size.1 {
            Ok(pos)
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.mine_mask)
    }

    pub fn safe_tile_count(&self) -> CellCount {
        self.total_tiles() - self.mine_count
    }

    pub fn total_tiles(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, pos: Coord2) -> bool {
        self[pos]
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn adjacent_mine_count(&self, pos: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(pos).filter(|&n| self[n]).count() as u8
    }

    pub fn iter_neighbors(&self, pos: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(pos)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, pos: Coord2) -> &Self::Output {
        &self.mine_mask[pos.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    NoChange,
    Changed,
    Won,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
