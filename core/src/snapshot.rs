use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Render model for one tile.
///
/// `mine` stays `None` while the tile is hidden and the game is still running,
/// so a snapshot never leaks the layout mid-game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub position: Coord2,
    pub revealed: bool,
    pub flagged: bool,
    pub mine: Option<bool>,
    pub adjacent_mines: Option<u8>,
}

/// Read-only copy of the board handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub status: GameStatus,
    pub flagged_count: CellCount,
    pub triggered_mine: Option<Coord2>,
    pub tiles: Array2<TileView>,
}

impl BoardSnapshot {
    pub fn from_engine(engine: &BoardEngine) -> Self {
        let game_over = engine.is_finished();
        let layout = engine.mine_layout();
        let tiles = Array2::from_shape_fn(engine.size().to_nd_index(), |(row, col)| {
            let position = (row as Coord, col as Coord);
            let state = engine.tiles()[(row, col)];
            TileView {
                position,
                revealed: state.is_revealed(),
                flagged: state.is_flagged(),
                mine: (game_over || state.is_revealed()).then(|| layout.contains_mine(position)),
                adjacent_mines: state.adjacent_mines(),
            }
        });

        Self {
            size: engine.size(),
            mine_count: engine.total_mines(),
            status: engine.status(),
            flagged_count: engine.flagged_count(),
            triggered_mine: engine.triggered_mine(),
            tiles,
        }
    }

    pub fn tile(&self, pos: Coord2) -> Option<&TileView> {
        self.tiles.get(pos.to_nd_index())
    }

    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count as isize)
    }
}
