use alloc::collections::{BTreeSet, VecDeque};
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Owns the tile grid and mine registry of a single game and applies moves to it.
///
/// Every mutating call validates first, so a rejected move leaves the board
/// untouched. Once the status is [`GameStatus::Won`] or [`GameStatus::Lost`]
/// all moves are rejected with [`GameError::AlreadyEnded`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardEngine {
    mine_layout: MineLayout,
    board: Array2<TileState>,
    win_rule: WinRule,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    flagged_mine_count: Saturating<CellCount>,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl BoardEngine {
    pub fn new(mine_layout: MineLayout, win_rule: WinRule) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            board: Array2::default(size.to_nd_index()),
            win_rule,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            flagged_mine_count: Saturating(0),
            status: GameStatus::default(),
            triggered_mine: None,
        }
    }

    /// Validates `config`, lays out mines with `generator` and returns a fresh board.
    pub fn initialize(config: &GameConfig, generator: impl LayoutGenerator) -> Result<Self> {
        config.validate()?;
        let mine_layout = generator.generate(config)?;
        Ok(Self::new(mine_layout, config.win_rule))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn win_rule(&self) -> WinRule {
        self.win_rule
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn flagged_mine_count(&self) -> CellCount {
        self.flagged_mine_count.0
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn mines_left(&self) -> isize {
        (self.mine_layout.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    pub fn tile_at(&self, pos: Coord2) -> Result<TileState> {
        let pos = self.mine_layout.validate_coords(pos)?;
        Ok(self.board[pos.to_nd_index()])
    }

    pub fn has_mine_at(&self, pos: Coord2) -> Result<bool> {
        let pos = self.mine_layout.validate_coords(pos)?;
        Ok(self.mine_layout.contains_mine(pos))
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub(crate) fn tiles(&self) -> &Array2<TileState> {
        &self.board
    }

    pub fn toggle_flag(&mut self, pos: Coord2) -> Result<FlagOutcome> {
        let pos = self.mine_layout.validate_coords(pos)?;
        self.check_not_finished()?;

        let is_mine = self.mine_layout.contains_mine(pos);
        let tile = &mut self.board[pos.to_nd_index()];
        match *tile {
            TileState::Hidden => {
                *tile = TileState::Flagged;
                self.flagged_count += 1;
                if is_mine {
                    self.flagged_mine_count += 1;
                }
            }
            TileState::Flagged => {
                *tile = TileState::Hidden;
                self.flagged_count -= 1;
                if is_mine {
                    self.flagged_mine_count -= 1;
                }
            }
            TileState::Revealed(_) => return Ok(FlagOutcome::NoChange),
        }

        Ok(if self.check_win() {
            FlagOutcome::Won
        } else {
            FlagOutcome::Changed
        })
    }

    pub fn reveal(&mut self, pos: Coord2) -> Result<RevealOutcome> {
        let pos = self.mine_layout.validate_coords(pos)?;
        self.check_not_finished()?;

        if self.board[pos.to_nd_index()].is_hidden() {
            Ok(self.reveal_hidden_tile(pos))
        } else {
            Ok(RevealOutcome::NoChange)
        }
    }

    fn reveal_hidden_tile(&mut self, pos: Coord2) -> RevealOutcome {
        if self.mine_layout.contains_mine(pos) {
            self.triggered_mine = Some(pos);
            self.end_game(GameStatus::Lost);
            return RevealOutcome::HitMine;
        }

        // only zero tiles enqueue neighbors, so the fill never reaches a mine
        let mut visited = BTreeSet::from([pos]);
        let mut to_visit = VecDeque::from([pos]);
        let mut opened: CellCount = 0;

        while let Some(visit_pos) = to_visit.pop_front() {
            if !self.board[visit_pos.to_nd_index()].is_hidden() {
                continue;
            }

            let adjacent_mines = self.mine_layout.adjacent_mine_count(visit_pos);
            self.board[visit_pos.to_nd_index()] = TileState::Revealed(adjacent_mines);
            self.revealed_count += 1;
            opened += 1;

            if adjacent_mines == 0 {
                for neighbor in self.mine_layout.iter_neighbors(visit_pos) {
                    if self.board[neighbor.to_nd_index()].is_hidden() && visited.insert(neighbor) {
                        to_visit.push_back(neighbor);
                    }
                }
            }
        }
        log::trace!("Revealed {} tiles starting from {:?}", opened, pos);

        if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Moves to [`GameStatus::Won`] when the active rule is satisfied.
    fn check_win(&mut self) -> bool {
        let mines = self.mine_layout.mine_count();
        let won = match self.win_rule {
            WinRule::AllMinesFlagged => {
                self.flagged_count.0 == mines && self.flagged_mine_count.0 == mines
            }
            WinRule::AllSafeRevealed => {
                self.revealed_count.0 == self.mine_layout.safe_tile_count()
            }
        };
        if won {
            self.end_game(GameStatus::Won);
        }
        won
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        log::debug!(
            "Game over: {:?} after {} reveals and {} flags",
            status,
            self.revealed_count.0,
            self.flagged_count.0
        );
        self.status = status;
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
