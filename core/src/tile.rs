use serde::{Deserialize, Serialize};

/// Player-visible state of a single tile.
///
/// Revealed and flagged are exclusive by construction, and the adjacent mine
/// count only exists once a tile has been revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
}

impl TileState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }
}
