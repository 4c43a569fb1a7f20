use serde::{Deserialize, Serialize};

/// Symbol shown for a revealed mine.
pub const MINE_SYMBOL: char = '%';
/// Symbol shown for a revealed cell with no adjacent mines.
pub const BLANK_SYMBOL: char = ' ';
/// Symbol a presentation layer uses for a flagged cell.
pub const FLAG_SYMBOL: char = 'P';

/// What a cell holds. Fixed once mine placement is done.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    Blank,
    /// Number of mines in the 8-neighborhood, always in `1..=8`.
    Adjacent(u8),
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Adjacent mine count, `None` for a mine.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Blank => Some(0),
            Self::Adjacent(count) => Some(count),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Mine => MINE_SYMBOL,
            Self::Blank => BLANK_SYMBOL,
            Self::Adjacent(count) => char::from(b'0' + count),
        }
    }

    /// Content after one more mine was placed next to this cell.
    pub(crate) const fn with_adjacent_mine(self) -> Self {
        match self {
            Self::Mine => Self::Mine,
            Self::Blank => Self::Adjacent(1),
            Self::Adjacent(count) => Self::Adjacent(count + 1),
        }
    }
}

/// One board position: its content plus player-visible state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub content: CellContent,
    pub revealed: bool,
    pub flagged: bool,
}

impl Cell {
    pub const fn hidden(content: CellContent) -> Self {
        Self {
            content,
            revealed: false,
            flagged: false,
        }
    }

    pub const fn view(self) -> CellView {
        match (self.revealed, self.flagged) {
            (true, _) => CellView::Revealed(self.content),
            (false, true) => CellView::Flagged,
            (false, false) => CellView::Hidden,
        }
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
        self.flagged = false;
    }
}

/// What a presentation layer may show for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(CellContent),
}

impl CellView {
    /// Single display character, with `hidden` standing in for unrevealed cells.
    pub fn symbol(self, hidden: char) -> char {
        match self {
            Self::Hidden => hidden,
            Self::Flagged => FLAG_SYMBOL,
            Self::Revealed(content) => content.symbol(),
        }
    }
}
