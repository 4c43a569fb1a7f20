#![no_std]

extern crate alloc;

use core::fmt::{self, Write};
use core::ops::{Index, RangeInclusive};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod types;

/// Board dimensions plus the inclusive range the mine count is drawn from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub min_mines: CellCount,
    pub max_mines: CellCount,
}

impl BoardConfig {
    pub const DEFAULT_SIZE: Coord2 = (20, 10);
    pub const DEFAULT_MINES: CellCount = 10;

    pub fn new(size: Coord2, min_mines: CellCount, max_mines: CellCount) -> Result<Self> {
        let config = Self {
            size,
            min_mines,
            max_mines,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration with an exact mine count.
    pub fn with_mines(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::new(size, mines, mines)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.max_mines < self.min_mines {
            return Err(GameError::InvalidMineRange);
        }
        if self.max_mines > self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    pub const fn mine_range(&self) -> RangeInclusive<CellCount> {
        self.min_mines..=self.max_mines
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            min_mines: Self::DEFAULT_MINES,
            max_mines: Self::DEFAULT_MINES,
        }
    }
}

/// Mine positions together with the adjacency count of every other cell.
///
/// Counts are maintained incrementally as mines are placed, so a layout is always consistent: every non-mine cell
/// holds exactly the number of mines around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayoutSnapshot")]
pub struct MineLayout {
    contents: Array2<CellContent>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Layout of the given size without any mines.
    pub fn empty(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        Ok(Self {
            contents: Array2::from_elem(size.to_nd_index(), CellContent::Blank),
            mine_count: 0,
        })
    }

    /// Layout with mines at exactly the given positions. Repeated positions count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size)?;

        for &coords in mine_coords {
            let coords = layout.validate_coords(coords)?;
            if !layout.place_mine(coords) {
                log::debug!("Mine at {:?} listed twice, ignored", coords);
            }
        }

        Ok(layout)
    }

    /// Puts a mine at `coords` and bumps the count of each non-mine neighbor.
    ///
    /// Returns `false` without touching anything when a mine is already there.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        if self[coords].is_mine() {
            return false;
        }

        for pos in neighbors(coords, self.size()) {
            let content = &mut self.contents[pos.to_nd_index()];
            *content = content.with_adjacent_mine();
        }
        self.contents[coords.to_nd_index()] = CellContent::Mine;
        self.mine_count += 1;
        true
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.contents.dim();
        (width as Coord, height as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.size())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub(crate) fn into_contents(self) -> Array2<CellContent> {
        self.contents
    }
}

impl Index<Coord2> for MineLayout {
    type Output = CellContent;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.contents[coords.to_nd_index()]
    }
}

#[derive(Deserialize)]
struct LayoutSnapshot {
    contents: Array2<CellContent>,
    mine_count: CellCount,
}

impl TryFrom<LayoutSnapshot> for MineLayout {
    type Error = GameError;

    fn try_from(snapshot: LayoutSnapshot) -> Result<Self> {
        if count_consistent_mines(&snapshot.contents)? != snapshot.mine_count {
            return Err(GameError::InconsistentBoard);
        }
        Ok(Self {
            contents: snapshot.contents,
            mine_count: snapshot.mine_count,
        })
    }
}

/// Counts the mines in `contents` after checking that every other cell holds its true adjacency count.
pub(crate) fn count_consistent_mines(contents: &Array2<CellContent>) -> Result<CellCount> {
    let (width, height) = contents.dim();
    let valid_dim = 1..=usize::from(Coord::MAX);
    if !valid_dim.contains(&width) || !valid_dim.contains(&height) {
        return Err(GameError::InvalidSize);
    }
    let size = (width as Coord, height as Coord);

    let mut mines: CellCount = 0;
    for ((x, y), content) in contents.indexed_iter() {
        let coords = (x as Coord, y as Coord);
        if content.is_mine() {
            mines += 1;
            continue;
        }
        let expected = neighbors(coords, size)
            .filter(|pos| contents[pos.to_nd_index()].is_mine())
            .fold(CellContent::Blank, |acc, _| acc.with_adjacent_mine());
        if *content != expected {
            log::debug!("Cell {:?} holds {:?}, expected {:?}", coords, content, expected);
            return Err(GameError::InconsistentBoard);
        }
    }
    Ok(mines)
}

/// Diagnostic table of every cell's content, ignoring visibility.
impl fmt::Display for MineLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self.size(), |coords| self[coords].symbol())
    }
}

/// Writes one symbol per cell as a table: ` a | b ` rows separated by `---+---` rules.
pub(crate) fn write_grid(
    f: &mut fmt::Formatter<'_>,
    (width, height): Coord2,
    symbol: impl Fn(Coord2) -> char,
) -> fmt::Result {
    for y in 0..height {
        if y > 0 {
            f.write_char('\n')?;
            for x in 0..width {
                if x > 0 {
                    f.write_char('+')?;
                }
                f.write_str("---")?;
            }
            f.write_char('\n')?;
        }
        for x in 0..width {
            if x > 0 {
                f.write_char('|')?;
            }
            write!(f, " {} ", symbol((x, y)))?;
        }
    }
    Ok(())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
