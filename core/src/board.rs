use alloc::vec::Vec;
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Classification of a board, derived from its cells every time it is asked for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// The board engine: mine layout plus what the player has revealed and flagged.
///
/// Every per-cell operation validates its coordinates first and fails with [`GameError::InvalidCoords`] without
/// touching the board. The grid size never changes; start a new game by building a new `Board`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    config: BoardConfig,
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Random board for `config`, reproducible from `seed`.
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        Self::generate(config, &mut RandomMineGenerator::new(seed))
    }

    pub fn generate<G: MineGenerator + ?Sized>(
        config: BoardConfig,
        generator: &mut G,
    ) -> Result<Self> {
        config.validate()?;
        let layout = generator.generate(&config)?;
        if layout.size() != config.size {
            return Err(GameError::InvalidSize);
        }
        if !config.mine_range().contains(&layout.mine_count()) {
            log::warn!(
                "Generated {} mines, config asks for {}..={}",
                layout.mine_count(),
                config.min_mines,
                config.max_mines
            );
            return Err(GameError::MineCountOutOfRange);
        }
        Ok(Self::with_config(config, layout))
    }

    /// Board on a prepared layout, its config pinned to the layout's exact mine count.
    pub fn from_layout(layout: MineLayout) -> Self {
        let config = BoardConfig {
            size: layout.size(),
            min_mines: layout.mine_count(),
            max_mines: layout.mine_count(),
        };
        Self::with_config(config, layout)
    }

    fn with_config(config: BoardConfig, layout: MineLayout) -> Self {
        let mine_count = layout.mine_count();
        let cells = layout.into_contents().mapv(Cell::hidden);
        log::debug!(
            "New {}x{} board with {} mines",
            config.width(),
            config.height(),
            mine_count
        );
        Self {
            config,
            cells,
            mine_count,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_cells(|cell| cell.revealed)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_cells(|cell| cell.flagged)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell_at(coords)?.revealed)
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell_at(coords)?.flagged)
    }

    /// Content regardless of visibility. Only show it to the player for revealed cells.
    pub fn content_at(&self, coords: Coord2) -> Result<CellContent> {
        Ok(self.cell_at(coords)?.content)
    }

    /// Display symbol of a revealed cell, `None` while it is still hidden.
    pub fn display_symbol(&self, coords: Coord2) -> Result<Option<char>> {
        let cell = self.cell_at(coords)?;
        Ok(cell.revealed.then(|| cell.content.symbol()))
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        Ok(self.cell_at(coords)?.view())
    }

    /// Lost once any mine is revealed, won once every safe cell is revealed, in progress otherwise.
    ///
    /// A board with nothing revealed yet is in progress even when it has no safe cells at all.
    pub fn outcome(&self) -> Outcome {
        let mut hidden_safe = false;
        let mut any_revealed = false;
        for cell in &self.cells {
            match (cell.content.is_mine(), cell.revealed) {
                (true, true) => return Outcome::Lost,
                (false, false) => hidden_safe = true,
                (false, true) => any_revealed = true,
                (true, false) => {}
            }
        }
        if hidden_safe || !any_revealed {
            Outcome::InProgress
        } else {
            Outcome::Won
        }
    }

    /// Reveals the cell at `coords`.
    ///
    /// A mine reveals the whole board and loses. A blank cell opens its connected blank region together with the
    /// numbered cells bordering it. Revealing an already revealed cell, or anything once the outcome is terminal,
    /// changes nothing and reports the current outcome.
    pub fn reveal(&mut self, coords: Coord2) -> Result<Outcome> {
        let coords = self.validate_coords(coords)?;

        let current = self.outcome();
        if current.is_terminal() {
            log::debug!("Ignoring reveal at {:?}, game is already {:?}", coords, current);
            return Ok(current);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.revealed {
            return Ok(current);
        }
        cell.reveal();
        let content = cell.content;

        if content.is_mine() {
            log::debug!("Mine hit at {:?}", coords);
            self.reveal_all();
            return Ok(Outcome::Lost);
        }

        log::debug!("Revealed {:?}: {:?}", coords, content);
        if content.is_blank() {
            self.flood_fill(coords);
        }

        let outcome = self.outcome();
        if outcome == Outcome::Won {
            log::debug!("All {} safe cells revealed", self.revealed_count());
        }
        Ok(outcome)
    }

    /// Toggles the flag on a hidden cell. Revealed cells are never flagged.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.revealed {
            log::debug!("Ignoring flag on revealed cell {:?}", coords);
            return Ok(FlagOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        log::debug!("Flag at {:?}: {}", coords, cell.flagged);
        Ok(if cell.flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        })
    }

    /// Opens every hidden safe cell reachable from `start` through blank cells. The `revealed` flag doubles as the
    /// visited marker, so each cell is pushed at most once.
    fn flood_fill(&mut self, start: Coord2) {
        let size = self.size();
        let mut pending = Vec::from([start]);
        let mut opened: CellCount = 0;

        while let Some(coords) = pending.pop() {
            for pos in neighbors(coords, size) {
                let cell = &mut self.cells[pos.to_nd_index()];
                if cell.revealed || cell.content.is_mine() {
                    continue;
                }

                cell.reveal();
                opened += 1;
                log::trace!("Flood opened {:?}: {:?}", pos, cell.content);

                if cell.content.is_blank() {
                    pending.push(pos);
                }
            }
        }

        log::debug!("Flood fill from {:?} opened {} cells", start, opened);
    }

    fn reveal_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reveal();
        }
    }

    fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|&cell| predicate(cell)).count() as CellCount
    }
}

/// Unchecked board as it arrives from a deserializer.
#[derive(Deserialize)]
struct BoardSnapshot {
    config: BoardConfig,
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = GameError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        let BoardSnapshot {
            config,
            cells,
            mine_count,
        } = snapshot;

        config.validate()?;
        if cells.dim() != (usize::from(config.width()), usize::from(config.height())) {
            return Err(GameError::InvalidBoardShape);
        }

        let counted = count_consistent_mines(&cells.map(|cell| cell.content))?;
        if counted != mine_count || !config.mine_range().contains(&mine_count) {
            return Err(GameError::InconsistentBoard);
        }
        if cells.iter().any(|cell| cell.revealed && cell.flagged) {
            return Err(GameError::InconsistentBoard);
        }

        Ok(Self {
            config,
            cells,
            mine_count,
        })
    }
}

/// Diagnostic table of every cell's content, ignoring visibility. Not meant for gameplay.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self.size(), |coords| {
            self.cells[coords.to_nd_index()].content.symbol()
        })
    }
}
