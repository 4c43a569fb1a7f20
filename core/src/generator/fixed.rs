use alloc::vec::Vec;

use super::*;

/// Hands out the same mine positions for every board.
///
/// The config's mine range is not consulted here; [`Board::generate`] rejects a layout whose count falls outside it.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, config: &BoardConfig) -> Result<MineLayout> {
        MineLayout::from_mine_coords(config.size, &self.mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_the_same_layout() {
        let config = BoardConfig::with_mines((3, 3), 1).unwrap();
        let mut generator = FixedMineGenerator::new([(2, 2)]);

        let first = generator.generate(&config).unwrap();
        let second = generator.generate(&config).unwrap();

        assert_eq!(first, second);
        assert!(first.contains_mine((2, 2)));
    }

    #[test]
    fn positions_must_fit_the_board() {
        let config = BoardConfig::with_mines((2, 2), 1).unwrap();
        let mut generator = FixedMineGenerator::new([(5, 5)]);

        assert_eq!(generator.generate(&config), Err(GameError::InvalidCoords));
    }
}
