use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random placement: the mine count is drawn from the configured range, then each mine is dropped on a random
/// cell, redrawing whenever that cell already holds one.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: &BoardConfig) -> Result<MineLayout> {
        place_mines(config, &mut self.rng)
    }
}

/// `min_mines` plus a uniform draw from `0..=max_mines - min_mines`.
pub fn draw_mine_count<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> CellCount {
    let extra = config.max_mines.saturating_sub(config.min_mines);
    if extra == 0 {
        config.min_mines
    } else {
        config.min_mines + rng.random_range(0..=extra)
    }
}

/// Rejection-samples mine positions for `config`.
///
/// Terminates with probability 1 for any valid config. A completely full board degenerates into coupon collecting,
/// which is slow but still finishes.
pub fn place_mines<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Result<MineLayout> {
    config.validate()?;

    let mines = draw_mine_count(config, rng);
    if mines == config.total_cells() {
        log::warn!(
            "Requested {} mines fill all {} cells, placement will need many redraws",
            mines,
            config.total_cells()
        );
    }

    let mut layout = MineLayout::empty(config.size)?;
    let mut draws: u64 = 0;
    while layout.mine_count() < mines {
        let coords = (
            rng.random_range(0..config.width()),
            rng.random_range(0..config.height()),
        );
        draws += 1;
        layout.place_mine(coords);
    }

    log::debug!(
        "Placed {} mines on a {}x{} board after {} draws",
        mines,
        config.width(),
        config.height(),
        draws
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine_positions(layout: &MineLayout) -> alloc::vec::Vec<Coord2> {
        let (width, height) = layout.size();
        (0..width)
            .flat_map(|x| (0..height).map(move |y| (x, y)))
            .filter(|&coords| layout.contains_mine(coords))
            .collect()
    }

    #[test]
    fn exact_range_places_exactly_min_mines() {
        let config = BoardConfig::default();

        for seed in 0..32 {
            let layout = RandomMineGenerator::new(seed).generate(&config).unwrap();
            assert_eq!(layout.mine_count(), 10);
            assert_eq!(mine_positions(&layout).len(), 10);
        }
    }

    #[test]
    fn mine_count_stays_in_range_and_reaches_upper_bound() {
        let config = BoardConfig::new((8, 8), 3, 6).unwrap();
        let mut seen = [false; 7];

        for seed in 0..200 {
            let layout = RandomMineGenerator::new(seed).generate(&config).unwrap();
            let count = layout.mine_count();
            assert!((3..=6).contains(&count), "count {count} out of range");
            assert_eq!(mine_positions(&layout).len(), usize::from(count));
            seen[usize::from(count)] = true;
        }

        assert_eq!(seen, [false, false, false, true, true, true, true]);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = BoardConfig::new((16, 16), 20, 40).unwrap();

        let first = RandomMineGenerator::new(7).generate(&config).unwrap();
        let second = RandomMineGenerator::new(7).generate(&config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn generator_advances_between_boards() {
        let config = BoardConfig::new((16, 16), 40, 40).unwrap();
        let mut generator = RandomMineGenerator::new(7);

        let first = generator.generate(&config).unwrap();
        let second = generator.generate(&config).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn full_board_still_terminates() {
        let config = BoardConfig::with_mines((4, 3), 12).unwrap();
        let layout = RandomMineGenerator::new(1).generate(&config).unwrap();

        assert_eq!(layout.mine_count(), 12);
        assert_eq!(layout.safe_cell_count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected_before_placement() {
        let config = BoardConfig {
            size: (2, 2),
            min_mines: 1,
            max_mines: 5,
        };

        assert_eq!(
            RandomMineGenerator::new(0).generate(&config),
            Err(GameError::TooManyMines)
        );
    }
}
