use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Lights every cell independently with probability `config.chance_light_starts_on`, drawing from `rng`.
///
/// A cell is lit when a uniform draw in `[0, 1)` falls below the chance, so `0.0` always gives a dark board and `1.0`
/// a fully lit one.
pub fn create_board<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Board {
    let chance = config.chance_light_starts_on;
    if !(0.0..=1.0).contains(&chance) {
        log::warn!(
            "Chance {} is outside [0, 1], every light will start {}",
            chance,
            if chance > 1.0 { "lit" } else { "unlit" }
        );
    }

    let lights = Array2::from_shape_fn(config.size.to_nd_index(), |_| {
        rng.random::<f64>() < chance
    });
    let board = Board::from_lights_unchecked(lights);
    log::debug!(
        "Created {}x{} board with {} of {} lights on",
        board.nrows(),
        board.ncols(),
        board.lit_count(),
        board.total_cells()
    );
    board
}

/// Seeded generator, the same seed and config always produce the same board.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        create_board(config, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// Alternates between the lowest and highest possible draw, starting low.
    struct Alternating(bool);

    impl RngCore for Alternating {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0 = !self.0;
            if self.0 { 0 } else { u64::MAX }
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn zero_chance_starts_won() {
        for seed in 0..16 {
            let board = RandomBoardGenerator::new(seed).generate(GameConfig::new((4, 5), 0.0));
            assert!(board.has_won());
            assert_eq!(board.size(), (4, 5));
        }
    }

    #[test]
    fn full_chance_starts_fully_lit() {
        for seed in 0..16 {
            let board = RandomBoardGenerator::new(seed).generate(GameConfig::new((3, 2), 1.0));
            assert!(!board.has_won());
            assert_eq!(board.lit_count(), 6);
        }
    }

    #[test]
    fn single_cell_full_chance_is_not_won() {
        let board = RandomBoardGenerator::new(7).generate(GameConfig::new((1, 1), 1.0));

        assert!(!board.has_won());
    }

    #[test]
    fn same_seed_gives_same_board() {
        let config = GameConfig::default();

        let a = RandomBoardGenerator::new(42).generate(config);
        let b = RandomBoardGenerator::new(42).generate(config);

        assert_eq!(a, b);
        assert_eq!(a.size(), (5, 6));
    }

    #[test]
    fn draws_fill_rows_in_order() {
        let board = create_board(GameConfig::new((2, 3), 0.5), &mut Alternating(false));

        assert_eq!(board, "O.O\n.O.".parse::<Board>().unwrap());
    }

    #[test]
    fn accepts_a_trait_object_rng() {
        let mut alternating = Alternating(false);
        let rng: &mut dyn RngCore = &mut alternating;

        let board = create_board(GameConfig::new((1, 4), 0.5), rng);

        assert_eq!(board, "O.O.".parse::<Board>().unwrap());
    }

    #[test]
    fn out_of_range_chance_saturates() {
        let config = GameConfig::new_unchecked((2, 2), 3.0);
        assert_eq!(create_board(config, &mut Alternating(false)).lit_count(), 4);

        let config = GameConfig::new_unchecked((2, 2), -1.0);
        assert!(create_board(config, &mut Alternating(false)).has_won());
    }
}
