use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Places `config.mines` mines uniformly at random, every subset of cells being
/// equally likely, and fills in the adjacency counts.
pub fn generate<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Grid> {
    config.validate()?;

    let side = usize::from(config.size);
    let total_cells = usize::from(config.total_cells());
    let picks = rand::seq::index::sample(rng, total_cells, config.mines.into());
    let mines = picks
        .into_iter()
        .map(|index| ((index / side) as Coord, (index % side) as Coord));

    let grid = Grid::from_mine_iter(config.size, mines);
    log::debug!(
        "Generated {}x{} board with {} mines",
        config.size,
        config.size,
        grid.mine_count()
    );
    Ok(grid)
}

/// Seeded generator, the same seed yields the same sequence of boards.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Grid> {
        generate(config, &mut self.rng)
    }
}
