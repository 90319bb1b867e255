use crate::*;
pub use random::*;

mod random;

/// Source of boards for successive rounds.
pub trait BoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Grid>;
}

/// Always hands out the same board, for scripted rounds and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    grid: Grid,
}

impl FixedBoardGenerator {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Grid> {
        config.validate()?;
        if config != self.grid.game_config() {
            log::warn!(
                "Fixed board is {:?}, but {:?} was requested",
                self.grid.game_config(),
                config
            );
            return Err(GameError::InvalidBoardShape);
        }
        Ok(self.grid.clone())
    }
}
