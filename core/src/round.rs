use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - any -> Playing (new round)
/// - Playing <-> Paused
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    Playing,
    Paused,
    Won,
    Lost,
}

impl RoundPhase {
    /// Indicates the round has ended and only a new round is accepted
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Sound the frontend should play after an intent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    NewRound,
    Open,
    Mark,
    Lose,
    Win,
    PauseToggle,
}

/// Effect of a single intent on the round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Step {
    pub cue: Option<Cue>,
    /// Newly opened cells, or the cell whose mark was toggled.
    pub changed: BTreeSet<Coord2>,
}

impl Step {
    pub fn none() -> Self {
        Self::default()
    }

    fn cue(cue: Cue) -> Self {
        Self {
            cue: Some(cue),
            changed: BTreeSet::new(),
        }
    }

    /// Whether the frontend has anything to redraw or play
    pub fn has_update(&self) -> bool {
        self.cue.is_some() || !self.changed.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct RoundController<G> {
    config: GameConfig,
    generator: G,
    grid: Grid,
    revealed: BTreeSet<Coord2>,
    marked: BTreeSet<Coord2>,
    phase: RoundPhase,
}

impl<G: BoardGenerator> RoundController<G> {
    /// Validates `config` and starts the first round.
    pub fn new(config: GameConfig, mut generator: G) -> Result<Self> {
        config.validate()?;
        let grid = generator.generate(config)?;
        log::info!(
            "Round started: {}x{} with {} mines",
            config.size,
            config.size,
            config.mines
        );
        Ok(Self {
            config,
            generator,
            grid,
            revealed: BTreeSet::new(),
            marked: BTreeSet::new(),
            phase: RoundPhase::default(),
        })
    }

    pub fn new_round(&mut self) -> Result<Step> {
        self.new_round_with(self.config)
    }

    /// Starts over with a different board size or mine count. On error nothing
    /// changes, the current round and config stay as they were.
    pub fn new_round_with(&mut self, config: GameConfig) -> Result<Step> {
        config.validate()?;
        let grid = self.generator.generate(config)?;

        self.config = config;
        self.grid = grid;
        self.revealed.clear();
        self.marked.clear();
        self.phase = RoundPhase::Playing;
        log::info!(
            "Round started: {}x{} with {} mines",
            config.size,
            config.size,
            config.mines
        );
        Ok(Step::cue(Cue::NewRound))
    }

    pub fn toggle_pause(&mut self) -> Step {
        self.phase = match self.phase {
            RoundPhase::Playing => RoundPhase::Paused,
            RoundPhase::Paused => RoundPhase::Playing,
            RoundPhase::Won | RoundPhase::Lost => {
                log::debug!("Ignoring pause, round already ended");
                return Step::none();
            }
        };
        log::info!("Round {:?}", self.phase);
        Step::cue(Cue::PauseToggle)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Step {
        if !self.accepts_intent_at(coords) {
            return Step::none();
        }
        if self.marked.contains(&coords) {
            log::debug!("Ignoring reveal at {coords:?}, cell is marked");
            return Step::none();
        }

        let Reveal { opened, outcome } = reveal(&self.grid, &self.revealed, coords);
        for pos in &opened {
            self.marked.remove(pos);
        }
        self.revealed.extend(opened.iter().copied());

        let cue = match outcome {
            RevealOutcome::Lost => {
                self.phase = RoundPhase::Lost;
                log::info!("Round lost at {coords:?}");
                Cue::Lose
            }
            RevealOutcome::Opened if self.check_win() => Cue::Win,
            RevealOutcome::Opened => Cue::Open,
        };
        Step {
            cue: Some(cue),
            changed: opened,
        }
    }

    pub fn toggle_mark(&mut self, coords: Coord2) -> Step {
        if !self.accepts_intent_at(coords) {
            return Step::none();
        }
        if self.revealed.contains(&coords) {
            log::debug!("Ignoring mark at {coords:?}, cell is open");
            return Step::none();
        }

        if !self.marked.remove(&coords) {
            self.marked.insert(coords);
        }

        let cue = if self.check_win() { Cue::Win } else { Cue::Mark };
        Step {
            cue: Some(cue),
            changed: BTreeSet::from([coords]),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn revealed(&self) -> &BTreeSet<Coord2> {
        &self.revealed
    }

    pub fn marked(&self) -> &BTreeSet<Coord2> {
        &self.marked
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn is_open(&self, coords: Coord2) -> bool {
        self.revealed.contains(&coords)
    }

    pub fn is_marked(&self, coords: Coord2) -> bool {
        self.marked.contains(&coords)
    }

    /// Mines minus marks, negative when the player over-marks.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.grid.mine_count()) - self.marked.len() as i32
    }

    fn accepts_intent_at(&self, coords: Coord2) -> bool {
        if self.phase != RoundPhase::Playing {
            log::trace!("Ignoring intent at {coords:?} while {:?}", self.phase);
            return false;
        }
        if !self.grid.contains(coords) {
            log::debug!("Ignoring intent at {coords:?}, outside the board");
            return false;
        }
        true
    }

    /// Every cell is either open or marked, and the marks are exactly the mines.
    fn check_win(&mut self) -> bool {
        let accounted = self.revealed.len() + self.marked.len();
        let won = accounted == usize::from(self.grid.total_cells())
            && self.marked.len() == usize::from(self.grid.mine_count());
        if won {
            self.phase = RoundPhase::Won;
            log::info!("Round won");
        }
        won
    }
}
