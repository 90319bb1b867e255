use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use mineclear_core::{BoardGenerator, Cue, RoundController, Step};

use crate::cue::CueSink;
use crate::input::{Command, HELP, MouseButton, ParseError};
use crate::layout::BoardLayout;
use crate::render::render;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Idle,
    Redraw,
    Quit,
}

/// Fixed-tick loop: drain input, update the round, redraw, sleep until the next tick.
pub struct GameLoop<G, W, S> {
    round: RoundController<G>,
    layout: BoardLayout,
    out: W,
    sink: S,
    tick: Duration,
}

impl<G: BoardGenerator, W: Write, S: CueSink> GameLoop<G, W, S> {
    pub fn new(round: RoundController<G>, out: W, sink: S, tick: Duration) -> Self {
        let layout = BoardLayout::for_size(round.config().size);
        Self {
            round,
            layout,
            out,
            sink,
            tick,
        }
    }

    /// Runs until a quit command or until `input` hangs up.
    pub fn run(&mut self, input: Receiver<String>) -> Result<()> {
        self.sink.play(Cue::NewRound);
        self.redraw()?;
        let mut next_tick = Instant::now();

        loop {
            let mut dirty = false;
            loop {
                match input.try_recv() {
                    Ok(line) => match self.handle_line(&line)? {
                        Flow::Idle => {}
                        Flow::Redraw => dirty = true,
                        Flow::Quit => {
                            if dirty {
                                self.redraw()?;
                            }
                            log::debug!("Quit requested");
                            return Ok(());
                        }
                    },
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if dirty {
                            self.redraw()?;
                        }
                        log::debug!("Input closed");
                        return Ok(());
                    }
                }
            }

            if dirty {
                self.redraw()?;
            }

            next_tick += self.tick;
            let now = Instant::now();
            if next_tick > now {
                thread::sleep(next_tick - now);
            } else {
                next_tick = now;
            }
        }
    }

    pub fn round(&self) -> &RoundController<G> {
        &self.round
    }

    #[cfg(test)]
    fn into_parts(self) -> (RoundController<G>, W, S) {
        (self.round, self.out, self.sink)
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(ParseError::Empty) => return Ok(Flow::Idle),
            Err(err) => {
                log::warn!("Rejected input {line:?}: {err}");
                writeln!(self.out, "{err} (type ? for help)").context("writing to output")?;
                return Ok(Flow::Idle);
            }
        };

        let step = match command {
            Command::Reveal(coords) => self.round.reveal(coords),
            Command::Mark(coords) => self.round.toggle_mark(coords),
            Command::Click { x, y, button } => {
                let Some(coords) = self.layout.cell_at(x, y) else {
                    log::debug!("Click at ({x}, {y}) missed the board");
                    return Ok(Flow::Idle);
                };
                match button {
                    MouseButton::Left => self.round.reveal(coords),
                    MouseButton::Right => self.round.toggle_mark(coords),
                }
            }
            Command::Pause => self.round.toggle_pause(),
            Command::NewRound => self.round.new_round().context("starting a new round")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(self.out, "{HELP}").context("writing to output")?;
                return Ok(Flow::Idle);
            }
        };
        Ok(self.apply(step))
    }

    fn apply(&mut self, step: Step) -> Flow {
        if let Some(cue) = step.cue {
            self.sink.play(cue);
        }
        if step.has_update() {
            Flow::Redraw
        } else {
            Flow::Idle
        }
    }

    fn redraw(&mut self) -> Result<()> {
        render(&self.round, &mut self.out).context("drawing the board")
    }
}

/// Forwards stdin lines from a helper thread so the loop never blocks on input.
pub fn stdin_lines() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineclear_core::{FixedBoardGenerator, Grid, RoundPhase};

    fn run_script(lines: &[&str]) -> (RoundController<FixedBoardGenerator>, String, Vec<Cue>) {
        let grid = Grid::from_rows(&[[-1, 1], [1, 1]]).unwrap();
        let round =
            RoundController::new(grid.game_config(), FixedBoardGenerator::new(grid)).unwrap();
        let mut game = GameLoop::new(round, Vec::<u8>::new(), Vec::<Cue>::new(), Duration::ZERO);

        let (tx, rx) = mpsc::channel();
        for line in lines {
            tx.send(line.to_string()).unwrap();
        }
        drop(tx);
        game.run(rx).unwrap();

        let (round, out, cues) = game.into_parts();
        (round, String::from_utf8(out).unwrap(), cues)
    }

    #[test]
    fn plays_a_winning_round() {
        let (round, out, cues) = run_script(&["r 0 1", "r 1 0", "r 1 1", "m 0 0"]);

        assert_eq!(round.phase(), RoundPhase::Won);
        assert_eq!(cues, [Cue::NewRound, Cue::Open, Cue::Open, Cue::Open, Cue::Win]);
        assert!(out.ends_with("You Win !\nType n or <Space> to retry\n"));
    }

    #[test]
    fn clicks_translate_to_cells() {
        // 2x2 board, 144px cells: right half of the top row is (0, 1)
        let (round, _, cues) = run_script(&["click 200 40", "click 10 40 right"]);

        assert!(round.is_open((0, 1)));
        assert!(round.is_marked((0, 0)));
        assert_eq!(cues, [Cue::NewRound, Cue::Open, Cue::Mark]);
    }

    #[test]
    fn losing_then_retrying() {
        let (round, _, cues) = run_script(&["r 0 0", "r 1 1", " "]);

        assert_eq!(round.phase(), RoundPhase::Playing);
        assert!(round.revealed().is_empty());
        assert_eq!(cues, [Cue::NewRound, Cue::Lose, Cue::NewRound]);
    }

    #[test]
    fn quit_stops_processing() {
        let (round, _, cues) = run_script(&["p", "q", "p"]);

        assert_eq!(round.phase(), RoundPhase::Paused);
        assert_eq!(cues, [Cue::NewRound, Cue::PauseToggle]);
    }

    #[test]
    fn first_round_starts_with_new_round_cue() {
        let (_, out, cues) = run_script(&[]);

        assert_eq!(cues, [Cue::NewRound]);
        assert!(out.starts_with("Total: 1 "));
    }

    #[test]
    fn quit_draws_pending_moves_first() {
        let (round, out, cues) = run_script(&["r 1 1", "q"]);

        assert!(round.is_open((1, 1)));
        assert_eq!(cues, [Cue::NewRound, Cue::Open]);
        assert!(out.ends_with("  1  #  1\n"));
    }

    #[test]
    fn bad_input_is_reported_and_ignored() {
        let (round, out, cues) = run_script(&["dig", "", "r 9 9", "click 0 0"]);

        assert!(out.contains("Unknown command `dig` (type ? for help)"));
        assert!(round.revealed().is_empty());
        assert_eq!(cues, [Cue::NewRound]);
    }

    #[test]
    fn help_lists_commands() {
        let (_, out, _) = run_script(&["?"]);
        assert!(out.contains("click X Y [right]"));
    }
}
