use std::io::{self, Write};

use mineclear_core::{BoardGenerator, Coord2, MINE, RoundController, RoundPhase};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Marked,
    Open(u8),
    Mine,
}

/// What the player gets to see at `coords`. Once the round is over the whole
/// board is shown.
pub fn cell_view<G: BoardGenerator>(round: &RoundController<G>, coords: Coord2) -> CellView {
    let grid = round.grid();
    let uncovered = round.is_finished() || round.is_open(coords);

    if !uncovered {
        if round.is_marked(coords) {
            CellView::Marked
        } else {
            CellView::Hidden
        }
    } else if grid[coords] == MINE {
        CellView::Mine
    } else {
        CellView::Open(grid[coords].unsigned_abs())
    }
}

pub const fn glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Marked => 'F',
        CellView::Open(0) => '.',
        CellView::Open(count) => (b'0' + count) as char,
        CellView::Mine => '*',
    }
}

pub fn render<G: BoardGenerator, W: Write>(round: &RoundController<G>, out: &mut W) -> io::Result<()> {
    let size = round.grid().size();

    writeln!(
        out,
        "Total: {} (m ROW COL to mark)  left: {}",
        round.grid().mine_count(),
        round.mines_left()
    )?;

    write!(out, "   ")?;
    for col in 0..size {
        write!(out, "{col:>3}")?;
    }
    writeln!(out)?;

    for row in 0..size {
        write!(out, "{row:>3}")?;
        for col in 0..size {
            let symbol = if round.phase() == RoundPhase::Paused {
                ' '
            } else {
                glyph(cell_view(round, (row, col)))
            };
            write!(out, "{symbol:>3}")?;
        }
        writeln!(out)?;
    }

    match round.phase() {
        RoundPhase::Playing => {}
        RoundPhase::Paused => writeln!(out, "- Pause -")?,
        RoundPhase::Won => writeln!(out, "You Win !\nType n or <Space> to retry")?,
        RoundPhase::Lost => writeln!(out, "Game Over\nType n or <Space> to retry")?,
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineclear_core::{FixedBoardGenerator, Grid};

    fn corner_mine() -> RoundController<FixedBoardGenerator> {
        let grid = Grid::from_rows(&[[-1, 1, 0], [1, 1, 0], [0, 0, 0]]).unwrap();
        RoundController::new(grid.game_config(), FixedBoardGenerator::new(grid)).unwrap()
    }

    fn rendered(round: &RoundController<FixedBoardGenerator>) -> String {
        let mut out = Vec::new();
        render(round, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn draws_hidden_marked_and_open_cells() {
        let mut round = corner_mine();
        round.toggle_mark((0, 0));
        round.reveal((0, 1));

        let text = rendered(&round);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Total: 1 (m ROW COL to mark)  left: 0");
        assert_eq!(lines[1], "     0  1  2");
        assert_eq!(lines[2], "  0  F  1  #");
        assert_eq!(lines[3], "  1  #  #  #");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn cascade_shows_blank_cells() {
        let mut round = corner_mine();
        round.reveal((2, 2));

        let text = rendered(&round);
        assert!(text.contains("  0  #  1  .\n"));
        assert!(text.contains("  2  .  .  .\n"));
    }

    #[test]
    fn pause_hides_the_board() {
        let mut round = corner_mine();
        round.reveal((0, 1));
        round.toggle_pause();

        let text = rendered(&round);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2].trim_end(), "  0");
        assert_eq!(lines[5], "- Pause -");
    }

    #[test]
    fn lost_round_uncovers_everything() {
        let mut round = corner_mine();
        round.reveal((0, 0));

        let text = rendered(&round);
        assert!(text.contains("  0  *  1  .\n"));
        assert!(text.contains("Game Over"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn won_round_shows_banner() {
        let mut round = corner_mine();
        round.reveal((2, 2));
        round.toggle_mark((0, 0));

        assert_eq!(round.phase(), RoundPhase::Won);
        assert!(rendered(&round).contains("You Win !"));
    }

    #[test]
    fn glyphs() {
        assert_eq!(glyph(CellView::Open(3)), '3');
        assert_eq!(glyph(CellView::Open(8)), '8');
        assert_eq!(glyph(CellView::Open(0)), '.');
        assert_eq!(glyph(CellView::Hidden), '#');
    }
}
