use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Opened,
    Lost,
}

/// Cells uncovered by one click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub opened: BTreeSet<Coord2>,
    pub outcome: RevealOutcome,
}

/// Computes which cells a click on `start` uncovers.
///
/// A mine opens only itself and loses the round, a numbered cell opens only
/// itself. A zero cell opens its whole 8-connected zero region together with
/// the numbered cells bordering it. Cells already in `already_open` are left out
/// of the result, so clicking inside an opened region yields nothing new.
///
/// `start` must lie inside `grid`.
pub fn reveal(grid: &Grid, already_open: &BTreeSet<Coord2>, start: Coord2) -> Reveal {
    let value = grid[start];

    if value == MINE {
        return Reveal {
            opened: BTreeSet::from([start]),
            outcome: RevealOutcome::Lost,
        };
    }

    let mut region = BTreeSet::from([start]);
    if value == 0 {
        let mut to_visit = Vec::from([start]);
        while let Some(visit_coords) = to_visit.pop() {
            for pos in grid.iter_neighbors(visit_coords) {
                match grid[pos] {
                    MINE => {}
                    0 => {
                        if region.insert(pos) {
                            to_visit.push(pos);
                        }
                    }
                    _ => {
                        region.insert(pos);
                    }
                }
            }
        }
    }

    let opened: BTreeSet<_> = region.difference(already_open).copied().collect();
    log::trace!("Reveal at {start:?} opened {} cells", opened.len());
    Reveal {
        opened,
        outcome: RevealOutcome::Opened,
    }
}
