use mineclear_core::{Coord, Coord2};

/// Pixel geometry of the board inside the window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the board, `(x, y)` in pixels.
    pub origin: (i32, i32),
    /// Width and height of the square board in pixels.
    pub side: i32,
    pub cells: Coord,
}

impl BoardLayout {
    /// Default window geometry: a 288px board inside a 300x330 window.
    pub const fn for_size(cells: Coord) -> Self {
        Self {
            origin: (6, 36),
            side: 288,
            cells,
        }
    }

    /// Maps a pixel to the cell under it. Pixel `y` selects the row and pixel `x`
    /// the column.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Coord2> {
        let (origin_x, origin_y) = self.origin;
        let (dx, dy) = (x - origin_x, y - origin_y);
        if self.cells == 0 || !(0..self.side).contains(&dx) || !(0..self.side).contains(&dy) {
            return None;
        }

        let cells = i32::from(self.cells);
        let row = dy * cells / self.side;
        let col = dx * cells / self.side;
        Some((row.try_into().ok()?, col.try_into().ok()?))
    }
}
