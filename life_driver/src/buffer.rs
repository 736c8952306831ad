// buffer.rs - Zero-copy, read-only view over an automaton's cells
//
// The view borrows the handle, so it cannot outlive the next mutating call.

use crate::automaton::{Automaton, CellEncoding};
use crate::geometry::Grid;

pub struct CellBuffer<'a> {
    raw: &'a [u8],
    grid: Grid,
    encoding: CellEncoding,
    dead: u8,
}

impl<'a> CellBuffer<'a> {
    /// Borrow the handle's cell region. Panics if its length does not match
    /// the grid the handle reports.
    pub fn acquire<A: Automaton>(handle: &'a A) -> Self {
        let grid = Grid::new(handle.width(), handle.height());
        let encoding = handle.encoding();
        let raw = handle.cells();
        let expected = encoding.byte_len(grid.cell_count());
        assert_eq!(
            raw.len(),
            expected,
            "cell region of {} bytes does not fit a {}x{} grid ({:?})",
            raw.len(),
            grid.width(),
            grid.height(),
            encoding,
        );
        Self { raw, grid, encoding, dead: A::DEAD }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Raw state value of the cell at `index`. Packed cells read as 0 or 1.
    pub fn state(&self, index: usize) -> u8 {
        assert!(
            index < self.grid.cell_count(),
            "cell index {index} out of range for {} cells",
            self.grid.cell_count()
        );
        match self.encoding {
            CellEncoding::Bytes => self.raw[index],
            CellEncoding::PackedBits => {
                let mask = 1u8 << (index % 8);
                u8::from(self.raw[index / 8] & mask == mask)
            }
        }
    }

    pub fn is_alive(&self, row: u32, col: u32) -> bool {
        assert!(self.grid.contains(row, col), "cell ({row}, {col}) outside grid");
        match self.encoding {
            CellEncoding::Bytes => self.state(self.grid.index(row, col)) != self.dead,
            CellEncoding::PackedBits => self.state(self.grid.index(row, col)) != 0,
        }
    }

    pub fn live_count(&self) -> usize {
        (0..self.grid.height())
            .flat_map(|row| (0..self.grid.width()).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_alive(row, col))
            .count()
    }
}
