// automaton.rs - The contract the driver needs from a simulation

use universe::{Cell, Layout, Universe};

/// How the raw cell region is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellEncoding {
    /// One byte per cell.
    Bytes,
    /// Eight cells per byte, least significant bit first.
    PackedBits,
}

impl CellEncoding {
    /// Number of bytes a `cells`-sized region must report.
    pub fn byte_len(self, cells: usize) -> usize {
        match self {
            CellEncoding::Bytes => cells,
            CellEncoding::PackedBits => cells.div_ceil(8),
        }
    }
}

/// Opaque simulation handle. Every `&mut self` method invalidates any cell
/// view previously borrowed from `cells`.
pub trait Automaton {
    /// Raw value of a dead cell. Anything else renders as alive.
    const DEAD: u8 = 0;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn encoding(&self) -> CellEncoding {
        CellEncoding::Bytes
    }

    fn cells(&self) -> &[u8];

    fn advance_generation(&mut self);
    fn toggle_cell(&mut self, row: u32, col: u32);
    fn stamp_glider(&mut self, row: u32, col: u32);

    /// Fresh handle of the same size with every cell dead.
    fn all_dead(&self) -> Self
    where
        Self: Sized;
}

impl Automaton for Universe {
    const DEAD: u8 = Cell::Dead as u8;

    fn width(&self) -> u32 {
        Universe::width(self)
    }

    fn height(&self) -> u32 {
        Universe::height(self)
    }

    fn encoding(&self) -> CellEncoding {
        match self.layout() {
            Layout::Bytes => CellEncoding::Bytes,
            Layout::Bits => CellEncoding::PackedBits,
        }
    }

    fn cells(&self) -> &[u8] {
        Universe::cells(self)
    }

    fn advance_generation(&mut self) {
        self.tick();
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        Universe::toggle_cell(self, row, col);
    }

    fn stamp_glider(&mut self, row: u32, col: u32) {
        self.draw_glider(row, col);
    }

    fn all_dead(&self) -> Self {
        Universe::all_dead(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_length_rounds_up() {
        assert_eq!(CellEncoding::PackedBits.byte_len(16), 2);
        assert_eq!(CellEncoding::PackedBits.byte_len(17), 3);
        assert_eq!(CellEncoding::Bytes.byte_len(17), 17);
    }

    #[test]
    fn universe_satisfies_the_contract() {
        let mut u = Universe::dead(4, 4);
        Automaton::toggle_cell(&mut u, 1, 1);
        assert_eq!(Automaton::cells(&u)[5], 1);
        assert_eq!(<Universe as Automaton>::DEAD, 0);
        let fresh = Automaton::all_dead(&u);
        assert!(Automaton::cells(&fresh).iter().all(|&c| c == 0));
    }

    #[test]
    fn bit_layout_reports_packed_encoding() {
        let u = Universe::dead(5, 5).with_layout(Layout::Bits);
        assert_eq!(u.encoding(), CellEncoding::PackedBits);
        assert_eq!(Automaton::cells(&u).len(), u.encoding().byte_len(25));
        assert_eq!(Universe::dead(5, 5).encoding(), CellEncoding::Bytes);
    }
}
