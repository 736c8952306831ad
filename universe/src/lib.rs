// lib.rs - Reference Conway universe with wrap-around edges

use rand::Rng;
use tracing::trace;

pub mod patterns;

/// Each cell is stored as a single byte.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Dead = 0,
    Alive = 1,
}

/// How `cells()` lays out the grid in memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// One `Cell` byte per cell.
    #[default]
    Bytes,
    /// Eight cells per byte, least significant bit first.
    Bits,
}

impl Layout {
    fn storage_len(self, cells: usize) -> usize {
        match self {
            Layout::Bytes => cells,
            Layout::Bits => cells.div_ceil(8),
        }
    }

    fn get(self, storage: &[u8], idx: usize) -> bool {
        match self {
            Layout::Bytes => storage[idx] != Cell::Dead as u8,
            Layout::Bits => storage[idx / 8] & (1 << (idx % 8)) != 0,
        }
    }

    fn set(self, storage: &mut [u8], idx: usize, alive: bool) {
        match self {
            Layout::Bytes => storage[idx] = if alive { Cell::Alive as u8 } else { Cell::Dead as u8 },
            Layout::Bits if alive => storage[idx / 8] |= 1 << (idx % 8),
            Layout::Bits => storage[idx / 8] &= !(1 << (idx % 8)),
        }
    }
}

pub struct Universe {
    width: u32,
    height: u32,
    layout: Layout,
    cells: Vec<u8>,
}

impl Universe {
    fn from_fn(width: u32, height: u32, mut alive: impl FnMut(usize) -> bool) -> Self {
        let cells = (0..cell_count(width, height))
            .map(|i| if alive(i) { Cell::Alive as u8 } else { Cell::Dead as u8 })
            .collect();
        Self { width, height, layout: Layout::Bytes, cells }
    }

    /// Every cell alive with probability one half.
    pub fn random<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Self {
        Self::from_fn(width, height, |_| rng.gen_bool(0.5))
    }

    /// Startup pattern: cell i is alive when i is even or a multiple of seven.
    pub fn interleaved(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |i| i % 2 == 0 || i % 7 == 0)
    }

    pub fn dead(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_| false)
    }

    /// Same cells, re-stored in `layout`.
    pub fn with_layout(self, layout: Layout) -> Self {
        if layout == self.layout {
            return self;
        }
        let count = cell_count(self.width, self.height);
        let mut cells = vec![0; layout.storage_len(count)];
        for idx in 0..count {
            layout.set(&mut cells, idx, self.layout.get(&self.cells, idx));
        }
        Self { cells, layout, ..self }
    }

    /// Fresh universe with the same dimensions and layout and no live cells.
    pub fn all_dead(&self) -> Self {
        Self::dead(self.width, self.height).with_layout(self.layout)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Raw cell storage in this universe's layout.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn cell(&self, row: u32, col: u32) -> Cell {
        if self.is_alive(self.get_index(row, col)) { Cell::Alive } else { Cell::Dead }
    }

    pub fn live_count(&self) -> usize {
        (0..cell_count(self.width, self.height)).filter(|&idx| self.is_alive(idx)).count()
    }

    pub fn toggle_cell(&mut self, row: u32, col: u32) {
        let idx = self.get_index(row, col);
        let alive = self.is_alive(idx);
        self.layout.set(&mut self.cells, idx, !alive);
    }

    pub fn set_cells(&mut self, cells: &[(u32, u32)]) {
        for &(row, col) in cells {
            let idx = self.get_index(row, col);
            self.layout.set(&mut self.cells, idx, true);
        }
    }

    /// Stamp a glider centred on (row, col).
    pub fn draw_glider(&mut self, row: u32, col: u32) {
        let cells = patterns::place(patterns::GLIDER, row, col, self.width, self.height);
        self.set_cells(&cells);
    }

    pub fn tick(&mut self) {
        let mut next = self.cells.clone();

        for row in 0..self.height {
            for col in 0..self.width {
                let idx = self.get_index(row, col);
                let next_alive = match (self.is_alive(idx), self.live_neighbor_count(row, col)) {
                    (true, 2) | (true, 3) => true, // Survival
                    (false, 3) => true,            // Birth
                    _ => false,                    // Death or stays dead
                };
                self.layout.set(&mut next, idx, next_alive);
            }
        }

        self.cells = next;
        trace!(live = self.live_count(), "universe advanced");
    }

    fn is_alive(&self, idx: usize) -> bool {
        self.layout.get(&self.cells, idx)
    }

    fn get_index(&self, row: u32, col: u32) -> usize {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) outside {}x{} universe",
            self.width,
            self.height
        );
        (row * self.width + col) as usize
    }

    fn live_neighbor_count(&self, row: u32, col: u32) -> u8 {
        let mut count = 0;
        for delta_row in [self.height - 1, 0, 1] {
            for delta_col in [self.width - 1, 0, 1] {
                if delta_row == 0 && delta_col == 0 {
                    continue;
                }
                let n_row = (row + delta_row) % self.height;
                let n_col = (col + delta_col) % self.width;
                if self.is_alive(self.get_index(n_row, n_col)) {
                    count += 1;
                }
            }
        }
        count
    }
}

fn cell_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
