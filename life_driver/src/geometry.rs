// geometry.rs - Cell index and pixel layout for a fixed grid
//
// Every cell is `cell_size` pixels wide with a 1px border on its left/top,
// plus one trailing pixel for the final gridline.

/// Grid dimensions, fixed for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid must be at least 1x1, got {width}x{height}");
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Linear row-major index of (row, col).
    pub fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row < self.height && col < self.width
    }

    /// Backing-store size of a canvas that fits every cell plus its border.
    pub fn pixel_size(&self, cell_size: u32) -> (u32, u32) {
        (pitch(cell_size) * self.width + 1, pitch(cell_size) * self.height + 1)
    }

    /// Top-left pixel of a cell's fill rectangle.
    pub fn cell_origin(&self, row: u32, col: u32, cell_size: u32) -> (u32, u32) {
        (col * pitch(cell_size) + 1, row * pitch(cell_size) + 1)
    }

    /// Cell under a backing-store pixel. Coordinates outside the canvas clamp
    /// to the nearest edge cell.
    pub fn cell_from_pixel(&self, px: f32, py: f32, cell_size: u32) -> (u32, u32) {
        let row = axis_cell(py, cell_size, self.height);
        let col = axis_cell(px, cell_size, self.width);
        (row, col)
    }
}

fn pitch(cell_size: u32) -> u32 {
    cell_size + 1
}

fn axis_cell(coord: f32, cell_size: u32, dimension: u32) -> u32 {
    let cell = (coord / pitch(cell_size) as f32).floor();
    if cell.is_nan() || cell < 0.0 {
        0
    } else {
        (cell as u32).min(dimension - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_size_reserves_borders() {
        assert_eq!(Grid::new(64, 64).pixel_size(5), (385, 385));
        assert_eq!(Grid::new(4, 2).pixel_size(5), (25, 13));
        assert_eq!(Grid::new(1, 1).pixel_size(1), (3, 3));
    }

    #[test]
    fn index_is_row_major() {
        let grid = Grid::new(7, 3);
        assert_eq!(grid.index(0, 0), 0);
        assert_eq!(grid.index(0, 6), 6);
        assert_eq!(grid.index(1, 0), 7);
        assert_eq!(grid.index(2, 6), 20);
    }

    #[test]
    fn click_inside_second_cell() {
        let grid = Grid::new(4, 4);
        assert_eq!(grid.cell_from_pixel(7.0, 7.0, 5), (1, 1));
    }

    #[test]
    fn gridline_pixel_belongs_to_following_cell() {
        let grid = Grid::new(4, 4);
        assert_eq!(grid.cell_from_pixel(6.0, 0.0, 5), (0, 1));
        assert_eq!(grid.cell_from_pixel(5.9, 0.0, 5), (0, 0));
    }

    #[test]
    fn clamps_past_last_gridline_and_below_zero() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.cell_from_pixel(24.0, 18.0, 5), (2, 3));
        assert_eq!(grid.cell_from_pixel(1e6, 1e6, 5), (2, 3));
        assert_eq!(grid.cell_from_pixel(-3.0, -0.5, 5), (0, 0));
        assert_eq!(grid.cell_from_pixel(f32::NAN, 7.0, 5), (1, 0));
    }

    #[test]
    #[should_panic(expected = "at least 1x1")]
    fn empty_grid_is_rejected() {
        Grid::new(0, 4);
    }
}
