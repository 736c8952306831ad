// render.rs - Gridlines and cell fills onto a 2D drawing surface

use egui::Color32;
use tracing::trace;

use crate::buffer::CellBuffer;
use crate::geometry::Grid;

/// Minimal 2D drawing surface, shaped after a canvas context.
/// Coordinates are backing-store pixels.
pub trait Surface {
    /// 1px line between two points in the given colour.
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub grid: Color32,
    pub dead: Color32,
    pub alive: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: Color32::from_rgb(0xCC, 0xCC, 0xCC),
            dead: Color32::WHITE,
            alive: Color32::BLACK,
        }
    }
}

/// Draws onto an attached surface. With nothing attached every draw is a no-op.
pub struct FrameRenderer<S> {
    surface: Option<S>,
    grid: Grid,
    cell_size: u32,
    palette: Palette,
}

impl<S: Surface> FrameRenderer<S> {
    pub fn new(grid: Grid, cell_size: u32, palette: Palette) -> Self {
        assert!(cell_size > 0, "cell size must be positive");
        Self { surface: None, grid, cell_size, palette }
    }

    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn draw_grid(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            trace!("draw_grid skipped: no surface attached");
            return;
        };
        let pitch = (self.cell_size + 1) as f32;
        let (width_px, height_px) = self.grid.pixel_size(self.cell_size);
        let color = self.palette.grid;

        // Vertical lines.
        for i in 0..=self.grid.width() {
            let x = i as f32 * pitch + 1.0;
            surface.stroke_line((x, 0.0), (x, height_px as f32), color);
        }

        // Horizontal lines.
        for j in 0..=self.grid.height() {
            let y = j as f32 * pitch + 1.0;
            surface.stroke_line((0.0, y), (width_px as f32, y), color);
        }
    }

    /// Fill every cell from `cells`, row-major.
    pub fn draw_cells(&mut self, cells: &CellBuffer<'_>) {
        assert_eq!(cells.grid(), self.grid, "cell buffer does not match the renderer's grid");
        let Some(surface) = self.surface.as_mut() else {
            trace!("draw_cells skipped: no surface attached");
            return;
        };
        let size = self.cell_size as f32;

        for row in 0..self.grid.height() {
            for col in 0..self.grid.width() {
                let color = if cells.is_alive(row, col) {
                    self.palette.alive
                } else {
                    self.palette.dead
                };
                let (x, y) = self.grid.cell_origin(row, col, self.cell_size);
                surface.fill_rect(x as f32, y as f32, size, size, color);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::automaton::Automaton;
    use pretty_assertions::assert_eq;
    use universe::Universe;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Op {
        Line((f32, f32), (f32, f32), Color32),
        Rect(f32, f32, f32, f32, Color32),
    }

    #[derive(Default)]
    pub(crate) struct Recording {
        pub(crate) ops: Vec<Op>,
    }

    impl Surface for Recording {
        fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color32) {
            self.ops.push(Op::Line(from, to, color));
        }

        fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color32) {
            self.ops.push(Op::Rect(x, y, width, height, color));
        }
    }

    fn renderer(grid: Grid) -> FrameRenderer<Recording> {
        let mut r = FrameRenderer::new(grid, 5, Palette::default());
        r.attach(Recording::default());
        r
    }

    #[test]
    fn grid_has_one_line_per_boundary() {
        let mut r = renderer(Grid::new(3, 2));
        r.draw_grid();
        let ops = &r.surface().unwrap().ops;
        assert_eq!(ops.len(), 4 + 3);
        let grey = Palette::default().grid;
        assert_eq!(ops[0], Op::Line((1.0, 0.0), (1.0, 13.0), grey));
        assert_eq!(ops[3], Op::Line((19.0, 0.0), (19.0, 13.0), grey));
        assert_eq!(ops[4], Op::Line((0.0, 1.0), (19.0, 1.0), grey));
        assert_eq!(ops[6], Op::Line((0.0, 13.0), (19.0, 13.0), grey));
    }

    #[test]
    fn cells_fill_in_row_major_order() {
        let mut u = Universe::dead(2, 2);
        Automaton::toggle_cell(&mut u, 1, 0);
        let mut r = renderer(Grid::new(2, 2));
        r.draw_cells(&CellBuffer::acquire(&u));
        let palette = Palette::default();
        assert_eq!(
            r.surface().unwrap().ops,
            vec![
                Op::Rect(1.0, 1.0, 5.0, 5.0, palette.dead),
                Op::Rect(7.0, 1.0, 5.0, 5.0, palette.dead),
                Op::Rect(1.0, 7.0, 5.0, 5.0, palette.alive),
                Op::Rect(7.0, 7.0, 5.0, 5.0, palette.dead),
            ]
        );
    }

    #[test]
    fn detached_renderer_draws_nothing() {
        let u = Universe::interleaved(2, 2);
        let mut r: FrameRenderer<Recording> = FrameRenderer::new(Grid::new(2, 2), 5, Palette::default());
        r.draw_grid();
        r.draw_cells(&CellBuffer::acquire(&u));
        assert!(r.surface().is_none());
    }

    #[test]
    fn redraw_reflects_latest_buffer() {
        let mut u = Universe::dead(1, 1);
        let mut r = renderer(Grid::new(1, 1));
        r.draw_cells(&CellBuffer::acquire(&u));
        Automaton::toggle_cell(&mut u, 0, 0);
        r.draw_cells(&CellBuffer::acquire(&u));
        let ops = &r.surface().unwrap().ops;
        assert_eq!(ops[0], Op::Rect(1.0, 1.0, 5.0, 5.0, Palette::default().dead));
        assert_eq!(ops[1], Op::Rect(1.0, 1.0, 5.0, 5.0, Palette::default().alive));
    }
}
