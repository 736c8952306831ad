// lib.rs - Front-end driver for a Game of Life universe
//
// The driver owns the animation loop, renders the universe's cells onto a
// pixel surface and turns clicks into toggle / stamp commands.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use universe::{Layout, Universe};

pub mod animation;
pub mod automaton;
pub mod buffer;
pub mod canvas;
pub mod config;
pub mod geometry;
pub mod input;
pub mod render;
pub mod session;
pub mod ui;

use animation::{FrameScheduler, StepBudget};
use canvas::PixelCanvas;
use config::{DriverConfig, InitialCells};
use geometry::Grid;
use render::FrameRenderer;
use session::Session;

/// Session over the reference universe, drawing into a canvas sized for the grid.
pub fn build_session<F: FrameScheduler>(config: &DriverConfig, scheduler: F) -> Session<Universe, PixelCanvas, F> {
    let (width, height) = (config.width, config.height);
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let layout = if config.packed { Layout::Bits } else { Layout::Bytes };

    let initial = match config.initial {
        InitialCells::Interleaved => Universe::interleaved(width, height),
        InitialCells::Random => Universe::random(width, height, &mut rng),
        InitialCells::Dead => Universe::dead(width, height),
    }
    .with_layout(layout);
    let factory = Box::new(move || Universe::random(width, height, &mut rng).with_layout(layout));

    let grid = Grid::new(width, height);
    let (canvas_w, canvas_h) = grid.pixel_size(config.cell_size);
    let mut renderer = FrameRenderer::new(grid, config.cell_size, config.palette);
    renderer.attach(PixelCanvas::new(canvas_w, canvas_h, config.palette.grid));
    info!(width, height, canvas_w, canvas_h, initial = ?config.initial, ?layout, "session created");

    Session::new(
        initial,
        factory,
        renderer,
        scheduler,
        StepBudget::new(config.step_budget, config.max_step_budget),
    )
}
