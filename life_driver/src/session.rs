// session.rs - Ties the automaton, renderer, loop and input together

use tracing::{debug, info};

use crate::animation::{AnimationController, FrameHandle, FrameOutcome, FrameScheduler, StepBudget};
use crate::automaton::Automaton;
use crate::buffer::CellBuffer;
use crate::geometry::Grid;
use crate::input::{self, Command, ModifierState, PointerClick};
use crate::render::{FrameRenderer, Surface};

/// Builds a freshly randomized automaton for "reset random".
pub type Factory<A> = Box<dyn FnMut() -> A>;

pub struct Session<A, S, F> {
    universe: A,
    factory: Factory<A>,
    grid: Grid,
    renderer: FrameRenderer<S>,
    controller: AnimationController<F>,
    budget: StepBudget,
    modifiers: ModifierState,
    generation: u64,
}

impl<A, S, F> Session<A, S, F>
where
    A: Automaton,
    S: Surface,
    F: FrameScheduler,
{
    pub fn new(
        universe: A,
        factory: Factory<A>,
        renderer: FrameRenderer<S>,
        scheduler: F,
        budget: StepBudget,
    ) -> Self {
        let grid = Grid::new(universe.width(), universe.height());
        assert_eq!(renderer.grid(), grid, "renderer grid does not match the automaton");
        Self {
            universe,
            factory,
            grid,
            renderer,
            controller: AnimationController::new(scheduler),
            budget,
            modifiers: ModifierState::default(),
            generation: 0,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn universe(&self) -> &A {
        &self.universe
    }

    pub fn renderer(&self) -> &FrameRenderer<S> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut FrameRenderer<S> {
        &mut self.renderer
    }

    pub fn controller(&self) -> &AnimationController<F> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AnimationController<F> {
        &mut self.controller
    }

    pub fn budget(&self) -> StepBudget {
        self.budget
    }

    pub fn set_step_budget(&mut self, value: u32) {
        self.budget.set(value);
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    pub fn modifiers_mut(&mut self) -> &mut ModifierState {
        &mut self.modifiers
    }

    pub fn key_down(&mut self, key: &str) {
        self.modifiers.key_down(key);
    }

    pub fn key_up(&mut self) {
        self.modifiers.key_up();
    }

    /// Generations advanced since start-up or the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_cells(&self) -> usize {
        CellBuffer::acquire(&self.universe).live_count()
    }

    /// Draw gridlines and the current cells. The buffer view lives only for this call.
    pub fn redraw(&mut self) {
        self.renderer.draw_grid();
        let cells = CellBuffer::acquire(&self.universe);
        self.renderer.draw_cells(&cells);
    }

    pub fn play(&mut self) {
        self.controller.play();
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    pub fn toggle_play_pause(&mut self) {
        self.controller.toggle();
    }

    /// Scheduled frame: render generation k, then step to k+1.
    pub fn on_frame(&mut self, fired: FrameHandle) -> FrameOutcome {
        let Self { universe, renderer, controller, budget, generation, .. } = self;
        controller.on_frame(fired, budget.value(), || {
            renderer.draw_grid();
            renderer.draw_cells(&CellBuffer::acquire(&*universe));
            universe.advance_generation();
            *generation += 1;
        })
    }

    pub fn reset_random(&mut self) {
        let next = (self.factory)();
        self.replace_universe(next);
        info!("universe reset to random cells");
    }

    pub fn reset_all_dead(&mut self) {
        let dead = self.universe.all_dead();
        self.replace_universe(dead);
        info!("universe reset to all dead");
    }

    fn replace_universe(&mut self, next: A) {
        assert_eq!(
            (next.width(), next.height()),
            (self.grid.width(), self.grid.height()),
            "replacement automaton changed the grid size"
        );
        self.universe = next;
        self.generation = 0;
        self.redraw();
    }

    /// Translate a click with the held modifier, apply it, then redraw.
    pub fn click(&mut self, click: &PointerClick) -> Command {
        let command = input::translate(click, &self.modifiers, self.grid, self.renderer.cell_size());
        self.apply(command);
        command
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Toggle { row, col } => self.universe.toggle_cell(row, col),
            Command::StampPattern { row, col } => self.universe.stamp_glider(row, col),
            Command::NoOp => debug!("secondary modifier click ignored"),
        }
        self.redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Palette;
    use crate::render::tests::{Op, Recording};
    use universe::Universe;

    struct NoFrames;

    impl FrameScheduler for NoFrames {
        fn request_frame(&mut self) -> FrameHandle {
            FrameHandle(0)
        }
        fn cancel_frame(&mut self, _handle: FrameHandle) {}
    }

    fn session() -> Session<Universe, Recording, NoFrames> {
        let grid = Grid::new(4, 4);
        let mut renderer = FrameRenderer::new(grid, 5, Palette::default());
        renderer.attach(Recording::default());
        Session::new(
            Universe::dead(4, 4),
            Box::new(|| Universe::interleaved(4, 4)),
            renderer,
            NoFrames,
            StepBudget::new(2, 10),
        )
    }

    fn fills(session: &Session<Universe, Recording, NoFrames>) -> usize {
        session
            .renderer()
            .surface()
            .unwrap()
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Rect(..)))
            .count()
    }

    #[test]
    fn click_toggles_and_redraws() {
        let mut s = session();
        let click = PointerClick {
            x: 7.0,
            y: 7.0,
            display_left: 0.0,
            display_top: 0.0,
            display_width: 25.0,
            display_height: 25.0,
            backing_width: 25,
            backing_height: 25,
        };
        assert_eq!(s.click(&click), Command::Toggle { row: 1, col: 1 });
        assert_eq!(s.live_cells(), 1);
        assert_eq!(fills(&s), 16);

        s.key_down("Shift");
        assert_eq!(s.click(&click), Command::NoOp);
        assert_eq!(s.live_cells(), 1);
        assert_eq!(fills(&s), 32);

        s.key_down("Control");
        assert_eq!(s.click(&click), Command::StampPattern { row: 1, col: 1 });
        // Glider plus the cell toggled on earlier.
        assert_eq!(s.live_cells(), 6);
    }

    #[test]
    fn reset_random_uses_the_factory() {
        let mut s = session();
        s.reset_random();
        assert_eq!(s.live_cells(), Universe::interleaved(4, 4).live_count());
        assert_eq!(s.generation(), 0);
        assert_eq!(fills(&s), 16);
    }
}
