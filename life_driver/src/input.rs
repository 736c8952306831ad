// input.rs - Pointer clicks and held keys to automaton commands

use tracing::debug;

use crate::geometry::Grid;

pub const PRIMARY_KEY: &str = "Control";
pub const SECONDARY_KEY: &str = "Shift";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    None,
    Primary,
    Secondary,
}

/// Last key pressed, cleared by any key release.
#[derive(Debug, Default, Clone)]
pub struct ModifierState {
    pressed: String,
}

impl ModifierState {
    pub fn key_down(&mut self, key: &str) {
        if self.pressed != key {
            debug!(key, "key down");
        }
        self.pressed.clear();
        self.pressed.push_str(key);
    }

    pub fn key_up(&mut self) {
        if !self.pressed.is_empty() {
            debug!(key = %self.pressed, "key up");
        }
        self.pressed.clear();
    }

    pub fn pressed(&self) -> &str {
        &self.pressed
    }

    pub fn modifier(&self) -> Modifier {
        match self.pressed.as_str() {
            PRIMARY_KEY => Modifier::Primary,
            SECONDARY_KEY => Modifier::Secondary,
            _ => Modifier::None,
        }
    }
}

/// A key event as the windowing layer reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: egui::Key,
    pub pressed: bool,
    pub repeat: bool,
}

/// Feed one frame of input into `state`.
///
/// egui reports Ctrl and Shift as held state rather than key events, so their
/// transitions between `before` and `after` become presses and releases of
/// [`PRIMARY_KEY`] and [`SECONDARY_KEY`]. Auto-repeat events are dropped.
/// Modifier releases apply before modifier presses, so swapping one modifier
/// for the other within a frame leaves the new one recorded.
pub fn forward_key_input(state: &mut ModifierState, before: egui::Modifiers, after: egui::Modifiers, keys: &[KeyInput]) {
    for input in keys.iter().filter(|input| !input.repeat) {
        if input.pressed {
            state.key_down(input.key.name());
        } else {
            state.key_up();
        }
    }

    let transitions = [(before.ctrl, after.ctrl, PRIMARY_KEY), (before.shift, after.shift, SECONDARY_KEY)];
    if transitions.iter().any(|&(was, is, _)| was && !is) {
        state.key_up();
    }
    for (_, _, key) in transitions.iter().filter(|&&(was, is, _)| !was && is) {
        state.key_down(key);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Toggle { row: u32, col: u32 },
    StampPattern { row: u32, col: u32 },
    NoOp,
}

/// A click in display coordinates, together with where the canvas sits on
/// screen and how large its backing store is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerClick {
    pub x: f32,
    pub y: f32,
    pub display_left: f32,
    pub display_top: f32,
    pub display_width: f32,
    pub display_height: f32,
    pub backing_width: u32,
    pub backing_height: u32,
}

impl PointerClick {
    /// Click position in backing-store pixels.
    pub fn backing_position(&self) -> (f32, f32) {
        let scale_x = scale(self.backing_width, self.display_width);
        let scale_y = scale(self.backing_height, self.display_height);
        (
            (self.x - self.display_left) * scale_x,
            (self.y - self.display_top) * scale_y,
        )
    }
}

fn scale(backing: u32, displayed: f32) -> f32 {
    if displayed > 0.0 { backing as f32 / displayed } else { 1.0 }
}

pub fn translate(click: &PointerClick, modifiers: &ModifierState, grid: Grid, cell_size: u32) -> Command {
    let (px, py) = click.backing_position();
    let (row, col) = grid.cell_from_pixel(px, py, cell_size);

    let command = match modifiers.modifier() {
        Modifier::Primary => Command::StampPattern { row, col },
        Modifier::Secondary => Command::NoOp,
        Modifier::None => Command::Toggle { row, col },
    };
    debug!(?command, px, py, "click translated");
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_at(x: f32, y: f32) -> PointerClick {
        PointerClick {
            x,
            y,
            display_left: 0.0,
            display_top: 0.0,
            display_width: 25.0,
            display_height: 25.0,
            backing_width: 25,
            backing_height: 25,
        }
    }

    fn held(key: &str) -> ModifierState {
        let mut state = ModifierState::default();
        state.key_down(key);
        state
    }

    #[test]
    fn modifier_selects_command() {
        let grid = Grid::new(4, 4);
        let click = click_at(7.0, 7.0);
        assert_eq!(
            translate(&click, &held("Control"), grid, 5),
            Command::StampPattern { row: 1, col: 1 }
        );
        assert_eq!(translate(&click, &held("Shift"), grid, 5), Command::NoOp);
        assert_eq!(
            translate(&click, &ModifierState::default(), grid, 5),
            Command::Toggle { row: 1, col: 1 }
        );
    }

    #[test]
    fn unrelated_key_still_toggles() {
        let grid = Grid::new(4, 4);
        assert_eq!(
            translate(&click_at(0.0, 20.0), &held("a"), grid, 5),
            Command::Toggle { row: 3, col: 0 }
        );
    }

    #[test]
    fn key_up_clears_whatever_was_held() {
        let mut state = held("Control");
        state.key_down("Shift");
        assert_eq!(state.modifier(), Modifier::Secondary);
        state.key_up();
        assert_eq!(state.pressed(), "");
        assert_eq!(state.modifier(), Modifier::None);
    }

    #[test]
    fn display_scaling_maps_to_backing_pixels() {
        // Canvas shown at half size, offset on screen.
        let click = PointerClick {
            x: 110.0 + 3.5,
            y: 50.0 + 9.5,
            display_left: 110.0,
            display_top: 50.0,
            display_width: 12.5,
            display_height: 12.5,
            backing_width: 25,
            backing_height: 25,
        };
        assert_eq!(click.backing_position(), (7.0, 19.0));
        assert_eq!(
            translate(&click, &ModifierState::default(), Grid::new(4, 4), 5),
            Command::Toggle { row: 3, col: 1 }
        );
    }

    #[test]
    fn clicks_outside_clamp_to_edge_cells() {
        let grid = Grid::new(4, 4);
        assert_eq!(
            translate(&click_at(40.0, -2.0), &ModifierState::default(), grid, 5),
            Command::Toggle { row: 0, col: 3 }
        );
    }

    fn mods(ctrl: bool, shift: bool) -> egui::Modifiers {
        egui::Modifiers { ctrl, shift, ..Default::default() }
    }

    fn key(key: egui::Key, pressed: bool, repeat: bool) -> KeyInput {
        KeyInput { key, pressed, repeat }
    }

    #[test]
    fn ctrl_and_shift_pressed_together_leave_shift_recorded() {
        let mut state = ModifierState::default();
        forward_key_input(&mut state, mods(false, false), mods(true, true), &[]);
        assert_eq!(state.modifier(), Modifier::Secondary);
    }

    #[test]
    fn swapping_shift_for_ctrl_in_one_frame_keeps_ctrl() {
        let mut state = ModifierState::default();
        forward_key_input(&mut state, mods(false, false), mods(false, true), &[]);
        assert_eq!(state.modifier(), Modifier::Secondary);

        forward_key_input(&mut state, mods(false, true), mods(true, false), &[]);
        assert_eq!(state.modifier(), Modifier::Primary);
        assert_eq!(state.pressed(), PRIMARY_KEY);
    }

    #[test]
    fn releasing_another_key_while_ctrl_is_held_clears_the_state() {
        let mut state = ModifierState::default();
        forward_key_input(&mut state, mods(false, false), mods(true, false), &[]);
        assert_eq!(state.modifier(), Modifier::Primary);

        let release = [key(egui::Key::A, false, false)];
        forward_key_input(&mut state, mods(true, false), mods(true, false), &release);
        assert_eq!(state.modifier(), Modifier::None);
        assert_eq!(state.pressed(), "");
    }

    #[test]
    fn repeats_are_ignored() {
        let mut state = ModifierState::default();
        forward_key_input(&mut state, mods(false, false), mods(true, false), &[]);

        let repeat = [key(egui::Key::A, true, true), key(egui::Key::A, false, true)];
        forward_key_input(&mut state, mods(true, false), mods(true, false), &repeat);
        assert_eq!(state.modifier(), Modifier::Primary);

        let press = [key(egui::Key::A, true, false)];
        forward_key_input(&mut state, mods(true, false), mods(true, false), &press);
        assert_eq!(state.pressed(), "A");
        assert_eq!(state.modifier(), Modifier::None);
    }

    #[test]
    fn releasing_ctrl_clears_the_state() {
        let mut state = ModifierState::default();
        forward_key_input(&mut state, mods(false, false), mods(true, false), &[]);
        forward_key_input(&mut state, mods(true, false), mods(false, false), &[]);
        assert_eq!(state.modifier(), Modifier::None);
    }
}
