// ui.rs - eframe host: controls, canvas display and repaint-driven frames

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Color32, Pos2, Rect, Sense, TextureHandle, TextureOptions, Vec2};
use tracing::debug;
use universe::Universe;

use crate::animation::{FrameHandle, FrameScheduler};
use crate::canvas::PixelCanvas;
use crate::config::DriverConfig;
use crate::input::{self, KeyInput, PointerClick};
use crate::session::Session;

/// Frame scheduler backed by egui repaint requests.
pub struct RepaintScheduler {
    ctx: Option<egui::Context>,
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameHandle, Instant)>,
}

impl RepaintScheduler {
    pub fn new(interval: Duration) -> Self {
        Self { ctx: None, interval, next_id: 0, pending: None }
    }

    pub fn bind(&mut self, ctx: egui::Context) {
        self.ctx = Some(ctx);
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending.map(|(handle, _)| handle)
    }

    /// Hand out the pending frame if it is due; otherwise ask to be woken when it is.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        let (handle, due) = self.pending?;
        if now >= due {
            self.pending = None;
            return Some(handle);
        }
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint_after(due - now);
        }
        None
    }
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some((handle, Instant::now() + self.interval));
        if let Some(ctx) = &self.ctx {
            if self.interval.is_zero() {
                ctx.request_repaint();
            } else {
                ctx.request_repaint_after(self.interval);
            }
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending() == Some(handle) {
            self.pending = None;
        }
    }
}

pub struct LifeApp {
    session: Session<Universe, PixelCanvas, RepaintScheduler>,
    texture: Option<TextureHandle>,
    modifiers: egui::Modifiers,
}

impl LifeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &DriverConfig) -> Self {
        let mut scheduler = RepaintScheduler::new(config.frame_interval);
        scheduler.bind(cc.egui_ctx.clone());

        let mut session = crate::build_session(config, scheduler);
        session.redraw();
        session.play();

        Self { session, texture: None, modifiers: egui::Modifiers::default() }
    }

    /// Turn egui key events and modifier transitions into key-down / key-up.
    fn forward_keys(&mut self, ctx: &egui::Context) {
        let (modifiers, keys) = ctx.input(|i| {
            let keys: Vec<KeyInput> = i
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key { key, pressed, repeat, .. } => {
                        Some(KeyInput { key: *key, pressed: *pressed, repeat: *repeat })
                    }
                    _ => None,
                })
                .collect();
            (i.modifiers, keys)
        });

        input::forward_key_input(self.session.modifiers_mut(), self.modifiers, modifiers, &keys);
        self.modifiers = modifiers;
    }

    fn show_canvas(&mut self, ui: &mut egui::Ui) {
        let (backing_w, backing_h) = self.session.grid().pixel_size(self.session.renderer().cell_size());
        let zoom = (ui.available_width() / backing_w as f32).floor().clamp(1.0, 4.0);
        let display = Vec2::new(backing_w as f32 * zoom, backing_h as f32 * zoom);

        let (response, painter) = ui.allocate_painter(display, Sense::click());

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let rect = response.rect;
                let click = PointerClick {
                    x: pos.x,
                    y: pos.y,
                    display_left: rect.left(),
                    display_top: rect.top(),
                    display_width: rect.width(),
                    display_height: rect.height(),
                    backing_width: backing_w,
                    backing_height: backing_h,
                };
                let command = self.session.click(&click);
                debug!(?command, "canvas clicked");
            }
        }

        let Some(canvas) = self.session.renderer_mut().surface_mut() else {
            return;
        };
        let dirty = canvas.take_dirty();
        match &mut self.texture {
            Some(texture) if dirty => texture.set(canvas.image().clone(), TextureOptions::NEAREST),
            Some(_) => {}
            None => {
                let texture = ui.ctx().load_texture("life-canvas", canvas.image().clone(), TextureOptions::NEAREST);
                self.texture = Some(texture);
            }
        }
        let Some(texture) = &self.texture else {
            return;
        };

        painter.image(
            texture.id(),
            response.rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.forward_keys(ctx);

        // Input handlers above run to completion before the frame callback.
        let due = self.session.controller_mut().scheduler_mut().take_due(Instant::now());
        if let Some(handle) = due {
            self.session.on_frame(handle);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let label = self.session.controller().affordance().label();
                if ui.button(label).clicked() {
                    self.session.toggle_play_pause();
                }

                if ui.button("🎲 Reset random").clicked() {
                    self.session.reset_random();
                }

                if ui.button("⏹ Reset dead").clicked() {
                    self.session.reset_all_dead();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.session.generation()));
            });

            ui.horizontal(|ui| {
                ui.label("Ticks per animation:");
                let budget = self.session.budget();
                let mut value = budget.value();
                if ui.add(egui::Slider::new(&mut value, 0..=budget.max()).show_value(false)).changed() {
                    self.session.set_step_budget(value);
                }
                ui.label(self.session.budget().label());
            });

            ui.label("Click a cell to toggle it. Hold Ctrl and click to drop a glider.");

            ui.separator();

            self.show_canvas(ui);

            ui.separator();

            let live = self.session.live_cells();
            let total = self.session.grid().cell_count();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live));
                ui.label(format!("Dead cells: {}", total - live));
                ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
            });
        });

        // A click or reset dirtied the canvas after it was painted this pass.
        if self.session.renderer().surface().is_some_and(|c| c.is_dirty()) {
            ctx.request_repaint();
        }
    }
}
