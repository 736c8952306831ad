// canvas.rs - CPU pixel surface that keeps its contents between draws

use egui::{Color32, ColorImage};

use crate::render::Surface;

/// RGBA backing store. Pixels persist until overdrawn, like a canvas element.
pub struct PixelCanvas {
    image: ColorImage,
    dirty: bool,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            image: ColorImage::new([width as usize, height as usize], background),
            dirty: true,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.image.size[0] as u32, self.image.size[1] as u32)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color32 {
        self.image.pixels[y as usize * self.image.size[0] + x as usize]
    }

    pub fn image(&self) -> &ColorImage {
        &self.image
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns true once after any draw, so the host only re-uploads changed frames.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    fn put(&mut self, x: i64, y: i64, color: Color32) {
        let [w, h] = self.image.size;
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            return;
        }
        self.image.pixels[y as usize * w + x as usize] = color;
    }
}

/// Pixel column/row covered by a 1px stroke centred on `coord`.
fn stroke_pixel(coord: f32) -> i64 {
    (coord - 0.5).floor() as i64
}

impl Surface for PixelCanvas {
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color32) {
        debug_assert!(
            from.0 == to.0 || from.1 == to.1,
            "gridlines are axis-aligned, got {from:?} -> {to:?}"
        );
        self.dirty = true;
        if from.0 == to.0 {
            let x = stroke_pixel(from.0);
            let (y0, y1) = (from.1.min(to.1).floor() as i64, from.1.max(to.1).ceil() as i64);
            for y in y0..y1 {
                self.put(x, y, color);
            }
        } else {
            let y = stroke_pixel(from.1);
            let (x0, x1) = (from.0.min(to.0).floor() as i64, from.0.max(to.0).ceil() as i64);
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color32) {
        self.dirty = true;
        let (x0, y0) = (x.round() as i64, y.round() as i64);
        let (x1, y1) = ((x + width).round() as i64, (y + height).round() as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color);
            }
        }
    }
}
