//! Drawable surfaces
//!
//! The rasterizer only needs bounds-checked pixel writes, so every target
//! implements [`Surface`]. Concrete surfaces are picked by the caller:
//! - [`PixelBuffer`]: lockable RGBA memory handed to the presentation layer
//! - [`GlyphCanvas`]: text-mode surface for terminals and headless runs

use super::color::Color;

/// Anything the rasterizer can draw into
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Bounds-checked write. Returns false if the pixel was rejected.
    fn set(&mut self, x: i32, y: i32, color: Color) -> bool;

    /// Whether (x, y) lies inside [0, width) x [0, height)
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }
}

/// Row-major pixel memory with a lock/unlock access window
///
/// Writes are only accepted while locked. Outside the window the buffer
/// belongs to the presentation layer and can only be read.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pixels: Vec<Color>,
    width: usize,
    height: usize,
    locked: bool,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::BLACK; width * height],
            width,
            height,
            locked: false,
        }
    }

    /// Begin the write window. Fails if already locked.
    pub fn lock(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    /// End the write window. Fails if not locked.
    pub fn unlock(&mut self) -> bool {
        if !self.locked {
            return false;
        }
        self.locked = false;
        true
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Lock, run `f`, unlock. Returns None if the buffer was already locked.
    pub fn with_lock<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if !self.lock() {
            return None;
        }
        let result = f(self);
        self.unlock();
        Some(result)
    }

    /// Raw pixel memory and row pitch (in pixels), only while locked
    pub fn pixels_mut(&mut self) -> Option<(&mut [Color], usize)> {
        if !self.locked {
            return None;
        }
        Some((&mut self.pixels, self.width))
    }

    /// Read-only view for presentation
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.pixels[y as usize * self.width + x as usize])
    }

    /// Fill every pixel. Only while locked.
    pub fn clear(&mut self, color: Color) -> bool {
        match self.pixels_mut() {
            Some((pixels, _)) => {
                pixels.fill(color);
                true
            }
            None => false,
        }
    }

    /// Coordinates of every pixel that differs from `background`
    pub fn lit_pixels(&self, background: Color) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width;
        self.pixels
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c != background)
            .map(move |(i, _)| ((i % width) as i32, (i / width) as i32))
    }
}

impl Surface for PixelBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        if !self.locked || !self.in_bounds(x, y) {
            return false;
        }
        self.pixels[y as usize * self.width + x as usize] = color;
        true
    }
}

/// Brightness ramp, darkest first
const GLYPH_RAMP: &[u8] = b" .:-=+*#%@";

/// Character-cell surface
///
/// Each cell holds one glyph picked from the color's brightness.
#[derive(Debug, Clone)]
pub struct GlyphCanvas {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl GlyphCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![b' '; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(b' ');
    }

    pub fn glyph(&self, x: i32, y: i32) -> Option<char> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize] as char)
    }

    /// Downsample a pixel buffer into this canvas
    ///
    /// A cell takes the brightest pixel of its block that differs from
    /// `background`.
    pub fn blit_from(&mut self, buffer: &PixelBuffer, background: Color) {
        self.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        let sx = buffer.width().div_ceil(self.width).max(1);
        let sy = buffer.height().div_ceil(self.height).max(1);

        for (x, y) in buffer.lit_pixels(background) {
            let cx = x as usize / sx;
            let cy = y as usize / sy;
            if let Some(color) = buffer.get(x, y) {
                let idx = cy * self.width + cx;
                if cx < self.width && cy < self.height {
                    let glyph = Self::glyph_for(color);
                    if ramp_index(glyph) > ramp_index(self.cells[idx]) {
                        self.cells[idx] = glyph;
                    }
                }
            }
        }
    }

    /// Rows joined by newlines
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|&b| b as char));
            out.push('\n');
        }
        out
    }

    fn glyph_for(color: Color) -> u8 {
        let idx = 1 + color.luma() as usize * (GLYPH_RAMP.len() - 2) / 255;
        GLYPH_RAMP[idx]
    }
}

fn ramp_index(glyph: u8) -> usize {
    GLYPH_RAMP.iter().position(|&g| g == glyph).unwrap_or(0)
}

impl Surface for GlyphCanvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self.cells[y as usize * self.width + x as usize] = Self::glyph_for(color);
        true
    }
}
