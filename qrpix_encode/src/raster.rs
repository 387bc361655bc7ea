//! Rasterizing a canvas into a grayscale pixel buffer.

use qrpix_core::{Canvas, Module};

/// A square grayscale image, one byte per pixel in row-major order, with dark
/// modules rendered as 0x00 and light ones as 0xff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Get the pixel at `(x, y)`, with `x` running right and `y` down.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }
}

/// Scales a canvas up by an integer factor and surrounds it with a quiet
/// zone, sampling modules nearest-neighbor.
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    module_size: usize,
    quiet_zone: usize,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self {
            module_size: 10,
            quiet_zone: 4,
        }
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the side length of one module in pixels.
    pub fn with_module_size(mut self, module_size: usize) -> Self {
        self.module_size = module_size;
        self
    }

    /// Set the width of the quiet zone in modules.
    pub fn with_quiet_zone(mut self, quiet_zone: usize) -> Self {
        self.quiet_zone = quiet_zone;
        self
    }

    /// Render `canvas` into a [Bitmap]. Every position outside the canvas is
    /// part of the quiet zone and rendered light.
    pub fn rasterize(&self, canvas: &Canvas) -> Bitmap {
        let modules = canvas.size() + 2 * self.quiet_zone;
        let dim = modules * self.module_size;
        let mut pixels = Vec::with_capacity(dim * dim);
        for y in 0..dim {
            let i = y / self.module_size;
            for x in 0..dim {
                let j = x / self.module_size;
                let module = i
                    .checked_sub(self.quiet_zone)
                    .zip(j.checked_sub(self.quiet_zone))
                    .and_then(|(i, j)| canvas.get(i, j))
                    .unwrap_or(Module::Light);
                pixels.push(match module {
                    Module::Dark => 0x00,
                    Module::Light => 0xff,
                });
            }
        }
        Bitmap {
            width: dim,
            height: dim,
            pixels,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dimensions_include_quiet_zone_and_scaling() {
        let canvas = Canvas::filled(21, Module::Light);
        let bitmap = Rasterizer::new().rasterize(&canvas);
        assert_eq!(bitmap.width(), (21 + 8) * 10);
        assert_eq!(bitmap.height(), (21 + 8) * 10);
        assert_eq!(bitmap.pixels().len(), 290 * 290);
    }

    #[test]
    fn quiet_zone_is_light() {
        let canvas = Canvas::filled(21, Module::Dark);
        let bitmap = Rasterizer::new().rasterize(&canvas);
        assert_eq!(bitmap.get(0, 0), Some(0xff));
        assert_eq!(bitmap.get(39, 39), Some(0xff));
        // First pixel of the symbol proper.
        assert_eq!(bitmap.get(40, 40), Some(0x00));
        assert_eq!(bitmap.get(290, 0), None);
    }

    #[test]
    fn unit_module_size_maps_modules_to_pixels() {
        let mut canvas = Canvas::filled(3, Module::Light);
        canvas.set(1, 2, Module::Dark);
        let bitmap = Rasterizer::new()
            .with_module_size(1)
            .with_quiet_zone(0)
            .rasterize(&canvas);
        assert_eq!(bitmap.width(), 3);
        // Canvas rows map to y, columns to x.
        assert_eq!(bitmap.get(2, 1), Some(0x00));
        assert_eq!(bitmap.get(1, 2), Some(0xff));
    }

    #[test]
    fn module_blocks_are_uniform() {
        let mut canvas = Canvas::filled(2, Module::Light);
        canvas.set(0, 0, Module::Dark);
        let bitmap = Rasterizer::new()
            .with_module_size(3)
            .with_quiet_zone(1)
            .rasterize(&canvas);
        for y in 3..6 {
            for x in 3..6 {
                assert_eq!(bitmap.get(x, y), Some(0x00));
            }
        }
        assert_eq!(bitmap.get(6, 3), Some(0xff));
    }
}
