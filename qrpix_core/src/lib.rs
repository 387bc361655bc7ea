mod canvas;
mod meta;
mod mode;
pub mod qrstandard;

pub use canvas::{data_traversal, Canvas, Module, ReservedAreaAtlas};
pub use meta::{Ecl, Mask, MaskTable, Meta, Version};
pub use mode::Mode;

/// A finished QR code: the module matrix plus the metadata encoded into it.
#[derive(Debug)]
pub struct QrCode {
    canvas: Canvas,
    meta: Meta,
}

impl QrCode {
    /// Construct a new [QrCode]. Returns `None` if the canvas size does not
    /// match the [Version] recorded in `meta`.
    pub fn new(canvas: Canvas, meta: Meta) -> Option<Self> {
        if canvas.size() == meta.canvas_size() {
            Some(Self { canvas, meta })
        } else {
            None
        }
    }

    /// Get the underlying canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Get the metadata.
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Side length of the module matrix.
    pub fn size(&self) -> usize {
        self.canvas.size()
    }
}

impl AsRef<Canvas> for QrCode {
    fn as_ref(&self) -> &Canvas {
        self.canvas()
    }
}

impl From<QrCode> for Canvas {
    fn from(value: QrCode) -> Self {
        value.canvas
    }
}
