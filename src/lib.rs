//! Convert text into a QR Code symbol and rasterize it to a grayscale bitmap.
//!
//! The heavy lifting lives in [`qrpix_encode`]; this crate simply re-exports
//! the public surface so applications can depend on a single package.

pub use qrpix_core::{Canvas, Ecl, Mask, Mode, Module, QrCode, Version};
pub use qrpix_encode::{
    generate, AsciiRenderer, Bitmap, Debouncer, EncodeError, Encoder, Rasterizer, RequestGate,
    Ticket,
};
