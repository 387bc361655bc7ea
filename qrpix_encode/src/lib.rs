mod bits;
mod ecc;
mod encode;
mod gf256;
mod mask;
mod paint;
mod raster;
mod render;
mod session;

pub use encode::{generate, EncodeError, Encoder, DEFAULT_VERSION};
pub use raster::{Bitmap, Rasterizer};
pub use render::AsciiRenderer;
pub use session::{Debouncer, RequestGate, Ticket};
