//! The encoding pipeline, from payload bytes to a finished QR code.

use qrpix_core::{Ecl, Mask, QrCode, Version};
use thiserror::Error;

use crate::raster::{Bitmap, Rasterizer};
use crate::{bits, ecc, paint::Painter};

/// Failure modes of the encoding pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The payload does not fit the requested version and level.
    #[error("payload needs {needed} data bits but only {available} are available")]
    CapacityExceeded { needed: usize, available: usize },
    /// A request parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Version used when the caller does not pick one.
pub const DEFAULT_VERSION: Version = match Version::new(4) {
    Some(version) => version,
    None => panic!("4 is a valid version number"),
};

/// Encodes payloads into QR codes with a fixed version and level.
///
/// # Example
/// ```
/// use qrpix_core::{Ecl, Version};
/// use qrpix_encode::Encoder;
///
/// let code = Encoder::new()
///     .with_version(Version::MIN)
///     .with_ecl(Ecl::M)
///     .encode(b"HELLO WORLD")
///     .unwrap();
/// assert_eq!(code.size(), 21);
/// ```
#[derive(Debug, Clone)]
pub struct Encoder {
    version: Version,
    ecl: Ecl,
    mask: Option<Mask>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            ecl: Ecl::M,
            mask: None,
        }
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the symbol version. The encoder never picks a different one: a
    /// payload that does not fit is an error, not a larger symbol.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Set the error correction level.
    pub fn with_ecl(mut self, ecl: Ecl) -> Self {
        self.ecl = ecl;
        self
    }

    /// Force a specific mask instead of scoring all eight.
    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Encode `data` into a QR code.
    pub fn encode(&self, data: &[u8]) -> Result<QrCode, EncodeError> {
        let codewords = bits::build(data, self.version, self.ecl)?;
        let blocks = ecc::build_blocks(&codewords, self.version, self.ecl);
        let sequence = ecc::interleave(&blocks);
        Ok(Painter::new(self.version, self.ecl).finish(&sequence, self.mask))
    }
}

/// Run the whole pipeline in one call: encode `text` and rasterize the result
/// with `module_size` pixels per module and a `quiet_zone` modules wide.
pub fn generate(
    text: &str,
    ecl: Ecl,
    version: u8,
    module_size: usize,
    quiet_zone: usize,
) -> Result<Bitmap, EncodeError> {
    let version = Version::new(version)
        .ok_or(EncodeError::InvalidParameter("version must be in 1..=40"))?;
    if module_size == 0 {
        return Err(EncodeError::InvalidParameter(
            "module size must be at least 1",
        ));
    }
    let code = Encoder::new()
        .with_version(version)
        .with_ecl(ecl)
        .encode(text.as_bytes())?;
    Ok(Rasterizer::new()
        .with_module_size(module_size)
        .with_quiet_zone(quiet_zone)
        .rasterize(code.canvas()))
}
