use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use qrpix_core::{Ecl, Version};
use qrpix_encode::{AsciiRenderer, Encoder, Rasterizer};

/// Encode text as a QR code and print it or save it as an image.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Text to encode; read from standard input when omitted.
    text: Option<String>,

    /// Output file. PNG output is chosen by extension; any other path gets
    /// text art. Omit to print to standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Symbol version, 1 to 40. Larger versions hold more data.
    #[arg(long, default_value_t = 4)]
    symbol_version: u8,

    /// Error correction level.
    #[arg(short, long, value_enum, default_value_t = Level::M)]
    level: Level,

    /// Pixels per module in image output.
    #[arg(long, default_value_t = 10)]
    module_size: usize,

    /// Quiet zone width in modules.
    #[arg(long, default_value_t = 4)]
    quiet_zone: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for Ecl {
    fn from(value: Level) -> Self {
        match value {
            Level::L => Ecl::L,
            Level::M => Ecl::M,
            Level::Q => Ecl::Q,
            Level::H => Ecl::H,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let text = match cli.text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read standard input")?;
            buffer.trim_end_matches('\n').to_string()
        }
    };

    let version = Version::new(cli.symbol_version).context("symbol version must be in 1..=40")?;
    anyhow::ensure!(cli.module_size >= 1, "module size must be at least 1");

    let code = Encoder::new()
        .with_version(version)
        .with_ecl(cli.level.into())
        .encode(text.as_bytes())
        .with_context(|| format!("cannot encode {} bytes at version {}", text.len(), version))?;

    match cli.output {
        Some(path) if path.extension().is_some_and(|ext| ext == "png") => {
            let bitmap = Rasterizer::new()
                .with_module_size(cli.module_size)
                .with_quiet_zone(cli.quiet_zone)
                .rasterize(code.canvas());
            let (width, height) = (bitmap.width() as u32, bitmap.height() as u32);
            let image = image::GrayImage::from_raw(width, height, bitmap.into_pixels())
                .context("bitmap does not fit an image buffer")?;
            image
                .save(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        Some(path) => {
            let art = AsciiRenderer::new()
                .with_quiet_zone(cli.quiet_zone)
                .render(code.canvas());
            std::fs::write(&path, art)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let art = AsciiRenderer::new()
                .with_quiet_zone(cli.quiet_zone)
                .render(code.canvas());
            print!("{}", art);
        }
    }
    Ok(())
}
