//! Text rendering of a canvas for terminals.

use qrpix_core::{Canvas, Module};

/// Renders a canvas as lines of text, one pattern per module.
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    dark: &'static str,
    light: &'static str,
    quiet_zone: usize,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self {
            dark: "██",
            light: "  ",
            quiet_zone: 2,
        }
    }
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pattern printed for a dark module.
    pub fn with_dark(mut self, dark: &'static str) -> Self {
        self.dark = dark;
        self
    }

    /// Set the pattern printed for a light module.
    pub fn with_light(mut self, light: &'static str) -> Self {
        self.light = light;
        self
    }

    /// Set the width of the quiet zone in modules.
    pub fn with_quiet_zone(mut self, quiet_zone: usize) -> Self {
        self.quiet_zone = quiet_zone;
        self
    }

    /// Render `canvas` to a newline-terminated string.
    pub fn render(&self, canvas: &Canvas) -> String {
        let modules = canvas.size() + 2 * self.quiet_zone;
        let mut out = String::with_capacity(modules * (modules * 2 + 1));
        for i in 0..modules {
            for j in 0..modules {
                let module = i
                    .checked_sub(self.quiet_zone)
                    .zip(j.checked_sub(self.quiet_zone))
                    .and_then(|(i, j)| canvas.get(i, j))
                    .unwrap_or(Module::Light);
                out.push_str(match module {
                    Module::Dark => self.dark,
                    Module::Light => self.light,
                });
            }
            out.push('\n');
        }
        out
    }
}
