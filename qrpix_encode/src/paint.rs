//! Painting function patterns and codewords onto a canvas.

use bitvec::{order::Msb0, view::BitView};
use qrpix_core::{
    data_traversal, qrstandard, Canvas, Ecl, Mask, MaskTable, Meta, Module, QrCode,
    ReservedAreaAtlas, Version,
};

use crate::mask;

/// Paints a QR code onto a blank canvas: function patterns first, then the
/// codeword sequence, then the mask with the lowest penalty.
pub struct Painter {
    version: Version,
    ecl: Ecl,
    canvas: Canvas,
    atlas: ReservedAreaAtlas,
}

impl Painter {
    /// Create a painter with every function pattern already in place.
    pub fn new(version: Version, ecl: Ecl) -> Self {
        let size = qrstandard::canvas_size(version);
        let mut painter = Self {
            version,
            ecl,
            canvas: Canvas::filled(size, Module::Light),
            atlas: ReservedAreaAtlas::new(version),
        };
        painter.paint_finders();
        painter.paint_timing();
        painter.paint_alignment();
        if version.number() >= 7 {
            painter.paint_version_info();
        }
        painter
    }

    /// Place `codewords` bit by bit along the zigzag traversal, skipping
    /// reserved positions, then apply the best mask (or `forced_mask`) and the
    /// matching format information.
    pub fn finish(mut self, codewords: &[u8], forced_mask: Option<Mask>) -> QrCode {
        self.paint_codewords(codewords);
        let mask = forced_mask.unwrap_or_else(|| self.choose_mask());
        self.toggle_mask(mask);
        self.paint_format_info(mask);
        let meta = Meta {
            version: self.version,
            ecl: self.ecl,
            mask,
        };
        QrCode::new(self.canvas, meta).expect("painter canvas always matches its version")
    }

    fn paint_finders(&mut self) {
        let size = self.canvas.size();
        for (i, j) in [(0, 0), (0, size - 7), (size - 7, 0)] {
            self.canvas.fill_rect(Module::Dark, i, j, 7, 7);
            self.canvas.fill_rect(Module::Light, i + 1, j + 1, 5, 5);
            self.canvas.fill_rect(Module::Dark, i + 2, j + 2, 3, 3);
        }
    }

    fn paint_timing(&mut self) {
        let size = self.canvas.size();
        for k in (8..size - 8).step_by(2) {
            self.canvas.set(6, k, Module::Dark);
            self.canvas.set(k, 6, Module::Dark);
        }
    }

    fn paint_alignment(&mut self) {
        for (i, j) in qrstandard::alignment_centers(self.version) {
            self.canvas.fill_rect(Module::Dark, i - 2, j - 2, 5, 5);
            self.canvas.fill_rect(Module::Light, i - 1, j - 1, 3, 3);
            self.canvas.set(i, j, Module::Dark);
        }
    }

    fn paint_codewords(&mut self, codewords: &[u8]) {
        let bits = codewords.view_bits::<Msb0>();
        let atlas = &self.atlas;
        let canvas = &mut self.canvas;
        let free = data_traversal(atlas.size())
            .into_iter()
            .filter(|&(i, j)| !atlas.is_reserved(i, j));
        // Remainder positions past the last codeword stay light.
        for ((i, j), bit) in free.zip(bits) {
            canvas.set(i, j, Module::from(*bit));
        }
    }

    /// Invert every data module where the mask rule holds. Applying the same
    /// mask twice restores the canvas.
    fn toggle_mask(&mut self, mask: Mask) {
        let rule = mask.rule();
        let size = self.canvas.size();
        for i in 0..size {
            for j in 0..size {
                if !self.atlas.is_reserved(i, j) && rule(i, j) {
                    self.canvas.toggle(i, j);
                }
            }
        }
    }

    /// Score all eight masks and pick the one with the lowest penalty, ties
    /// broken towards the lowest code. Each candidate is scored with its own
    /// format information painted.
    fn choose_mask(&mut self) -> Mask {
        let mut scores = MaskTable::<u32>::default();
        for mask in Mask::all() {
            self.toggle_mask(mask);
            self.paint_format_info(mask);
            scores[mask] = mask::penalty(&self.canvas);
            self.toggle_mask(mask);
        }
        scores
            .iter()
            .min_by_key(|&(_, &score)| score)
            .map(|(mask, _)| mask)
            .unwrap_or_default()
    }

    fn paint_format_info(&mut self, mask: Mask) {
        let format = qrstandard::format_bits(self.ecl, mask);
        let size = self.canvas.size();
        let bit = |k: usize| Module::from(format >> k & 1 == 1);

        // First copy, wrapped around the top-left finder.
        for k in 0..6 {
            self.canvas.set(k, 8, bit(k));
        }
        self.canvas.set(7, 8, bit(6));
        self.canvas.set(8, 8, bit(7));
        self.canvas.set(8, 7, bit(8));
        for k in 9..15 {
            self.canvas.set(8, 14 - k, bit(k));
        }

        // Second copy, split between the top-right and bottom-left finders.
        for k in 0..8 {
            self.canvas.set(8, size - 1 - k, bit(k));
        }
        for k in 8..15 {
            self.canvas.set(size - 15 + k, 8, bit(k));
        }

        // The module above the bottom-left finder is always dark.
        self.canvas.set(size - 8, 8, Module::Dark);
    }

    fn paint_version_info(&mut self) {
        let version = qrstandard::version_bits(self.version);
        let size = self.canvas.size();
        for k in 0..18 {
            let module = Module::from(version >> k & 1 == 1);
            self.canvas.set(size - 11 + k % 3, k / 3, module);
            self.canvas.set(k / 3, size - 11 + k % 3, module);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn painted(version: u8, ecl: Ecl, forced_mask: Option<Mask>) -> QrCode {
        let version = Version::new(version).unwrap();
        let codewords: Vec<u8> = (0..qrstandard::total_codewords(version))
            .map(|k| (k * 89 + 13) as u8)
            .collect();
        Painter::new(version, ecl).finish(&codewords, forced_mask)
    }

    #[test]
    fn finder_patterns_are_in_place() {
        let code = painted(1, Ecl::M, None);
        let canvas = code.canvas();
        for (i, j) in [(0, 0), (0, 14), (14, 0)] {
            // Dark ring, light ring, dark core.
            assert_eq!(canvas.get(i, j), Some(Module::Dark));
            assert_eq!(canvas.get(i + 1, j + 1), Some(Module::Light));
            assert_eq!(canvas.get(i + 3, j + 3), Some(Module::Dark));
            assert_eq!(canvas.get(i + 4, j + 4), Some(Module::Light));
        }
        // Separators stay light.
        assert_eq!(canvas.get(7, 7), Some(Module::Light));
    }

    #[test]
    fn timing_strips_alternate() {
        let code = painted(1, Ecl::M, None);
        let canvas = code.canvas();
        for k in 8..13 {
            let expected = if k % 2 == 0 { Module::Dark } else { Module::Light };
            assert_eq!(canvas.get(6, k), Some(expected));
            assert_eq!(canvas.get(k, 6), Some(expected));
        }
    }

    #[test]
    fn dark_module_is_always_dark() {
        for mask in Mask::all() {
            let code = painted(2, Ecl::Q, Some(mask));
            let size = code.size();
            assert_eq!(code.canvas().get(size - 8, 8), Some(Module::Dark));
        }
    }

    #[test]
    fn alignment_pattern_painted() {
        let code = painted(2, Ecl::M, None);
        let canvas = code.canvas();
        assert_eq!(canvas.get(18, 18), Some(Module::Dark));
        assert_eq!(canvas.get(17, 18), Some(Module::Light));
        assert_eq!(canvas.get(16, 18), Some(Module::Dark));
        assert_eq!(canvas.get(16, 16), Some(Module::Dark));
    }

    #[test]
    fn format_copies_agree() {
        let code = painted(3, Ecl::H, None);
        let canvas = code.canvas();
        let size = code.size();
        let format = qrstandard::format_bits(Ecl::H, code.meta().mask);
        for k in 0..8 {
            let expected = Module::from(format >> k & 1 == 1);
            assert_eq!(canvas.get(8, size - 1 - k), Some(expected));
        }
        // Bit 0 of the first copy sits at the top of the column strip.
        assert_eq!(canvas.get(0, 8), Some(Module::from(format & 1 == 1)));
    }

    #[test]
    fn version_info_painted_from_version_seven() {
        let code = painted(7, Ecl::L, None);
        let canvas = code.canvas();
        let size = code.size();
        let version = qrstandard::version_bits(Version::new(7).unwrap());
        for k in 0..18 {
            let expected = Module::from(version >> k & 1 == 1);
            assert_eq!(canvas.get(size - 11 + k % 3, k / 3), Some(expected));
            assert_eq!(canvas.get(k / 3, size - 11 + k % 3), Some(expected));
        }
    }

    #[test]
    fn chosen_mask_minimizes_penalty() {
        let version = Version::new(2).unwrap();
        let codewords: Vec<u8> = (0..qrstandard::total_codewords(version))
            .map(|k| (k * 151 + 7) as u8)
            .collect();

        let chosen = Painter::new(version, Ecl::M)
            .finish(&codewords, None)
            .meta()
            .mask;
        let score_of = |mask: Mask| {
            let code = Painter::new(version, Ecl::M).finish(&codewords, Some(mask));
            mask::penalty(code.canvas())
        };
        let best = score_of(chosen);
        for mask in Mask::all() {
            let score = score_of(mask);
            assert!(best <= score);
            // Ties break towards the lowest mask code.
            if score == best {
                assert!(chosen <= mask);
            }
        }
    }

    #[test]
    fn masking_twice_restores_the_canvas() {
        let version = Version::new(1).unwrap();
        let mut painter = Painter::new(version, Ecl::M);
        painter.paint_codewords(&[0xa5; 26]);
        let before = painter.canvas.clone();
        let mask = Mask::new(3).unwrap();
        painter.toggle_mask(mask);
        assert_ne!(painter.canvas, before);
        painter.toggle_mask(mask);
        assert_eq!(painter.canvas, before);
    }
}
