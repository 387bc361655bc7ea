use bitvec::vec::BitVec;

use crate::{qrstandard, Version};

/// Module (aka, a pixel) of a QR code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    Light,
    Dark,
}

impl Module {
    /// Get the inverted module.
    /// # Example
    /// ```
    /// use qrpix_core::Module;
    /// assert_eq!(Module::Dark.inverted(), Module::Light);
    /// assert_eq!(Module::Light.inverted(), Module::Dark);
    /// ```
    pub fn inverted(&self) -> Self {
        match self {
            Module::Dark => Module::Light,
            Module::Light => Module::Dark,
        }
    }
}

impl From<bool> for Module {
    fn from(value: bool) -> Self {
        match value {
            true => Module::Dark,
            false => Module::Light,
        }
    }
}

impl From<Module> for bool {
    fn from(value: Module) -> Self {
        match value {
            Module::Dark => true,
            Module::Light => false,
        }
    }
}

/// A square canvas of modules, dark modules stored as set bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    bits: BitVec,
    size: usize,
}

impl Canvas {
    /// Return a canvas of size `size` filled with `module`.
    pub fn filled(size: usize, module: Module) -> Self {
        Self {
            bits: BitVec::repeat(module.into(), size * size),
            size,
        }
    }

    /// Get the size of the canvas.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the 1D bit index for position `(i, j)`, panicking if out of bounds.
    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        if i >= self.size || j >= self.size {
            panic!(
                "index out of bounds: the size is {} but the index is ({}, {})",
                self.size, i, j
            );
        }
        i * self.size + j
    }

    /// Get the module at position `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<Module> {
        if i < self.size && j < self.size {
            Some(Module::from(self.bits[i * self.size + j]))
        } else {
            None
        }
    }

    /// Set the module at position `(i, j)`.
    /// # Panics
    /// Panics if position `(i, j)` is out of bounds.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, module: Module) {
        let index = self.index(i, j);
        self.bits.set(index, module.into());
    }

    /// Invert the module at position `(i, j)`.
    /// # Panics
    /// Panics if position `(i, j)` is out of bounds.
    #[inline]
    pub fn toggle(&mut self, i: usize, j: usize) {
        let index = self.index(i, j);
        let current = self.bits[index];
        self.bits.set(index, !current);
    }

    /// Fill the `height` x `width` rectangle with upper-left corner `(i, j)`
    /// with `module`.
    /// # Panics
    /// Panics if any access is out of bounds.
    pub fn fill_rect(&mut self, module: Module, i: usize, j: usize, height: usize, width: usize) {
        for row in i..(i + height) {
            let start = self.index(row, j);
            let end = self.index(row, j + width - 1);
            self.bits[start..=end].fill(module.into());
        }
    }

    /// Modules of row `i` left to right, dark reported as `true`.
    pub fn row(&self, i: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |j| self.bits[i * self.size + j])
    }

    /// Modules of column `j` top to bottom, dark reported as `true`.
    pub fn column(&self, j: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |i| self.bits[i * self.size + j])
    }

    /// Number of dark modules on the whole canvas.
    pub fn dark_count(&self) -> usize {
        self.bits.count_ones()
    }
}

/// An atlas recording which positions of a [Canvas] are reserved for function
/// patterns and symbol metadata: finder patterns with their separators,
/// timing strips, alignment patterns, the format and version information
/// areas, and the always-dark module. Data placement and masking consult the
/// atlas and never touch reserved positions.
pub struct ReservedAreaAtlas {
    bits: BitVec,
    size: usize,
}

impl ReservedAreaAtlas {
    /// Create a new atlas for the given `version`.
    pub fn new(version: Version) -> Self {
        let size = qrstandard::canvas_size(version);
        let mut atlas = Self {
            bits: BitVec::repeat(false, size * size),
            size,
        };

        // Timing strips span the full row and column 6.
        atlas.mark_rect(6, 0, 1, size);
        atlas.mark_rect(0, 6, size, 1);

        // Finder patterns together with their separators fill an 8x8 zone in
        // three corners.
        const FINDER_ZONE: usize = 8;
        for (i, j) in [(0, 0), (0, size - FINDER_ZONE), (size - FINDER_ZONE, 0)] {
            atlas.mark_rect(i, j, FINDER_ZONE, FINDER_ZONE);
        }

        // Format information strips, including the always-dark module next to
        // the bottom-left finder.
        atlas.mark_rect(8, 0, 1, 9);
        atlas.mark_rect(8, size - 8, 1, 8);
        atlas.mark_rect(0, 8, 9, 1);
        atlas.mark_rect(size - 8, 8, 8, 1);

        // One 5x5 box per alignment pattern.
        for (i, j) in qrstandard::alignment_centers(version) {
            atlas.mark_rect(i - 2, j - 2, 5, 5);
        }

        // Version information blocks exist from version 7 up: 6x3 next to the
        // top-right finder, 3x6 above the bottom-left one.
        if version.number() >= 7 {
            atlas.mark_rect(0, size - 11, 6, 3);
            atlas.mark_rect(size - 11, 0, 3, 6);
        }

        atlas
    }

    fn mark_rect(&mut self, i: usize, j: usize, height: usize, width: usize) {
        for row in i..(i + height) {
            let start = row * self.size + j;
            self.bits[start..start + width].fill(true);
        }
    }

    /// Get the size of the atlas.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check whether position `(i, j)` is reserved.
    /// # Panics
    /// Panics if position `(i, j)` is out of bounds.
    /// # Example
    /// ```
    /// use qrpix_core::{ReservedAreaAtlas, Version};
    /// let atlas = ReservedAreaAtlas::new(Version::MIN);
    /// assert!(atlas.is_reserved(0, 0));
    /// assert!(!atlas.is_reserved(20, 20));
    /// ```
    #[inline]
    pub fn is_reserved(&self, i: usize, j: usize) -> bool {
        if i >= self.size || j >= self.size {
            panic!(
                "index out of bounds: the size is {} but the index is ({}, {})",
                self.size, i, j
            );
        }
        self.bits[i * self.size + j]
    }
}

/// Every position of a `size`-sided canvas in the canonical data placement
/// order: two-column strips scanned bottom-to-top and top-to-bottom
/// alternately, starting from the bottom-right corner. The vertical timing
/// column is not part of any strip.
pub fn data_traversal(size: usize) -> Vec<(usize, usize)> {
    const TIMING_COL: usize = 6;
    let mut order = Vec::with_capacity(size * size);
    let mut right = size - 1;
    let mut upward = true;
    loop {
        if right == TIMING_COL {
            right -= 1;
        }
        for step in 0..size {
            let i = if upward { size - 1 - step } else { step };
            order.push((i, right));
            order.push((i, right - 1));
        }
        upward = !upward;
        if right < 3 {
            break;
        }
        right -= 2;
    }
    order
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn canvas_set_get_toggle() {
        let mut canvas = Canvas::filled(21, Module::Light);
        assert_eq!(canvas.get(3, 4), Some(Module::Light));
        canvas.set(3, 4, Module::Dark);
        assert_eq!(canvas.get(3, 4), Some(Module::Dark));
        canvas.toggle(3, 4);
        assert_eq!(canvas.get(3, 4), Some(Module::Light));
        assert_eq!(canvas.get(21, 0), None);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn canvas_set_out_of_bounds_panics() {
        let mut canvas = Canvas::filled(21, Module::Light);
        canvas.set(21, 0, Module::Dark);
    }

    #[test]
    fn canvas_fill_rect_and_counts() {
        let mut canvas = Canvas::filled(10, Module::Light);
        canvas.fill_rect(Module::Dark, 2, 3, 4, 5);
        assert_eq!(canvas.dark_count(), 20);
        assert_eq!(canvas.get(2, 3), Some(Module::Dark));
        assert_eq!(canvas.get(5, 7), Some(Module::Dark));
        assert_eq!(canvas.get(6, 7), Some(Module::Light));
        assert_eq!(canvas.row(2).filter(|&dark| dark).count(), 5);
        assert_eq!(canvas.column(3).filter(|&dark| dark).count(), 4);
    }

    #[test]
    fn atlas_reserves_function_areas() {
        let atlas = ReservedAreaAtlas::new(Version::MIN);
        // Finder zones, timing strips and format strips.
        assert!(atlas.is_reserved(0, 0));
        assert!(atlas.is_reserved(7, 7));
        assert!(atlas.is_reserved(6, 10));
        assert!(atlas.is_reserved(10, 6));
        assert!(atlas.is_reserved(8, 8));
        assert!(atlas.is_reserved(13, 8));
        // Data area.
        assert!(!atlas.is_reserved(9, 9));
        assert!(!atlas.is_reserved(20, 20));
    }

    #[test]
    fn atlas_reserves_alignment_and_version_areas() {
        // Version 2 has a single alignment pattern centered at (18, 18).
        let atlas = ReservedAreaAtlas::new(Version::new(2).unwrap());
        assert!(atlas.is_reserved(18, 18));
        assert!(atlas.is_reserved(16, 16));
        assert!(atlas.is_reserved(20, 20));
        assert!(!atlas.is_reserved(15, 15));

        // Version 7 adds the two version information blocks.
        let atlas = ReservedAreaAtlas::new(Version::new(7).unwrap());
        let size = atlas.size();
        assert!(atlas.is_reserved(0, size - 11));
        assert!(atlas.is_reserved(5, size - 9));
        assert!(atlas.is_reserved(size - 11, 0));
        assert!(atlas.is_reserved(size - 9, 5));
        assert!(!atlas.is_reserved(size - 12, 9));
    }

    /// Leftover modules after placing every data and error correction bit are
    /// the version's remainder bits.
    const REMAINDER_BITS: [usize; 40] = [
        0, 7, 7, 7, 7, 7, 0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 3, 3, 3,
        3, 3, 3, 3, 0, 0, 0, 0, 0, 0,
    ];

    #[test]
    fn unreserved_area_matches_codeword_capacity() {
        for number in 1..=40 {
            let version = Version::new(number).unwrap();
            let atlas = ReservedAreaAtlas::new(version);
            let size = atlas.size();
            let free = (0..size)
                .flat_map(|i| (0..size).map(move |j| (i, j)))
                .filter(|&(i, j)| !atlas.is_reserved(i, j))
                .count();
            let expected = qrstandard::total_codewords(version) * 8
                + REMAINDER_BITS[number as usize - 1];
            assert_eq!(free, expected, "version {}", number);
        }
    }

    #[test]
    fn traversal_starts_bottom_right_and_zigzags() {
        let order = data_traversal(21);
        assert_eq!(&order[..6], &[(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);
    }

    #[test]
    fn traversal_covers_every_non_timing_column_once() {
        let size = 25;
        let order = data_traversal(size);
        assert_eq!(order.len(), size * (size - 1));
        assert!(order.iter().all(|&(_, j)| j != 6));
        let unique: HashSet<_> = order.iter().collect();
        assert_eq!(unique.len(), order.len());
    }
}
