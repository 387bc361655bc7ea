//! Constants and derived quantities fixed by the QR code standard.

use crate::{Ecl, Mask, Mode, Version};

/// Determine the QR code's canvas size in modules for the given `version`.
pub fn canvas_size(version: Version) -> usize {
    17 + version.number() as usize * 4
}

/// Get the number of bits of the character count of `mode` for the given `version`.
pub fn char_count_len(mode: Mode, version: Version) -> usize {
    let group = match version.number() {
        1..=9 => 0,
        10..=26 => 1,
        _ => 2,
    };
    match mode {
        Mode::Num => [10, 12, 14][group],
        Mode::Alnum => [9, 11, 13][group],
        Mode::Bytes => [8, 16, 16][group],
    }
}

/// Number of bits taken by a payload of `char_count` characters encoded in
/// `mode`, including the mode indicator and the character count field.
pub fn encoded_len(mode: Mode, char_count: usize, version: Version) -> usize {
    const MODE_INDICATOR_LEN: usize = 4;
    let header = MODE_INDICATOR_LEN + char_count_len(mode, version);
    let body = match mode {
        Mode::Num => 10 * (char_count / 3) + [0, 4, 7][char_count % 3],
        Mode::Alnum => 11 * (char_count / 2) + 6 * (char_count % 2),
        Mode::Bytes => 8 * char_count,
    };
    header + body
}

/// Total number of codewords (data plus error correction) in a symbol.
pub fn total_codewords(version: Version) -> usize {
    const TOTAL_CODEWORDS: [usize; 40] = [
        26, 44, 70, 100, 134, 172, 196, 242, 292, 346, // 1-10
        404, 466, 532, 581, 655, 733, 815, 901, 991, 1085, // 11-20
        1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185, // 21-30
        2323, 2465, 2611, 2761, 2876, 3034, 3196, 3362, 3532, 3706, // 31-40
    ];
    TOTAL_CODEWORDS[version.number() as usize - 1]
}

/// Error correction block structure for a version/level combination:
/// `(number of blocks, error correction codewords per block)`.
pub fn ec_blocks(version: Version, ecl: Ecl) -> (usize, usize) {
    #[rustfmt::skip]
    const EC_BLOCKS: [[(u8, u8); 4]; 40] = [
        [(1, 7),   (1, 10),  (1, 13),  (1, 17)],  // 1
        [(1, 10),  (1, 16),  (1, 22),  (1, 28)],  // 2
        [(1, 15),  (1, 26),  (2, 18),  (2, 22)],  // 3
        [(1, 20),  (2, 18),  (2, 26),  (4, 16)],  // 4
        [(1, 26),  (2, 24),  (4, 18),  (4, 22)],  // 5
        [(2, 18),  (4, 16),  (4, 24),  (4, 28)],  // 6
        [(2, 20),  (4, 18),  (6, 18),  (5, 26)],  // 7
        [(2, 24),  (4, 22),  (6, 22),  (6, 26)],  // 8
        [(2, 30),  (5, 22),  (8, 20),  (8, 24)],  // 9
        [(4, 18),  (5, 26),  (8, 24),  (8, 28)],  // 10
        [(4, 20),  (5, 30),  (8, 28),  (11, 24)], // 11
        [(4, 24),  (8, 22),  (10, 26), (11, 28)], // 12
        [(4, 26),  (9, 22),  (12, 24), (16, 22)], // 13
        [(4, 30),  (9, 24),  (16, 20), (16, 24)], // 14
        [(6, 22),  (10, 24), (12, 30), (18, 24)], // 15
        [(6, 24),  (10, 28), (17, 24), (16, 30)], // 16
        [(6, 28),  (11, 28), (16, 28), (19, 28)], // 17
        [(6, 30),  (13, 26), (18, 28), (21, 28)], // 18
        [(7, 28),  (14, 26), (21, 26), (25, 26)], // 19
        [(8, 28),  (16, 26), (20, 30), (25, 28)], // 20
        [(8, 28),  (17, 26), (23, 28), (25, 30)], // 21
        [(9, 28),  (17, 28), (23, 30), (34, 24)], // 22
        [(9, 30),  (18, 28), (25, 30), (30, 30)], // 23
        [(10, 30), (20, 28), (27, 30), (32, 30)], // 24
        [(12, 26), (21, 28), (29, 30), (35, 30)], // 25
        [(12, 28), (23, 28), (34, 28), (37, 30)], // 26
        [(12, 30), (25, 28), (34, 30), (40, 30)], // 27
        [(13, 30), (26, 28), (35, 30), (42, 30)], // 28
        [(14, 30), (28, 28), (38, 30), (45, 30)], // 29
        [(15, 30), (29, 28), (40, 30), (48, 30)], // 30
        [(16, 30), (31, 28), (43, 30), (51, 30)], // 31
        [(17, 30), (33, 28), (45, 30), (54, 30)], // 32
        [(18, 30), (35, 28), (48, 30), (57, 30)], // 33
        [(19, 30), (37, 28), (51, 30), (60, 30)], // 34
        [(19, 30), (38, 28), (53, 30), (63, 30)], // 35
        [(20, 30), (40, 28), (56, 30), (66, 30)], // 36
        [(21, 30), (43, 28), (59, 30), (70, 30)], // 37
        [(22, 30), (45, 28), (62, 30), (74, 30)], // 38
        [(24, 30), (47, 28), (65, 30), (77, 30)], // 39
        [(25, 30), (49, 28), (68, 30), (81, 30)], // 40
    ];
    let (blocks, ec_per_block) =
        EC_BLOCKS[version.number() as usize - 1][ecl.table_index()];
    (blocks as usize, ec_per_block as usize)
}

/// Number of data codewords available for a version/level combination.
pub fn data_codewords(version: Version, ecl: Ecl) -> usize {
    let (blocks, ec_per_block) = ec_blocks(version, ecl);
    total_codewords(version) - blocks * ec_per_block
}

/// Number of data bits available for a version/level combination.
pub fn num_data_bits(version: Version, ecl: Ecl) -> usize {
    data_codewords(version, ecl) * 8
}

/// Row/column coordinates hosting alignment pattern centers for a version.
pub fn alignment_coords(version: Version) -> &'static [usize] {
    #[rustfmt::skip]
    const ALIGNMENT_COORDS: [&[usize]; 40] = [
        &[],
        &[6, 18],
        &[6, 22],
        &[6, 26],
        &[6, 30],
        &[6, 34],
        &[6, 22, 38],
        &[6, 24, 42],
        &[6, 26, 46],
        &[6, 28, 50],
        &[6, 30, 54],
        &[6, 32, 58],
        &[6, 34, 62],
        &[6, 26, 46, 66],
        &[6, 26, 48, 70],
        &[6, 26, 50, 74],
        &[6, 30, 54, 78],
        &[6, 30, 56, 82],
        &[6, 30, 58, 86],
        &[6, 34, 62, 90],
        &[6, 28, 50, 72, 94],
        &[6, 26, 50, 74, 98],
        &[6, 30, 54, 78, 102],
        &[6, 28, 54, 80, 106],
        &[6, 32, 58, 84, 110],
        &[6, 30, 58, 86, 114],
        &[6, 34, 62, 90, 118],
        &[6, 26, 50, 74, 98, 122],
        &[6, 30, 54, 78, 102, 126],
        &[6, 26, 52, 78, 104, 130],
        &[6, 30, 56, 82, 108, 134],
        &[6, 34, 60, 86, 112, 138],
        &[6, 30, 58, 86, 114, 142],
        &[6, 34, 62, 90, 118, 146],
        &[6, 30, 54, 78, 102, 126, 150],
        &[6, 24, 50, 76, 102, 128, 154],
        &[6, 28, 54, 80, 106, 132, 158],
        &[6, 32, 58, 84, 110, 136, 162],
        &[6, 26, 54, 82, 110, 138, 166],
        &[6, 30, 58, 86, 114, 142, 170],
    ];
    ALIGNMENT_COORDS[version.number() as usize - 1]
}

/// Centers of every alignment pattern of a version. The three corners
/// occupied by finder patterns never host one.
pub fn alignment_centers(version: Version) -> Vec<(usize, usize)> {
    let coords = alignment_coords(version);
    let size = canvas_size(version);
    let (first, last) = (6, size - 7);
    let mut centers = Vec::with_capacity(coords.len() * coords.len());
    for &i in coords {
        for &j in coords {
            if (i == first && j == first) || (i == first && j == last) || (i == last && j == first)
            {
                continue;
            }
            centers.push((i, j));
        }
    }
    centers
}

/// Masked 15-bit format information word: the two-bit level code and the
/// three-bit mask code protected by a BCH(15,5) remainder.
pub fn format_bits(ecl: Ecl, mask: Mask) -> u16 {
    // x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
    const GENERATOR: u32 = 0b101_0011_0111;
    const FORMAT_MASK: u16 = 0b101_0100_0001_0010;
    let data = ((ecl.code() as u32) << 3) | mask.code() as u32;
    let mut rem = data << 10;
    for shift in (0..=4).rev() {
        if rem & (1 << (shift + 10)) != 0 {
            rem ^= GENERATOR << shift;
        }
    }
    (((data << 10) | rem) as u16) ^ FORMAT_MASK
}

/// 18-bit version information word for versions 7 and above: the six-bit
/// version number protected by a BCH(18,6) remainder.
pub fn version_bits(version: Version) -> u32 {
    // x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
    const GENERATOR: u32 = 0b1_1111_0010_0101;
    let data = version.number() as u32;
    let mut rem = data << 12;
    for shift in (0..=5).rev() {
        if rem & (1 << (shift + 12)) != 0 {
            rem ^= GENERATOR << shift;
        }
    }
    (data << 12) | rem
}

#[cfg(test)]
mod test {
    use super::*;

    fn v(number: u8) -> Version {
        Version::new(number).unwrap()
    }

    #[test]
    fn canvas_sizes() {
        assert_eq!(canvas_size(v(1)), 21);
        assert_eq!(canvas_size(v(4)), 33);
        assert_eq!(canvas_size(v(40)), 177);
    }

    #[test]
    fn char_count_field_widths() {
        assert_eq!(char_count_len(Mode::Num, v(1)), 10);
        assert_eq!(char_count_len(Mode::Num, v(27)), 14);
        assert_eq!(char_count_len(Mode::Alnum, v(10)), 11);
        assert_eq!(char_count_len(Mode::Bytes, v(9)), 8);
        assert_eq!(char_count_len(Mode::Bytes, v(10)), 16);
    }

    #[test]
    fn encoded_lengths() {
        // 8 digits: two full groups and a two-digit remainder.
        assert_eq!(encoded_len(Mode::Num, 8, v(1)), 4 + 10 + 27);
        // 5 alphanumeric characters: two pairs and one leftover.
        assert_eq!(encoded_len(Mode::Alnum, 5, v(1)), 4 + 9 + 28);
        assert_eq!(encoded_len(Mode::Bytes, 5, v(1)), 4 + 8 + 40);
    }

    #[test]
    fn block_tables_are_consistent() {
        for number in 1..=40 {
            for ecl in [Ecl::L, Ecl::M, Ecl::Q, Ecl::H] {
                let (blocks, ec_per_block) = ec_blocks(v(number), ecl);
                assert!(blocks > 0);
                assert!(ec_per_block >= 7);
                let data = data_codewords(v(number), ecl);
                assert!(data > 0);
                assert_eq!(data + blocks * ec_per_block, total_codewords(v(number)));
                // Every block must hold at least one data codeword.
                assert!(data / blocks >= 1);
            }
        }
    }

    #[test]
    fn known_data_capacities() {
        assert_eq!(data_codewords(v(1), Ecl::L), 19);
        assert_eq!(data_codewords(v(1), Ecl::M), 16);
        assert_eq!(data_codewords(v(1), Ecl::H), 9);
        assert_eq!(data_codewords(v(4), Ecl::H), 36);
        assert_eq!(data_codewords(v(40), Ecl::L), 2956);
    }

    #[test]
    fn alignment_tables() {
        assert!(alignment_coords(v(1)).is_empty());
        assert_eq!(alignment_coords(v(2)), &[6, 18]);
        assert_eq!(alignment_coords(v(7)), &[6, 22, 38]);
        assert_eq!(alignment_coords(v(40)), &[6, 30, 58, 86, 114, 142, 170]);
        // The last coordinate always sits 7 modules from the far edge.
        for number in 2..=40 {
            let coords = alignment_coords(v(number));
            assert_eq!(*coords.last().unwrap(), canvas_size(v(number)) - 7);
        }
    }

    #[test]
    fn alignment_centers_skip_finder_corners() {
        assert!(alignment_centers(v(1)).is_empty());
        assert_eq!(alignment_centers(v(2)), vec![(18, 18)]);
        let centers = alignment_centers(v(7));
        assert_eq!(centers.len(), 6);
        assert!(!centers.contains(&(6, 6)));
        assert!(!centers.contains(&(6, 38)));
        assert!(!centers.contains(&(38, 6)));
        assert!(centers.contains(&(6, 22)));
        assert!(centers.contains(&(38, 38)));
    }

    #[test]
    fn format_words_match_published_values() {
        // Level M with mask 0 has an all-zero payload, leaving only the
        // fixed XOR mask.
        assert_eq!(format_bits(Ecl::M, Mask::new(0).unwrap()), 0x5412);
        assert_eq!(format_bits(Ecl::M, Mask::new(1).unwrap()), 0x5125);
        assert_eq!(format_bits(Ecl::Q, Mask::new(7).unwrap()), 0x2BED);
    }

    #[test]
    fn version_words_match_published_values() {
        assert_eq!(version_bits(v(7)), 0x07C94);
        // The high six bits always echo the version number.
        for number in 7..=40 {
            assert_eq!(version_bits(v(number)) >> 12, number as u32);
            assert!(version_bits(v(number)) < 1 << 18);
        }
    }
}
