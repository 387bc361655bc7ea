//! Packing a payload into the data codeword sequence.

use bitvec::{order::Msb0, vec::BitVec, view::BitView};
use qrpix_core::{qrstandard, Ecl, Mode, Version};

use crate::EncodeError;

/// Pack `data` into data codewords for the given version and level: mode
/// classification, segment header, payload bits, terminator and padding.
pub fn build(data: &[u8], version: Version, ecl: Ecl) -> Result<Vec<u8>, EncodeError> {
    let mode = Mode::classify(data);
    let needed = qrstandard::encoded_len(mode, data.len(), version);
    let available = qrstandard::num_data_bits(version, ecl);
    if needed > available {
        return Err(EncodeError::CapacityExceeded { needed, available });
    }

    let mut builder = DataCodewordBuilder::new(version, ecl);
    builder.push_header(mode, data.len());
    match mode {
        Mode::Num => builder.push_numeric(data),
        Mode::Alnum => builder.push_alnum(data),
        Mode::Bytes => builder.push_bytes(data),
    }
    builder.finish()
}

/// Accumulates the data bit stream of a symbol.
pub struct DataCodewordBuilder {
    bits: BitVec<u8, Msb0>,
    version: Version,
    ecl: Ecl,
}

impl DataCodewordBuilder {
    pub fn new(version: Version, ecl: Ecl) -> Self {
        Self {
            bits: BitVec::with_capacity(qrstandard::num_data_bits(version, ecl)),
            version,
            ecl,
        }
    }

    /// Append the `len` low bits of `value`, most significant first.
    fn push_bits(&mut self, value: u32, len: usize) {
        debug_assert!(len <= 32);
        self.bits
            .extend_from_bitslice(&value.view_bits::<Msb0>()[32 - len..]);
    }

    /// Append the segment header: the mode indicator followed by the
    /// character count in the field width of this version.
    pub fn push_header(&mut self, mode: Mode, char_count: usize) {
        self.push_bits(mode.indicator() as u32, 4);
        let len = qrstandard::char_count_len(mode, self.version);
        self.push_bits(char_count as u32, len);
    }

    /// Append `digits` in numeric encoding: ten bits per group of three, with
    /// a shorter final group when the count is not a multiple of three.
    pub fn push_numeric(&mut self, digits: &[u8]) {
        for group in digits.chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
            self.push_bits(value, 1 + 3 * group.len());
        }
    }

    /// Append `chars` in alphanumeric encoding: eleven bits per pair, six for
    /// a trailing single character.
    pub fn push_alnum(&mut self, chars: &[u8]) {
        for pair in chars.chunks(2) {
            match *pair {
                [a, b] => self.push_bits(alnum_value(a) * 45 + alnum_value(b), 11),
                [a] => self.push_bits(alnum_value(a), 6),
                _ => unreachable!(),
            }
        }
    }

    /// Append `bytes` verbatim, eight bits each.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push_bits(byte as u32, 8);
        }
    }

    /// Close the stream: terminator, alignment to a codeword boundary and
    /// alternating pad codewords up to the version's data capacity.
    pub fn finish(mut self) -> Result<Vec<u8>, EncodeError> {
        let capacity = qrstandard::num_data_bits(self.version, self.ecl);
        if self.bits.len() > capacity {
            return Err(EncodeError::CapacityExceeded {
                needed: self.bits.len(),
                available: capacity,
            });
        }
        // The terminator shrinks when fewer than four bits remain.
        let terminator = std::cmp::min(4, capacity - self.bits.len());
        self.push_bits(0, terminator);
        let misaligned = self.bits.len() % 8;
        if misaligned != 0 {
            self.push_bits(0, 8 - misaligned);
        }
        let mut pad = 0b1110_1100;
        while self.bits.len() < capacity {
            self.push_bits(pad, 8);
            pad ^= 0b1111_1101;
        }
        Ok(self.bits.into_vec())
    }
}

/// Value of `byte` in the 45-character alphanumeric alphabet.
fn alnum_value(byte: u8) -> u32 {
    match byte {
        b'0'..=b'9' => (byte - b'0') as u32,
        b'A'..=b'Z' => (byte - b'A') as u32 + 10,
        b' ' => 36,
        b'$' => 37,
        b'%' => 38,
        b'*' => 39,
        b'+' => 40,
        b'-' => 41,
        b'.' => 42,
        b'/' => 43,
        b':' => 44,
        _ => panic!("byte {:#04x} is not alphanumeric", byte),
    }
}
