//! Arithmetic over GF(2^8) as used by the QR code error correction scheme.

/// Reducing polynomial x^8 + x^4 + x^3 + x^2 + 1.
const POLY: u16 = 0x11d;

/// Powers of the generator element 2. Doubled so that a sum of two logarithms
/// can index it without a modulo.
const EXP: [u8; 510] = build_exp();
const LOG: [u8; 256] = build_log();

const fn build_exp() -> [u8; 510] {
    let mut table = [0u8; 510];
    let mut value: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = value as u8;
        table[i + 255] = value as u8;
        value <<= 1;
        if value & 0x100 != 0 {
            value ^= POLY;
        }
        i += 1;
    }
    table
}

const fn build_log() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[EXP[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// The generator element raised to `power`.
#[inline]
pub fn exp(power: usize) -> u8 {
    EXP[power % 255]
}

/// Product of `a` and `b` in the field.
#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        0
    } else {
        EXP[LOG[a as usize] as usize + LOG[b as usize] as usize]
    }
}
