//! Reed-Solomon error correction and codeword interleaving.

use qrpix_core::{qrstandard, Ecl, Version};

use crate::gf256;

/// A block of data codewords together with its error correction codewords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcBlock {
    pub data: Vec<u8>,
    pub ecc: Vec<u8>,
}

/// Split `codewords` into the blocks prescribed for `version` and `ecl` and
/// compute the error correction codewords of each block. Shorter blocks come
/// first; when the data does not divide evenly, the trailing blocks hold one
/// extra codeword.
pub fn build_blocks(codewords: &[u8], version: Version, ecl: Ecl) -> Vec<EcBlock> {
    let (num_blocks, ec_per_block) = qrstandard::ec_blocks(version, ecl);
    let generator = generator_poly(ec_per_block);
    let short_len = codewords.len() / num_blocks;
    let num_long = codewords.len() % num_blocks;

    let mut blocks = Vec::with_capacity(num_blocks);
    let mut start = 0;
    for index in 0..num_blocks {
        let len = short_len + usize::from(index >= num_blocks - num_long);
        let data = codewords[start..start + len].to_vec();
        let ecc = remainder(&data, &generator);
        blocks.push(EcBlock { data, ecc });
        start += len;
    }
    blocks
}

/// Merge blocks into the final codeword sequence: data codewords round-robin
/// across blocks, then error correction codewords the same way. Long blocks
/// keep contributing after the short ones run out.
pub fn interleave(blocks: &[EcBlock]) -> Vec<u8> {
    let total: usize = blocks.iter().map(|b| b.data.len() + b.ecc.len()).sum();
    let mut sequence = Vec::with_capacity(total);
    let max_data = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    for k in 0..max_data {
        sequence.extend(blocks.iter().filter_map(|b| b.data.get(k)));
    }
    let max_ecc = blocks.iter().map(|b| b.ecc.len()).max().unwrap_or(0);
    for k in 0..max_ecc {
        sequence.extend(blocks.iter().filter_map(|b| b.ecc.get(k)));
    }
    sequence
}

/// Monic generator polynomial of the given `degree` with roots at consecutive
/// powers of the field generator, highest-degree coefficient first.
fn generator_poly(degree: usize) -> Vec<u8> {
    let mut poly = vec![1u8];
    for power in 0..degree {
        let root = gf256::exp(power);
        let mut next = vec![0u8; poly.len() + 1];
        for (i, &coef) in poly.iter().enumerate() {
            next[i] ^= coef;
            next[i + 1] ^= gf256::mul(coef, root);
        }
        poly = next;
    }
    poly
}

/// Remainder of `data` (times x^degree) divided by `generator`.
fn remainder(data: &[u8], generator: &[u8]) -> Vec<u8> {
    let ec_len = generator.len() - 1;
    let mut rem = vec![0u8; ec_len];
    for &byte in data {
        let factor = byte ^ rem[0];
        rem.rotate_left(1);
        rem[ec_len - 1] = 0;
        for (r, &g) in rem.iter_mut().zip(&generator[1..]) {
            *r ^= gf256::mul(g, factor);
        }
    }
    rem
}
