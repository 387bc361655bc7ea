//! Penalty scoring used to pick the best data mask.

use itertools::Itertools;
use qrpix_core::Canvas;

/// Total penalty score of `canvas` under the four standard rules: same-color
/// runs, 2x2 blocks, finder-like sequences and dark/light imbalance.
pub fn penalty(canvas: &Canvas) -> u32 {
    run_penalty(canvas) + block_penalty(canvas) + finder_penalty(canvas) + balance_penalty(canvas)
}

/// Three points per same-color run of five modules, plus one per extra module.
fn run_penalty(canvas: &Canvas) -> u32 {
    (0..canvas.size())
        .map(|k| line_run_score(canvas.row(k)) + line_run_score(canvas.column(k)))
        .sum()
}

fn line_run_score(line: impl Iterator<Item = bool>) -> u32 {
    let runs = line.chunk_by(|&dark| dark);
    let mut score = 0;
    for (_, run) in &runs {
        let len = run.count() as u32;
        if len >= 5 {
            score += 3 + (len - 5);
        }
    }
    score
}

/// Three points per 2x2 block of a single color, counted with overlap.
fn block_penalty(canvas: &Canvas) -> u32 {
    let size = canvas.size();
    let mut score = 0;
    for i in 0..size - 1 {
        for j in 0..size - 1 {
            let module = canvas.get(i, j);
            if module == canvas.get(i, j + 1)
                && module == canvas.get(i + 1, j)
                && module == canvas.get(i + 1, j + 1)
            {
                score += 3;
            }
        }
    }
    score
}

/// Forty points per 1:1:3:1:1 finder-like sequence with a four-module light
/// flank, in either direction. The quiet zone counts as light.
fn finder_penalty(canvas: &Canvas) -> u32 {
    (0..canvas.size())
        .map(|k| line_finder_score(canvas.row(k)) + line_finder_score(canvas.column(k)))
        .sum()
}

fn line_finder_score(line: impl Iterator<Item = bool>) -> u32 {
    const PATTERN: [bool; 11] = [
        true, false, true, true, true, false, true, false, false, false, false,
    ];
    let mut extended = vec![false; 4];
    extended.extend(line);
    extended.extend_from_slice(&[false; 4]);
    extended
        .windows(PATTERN.len())
        .filter(|w| w.iter().eq(PATTERN.iter()) || w.iter().rev().eq(PATTERN.iter()))
        .count() as u32
        * 40
}

/// Ten points per five percent the dark module share strays from one half.
fn balance_penalty(canvas: &Canvas) -> u32 {
    let total = (canvas.size() * canvas.size()) as i64;
    let dark = canvas.dark_count() as i64;
    let percent = dark * 100 / total;
    (percent - 50).unsigned_abs() as u32 / 5 * 10
}
