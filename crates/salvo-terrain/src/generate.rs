//! Procedural terrain and tank placement.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use salvo_core::constants::MAX_Y;
use salvo_core::enums::TerrainType;
use salvo_core::error::SalvoResult;

use crate::heightfield::Terrain;

/// Generated ground stays inside this band so tanks have sky above them.
const GROUND_MIN: f32 = MAX_Y * 0.1;
const GROUND_MAX: f32 = MAX_Y * 0.75;

/// Generate a terrain of `width` columns.
pub fn generate(kind: TerrainType, width: usize, rng: &mut ChaCha8Rng) -> SalvoResult<Terrain> {
    let heights = match kind {
        TerrainType::Flat => vec![MAX_Y * 0.3; width],
        TerrainType::Rolling => rolling(width, rng),
        TerrainType::Hilly => midpoint_displacement(width, MAX_Y * 0.35, 0.55, rng),
        TerrainType::Jagged => midpoint_displacement(width, MAX_Y * 0.5, 0.75, rng),
    };
    let heights = heights
        .into_iter()
        .map(|h| h.clamp(GROUND_MIN, GROUND_MAX))
        .collect();
    tracing::debug!(?kind, width, "generated terrain");
    Terrain::new(heights)
}

/// Sum of three sine waves with random frequency and phase.
fn rolling(width: usize, rng: &mut ChaCha8Rng) -> Vec<f32> {
    let base = MAX_Y * 0.35;
    let waves: Vec<(f32, f32, f32)> = (0..3)
        .map(|i| {
            let amplitude = MAX_Y * 0.12 / (i + 1) as f32;
            let cycles = rng.gen_range(0.5..2.5) * (i + 1) as f32;
            let phase = rng.gen_range(0.0..std::f32::consts::TAU);
            (amplitude, cycles, phase)
        })
        .collect();
    (0..width)
        .map(|x| {
            let t = x as f32 / width.max(1) as f32 * std::f32::consts::TAU;
            base + waves
                .iter()
                .map(|(a, c, p)| a * (t * c + p).sin())
                .sum::<f32>()
        })
        .collect()
}

/// One-dimensional midpoint displacement. `roughness` scales the random
/// spread at each halving.
fn midpoint_displacement(
    width: usize,
    spread: f32,
    roughness: f32,
    rng: &mut ChaCha8Rng,
) -> Vec<f32> {
    if width == 0 {
        return Vec::new();
    }
    let mut heights = vec![0.0; width];
    let mid = (GROUND_MIN + GROUND_MAX) / 2.0;
    heights[0] = mid + rng.gen_range(-spread..=spread) / 2.0;
    heights[width - 1] = mid + rng.gen_range(-spread..=spread) / 2.0;

    let mut stack = vec![(0usize, width - 1, spread)];
    while let Some((lo, hi, spread)) = stack.pop() {
        if hi - lo < 2 {
            continue;
        }
        let m = (lo + hi) / 2;
        let jitter = if spread > 0.0 { rng.gen_range(-spread..=spread) } else { 0.0 };
        heights[m] = (heights[lo] + heights[hi]) / 2.0 + jitter;
        stack.push((lo, m, spread * roughness));
        stack.push((m, hi, spread * roughness));
    }
    heights
}

/// Columns for `count` tanks: evenly spaced slots, shuffled when `random`.
pub fn placement_columns(
    width: usize,
    count: usize,
    random: bool,
    rng: &mut ChaCha8Rng,
) -> Vec<usize> {
    let mut columns: Vec<usize> = (0..count)
        .map(|i| (width * (i + 1) / (count + 1)).min(width.saturating_sub(1)))
        .collect();
    if random {
        columns.shuffle(rng);
    }
    columns
}
