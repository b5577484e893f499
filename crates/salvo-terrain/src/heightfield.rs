//! Terrain: the battlefield floor as one height sample per column.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use salvo_core::constants::MAX_Y;
use salvo_core::error::{SalvoError, SalvoResult};

/// Height-field of fixed width.
///
/// Every height stays within `[0, MAX_Y]`. Columns are never added, removed
/// or reordered; after construction only crater carving lowers them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Terrain {
    heights: Vec<f32>,
}

impl Terrain {
    /// Build a terrain from raw samples. Samples are clamped into range;
    /// non-finite samples become 0.
    pub fn new(heights: Vec<f32>) -> SalvoResult<Self> {
        if heights.is_empty() {
            return Err(SalvoError::EmptyTerrain);
        }
        let heights = heights
            .into_iter()
            .map(|h| if h.is_finite() { h.clamp(0.0, MAX_Y) } else { 0.0 })
            .collect();
        Ok(Self { heights })
    }

    /// A level field of `width` columns at `height`.
    pub fn flat(width: usize, height: f32) -> SalvoResult<Self> {
        Self::new(vec![height; width])
    }

    pub fn width(&self) -> usize {
        self.heights.len()
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Height of an integer column, or `None` off the field.
    pub fn height(&self, column: usize) -> Option<f32> {
        self.heights.get(column).copied()
    }

    /// Column under a continuous x, rounded to the nearest sample.
    pub fn column_at(&self, x: f32) -> Option<usize> {
        let col = x.round();
        if col < 0.0 || col >= self.heights.len() as f32 {
            return None;
        }
        Some(col as usize)
    }

    /// Ground height under a continuous x.
    pub fn ground_under(&self, x: f32) -> Option<f32> {
        self.column_at(x).and_then(|c| self.height(c))
    }

    /// Lower the terrain inside a circular crater.
    ///
    /// Each column within `radius` of `center.x` is cut down to the bottom arc
    /// of the circle. Terrain is never raised and never goes below zero.
    /// Returns the number of columns that were lowered.
    pub fn carve(&mut self, center: Vec2, radius: f32) -> usize {
        if radius <= 0.0 || !center.is_finite() {
            return 0;
        }
        let last = self.heights.len() as f32 - 1.0;
        let lo = (center.x - radius).ceil().max(0.0);
        let hi = (center.x + radius).floor().min(last);
        if lo > hi {
            return 0;
        }

        let mut lowered = 0;
        for col in lo as usize..=hi as usize {
            let dx = col as f32 - center.x;
            let depth = (radius * radius - dx * dx).max(0.0).sqrt();
            let bottom = (center.y - depth).max(0.0);
            let h = &mut self.heights[col];
            if bottom < *h {
                *h = bottom;
                lowered += 1;
            }
        }
        lowered
    }
}

impl TryFrom<Vec<f32>> for Terrain {
    type Error = SalvoError;

    fn try_from(heights: Vec<f32>) -> Result<Self, Self::Error> {
        Terrain::new(heights)
    }
}

impl From<Terrain> for Vec<f32> {
    fn from(terrain: Terrain) -> Vec<f32> {
        terrain.heights
    }
}
