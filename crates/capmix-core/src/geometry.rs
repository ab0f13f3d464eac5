use crate::consts::{HEX_ROW_PITCH, NEIGHBOR_RADIUS_FACTOR};
use crate::error::{CapResult, CapmixError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A fixed 2D position eligible to hold one cap. Millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub x: f32,
    pub y: f32,
}

impl Site {
    #[inline(always)]
    pub fn dist2(&self, other: &Site) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Physical table dimensions and the cap size tiling it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub width: f32,
    pub height: f32,
    pub cap_diameter: f32,
}

impl TableSpec {
    pub fn new(width: f32, height: f32, cap_diameter: f32) -> CapResult<Self> {
        if width <= 0.0 || height <= 0.0 {
            return Err(CapmixError::Config(format!(
                "table dimensions must be positive, got {width}x{height}"
            )));
        }
        if cap_diameter <= 0.0 {
            return Err(CapmixError::Config(format!(
                "cap diameter must be positive, got {cap_diameter}"
            )));
        }
        Ok(Self {
            width,
            height,
            cap_diameter,
        })
    }

    /// Cap centers of a staggered hex packing. Columns step one diameter,
    /// rows step diameter * sqrt(3)/2, odd rows shift right by a radius.
    /// Every cap stays fully inside the table.
    pub fn hex_sites(&self) -> Vec<Site> {
        let d = self.cap_diameter;
        let r = d / 2.0;
        let dy = d * HEX_ROW_PITCH;

        let rows = (((self.height - d) / dy).max(0.0) as usize) + 1;
        let cols = (((self.width - d) / d).max(0.0) as usize) + 1;

        (0..rows)
            .cartesian_product(0..cols)
            .filter_map(|(row, col)| {
                let y = r + row as f32 * dy;
                let mut x = r + col as f32 * d;
                if row % 2 == 1 {
                    x += r;
                }
                (x + r <= self.width && y + r <= self.height).then_some(Site { x, y })
            })
            .collect()
    }
}

/// Radius covering exactly the six adjacent caps of a hex packing.
pub fn default_neighbor_radius(cap_diameter: f32) -> f32 {
    cap_diameter * NEIGHBOR_RADIUS_FACTOR
}
