use capmix_protocol::color::Rgb;
use serde::{Deserialize, Serialize};

/// A cap color packed into 24 bits. Color identity for cost purposes is
/// exact channel equality, so the packed key doubles as the map key in
/// neighborhood counting.
pub type ColorKey = u32;

/// Site index -> index into the cap slice handed to the annealer.
pub type Assignment = Vec<u32>;

#[inline(always)]
pub fn color_key(c: Rgb) -> ColorKey {
    (c[0] as u32) << 16 | (c[1] as u32) << 8 | c[2] as u32
}

#[inline(always)]
pub fn key_rgb(k: ColorKey) -> Rgb {
    [(k >> 16) as u8, (k >> 8) as u8, k as u8]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixResult {
    pub cost: u64,
    pub steps: u64,
    pub assignment: Assignment,
}
