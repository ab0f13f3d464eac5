use thiserror::Error;

/// Three 8-bit channels, the only color representation the optimizer sees.
pub type Rgb = [u8; 3];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color literal '{0}', expected #rrggbb")]
pub struct ColorParseError(pub String);

pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

pub fn hex_to_rgb(s: &str) -> Result<Rgb, ColorParseError> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 {
        return Err(ColorParseError(s.to_string()));
    }
    let packed =
        u32::from_str_radix(digits, 16).map_err(|_| ColorParseError(s.to_string()))?;
    Ok([(packed >> 16) as u8, (packed >> 8) as u8, packed as u8])
}

/// Serde adapter: `[u8; 3]` fields stored as `#rrggbb` strings on the wire.
pub mod serde_hex {
    use super::{hex_to_rgb, rgb_to_hex, Rgb};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(rgb: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&rgb_to_hex(*rgb))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
        let raw = String::deserialize(deserializer)?;
        hex_to_rgb(&raw).map_err(serde::de::Error::custom)
    }
}
