use serde::{Deserialize, Serialize};

use crate::core::error::RegistryError;

/// Linear RGB color, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(hex: &str) -> Result<Self, RegistryError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(RegistryError::InvalidColor(hex.to_owned()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| RegistryError::InvalidColor(hex.to_owned()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Planetary ring drawn in the entity's equatorial plane.
/// The ring spans `[0.8, 1.0] * radius_factor * visual_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingDescriptor {
    pub color: Color,
    pub radius_factor: f32,
}

impl RingDescriptor {
    pub fn new(color: Color, radius_factor: f32) -> Self {
        Self { color, radius_factor }
    }

    /// Inner and outer ring radius for a body of the given size.
    pub fn radii(&self, visual_size: f32) -> (f32, f32) {
        let outer = visual_size * self.radius_factor;
        (outer * 0.8, outer)
    }
}

/// Manifest form of a ring: `{ "color": "#3b82f6", "size": 1.8 }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingSpec {
    pub color: String,
    #[serde(default = "default_ring_size")]
    pub size: f32,
}

fn default_ring_size() -> f32 {
    1.5
}

impl RingSpec {
    pub fn to_descriptor(&self) -> Result<RingDescriptor, RegistryError> {
        Ok(RingDescriptor::new(Color::from_hex(&self.color)?, self.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        let c = Color::from_hex("#60a5fa").unwrap();
        assert!((c.r - 0x60 as f32 / 255.0).abs() < 1e-6);
        assert!((c.b - 0xfa as f32 / 255.0).abs() < 1e-6);
        assert_eq!(Color::from_hex("60a5fa").unwrap(), c);
        assert_eq!(c.to_hex(), "#60a5fa");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
        assert!(Color::from_hex("#60a5fa00").is_err());
    }

    #[test]
    fn ring_radii_follow_size() {
        let ring = RingDescriptor::new(Color::WHITE, 2.0);
        let (inner, outer) = ring.radii(1.5);
        assert!((outer - 3.0).abs() < 1e-6);
        assert!((inner - 2.4).abs() < 1e-6);
    }
}
