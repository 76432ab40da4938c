use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter, LowerHex};
use std::str::FromStr;

/// A color swatch packed as `0xAARRGGBB`.
///
/// Persisted as a signed 32-bit integer with the same bit pattern, so opaque colors
/// (alpha >= 0x80) are stored as negative numbers. Readers of existing product documents
/// depend on that representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct ArgbColor(pub u32);

impl ArgbColor {
    pub fn new(argb: u32) -> Self {
        Self(argb)
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn argb(self) -> u32 {
        self.0
    }
}

impl From<i32> for ArgbColor {
    fn from(value: i32) -> Self {
        Self(value as u32)
    }
}

impl From<ArgbColor> for i32 {
    fn from(color: ArgbColor) -> Self {
        color.0 as i32
    }
}

impl LowerHex for ArgbColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        LowerHex::fmt(&self.0, f)
    }
}

impl Display for ArgbColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// Accepts `0xAARRGGBB`, `#AARRGGBB`, bare `AARRGGBB`, and six-digit `RRGGBB` forms
/// (the latter is treated as fully opaque).
impl FromStr for ArgbColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .or_else(|| trimmed.strip_prefix('#'))
            .unwrap_or(trimmed);

        let value = u32::from_str_radix(hex, 16)
            .map_err(|e| anyhow::anyhow!("Invalid color {:?}: {}", s, e))?;

        match hex.len() {
            6 => Ok(Self(0xff00_0000 | value)),
            8 => Ok(Self(value)),
            _ => Err(anyhow::anyhow!(
                "Invalid color {:?}: expected 6 or 8 hex digits",
                s
            )),
        }
    }
}
