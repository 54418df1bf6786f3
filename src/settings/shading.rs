//! Shading strategy selection.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the renderer shades each column. The shading math lives in the
/// renderer; this is only the choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Plain block colors
    Flat,
    /// Height-based relief shading
    #[default]
    Relief,
    /// Biome colors only
    #[serde(rename = "biomes")]
    BiomeColors,
    /// Grayscale height
    Heightmap,
}

impl Shading {
    pub const ALL: [Shading; 4] = [Shading::Flat, Shading::Relief, Shading::BiomeColors, Shading::Heightmap];

    /// Stable index used for hashing. Never renumber.
    pub const fn index(self) -> u8 {
        match self {
            Shading::Flat => 0,
            Shading::Relief => 1,
            Shading::BiomeColors => 2,
            Shading::Heightmap => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Shading::Flat => "flat",
            Shading::Relief => "relief",
            Shading::BiomeColors => "biomes",
            Shading::Heightmap => "heightmap",
        }
    }
}

impl Hash for Shading {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.index());
    }
}

impl fmt::Display for Shading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shading {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shading::ALL
            .into_iter()
            .find(|shading| shading.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Shading::ALL.iter().map(|s| s.name()).collect();
                format!("unknown shading '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}
