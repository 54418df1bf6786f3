//! Palette selections: which color map to use for blocks (per world format
//! version) and for biomes.
//!
//! Format versions are a closed set. Every member has a fixed index and label
//! that are used for ordering, hashing and serialization, so a palette mapping
//! hashes the same way in every process regardless of how it was built.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Block color maps shipped with the renderer.
pub const BUILTIN_BLOCK_PALETTES: [&str; 4] = ["default", "caves", "no_foliage", "ocean_ground"];

/// Biome color maps shipped with the renderer.
pub const BUILTIN_BIOME_PALETTES: [&str; 1] = ["default"];

/// World save format versions that carry their own block palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FormatVersion {
    V1_13,
    V1_14,
    V1_15,
}

impl FormatVersion {
    pub const ALL: [FormatVersion; 3] = [FormatVersion::V1_13, FormatVersion::V1_14, FormatVersion::V1_15];

    /// Stable index. Append new versions, never renumber existing ones.
    pub const fn index(self) -> u8 {
        match self {
            FormatVersion::V1_13 => 0,
            FormatVersion::V1_14 => 1,
            FormatVersion::V1_15 => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FormatVersion::V1_13 => "1.13",
            FormatVersion::V1_14 => "1.14",
            FormatVersion::V1_15 => "1.15",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.label() == label)
    }
}

impl Hash for FormatVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.index());
    }
}

impl PartialOrd for FormatVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FormatVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<FormatVersion> for String {
    fn from(version: FormatVersion) -> Self {
        version.label().to_string()
    }
}

impl TryFrom<String> for FormatVersion {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        FormatVersion::from_label(&label).ok_or_else(|| format!("unknown format version '{}'", label))
    }
}

/// Identifier of a color palette in the (external) palette catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteId(String);

impl PaletteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Look up one of the built-in block palettes by name.
    pub fn builtin(name: &str) -> Option<Self> {
        BUILTIN_BLOCK_PALETTES
            .iter()
            .find(|builtin| builtin.eq_ignore_ascii_case(name))
            .map(|builtin| Self::new(*builtin))
    }

    /// Look up one of the built-in biome palettes by name.
    pub fn builtin_biome(name: &str) -> Option<Self> {
        BUILTIN_BIOME_PALETTES
            .iter()
            .find(|builtin| builtin.eq_ignore_ascii_case(name))
            .map(|builtin| Self::new(*builtin))
    }

    pub fn default_blocks() -> Self {
        Self::new(BUILTIN_BLOCK_PALETTES[0])
    }

    pub fn default_biomes() -> Self {
        Self::new(BUILTIN_BIOME_PALETTES[0])
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Block palette per format version.
///
/// Backed by a map ordered by [`FormatVersion::index`], so equality and hashing
/// only see the set of pairs, never the order they were inserted in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockPalettes(BTreeMap<FormatVersion, PaletteId>);

impl BlockPalettes {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// The same palette for every known format version.
    pub fn uniform(palette: PaletteId) -> Self {
        Self(FormatVersion::ALL.into_iter().map(|v| (v, palette.clone())).collect())
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (FormatVersion, PaletteId)>,
    {
        Self(pairs.into_iter().collect())
    }

    pub(crate) fn insert(&mut self, version: FormatVersion, palette: PaletteId) {
        self.0.insert(version, palette);
    }

    pub fn get(&self, version: FormatVersion) -> Option<&PaletteId> {
        self.0.get(&version)
    }

    /// Pairs in stable version order.
    pub fn iter(&self) -> impl Iterator<Item = (FormatVersion, &PaletteId)> {
        self.0.iter().map(|(v, p)| (*v, p))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
