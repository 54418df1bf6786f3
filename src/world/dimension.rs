//! Dimensions of a world save and where their region folders live.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File whose presence marks a directory as a world root.
pub const LEVEL_MARKER: &str = "level.dat";

/// A coordinate space within a world save.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Overworld,
    Nether,
    End,
}

impl Dimension {
    /// Order in which a world root is probed. Fixed so that automatic
    /// selection is reproducible.
    pub const PROBE_ORDER: [Dimension; 3] = [Dimension::Overworld, Dimension::Nether, Dimension::End];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Overworld => "Overworld",
            Dimension::Nether => "Nether",
            Dimension::End => "End",
        }
    }

    /// Path components of the region folder relative to the world root
    pub fn region_subpath(&self) -> &'static [&'static str] {
        match self {
            Dimension::Overworld => &["region"],
            Dimension::Nether => &["DIM-1", "region"],
            Dimension::End => &["DIM1", "region"],
        }
    }

    pub fn region_folder_in(&self, world_root: &Path) -> PathBuf {
        self.region_subpath()
            .iter()
            .fold(world_root.to_path_buf(), |path, part| path.join(part))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overworld" | "region" => Ok(Dimension::Overworld),
            "nether" | "dim-1" => Ok(Dimension::Nether),
            "end" | "dim1" => Ok(Dimension::End),
            _ => Err(format!("unknown dimension '{}' (expected overworld, nether or end)", s)),
        }
    }
}
